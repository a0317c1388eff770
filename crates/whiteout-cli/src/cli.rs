use clap::{Parser, Subcommand};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
}

/// Prompts for the password, `None` when there is no terminal to ask on.
pub fn ask_for_password(confirm: bool) -> Option<String> {
    let prompt = dialoguer::Password::new()
        .with_prompt("Password")
        .allow_empty_password(true);
    let prompt = if confirm {
        prompt.with_confirmation("Repeat password", "Error: the passwords don't match.")
    } else {
        prompt
    };

    prompt.interact().ok()
}
