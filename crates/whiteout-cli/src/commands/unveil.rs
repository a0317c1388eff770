use std::path::PathBuf;

use clap::Args;
use log::info;

use crate::CliResult;

/// Unveils the file hidden in a BMP image and wipes it from the image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Password used to hide the data, asked for if missing
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// Source image that contains secret data, it is rewritten without it
    #[arg(short = 'i', long = "in", value_name = "image source file", required = true)]
    pub image: PathBuf,

    /// Final data will be stored in that folder
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output folder",
        default_value = "."
    )]
    pub output_folder: PathBuf,
}

impl UnveilArgs {
    pub fn run(self) -> CliResult<()> {
        let password = if self.password.is_none() {
            crate::cli::ask_for_password(false)
        } else {
            self.password
        };

        let report = whiteout_core::commands::unveil(&self.image, &self.output_folder, password)?;
        info!("unveiled {}", report.file.display());

        Ok(())
    }
}
