use std::path::PathBuf;

use clap::Args;
use whiteout_core::{BitDepth, CodecOptions};

use crate::CliResult;

/// Hides a file in a BMP image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Password used to pick the pixels and obfuscate the data, asked for if missing
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// BMP carrier image
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub image: PathBuf,

    /// File to hide in the image
    #[arg(short = 'd', long = "data", value_name = "data file", required = true)]
    pub data_file: PathBuf,

    /// Bits per color channel used for the data, up to 5 the noisiest pixels go first
    #[arg(
        short = 'b',
        long = "bits",
        value_name = "bit depth",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(1..=8)
    )]
    pub bits: u8,

    /// Final image will be stored as file, the carrier image is overwritten if omitted
    #[arg(short = 'o', long = "out", value_name = "output image file")]
    pub write_to_file: Option<PathBuf>,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        let password = if self.password.is_none() {
            crate::cli::ask_for_password(true)
        } else {
            self.password
        };
        let options = CodecOptions::default().with_bit_depth(BitDepth::new(self.bits)?);

        whiteout_core::commands::hide(
            &self.image,
            &self.data_file,
            self.write_to_file,
            password,
            options,
        )?;

        Ok(())
    }
}
