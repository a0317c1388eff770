use std::path::{Path, PathBuf};

use crate::api::unveil::UnveilReport;
use crate::{CodecOptions, Completion, WhiteoutError};

pub fn hide(
    image: &Path,
    data_file: &Path,
    write_to_file: Option<PathBuf>,
    password: Option<String>,
    options: CodecOptions,
) -> Result<Completion, WhiteoutError> {
    crate::api::hide::prepare()
        .with_options(options)
        .with_image(image)
        .with_file(data_file)
        .use_output(write_to_file)
        .use_password(password)
        .execute()
}

pub fn unveil(
    secret_image: &Path,
    output_folder: &Path,
    password: Option<String>,
) -> Result<UnveilReport, WhiteoutError> {
    crate::api::unveil::prepare()
        .from_secret_image(secret_image)
        .into_output_folder(output_folder)
        .using_password(password)
        .execute()
}
