use std::path::{Path, PathBuf};

use log::{error, warn};

use super::FALLBACK_FILE_NAME;
use crate::codec::Completion;
use crate::engine::ExtractionEngine;
use crate::media::{write_atomically, Bitmap, Persist};
use crate::{Password, WhiteoutError};

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

/// Where the unveiled file went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnveilReport {
    pub file: PathBuf,
    pub completion: Completion,
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_image: Option<PathBuf>,
    output_folder: Option<PathBuf>,
    password: Password,
}

impl UnveilApi {
    /// This is the secret image that contains the data to be unveiled.
    /// It is rewritten with the hidden data wiped out.
    pub fn from_secret_image(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// This is the folder where the data will be saved to
    pub fn into_output_folder(mut self, output_folder: impl AsRef<Path>) -> Self {
        self.output_folder = Some(output_folder.as_ref().to_path_buf());
        self
    }

    /// Set the password used for hiding the data
    /// If `None` is passed the empty password is used
    pub fn using_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    /// Execute the unveil process and blocks until it is finished
    ///
    /// The data can be unveiled once: on success the wiped image replaces the
    /// secret image. When no data is found nothing is written at all.
    pub fn execute(self) -> Result<UnveilReport, WhiteoutError> {
        let Some(secret_image) = self.secret_image else {
            return Err(WhiteoutError::CarrierNotSet);
        };
        let Some(output_folder) = self.output_folder else {
            return Err(WhiteoutError::TargetNotSet);
        };

        let mut bitmap = Bitmap::open(&secret_image)?;
        let unveiled = match ExtractionEngine::new(self.password).extract(bitmap.pixels_mut()) {
            Ok(unveiled) => unveiled,
            Err(WhiteoutError::MalformedPacket) => {
                // the pixels are gone already, keep the image consistent with that
                bitmap.save_as(&secret_image)?;
                return Err(WhiteoutError::MalformedPacket);
            }
            Err(e) => return Err(e),
        };
        if let Completion::Truncated { stored, expected } = unveiled.completion {
            warn!("hidden data was truncated, only {stored} of {expected} bytes unveiled");
        }

        let file_name = Path::new(&unveiled.name)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(FALLBACK_FILE_NAME));
        let target = output_folder.join(file_name);

        write_atomically(&target, &unveiled.content).map_err(|e| {
            error!("cannot write {}: {e}", target.display());
            e
        })?;

        bitmap.save_as(&secret_image)?;

        Ok(UnveilReport {
            file: target,
            completion: unveiled.completion,
        })
    }
}
