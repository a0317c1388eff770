use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::codec::Completion;
use crate::engine::EmbeddingEngine;
use crate::media::{Bitmap, CodecOptions, Persist};
use crate::{Password, WhiteoutError};

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    file: Option<PathBuf>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    password: Password,
    options: CodecOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// The file to hide. Its path, as given, is stored as the file name.
    pub fn with_file<A: AsRef<Path>>(mut self, data_file: A) -> Self {
        self.file = Some(data_file.as_ref().to_path_buf());
        self
    }

    /// The BMP carrier image
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// Where the resulting image goes, the carrier image itself is overwritten if not set
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn use_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.into();
        self
    }

    /// Set the password
    /// If `None` is passed the empty password is used, the data is not obfuscated
    pub fn use_password<S: AsRef<str>>(mut self, password: Option<S>) -> Self {
        self.password = password.map(|s| s.as_ref().to_string()).into();
        self
    }

    pub fn execute(self) -> Result<Completion, WhiteoutError> {
        let Some(image) = self.image else {
            return Err(WhiteoutError::CarrierNotSet);
        };
        let Some(file) = self.file else {
            return Err(WhiteoutError::MissingFile);
        };

        let mut bitmap = Bitmap::open(&image)?;
        let content = fs::read(&file).map_err(|e| {
            debug!("cannot read {}: {e}", file.display());
            WhiteoutError::SourceUnreadable(file.clone())
        })?;

        let report = EmbeddingEngine::new(self.password, self.options.bit_depth).embed(
            bitmap.pixels_mut(),
            &file.to_string_lossy(),
            &content,
        )?;
        if let Completion::Truncated { stored, expected } = report.completion {
            warn!(
                "{} is too small, only {stored} of {expected} bytes were hidden",
                image.display()
            );
        }

        bitmap.save_as(self.output.as_deref().unwrap_or(image.as_path()))?;

        Ok(report.completion)
    }
}
