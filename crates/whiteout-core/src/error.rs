use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhiteoutError {
    /// Represents a secret file that is missing, unreadable or empty. Nothing was hidden.
    #[error("Source file {0} is missing, unreadable or empty")]
    SourceUnreadable(PathBuf),

    /// Represents a carrier that cannot hold the control header or a packet too long to describe.
    #[error("Capacity Error: {required} pixels are required but the carrier only has {available}")]
    CapacityExceeded { required: usize, available: usize },

    /// Represents a carrier without a payload, or a wrong password. The carrier was not touched.
    #[error("No hidden data found, or the password is wrong")]
    SignatureMismatch,

    /// Represents a header with a bit depth outside of 1..=8, usually garbage data
    #[error("Invalid bit depth: {0} (must be 1-8)")]
    InvalidBitDepth(u8),

    /// Represents a recovered packet without a name/content separator.
    /// The consumed pixels are already wiped when this is returned.
    #[error("The hidden data is malformed, no file name separator found")]
    MalformedPacket,

    /// Represents a broken or unsupported bitmap container
    #[error("Bitmap is invalid: {0}")]
    InvalidBitmap(&'static str),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target set")]
    TargetNotSet,

    #[error("API Error: Missing file to hide")]
    MissingFile,
}
