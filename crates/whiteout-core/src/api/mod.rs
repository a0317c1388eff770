pub mod hide;
pub mod unveil;

/// Name used for a recovered file whose stored name has no file name component.
pub const FALLBACK_FILE_NAME: &str = "unveiled.bin";
