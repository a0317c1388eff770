use crate::error::WhiteoutError;

pub type Result<T> = std::result::Result<T, WhiteoutError>;
