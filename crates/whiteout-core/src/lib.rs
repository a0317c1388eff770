//! # Whiteout Core API
//!
//! Hides a single file in the pixel plane of an uncompressed BMP image. The file
//! can be unveiled exactly once: every pixel that carried data is set to 255
//! ("whited out") while reading it.
//!
//! - [`api::hide`] and [`api::unveil`] work on files
//! - [`EmbeddingEngine`] and [`ExtractionEngine`] work on an in-memory [`PixelPlane`]
//!
//! The password seeds where data goes and obfuscates it with a repeating XOR
//! keystream. This is no encryption.
//!
//! # Usage Examples
//!
//! ## Hide a file inside an image
//!
//! ```rust,no_run
//! whiteout_core::api::hide::prepare()
//!     .with_file("Cargo.toml")          // will hide this file inside the image
//!     .with_password("SuperSecret42")   // picks the pixels and obfuscates the data
//!     .with_image("carrier-image.bmp")
//!     .with_output("image-with-a-file-inside.bmp")
//!     .execute()
//!     .expect("Failed to hide file in image");
//! ```
//!
//! ## Unveil the file, once
//!
//! ```rust,no_run
//! whiteout_core::api::unveil::prepare()
//!     .from_secret_image("image-with-a-file-inside.bmp")
//!     .using_password("SuperSecret42")
//!     .into_output_folder("unveiled")
//!     .execute()
//!     .expect("Failed to unveil file from image");
//! ```
//!
//! ## Work on a pixel plane
//!
//! ```rust
//! use whiteout_core::{BitDepth, EmbeddingEngine, ExtractionEngine, PixelPlane};
//!
//! let mut plane = PixelPlane::new(vec![0u8; 1000], 24);
//! EmbeddingEngine::new("k", BitDepth::default())
//!     .embed(&mut plane, "a.txt", b"hi")
//!     .unwrap();
//!
//! let unveiled = ExtractionEngine::new("k").extract(&mut plane).unwrap();
//! assert_eq!(unveiled.name, "a.txt");
//! assert_eq!(unveiled.content, b"hi");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod codec;
pub mod commands;
pub mod engine;
pub mod error;
pub mod media;
pub mod password;
pub mod result;

pub use crate::codec::{BitDepth, Completion};
pub use crate::engine::{EmbedReport, EmbeddingEngine, ExtractionEngine, Unveiled};
pub use crate::error::WhiteoutError;
pub use crate::media::{Bitmap, CodecOptions, Persist, PixelPlane};
pub use crate::password::{Password, Seed};
pub use crate::result::Result;
