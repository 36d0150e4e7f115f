//! # png512
//!
//! A library for normalizing batches of images into uniform 512x512 PNG files.
//!
//! Each input is gated by extension (JPEG, PNG, GIF, BMP, TIFF, WebP), decoded,
//! converted to RGB unless it is already RGB or RGBA, scaled with Lanczos3 so
//! its shorter side is 512 pixels, center-cropped to 512x512, and written as
//! `<stem>_nuevo.png` next to the source. A failing item never stops the batch;
//! it is recorded in the returned [`BatchReport`].
//!
//! ## Example
//!
//! ```no_run
//! use png512::{Config, Normalizer};
//!
//! # fn main() -> png512::Result<()> {
//! let normalizer = Normalizer::new(Config::default())?;
//! let report = normalizer.run(&["photo.jpg", "notes.txt"]);
//!
//! println!("processed {}", report.processed);
//! for error in &report.errors {
//!     println!("{error}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod pipeline;

pub use error::{Error, Result};
pub use pipeline::{normalize, BatchReport, Config, ItemError, Normalizer};
