//! # libdib
//!
//!
//! This library builds 32-bit raster images in memory and serializes them into the
//! Device-Independent-Bitmap (DIB) layouts that clipboards exchange: `CF_DIB`
//! (`BITMAPINFOHEADER`) and `CF_DIBV5` (`BITMAPV5HEADER`).
//!
//! It is write-only: there is no DIB decoder in this crate.
//!
//! ### Layouts
//!
//! | [`DibFormat`]                   | header   | trailing channel masks | clipboard format |
//! |---------------------------------|----------|------------------------|------------------|
//! | [`DibFormat::LegacyDib`]        | 40 bytes | always (12 bytes)      | `CF_DIB`         |
//! | [`DibFormat::ExtendedDibShort`] | 124 bytes| never                  | `CF_DIBV5`       |
//! | [`DibFormat::ExtendedDibLong`]  | 124 bytes| always (12 bytes)      | `CF_DIBV5`       |
//!
//! Every layout uses 32 bits per pixel with `BI_BITFIELDS` compression and the masks
//! `0x00FF0000`/`0x0000FF00`/`0x000000FF`. The height is written as a positive number, so
//! rows are stored bottom-up while [`RasterBuffer`] is addressed top-down. The alpha
//! channel is carried in the pixel words, but no alpha mask is declared.
//!
//! ### Usage
//!
//! ```rust
//! use libdib::{clipboard::{Clipboard, MemorySink, FormatId}, DibFormat, NamedColor, RasterBuffer};
//!
//! fn main() -> Result<(), libdib::Error> {
//!     let mut raster = RasterBuffer::new(12, 10, NamedColor::White.rgba())?;
//!     raster.fill_row(0, NamedColor::Red.rgba())?;
//!     raster.set(5, 0, NamedColor::Yellow.rgba())?;
//!
//!     let mut sink = MemorySink::default();
//!     {
//!         let mut clip = Clipboard::open(&mut sink)?;
//!         clip.copy_image(&raster, DibFormat::LegacyDib)?;
//!         clip.copy_image(&raster, DibFormat::ExtendedDibLong)?;
//!     }
//!     assert_eq!(sink.get(FormatId::CF_DIB).map(<[u8]>::len), Some(40 + 12 + 12 * 10 * 4));
//!     Ok(())
//! }
//! ```
//!

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

/// Module containing the clipboard session and sinks
pub mod clipboard;
/// Module containing the color sample and named colors
pub mod color;
mod error;
/// Module containing the raster buffer and DIB encoders
pub mod image;

pub use color::{NamedColor, Rgba};
pub use error::Error;
pub use crate::image::encode;
pub use crate::image::DibFormat;
pub use crate::image::EncodedDib;
pub use crate::image::RasterBuffer;
