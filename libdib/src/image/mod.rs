#![allow(clippy::module_name_repetitions)]

pub(crate) mod encoder;
pub(crate) mod header;
pub(crate) mod masks;
pub(crate) mod raster;

/// Module containing raw header types
///
/// Types in this module are serialized as-is, the responsibility
/// of upholding validity is on the user
pub mod raw {
    /// Contains the DIB header records and their field constants
    pub mod header {
        pub use crate::image::header::{
            DibHeader, InfoHeader, V5Header, BITMAPINFOHEADER_SIZE, BITMAPV5HEADER_SIZE,
            BI_BITFIELDS, LCS_GM_IMAGES, LCS_SRGB,
        };
    }
}

pub use encoder::{encode_extended, encode_legacy};
pub use masks::{write_channel_masks, ChannelMasks, CHANNEL_MASKS, CHANNEL_MASKS_SIZE};
pub use raster::{RasterBuffer, BYTES_PER_PIXEL};

use crate::{clipboard::FormatId, Error};
use strum::{Display, EnumIter, EnumString};
use tracing::{info, instrument};

/// The DIB encodings a [`RasterBuffer`] can be published as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum DibFormat {
    /// `BITMAPINFOHEADER` + channel masks, published as `CF_DIB`
    #[strum(serialize = "dib")]
    LegacyDib,
    /// `BITMAPV5HEADER` without trailing channel masks, published as `CF_DIBV5`
    #[strum(serialize = "dibv5")]
    ExtendedDibShort,
    /// `BITMAPV5HEADER` followed by channel masks, published as `CF_DIBV5`
    #[strum(serialize = "dibv5-long")]
    ExtendedDibLong,
}

/// The header family of a [`DibFormat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DibVariant {
    /// 40-byte `BITMAPINFOHEADER`
    Legacy,
    /// 124-byte `BITMAPV5HEADER`
    Extended,
}

/// How a [`DibFormat`] is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DibDescriptor {
    /// The header family
    pub variant: DibVariant,
    /// Whether the channel mask block follows the header
    pub include_palette: bool,
}

impl DibFormat {
    /// Returns how this format is encoded
    #[must_use]
    pub const fn descriptor(self) -> DibDescriptor {
        match self {
            Self::LegacyDib => DibDescriptor {
                variant: DibVariant::Legacy,
                include_palette: true,
            },
            Self::ExtendedDibShort => DibDescriptor {
                variant: DibVariant::Extended,
                include_palette: false,
            },
            Self::ExtendedDibLong => DibDescriptor {
                variant: DibVariant::Extended,
                include_palette: true,
            },
        }
    }

    /// Returns the clipboard format this encoding is published under
    #[must_use]
    pub const fn format_id(self) -> FormatId {
        match self.descriptor().variant {
            DibVariant::Legacy => FormatId::CF_DIB,
            DibVariant::Extended => FormatId::CF_DIBV5,
        }
    }
}

/// An encoded bitmap, ready to be handed to a clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDib {
    /// The clipboard format of [`EncodedDib::bytes`]
    pub format: FormatId,
    /// Header, optional channel masks and pixel data
    pub bytes: Vec<u8>,
}

/// Encodes `raster` in the requested `format`
///
/// # Errors
///
/// See [`encode_legacy`] and [`encode_extended`]
#[instrument(skip(raster))]
pub fn encode(raster: &RasterBuffer, format: DibFormat) -> Result<EncodedDib, Error> {
    let DibDescriptor {
        variant,
        include_palette,
    } = format.descriptor();
    let bytes = match variant {
        DibVariant::Legacy => encode_legacy(raster)?,
        DibVariant::Extended => encode_extended(raster, include_palette)?,
    };
    let format_id = format.format_id();
    info!("Encoded {format} as {format_id} ({} bytes)", bytes.len());
    Ok(EncodedDib {
        format: format_id,
        bytes,
    })
}
