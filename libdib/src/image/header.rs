use bon::Builder;
use std::io::{self, Write};
use tracing::debug;

use crate::{
    image::masks::{ChannelMasks, CHANNEL_MASKS},
    image::raster::RasterBuffer,
    Error,
};

/// Size of a `BITMAPINFOHEADER`
pub const BITMAPINFOHEADER_SIZE: u32 = 40;
/// Size of a `BITMAPV5HEADER`
pub const BITMAPV5HEADER_SIZE: u32 = 124;
/// `biCompression` value for uncompressed pixels described by channel masks
pub const BI_BITFIELDS: u32 = 3;
/// `bV5CSType` value for the calibrated sRGB color space (the bytes `sRGB`)
pub const LCS_SRGB: u32 = 0x7352_4742;
/// `bV5Intent` value for picture rendering (perceptual)
pub const LCS_GM_IMAGES: u32 = 4;

/// A DIB header record that can be serialized into its on-the-wire layout
pub trait DibHeader {
    /// Declared (and serialized) size of the header in bytes
    const SIZE: u32;

    /// Writes the little-endian header layout
    ///
    /// # Errors
    ///
    /// Propagates any error of the underlying writer
    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()>;
}

/// Raw `BITMAPINFOHEADER` fields
///
/// Also forms the first 40 bytes of a [`V5Header`], in which case [`InfoHeader::size`]
/// holds the size of the whole V5 record.
#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct InfoHeader {
    /// Field: biSize
    #[builder(default = BITMAPINFOHEADER_SIZE)]
    pub size: u32,

    /// Field: biWidth
    pub width: i32,

    /// Field: biHeight
    ///
    /// Positive values describe bottom-up bitmaps
    pub height: i32,

    /// Field: biPlanes
    #[builder(default = 1)]
    pub planes: u16,

    /// Field: biBitCount
    #[builder(default = 32)]
    pub bit_count: u16,

    /// Field: biCompression
    #[builder(default = BI_BITFIELDS)]
    pub compression: u32,

    /// Field: biSizeImage
    pub size_image: u32,

    /// Field: biXPelsPerMeter
    #[builder(default)]
    pub x_pels_per_meter: i32,

    /// Field: biYPelsPerMeter
    #[builder(default)]
    pub y_pels_per_meter: i32,

    /// Field: biClrUsed
    #[builder(default)]
    pub clr_used: u32,

    /// Field: biClrImportant
    #[builder(default)]
    pub clr_important: u32,
}

impl InfoHeader {
    /// Describes a 32-bit bottom-up `BI_BITFIELDS` bitmap of `raster`'s dimensions
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionOverflow`] if the width or height do not fit an `i32`
    /// or the pixel block size does not fit a `u32`
    pub fn for_raster(raster: &RasterBuffer, size: u32) -> Result<Self, Error> {
        let overflow = || Error::DimensionOverflow {
            width: raster.width(),
            height: raster.height(),
        };
        let width = i32::try_from(raster.width()).map_err(|_| overflow())?;
        let height = i32::try_from(raster.height()).map_err(|_| overflow())?;
        let size_image = u32::try_from(raster.byte_size()).map_err(|_| overflow())?;
        debug!("Header width, height, size_image: {:?}", (width, height, size_image));

        Ok(Self::builder()
            .size(size)
            .width(width)
            .height(height)
            .size_image(size_image)
            .build())
    }
}

impl DibHeader for InfoHeader {
    const SIZE: u32 = BITMAPINFOHEADER_SIZE;

    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.size.to_le_bytes())?;
        w.write_all(&self.width.to_le_bytes())?;
        w.write_all(&self.height.to_le_bytes())?;
        w.write_all(&self.planes.to_le_bytes())?;
        w.write_all(&self.bit_count.to_le_bytes())?;
        w.write_all(&self.compression.to_le_bytes())?;
        w.write_all(&self.size_image.to_le_bytes())?;
        w.write_all(&self.x_pels_per_meter.to_le_bytes())?;
        w.write_all(&self.y_pels_per_meter.to_le_bytes())?;
        w.write_all(&self.clr_used.to_le_bytes())?;
        w.write_all(&self.clr_important.to_le_bytes())
    }
}

/// Raw `BITMAPV5HEADER` fields
#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct V5Header {
    /// The leading `BITMAPINFOHEADER` fields
    pub info: InfoHeader,

    /// Fields: bV5RedMask, bV5GreenMask, bV5BlueMask
    #[builder(default = CHANNEL_MASKS)]
    pub masks: ChannelMasks,

    /// Field: bV5AlphaMask
    ///
    /// Left at 0: the alpha channel is carried in the pixels but not declared
    #[builder(default)]
    pub alpha_mask: u32,

    /// Field: bV5CSType
    #[builder(default = LCS_SRGB)]
    pub cs_type: u32,

    /// Field: bV5Endpoints (`CIEXYZTRIPLE`), only meaningful for calibrated RGB
    #[builder(default = [0; 36])]
    pub endpoints: [u8; 36],

    /// Fields: bV5GammaRed, bV5GammaGreen, bV5GammaBlue
    #[builder(default)]
    pub gamma: [u32; 3],

    /// Field: bV5Intent
    #[builder(default = LCS_GM_IMAGES)]
    pub intent: u32,

    /// Field: bV5ProfileData
    #[builder(default)]
    pub profile_data: u32,

    /// Field: bV5ProfileSize
    #[builder(default)]
    pub profile_size: u32,

    /// Field: bV5Reserved
    #[builder(default)]
    pub reserved: u32,
}

impl V5Header {
    /// Describes a 32-bit bottom-up sRGB bitmap of `raster`'s dimensions
    ///
    /// # Errors
    ///
    /// See [`InfoHeader::for_raster`]
    pub fn for_raster(raster: &RasterBuffer) -> Result<Self, Error> {
        let info = InfoHeader::for_raster(raster, BITMAPV5HEADER_SIZE)?;
        Ok(Self::builder().info(info).build())
    }
}

impl DibHeader for V5Header {
    const SIZE: u32 = BITMAPV5HEADER_SIZE;

    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.info.write_to(w)?;
        w.write_all(&self.masks.to_bytes())?;
        w.write_all(&self.alpha_mask.to_le_bytes())?;
        w.write_all(&self.cs_type.to_le_bytes())?;
        w.write_all(&self.endpoints)?;
        for gamma in self.gamma {
            w.write_all(&gamma.to_le_bytes())?;
        }
        w.write_all(&self.intent.to_le_bytes())?;
        w.write_all(&self.profile_data.to_le_bytes())?;
        w.write_all(&self.profile_size.to_le_bytes())?;
        w.write_all(&self.reserved.to_le_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn u32_at(buf: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn info_header_is_40_bytes() {
        let raster = RasterBuffer::new(3, 2, Rgba::default()).unwrap();
        let header = InfoHeader::for_raster(&raster, BITMAPINFOHEADER_SIZE).unwrap();
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), InfoHeader::SIZE as usize);
        assert_eq!(u32_at(&buf, 0), 40);
        assert_eq!(u32_at(&buf, 4), 3);
        assert_eq!(u32_at(&buf, 8), 2);
        assert_eq!(u16::from_le_bytes([buf[12], buf[13]]), 1);
        assert_eq!(u16::from_le_bytes([buf[14], buf[15]]), 32);
        assert_eq!(u32_at(&buf, 16), BI_BITFIELDS);
        assert_eq!(u32_at(&buf, 20), 24);
        assert!(buf[24..].iter().all(|&b| b == 0));
    }

    #[test]
    fn v5_header_is_124_bytes() {
        let raster = RasterBuffer::new(1, 1, Rgba::default()).unwrap();
        let header = V5Header::for_raster(&raster).unwrap();
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), V5Header::SIZE as usize);
        assert_eq!(u32_at(&buf, 0), 124);
        assert_eq!(u32_at(&buf, 32), 0, "colors used");
        assert_eq!(u32_at(&buf, 40), Rgba::R_MASK);
        assert_eq!(u32_at(&buf, 44), Rgba::G_MASK);
        assert_eq!(u32_at(&buf, 48), Rgba::B_MASK);
        assert_eq!(u32_at(&buf, 52), 0, "alpha mask");
        assert_eq!(u32_at(&buf, 56), LCS_SRGB);
        assert_eq!(u32_at(&buf, 108), LCS_GM_IMAGES);
        assert!(buf[112..].iter().all(|&b| b == 0));
    }

    #[test]
    fn srgb_tag_spells_srgb() {
        assert_eq!(&LCS_SRGB.to_be_bytes(), b"sRGB");
    }
}
