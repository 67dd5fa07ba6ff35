use std::io::{self, Write};
use tracing::{debug, instrument, trace};

use crate::{
    image::{
        header::{DibHeader, InfoHeader, V5Header, BITMAPINFOHEADER_SIZE},
        masks::{write_channel_masks, CHANNEL_MASKS_SIZE},
        raster::RasterBuffer,
    },
    Error,
};

/// Writes the pixel block: rows bottom-up, each sample as `[b, g, r, a]`
pub(crate) fn write_image_data(w: &mut impl Write, raster: &RasterBuffer) -> io::Result<()> {
    for (i, row) in raster.rows_bottom_up().enumerate() {
        trace!("writing row {}", raster.height() - 1 - i);
        for pixel in row {
            w.write_all(&pixel.to_bytes())?;
        }
    }
    Ok(())
}

/// Reserves the whole output up front so an encode either completes or fails before writing
fn allocate(header_size: u32, include_palette: bool, pixel_bytes: usize) -> Result<Vec<u8>, Error> {
    let palette_size = if include_palette { CHANNEL_MASKS_SIZE } else { 0 };
    let requested = (header_size as usize)
        .checked_add(palette_size)
        .and_then(|n| n.checked_add(pixel_bytes))
        .ok_or(Error::AllocationFailure {
            requested: usize::MAX,
        })?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(requested)
        .map_err(|_| Error::AllocationFailure { requested })?;
    debug!("Reserved {requested} bytes for DIB");
    Ok(buf)
}

/// Encodes `raster` as a `CF_DIB` bitmap
///
/// Layout: 40-byte `BITMAPINFOHEADER`, the 12-byte channel mask block, then the
/// pixel rows bottom-up. The mask block is always present since `BI_BITFIELDS`
/// requires it with this header.
///
/// # Errors
///
/// - [`Error::DimensionOverflow`] if the raster cannot be described by the header
/// - [`Error::AllocationFailure`] if the output buffer cannot be reserved
#[instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
pub fn encode_legacy(raster: &RasterBuffer) -> Result<Vec<u8>, Error> {
    let header = InfoHeader::for_raster(raster, BITMAPINFOHEADER_SIZE)?;
    let mut buf = allocate(InfoHeader::SIZE, true, raster.byte_size())?;

    header.write_to(&mut buf)?;
    write_channel_masks(&mut buf)?;
    write_image_data(&mut buf, raster)?;

    debug!("Encoded legacy DIB of {} bytes", buf.len());
    Ok(buf)
}

/// Encodes `raster` as a `CF_DIBV5` bitmap
///
/// Layout: 124-byte `BITMAPV5HEADER` (which carries the channel masks itself),
/// the 12-byte channel mask block only if `include_palette` is set, then the pixel
/// rows bottom-up.
///
/// # Errors
///
/// - [`Error::DimensionOverflow`] if the raster cannot be described by the header
/// - [`Error::AllocationFailure`] if the output buffer cannot be reserved
#[instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
pub fn encode_extended(raster: &RasterBuffer, include_palette: bool) -> Result<Vec<u8>, Error> {
    let header = V5Header::for_raster(raster)?;
    let mut buf = allocate(V5Header::SIZE, include_palette, raster.byte_size())?;

    header.write_to(&mut buf)?;
    if include_palette {
        write_channel_masks(&mut buf)?;
    }
    write_image_data(&mut buf, raster)?;

    debug!("Encoded V5 DIB of {} bytes", buf.len());
    Ok(buf)
}
