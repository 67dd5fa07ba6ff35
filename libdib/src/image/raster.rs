use crate::{color::Rgba, Error};
use tracing::debug;

/// Number of bytes a single [`Rgba`] sample occupies in a DIB pixel block
pub const BYTES_PER_PIXEL: usize = 4;

/// In-memory 32-bit raster image
///
/// Samples are stored row-major, top row first. Row/column indices are valid for
/// `0 <= y < height` and `0 <= x < width`; anything else is an [`Error::OutOfRange`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterBuffer {
    /// The width of the image
    width: usize,
    /// The height of the image
    height: usize,
    /// Image pixels
    pixels: Vec<Rgba>,
}

impl RasterBuffer {
    /// Creates a new [`RasterBuffer`] with every sample set to `fill`
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if storage for `width * height` samples
    /// cannot be obtained
    pub fn new(width: usize, height: usize, fill: Rgba) -> Result<Self, Error> {
        let mut raster = Self::default();
        raster.resize(width, height, fill)?;
        Ok(raster)
    }

    /// Replaces the whole raster with a `width * height` grid filled with `fill`
    ///
    /// The raster is left untouched if this fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if storage for `width * height` samples
    /// cannot be obtained
    pub fn resize(&mut self, width: usize, height: usize, fill: Rgba) -> Result<(), Error> {
        let area = width
            .checked_mul(height)
            .ok_or(Error::AllocationFailure {
                requested: usize::MAX,
            })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(area)
            .map_err(|_| Error::AllocationFailure {
                requested: area.saturating_mul(BYTES_PER_PIXEL),
            })?;
        pixels.resize(area, fill);
        debug!("Resized raster to {width}x{height}");

        self.width = width;
        self.height = height;
        self.pixels = pixels;
        Ok(())
    }

    /// Returns the width of the image
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the image
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of samples
    #[must_use]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns the size of the pixel block in bytes
    #[must_use]
    pub const fn byte_size(&self) -> usize {
        self.area() * BYTES_PER_PIXEL
    }

    /// Returns all samples, top row first
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    const fn out_of_range(&self, y: usize, x: usize) -> Error {
        Error::OutOfRange {
            y,
            x,
            width: self.width,
            height: self.height,
        }
    }

    fn index(&self, y: usize, x: usize) -> Result<usize, Error> {
        if y >= self.height || x >= self.width {
            return Err(self.out_of_range(y, x));
        }
        Ok(y * self.width + x)
    }

    /// Returns the sample at row `y`, column `x`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `y >= height` or `x >= width`
    pub fn at(&self, y: usize, x: usize) -> Result<&Rgba, Error> {
        let i = self.index(y, x)?;
        Ok(&self.pixels[i])
    }

    /// Returns a mutable reference to the sample at row `y`, column `x`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `y >= height` or `x >= width`
    pub fn at_mut(&mut self, y: usize, x: usize) -> Result<&mut Rgba, Error> {
        let i = self.index(y, x)?;
        Ok(&mut self.pixels[i])
    }

    /// Set the value of a specific pixel
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `y >= height` or `x >= width`
    pub fn set(&mut self, y: usize, x: usize, color: Rgba) -> Result<(), Error> {
        *self.at_mut(y, x)? = color;
        Ok(())
    }

    fn row_bounds(&self, y: usize) -> Result<(usize, usize), Error> {
        if y >= self.height {
            return Err(self.out_of_range(y, 0));
        }
        let start_index = y * self.width;
        Ok((start_index, start_index + self.width))
    }

    /// Get an entire row of the raster
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `y >= height`
    pub fn scan_line(&self, y: usize) -> Result<&[Rgba], Error> {
        let (start, end) = self.row_bounds(y)?;
        Ok(&self.pixels[start..end])
    }

    /// Get an entire row of the raster, mutably
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `y >= height`
    pub fn scan_line_mut(&mut self, y: usize) -> Result<&mut [Rgba], Error> {
        let (start, end) = self.row_bounds(y)?;
        Ok(&mut self.pixels[start..end])
    }

    /// Paints row `y` with a single color
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `y >= height`
    pub fn fill_row(&mut self, y: usize, color: Rgba) -> Result<(), Error> {
        self.scan_line_mut(y)?.fill(color);
        Ok(())
    }

    /// Iterates over the rows, bottom row first
    pub fn rows_bottom_up(&self) -> impl Iterator<Item = &[Rgba]> + '_ {
        // `max(1)` keeps `chunks_exact` happy for zero-width rasters, which have no pixels anyway
        self.pixels.chunks_exact(self.width.max(1)).rev()
    }
}

impl TryFrom<&::image::RgbaImage> for RasterBuffer {
    type Error = Error;

    fn try_from(img: &::image::RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = (
            usize::try_from(img.width())
                .map_err(|e| Error::UnsupportedImage(format!("width is too big: {e}")))?,
            usize::try_from(img.height())
                .map_err(|e| Error::UnsupportedImage(format!("height is too big: {e}")))?,
        );
        let mut raster = Self::new(width, height, Rgba::default())?;
        for (dst, src) in raster.pixels.iter_mut().zip(img.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = Rgba::rgba(r, g, b, a);
        }
        Ok(raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;

    #[test]
    fn resize_fills_every_sample() {
        let fill = NamedColor::Misty.rgba();
        let raster = RasterBuffer::new(7, 3, fill).unwrap();
        assert_eq!(raster.area(), 21);
        assert_eq!(raster.byte_size(), 84);
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                assert_eq!(*raster.at(y, x).unwrap(), fill);
            }
        }
    }

    #[test]
    fn resize_replaces_contents() {
        let mut raster = RasterBuffer::new(2, 2, NamedColor::Red.rgba()).unwrap();
        raster.resize(3, 1, NamedColor::Blue.rgba()).unwrap();
        assert_eq!((raster.width(), raster.height()), (3, 1));
        assert!(raster.pixels().iter().all(|p| *p == NamedColor::Blue.rgba()));
    }

    #[test]
    fn failed_resize_leaves_raster_untouched() {
        let mut raster = RasterBuffer::new(2, 2, NamedColor::Red.rgba()).unwrap();
        let err = raster.resize(usize::MAX, 2, NamedColor::Blue.rgba());
        assert!(matches!(err, Err(Error::AllocationFailure { .. })));
        assert_eq!((raster.width(), raster.height()), (2, 2));
        assert_eq!(raster.pixels().len(), 4);
    }

    #[test]
    fn unreservable_storage_is_an_allocation_failure() {
        assert!(matches!(
            RasterBuffer::new(usize::MAX / 4, 1, Rgba::default()),
            Err(Error::AllocationFailure { .. })
        ));

        let mut raster = RasterBuffer::new(3, 2, NamedColor::Aqua.rgba()).unwrap();
        let err = raster.resize(usize::MAX / 4, 1, Rgba::default());
        assert!(matches!(err, Err(Error::AllocationFailure { .. })));
        assert_eq!((raster.width(), raster.height()), (3, 2));
        assert!(raster.pixels().iter().all(|p| *p == NamedColor::Aqua.rgba()));
    }

    #[test]
    fn bounds_are_exclusive() {
        let mut raster = RasterBuffer::new(4, 3, Rgba::default()).unwrap();
        assert!(raster.at(2, 3).is_ok());
        assert!(matches!(
            raster.at(3, 0),
            Err(Error::OutOfRange { y: 3, x: 0, .. })
        ));
        assert!(matches!(
            raster.at(0, 4),
            Err(Error::OutOfRange { y: 0, x: 4, .. })
        ));
        assert!(raster.at_mut(3, 4).is_err());
        assert!(raster.scan_line(2).is_ok());
        assert!(raster.scan_line(3).is_err());
        assert!(raster.scan_line_mut(3).is_err());
    }

    #[test]
    fn empty_raster_rejects_everything() {
        let raster = RasterBuffer::new(0, 0, Rgba::default()).unwrap();
        assert_eq!(raster.byte_size(), 0);
        assert!(raster.at(0, 0).is_err());
        assert!(raster.scan_line(0).is_err());
        assert_eq!(raster.rows_bottom_up().count(), 0);
    }

    #[test]
    fn scan_line_views_one_row() {
        let mut raster = RasterBuffer::new(5, 4, Rgba::default()).unwrap();
        raster.fill_row(1, NamedColor::Green.rgba()).unwrap();
        raster.set(2, 4, NamedColor::Red.rgba()).unwrap();

        let row = raster.scan_line(1).unwrap();
        assert_eq!(row.len(), 5);
        assert!(row.iter().all(|p| *p == NamedColor::Green.rgba()));
        assert_eq!(*raster.at(0, 0).unwrap(), Rgba::default());
        assert_eq!(raster.scan_line(2).unwrap()[4], NamedColor::Red.rgba());
    }

    #[test]
    fn rows_bottom_up_reverses_order() {
        let mut raster = RasterBuffer::new(2, 3, Rgba::default()).unwrap();
        raster.fill_row(0, NamedColor::Red.rgba()).unwrap();
        raster.fill_row(2, NamedColor::Blue.rgba()).unwrap();
        let rows: Vec<_> = raster.rows_bottom_up().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], raster.scan_line(2).unwrap());
        assert_eq!(rows[2], raster.scan_line(0).unwrap());
    }

    #[test]
    fn converts_from_rgba_image() {
        let img = ::image::RgbaImage::from_fn(3, 2, |x, y| {
            ::image::Rgba([u8::try_from(x).unwrap(), u8::try_from(y).unwrap(), 0x80, 0xFF])
        });
        let raster = RasterBuffer::try_from(&img).unwrap();
        assert_eq!((raster.width(), raster.height()), (3, 2));
        assert_eq!(*raster.at(1, 2).unwrap(), Rgba::rgba(2, 1, 0x80, 0xFF));
    }
}
