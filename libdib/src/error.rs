use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Possible `libdib` errors
pub enum Error {
    /// Error returned if a row/column index falls outside of the raster
    #[error("y/x out of range: ({y}, {x}) for a raster of {width}x{height}")]
    OutOfRange {
        /// requested row
        y: usize,
        /// requested column
        x: usize,
        /// raster width
        width: usize,
        /// raster height
        height: usize,
    },
    /// Error returned if storage for a raster or an encoded buffer cannot be obtained
    #[error("cannot allocate {requested} bytes")]
    AllocationFailure {
        /// number of bytes that were requested
        requested: usize,
    },
    /// Error returned if the clipboard sink cannot be acquired or written
    #[error("clipboard unavailable: {0}")]
    SinkUnavailable(String),
    /// Error returned if the raster dimensions do not fit the DIB header fields
    #[error("raster of {width}x{height} cannot be described by a DIB header")]
    DimensionOverflow {
        /// raster width
        width: usize,
        /// raster height
        height: usize,
    },
    /// Error returned if an imported image cannot be turned into a raster
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),
    /// I/O error raised by a sink or a header writer
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}
