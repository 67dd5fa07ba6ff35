//! Publishing encoded bitmaps to a clipboard-like sink
//!
//! A [`ClipboardSink`] is whatever ends up holding the data: the host clipboard, a
//! directory, or the in-memory [`MemorySink`]. [`Clipboard`] is a session over a sink:
//! it acquires the sink when opened and releases it when dropped, whichever way the
//! session ends.

mod memory;

pub use memory::MemorySink;

use std::fmt::Display;
use tracing::{debug, info, instrument};

use crate::{
    image::{encode, DibFormat, EncodedDib, RasterBuffer},
    Error,
};

/// A clipboard format identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatId(u32);

impl FormatId {
    /// Device independent bitmap with a `BITMAPINFOHEADER`
    pub const CF_DIB: Self = Self(8);
    /// Device independent bitmap with a `BITMAPV5HEADER`
    pub const CF_DIBV5: Self = Self(17);

    /// Wraps a raw format number
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw format number
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the symbolic name of well-known formats
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            8 => Some("CF_DIB"),
            17 => Some("CF_DIBV5"),
            _ => None,
        }
    }
}

impl Display for FormatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "CF_{}", self.0),
        }
    }
}

/// Destination of published clipboard data
///
/// Implementors only need to hold one session at a time; [`Clipboard`] takes care of
/// pairing [`ClipboardSink::acquire`] with [`ClipboardSink::release`].
pub trait ClipboardSink {
    /// Takes exclusive ownership of the sink
    ///
    /// # Errors
    ///
    /// [`Error::SinkUnavailable`] if the sink is already held or cannot be reached
    fn acquire(&mut self) -> Result<(), Error>;

    /// Gives up ownership taken by [`ClipboardSink::acquire`]
    fn release(&mut self);

    /// Drops everything previously published
    ///
    /// # Errors
    ///
    /// [`Error::SinkUnavailable`] or [`Error::Io`] if the sink cannot be emptied
    fn clear(&mut self) -> Result<(), Error>;

    /// Publishes `data` under `format`, replacing earlier data of the same format
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if the sink cannot store `data`,
    /// [`Error::SinkUnavailable`] or [`Error::Io`] if the sink cannot be written
    fn publish(&mut self, format: FormatId, data: Vec<u8>) -> Result<(), Error>;
}

/// An open clipboard session
///
/// The first write of a session clears the sink, later writes add to it. The sink is
/// released when the session is dropped.
#[derive(Debug)]
pub struct Clipboard<'a, S: ClipboardSink> {
    sink: &'a mut S,
    need_clear: bool,
}

impl<'a, S: ClipboardSink> Clipboard<'a, S> {
    /// Opens a session on `sink`
    ///
    /// # Errors
    ///
    /// [`Error::SinkUnavailable`] if the sink cannot be acquired
    pub fn open(sink: &'a mut S) -> Result<Self, Error> {
        sink.acquire()?;
        debug!("Clipboard opened");
        Ok(Self {
            sink,
            need_clear: true,
        })
    }

    fn clear_if(&mut self) -> Result<(), Error> {
        if self.need_clear {
            self.sink.clear()?;
            self.need_clear = false;
        }
        Ok(())
    }

    /// Publishes already encoded data
    ///
    /// # Errors
    ///
    /// See [`ClipboardSink::clear`] and [`ClipboardSink::publish`]
    #[instrument(skip(self, data), fields(len = data.len()))]
    pub fn copy_raw(&mut self, format: FormatId, data: Vec<u8>) -> Result<(), Error> {
        self.clear_if()?;
        self.sink.publish(format, data)?;
        info!("Published {format}");
        Ok(())
    }

    /// Encodes `raster` as `format` and publishes it
    ///
    /// Nothing reaches the sink unless encoding succeeded.
    ///
    /// # Errors
    ///
    /// Any encoding error (see [`encode`]), or any error of [`Clipboard::copy_raw`]
    pub fn copy_image(&mut self, raster: &RasterBuffer, format: DibFormat) -> Result<(), Error> {
        let EncodedDib { format, bytes } = encode(raster, format)?;
        self.copy_raw(format, bytes)
    }
}

impl<S: ClipboardSink> Drop for Clipboard<'_, S> {
    fn drop(&mut self) {
        self.sink.release();
        debug!("Clipboard closed");
    }
}
