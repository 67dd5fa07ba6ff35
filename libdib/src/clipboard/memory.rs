use tracing::debug;

use crate::{
    clipboard::{ClipboardSink, FormatId},
    Error,
};

/// A clipboard that lives in memory
///
/// Useful for tests and for embedding the encoder where no host clipboard exists.
#[derive(Debug, Default)]
pub struct MemorySink {
    held: bool,
    entries: Vec<(FormatId, Vec<u8>)>,
}

impl MemorySink {
    /// Returns whether a session currently holds this sink
    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.held
    }

    /// Returns the data published under `format`
    #[must_use]
    pub fn get(&self, format: FormatId) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, data)| data.as_slice())
    }

    /// Returns the published formats in publication order
    #[must_use]
    pub fn formats(&self) -> Vec<FormatId> {
        self.entries.iter().map(|(f, _)| *f).collect()
    }
}

impl ClipboardSink for MemorySink {
    fn acquire(&mut self) -> Result<(), Error> {
        if self.held {
            return Err(Error::SinkUnavailable("clipboard is already open".into()));
        }
        self.held = true;
        Ok(())
    }

    fn release(&mut self) {
        self.held = false;
    }

    fn clear(&mut self) -> Result<(), Error> {
        debug!("Clearing {} entries", self.entries.len());
        self.entries.clear();
        Ok(())
    }

    fn publish(&mut self, format: FormatId, data: Vec<u8>) -> Result<(), Error> {
        if !self.held {
            return Err(Error::SinkUnavailable("clipboard is not open".into()));
        }
        self.entries.retain(|(f, _)| *f != format);
        self.entries
            .try_reserve(1)
            .map_err(|_| Error::AllocationFailure {
                requested: data.len(),
            })?;
        self.entries.push((format, data));
        Ok(())
    }
}
