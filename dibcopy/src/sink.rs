use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use libdib::{
    clipboard::{ClipboardSink, FormatId},
    Error,
};
use tracing::{debug, instrument, warn};

const LOCK_FILE: &str = ".lock";
const EXTENSION: &str = "dib";
const TMP_EXTENSION: &str = "tmp";

/// A directory standing in for the host clipboard
///
/// Each published format becomes `<FORMAT>.dib` (e.g. `CF_DIBV5.dib`). A `.lock` file marks
/// the directory as held, so only one session can write at a time, even across processes.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    lock: Option<PathBuf>,
}

impl DirectorySink {
    /// Creates a sink writing into `root`; the directory is created on first acquisition
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lock: None,
        }
    }

    /// Returns the directory this sink writes into
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file `format` is published to
    pub fn path_for(&self, format: FormatId) -> PathBuf {
        self.root.join(format!("{format}.{EXTENSION}"))
    }

    fn unavailable(&self, e: &io::Error) -> Error {
        Error::SinkUnavailable(format!("{}: {e}", self.root.display()))
    }
}

impl ClipboardSink for DirectorySink {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn acquire(&mut self) -> Result<(), Error> {
        fs::create_dir_all(&self.root).map_err(|e| self.unavailable(&e))?;
        let lock = self.root.join(LOCK_FILE);
        let mut f = match File::options().write(true).create_new(true).open(&lock) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::SinkUnavailable(format!(
                    "{} is held by another session",
                    self.root.display()
                )));
            }
            Err(e) => return Err(self.unavailable(&e)),
        };
        // only informative, a stale lock has to be removed by hand
        if let Err(e) = writeln!(f, "{}", std::process::id()) {
            warn!("Unable to write pid to {}: {e}", lock.display());
        }
        debug!("Acquired {}", lock.display());
        self.lock = Some(lock);
        Ok(())
    }

    fn release(&mut self) {
        if let Some(lock) = self.lock.take() {
            match fs::remove_file(&lock) {
                Ok(()) => debug!("Released {}", lock.display()),
                Err(e) => warn!("Unable to remove {}: {e}", lock.display()),
            }
        }
    }

    fn clear(&mut self) -> Result<(), Error> {
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            // leftovers of an interrupted publish go as well
            if path
                .extension()
                .is_some_and(|ext| ext == EXTENSION || ext == TMP_EXTENSION)
            {
                debug!("Removing {}", path.display());
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    #[instrument(skip(self, data), fields(len = data.len()))]
    fn publish(&mut self, format: FormatId, data: Vec<u8>) -> Result<(), Error> {
        if self.lock.is_none() {
            return Err(Error::SinkUnavailable(format!(
                "{} is not open",
                self.root.display()
            )));
        }
        let path = self.path_for(format);
        // written aside first so a failed write never leaves a truncated bitmap behind
        let tmp = path.with_extension(TMP_EXTENSION);
        if let Err(e) = fs::write(&tmp, &data).and_then(|()| fs::rename(&tmp, &path)) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!("Unable to remove {}: {cleanup}", tmp.display());
            }
            return Err(e.into());
        }
        debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}
