use std::{
    ffi::OsString,
    fs, io,
    path::PathBuf,
    sync::Mutex,
};

use super::{HistoryEntry, HistoryError, Ledger, push_front};

/// Ledger persisted as a JSON array in a single file.
///
/// A missing or empty file reads as an empty history. Every write goes to a
/// sibling `.tmp` file that is then renamed over the log, so an interrupted
/// write leaves the previous history intact. One mutex serializes every
/// read-modify-write within the process.
#[derive(Debug)]
pub struct JsonFileLedger {
    path: PathBuf,
    capacity: usize,
    lock: Mutex<()>,
}

impl JsonFileLedger {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
            lock: Mutex::new(()),
        }
    }

    fn read(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| HistoryError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let bytes = serde_json::to_vec_pretty(entries).map_err(|source| HistoryError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.tmp_path();
        fs::write(&tmp, bytes).map_err(|source| self.io_error(source))?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Ledger for JsonFileLedger {
    fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().map_err(|_| HistoryError::Poisoned)?;
        let mut entries = self.read()?;
        push_front(&mut entries, entry, self.capacity);
        self.write(&entries)
    }

    fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let _guard = self.lock.lock().map_err(|_| HistoryError::Poisoned)?;
        self.read()
    }

    fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().map_err(|_| HistoryError::Poisoned)?;
        self.write(&[])
    }
}
