//! Bounded, most-recent-first log of successful solves.

mod entry;
mod error;
mod file;
mod memory;

pub use entry::{HistoryEntry, TIMESTAMP_FORMAT};
pub use error::HistoryError;
pub use file::JsonFileLedger;
pub use memory::MemoryLedger;

/// Default number of entries kept.
pub const DEFAULT_CAPACITY: usize = 30;

/// Storage for the solve history.
///
/// Implementations keep at most their capacity of entries, newest first, and
/// serialize concurrent calls so no append is lost.
pub trait Ledger: Send + Sync {
    /// Records `entry` as the newest, evicting the oldest beyond capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read or written.
    fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError>;

    /// Returns all entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read.
    fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be written.
    fn clear(&self) -> Result<(), HistoryError>;
}

/// Prepends `entry` and truncates to `capacity`.
fn push_front(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry, capacity: usize) {
    entries.insert(0, entry);
    entries.truncate(capacity);
}
