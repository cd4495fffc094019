use std::sync::Mutex;

use super::{DEFAULT_CAPACITY, HistoryEntry, HistoryError, Ledger, push_front};

/// In-memory ledger, lost when the process exits.
#[derive(Debug)]
pub struct MemoryLedger {
    entries: Mutex<Vec<HistoryEntry>>,
    capacity: usize,
}

impl MemoryLedger {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Ledger for MemoryLedger {
    fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.entries.lock().map_err(|_| HistoryError::Poisoned)?;
        push_front(&mut entries, entry, self.capacity);
        Ok(())
    }

    fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let entries = self.entries.lock().map_err(|_| HistoryError::Poisoned)?;
        Ok(entries.clone())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        self.entries
            .lock()
            .map_err(|_| HistoryError::Poisoned)?
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::solve::Method;

    fn entry(root: f64) -> HistoryEntry {
        HistoryEntry::now("x - r", Method::Bisection, root)
    }

    #[test]
    fn newest_first_and_bounded() {
        let ledger = MemoryLedger::new(3);
        for i in 0..5 {
            ledger.append(entry(f64::from(i))).expect("append");
        }

        let roots: Vec<f64> = ledger
            .list()
            .expect("list")
            .iter()
            .map(|e| e.root)
            .collect();
        assert_eq!(roots, vec![4.0, 3.0, 2.0]);
    }

    #[test]
    fn clear_empties_the_log() {
        let ledger = MemoryLedger::default();
        ledger.append(entry(1.0)).expect("append");
        ledger.clear().expect("clear");

        assert!(ledger.list().expect("list").is_empty());
    }
}
