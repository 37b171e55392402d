//! Best score tracking
//!
//! Persisted as a decimal string under a single key, the way the browser
//! build has always stored it.

use crate::persistence::{KeyValueStore, StorageError};

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bestScore";

    pub fn new() -> Self {
        Self { value: 0 }
    }

    pub fn from_value(value: u64) -> Self {
        Self { value }
    }

    /// Decode a stored value; absent or non-numeric means no record yet
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return Self::new();
        };
        let value = raw.parse::<u64>().ok().or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(|v| v as u64)
        });
        Self {
            value: value.unwrap_or(0),
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Check if a score would set a new record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.value
    }

    /// Record a finished session's score
    /// Returns true if it beat the previous best
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        true
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        let best = Self::parse(store.get(Self::STORAGE_KEY).as_deref());
        log::info!("Loaded best score: {}", best.value);
        best
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(Self::STORAGE_KEY, &self.value.to_string())?;
        log::info!("Best score saved ({})", self.value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_parse_fallbacks() {
        assert_eq!(BestScore::parse(None).value(), 0);
        assert_eq!(BestScore::parse(Some("")).value(), 0);
        assert_eq!(BestScore::parse(Some("abc")).value(), 0);
        assert_eq!(BestScore::parse(Some("-30")).value(), 0);
        assert_eq!(BestScore::parse(Some("NaN")).value(), 0);
        assert_eq!(BestScore::parse(Some(" 120 ")).value(), 120);
        assert_eq!(BestScore::parse(Some("70.0")).value(), 70);
    }

    #[test]
    fn test_record_only_raises() {
        let mut best = BestScore::from_value(50);
        assert!(!best.record(50));
        assert!(!best.record(10));
        assert_eq!(best.value(), 50);
        assert!(best.record(60));
        assert_eq!(best.value(), 60);
    }

    #[test]
    fn test_load_and_save() {
        let mut store = MemoryStore::with_entry(BestScore::STORAGE_KEY, "90");
        let mut best = BestScore::load(&store);
        assert_eq!(best.value(), 90);

        best.record(130);
        best.save(&mut store).unwrap();
        assert_eq!(store.get(BestScore::STORAGE_KEY).as_deref(), Some("130"));
    }

    #[test]
    fn test_load_from_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(BestScore::load(&store).value(), 0);
    }
}
