//! Best-ever score record
//!
//! Stored as a decimal string so older saves stay readable.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError};

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// Storage key
    const STORAGE_KEY: &'static str = "skyhop_high_score";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Fold a finished session in. Returns true if the best improved.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load from the store; missing or malformed values read as 0
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(best) => {
                    log::info!("Loaded best score {}", best);
                    Self { best }
                }
                Err(_) => {
                    log::warn!("Ignoring malformed best score {:?}", raw);
                    Self::default()
                }
            },
            None => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        store.set(Self::STORAGE_KEY, &self.best.to_string())?;
        log::info!("Best score saved ({})", self.best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_record_takes_max() {
        let mut hs = HighScore::new(5);
        assert!(!hs.record(3));
        assert_eq!(hs.best, 5);
        assert!(hs.record(8));
        assert_eq!(hs.best, 8);
        assert!(!hs.record(8));
    }

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best, 0);
        HighScore::new(42).save(&mut store).unwrap();
        assert_eq!(HighScore::load(&store).best, 42);
    }

    #[test]
    fn test_malformed_falls_back_to_zero() {
        let mut store = MemoryStore::new();
        store.set("skyhop_high_score", "lots").unwrap();
        assert_eq!(HighScore::load(&store).best, 0);
        store.set("skyhop_high_score", "-4").unwrap();
        assert_eq!(HighScore::load(&store).best, 0);
    }
}
