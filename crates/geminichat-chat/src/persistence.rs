use geminichat_types::{Exchange, History, PersistenceError, STORAGE_KEY};

use crate::store::KeyValueStore;

/// Reads and writes the history as one JSON array under a fixed key.
///
/// Every write replaces the stored value. There is no merge and no version
/// field, so two writers racing on the same store lose updates.
pub struct HistoryStore {
    store: Box<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Stored history, oldest first. Absent or unreadable values load as empty.
    pub fn load(&self) -> Result<History, PersistenceError> {
        let Some(raw) = self.store.get(STORAGE_KEY)? else {
            return Ok(History::new());
        };

        match serde_json::from_str::<Option<History>>(&raw) {
            Ok(history) => Ok(history.unwrap_or_default()),
            Err(e) => {
                log::warn!("Stored value under '{}' is not a history: {}", STORAGE_KEY, e);
                Ok(History::new())
            }
        }
    }

    pub fn save(&mut self, history: &[Exchange]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(history)?;
        self.store.set(STORAGE_KEY, &json)
    }

    /// Read the stored list, push `exchange`, write it all back.
    /// Returns the number of stored entries afterwards.
    pub fn append(&mut self, exchange: Exchange) -> Result<usize, PersistenceError> {
        let mut history = self.load()?;
        history.push(exchange);
        self.save(&history)?;
        Ok(history.len())
    }
}
