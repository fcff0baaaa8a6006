//! A single persisted value with hydration tracking

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KeyValueStore, read_json, write_json};

/// A value mirrored to one store key.
///
/// Starts at its default. [`hydrate`](Self::hydrate) loads the stored value once;
/// until then [`effective`](Self::effective) reports the default so callers never
/// show a value that is about to be replaced. Writes only happen after hydration.
#[derive(Debug, Clone)]
pub struct Persistent<T> {
    key: String,
    default: T,
    value: T,
    hydrated: bool,
    dirty: bool,
}

impl<T> Persistent<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    pub fn new(key: impl Into<String>, default: T) -> Self {
        Self {
            key: key.into(),
            value: default.clone(),
            default,
            hydrated: false,
            dirty: false,
        }
    }

    /// In-memory value, possibly not yet hydrated
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The value callers should display: the default until hydrated
    pub fn effective(&self) -> &T {
        if self.hydrated {
            &self.value
        } else {
            &self.default
        }
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Whether a write is pending
    pub fn is_dirty(&self) -> bool {
        self.hydrated && self.dirty
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.dirty = true;
    }

    /// Replace the value with a function of the previous one
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.value);
        self.set(next);
    }

    /// Load the stored value. Failures keep the current value. Always marks the
    /// value hydrated and schedules a write-back.
    pub fn hydrate<S>(&mut self, store: &S)
    where
        S: KeyValueStore + ?Sized,
    {
        if self.hydrated {
            return;
        }
        match read_json::<T, S>(store, &self.key) {
            Ok(Some(value)) => {
                log::debug!("Restored {:?}", self.key);
                self.value = value;
            }
            Ok(None) => log::debug!("Nothing stored for {:?}", self.key),
            Err(e) => log::warn!("Failed to restore {:?}: {}", self.key, e),
        }
        self.hydrated = true;
        self.dirty = true;
    }

    /// Write the value if hydrated and changed. Failures are logged and dropped.
    pub fn persist<S>(&mut self, store: &mut S)
    where
        S: KeyValueStore + ?Sized,
    {
        if !self.is_dirty() {
            return;
        }
        if let Err(e) = write_json(store, &self.key, &self.value) {
            log::warn!("Failed to persist {:?}: {}", self.key, e);
        }
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_effective_is_default_until_hydrated() {
        let store = MemoryStore::new().with_entry("k", "2.5");
        let mut value = Persistent::new("k", 1.0f32);
        value.set(2.0);
        assert_eq!(*value.value(), 2.0);
        assert_eq!(*value.effective(), 1.0);

        value.hydrate(&store);
        assert!(value.is_hydrated());
        assert_eq!(*value.effective(), 2.5);
    }

    #[test]
    fn test_no_write_before_hydration() {
        let mut store = MemoryStore::new();
        let mut value = Persistent::new("k", 1.0f32);
        value.set(2.0);
        value.persist(&mut store);
        assert!(store.is_empty());
    }

    #[test]
    fn test_hydration_writes_back() {
        let mut store = MemoryStore::new();
        let mut value = Persistent::new("k", 1.5f32);
        value.hydrate(&store);
        value.persist(&mut store);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("1.5"));
        assert!(!value.is_dirty());
    }

    #[test]
    fn test_update_uses_previous_value() {
        let mut store = MemoryStore::new();
        let mut value = Persistent::new("k", 1.0f32);
        value.hydrate(&store);
        value.update(|prev| prev + 0.5);
        value.persist(&mut store);
        assert_eq!(*value.effective(), 1.5);

        let mut reloaded = Persistent::new("k", 1.0f32);
        reloaded.hydrate(&store);
        assert_eq!(*reloaded.effective(), 1.5);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let store = MemoryStore::new().with_entry("k", "\"oops");
        let mut value = Persistent::new("k", 1.0f32);
        value.hydrate(&store);
        assert!(value.is_hydrated());
        assert_eq!(*value.effective(), 1.0);
    }

    #[test]
    fn test_read_failure_is_swallowed() {
        let store = MemoryStore::new().failing_reads();
        let mut value = Persistent::new("k", 1.0f32);
        value.hydrate(&store);
        assert!(value.is_hydrated());
        assert_eq!(*value.effective(), 1.0);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut store = MemoryStore::new().failing_writes();
        let mut value = Persistent::new("k", 1.0f32);
        value.hydrate(&store);
        value.set(2.0);
        value.persist(&mut store);
        assert_eq!(*value.effective(), 2.0);
        assert!(!value.is_dirty());
    }

    #[test]
    fn test_hydrate_only_once() {
        let mut value = Persistent::new("k", 1.0f32);
        value.hydrate(&MemoryStore::new());
        value.set(2.0);
        value.hydrate(&MemoryStore::new().with_entry("k", "2.5"));
        assert_eq!(*value.effective(), 2.0);
    }
}
