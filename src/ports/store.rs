//! Key-value store port for score persistence.
//!
//! This module defines the trait boundary between the game engine and the
//! durable storage the score lives in.

use crate::Result;

/// Port for a durable string key-value store scoped to one origin.
///
/// The engine only ever touches a single key, but the store itself is
/// general, mirroring origin-local storage.
///
/// # Examples
///
/// ```
/// use noughts::adapters::InMemoryKeyValueStore;
/// use noughts::ports::KeyValueStore;
///
/// fn remember<S: KeyValueStore>(store: &S) -> noughts::Result<()> {
///     store.set("greeting", "hello")
/// }
///
/// let store = InMemoryKeyValueStore::new();
/// remember(&store)?;
/// assert_eq!(store.get("greeting")?.as_deref(), Some("hello"));
/// # Ok::<(), noughts::Error>(())
/// ```
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read. A missing key
    /// is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
