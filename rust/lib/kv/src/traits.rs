use crate::error::KVError;

/// KVStore is the durable key-value storage the portfolio client persists
/// into. It stands in for the browser's origin-scoped local storage: string
/// keys, opaque byte values, atomic per key.
///
/// Keys are short logical names such as `portfolioProfile` or `authToken`.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. No-op if the key does not exist.
    fn delete(&self, key: &str) -> Result<(), KVError>;

    /// Set several keys in one atomic write: either all land or none do.
    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError>;

    /// Get a value and interpret it as UTF-8.
    fn get_string(&self, key: &str) -> Result<Option<String>, KVError> {
        match self.get(key)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| KVError::Serialization(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }
}
