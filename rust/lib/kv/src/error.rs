use thiserror::Error;

#[derive(Error, Debug)]
pub enum KVError {
    #[error("storage error: {0}")]
    Storage(String),

    /// Another process holds the store file.
    #[error("store busy: {0}")]
    Busy(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
