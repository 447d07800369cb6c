use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO Error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("Error decoding store: {source}")]
    Format {
        #[from]
        source: serde_lexpr::Error,
    },
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Username '{username}' is already registered")]
    Duplicate { username: String },

    #[error("Invalid username or password")]
    BadCredentials,
}
