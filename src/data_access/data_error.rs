use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("redb: {0}")]
    Redb(String),
    #[error("encode: {0}")]
    Encode(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("a user named {0:?} already exists")]
    DuplicateUsername(String),
    #[error("password hashing: {0}")]
    PasswordHash(String),
}

// redb 2.x has many error types. Blanket them all into DataError::Redb.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for DataError {
            fn from(e: $t) -> Self { DataError::Redb(e.to_string()) }
        })*
    };
}

from_redb!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);

impl From<argon2::password_hash::Error> for DataError {
    fn from(e: argon2::password_hash::Error) -> Self {
        DataError::PasswordHash(e.to_string())
    }
}
