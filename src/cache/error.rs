use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// A cache name was reused with different key/value types.
    #[error("Cache '{name}' already exists with different types: expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
