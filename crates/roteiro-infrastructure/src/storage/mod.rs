//! File storage primitives.

pub mod secret_storage;

pub use secret_storage::{OpenAiSecret, SecretConfig, SecretStorage, SecretStorageError};
