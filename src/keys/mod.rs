//! Key Store
//!
//! Owns at most one Credential Reference. The reference is persisted through
//! a [`CredentialStore`] and replaced atomically: readers always take an
//! `Arc` snapshot, so a resolution in flight sees either the old reference
//! or the new one, never a mix.
//!
//! # Layout
//!
//! - `format`: PEM header validation
//! - `material`: zeroizing signing material
//! - `persistence`: durable storage of the reference
//! - `reader`: turns a key path into raw key text
//! - `reference`: the persisted Credential Reference
//! - `store`: the in-memory state machine tying it together

pub mod format;
pub mod material;
pub mod persistence;
pub mod reader;
pub mod reference;
pub mod store;

pub use format::{validate_key_format, PRIVATE_KEY_MARKERS};
pub use material::SigningMaterial;
pub use persistence::{CredentialStore, JsonFileStore, MemoryCredentialStore, STORAGE_KEY};
pub use reader::{FsKeyReader, KeyMaterialReader, MemoryKeyReader};
pub use reference::{CredentialReference, KeyHandle};
pub use store::{KeySource, KeyStore, DEFAULT_STORAGE_TIMEOUT};
