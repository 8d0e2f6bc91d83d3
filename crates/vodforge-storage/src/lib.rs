//! Object storage boundary for the VodForge transcoding engine.
//!
//! Storage is consumed as a key-addressed blob store with get/put
//! operations. The [`ObjectStore`] trait is the seam: production wires
//! in the S3-compatible [`S3Store`], tests use [`MemoryStore`].

pub mod content_type;
pub mod error;
pub mod s3;
pub mod store;

pub use content_type::content_type_for;
pub use error::{StorageError, StorageResult};
pub use s3::{S3Config, S3Store};
pub use store::{MemoryStore, ObjectStore};
