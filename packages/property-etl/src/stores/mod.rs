//! Object store backends.
//!
//! - `MemoryObjectStore` - In-memory, for tests and dry runs
//! - `LocalObjectStore` - Directory tree on the local filesystem
//! - `S3ObjectStore` - AWS S3 bucket

pub mod local;
pub mod memory;
pub mod s3;

pub use crate::traits::store::ObjectStore;
pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;
