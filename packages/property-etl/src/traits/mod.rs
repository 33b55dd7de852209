//! Infrastructure seams.
//!
//! Pipeline logic only talks to these traits, so storage, network and
//! database backends can be swapped (or mocked) without touching stages.

pub mod fetcher;
pub mod sink;
pub mod store;
