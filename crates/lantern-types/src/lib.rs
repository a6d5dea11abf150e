//! Foundation types and traits for the Lantern browser core.
//!
//! This crate contains the pieces shared by every Lantern crate: the error
//! enum, the 16-color text attribute model, and the backend trait
//! definitions (network transport, character display, keyed content store)
//! together with their in-memory implementations used in tests.

pub mod backend;
pub mod color;
pub mod error;
pub mod store;
