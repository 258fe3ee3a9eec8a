//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of client vocabulary:
//! - The network error taxonomy and result aliases
//! - Common primitive value objects (ID types)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all feature crates.

pub mod error {
    pub mod conversions;
    pub mod kind;
    pub mod network_error;
}
pub mod id;

pub use error::kind::ErrorKind;
pub use error::network_error::{NetworkError, NetworkResult, OptionExt};
