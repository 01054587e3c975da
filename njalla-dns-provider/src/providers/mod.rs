//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod njalla;

pub use njalla::{NjallaProvider, NjallaProviderBuilder};
