//! Key/value storage contracts, adapters, and the best-effort accessor.

pub mod accessor;
pub mod area;
pub mod error;
pub mod failing;
