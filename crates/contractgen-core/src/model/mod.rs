//! Contract and property models.
//!
//! Models are built once from schema declarations, classified and validated,
//! and never mutated afterwards.

mod category;
mod contract;
mod property;

pub use category::*;
pub use contract::*;
pub use property::*;
