mod annotation;
mod contract;
mod marker;
mod property;
mod schema;

pub use annotation::*;
pub use contract::*;
pub use marker::*;
pub use property::*;
pub use schema::*;
