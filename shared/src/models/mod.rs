//! Domain models for the weather classification service

mod advisory;
mod category;
mod features;
mod prediction;

pub use advisory::*;
pub use category::*;
pub use features::*;
pub use prediction::*;
