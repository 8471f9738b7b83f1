//! Domain models for the FoodLoop platform

mod listing;
mod notification;
mod organization;
mod sensor;
mod supplier;

pub use listing::*;
pub use notification::*;
pub use organization::*;
pub use sensor::*;
pub use supplier::*;
