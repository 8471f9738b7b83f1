//! HTTP handlers

pub mod health;
pub mod listing;
pub mod notification;
pub mod organization;
pub mod sensor;
pub mod supplier;

pub use health::*;
pub use listing::*;
pub use notification::*;
pub use organization::*;
pub use sensor::*;
pub use supplier::*;
