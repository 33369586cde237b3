//! Gear module for running shoes.

pub mod types;

pub use types::{Shoe, DEFAULT_MAX_DISTANCE_KM};
