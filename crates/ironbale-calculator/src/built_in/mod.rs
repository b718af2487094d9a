//! Built-in estimators offered on the equipment pages.

// Baling estimators
pub mod bale_density;
pub mod baler_sizing;

// Shredding estimators
pub mod shredder_power;

// Plant-level estimators
pub mod roi;
pub mod throughput_capacity;
