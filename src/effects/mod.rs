pub mod effect;
pub mod monochrome;
pub mod pulse;
pub mod ramp;
