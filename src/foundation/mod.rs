pub mod core;
pub mod error;
pub mod pixel;
pub mod signal;
