pub mod bounds;
pub mod device;
pub mod map;
