pub mod animator;
pub mod blend;
pub mod layer;
pub mod mixer;
