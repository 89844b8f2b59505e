pub mod shuffler;
pub mod timing;
