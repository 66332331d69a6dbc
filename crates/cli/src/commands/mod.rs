pub mod goals;
pub mod merge;
