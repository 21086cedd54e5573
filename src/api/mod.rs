pub mod analyze;
pub mod catalogue;
pub mod search;
