pub mod errors;
pub mod hierarchy;
pub mod profile;
pub mod ranks;
pub mod rounding;
pub mod scores;
