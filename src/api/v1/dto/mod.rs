pub mod errors;
pub mod me;
