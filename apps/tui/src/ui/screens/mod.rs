pub mod help;
pub mod status;
pub mod story;
