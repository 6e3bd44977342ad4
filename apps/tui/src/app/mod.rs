// Application state and input routing for the terminal front end.

pub mod input;
pub mod state;

pub use input::{handle_key, handle_mouse};
pub use state::{App, LoadState};
