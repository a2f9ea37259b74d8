pub mod rest;
pub mod state;

pub use rest::{configure, RestApi};
pub use state::{AppState, ServerConfig};
