pub mod api;
pub mod cli;
pub mod commands;
pub mod context;
mod services;

pub use context::{AppContext, Services};
