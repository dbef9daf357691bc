// Tue Jan 20 2026 - Alex

pub mod cli;
pub mod errors;

pub use cli::{Args, CommandHandler};
pub use errors::ErrorDisplay;
