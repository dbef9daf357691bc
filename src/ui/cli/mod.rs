// Tue Jan 20 2026 - Alex

pub mod args;
pub mod handler;

pub use args::{Args, Command, DumpArgs, ReadArgs};
pub use handler::CommandHandler;
