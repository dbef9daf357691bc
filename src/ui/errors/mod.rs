// Tue Jan 20 2026 - Alex

pub mod display;

pub use display::ErrorDisplay;
