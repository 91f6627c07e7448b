// Frame template: one-time load of the decorative overlay.

pub mod error;
pub mod loader;
