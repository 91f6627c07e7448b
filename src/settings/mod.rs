// Settings: booth configuration file.

pub mod error;
pub mod store;
pub mod types;
