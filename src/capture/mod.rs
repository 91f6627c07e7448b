// Capture domain: camera access and photo encoding.

pub mod countdown;
pub mod device;
pub mod dummy;
pub mod error;
pub mod still;
pub mod types;
