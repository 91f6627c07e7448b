// Compositing: cover-fit the photos into the frame windows and flatten.

pub mod compositor;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod report;
pub mod surface;
