pub mod booth;
pub mod error;
pub mod state;
