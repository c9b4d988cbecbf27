pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;
pub mod logging;
pub mod visual;

pub use error::VisualError;
