pub mod error;
pub mod geometry;
pub mod math;
pub mod panel;
pub mod partition;

pub use error::{PanelisError, Result};
