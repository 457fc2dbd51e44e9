pub mod axial_line;
pub mod bbox;

pub use axial_line::{AxialLine, ShadowLine};
pub use bbox::BBox;
