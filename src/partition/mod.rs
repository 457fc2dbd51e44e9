pub mod backbone;
pub mod lines;
pub mod neighbors;

pub use backbone::extract_backbones;
pub use lines::{
    accept_all_seeds, build_shadows, collect_hard_stops, collect_seed_lines, trim_shadows,
    BoxPartitionLines,
};
pub use neighbors::BoxNeighbors;
