pub mod models;
pub mod placement;

pub use models::*;
pub use placement::{InvalidPlacement, Placement, VALID_PLACEMENTS};
