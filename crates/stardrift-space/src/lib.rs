//! The space scene: procedural star catalog and its GPU renderer.

pub mod star_renderer;
pub mod starfield;

pub use star_renderer::{STAR_SIZE_TO_PIXELS, StarInstance, StarfieldRenderer};
pub use starfield::{STAR_FIELD_HALF_EXTENT, STAR_PALETTE, Star, StarfieldGenerator};
