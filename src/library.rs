//! Track catalog: the fixed, ordered list of playable tracks.
//!
//! The catalog is built once at startup, either from an explicit list of file
//! names (`library.tracks`) or by scanning the music directory.

mod display;
mod model;
mod scan;

pub use display::display_name;
pub use model::*;
pub use scan::{from_names, load_catalog, scan};

#[cfg(test)]
mod tests;
