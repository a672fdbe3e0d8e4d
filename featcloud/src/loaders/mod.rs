//! Loaders for feature files. Just opens them up and returns the points.

mod feats_loaders;
pub use feats_loaders::*;
