//! UI-independent data model: parsing, metadata, curves, viewport and fits.

pub mod color;
pub mod curve;
pub mod fit;
pub mod metadata;
pub mod parser;
pub mod registry;
pub mod viewport;
