//! GeoJSON import of nodes, conduits and subcatchment outlines

pub mod geojson;
pub mod importer;

pub use geojson::{Feature, GeoJson, Geometry};
pub use importer::{shoelace_area, GeoImporter, ImportSummary};
