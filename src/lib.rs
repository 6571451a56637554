//! swmming - Assemble SWMM input files
//!
//! swmming builds EPA SWMM 5.2 `.inp` files from typed, validated records.
//! Every section of the input file is a Rust type that knows how to check
//! itself and how to render its rows in SWMM's fixed-width text format.
//!
//! # Features
//!
//! - **Typed**: keyword enums instead of free-form strings
//! - **Checked**: record validation plus cross-reference analysis
//! - **Scriptable**: projects described in TOML or JSON
//! - **Geospatial**: GeoJSON import behind the `gis` feature
//!
//! # Quick Start
//!
//! ```bash
//! # Write a starter project description
//! swmming template --project -o project.toml
//!
//! # Look for broken references
//! swmming analyze project.toml
//!
//! # Assemble every project below models/
//! swmming assemble models/ -o build/
//! ```
//!
//! # Library use
//!
//! ```
//! use swmming::models::{Conduit, Junction, Outfall, Shape, XSection};
//! use swmming::{InpAssembler, Project};
//!
//! let j1 = Junction::new("j1", 10.0);
//! let out1 = Outfall::new("out1", 9.0);
//! let c1 = Conduit::new("c1", &j1, &out1, 100.0, 0.013);
//!
//! let project = Project {
//!     xsections: vec![XSection::new(&c1, Shape::Circular { diameter: 1.0 })],
//!     junctions: vec![j1],
//!     outfalls: vec![out1],
//!     conduits: vec![c1],
//!     ..Project::default()
//! };
//!
//! let inp = InpAssembler::new(&project).to_string()?;
//! assert!(inp.starts_with("[TITLE]"));
//! assert!(inp.contains("[XSECTIONS]"));
//! # Ok::<(), swmming::SwmmingError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod assembler;
pub mod cli;
pub mod config;
pub mod error;
#[cfg(feature = "gis")]
pub mod gis;
pub mod models;
pub mod project;

#[cfg(test)]
mod fixtures;

use std::path::Path;

// Re-export commonly used types
pub use analyzer::{AnalysisReport, ProjectAnalyzer};
pub use assembler::{assemble_inp, InpAssembler};
pub use error::{Result, SwmmingError};
pub use project::Project;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Assemble a project description file into `.inp` text
///
/// Records are validated; cross references are not analyzed.
pub fn assemble(input: &Path) -> Result<String> {
    let project = Project::load(input)?;
    InpAssembler::new(&project).to_string()
}

/// Assemble a project description file and write it atomically to `output`
///
/// Returns the hex SHA-256 digest of the written file.
pub fn assemble_file(input: &Path, output: &Path) -> Result<String> {
    let project = Project::load(input)?;
    InpAssembler::new(&project).write_file(output)
}

/// Analyze a project description file
pub fn analyze(input: &Path) -> Result<AnalysisReport> {
    let project = Project::load(input)?;
    ProjectAnalyzer::new(&project).analyze()
}
