//! Data models for every section of a SWMM input file
//!
//! Records refer to each other by name. Constructors take the referenced
//! record itself so that a name can only come from an object that exists.

mod keyword;
mod section;
mod topology;

mod catchment;
mod geometry;
mod gui;
mod header;
mod links;
mod meteo;
mod nodes;
mod options;
mod shapes;
mod tabular;

pub use catchment::*;
pub use geometry::*;
pub use gui::*;
pub use header::*;
pub use keyword::*;
pub use links::*;
pub use meteo::*;
pub use nodes::*;
pub use options::*;
pub use section::*;
pub use shapes::*;
pub use tabular::*;
pub use topology::*;
