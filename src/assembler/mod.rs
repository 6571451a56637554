//! Assembly of a project into a SWMM input file

mod writer;

pub use writer::*;
