//! Project description: every section of an input file in one document
//!
//! A project is read from TOML or JSON and holds one field per section.
//! Missing sections default to empty, so a project file only needs the
//! sections it actually uses.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SwmmingError};
use crate::models::*;

/// Every section of a SWMM model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// `[TITLE]`
    pub title: Title,
    /// `[OPTIONS]`
    pub options: Options,
    /// `[EVAPORATION]`
    pub evaporation: Option<Evaporation>,
    /// `[TEMPERATURE]`
    pub temperature: Option<Temperature>,
    /// `[RAINGAGES]`
    pub raingages: Vec<Raingage>,
    /// `[SUBCATCHMENTS]`
    pub subcatchments: Vec<Subcatchment>,
    /// `[SUBAREAS]`
    pub subareas: Vec<Subarea>,
    /// `[INFILTRATION]`
    pub infiltration: Vec<Infiltration>,
    /// `[JUNCTIONS]`
    pub junctions: Vec<Junction>,
    /// `[OUTFALLS]`
    pub outfalls: Vec<Outfall>,
    /// `[DIVIDERS]`
    pub dividers: Vec<Divider>,
    /// `[CONDUITS]`
    pub conduits: Vec<Conduit>,
    /// `[PUMPS]`
    pub pumps: Vec<Pump>,
    /// `[ORIFICES]`
    pub orifices: Vec<Orifice>,
    /// `[WEIRS]`
    pub weirs: Vec<Weir>,
    /// `[OUTLETS]`
    pub outlets: Vec<Outlet>,
    /// `[XSECTIONS]`
    pub xsections: Vec<XSection>,
    /// `[TRANSECTS]`
    pub transects: Vec<Transect>,
    /// `[STREETS]`
    pub streets: Vec<Street>,
    /// `[INLETS]`
    pub inlets: Vec<Inlet>,
    /// `[INLET_USAGE]`
    pub inlet_usages: Vec<InletUsage>,
    /// `[CURVES]`
    pub curves: Vec<Curve>,
    /// `[TIMESERIES]`
    pub timeseries: Vec<Timeseries>,
    /// `[PATTERNS]`
    pub patterns: Vec<Pattern>,
    /// `[REPORT]`
    pub report: Option<Report>,
    /// `[MAP]`
    pub map: Option<Map>,
    /// `[COORDINATES]`
    pub coordinates: Vec<Coordinate>,
    /// `[VERTICES]`
    pub vertices: Vec<LinkVertex>,
    /// `[POLYGONS]`
    pub polygons: Vec<PolygonVertex>,
    /// `[SYMBOLS]`
    pub symbols: Vec<SymbolPoint>,
}

/// Number of records in one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCount {
    /// Section name, without brackets
    pub section: String,
    /// Number of records
    pub count: usize,
}

impl Project {
    /// Create an empty project with default title and options
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a project description, picking the format from the extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SwmmingError::file_not_found(path));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let content = fs::read_to_string(path)?;

        let project = match extension.as_str() {
            "toml" => Self::from_toml(&content)?,
            "json" => Self::from_json(&content)?,
            _ => {
                return Err(SwmmingError::UnsupportedFormat(format!(
                    "{} (expected a .toml or .json project)",
                    path.display()
                )))
            }
        };

        debug!("Loaded project {} from {}", project.title.header, path.display());
        Ok(project)
    }

    /// Parse a TOML project description
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON project description
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Render the project description as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SwmmingError::Other(e.to_string()))
    }

    /// Run every record's own validation, stopping at the first failure
    ///
    /// Cross references between records are checked by
    /// [`crate::analyzer::ProjectAnalyzer`].
    pub fn validate(&self) -> Result<()> {
        self.title.validate()?;
        self.options.validate()?;
        if let Some(evaporation) = &self.evaporation {
            evaporation.validate()?;
        }
        if let Some(temperature) = &self.temperature {
            temperature.validate()?;
        }
        validate_all(&self.raingages)?;
        validate_all(&self.subcatchments)?;
        validate_all(&self.subareas)?;
        validate_all(&self.infiltration)?;
        validate_all(&self.junctions)?;
        validate_all(&self.outfalls)?;
        validate_all(&self.dividers)?;
        validate_all(&self.conduits)?;
        validate_all(&self.pumps)?;
        validate_all(&self.orifices)?;
        validate_all(&self.weirs)?;
        validate_all(&self.outlets)?;
        validate_all(&self.xsections)?;
        validate_all(&self.transects)?;
        validate_all(&self.streets)?;
        validate_all(&self.inlets)?;
        validate_all(&self.inlet_usages)?;
        validate_all(&self.curves)?;
        validate_all(&self.timeseries)?;
        validate_all(&self.patterns)?;
        if let Some(report) = &self.report {
            report.validate()?;
        }
        if let Some(map) = &self.map {
            map.validate()?;
        }
        validate_all(&self.coordinates)?;
        validate_all(&self.vertices)?;
        validate_all(&self.polygons)?;
        validate_all(&self.symbols)
    }

    /// Record counts of the non-empty sections, in file order
    pub fn summary(&self) -> Vec<SectionCount> {
        let counts = [
            ("EVAPORATION", usize::from(self.evaporation.is_some())),
            ("TEMPERATURE", usize::from(self.temperature.is_some())),
            ("RAINGAGES", self.raingages.len()),
            ("SUBCATCHMENTS", self.subcatchments.len()),
            ("SUBAREAS", self.subareas.len()),
            ("INFILTRATION", self.infiltration.len()),
            ("JUNCTIONS", self.junctions.len()),
            ("OUTFALLS", self.outfalls.len()),
            ("DIVIDERS", self.dividers.len()),
            ("CONDUITS", self.conduits.len()),
            ("PUMPS", self.pumps.len()),
            ("ORIFICES", self.orifices.len()),
            ("WEIRS", self.weirs.len()),
            ("OUTLETS", self.outlets.len()),
            ("XSECTIONS", self.xsections.len()),
            ("TRANSECTS", self.transects.len()),
            ("TIMESERIES", self.timeseries.len()),
            ("CURVES", self.curves.len()),
            ("PATTERNS", self.patterns.len()),
            ("STREETS", self.streets.len()),
            ("INLETS", self.inlets.len()),
            ("INLET_USAGE", self.inlet_usages.len()),
            ("MAP", usize::from(self.map.is_some())),
            ("COORDINATES", self.coordinates.len()),
            ("VERTICES", self.vertices.len()),
            ("POLYGONS", self.polygons.len()),
            ("SYMBOLS", self.symbols.len()),
            ("REPORT", usize::from(self.report.is_some())),
        ];

        counts
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(section, count)| SectionCount {
                section: section.to_string(),
                count,
            })
            .collect()
    }

    /// Number of nodes of every kind
    pub fn node_count(&self) -> usize {
        self.junctions.len() + self.outfalls.len() + self.dividers.len()
    }

    /// Number of links of every kind
    pub fn link_count(&self) -> usize {
        self.conduits.len()
            + self.pumps.len()
            + self.orifices.len()
            + self.weirs.len()
            + self.outlets.len()
    }

    /// Every node as a trait object, in section order
    pub fn nodes(&self) -> Vec<&dyn Node> {
        let mut nodes: Vec<&dyn Node> = Vec::with_capacity(self.node_count());
        nodes.extend(self.junctions.iter().map(|n| n as &dyn Node));
        nodes.extend(self.outfalls.iter().map(|n| n as &dyn Node));
        nodes.extend(self.dividers.iter().map(|n| n as &dyn Node));
        nodes
    }

    /// Every link as a trait object, in section order
    pub fn links(&self) -> Vec<&dyn Link> {
        let mut links: Vec<&dyn Link> = Vec::with_capacity(self.link_count());
        links.extend(self.conduits.iter().map(|l| l as &dyn Link));
        links.extend(self.pumps.iter().map(|l| l as &dyn Link));
        links.extend(self.orifices.iter().map(|l| l as &dyn Link));
        links.extend(self.weirs.iter().map(|l| l as &dyn Link));
        links.extend(self.outlets.iter().map(|l| l as &dyn Link));
        links
    }
}
