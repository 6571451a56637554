//! Map placement of network objects, used only by the SWMM GUI

use serde::{Deserialize, Serialize};

use super::keyword::{keyword_enum, validate_name};
use super::meteo::Raingage;
use super::section::{SectionBlock, TableRecord, Validate};
use super::topology::{Area, Link, Node};
use crate::error::{Result, SwmmingError};

keyword_enum! {
    /// Distance units of the map
    pub enum MapUnits {
        /// Feet
        Feet => "FEET",
        /// Meters
        Meters => "METERS",
        /// Decimal degrees
        Degrees => "DEGREES",
        /// Unitless
        None => "NONE",
    }
}

impl Default for MapUnits {
    fn default() -> Self {
        Self::None
    }
}

/// Extent and distance units of the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    /// Lower-left X, lower-left Y, upper-right X, upper-right Y
    pub dimensions: [f64; 4],
    /// Distance units
    #[serde(default)]
    pub units: MapUnits,
}

impl Map {
    /// Create a map from its lower-left and upper-right corners
    pub fn new(dimensions: [f64; 4], units: MapUnits) -> Self {
        Self { dimensions, units }
    }
}

impl Validate for Map {
    fn validate(&self) -> Result<()> {
        let [x1, y1, x2, y2] = self.dimensions;
        if self.dimensions.iter().any(|d| !d.is_finite()) || x2 < x1 || y2 < y1 {
            return Err(SwmmingError::validation(format!(
                "map dimensions {:?} do not describe a lower-left and an upper-right corner",
                self.dimensions
            )));
        }
        Ok(())
    }
}

impl SectionBlock for Map {
    const SECTION: &'static str = "[MAP]";

    fn to_inp(&self) -> String {
        let dims: Vec<String> = self.dimensions.iter().map(|d| format!("{:.2}", d)).collect();
        format!(
            "[MAP]\nDIMENSIONS {}\nUNITS     {}\n",
            dims.join(" "),
            self.units
        )
    }
}

fn point_row(name: &str, x: f64, y: f64) -> String {
    format!("{:<16} {:<18.3} {:<18.3}", name, x, y)
}

fn check_point(kind: &str, name: &str, x: f64, y: f64) -> Result<()> {
    validate_name(kind, name)?;
    if !x.is_finite() || !y.is_finite() {
        return Err(SwmmingError::invalid_value(
            "coordinate",
            format!("({}, {}) for '{}'", x, y, name),
        ));
    }
    Ok(())
}

/// Map position of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Node name
    pub node: String,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Coordinate {
    /// Place `node` at `(x, y)`
    pub fn new(node: &impl Node, x: f64, y: f64) -> Self {
        Self {
            node: node.name().to_string(),
            x,
            y,
        }
    }
}

impl Validate for Coordinate {
    fn validate(&self) -> Result<()> {
        check_point("Node", &self.node, self.x, self.y)
    }
}

impl TableRecord for Coordinate {
    const HEADER: &'static str = "[COORDINATES]\n\
        ;;Node           X-Coord            Y-Coord           \n\
        ;;-------------- ------------------ ------------------\n";

    fn to_inp(&self) -> String {
        point_row(&self.node, self.x, self.y)
    }
}

/// Interior vertex of a curved link, listed from inlet to outlet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkVertex {
    /// Link name
    pub link: String,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl LinkVertex {
    /// Add a vertex at `(x, y)` to `link`
    pub fn new(link: &impl Link, x: f64, y: f64) -> Self {
        Self {
            link: link.name().to_string(),
            x,
            y,
        }
    }
}

impl Validate for LinkVertex {
    fn validate(&self) -> Result<()> {
        check_point("Link", &self.link, self.x, self.y)
    }
}

impl TableRecord for LinkVertex {
    const HEADER: &'static str = "[VERTICES]\n\
        ;;Link           X-Coord            Y-Coord           \n\
        ;;-------------- ------------------ ------------------\n";

    fn to_inp(&self) -> String {
        point_row(&self.link, self.x, self.y)
    }
}

/// Vertex of a subcatchment boundary polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonVertex {
    /// Subcatchment name
    pub subcatchment: String,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl PolygonVertex {
    /// Add a boundary vertex at `(x, y)` to `subcatchment`
    pub fn new(subcatchment: &impl Area, x: f64, y: f64) -> Self {
        Self {
            subcatchment: subcatchment.name().to_string(),
            x,
            y,
        }
    }
}

impl Validate for PolygonVertex {
    fn validate(&self) -> Result<()> {
        check_point("Subcatchment", &self.subcatchment, self.x, self.y)
    }
}

impl TableRecord for PolygonVertex {
    const HEADER: &'static str = "[POLYGONS]\n\
        ;;Subcatchment   X-Coord            Y-Coord           \n\
        ;;-------------- ------------------ ------------------\n";

    fn to_inp(&self) -> String {
        point_row(&self.subcatchment, self.x, self.y)
    }
}

/// Map position of a rain gage symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolPoint {
    /// Rain gage name
    pub gage: String,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl SymbolPoint {
    /// Place the symbol of `gage` at `(x, y)`
    pub fn new(gage: &Raingage, x: f64, y: f64) -> Self {
        Self {
            gage: gage.name.clone(),
            x,
            y,
        }
    }
}

impl Validate for SymbolPoint {
    fn validate(&self) -> Result<()> {
        check_point("Raingage", &self.gage, self.x, self.y)
    }
}

impl TableRecord for SymbolPoint {
    const HEADER: &'static str = "[SYMBOLS]\n\
        ;;Rain Gage      X-Coord            Y-Coord           \n\
        ;;-------------- ------------------ ------------------\n";

    fn to_inp(&self) -> String {
        point_row(&self.gage, self.x, self.y)
    }
}
