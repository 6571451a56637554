//! Network links: conduits, pumps, orifices, weirs and outlets

use serde::{Deserialize, Serialize};

use super::keyword::{keyword_enum, non_negative, positive, validate_name, YesNo};
use super::section::{TableRecord, Validate};
use super::tabular::Curve;
use super::topology::{impl_link, Node};
use crate::error::{Result, SwmmingError};

fn validate_ends(kind: &str, name: &str, from_node: &str, to_node: &str) -> Result<()> {
    validate_name(kind, name)?;
    validate_name("Node", from_node)?;
    validate_name("Node", to_node)?;
    if from_node == to_node {
        return Err(SwmmingError::validation(format!(
            "{} '{}' starts and ends at node '{}'",
            kind, name, from_node
        )));
    }
    Ok(())
}

/// A pipe or channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conduit {
    /// Conduit name
    pub name: String,
    /// Upstream node
    pub from_node: String,
    /// Downstream node
    pub to_node: String,
    /// Length (ft or m)
    pub length: f64,
    /// Manning's n
    pub roughness: f64,
    /// Upstream offset above the node invert
    #[serde(default)]
    pub in_offset: f64,
    /// Downstream offset above the node invert
    #[serde(default)]
    pub out_offset: f64,
    /// Flow at the start of the simulation
    #[serde(default)]
    pub init_flow: f64,
    /// Flow limit; unlimited when unset
    #[serde(default)]
    pub max_flow: Option<f64>,
}

impl Conduit {
    /// Create a conduit between two nodes
    pub fn new(
        name: impl Into<String>,
        from_node: &impl Node,
        to_node: &impl Node,
        length: f64,
        roughness: f64,
    ) -> Self {
        Self {
            name: name.into(),
            from_node: from_node.name().to_string(),
            to_node: to_node.name().to_string(),
            length,
            roughness,
            in_offset: 0.0,
            out_offset: 0.0,
            init_flow: 0.0,
            max_flow: None,
        }
    }
}

impl Validate for Conduit {
    fn validate(&self) -> Result<()> {
        validate_ends("Conduit", &self.name, &self.from_node, &self.to_node)?;
        positive("length", self.length)?;
        positive("roughness", self.roughness)?;
        if let Some(max_flow) = self.max_flow {
            non_negative("max_flow", max_flow)?;
        }
        Ok(())
    }
}

impl TableRecord for Conduit {
    const HEADER: &'static str = "[CONDUITS]\n\
        ;;Name           From Node        To Node          Length     Roughness  InOffset   OutOffset  InitFlow   MaxFlow   \n\
        ;;-------------- ---------------- ---------------- ---------- ---------- ---------- ---------- ---------- ----------\n";

    fn to_inp(&self) -> String {
        let max_flow = match self.max_flow {
            Some(flow) => format!("{:<10.2}", flow),
            None => " ".repeat(10),
        };
        format!(
            "{:<16} {:<16} {:<16} {:<10.2} {:<10.5} {:<10.2} {:<10.2} {:<10.2} {}",
            self.name,
            self.from_node,
            self.to_node,
            self.length,
            self.roughness,
            self.in_offset,
            self.out_offset,
            self.init_flow,
            max_flow
        )
    }
}

keyword_enum! {
    /// Pump status at the start of the simulation
    pub enum PumpStatus {
        /// Running
        On => "ON",
        /// Stopped
        Off => "OFF",
    }
}

impl Default for PumpStatus {
    fn default() -> Self {
        Self::On
    }
}

/// A pump lifting water between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pump {
    /// Pump name
    pub name: String,
    /// Inlet node
    pub from_node: String,
    /// Outlet node
    pub to_node: String,
    /// Pump curve; an ideal pump when unset
    #[serde(default)]
    pub curve: Option<String>,
    /// Status at the start of the simulation
    #[serde(default)]
    pub status: PumpStatus,
    /// Inlet depth at which the pump turns on
    #[serde(default)]
    pub startup_depth: f64,
    /// Inlet depth at which the pump shuts off
    #[serde(default)]
    pub shutoff_depth: f64,
}

impl Pump {
    /// Create a pump following `curve`, or an ideal pump without one
    pub fn new(
        name: impl Into<String>,
        from_node: &impl Node,
        to_node: &impl Node,
        curve: Option<&Curve>,
    ) -> Self {
        Self {
            name: name.into(),
            from_node: from_node.name().to_string(),
            to_node: to_node.name().to_string(),
            curve: curve.map(|c| c.name.clone()),
            status: PumpStatus::On,
            startup_depth: 0.0,
            shutoff_depth: 0.0,
        }
    }
}

impl Validate for Pump {
    fn validate(&self) -> Result<()> {
        validate_ends("Pump", &self.name, &self.from_node, &self.to_node)?;
        if let Some(curve) = &self.curve {
            validate_name("Curve", curve)?;
        }
        non_negative("startup_depth", self.startup_depth)?;
        non_negative("shutoff_depth", self.shutoff_depth)
    }
}

impl TableRecord for Pump {
    const HEADER: &'static str = "[PUMPS]\n\
        ;;Name           From Node        To Node          Pump Curve       Status Startup  Shutoff \n\
        ;;-------------- ---------------- ---------------- ---------------- ------ -------- --------\n";

    fn to_inp(&self) -> String {
        format!(
            "{:<16} {:<16} {:<16} {:<16} {:<6} {:<8.2} {:<8.2}",
            self.name,
            self.from_node,
            self.to_node,
            self.curve.as_deref().unwrap_or("*"),
            self.status,
            self.startup_depth,
            self.shutoff_depth
        )
    }
}

keyword_enum! {
    /// Orientation of an orifice
    pub enum OrificeType {
        /// In a vertical plane
        Side => "SIDE",
        /// In a horizontal plane
        Bottom => "BOTTOM",
    }
}

/// An opening in a wall or the bottom of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orifice {
    /// Orifice name
    pub name: String,
    /// Inlet node
    pub from_node: String,
    /// Outlet node
    pub to_node: String,
    /// Orientation
    pub kind: OrificeType,
    /// Height of the opening above the inlet node invert
    pub offset: f64,
    /// Discharge coefficient
    pub cd: f64,
    /// Flap gate preventing backflow
    #[serde(default)]
    pub gated: YesNo,
    /// Hours needed to fully open or close; 0 is instantaneous
    #[serde(default)]
    pub close_time: f64,
}

impl Orifice {
    /// Create an ungated orifice
    pub fn new(
        name: impl Into<String>,
        from_node: &impl Node,
        to_node: &impl Node,
        kind: OrificeType,
        offset: f64,
        cd: f64,
    ) -> Self {
        Self {
            name: name.into(),
            from_node: from_node.name().to_string(),
            to_node: to_node.name().to_string(),
            kind,
            offset,
            cd,
            gated: YesNo::No,
            close_time: 0.0,
        }
    }
}

impl Validate for Orifice {
    fn validate(&self) -> Result<()> {
        validate_ends("Orifice", &self.name, &self.from_node, &self.to_node)?;
        positive("cd", self.cd)?;
        non_negative("close_time", self.close_time)
    }
}

impl TableRecord for Orifice {
    const HEADER: &'static str = "[ORIFICES]\n\
        ;;Name           From Node        To Node          Type         Offset     Qcoeff     Gated    CloseTime \n\
        ;;-------------- ---------------- ---------------- ------------ ---------- ---------- -------- ----------\n";

    fn to_inp(&self) -> String {
        format!(
            "{:<16} {:<16} {:<16} {:<12} {:<10.3} {:<10.3} {:<8} {:<10.2}",
            self.name,
            self.from_node,
            self.to_node,
            self.kind,
            self.offset,
            self.cd,
            self.gated,
            self.close_time
        )
    }
}

keyword_enum! {
    /// Weir type; each needs a matching cross section shape
    pub enum WeirType {
        /// Rectangular opening across the flow
        Transverse => "TRANSVERSE",
        /// Rectangular opening along the flow
        Sideflow => "SIDEFLOW",
        /// Triangular opening
        VNotch => "V-NOTCH",
        /// Trapezoidal opening
        Trapezoidal => "TRAPEZOIDAL",
        /// Broad crested roadway crossing
        Roadway => "ROADWAY",
    }
}

keyword_enum! {
    /// Road surface of a roadway weir
    pub enum RoadSurface {
        /// Paved
        Paved => "PAVED",
        /// Gravel
        Gravel => "GRAVEL",
    }
}

/// Road description of a roadway weir
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadwayParams {
    /// Width of lanes and shoulders (ft or m)
    pub width: f64,
    /// Surface type
    pub surface: RoadSurface,
}

fn yes() -> YesNo {
    YesNo::Yes
}

/// A weir between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weir {
    /// Weir name
    pub name: String,
    /// Inlet node
    pub from_node: String,
    /// Outlet node
    pub to_node: String,
    /// Weir type
    pub kind: WeirType,
    /// Height of the opening above the inlet node invert
    pub crest_height: f64,
    /// Discharge coefficient
    pub cd: f64,
    /// Flap gate preventing backflow
    #[serde(default)]
    pub gated: YesNo,
    /// Number of end contractions
    #[serde(default)]
    pub end_contractions: u32,
    /// Discharge coefficient of the triangular ends; `cd` when unset
    #[serde(default)]
    pub cd2: Option<f64>,
    /// Whether the weir can surcharge
    #[serde(default = "yes")]
    pub surcharge: YesNo,
    /// Road description, required by roadway weirs
    #[serde(default)]
    pub road: Option<RoadwayParams>,
}

impl Weir {
    /// Create a weir with default coefficients
    pub fn new(
        name: impl Into<String>,
        from_node: &impl Node,
        to_node: &impl Node,
        kind: WeirType,
        crest_height: f64,
        cd: f64,
    ) -> Self {
        Self {
            name: name.into(),
            from_node: from_node.name().to_string(),
            to_node: to_node.name().to_string(),
            kind,
            crest_height,
            cd,
            gated: YesNo::No,
            end_contractions: 0,
            cd2: None,
            surcharge: YesNo::Yes,
            road: None,
        }
    }

    /// Create a roadway weir
    pub fn roadway(
        name: impl Into<String>,
        from_node: &impl Node,
        to_node: &impl Node,
        crest_height: f64,
        cd: f64,
        road: RoadwayParams,
    ) -> Self {
        Self {
            road: Some(road),
            ..Self::new(name, from_node, to_node, WeirType::Roadway, crest_height, cd)
        }
    }

    /// Cross section shape keyword the weir type requires
    pub fn required_shape(&self) -> &'static str {
        match self.kind {
            WeirType::Transverse | WeirType::Sideflow | WeirType::Roadway => "RECT_OPEN",
            WeirType::VNotch => "TRIANGULAR",
            WeirType::Trapezoidal => "TRAPEZOIDAL",
        }
    }
}

impl Validate for Weir {
    fn validate(&self) -> Result<()> {
        validate_ends("Weir", &self.name, &self.from_node, &self.to_node)?;
        non_negative("crest_height", self.crest_height)?;
        positive("cd", self.cd)?;
        if let Some(cd2) = self.cd2 {
            non_negative("cd2", cd2)?;
        }
        if self.end_contractions > 2 {
            return Err(SwmmingError::invalid_value(
                "end_contractions",
                self.end_contractions,
            ));
        }
        match (self.kind, &self.road) {
            (WeirType::Roadway, None) => Err(SwmmingError::validation(format!(
                "roadway weir '{}' needs a road width and surface",
                self.name
            ))),
            (WeirType::Roadway, Some(road)) => positive("road width", road.width),
            (_, Some(_)) => Err(SwmmingError::validation(format!(
                "only roadway weirs take road parameters, '{}' is {}",
                self.name, self.kind
            ))),
            _ => Ok(()),
        }
    }
}

impl TableRecord for Weir {
    const HEADER: &'static str = "[WEIRS]\n\
        ;;Name           From Node        To Node          Type         CrestHt    Qcoeff     Gated    EndCon   EndCoeff   Surcharge  RoadWidth  RoadSurf  \n\
        ;;-------------- ---------------- ---------------- ------------ ---------- ---------- -------- -------- ---------- ---------- ---------- ----------\n";

    fn to_inp(&self) -> String {
        let head = format!(
            "{:<16} {:<16} {:<16} {:<12} {:<10.3} {:<10.3}",
            self.name, self.from_node, self.to_node, self.kind, self.crest_height, self.cd
        );

        // Roadway weirs ignore gate, contractions, end coefficient and surcharge
        match (self.kind, &self.road) {
            (WeirType::Roadway, Some(road)) => format!(
                "{} {:<8} {:<8} {:<10.3} {:<10} {:<10.2} {:<10}",
                head,
                YesNo::No,
                0,
                0.0,
                YesNo::No,
                road.width,
                road.surface
            ),
            _ => format!(
                "{} {:<8} {:<8} {:<10.3} {:<10}",
                head,
                self.gated,
                self.end_contractions,
                self.cd2.unwrap_or(self.cd),
                self.surcharge
            ),
        }
    }
}

/// Flow relation of an outlet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutletRating {
    /// Rating curve of flow vs depth above the offset
    #[serde(rename = "TABULAR/DEPTH")]
    TabularDepth {
        /// Rating curve name
        curve: String,
    },
    /// Rating curve of flow vs head difference
    #[serde(rename = "TABULAR/HEAD")]
    TabularHead {
        /// Rating curve name
        curve: String,
    },
    /// `Q = coefficient * depth ^ exponent`
    #[serde(rename = "FUNCTIONAL/DEPTH")]
    FunctionalDepth {
        /// Coefficient
        coefficient: f64,
        /// Exponent
        exponent: f64,
    },
    /// `Q = coefficient * head ^ exponent`
    #[serde(rename = "FUNCTIONAL/HEAD")]
    FunctionalHead {
        /// Coefficient
        coefficient: f64,
        /// Exponent
        exponent: f64,
    },
}

impl OutletRating {
    /// SWMM keyword of the outlet type
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::TabularDepth { .. } => "TABULAR/DEPTH",
            Self::TabularHead { .. } => "TABULAR/HEAD",
            Self::FunctionalDepth { .. } => "FUNCTIONAL/DEPTH",
            Self::FunctionalHead { .. } => "FUNCTIONAL/HEAD",
        }
    }

    /// Rating curve name, for tabular outlets
    pub fn curve(&self) -> Option<&str> {
        match self {
            Self::TabularDepth { curve } | Self::TabularHead { curve } => Some(curve),
            _ => None,
        }
    }
}

/// A flow control device with a user-defined rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    /// Outlet name
    pub name: String,
    /// Inlet node
    pub from_node: String,
    /// Outlet node
    pub to_node: String,
    /// Height above the inlet node invert
    pub offset: f64,
    /// Flow relation
    pub rating: OutletRating,
    /// Flap gate preventing backflow
    #[serde(default)]
    pub gated: YesNo,
}

impl Outlet {
    /// Create an ungated outlet
    pub fn new(
        name: impl Into<String>,
        from_node: &impl Node,
        to_node: &impl Node,
        offset: f64,
        rating: OutletRating,
    ) -> Self {
        Self {
            name: name.into(),
            from_node: from_node.name().to_string(),
            to_node: to_node.name().to_string(),
            offset,
            rating,
            gated: YesNo::No,
        }
    }
}

impl Validate for Outlet {
    fn validate(&self) -> Result<()> {
        validate_ends("Outlet", &self.name, &self.from_node, &self.to_node)?;
        match &self.rating {
            OutletRating::TabularDepth { curve } | OutletRating::TabularHead { curve } => {
                validate_name("Curve", curve)
            }
            OutletRating::FunctionalDepth { coefficient, .. }
            | OutletRating::FunctionalHead { coefficient, .. } => {
                positive("coefficient", *coefficient)
            }
        }
    }
}

impl TableRecord for Outlet {
    const HEADER: &'static str = "[OUTLETS]\n\
        ;;Name           From Node        To Node          Offset     Type            QTable/Qcoeff    Qexpon     Gated   \n\
        ;;-------------- ---------------- ---------------- ---------- --------------- ---------------- ---------- --------\n";

    fn to_inp(&self) -> String {
        let rating = match &self.rating {
            OutletRating::TabularDepth { curve } | OutletRating::TabularHead { curve } => {
                format!("{:<16}", curve)
            }
            OutletRating::FunctionalDepth {
                coefficient,
                exponent,
            }
            | OutletRating::FunctionalHead {
                coefficient,
                exponent,
            } => format!("{:<16.3} {:<10.3}", coefficient, exponent),
        };
        format!(
            "{:<16} {:<16} {:<16} {:<10.3} {:<15} {} {:<8}",
            self.name,
            self.from_node,
            self.to_node,
            self.offset,
            self.rating.keyword(),
            rating,
            self.gated
        )
    }
}

impl_link!(Conduit, Pump, Orifice, Weir, Outlet);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::nodes::{Junction, Outfall};
    use crate::models::section::section_to_string;
    use crate::models::tabular::CurveKind;

    fn nodes() -> (Junction, Junction, Outfall) {
        (
            Junction::new("j1", 10.0),
            Junction::new("j2", 9.0),
            Outfall::new("out1", 8.0),
        )
    }

    #[test]
    fn test_conduits_section() {
        let (j1, j2, out1) = nodes();
        let c1 = Conduit::new("c1", &j1, &j2, 100.0, 0.013);
        let c2 = Conduit {
            max_flow: Some(2.5),
            ..Conduit::new("c2", &j2, &out1, 50.0, 0.015)
        };

        assert_eq!(
            section_to_string(&[c1, c2]),
            "[CONDUITS]\n\
             ;;Name           From Node        To Node          Length     Roughness  InOffset   OutOffset  InitFlow   MaxFlow   \n\
             ;;-------------- ---------------- ---------------- ---------- ---------- ---------- ---------- ---------- ----------\n\
             c1               j1               j2               100.00     0.01300    0.00       0.00       0.00                 \n\
             c2               j2               out1             50.00      0.01500    0.00       0.00       0.00       2.50      \n"
        );
    }

    #[test]
    fn test_conduit_validation() {
        let (j1, j2, _) = nodes();
        assert!(Conduit::new("c1", &j1, &j2, 100.0, 0.013).validate().is_ok());
        assert!(Conduit::new("c1", &j1, &j1, 100.0, 0.013).validate().is_err());
        assert!(Conduit::new("c1", &j1, &j2, 0.0, 0.013).validate().is_err());
        assert!(Conduit::new("c1", &j1, &j2, 10.0, -1.0).validate().is_err());
    }

    #[test]
    fn test_pump_row() {
        let (j1, j2, _) = nodes();
        let curve = Curve::new("pc1", CurveKind::Pump3, vec![(0.0, 5.0), (2.0, 1.0)]);
        let pump = Pump::new("p1", &j1, &j2, Some(&curve));
        assert_eq!(
            pump.to_inp(),
            "p1               j1               j2               pc1              ON     0.00     0.00    "
        );

        let ideal = Pump::new("p2", &j1, &j2, None);
        assert!(ideal.to_inp().contains(" *                "));
    }

    #[test]
    fn test_orifice_row() {
        let (j1, j2, _) = nodes();
        let orifice = Orifice::new("or1", &j1, &j2, OrificeType::Side, 0.5, 0.65);
        assert!(orifice.validate().is_ok());
        assert_eq!(
            orifice.to_inp(),
            "or1              j1               j2               SIDE         0.500      0.650      NO       0.00      "
        );
    }

    #[test]
    fn test_weir_cd2_defaults_to_cd() {
        let (j1, j2, _) = nodes();
        let weir = Weir::new("w1", &j1, &j2, WeirType::Trapezoidal, 1.0, 3.33);
        assert!(weir.validate().is_ok());
        assert_eq!(weir.required_shape(), "TRAPEZOIDAL");
        assert_eq!(
            weir.to_inp(),
            "w1               j1               j2               TRAPEZOIDAL  1.000      3.330      NO       0        3.330      YES       "
        );
    }

    #[test]
    fn test_roadway_weir() {
        let (j1, j2, _) = nodes();
        let road = RoadwayParams {
            width: 12.0,
            surface: RoadSurface::Paved,
        };
        let mut weir = Weir::roadway("w2", &j1, &j2, 2.0, 2.8, road);
        weir.gated = YesNo::Yes;
        weir.end_contractions = 2;

        assert!(weir.validate().is_ok());
        assert!(weir
            .to_inp()
            .ends_with("NO       0        0.000      NO         12.00      PAVED     "));

        weir.road = None;
        assert!(weir.validate().is_err());

        let mut transverse = Weir::new("w3", &j1, &j2, WeirType::Transverse, 1.0, 3.0);
        transverse.road = Some(road);
        assert!(transverse.validate().is_err());
    }

    #[test]
    fn test_outlet_rows() {
        let (j1, j2, _) = nodes();
        let tabular = Outlet::new(
            "o1",
            &j1,
            &j2,
            0.5,
            OutletRating::TabularDepth {
                curve: "rating1".into(),
            },
        );
        assert_eq!(tabular.rating.curve(), Some("rating1"));
        assert_eq!(
            tabular.to_inp(),
            "o1               j1               j2               0.500      TABULAR/DEPTH   rating1          NO      "
        );

        let functional = Outlet::new(
            "o2",
            &j1,
            &j2,
            0.0,
            OutletRating::FunctionalHead {
                coefficient: 1.5,
                exponent: 0.5,
            },
        );
        assert!(functional
            .to_inp()
            .contains("FUNCTIONAL/HEAD 1.500            0.500      NO      "));
    }

    #[test]
    fn test_outlet_rating_serde() {
        let outlet: Outlet = toml::from_str(
            r#"
            name = "o1"
            from_node = "j1"
            to_node = "j2"
            offset = 0.0
            rating = { type = "FUNCTIONAL/DEPTH", coefficient = 2.0, exponent = 0.5 }
            "#,
        )
        .unwrap();
        assert_eq!(outlet.rating.keyword(), "FUNCTIONAL/DEPTH");
        assert!(outlet.validate().is_ok());
    }
}
