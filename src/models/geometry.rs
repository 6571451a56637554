//! Link geometry: cross sections, transects, streets and inlets

use serde::{Deserialize, Serialize};

use super::keyword::{keyword_enum, non_negative, percentage, positive, validate_name};
use super::section::{TableRecord, Validate};
use super::shapes::Shape;
use super::topology::{Link, Node};
use crate::error::{Result, SwmmingError};

fn one() -> u32 {
    1
}

/// Cross section of a conduit, orifice or weir
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XSection {
    /// Link the section belongs to
    pub link: String,
    /// Shape and geometry
    #[serde(flatten)]
    pub shape: Shape,
    /// Number of identical parallel barrels
    #[serde(default = "one")]
    pub barrels: u32,
    /// Culvert inlet geometry code (FHWA HDS-5), for inlet control
    #[serde(default)]
    pub culvert: Option<u8>,
}

impl XSection {
    /// Create a single barrel cross section
    pub fn new(link: &impl Link, shape: Shape) -> Self {
        Self {
            link: link.name().to_string(),
            shape,
            barrels: 1,
            culvert: None,
        }
    }
}

impl Validate for XSection {
    fn validate(&self) -> Result<()> {
        validate_name("Link", &self.link)?;
        self.shape.validate()?;
        if self.barrels == 0 {
            return Err(SwmmingError::invalid_value("barrels", 0));
        }
        if let Some(code) = self.culvert {
            if !(1..=57).contains(&code) {
                return Err(SwmmingError::invalid_value("culvert", code));
            }
        }
        Ok(())
    }
}

impl TableRecord for XSection {
    const HEADER: &'static str = "[XSECTIONS]\n\
        ;;Link           Shape        Geom1            Geom2      Geom3      Geom4      Barrels    Culvert   \n\
        ;;-------------- ------------ ---------------- ---------- ---------- ---------- ---------- ----------\n";

    fn to_inp(&self) -> String {
        let head = format!("{:<16} {:<12}", self.link, self.shape.keyword());
        match &self.shape {
            Shape::Custom { height, curve } => {
                format!("{} {:<16.3} {:<16} {:<10}", head, height, curve, self.barrels)
            }
            Shape::Irregular { transect: name } | Shape::Street { street: name } => {
                format!("{} {:<16}", head, name)
            }
            shape => {
                let [g1, g2, g3, g4] = shape.geometry().unwrap_or_default();
                let culvert = self.culvert.map(|c| c.to_string()).unwrap_or_default();
                format!(
                    "{} {:<16.3} {:<10.3} {:<10.3} {:<10.3} {:<10} {:<10}",
                    head, g1, g2, g3, g4, self.barrels, culvert
                )
            }
        }
    }
}

/// Irregular channel cross section in HEC-2 format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transect {
    /// Transect name
    pub name: String,
    /// Station distances from a fixed reference
    pub station: Vec<f64>,
    /// Channel bottom elevation at each station
    pub elevation: Vec<f64>,
    /// Manning's n of the left overbank; 0 keeps the previous value
    #[serde(default)]
    pub nleft: f64,
    /// Manning's n of the right overbank; 0 keeps the previous value
    #[serde(default)]
    pub nright: f64,
    /// Manning's n of the main channel; 0 keeps the previous value
    #[serde(default)]
    pub nchannel: f64,
    /// Station ending the left overbank
    pub xleft: f64,
    /// Station starting the right overbank
    pub xright: f64,
    /// Meandering channel length over overbank length; 0 if unused
    #[serde(default)]
    pub meander_modifier: f64,
    /// Factor applied to station distances; 0 if unused
    #[serde(default)]
    pub station_modifier: f64,
    /// Offset added to every elevation
    #[serde(default)]
    pub elev_offset: f64,
}

impl Transect {
    /// Create a transect with the given bank stations
    pub fn new(
        name: impl Into<String>,
        station: Vec<f64>,
        elevation: Vec<f64>,
        xleft: f64,
        xright: f64,
    ) -> Self {
        Self {
            name: name.into(),
            station,
            elevation,
            nleft: 0.0,
            nright: 0.0,
            nchannel: 0.0,
            xleft,
            xright,
            meander_modifier: 0.0,
            station_modifier: 0.0,
            elev_offset: 0.0,
        }
    }

    /// Set the Manning's n of the overbanks and the main channel
    pub fn with_roughness(mut self, nleft: f64, nright: f64, nchannel: f64) -> Self {
        self.nleft = nleft;
        self.nright = nright;
        self.nchannel = nchannel;
        self
    }
}

impl Validate for Transect {
    fn validate(&self) -> Result<()> {
        validate_name("Transect", &self.name)?;
        if self.station.len() != self.elevation.len() {
            return Err(SwmmingError::validation(format!(
                "transect '{}' has {} stations but {} elevations",
                self.name,
                self.station.len(),
                self.elevation.len()
            )));
        }
        if self.station.len() < 2 {
            return Err(SwmmingError::validation(format!(
                "transect '{}' needs at least two stations",
                self.name
            )));
        }
        for (field, bank) in [("xleft", self.xleft), ("xright", self.xright)] {
            if !self.station.contains(&bank) {
                return Err(SwmmingError::invalid_value(
                    field,
                    format!("{} (not one of the stations of '{}')", bank, self.name),
                ));
            }
        }
        non_negative("nleft", self.nleft)?;
        non_negative("nright", self.nright)?;
        non_negative("nchannel", self.nchannel)
    }
}

impl TableRecord for Transect {
    const HEADER: &'static str = "[TRANSECTS]\n;;Transect Data in HEC-2 format\n";

    fn to_inp(&self) -> String {
        let mut lines = vec![
            ";".to_string(),
            format!(
                "NC {:<11.4} {:<10.4} {:<10.4}",
                self.nleft, self.nright, self.nchannel
            ),
            format!(
                "X1 {:<17} {:<8} {:<8.2} {:<8.2} 0.0      0.0      {:<8.2} {:<8.2} {:<8}",
                self.name,
                self.station.len(),
                self.xleft,
                self.xright,
                self.meander_modifier,
                self.station_modifier,
                format!("{:?}", self.elev_offset)
            ),
        ];

        let pairs: Vec<(f64, f64)> = self
            .elevation
            .iter()
            .copied()
            .zip(self.station.iter().copied())
            .collect();
        for chunk in pairs.chunks(5) {
            let mut line = String::from("GR ");
            for (elev, stat) in chunk {
                line.push_str(&format!("{:<8.2} {:<8.2} ", elev, stat));
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}

fn single_side() -> u8 {
    1
}

/// Cross section of a street conduit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Street {
    /// Street section name
    pub name: String,
    /// Distance from curb to crown (ft or m)
    pub tcrown: f64,
    /// Curb height (ft or m)
    pub hcurb: f64,
    /// Cross slope (%)
    pub sx: f64,
    /// Manning's n of the road surface
    pub n_road: f64,
    /// Gutter depression height (in or mm)
    #[serde(default)]
    pub a: f64,
    /// Depressed gutter width (ft or m)
    #[serde(default)]
    pub w: f64,
    /// 1 for a single sided street, 2 for both sides
    #[serde(default = "single_side")]
    pub sides: u8,
    /// Backing width (ft or m)
    #[serde(default)]
    pub tback: f64,
    /// Backing slope (%)
    #[serde(default)]
    pub sback: f64,
    /// Manning's n of the backing
    #[serde(default)]
    pub n_back: f64,
}

impl Street {
    /// Create a single sided street without gutter depression or backing
    pub fn new(name: impl Into<String>, tcrown: f64, hcurb: f64, sx: f64, n_road: f64) -> Self {
        Self {
            name: name.into(),
            tcrown,
            hcurb,
            sx,
            n_road,
            a: 0.0,
            w: 0.0,
            sides: single_side(),
            tback: 0.0,
            sback: 0.0,
            n_back: 0.0,
        }
    }
}

impl Validate for Street {
    fn validate(&self) -> Result<()> {
        validate_name("Street", &self.name)?;
        positive("tcrown", self.tcrown)?;
        positive("hcurb", self.hcurb)?;
        percentage("sx", self.sx)?;
        positive("n_road", self.n_road)?;
        non_negative("a", self.a)?;
        non_negative("w", self.w)?;
        if !matches!(self.sides, 1 | 2) {
            return Err(SwmmingError::invalid_value("sides", self.sides));
        }
        non_negative("tback", self.tback)?;
        percentage("sback", self.sback)?;
        non_negative("n_back", self.n_back)
    }
}

impl TableRecord for Street {
    const HEADER: &'static str = "[STREETS]\n\
        ;;Name           Tcrown   Hcurb    Sx       nRoad    a        W        Sides    Tback    Sback    nBack   \n\
        ;;-------------- -------- -------- -------- -------- -------- -------- -------- -------- -------- --------\n";

    fn to_inp(&self) -> String {
        format!(
            "{:<16} {:<8.2} {:<8.2} {:<8.4} {:<8.4} {:<8.2} {:<8.2} {:<8} {:<8.2} {:<8.4} {:<8.4}",
            self.name,
            self.tcrown,
            self.hcurb,
            self.sx,
            self.n_road,
            self.a,
            self.w,
            self.sides,
            self.tback,
            self.sback,
            self.n_back
        )
    }
}

keyword_enum! {
    /// Grate design of a grate inlet
    pub enum GrateType {
        /// Parallel bar, 1-7/8 in spacing
        PBar50 => "P_BAR-50",
        /// Parallel bar with transverse rods
        PBar50x100 => "P_BAR-50X100",
        /// Parallel bar, 1-1/8 in spacing
        PBar30 => "P_BAR-30",
        /// Curved vane
        CurvedVane => "CURVED_VANE",
        /// 45 degree tilt bar
        TiltBar45 => "TILT_BAR-45",
        /// 30 degree tilt bar
        TiltBar30 => "TILT_BAR-30",
        /// Reticuline
        Reticuline => "RETICULINE",
        /// User described open area and splash velocity
        Generic => "GENERIC",
    }
}

keyword_enum! {
    /// Throat angle of a curb opening
    pub enum ThroatAngle {
        /// Horizontal
        Horizontal => "HORIZONTAL",
        /// Inclined
        Inclined => "INCLINED",
        /// Vertical
        Vertical => "VERTICAL",
    }
}

keyword_enum! {
    /// Curve relating captured flow for a custom inlet
    pub enum CaptureCurve {
        /// Captured flow vs approach flow
        Diversion => "DIVERSION",
        /// Captured flow vs water depth
        Rating => "RATING",
    }
}

/// Open area and splash velocity of a generic grate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenericGrate {
    /// Fraction of the grate area that is open
    pub aopen: f64,
    /// Splash over velocity (ft/s or m/s)
    pub vsplash: f64,
}

/// Dimensions of a grate inlet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrateInlet {
    /// Length along the curb (ft or m)
    pub length: f64,
    /// Width (ft or m)
    pub width: f64,
    /// Grate design
    pub grate: GrateType,
    /// Open area and splash velocity, required by generic grates
    #[serde(default)]
    pub generic: Option<GenericGrate>,
}

impl GrateInlet {
    fn validate(&self) -> Result<()> {
        positive("length", self.length)?;
        positive("width", self.width)?;
        match (self.grate, self.generic) {
            (GrateType::Generic, None) => Err(SwmmingError::validation(
                "GENERIC grates need an open area fraction and a splash velocity",
            )),
            (GrateType::Generic, Some(generic)) => {
                if !(0.0..=1.0).contains(&generic.aopen) {
                    return Err(SwmmingError::invalid_value("aopen", generic.aopen));
                }
                non_negative("vsplash", generic.vsplash)
            }
            _ => Ok(()),
        }
    }

    fn columns(&self) -> String {
        let mut out = format!(
            "{:<9.2} {:<9.2} {:<12}",
            self.length, self.width, self.grate
        );
        if let (GrateType::Generic, Some(generic)) = (self.grate, self.generic) {
            out.push_str(&format!(" {:<9.2} {:<9.2}", generic.aopen, generic.vsplash));
        }
        out
    }
}

/// Inlet design and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InletDesign {
    /// Grate in a street gutter
    Grate(GrateInlet),
    /// Grate in the bottom of an open channel
    DropGrate(GrateInlet),
    /// Opening in a street curb
    Curb {
        /// Length along the curb (ft or m)
        length: f64,
        /// Opening height (ft or m)
        height: f64,
        /// Throat angle
        throat: ThroatAngle,
    },
    /// Curb opening in an open channel
    DropCurb {
        /// Length (ft or m)
        length: f64,
        /// Opening height (ft or m)
        height: f64,
    },
    /// Slotted drain
    Slotted {
        /// Length (ft or m)
        length: f64,
        /// Slot width (ft or m)
        width: f64,
    },
    /// Capture described by a curve
    Custom {
        /// Curve name
        curve: String,
        /// What the curve relates
        capture: CaptureCurve,
    },
}

impl InletDesign {
    /// SWMM keyword of the inlet type
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Grate(_) => "GRATE",
            Self::DropGrate(_) => "DROP_GRATE",
            Self::Curb { .. } => "CURB",
            Self::DropCurb { .. } => "DROP_CURB",
            Self::Slotted { .. } => "SLOTTED",
            Self::Custom { .. } => "CUSTOM",
        }
    }

    /// Whether the design sits in a street gutter rather than a channel
    pub fn is_street_inlet(&self) -> bool {
        matches!(self, Self::Grate(_) | Self::Curb { .. } | Self::Slotted { .. })
    }
}

/// Inlet structure capturing street or channel flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inlet {
    /// Inlet name
    pub name: String,
    /// Design and parameters
    pub design: InletDesign,
}

impl Inlet {
    /// Create an inlet
    pub fn new(name: impl Into<String>, design: InletDesign) -> Self {
        Self {
            name: name.into(),
            design,
        }
    }
}

impl Validate for Inlet {
    fn validate(&self) -> Result<()> {
        validate_name("Inlet", &self.name)?;
        match &self.design {
            InletDesign::Grate(grate) | InletDesign::DropGrate(grate) => grate.validate(),
            InletDesign::Curb { length, height, .. } | InletDesign::DropCurb { length, height } => {
                positive("length", *length)?;
                positive("height", *height)
            }
            InletDesign::Slotted { length, width } => {
                positive("length", *length)?;
                positive("width", *width)
            }
            InletDesign::Custom { curve, .. } => validate_name("Curve", curve),
        }
    }
}

impl TableRecord for Inlet {
    const HEADER: &'static str = "[INLETS]\n\
        ;;Name           Type             Parameters:\n\
        ;;-------------- ---------------- -----------\n";

    fn to_inp(&self) -> String {
        let params = match &self.design {
            InletDesign::Grate(grate) | InletDesign::DropGrate(grate) => grate.columns(),
            InletDesign::Curb {
                length,
                height,
                throat,
            } => format!("{:<9.2} {:<9.2} {:<12}", length, height, throat),
            InletDesign::DropCurb { length, height } => format!("{:<9.2} {:<9.2}", length, height),
            InletDesign::Slotted { length, width } => format!("{:<9.2} {:<9.2}", length, width),
            InletDesign::Custom { curve, .. } => format!("{:<16}", curve),
        };
        format!("{:<16} {:<16} {}", self.name, self.design.keyword(), params)
    }
}

keyword_enum! {
    /// Whether an inlet operates on a continuous grade or in a sag
    pub enum InletPlacement {
        /// Decided from the network topography
        Automatic => "AUTOMATIC",
        /// On a continuous grade
        OnGrade => "ON_GRADE",
        /// At a sump point
        OnSag => "ON_SAG",
    }
}

impl Default for InletPlacement {
    fn default() -> Self {
        Self::Automatic
    }
}

/// Placement of an inlet design on a conduit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InletUsage {
    /// Street or channel conduit holding the inlet
    pub conduit: String,
    /// Inlet design
    pub inlet: String,
    /// Node receiving the captured flow
    pub node: String,
    /// Replicate inlets on each side of the street
    #[serde(default = "one")]
    pub number: u32,
    /// Capacity lost to clogging (%)
    #[serde(default)]
    pub percent_clogged: f64,
    /// Maximum captured flow; 0 is unrestricted
    #[serde(default)]
    pub qmax: f64,
    /// Local gutter depression height (in or mm)
    #[serde(default)]
    pub alocal: f64,
    /// Local gutter depression width (ft or m)
    #[serde(default)]
    pub wlocal: f64,
    /// Grade or sag placement
    #[serde(default)]
    pub placement: InletPlacement,
}

impl InletUsage {
    /// Place one unclogged `inlet` on `conduit`, draining to `node`
    pub fn new(conduit: &impl Link, inlet: &Inlet, node: &impl Node) -> Self {
        Self {
            conduit: conduit.name().to_string(),
            inlet: inlet.name.clone(),
            node: node.name().to_string(),
            number: 1,
            percent_clogged: 0.0,
            qmax: 0.0,
            alocal: 0.0,
            wlocal: 0.0,
            placement: InletPlacement::Automatic,
        }
    }
}

impl Validate for InletUsage {
    fn validate(&self) -> Result<()> {
        validate_name("Conduit", &self.conduit)?;
        validate_name("Inlet", &self.inlet)?;
        validate_name("Node", &self.node)?;
        if self.number == 0 {
            return Err(SwmmingError::invalid_value("number", 0));
        }
        percentage("percent_clogged", self.percent_clogged)?;
        non_negative("qmax", self.qmax)?;
        non_negative("alocal", self.alocal)?;
        non_negative("wlocal", self.wlocal)
    }
}

impl TableRecord for InletUsage {
    const HEADER: &'static str = "[INLET_USAGE]\n\
        ;;Conduit        Inlet            Node             Number    %Clogged  Qmax      aLocal    wLocal    Placement\n\
        ;;-------------- ---------------- ---------------- --------- --------- --------- --------- --------- --------- ---------\n";

    fn to_inp(&self) -> String {
        format!(
            "{:<16} {:<16} {:<16} {:<9} {:<9.2} {:<9.2} {:<9.2} {:<9.2} {:<19}",
            self.conduit,
            self.inlet,
            self.node,
            self.number,
            self.percent_clogged,
            self.qmax,
            self.alocal,
            self.wlocal,
            self.placement
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::links::Conduit;
    use crate::models::nodes::{Junction, Outfall};
    use crate::models::section::section_to_string;

    fn street_network() -> (Junction, Junction, Conduit, Conduit) {
        let j1 = Junction::new("j1", 100.0);
        let j2 = Junction::new("j2", 99.5);
        let out1 = Outfall::new("out1", 99.0);
        let c1 = Conduit::new("conduit1", &j1, &j2, 100.0, 0.015);
        let c2 = Conduit::new("conduit2", &j2, &out1, 50.0, 0.012);
        (j1, j2, c1, c2)
    }

    fn street() -> Street {
        Street::new("street1", 0.2, 0.1, 0.1, 0.050)
    }

    fn grate_inlet() -> Inlet {
        Inlet::new(
            "inlet1",
            InletDesign::Grate(GrateInlet {
                length: 2.0,
                width: 0.75,
                grate: GrateType::PBar50,
                generic: None,
            }),
        )
    }

    fn curb_inlet() -> Inlet {
        Inlet::new(
            "inlet2",
            InletDesign::Curb {
                length: 1.2,
                height: 4.8,
                throat: ThroatAngle::Horizontal,
            },
        )
    }

    fn transects() -> (Transect, Transect) {
        let station: Vec<f64> = (0..11).map(f64::from).collect();

        let elevation: Vec<f64> = (6..=10).rev().chain(5..=10).map(f64::from).collect();
        let mut t1 = Transect::new("transect1", station.clone(), elevation, 1.0, 3.0)
            .with_roughness(0.020, 0.020, 0.010);
        t1.station_modifier = 0.80;

        let elevation: Vec<f64> = (1..=5)
            .rev()
            .map(|i| f64::from(i * 2))
            .chain((0..=5).map(|i| f64::from(i * 2)))
            .collect();
        let t2 = Transect::new("transect2", station, elevation, 1.0, 3.0)
            .with_roughness(0.025, 0.025, 0.0);

        (t1, t2)
    }

    #[test]
    fn test_street_xsections() {
        let (_, _, c1, c2) = street_network();
        let street = street();
        let shape = Shape::Street {
            street: street.name.clone(),
        };
        let xs1 = XSection::new(&c1, shape.clone());
        let xs2 = XSection::new(&c2, shape);

        assert_eq!(
            section_to_string(&[xs1, xs2]),
            "[XSECTIONS]\n\
             ;;Link           Shape        Geom1            Geom2      Geom3      Geom4      Barrels    Culvert   \n\
             ;;-------------- ------------ ---------------- ---------- ---------- ---------- ---------- ----------\n\
             conduit1         STREET       street1         \n\
             conduit2         STREET       street1         \n"
        );
    }

    #[test]
    fn test_parametric_xsection() {
        let (_, _, c1, _) = street_network();
        let mut xs = XSection::new(&c1, Shape::Circular { diameter: 10.0 });
        xs.culvert = Some(4);
        assert!(xs.validate().is_ok());
        assert_eq!(
            xs.to_inp(),
            "conduit1         CIRCULAR     10.000           0.000      0.000      0.000      1          4         "
        );

        xs.culvert = Some(60);
        assert!(xs.validate().is_err());
    }

    #[test]
    fn test_custom_xsection() {
        let (_, _, c1, _) = street_network();
        let xs = XSection::new(
            &c1,
            Shape::Custom {
                height: 2.0,
                curve: "egg_shape".into(),
            },
        );
        assert_eq!(
            xs.to_inp(),
            "conduit1         CUSTOM       2.000            egg_shape        1         "
        );
    }

    #[test]
    fn test_xsection_flattened_shape() {
        let xs: XSection = toml::from_str(
            r#"
            link = "c1"
            shape = "TRAPEZOIDAL"
            height = 10.0
            base_width = 5.0
            left_slope = 2.0
            right_slope = 2.5
            barrels = 2
            "#,
        )
        .unwrap();
        assert_eq!(xs.barrels, 2);
        assert_eq!(xs.shape.geometry(), Some([10.0, 5.0, 2.0, 2.5]));
    }

    #[test]
    fn test_streets_section() {
        assert!(street().validate().is_ok());
        assert_eq!(
            section_to_string(&[street()]),
            "[STREETS]\n\
             ;;Name           Tcrown   Hcurb    Sx       nRoad    a        W        Sides    Tback    Sback    nBack   \n\
             ;;-------------- -------- -------- -------- -------- -------- -------- -------- -------- -------- --------\n\
             street1          0.20     0.10     0.1000   0.0500   0.00     0.00     1        0.00     0.0000   0.0000  \n"
        );
    }

    #[test]
    fn test_inlets_section() {
        assert!(grate_inlet().validate().is_ok());
        assert!(curb_inlet().validate().is_ok());
        assert_eq!(
            section_to_string(&[grate_inlet(), curb_inlet()]),
            "[INLETS]\n\
             ;;Name           Type             Parameters:\n\
             ;;-------------- ---------------- -----------\n\
             inlet1           GRATE            2.00      0.75      P_BAR-50    \n\
             inlet2           CURB             1.20      4.80      HORIZONTAL  \n"
        );
    }

    #[test]
    fn test_generic_grate_needs_parameters() {
        let mut grate = GrateInlet {
            length: 2.0,
            width: 1.0,
            grate: GrateType::Generic,
            generic: None,
        };
        assert!(Inlet::new("g", InletDesign::DropGrate(grate.clone()))
            .validate()
            .is_err());

        grate.generic = Some(GenericGrate {
            aopen: 0.5,
            vsplash: 3.0,
        });
        let inlet = Inlet::new("g", InletDesign::DropGrate(grate));
        assert!(inlet.validate().is_ok());
        assert_eq!(
            inlet.to_inp(),
            "g                DROP_GRATE       2.00      1.00      GENERIC      0.50      3.00     "
        );
    }

    #[test]
    fn test_inlet_usage_section() {
        let (_, j2, c1, _) = street_network();
        let use1 = InletUsage {
            percent_clogged: 25.0,
            ..InletUsage::new(&c1, &grate_inlet(), &j2)
        };
        let use2 = InletUsage::new(&c1, &curb_inlet(), &j2);

        assert_eq!(
            section_to_string(&[use1, use2]),
            "[INLET_USAGE]\n\
             ;;Conduit        Inlet            Node             Number    %Clogged  Qmax      aLocal    wLocal    Placement\n\
             ;;-------------- ---------------- ---------------- --------- --------- --------- --------- --------- --------- ---------\n\
             conduit1         inlet1           j2               1         25.00     0.00      0.00      0.00      AUTOMATIC          \n\
             conduit1         inlet2           j2               1         0.00      0.00      0.00      0.00      AUTOMATIC          \n"
        );
    }

    #[test]
    fn test_transects_section() {
        let (t1, t2) = transects();
        assert!(t1.validate().is_ok());
        assert!(t2.validate().is_ok());

        let text = section_to_string(&[t1, t2]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "[TRANSECTS]");
        assert_eq!(lines[3].trim(), "NC 0.0200      0.0200     0.0100");
        assert_eq!(
            lines[4].trim(),
            "X1 transect1         11       1.00     3.00     0.0      0.0      0.00     0.80     0.0"
        );
        assert_eq!(
            lines[11].trim(),
            "GR 10.00    0.00     8.00     1.00     6.00     2.00     4.00     3.00     2.00     4.00"
        );
    }

    #[test]
    fn test_transect_bank_stations() {
        let (mut t1, _) = transects();
        t1.xright = 3.5;
        assert!(t1.validate().is_err());

        let (mut t1, _) = transects();
        t1.elevation.pop();
        assert!(t1.validate().is_err());
    }
}
