//! Network nodes: junctions, outfalls and flow dividers

use serde::{Deserialize, Serialize};

use super::keyword::{non_negative, positive, validate_name, YesNo};
use super::section::{TableRecord, Validate};
use super::tabular::{Curve, Timeseries};
use super::topology::{impl_node, Area, Link};
use crate::error::{Result, SwmmingError};

/// A point where conduits meet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    /// Junction name
    pub name: String,
    /// Invert elevation (ft or m)
    pub elevation: f64,
    /// Depth from ground to invert; 0 lets SWMM use the highest connecting link
    #[serde(default)]
    pub max_depth: f64,
    /// Water depth at the start of the simulation
    #[serde(default)]
    pub init_depth: f64,
    /// Extra head sustainable under surcharge
    #[serde(default)]
    pub sur_depth: f64,
    /// Ponded area once the node floods
    #[serde(default)]
    pub aponded: f64,
}

impl Junction {
    /// Create a junction with zero depths
    pub fn new(name: impl Into<String>, elevation: f64) -> Self {
        Self {
            name: name.into(),
            elevation,
            max_depth: 0.0,
            init_depth: 0.0,
            sur_depth: 0.0,
            aponded: 0.0,
        }
    }
}

fn validate_depths(max_depth: f64, init_depth: f64, sur_depth: f64, aponded: f64) -> Result<()> {
    non_negative("max_depth", max_depth)?;
    non_negative("init_depth", init_depth)?;
    non_negative("sur_depth", sur_depth)?;
    non_negative("aponded", aponded)?;
    if max_depth > 0.0 && init_depth > max_depth {
        return Err(SwmmingError::validation(format!(
            "initial depth {} exceeds maximum depth {}",
            init_depth, max_depth
        )));
    }
    Ok(())
}

impl Validate for Junction {
    fn validate(&self) -> Result<()> {
        validate_name("Junction", &self.name)?;
        validate_depths(self.max_depth, self.init_depth, self.sur_depth, self.aponded)
    }
}

impl TableRecord for Junction {
    const HEADER: &'static str = "[JUNCTIONS]\n\
        ;;Name           Elevation  MaxDepth   InitDepth  SurDepth   Aponded    \n\
        ;;-------------- ---------- ---------- ---------- ---------- ---------- \n";

    fn to_inp(&self) -> String {
        format!(
            "{:<16} {:<10.3} {:<10.2} {:<10.2} {:<10.2} {:<11}",
            self.name, self.elevation, self.max_depth, self.init_depth, self.sur_depth, self.aponded
        )
    }
}

/// Water stage boundary condition at an outfall
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutfallStage {
    /// Critical or normal flow depth, whichever is smaller
    #[default]
    Free,
    /// Normal flow depth
    Normal,
    /// Constant stage elevation
    Fixed {
        /// Stage elevation (ft or m)
        elevation: f64,
    },
    /// Stage from a tidal curve over the hour of day
    Tidal {
        /// Curve name
        curve: String,
    },
    /// Stage from a time series
    Timeseries {
        /// Time series name
        timeseries: String,
    },
}

impl OutfallStage {
    /// Stage following a tidal curve
    pub fn tidal(curve: &Curve) -> Self {
        Self::Tidal {
            curve: curve.name.clone(),
        }
    }

    /// Stage following a time series
    pub fn timeseries(ts: &Timeseries) -> Self {
        Self::Timeseries {
            timeseries: ts.name.clone(),
        }
    }

    /// SWMM keyword of the outfall type
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Normal => "NORMAL",
            Self::Fixed { .. } => "FIXED",
            Self::Tidal { .. } => "TIDAL",
            Self::Timeseries { .. } => "TIMESERIES",
        }
    }

    fn stage_data(&self) -> String {
        match self {
            Self::Free | Self::Normal => " ".repeat(16),
            Self::Fixed { elevation } => format!("{:<16.3}", elevation),
            Self::Tidal { curve: name } | Self::Timeseries { timeseries: name } => {
                format!("{:<16}", name)
            }
        }
    }
}

/// A terminal node of the drainage system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfall {
    /// Outfall name
    pub name: String,
    /// Invert elevation (ft or m)
    pub elevation: f64,
    /// Stage boundary condition
    #[serde(default)]
    pub stage: OutfallStage,
    /// Flap gate preventing backflow
    #[serde(default)]
    pub gated: YesNo,
    /// Subcatchment receiving the outfall's discharge
    #[serde(default)]
    pub route_to: Option<String>,
}

impl Outfall {
    /// Create a free outfall
    pub fn new(name: impl Into<String>, elevation: f64) -> Self {
        Self::with_stage(name, elevation, OutfallStage::Free)
    }

    /// Create an outfall with the given stage condition
    pub fn with_stage(name: impl Into<String>, elevation: f64, stage: OutfallStage) -> Self {
        Self {
            name: name.into(),
            elevation,
            stage,
            gated: YesNo::No,
            route_to: None,
        }
    }

    /// Route the discharge onto a subcatchment
    pub fn routed_to(mut self, area: &impl Area) -> Self {
        self.route_to = Some(area.name().to_string());
        self
    }
}

impl Validate for Outfall {
    fn validate(&self) -> Result<()> {
        validate_name("Outfall", &self.name)?;
        match &self.stage {
            OutfallStage::Tidal { curve } => validate_name("Curve", curve)?,
            OutfallStage::Timeseries { timeseries } => validate_name("Timeseries", timeseries)?,
            _ => {}
        }
        if let Some(area) = &self.route_to {
            validate_name("Subcatchment", area)?;
        }
        Ok(())
    }
}

impl TableRecord for Outfall {
    const HEADER: &'static str = "[OUTFALLS]\n\
        ;;Name           Elevation  Type       Stage Data       Gated    Route To        \n\
        ;;-------------- ---------- ---------- ---------------- -------- ----------------\n";

    fn to_inp(&self) -> String {
        let route_to = self
            .route_to
            .as_ref()
            .map(|name| format!("{:<16}", name))
            .unwrap_or_default();
        format!(
            "{:<16} {:<10.3} {:<10} {} {:<8} {}",
            self.name,
            self.elevation,
            self.stage.keyword(),
            self.stage.stage_data(),
            self.gated,
            route_to
        )
    }
}

/// How a divider splits flow onto its diversion link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DividerKind {
    /// Flow above the non-diverted conduit's full capacity is diverted
    Overflow,
    /// Flow above a cutoff value is diverted
    Cutoff {
        /// Flow at which diversion begins
        qmin: f64,
    },
    /// Diverted flow follows a diversion curve of total flow
    Tabular {
        /// Diversion curve name
        curve: String,
    },
    /// Diverted flow follows a weir equation
    Weir {
        /// Flow at which diversion begins
        qmin: f64,
        /// Weir height (ft or m)
        height: f64,
        /// Discharge coefficient
        cd: f64,
    },
}

impl DividerKind {
    /// SWMM keyword of the divider type
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Overflow => "OVERFLOW",
            Self::Cutoff { .. } => "CUTOFF",
            Self::Tabular { .. } => "TABULAR",
            Self::Weir { .. } => "WEIR",
        }
    }

    fn parameters(&self) -> Vec<String> {
        match self {
            Self::Overflow => Vec::new(),
            Self::Cutoff { qmin } => vec![format!("{:<10.3}", qmin)],
            Self::Tabular { curve } => vec![format!("{:<16}", curve)],
            Self::Weir { qmin, height, cd } => vec![
                format!("{:<10.3}", qmin),
                format!("{:<10.3}", height),
                format!("{:<10.3}", cd),
            ],
        }
    }
}

/// A junction splitting its outflow between two conduits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    /// Divider name
    pub name: String,
    /// Invert elevation (ft or m)
    pub elevation: f64,
    /// Link receiving the diverted flow
    pub diverted_link: String,
    /// Diversion rule
    pub kind: DividerKind,
    /// Depth from ground to invert
    #[serde(default)]
    pub max_depth: f64,
    /// Water depth at the start of the simulation
    #[serde(default)]
    pub init_depth: f64,
    /// Extra head sustainable under surcharge
    #[serde(default)]
    pub sur_depth: f64,
    /// Ponded area once the node floods
    #[serde(default)]
    pub aponded: f64,
}

impl Divider {
    /// Create a divider diverting flow onto `link`
    pub fn new(
        name: impl Into<String>,
        elevation: f64,
        link: &impl Link,
        kind: DividerKind,
    ) -> Self {
        Self {
            name: name.into(),
            elevation,
            diverted_link: link.name().to_string(),
            kind,
            max_depth: 0.0,
            init_depth: 0.0,
            sur_depth: 0.0,
            aponded: 0.0,
        }
    }
}

impl Validate for Divider {
    fn validate(&self) -> Result<()> {
        validate_name("Divider", &self.name)?;
        validate_name("Link", &self.diverted_link)?;
        match &self.kind {
            DividerKind::Overflow => {}
            DividerKind::Cutoff { qmin } => non_negative("qmin", *qmin)?,
            DividerKind::Tabular { curve } => validate_name("Curve", curve)?,
            DividerKind::Weir { qmin, height, cd } => {
                non_negative("qmin", *qmin)?;
                positive("height", *height)?;
                positive("cd", *cd)?;
            }
        }
        validate_depths(self.max_depth, self.init_depth, self.sur_depth, self.aponded)
    }
}

impl TableRecord for Divider {
    const HEADER: &'static str = "[DIVIDERS]\n\
        ;;Name           Elevation  Diverted Link    Type       Parameters\n\
        ;;-------------- ---------- ---------------- ---------- ----------\n";

    fn to_inp(&self) -> String {
        let mut columns = vec![
            format!("{:<16}", self.name),
            format!("{:<10.3}", self.elevation),
            format!("{:<16}", self.diverted_link),
            format!("{:<10}", self.kind.keyword()),
        ];
        columns.extend(self.kind.parameters());
        columns.push(format!("{:<10.2}", self.max_depth));
        columns.push(format!("{:<10.2}", self.init_depth));
        columns.push(format!("{:<10.2}", self.sur_depth));
        columns.push(self.aponded.to_string());
        columns.join(" ")
    }
}

impl_node!(Junction, Outfall, Divider);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::links::Conduit;
    use crate::models::section::section_to_string;

    #[test]
    fn test_junctions_section() {
        let j1 = Junction::new("j1", 10.0);
        let j2 = Junction {
            max_depth: 3.5,
            aponded: 12.5,
            ..Junction::new("j2", 9.5)
        };

        assert_eq!(
            section_to_string(&[j1, j2]),
            "[JUNCTIONS]\n\
             ;;Name           Elevation  MaxDepth   InitDepth  SurDepth   Aponded    \n\
             ;;-------------- ---------- ---------- ---------- ---------- ---------- \n\
             j1               10.000     0.00       0.00       0.00       0          \n\
             j2               9.500      3.50       0.00       0.00       12.5       \n"
        );
    }

    #[test]
    fn test_junction_depths() {
        let j = Junction {
            max_depth: 1.0,
            init_depth: 2.0,
            ..Junction::new("j1", 0.0)
        };
        assert!(j.validate().is_err());
        assert!(Junction::new("j 1", 0.0).validate().is_err());
    }

    #[test]
    fn test_outfalls_section() {
        let free = Outfall::new("out1", 8.0);
        let fixed = Outfall::with_stage("out2", 7.5, OutfallStage::Fixed { elevation: 8.25 });
        let tidal = Outfall {
            gated: YesNo::Yes,
            ..Outfall::with_stage("out3", 7.0, OutfallStage::Tidal { curve: "tide".into() })
        };

        assert_eq!(
            section_to_string(&[free, fixed, tidal]),
            "[OUTFALLS]\n\
             ;;Name           Elevation  Type       Stage Data       Gated    Route To        \n\
             ;;-------------- ---------- ---------- ---------------- -------- ----------------\n\
             out1             8.000      FREE                        NO       \n\
             out2             7.500      FIXED      8.250            NO       \n\
             out3             7.000      TIDAL      tide             YES      \n"
        );
    }

    #[test]
    fn test_outfall_stage_from_toml() {
        let outfall: Outfall = toml::from_str(
            r#"
            name = "out1"
            elevation = 2.0
            stage = { type = "TIMESERIES", timeseries = "tide_ts" }
            route_to = "s1"
            "#,
        )
        .unwrap();
        assert_eq!(
            outfall.stage,
            OutfallStage::Timeseries {
                timeseries: "tide_ts".into()
            }
        );
        assert!(outfall.to_inp().ends_with("NO       s1              "));
    }

    #[test]
    fn test_divider_row() {
        let j1 = Junction::new("j1", 10.0);
        let j2 = Junction::new("j2", 9.0);
        let c1 = Conduit::new("c1", &j1, &j2, 100.0, 0.013);
        let divider = Divider::new("d1", 10.0, &c1, DividerKind::Cutoff { qmin: 0.5 });

        assert!(divider.validate().is_ok());
        assert_eq!(
            divider.to_inp(),
            "d1               10.000     c1               CUTOFF     0.500      0.00       0.00       0.00       0"
        );

        let weir = Divider::new(
            "d2",
            10.0,
            &c1,
            DividerKind::Weir {
                qmin: 0.5,
                height: 0.0,
                cd: 3.0,
            },
        );
        assert!(weir.validate().is_err());
    }
}
