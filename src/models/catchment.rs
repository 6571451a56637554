//! Subcatchments and their surface and soil properties

use serde::{Deserialize, Serialize};

use super::keyword::{keyword_enum, non_negative, percentage, validate_name};
use super::meteo::Raingage;
use super::options::InfiltrationMethod;
use super::section::{TableRecord, Validate};
use super::topology::{Area, RunoffOutlet};
use crate::error::{Result, SwmmingError};

/// A land area generating runoff from rainfall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcatchment {
    /// Subcatchment name
    pub name: String,
    /// Rain gage assigned to the area
    pub rain_gage: String,
    /// Node or subcatchment receiving the runoff
    pub outlet: String,
    /// Area (acres or hectares)
    pub area: f64,
    /// Impervious share of the area (%)
    pub percent_imperv: f64,
    /// Characteristic width of overland flow (ft or m)
    pub width: f64,
    /// Average surface slope (%)
    pub slope: f64,
    /// Total curb length used for pollutant buildup
    #[serde(default)]
    pub curb_length: f64,
}

impl Subcatchment {
    /// Create a subcatchment draining to `outlet`, a node or another subcatchment
    pub fn new(
        name: impl Into<String>,
        rain_gage: &Raingage,
        outlet: &impl RunoffOutlet,
        area: f64,
        percent_imperv: f64,
        width: f64,
        slope: f64,
    ) -> Self {
        Self {
            name: name.into(),
            rain_gage: rain_gage.name.clone(),
            outlet: outlet.outlet_name().to_string(),
            area,
            percent_imperv,
            width,
            slope,
            curb_length: 0.0,
        }
    }
}

impl Area for Subcatchment {
    fn name(&self) -> &str {
        &self.name
    }
}

impl RunoffOutlet for Subcatchment {
    fn outlet_name(&self) -> &str {
        &self.name
    }
}

impl Validate for Subcatchment {
    fn validate(&self) -> Result<()> {
        validate_name("Subcatchment", &self.name)?;
        validate_name("Raingage", &self.rain_gage)?;
        validate_name("Outlet", &self.outlet)?;
        if self.outlet == self.name {
            return Err(SwmmingError::validation(format!(
                "subcatchment '{}' cannot drain to itself",
                self.name
            )));
        }
        non_negative("area", self.area)?;
        percentage("percent_imperv", self.percent_imperv)?;
        non_negative("width", self.width)?;
        percentage("slope", self.slope)?;
        non_negative("curb_length", self.curb_length)
    }
}

impl TableRecord for Subcatchment {
    const HEADER: &'static str = "[SUBCATCHMENTS]\n\
        ;;Name           Rain Gage        Outlet           Area     %Imperv  Width    %Slope   CurbLen  SnowPack        \n\
        ;;-------------- ---------------- ---------------- -------- -------- -------- -------- -------- ----------------\n";

    fn to_inp(&self) -> String {
        format!(
            "{:<16} {:<16} {:<16} {:<8.2} {:<8.2} {:<8.2} {:<8.4} {:<8.2} {:<16}",
            self.name,
            self.rain_gage,
            self.outlet,
            self.area,
            self.percent_imperv,
            self.width,
            self.slope,
            self.curb_length,
            ""
        )
    }
}

keyword_enum! {
    /// Internal routing of runoff between subareas
    pub enum RouteTo {
        /// Both subareas drain to the outlet
        Outlet => "OUTLET",
        /// Pervious runoff flows onto the impervious subarea
        Impervious => "IMPERVIOUS",
        /// Impervious runoff flows onto the pervious subarea
        Pervious => "PERVIOUS",
    }
}

impl Default for RouteTo {
    fn default() -> Self {
        Self::Outlet
    }
}

fn full_route() -> f64 {
    100.0
}

/// Pervious and impervious surface properties of a subcatchment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subarea {
    /// Subcatchment the properties apply to
    pub subcatchment: String,
    /// Manning's n of the impervious subarea
    pub nimp: f64,
    /// Manning's n of the pervious subarea
    pub nperv: f64,
    /// Depression storage of the impervious subarea
    pub simp: f64,
    /// Depression storage of the pervious subarea
    pub sperv: f64,
    /// Impervious share with no depression storage (%)
    pub percent_zero: f64,
    /// Internal routing
    #[serde(default)]
    pub route_to: RouteTo,
    /// Share of runoff routed between subareas (%)
    #[serde(default = "full_route")]
    pub percent_routed: f64,
}

impl Subarea {
    /// Create subarea properties routing everything to the outlet
    pub fn new(
        subcatchment: &impl Area,
        nimp: f64,
        nperv: f64,
        simp: f64,
        sperv: f64,
        percent_zero: f64,
    ) -> Self {
        Self {
            subcatchment: subcatchment.name().to_string(),
            nimp,
            nperv,
            simp,
            sperv,
            percent_zero,
            route_to: RouteTo::Outlet,
            percent_routed: full_route(),
        }
    }
}

impl Validate for Subarea {
    fn validate(&self) -> Result<()> {
        validate_name("Subcatchment", &self.subcatchment)?;
        non_negative("nimp", self.nimp)?;
        non_negative("nperv", self.nperv)?;
        non_negative("simp", self.simp)?;
        non_negative("sperv", self.sperv)?;
        percentage("percent_zero", self.percent_zero)?;
        percentage("percent_routed", self.percent_routed)
    }
}

impl TableRecord for Subarea {
    const HEADER: &'static str = "[SUBAREAS]\n\
        ;;Subcatchment   N-Imperv   N-Perv     S-Imperv   S-Perv     PctZero    RouteTo    PctRouted \n\
        ;;-------------- ---------- ---------- ---------- ---------- ---------- ---------- ----------\n";

    fn to_inp(&self) -> String {
        format!(
            "{:<16} {:<10.4} {:<10.4} {:<10.4} {:<10.4} {:<10.2} {:<10} {:<10.2}",
            self.subcatchment,
            self.nimp,
            self.nperv,
            self.simp,
            self.sperv,
            self.percent_zero,
            self.route_to,
            self.percent_routed
        )
    }
}

/// Infiltration parameters of a subcatchment's pervious area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infiltration {
    /// Subcatchment the parameters apply to
    pub subcatchment: String,
    /// Model parameters, in the order SWMM expects them
    pub parameters: Vec<f64>,
    /// Model; the `[OPTIONS]` default applies when unset
    #[serde(default)]
    pub method: Option<InfiltrationMethod>,
}

impl Infiltration {
    /// Create infiltration parameters for a subcatchment
    pub fn new(
        subcatchment: &impl Area,
        parameters: Vec<f64>,
        method: Option<InfiltrationMethod>,
    ) -> Self {
        Self {
            subcatchment: subcatchment.name().to_string(),
            parameters,
            method,
        }
    }
}

impl Validate for Infiltration {
    fn validate(&self) -> Result<()> {
        validate_name("Subcatchment", &self.subcatchment)?;
        let count = self.parameters.len();
        match self.method {
            Some(method) if method.parameter_count() != count => {
                Err(SwmmingError::validation(format!(
                    "{} infiltration of '{}' needs {} parameters, got {}",
                    method,
                    self.subcatchment,
                    method.parameter_count(),
                    count
                )))
            }
            None if !InfiltrationMethod::any_parameter_count().contains(&count) => {
                Err(SwmmingError::validation(format!(
                    "infiltration of '{}' needs 3 to 5 parameters, got {}",
                    self.subcatchment, count
                )))
            }
            _ => Ok(()),
        }
    }
}

impl TableRecord for Infiltration {
    const HEADER: &'static str = "[INFILTRATION]\n\
        ;;Subcatchment   Param1     Param2     Param3     Param4     Param5    \n\
        ;;-------------- ---------- ---------- ---------- ---------- ----------\n";

    fn to_inp(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{:<10.2}", p))
            .collect();
        let method = self.method.map(|m| m.to_string()).unwrap_or_default();
        format!("{:<16} {:<54} {}", self.subcatchment, params.join(" "), method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meteo::{RainFormat, RaingageSource};
    use crate::models::nodes::{Junction, Outfall};
    use crate::models::section::section_to_string;

    fn gage(name: &str) -> Raingage {
        Raingage::new(
            name,
            RainFormat::Intensity,
            "1:00",
            RaingageSource::Timeseries {
                name: "timeseries1".into(),
            },
        )
    }

    fn catchments() -> (Subcatchment, Subcatchment) {
        let j1 = Junction::new("j1", 150.0);
        let s1 = Subcatchment::new("s1", &gage("rg1"), &j1, 100.0, 100.0, 100.0, 0.15);
        let s2 = Subcatchment::new("s2", &gage("rg2"), &j1, 200.0, 25.0, 123.0, 0.9);
        (s1, s2)
    }

    #[test]
    fn test_subcatchments_section() {
        let (s1, s2) = catchments();
        assert!(s1.validate().is_ok());

        assert_eq!(
            section_to_string(&[s1, s2]),
            "[SUBCATCHMENTS]\n\
             ;;Name           Rain Gage        Outlet           Area     %Imperv  Width    %Slope   CurbLen  SnowPack        \n\
             ;;-------------- ---------------- ---------------- -------- -------- -------- -------- -------- ----------------\n\
             s1               rg1              j1               100.00   100.00   100.00   0.1500   0.00                     \n\
             s2               rg2              j1               200.00   25.00    123.00   0.9000   0.00                     \n"
        );
    }

    #[test]
    fn test_subcatchment_self_outlet() {
        let (s1, _) = catchments();
        let s = Subcatchment::new("s1", &gage("rg1"), &s1, 1.0, 10.0, 1.0, 1.0);
        assert!(s.validate().is_err());

        let j1 = Junction::new("j1", 0.0);
        let s = Subcatchment::new("s1", &gage("rg1"), &j1, 1.0, 110.0, 1.0, 1.0);
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_subcatchment_outlets() {
        let (s1, _) = catchments();
        let upstream = Subcatchment::new("s0", &gage("rg1"), &s1, 5.0, 20.0, 50.0, 1.0);
        assert_eq!(upstream.outlet, "s1");
        assert!(upstream.validate().is_ok());

        let out1 = Outfall::new("out1", 9.0);
        let s = Subcatchment::new("s9", &gage("rg1"), &out1, 5.0, 20.0, 50.0, 1.0);
        assert_eq!(s.outlet, "out1");
    }

    #[test]
    fn test_subareas_section() {
        let (s1, s2) = catchments();
        let a1 = Subarea::new(&s1, 0.015, 0.123, 0.010, 0.011, 50.0);
        let a2 = Subarea::new(&s2, 0.015, 0.123, 0.109, 0.1, 10.0);

        assert_eq!(
            section_to_string(&[a1, a2]),
            "[SUBAREAS]\n\
             ;;Subcatchment   N-Imperv   N-Perv     S-Imperv   S-Perv     PctZero    RouteTo    PctRouted \n\
             ;;-------------- ---------- ---------- ---------- ---------- ---------- ---------- ----------\n\
             s1               0.0150     0.1230     0.0100     0.0110     50.00      OUTLET     100.00    \n\
             s2               0.0150     0.1230     0.1090     0.1000     10.00      OUTLET     100.00    \n"
        );
    }

    #[test]
    fn test_infiltration_section() {
        let (s1, s2) = catchments();
        let i1 = Infiltration::new(
            &s1,
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            Some(InfiltrationMethod::Horton),
        );
        let i2 = Infiltration::new(
            &s2,
            vec![10.0, 20.0, 30.0],
            Some(InfiltrationMethod::ModifiedGreenAmpt),
        );
        assert!(i1.validate().is_ok());
        assert!(i2.validate().is_ok());

        assert_eq!(
            section_to_string(&[i1, i2]),
            "[INFILTRATION]\n\
             ;;Subcatchment   Param1     Param2     Param3     Param4     Param5    \n\
             ;;-------------- ---------- ---------- ---------- ---------- ----------\n\
             s1               1.00       2.00       3.00       4.00       5.00       HORTON\n\
             s2               10.00      20.00      30.00                            MODIFIED_GREEN_AMPT\n"
        );
    }

    #[test]
    fn test_infiltration_parameter_counts() {
        let (s1, _) = catchments();
        let horton = Infiltration::new(&s1, vec![1.0; 3], Some(InfiltrationMethod::Horton));
        assert!(horton.validate().is_err());

        let default_method = Infiltration::new(&s1, vec![1.0; 4], None);
        assert!(default_method.validate().is_ok());
        assert!(default_method.to_inp().ends_with(' '));

        let too_few = Infiltration::new(&s1, vec![1.0; 2], None);
        assert!(too_few.validate().is_err());
    }
}
