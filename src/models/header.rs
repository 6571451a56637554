//! Project header sections: `[TITLE]`, `[OPTIONS]` and `[REPORT]`

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::keyword::{percentage, positive, YesNo};
use super::options::{
    FlowUnits, ForceMainEquation, InertialDamping, InfiltrationMethod, LinkOffsets,
    NormalFlowLimited, RoutingMethod, SurchargeMethod,
};
use super::section::{SectionBlock, Validate};
use crate::error::{Result, SwmmingError};

/// Project title and notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Title {
    /// First line of the title block
    pub header: String,
    /// Free-form notes following the header
    pub description: String,
}

impl Default for Title {
    fn default() -> Self {
        Self {
            header: "Project Title".to_string(),
            description: "Project Description".to_string(),
        }
    }
}

impl Title {
    /// Create a title block
    pub fn new(header: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            description: description.into(),
        }
    }
}

impl Validate for Title {
    fn validate(&self) -> Result<()> {
        // A line starting with '[' would be read as the next section
        if self
            .header
            .lines()
            .chain(self.description.lines())
            .any(|line| line.trim_start().starts_with('['))
        {
            return Err(SwmmingError::validation(
                "title lines cannot start with '['",
            ));
        }
        Ok(())
    }
}

impl SectionBlock for Title {
    const SECTION: &'static str = "[TITLE]";

    fn to_inp(&self) -> String {
        format!(
            "[TITLE]\n;;Project Title/Notes\n{}\n{}\n",
            self.header, self.description
        )
    }
}

/// Format a date as `M/D/YYYY`
pub fn format_date(date: &NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Format a time of day or a time step as `H:MM:SS`
pub fn format_clock(time: &NaiveTime) -> String {
    format!("{}:{:02}:{:02}", time.hour(), time.minute(), time.second())
}

/// Day of the year without a year, written `M/D`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthDay {
    /// Month, 1..=12
    pub month: u32,
    /// Day of the month
    pub day: u32,
}

impl MonthDay {
    /// Create a month/day pair, checking it exists in a leap year
    pub fn new(month: u32, day: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(SwmmingError::invalid_value(
                "month/day",
                format!("{}/{}", month, day),
            ));
        }
        Ok(Self { month, day })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}/{}", self.month, self.day))
    }
}

impl std::str::FromStr for MonthDay {
    type Err = SwmmingError;

    fn from_str(s: &str) -> Result<Self> {
        let (month, day) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| SwmmingError::invalid_value("month/day", s))?;
        let month = month
            .parse()
            .map_err(|_| SwmmingError::invalid_value("month", month))?;
        let day = day
            .parse()
            .map_err(|_| SwmmingError::invalid_value("day", day))?;
        Self::new(month, day)
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn clock(hour: u32, minute: u32, second: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default()
}

/// Analysis options
///
/// Field order is the order in which the options are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Flow units (also selects US or SI units)
    pub flow_units: FlowUnits,
    /// Default infiltration model
    pub infiltration: InfiltrationMethod,
    /// Flow routing method
    pub flow_routing: RoutingMethod,
    /// Link offset convention
    pub link_offsets: LinkOffsets,
    /// Force main friction equation
    pub force_main_equation: ForceMainEquation,
    /// Skip rainfall and runoff
    pub ignore_rainfall: YesNo,
    /// Skip snowmelt
    pub ignore_snowmelt: YesNo,
    /// Skip groundwater
    pub ignore_groundwater: YesNo,
    /// Skip rainfall dependent infiltration/inflow
    pub ignore_rdii: YesNo,
    /// Compute runoff only
    pub ignore_routing: YesNo,
    /// Skip water quality
    pub ignore_quality: YesNo,
    /// Allow ponding at nodes
    pub allow_ponding: YesNo,
    /// Skip steady state periods
    pub skip_steady_state: YesNo,
    /// System flow tolerance for steady state (%)
    pub sys_flow_tol: f64,
    /// Lateral flow tolerance for steady state (%)
    pub lat_flow_tol: f64,
    /// Simulation start date
    pub start_date: NaiveDate,
    /// Simulation start time of day
    pub start_time: NaiveTime,
    /// Simulation end date
    pub end_date: NaiveDate,
    /// Simulation end time of day
    pub end_time: NaiveTime,
    /// Date reporting begins
    pub report_start_date: NaiveDate,
    /// Time of day reporting begins
    pub report_start_time: NaiveTime,
    /// First day of street sweeping
    pub sweep_start: MonthDay,
    /// Last day of street sweeping
    pub sweep_end: MonthDay,
    /// Antecedent dry days
    pub dry_days: f64,
    /// Reporting time step
    pub report_step: NaiveTime,
    /// Runoff time step during wet periods
    pub wet_step: NaiveTime,
    /// Runoff time step during dry periods
    pub dry_step: NaiveTime,
    /// Routing time step (seconds)
    pub routing_step: f64,
    /// Conduit lengthening step (seconds, 0 disables)
    pub lengthening_step: f64,
    /// Variable step safety factor (0 disables)
    pub variable_step: f64,
    /// Smallest variable time step (seconds)
    pub minimum_step: f64,
    /// Inertial term handling
    pub inertial_damping: InertialDamping,
    /// Supercritical flow check
    pub normal_flow_limited: NormalFlowLimited,
    /// Surcharge method
    pub surcharge_method: SurchargeMethod,
    /// Minimum nodal surface area (0 uses the SWMM default)
    pub min_surfarea: f64,
    /// Minimum conduit slope (%)
    pub min_slope: f64,
    /// Maximum trials per time step
    pub max_trials: u32,
    /// Head convergence tolerance
    pub head_tolerance: f64,
    /// Parallel routing threads
    pub threads: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            flow_units: FlowUnits::default(),
            infiltration: InfiltrationMethod::default(),
            flow_routing: RoutingMethod::default(),
            link_offsets: LinkOffsets::default(),
            force_main_equation: ForceMainEquation::default(),
            ignore_rainfall: YesNo::No,
            ignore_snowmelt: YesNo::No,
            ignore_groundwater: YesNo::No,
            ignore_rdii: YesNo::No,
            ignore_routing: YesNo::No,
            ignore_quality: YesNo::No,
            allow_ponding: YesNo::No,
            skip_steady_state: YesNo::No,
            sys_flow_tol: 5.0,
            lat_flow_tol: 5.0,
            start_date: date(2004, 1, 1),
            start_time: clock(0, 0, 0),
            end_date: date(2004, 1, 1),
            end_time: clock(23, 59, 59),
            report_start_date: date(2004, 1, 1),
            report_start_time: clock(0, 0, 0),
            sweep_start: MonthDay { month: 1, day: 1 },
            sweep_end: MonthDay { month: 12, day: 31 },
            dry_days: 0.0,
            report_step: clock(0, 15, 0),
            wet_step: clock(0, 5, 0),
            dry_step: clock(1, 0, 0),
            routing_step: 20.0,
            lengthening_step: 0.0,
            variable_step: 0.0,
            minimum_step: 0.5,
            inertial_damping: InertialDamping::default(),
            normal_flow_limited: NormalFlowLimited::default(),
            surcharge_method: SurchargeMethod::default(),
            min_surfarea: 0.0,
            min_slope: 0.0,
            max_trials: 8,
            head_tolerance: 0.005,
            threads: 8,
        }
    }
}

impl Options {
    /// Options with the given units and methods, defaults elsewhere
    pub fn new(
        flow_units: FlowUnits,
        infiltration: InfiltrationMethod,
        flow_routing: RoutingMethod,
    ) -> Self {
        Self {
            flow_units,
            infiltration,
            flow_routing,
            ..Self::default()
        }
    }

    /// Simulation start as a timestamp
    pub fn start(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    /// Simulation end as a timestamp
    pub fn end(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }

    /// Reporting start as a timestamp
    pub fn report_start(&self) -> NaiveDateTime {
        self.report_start_date.and_time(self.report_start_time)
    }

    /// Option keyword / value pairs in output order
    ///
    /// Real-valued options always carry a decimal point (`20.0`).
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("FLOW_UNITS", self.flow_units.to_string()),
            ("INFILTRATION", self.infiltration.to_string()),
            ("FLOW_ROUTING", self.flow_routing.to_string()),
            ("LINK_OFFSETS", self.link_offsets.to_string()),
            ("FORCE_MAIN_EQUATION", self.force_main_equation.to_string()),
            ("IGNORE_RAINFALL", self.ignore_rainfall.to_string()),
            ("IGNORE_SNOWMELT", self.ignore_snowmelt.to_string()),
            ("IGNORE_GROUNDWATER", self.ignore_groundwater.to_string()),
            ("IGNORE_RDII", self.ignore_rdii.to_string()),
            ("IGNORE_ROUTING", self.ignore_routing.to_string()),
            ("IGNORE_QUALITY", self.ignore_quality.to_string()),
            ("ALLOW_PONDING", self.allow_ponding.to_string()),
            ("SKIP_STEADY_STATE", self.skip_steady_state.to_string()),
            ("SYS_FLOW_TOL", format!("{:?}", self.sys_flow_tol)),
            ("LAT_FLOW_TOL", format!("{:?}", self.lat_flow_tol)),
            ("START_DATE", format_date(&self.start_date)),
            ("START_TIME", format_clock(&self.start_time)),
            ("END_DATE", format_date(&self.end_date)),
            ("END_TIME", format_clock(&self.end_time)),
            ("REPORT_START_DATE", format_date(&self.report_start_date)),
            ("REPORT_START_TIME", format_clock(&self.report_start_time)),
            ("SWEEP_START", self.sweep_start.to_string()),
            ("SWEEP_END", self.sweep_end.to_string()),
            ("DRY_DAYS", format!("{:?}", self.dry_days)),
            ("REPORT_STEP", format_clock(&self.report_step)),
            ("WET_STEP", format_clock(&self.wet_step)),
            ("DRY_STEP", format_clock(&self.dry_step)),
            ("ROUTING_STEP", format!("{:?}", self.routing_step)),
            ("LENGTHENING_STEP", format!("{:?}", self.lengthening_step)),
            ("VARIABLE_STEP", format!("{:?}", self.variable_step)),
            ("MINIMUM_STEP", format!("{:?}", self.minimum_step)),
            ("INERTIAL_DAMPING", self.inertial_damping.to_string()),
            ("NORMAL_FLOW_LIMITED", self.normal_flow_limited.to_string()),
            ("SURCHARGE_METHOD", self.surcharge_method.to_string()),
            ("MIN_SURFAREA", format!("{:?}", self.min_surfarea)),
            ("MIN_SLOPE", format!("{:?}", self.min_slope)),
            ("MAX_TRIALS", self.max_trials.to_string()),
            ("HEAD_TOLERANCE", format!("{:?}", self.head_tolerance)),
            ("THREADS", self.threads.to_string()),
        ]
    }
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        if self.end() < self.start() {
            return Err(SwmmingError::validation(format!(
                "simulation ends ({}) before it starts ({})",
                self.end(),
                self.start()
            )));
        }
        if self.report_start() < self.start() {
            return Err(SwmmingError::validation(format!(
                "reporting starts ({}) before the simulation ({})",
                self.report_start(),
                self.start()
            )));
        }
        percentage("sys_flow_tol", self.sys_flow_tol)?;
        percentage("lat_flow_tol", self.lat_flow_tol)?;
        positive("routing_step", self.routing_step)?;
        positive("minimum_step", self.minimum_step)?;
        if self.report_step.num_seconds_from_midnight() == 0 {
            return Err(SwmmingError::invalid_value("report_step", "0:00:00"));
        }
        if self.threads == 0 {
            return Err(SwmmingError::invalid_value("threads", 0));
        }
        if self.max_trials == 0 {
            return Err(SwmmingError::invalid_value("max_trials", 0));
        }
        Ok(())
    }
}

impl SectionBlock for Options {
    const SECTION: &'static str = "[OPTIONS]";

    fn to_inp(&self) -> String {
        let mut out = String::from("[OPTIONS]\n;;Option             Value\n");
        for (key, value) in self.entries() {
            out.push_str(&format!("{:<20} {}\n", key, value));
        }
        out
    }
}

/// Which objects a report covers
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReportSelection {
    /// Every object of the kind
    All,
    /// No object of the kind
    #[default]
    None,
    /// Only the listed objects
    Some(Vec<String>),
}

impl ReportSelection {
    /// Select the given objects by name
    pub fn of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Some(names.into_iter().map(Into::into).collect())
    }

    /// Names listed explicitly, if any
    pub fn names(&self) -> &[String] {
        match self {
            Self::Some(names) => names,
            _ => &[],
        }
    }

    /// Lines for this selection under `key`
    fn lines(&self, key: &str) -> Vec<String> {
        match self {
            Self::All => vec![format!("{:<21} ALL", key)],
            Self::None => vec![format!("{:<21} NONE", key)],
            Self::Some(names) if names.is_empty() => vec![format!("{:<21} NONE", key)],
            Self::Some(names) => names
                .chunks(5)
                .map(|chunk| format!("{:<21} {}", key, chunk.join(" ")))
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SelectionRepr {
    Keyword(String),
    List(Vec<String>),
}

impl Serialize for ReportSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let repr = match self {
            Self::All => SelectionRepr::Keyword("ALL".to_string()),
            Self::None => SelectionRepr::Keyword("NONE".to_string()),
            Self::Some(names) => SelectionRepr::List(names.clone()),
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ReportSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match SelectionRepr::deserialize(deserializer)? {
            SelectionRepr::Keyword(k) => match k.to_uppercase().as_str() {
                "ALL" => Ok(Self::All),
                "NONE" => Ok(Self::None),
                _ => Err(serde::de::Error::custom(format!(
                    "expected ALL, NONE or a list of names, got '{}'",
                    k
                ))),
            },
            SelectionRepr::List(names) => Ok(Self::Some(names)),
        }
    }
}

/// Contents of the report file produced by SWMM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    /// Disable all reporting except errors and warnings
    pub disabled: YesNo,
    /// Echo a summary of the input data
    pub input: YesNo,
    /// Report continuity checks
    pub continuity: YesNo,
    /// Report summary flow statistics
    pub flowstats: YesNo,
    /// List control actions taken
    pub controls: YesNo,
    /// Subcatchments with detailed results
    pub subcatchments: ReportSelection,
    /// Nodes with detailed results
    pub nodes: ReportSelection,
    /// Links with detailed results
    pub links: ReportSelection,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            disabled: YesNo::No,
            input: YesNo::No,
            continuity: YesNo::Yes,
            flowstats: YesNo::Yes,
            controls: YesNo::No,
            subcatchments: ReportSelection::None,
            nodes: ReportSelection::None,
            links: ReportSelection::None,
        }
    }
}

impl Validate for Report {
    fn validate(&self) -> Result<()> {
        for selection in [&self.subcatchments, &self.nodes, &self.links] {
            for name in selection.names() {
                super::keyword::validate_name("Report", name)?;
            }
        }
        Ok(())
    }
}

impl SectionBlock for Report {
    const SECTION: &'static str = "[REPORT]";

    fn to_inp(&self) -> String {
        let mut lines = vec!["[REPORT]".to_string()];
        lines.push(format!("{:<21} {}", "DISABLED", self.disabled));
        lines.push(format!("{:<21} {}", "INPUT", self.input));
        lines.push(format!("{:<21} {}", "CONTINUITY", self.continuity));
        lines.push(format!("{:<21} {}", "FLOWSTATS", self.flowstats));
        lines.push(format!("{:<21} {}", "CONTROLS", self.controls));
        lines.extend(self.subcatchments.lines("SUBCATCHMENTS"));
        lines.extend(self.nodes.lines("NODES"));
        lines.extend(self.links.lines("LINKS"));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
