//! Meteorology: rain gages, evaporation and temperature

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::header::format_date;
use super::keyword::{
    keyword_enum, non_negative, quote_path, validate_name, validate_path, Values, YesNo,
};
use super::section::{SectionBlock, TableRecord, Validate};
use super::tabular::{Pattern, Timeseries};
use crate::error::{Result, SwmmingError};

keyword_enum! {
    /// Form of recorded rainfall
    pub enum RainFormat {
        /// Rainfall rate
        Intensity => "INTENSITY",
        /// Depth over the recording interval
        Volume => "VOLUME",
        /// Cumulative depth since the start of the record
        Cumulative => "CUMULATIVE",
    }
}

keyword_enum! {
    /// Depth units of a rainfall file
    pub enum RainUnits {
        /// Inches
        In => "IN",
        /// Millimeters
        Mm => "MM",
    }
}

keyword_enum! {
    /// Temperature units of a climate file
    pub enum TemperatureUnits {
        /// Degrees Celsius
        C => "C",
        /// Degrees Fahrenheit
        F => "F",
        /// Tenths of a degree Celsius (GHCN files)
        C10 => "C10",
    }
}

impl Default for TemperatureUnits {
    fn default() -> Self {
        Self::C10
    }
}

/// Where a rain gage reads its data from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RaingageSource {
    /// A `[TIMESERIES]` entry
    Timeseries {
        /// Time series name
        name: String,
    },
    /// An external rainfall file
    File {
        /// File path, written quoted when it contains whitespace
        path: String,
        /// Recording station in the file
        station: String,
        /// Depth units of the file
        units: RainUnits,
    },
}

impl RaingageSource {
    /// Read rainfall from a time series
    pub fn timeseries(ts: &Timeseries) -> Self {
        Self::Timeseries {
            name: ts.name.clone(),
        }
    }

    /// Read rainfall from an external file
    pub fn file(path: impl Into<String>, station: impl Into<String>, units: RainUnits) -> Self {
        Self::File {
            path: path.into(),
            station: station.into(),
            units,
        }
    }
}

/// A rain gage providing rainfall for subcatchments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raingage {
    /// Gage name
    pub name: String,
    /// Form of recorded rainfall
    pub form: RainFormat,
    /// Recording interval, decimal hours or `H:MM`
    pub interval: String,
    /// Snow catch deficiency correction factor
    #[serde(default = "default_scf")]
    pub scf: f64,
    /// Data source
    pub source: RaingageSource,
}

fn default_scf() -> f64 {
    1.0
}

impl Raingage {
    /// Create a rain gage with no snow catch correction
    pub fn new(
        name: impl Into<String>,
        form: RainFormat,
        interval: impl Into<String>,
        source: RaingageSource,
    ) -> Self {
        Self {
            name: name.into(),
            form,
            interval: interval.into(),
            scf: default_scf(),
            source,
        }
    }

    /// Name of the time series this gage reads, if any
    pub fn timeseries(&self) -> Option<&str> {
        match &self.source {
            RaingageSource::Timeseries { name } => Some(name),
            RaingageSource::File { .. } => None,
        }
    }
}

/// Check a recording interval: decimal hours or `H:MM`
pub fn validate_interval(interval: &str) -> Result<()> {
    lazy_static::lazy_static! {
        static ref INTERVAL_RE: regex::Regex =
            regex::Regex::new(r"^(\d+(\.\d+)?|\d+:[0-5]\d)$").unwrap();
    }

    if !INTERVAL_RE.is_match(interval) {
        return Err(SwmmingError::invalid_value(
            "interval",
            format!("'{}' (expected decimal hours or H:MM)", interval),
        ));
    }
    Ok(())
}

impl Validate for Raingage {
    fn validate(&self) -> Result<()> {
        validate_name("Raingage", &self.name)?;
        validate_interval(&self.interval)?;
        non_negative("scf", self.scf)?;
        match &self.source {
            RaingageSource::Timeseries { name } => validate_name("Timeseries", name),
            RaingageSource::File { path, station, .. } => {
                validate_path(&format!("rain gage '{}'", self.name), path)?;
                validate_name("Station", station)
            }
        }
    }
}

impl TableRecord for Raingage {
    const HEADER: &'static str = "[RAINGAGES]\n\
        ;;Name           Format    Interval  SCF    Source    \n\
        ;;-------------- --------- --------- ------ ----------\n";

    fn to_inp(&self) -> String {
        let head = format!(
            "{:<16} {:<9} {:<9} {:<6.2}",
            self.name, self.form, self.interval, self.scf
        );
        match &self.source {
            RaingageSource::Timeseries { name } => format!("{} TIMESERIES {} ", head, name),
            RaingageSource::File {
                path,
                station,
                units,
            } => format!(
                "{} FILE {} {:<10} {:<10}",
                head,
                quote_path(path),
                station,
                units
            ),
        }
    }
}

/// How daily potential evaporation varies with time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaporationSource {
    /// A constant rate
    Constant {
        /// Rate (in/day or mm/day)
        rate: f64,
    },
    /// One average rate per month
    Monthly {
        /// Rates for January to December
        rates: Values<12>,
    },
    /// Rates from a `[TIMESERIES]` entry
    Timeseries {
        /// Time series name
        name: String,
    },
    /// Computed from the temperatures of the climate file
    Temperature,
    /// Read from the climate file
    File {
        /// Optional monthly pan coefficients
        #[serde(default)]
        pan_coefficients: Option<Values<12>>,
    },
}

impl EvaporationSource {
    /// Section keyword for this source
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "CONSTANT",
            Self::Monthly { .. } => "MONTHLY",
            Self::Timeseries { .. } => "TIMESERIES",
            Self::Temperature => "TEMPERATURE",
            Self::File { .. } => "FILE",
        }
    }

    fn parameters(&self) -> String {
        match self {
            Self::Constant { rate } => rate.to_string(),
            Self::Monthly { rates } => rates.to_columns(),
            Self::Timeseries { name } => name.clone(),
            Self::Temperature => String::new(),
            Self::File { pan_coefficients } => pan_coefficients
                .as_ref()
                .map(Values::to_columns)
                .unwrap_or_default(),
        }
    }
}

/// Evaporation settings for the study area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaporation {
    /// Evaporation data source
    pub source: EvaporationSource,
    /// Monthly pattern modifying infiltration recovery during dry periods
    #[serde(default)]
    pub recovery: Option<String>,
    /// Evaporate only when there is no precipitation
    #[serde(default)]
    pub dry_only: YesNo,
}

impl Evaporation {
    /// Create evaporation settings with no recovery pattern
    pub fn new(source: EvaporationSource) -> Self {
        Self {
            source,
            recovery: None,
            dry_only: YesNo::No,
        }
    }

    /// Modify recovery rates with a monthly pattern
    pub fn with_recovery(mut self, pattern: &Pattern) -> Self {
        self.recovery = Some(pattern.name.clone());
        self
    }

    /// Name of the time series this section reads, if any
    pub fn timeseries(&self) -> Option<&str> {
        match &self.source {
            EvaporationSource::Timeseries { name } => Some(name),
            _ => None,
        }
    }
}

impl Validate for Evaporation {
    fn validate(&self) -> Result<()> {
        match &self.source {
            EvaporationSource::Constant { rate } => non_negative("evaporation rate", *rate)?,
            EvaporationSource::Monthly { rates } => {
                for rate in rates.0 {
                    non_negative("monthly evaporation rate", rate)?;
                }
            }
            EvaporationSource::Timeseries { name } => validate_name("Timeseries", name)?,
            EvaporationSource::Temperature | EvaporationSource::File { .. } => {}
        }
        if let Some(pattern) = &self.recovery {
            validate_name("Pattern", pattern)?;
        }
        Ok(())
    }
}

impl SectionBlock for Evaporation {
    const SECTION: &'static str = "[EVAPORATION]";

    fn to_inp(&self) -> String {
        let mut out = String::from(
            "[EVAPORATION]\n\
             ;;Data Source    Parameters\n\
             ;;-------------- ----------------\n",
        );
        out.push_str(&format!(
            "{:<16} {}\n",
            self.source.keyword(),
            self.source.parameters()
        ));
        out.push_str(&format!("DRY_ONLY         {:<16}\n", self.dry_only));
        if let Some(pattern) = &self.recovery {
            out.push_str(&format!("RECOVERY         {:<16}\n", pattern));
        }
        out
    }
}

/// Source of daily air temperatures
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemperatureSource {
    /// Constant 70 degrees F
    #[default]
    None,
    /// A `[TIMESERIES]` entry
    Timeseries {
        /// Time series name
        name: String,
    },
    /// An external climate file
    File {
        /// File path
        path: String,
        /// Date to start reading from (start of file when unset)
        #[serde(default)]
        start: Option<NaiveDate>,
        /// Temperature units of the file
        #[serde(default)]
        units: TemperatureUnits,
    },
}

/// Source of monthly wind speeds
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindSpeed {
    /// Wind speed is zero
    #[default]
    None,
    /// Average wind speed per month
    Monthly {
        /// Speeds for January to December
        speeds: Values<12>,
    },
    /// Read from the climate file
    File,
}

/// Parameters of the snowmelt computations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowmeltParams {
    /// Air temperature at which precipitation falls as snow
    pub stemp: f64,
    /// Antecedent temperature index weight
    #[serde(default = "SnowmeltParams::default_ati_wt")]
    pub ati_wt: f64,
    /// Negative melt ratio
    #[serde(default = "SnowmeltParams::default_rnm")]
    pub rnm: f64,
    /// Average elevation of the study area
    #[serde(default)]
    pub elev: f64,
    /// Latitude in degrees North
    #[serde(default = "SnowmeltParams::default_lat")]
    pub lat: f64,
    /// Minutes between true solar time and clock time
    #[serde(default)]
    pub dt_long: f64,
}

impl SnowmeltParams {
    fn default_ati_wt() -> f64 {
        0.5
    }

    fn default_rnm() -> f64 {
        0.6
    }

    fn default_lat() -> f64 {
        50.0
    }

    /// Snowmelt parameters with default weights for the given snow temperature
    pub fn new(stemp: f64) -> Self {
        Self {
            stemp,
            ati_wt: Self::default_ati_wt(),
            rnm: Self::default_rnm(),
            elev: 0.0,
            lat: Self::default_lat(),
            dt_long: 0.0,
        }
    }
}

impl Validate for SnowmeltParams {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.ati_wt) {
            return Err(SwmmingError::invalid_value("ati_wt", self.ati_wt));
        }
        non_negative("rnm", self.rnm)?;
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(SwmmingError::invalid_value("lat", self.lat));
        }
        Ok(())
    }
}

fn full_cover() -> Values<9> {
    Values::filled(1.0)
}

/// Air temperature, wind speed and snowmelt settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    /// Daily air temperature source
    #[serde(default)]
    pub source: TemperatureSource,
    /// Monthly wind speed source
    #[serde(default)]
    pub windspeed: WindSpeed,
    /// Snowmelt parameters
    #[serde(default)]
    pub snowmelt: Option<SnowmeltParams>,
    /// Areal depletion curve for impervious areas
    #[serde(default = "full_cover")]
    pub adc_impervious: Values<9>,
    /// Areal depletion curve for pervious areas
    #[serde(default = "full_cover")]
    pub adc_pervious: Values<9>,
}

impl Default for Temperature {
    fn default() -> Self {
        Self {
            source: TemperatureSource::None,
            windspeed: WindSpeed::None,
            snowmelt: None,
            adc_impervious: full_cover(),
            adc_pervious: full_cover(),
        }
    }
}

impl Temperature {
    /// Name of the time series this section reads, if any
    pub fn timeseries(&self) -> Option<&str> {
        match &self.source {
            TemperatureSource::Timeseries { name } => Some(name),
            _ => None,
        }
    }
}

impl Validate for Temperature {
    fn validate(&self) -> Result<()> {
        match &self.source {
            TemperatureSource::Timeseries { name } => validate_name("Timeseries", name)?,
            TemperatureSource::File { path, .. } => validate_path("climate file", path)?,
            _ => {}
        }
        if let WindSpeed::Monthly { speeds } = &self.windspeed {
            for speed in speeds.0 {
                non_negative("windspeed", speed)?;
            }
        }
        if let Some(snowmelt) = &self.snowmelt {
            snowmelt.validate()?;
        }
        for fraction in self.adc_impervious.0.iter().chain(self.adc_pervious.0.iter()) {
            if !(0.0..=1.0).contains(fraction) {
                return Err(SwmmingError::invalid_value("areal depletion", fraction));
            }
        }
        Ok(())
    }
}

impl SectionBlock for Temperature {
    const SECTION: &'static str = "[TEMPERATURE]";

    fn to_inp(&self) -> String {
        let mut out = String::from(
            "[TEMPERATURE]\n\
             ;;Data Element   Values\n\
             ;;-------------- ----------------\n",
        );

        match &self.source {
            TemperatureSource::None => {}
            TemperatureSource::Timeseries { name } => {
                out.push_str(&format!("{:<16} {}\n", "TIMESERIES", name));
            }
            TemperatureSource::File { path, start, units } => {
                let start = start.as_ref().map(format_date).unwrap_or_else(|| "*".into());
                out.push_str(&format!(
                    "{:<16} {} {} {}\n",
                    "FILE",
                    quote_path(path),
                    start,
                    units
                ));
            }
        }

        match &self.windspeed {
            WindSpeed::None => {}
            WindSpeed::Monthly { speeds } => {
                out.push_str(&format!(
                    "{:<16} MONTHLY {}\n",
                    "WINDSPEED",
                    speeds.to_columns()
                ));
            }
            WindSpeed::File => out.push_str(&format!("{:<16} FILE\n", "WINDSPEED")),
        }

        if let Some(s) = &self.snowmelt {
            out.push_str(&format!(
                "{:<16} {:<10.2} {:<10.2} {:<10.2} {:<10.2} {:<10.2} {:<10.2}\n",
                "SNOWMELT", s.stemp, s.ati_wt, s.rnm, s.elev, s.lat, s.dt_long
            ));
            out.push_str(&format!(
                "{:<16} IMPERVIOUS {}\n",
                "ADC",
                self.adc_impervious.to_columns()
            ));
            out.push_str(&format!(
                "{:<16} PERVIOUS   {}\n",
                "ADC",
                self.adc_pervious.to_columns()
            ));
        }

        out
    }
}
