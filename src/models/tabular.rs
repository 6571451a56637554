//! Tabular data: time series, curves and time patterns

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::header::format_date;
use super::keyword::{keyword_enum, quote_path, validate_name, validate_path};
use super::section::{TableRecord, Validate};
use crate::error::{Result, SwmmingError};

/// Width of a wrapped description line, excluding the `; ` prefix
const DESCRIPTION_WIDTH: usize = 48;

/// Greedy word wrap; words longer than `width` are split across lines
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut rest: Vec<char> = word.chars().collect();
        loop {
            let sep = usize::from(line_len > 0);
            if line_len + sep + rest.len() <= width {
                if sep == 1 {
                    line.push(' ');
                }
                line.extend(rest.iter());
                line_len += sep + rest.len();
                break;
            }

            if rest.len() > width {
                let take = width.saturating_sub(line_len + sep);
                if take > 0 {
                    if sep == 1 {
                        line.push(' ');
                    }
                    line.extend(rest.drain(..take));
                }
            }

            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// Time series values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeseriesData {
    /// Values listed inline
    Points {
        /// Date the times are relative to (simulation start when unset)
        #[serde(default)]
        date: Option<NaiveDate>,
        /// Decimal hours since `date`
        times: Vec<f64>,
        /// Value at each time
        values: Vec<f64>,
    },
    /// Values read from an external file
    File {
        /// File path, written quoted when it contains whitespace
        path: String,
    },
}

/// How a quantity varies over time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeseries {
    /// Series name
    pub name: String,
    /// Free text written as comment lines above the data
    #[serde(default)]
    pub description: String,
    /// Series values
    pub data: TimeseriesData,
}

impl Timeseries {
    /// Create an inline time series
    pub fn new(
        name: impl Into<String>,
        date: Option<NaiveDate>,
        times: Vec<f64>,
        values: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            data: TimeseriesData::Points {
                date,
                times,
                values,
            },
        }
    }

    /// Create a time series backed by an external file
    pub fn from_file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            data: TimeseriesData::File { path: path.into() },
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn description_lines(&self) -> Vec<String> {
        let chunks = wrap_text(&self.description, DESCRIPTION_WIDTH);
        if chunks.is_empty() {
            return vec![format!("{:<49}", ";")];
        }
        chunks
            .into_iter()
            .map(|chunk| format!("; {:<47}", chunk))
            .collect()
    }
}

impl Validate for Timeseries {
    fn validate(&self) -> Result<()> {
        validate_name("Timeseries", &self.name)?;
        match &self.data {
            TimeseriesData::Points { times, values, .. } => {
                if times.len() != values.len() {
                    return Err(SwmmingError::validation(format!(
                        "time series '{}' has {} times but {} values",
                        self.name,
                        times.len(),
                        values.len()
                    )));
                }
                if times.is_empty() {
                    return Err(SwmmingError::validation(format!(
                        "time series '{}' has no values",
                        self.name
                    )));
                }
                if times.windows(2).any(|w| w[1] < w[0]) {
                    return Err(SwmmingError::validation(format!(
                        "times of time series '{}' must not decrease",
                        self.name
                    )));
                }
                Ok(())
            }
            TimeseriesData::File { path } => {
                validate_path(&format!("time series '{}'", self.name), path)
            }
        }
    }
}

impl TableRecord for Timeseries {
    const HEADER: &'static str = "[TIMESERIES]\n\
        ;;Name           Date       Time       Value     \n\
        ;;-------------- ---------- ---------- ----------\n";

    fn to_inp(&self) -> String {
        let mut lines = self.description_lines();

        match &self.data {
            TimeseriesData::Points {
                date,
                times,
                values,
            } => {
                let mut date = date.as_ref().map(format_date).unwrap_or_default();
                for (t, v) in times.iter().zip(values) {
                    lines.push(format!(
                        "{:<16} {:<10} {:<10.2} {:<10.3}",
                        self.name, date, t, v
                    ));
                    date.clear();
                }
            }
            TimeseriesData::File { path } => {
                lines.push(format!("{:<16} FILE {}", self.name, quote_path(path)));
            }
        }

        lines.join("\n")
    }
}

keyword_enum! {
    /// What a curve relates
    pub enum CurveKind {
        /// Surface area vs depth of a storage unit
        Storage => "STORAGE",
        /// Width vs height of a custom cross section
        Shape => "SHAPE",
        /// Diverted flow vs inflow of a divider or inlet
        Diversion => "DIVERSION",
        /// Water stage vs hour of day at an outfall
        Tidal => "TIDAL",
        /// Flow vs wet well volume
        Pump1 => "PUMP1",
        /// Flow vs depth, stepwise
        Pump2 => "PUMP2",
        /// Flow vs head
        Pump3 => "PUMP3",
        /// Flow vs depth, continuous
        Pump4 => "PUMP4",
        /// Head vs flow at nominal speed
        Pump5 => "PUMP5",
        /// Outflow vs head or depth
        Rating => "RATING",
        /// Control setting vs controller variable
        Control => "CONTROL",
        /// Discharge coefficient vs head
        Weir => "WEIR",
    }
}

impl CurveKind {
    /// Whether a pump can use this curve
    pub fn is_pump(&self) -> bool {
        matches!(
            self,
            Self::Pump1 | Self::Pump2 | Self::Pump3 | Self::Pump4 | Self::Pump5
        )
    }
}

/// A relationship between two quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Curve name
    pub name: String,
    /// What the curve relates
    pub kind: CurveKind,
    /// `(x, y)` pairs
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    /// Create a curve
    pub fn new(name: impl Into<String>, kind: CurveKind, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            kind,
            points,
        }
    }
}

impl Validate for Curve {
    fn validate(&self) -> Result<()> {
        validate_name("Curve", &self.name)?;
        if self.points.is_empty() {
            return Err(SwmmingError::validation(format!(
                "curve '{}' has no points",
                self.name
            )));
        }
        if self.points.windows(2).any(|w| w[1].0 < w[0].0) {
            return Err(SwmmingError::validation(format!(
                "x values of curve '{}' must not decrease",
                self.name
            )));
        }
        Ok(())
    }
}

impl TableRecord for Curve {
    const HEADER: &'static str = "[CURVES]\n\
        ;;Name           Type       X-Value    Y-Value   \n\
        ;;-------------- ---------- ---------- ----------\n";

    fn to_inp(&self) -> String {
        let mut kind = self.kind.keyword();
        self.points
            .iter()
            .map(|(x, y)| {
                let line = format!("{:<16} {:<10} {:<10.3} {:<10.3}", self.name, kind, x, y);
                kind = "";
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

keyword_enum! {
    /// Time period a pattern's factors cover
    pub enum PatternKind {
        /// One factor per month
        Monthly => "MONTHLY",
        /// One factor per day of the week, starting on Sunday
        Daily => "DAILY",
        /// One factor per hour of weekdays
        Hourly => "HOURLY",
        /// One factor per hour of weekend days
        Weekend => "WEEKEND",
    }
}

impl PatternKind {
    /// Number of factors this kind of pattern needs
    pub fn factor_count(&self) -> usize {
        match self {
            Self::Monthly => 12,
            Self::Daily => 7,
            Self::Hourly | Self::Weekend => 24,
        }
    }
}

/// Periodic multipliers applied to a base value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Pattern name
    pub name: String,
    /// Period covered
    pub kind: PatternKind,
    /// Multipliers
    pub factors: Vec<f64>,
}

impl Pattern {
    /// Create a pattern
    pub fn new(name: impl Into<String>, kind: PatternKind, factors: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind,
            factors,
        }
    }
}

impl Validate for Pattern {
    fn validate(&self) -> Result<()> {
        validate_name("Pattern", &self.name)?;
        if self.factors.len() != self.kind.factor_count() {
            return Err(SwmmingError::validation(format!(
                "{} pattern '{}' needs {} factors, got {}",
                self.kind,
                self.name,
                self.kind.factor_count(),
                self.factors.len()
            )));
        }
        Ok(())
    }
}

impl TableRecord for Pattern {
    const HEADER: &'static str = "[PATTERNS]\n\
        ;;Name           Type       Multipliers\n\
        ;;-------------- ---------- -----------\n";

    fn to_inp(&self) -> String {
        let mut kind = self.kind.keyword();
        self.factors
            .chunks(6)
            .map(|chunk| {
                let columns: Vec<String> = chunk.iter().map(|f| format!("{:<8.3}", f)).collect();
                let line = format!("{:<16} {:<10} {}", self.name, kind, columns.join(" "));
                kind = "";
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::section::section_to_string;

    fn jan_first() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2022, 1, 1)
    }

    #[test]
    fn test_timeseries_section() {
        let ts1 = Timeseries::new(
            "timeseries1",
            jan_first(),
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0, 0.5, 1.0, 0.15],
        )
        .with_description("A short description of timeseries1");
        let ts2 = Timeseries::new(
            "timeseries2",
            jan_first(),
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0; 4],
        );
        let ts3 = Timeseries::new(
            "timeseries3",
            jan_first(),
            vec![0.0, 1.0, 2.0],
            vec![10.0, 20.0, 50.0],
        )
        .with_description("A loong description ".repeat(5));

        assert_eq!(
            section_to_string(&[ts1, ts2, ts3]),
            "[TIMESERIES]\n\
             ;;Name           Date       Time       Value     \n\
             ;;-------------- ---------- ---------- ----------\n\
             ; A short description of timeseries1             \n\
             timeseries1      1/1/2022   0.00       0.000     \n\
             timeseries1                 1.00       0.500     \n\
             timeseries1                 2.00       1.000     \n\
             timeseries1                 3.00       0.150     \n\
             ;                                                \n\
             timeseries2      1/1/2022   0.00       0.000     \n\
             timeseries2                 1.00       0.000     \n\
             timeseries2                 2.00       0.000     \n\
             timeseries2                 3.00       0.000     \n\
             ; A loong description A loong description A loong\n\
             ; description A loong description A loong        \n\
             ; description                                    \n\
             timeseries3      1/1/2022   0.00       10.000    \n\
             timeseries3                 1.00       20.000    \n\
             timeseries3                 2.00       50.000    \n"
        );
    }

    #[test]
    fn test_timeseries_validation() {
        let ts = Timeseries::new("ts", None, vec![0.0, 1.0], vec![1.0]);
        assert!(ts.validate().is_err());

        let ts = Timeseries::new("ts", None, vec![1.0, 0.0], vec![1.0, 2.0]);
        assert!(ts.validate().is_err());

        let ts = Timeseries::from_file("ts", "\"rain data.dat\"");
        assert!(ts.validate().is_ok());
        assert_eq!(ts.to_inp().lines().last(), Some("ts               FILE \"rain data.dat\""));

        let ts = Timeseries::from_file("ts", "");
        assert!(ts.validate().is_err());
    }

    #[test]
    fn test_timeseries_file_with_spaces() {
        let ts = Timeseries::from_file("ts", "rain data.dat");
        assert!(ts.validate().is_ok());
        assert_eq!(
            ts.to_inp().lines().last(),
            Some("ts               FILE \"rain data.dat\"")
        );

        let ts = Timeseries::from_file("ts", "rain\"data.dat");
        assert!(ts.validate().is_err());
    }

    #[test]
    fn test_wrap_long_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("ab cdefgh", 4), vec!["ab c", "defg", "h"]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_curve_rows() {
        let curve = Curve::new("pump_curve", CurveKind::Pump3, vec![(0.0, 5.0), (2.5, 1.0)]);
        assert!(curve.validate().is_ok());
        assert!(curve.kind.is_pump());
        assert_eq!(
            curve.to_inp(),
            "pump_curve       PUMP3      0.000      5.000     \n\
             pump_curve                  2.500      1.000     "
        );

        let curve = Curve::new("bad", CurveKind::Rating, vec![(1.0, 0.0), (0.5, 1.0)]);
        assert!(curve.validate().is_err());
    }

    #[test]
    fn test_pattern_rows() {
        let pattern = Pattern::new("daily", PatternKind::Daily, vec![1.0; 7]);
        assert!(pattern.validate().is_ok());

        let text = pattern.to_inp();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("daily            DAILY      1.000    1.000"));
        assert_eq!(lines[1], "daily                       1.000   ");

        let short = Pattern::new("monthly", PatternKind::Monthly, vec![1.0; 7]);
        assert!(short.validate().is_err());
    }
}
