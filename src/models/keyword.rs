//! SWMM keyword enumerations
//!
//! Every option that SWMM spells as a fixed keyword (`CFS`, `DYNWAVE`,
//! `V-NOTCH`, ...) is modelled as a plain enum that renders as the keyword,
//! parses case-insensitively and serializes as the keyword.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SwmmingError};

/// Declare a keyword enum with `Display`, `FromStr` and serde support.
///
/// `Display` goes through [`fmt::Formatter::pad`] so column widths such as
/// `{:<10}` apply to the keyword.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $kw:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every accepted value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// SWMM keyword for this value
            pub fn keyword(&self) -> &'static str {
                match self {
                    $( Self::$variant => $kw ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(self.keyword())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::SwmmingError;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                let upper = s.trim().to_uppercase();
                match upper.as_str() {
                    $( $kw => Ok(Self::$variant), )+
                    _ => Err($crate::error::SwmmingError::invalid_value(
                        stringify!($name),
                        format!(
                            "'{}' (expected one of {})",
                            s,
                            [$($kw),+].join(", ")
                        ),
                    )),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.keyword())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use keyword_enum;

keyword_enum! {
    /// YES / NO switch used throughout the input file
    pub enum YesNo {
        /// YES
        Yes => "YES",
        /// NO
        No => "NO",
    }
}

impl Default for YesNo {
    fn default() -> Self {
        Self::No
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl YesNo {
    /// Whether this is `YES`
    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Something that can be written as a SWMM object name
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    lazy_static::lazy_static! {
        static ref NAME_RE: regex::Regex = regex::Regex::new(r"^[^\s;\[\x22][^\s\x22]*$").unwrap();
    }

    if name.is_empty() {
        return Err(SwmmingError::InvalidName {
            name: name.to_string(),
            reason: format!("{} name cannot be empty", kind),
        });
    }

    if !NAME_RE.is_match(name) {
        return Err(SwmmingError::InvalidName {
            name: name.to_string(),
            reason: format!(
                "{} names cannot contain whitespace or quotes, nor start with ';' or '['",
                kind
            ),
        });
    }

    Ok(())
}

/// File path as written in the input file, quoted when it holds whitespace
pub fn quote_path(path: &str) -> Cow<'_, str> {
    let quoted = path.len() >= 2 && path.starts_with('"') && path.ends_with('"');
    if !quoted && path.contains(char::is_whitespace) {
        Cow::Owned(format!("\"{}\"", path))
    } else {
        Cow::Borrowed(path)
    }
}

/// Fail when `path` is empty or holds a quote SWMM cannot read back
pub(crate) fn validate_path(owner: &str, path: &str) -> Result<()> {
    let inner = path
        .strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(path);
    if inner.trim().is_empty() {
        return Err(SwmmingError::validation(format!(
            "{} has an empty file path",
            owner
        )));
    }
    if inner.contains('"') {
        return Err(SwmmingError::invalid_value(
            "file path",
            format!("{} (quotes are not allowed inside the path)", path),
        ));
    }
    Ok(())
}

/// Fail when `value` is negative
pub(crate) fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        return Err(SwmmingError::invalid_value(field, format!("{} (must be >= 0)", value)));
    }
    Ok(())
}

/// Fail when `value` is not strictly positive
pub(crate) fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(SwmmingError::invalid_value(field, format!("{} (must be > 0)", value)));
    }
    Ok(())
}

/// Fail when `value` is not a percentage
pub(crate) fn percentage(field: &str, value: f64) -> Result<()> {
    if value.is_nan() || !(0.0..=100.0).contains(&value) {
        return Err(SwmmingError::invalid_value(
            field,
            format!("{} (must be within 0..=100)", value),
        ));
    }
    Ok(())
}

/// Fixed-size list of floats serialized as a plain array
///
/// Used for the monthly (12) and areal depletion (9) value lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Values<const N: usize>(pub [f64; N]);

impl<const N: usize> Values<N> {
    /// Every value set to `value`
    pub fn filled(value: f64) -> Self {
        Self([value; N])
    }

    /// Render each value as `{:<10.3}` and concatenate
    pub fn to_columns(&self) -> String {
        self.0.iter().map(|v| format!("{:<10.3}", v)).collect()
    }
}

impl<const N: usize> TryFrom<Vec<f64>> for Values<N> {
    type Error = SwmmingError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        let len = values.len();
        let array: [f64; N] = values.try_into().map_err(|_| {
            SwmmingError::validation(format!("expected {} values, got {}", N, len))
        })?;
        Ok(Self(array))
    }
}

impl<const N: usize> Serialize for Values<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.as_slice().serialize(serializer)
    }
}

impl<'de, const N: usize> Deserialize<'de> for Values<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Self::try_from(values).map_err(serde::de::Error::custom)
    }
}

impl<const N: usize> fmt::Display for Values<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_columns())
    }
}

/// Parse a keyword, mapping the error onto a field name
pub fn parse_keyword<T>(field: &str, value: &str) -> Result<T>
where
    T: FromStr<Err = SwmmingError>,
{
    value
        .parse()
        .map_err(|_| SwmmingError::invalid_value(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_no_roundtrip() {
        assert_eq!("yes".parse::<YesNo>().unwrap(), YesNo::Yes);
        assert_eq!(YesNo::from(false), YesNo::No);
        assert_eq!(format!("{:<5}|", YesNo::No), "NO   |");
    }

    #[test]
    fn test_unknown_keyword() {
        let err = "maybe".parse::<YesNo>().unwrap_err();
        assert!(err.to_string().contains("YES, NO"));
    }

    #[test]
    fn test_quote_path() {
        assert_eq!(quote_path("rain.dat"), "rain.dat");
        assert_eq!(quote_path("my rain.dat"), "\"my rain.dat\"");
        assert_eq!(quote_path("\"my rain.dat\""), "\"my rain.dat\"");

        assert!(validate_path("gage", "\"my rain.dat\"").is_ok());
        assert!(validate_path("gage", "\"\"").is_err());
        assert!(validate_path("gage", "my \"rain\".dat").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Junction", "J-1").is_ok());
        assert!(validate_name("Junction", "").is_err());
        assert!(validate_name("Junction", "J 1").is_err());
        assert!(validate_name("Junction", ";J1").is_err());
        assert!(validate_name("Junction", "[J1").is_err());
    }

    #[test]
    fn test_values_length() {
        assert!(Values::<12>::try_from(vec![0.1; 12]).is_ok());
        assert!(Values::<12>::try_from(vec![0.1; 11]).is_err());
        assert_eq!(Values::<2>::filled(1.0).to_columns(), "1.000     1.000     ");
    }
}
