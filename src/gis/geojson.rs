//! GeoJSON (RFC 7946) documents

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SwmmingError};

/// A position as `[x, y]` or `[x, y, z]`
pub type Position = Vec<f64>;

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    /// A collection of features
    FeatureCollection {
        /// Features of the collection
        features: Vec<Feature>,
    },
    /// A single feature
    Feature(Feature),
}

/// A geometry with its properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Geometry; unlocated features carry `null`
    pub geometry: Option<Geometry>,
    /// Free-form properties
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

/// Supported geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
#[allow(missing_docs)]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// Geometry type name
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

impl GeoJson {
    /// Parse a GeoJSON document
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a GeoJSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SwmmingError::file_not_found(path));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| SwmmingError::geo(format!("{}: {}", path.display(), e)))
    }

    /// Features of the document
    pub fn into_features(self) -> Vec<Feature> {
        match self {
            GeoJson::FeatureCollection { features } => features,
            GeoJson::Feature(feature) => vec![feature],
        }
    }
}

impl Feature {
    /// Look up a property, treating JSON `null` as absent
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties
            .as_ref()
            .and_then(|props| props.get(key))
            .filter(|value| !value.is_null())
    }

    /// A property rendered as text; numbers are accepted as names
    pub fn text(&self, key: &str) -> Result<Option<String>> {
        match self.property(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(SwmmingError::geo(format!(
                "Property '{}' must be a string, got {}",
                key, other
            ))),
        }
    }

    /// A numeric property; numeric strings are accepted
    pub fn number(&self, key: &str) -> Result<Option<f64>> {
        let value = match self.property(key) {
            None => return Ok(None),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(_) => None,
        };
        value
            .filter(|v: &f64| v.is_finite())
            .map(Some)
            .ok_or_else(|| SwmmingError::geo(format!("Property '{}' is not a number", key)))
    }
}

/// `(x, y)` of a position
pub fn xy(position: &[f64]) -> Result<(f64, f64)> {
    match position {
        [x, y, ..] if x.is_finite() && y.is_finite() => Ok((*x, *y)),
        _ => Err(SwmmingError::geo(format!(
            "Invalid position {:?}: expected finite [x, y]",
            position
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collection() {
        let doc = GeoJson::parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [1.0, 2.0, 3.5]},
                        "properties": {"name": "j1", "elevation": "3.5"}
                    },
                    {
                        "type": "Feature",
                        "geometry": null,
                        "properties": null
                    }
                ]
            }"#,
        )
        .unwrap();

        let features = doc.into_features();
        assert_eq!(features.len(), 2);
        assert_eq!(
            features[0].geometry,
            Some(Geometry::Point(vec![1.0, 2.0, 3.5]))
        );
        assert_eq!(features[0].text("name").unwrap(), Some("j1".to_string()));
        assert_eq!(features[0].number("elevation").unwrap(), Some(3.5));
        assert_eq!(features[1].text("name").unwrap(), None);
    }

    #[test]
    fn test_single_feature() {
        let doc = GeoJson::parse(
            r#"{"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}, "properties": {"name": 12}}"#,
        )
        .unwrap();
        let features = doc.into_features();
        assert_eq!(features[0].text("name").unwrap(), Some("12".to_string()));
        assert_eq!(features[0].geometry.as_ref().map(Geometry::kind), Some("LineString"));
    }

    #[test]
    fn test_invalid_properties() {
        let doc = GeoJson::parse(
            r#"{"type": "Feature", "geometry": null, "properties": {"elevation": "high", "name": [1]}}"#,
        )
        .unwrap();
        let feature = &doc.into_features()[0];
        assert!(matches!(feature.number("elevation"), Err(SwmmingError::Geo(_))));
        assert!(feature.text("name").is_err());
        assert!(xy(&[1.0]).is_err());
        assert_eq!(xy(&[1.0, 2.0, 9.0]).unwrap(), (1.0, 2.0));
    }

    #[test]
    fn test_unknown_geometry_rejected() {
        assert!(GeoJson::parse(
            r#"{"type": "Feature", "geometry": {"type": "Circle", "coordinates": [0, 0]}, "properties": {}}"#
        )
        .is_err());
    }
}
