//! Cross section shapes and their geometry parameters

use serde::{Deserialize, Serialize};

use super::keyword::{positive, validate_name};
use super::section::Validate;
use crate::error::{Result, SwmmingError};

/// Shape of a link's cross section
///
/// Dimensions are in ft or m. Shapes that SWMM describes by height only
/// carry a single `height`.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shape {
    /// Full circle
    Circular { diameter: f64 },
    /// Pressurised circular pipe
    ForceMain {
        diameter: f64,
        /// Hazen-Williams C or Darcy-Weisbach roughness height
        roughness: f64,
    },
    /// Circle partly filled with sediment
    FilledCircular { diameter: f64, sediment_depth: f64 },
    /// Closed rectangle
    RectClosed { height: f64, width: f64 },
    /// Open rectangle
    RectOpen { height: f64, width: f64 },
    /// Open trapezoid; side slopes are horizontal over vertical
    Trapezoidal {
        height: f64,
        base_width: f64,
        left_slope: f64,
        right_slope: f64,
    },
    /// Open triangle
    Triangular { height: f64, top_width: f64 },
    /// Horizontal ellipse
    HorizEllipse { height: f64, width: f64 },
    /// Vertical ellipse
    VertEllipse { height: f64, width: f64 },
    /// Arch
    Arch { height: f64, width: f64 },
    /// Open parabola
    Parabolic { height: f64, top_width: f64 },
    /// Open power function
    Power {
        height: f64,
        top_width: f64,
        exponent: f64,
    },
    /// Rectangle over a triangular bottom
    RectTriangular {
        height: f64,
        top_width: f64,
        triangle_height: f64,
    },
    /// Rectangle over a round bottom
    RectRound {
        height: f64,
        top_width: f64,
        bottom_radius: f64,
    },
    /// Modified basket handle
    #[serde(rename = "MODBASKETHANDLE")]
    ModBasketHandle {
        height: f64,
        bottom_width: f64,
        top_radius: f64,
    },
    /// Egg
    Egg { height: f64 },
    /// Horseshoe
    Horseshoe { height: f64 },
    /// Gothic
    Gothic { height: f64 },
    /// Catenary
    Catenary { height: f64 },
    /// Semi-elliptical
    #[serde(rename = "SEMIELLIPTICAL")]
    SemiElliptical { height: f64 },
    /// Basket handle
    #[serde(rename = "BASKETHANDLE")]
    BasketHandle { height: f64 },
    /// Semi-circular
    #[serde(rename = "SEMICIRCULAR")]
    SemiCircular { height: f64 },
    /// No geometry; the link only passes flow
    Dummy,
    /// Closed shape described by a shape curve
    Custom { height: f64, curve: String },
    /// Natural channel described by a transect
    Irregular { transect: String },
    /// Street described by a street section
    Street { street: String },
}

impl Shape {
    /// SWMM keyword of the shape
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Circular { .. } => "CIRCULAR",
            Self::ForceMain { .. } => "FORCE_MAIN",
            Self::FilledCircular { .. } => "FILLED_CIRCULAR",
            Self::RectClosed { .. } => "RECT_CLOSED",
            Self::RectOpen { .. } => "RECT_OPEN",
            Self::Trapezoidal { .. } => "TRAPEZOIDAL",
            Self::Triangular { .. } => "TRIANGULAR",
            Self::HorizEllipse { .. } => "HORIZ_ELLIPSE",
            Self::VertEllipse { .. } => "VERT_ELLIPSE",
            Self::Arch { .. } => "ARCH",
            Self::Parabolic { .. } => "PARABOLIC",
            Self::Power { .. } => "POWER",
            Self::RectTriangular { .. } => "RECT_TRIANGULAR",
            Self::RectRound { .. } => "RECT_ROUND",
            Self::ModBasketHandle { .. } => "MODBASKETHANDLE",
            Self::Egg { .. } => "EGG",
            Self::Horseshoe { .. } => "HORSESHOE",
            Self::Gothic { .. } => "GOTHIC",
            Self::Catenary { .. } => "CATENARY",
            Self::SemiElliptical { .. } => "SEMIELLIPTICAL",
            Self::BasketHandle { .. } => "BASKETHANDLE",
            Self::SemiCircular { .. } => "SEMICIRCULAR",
            Self::Dummy => "DUMMY",
            Self::Custom { .. } => "CUSTOM",
            Self::Irregular { .. } => "IRREGULAR",
            Self::Street { .. } => "STREET",
        }
    }

    /// `Geom1..Geom4` of a parametric shape; `None` for shapes that
    /// reference another section
    pub fn geometry(&self) -> Option<[f64; 4]> {
        let geom = match *self {
            Self::Circular { diameter } => [diameter, 0.0, 0.0, 0.0],
            Self::ForceMain {
                diameter,
                roughness,
            } => [diameter, roughness, 0.0, 0.0],
            Self::FilledCircular {
                diameter,
                sediment_depth,
            } => [diameter, sediment_depth, 0.0, 0.0],
            Self::RectClosed { height, width }
            | Self::RectOpen { height, width }
            | Self::HorizEllipse { height, width }
            | Self::VertEllipse { height, width }
            | Self::Arch { height, width } => [height, width, 0.0, 0.0],
            Self::Trapezoidal {
                height,
                base_width,
                left_slope,
                right_slope,
            } => [height, base_width, left_slope, right_slope],
            Self::Triangular { height, top_width } | Self::Parabolic { height, top_width } => {
                [height, top_width, 0.0, 0.0]
            }
            Self::Power {
                height,
                top_width,
                exponent,
            } => [height, top_width, exponent, 0.0],
            Self::RectTriangular {
                height,
                top_width,
                triangle_height,
            } => [height, top_width, triangle_height, 0.0],
            Self::RectRound {
                height,
                top_width,
                bottom_radius,
            } => [height, top_width, bottom_radius, 0.0],
            Self::ModBasketHandle {
                height,
                bottom_width,
                top_radius,
            } => [height, bottom_width, top_radius, 0.0],
            Self::Egg { height }
            | Self::Horseshoe { height }
            | Self::Gothic { height }
            | Self::Catenary { height }
            | Self::SemiElliptical { height }
            | Self::BasketHandle { height }
            | Self::SemiCircular { height } => [height, 0.0, 0.0, 0.0],
            Self::Dummy => [0.0; 4],
            Self::Custom { .. } | Self::Irregular { .. } | Self::Street { .. } => return None,
        };
        Some(geom)
    }

    /// Whether the shape is closed at the top
    pub fn is_closed(&self) -> bool {
        !matches!(
            self,
            Self::RectOpen { .. }
                | Self::Trapezoidal { .. }
                | Self::Triangular { .. }
                | Self::Parabolic { .. }
                | Self::Power { .. }
                | Self::Irregular { .. }
                | Self::Street { .. }
        )
    }
}

impl Validate for Shape {
    fn validate(&self) -> Result<()> {
        match self {
            Self::Dummy => Ok(()),
            Self::Custom { height, curve } => {
                positive("height", *height)?;
                validate_name("Curve", curve)
            }
            Self::Irregular { transect } => validate_name("Transect", transect),
            Self::Street { street } => validate_name("Street", street),
            Self::Trapezoidal {
                height,
                base_width,
                left_slope,
                right_slope,
            } => {
                positive("height", *height)?;
                if *base_width < 0.0 || *left_slope < 0.0 || *right_slope < 0.0 {
                    return Err(SwmmingError::validation(
                        "trapezoid width and slopes cannot be negative",
                    ));
                }
                Ok(())
            }
            Self::FilledCircular {
                diameter,
                sediment_depth,
            } => {
                positive("diameter", *diameter)?;
                if *sediment_depth < 0.0 || sediment_depth >= diameter {
                    return Err(SwmmingError::invalid_value("sediment_depth", sediment_depth));
                }
                Ok(())
            }
            Self::ForceMain {
                diameter,
                roughness,
            } => {
                positive("diameter", *diameter)?;
                positive("roughness", *roughness)
            }
            shape => {
                let [geom1, geom2, ..] = shape.geometry().unwrap_or_default();
                positive("Geom1", geom1)?;
                match shape {
                    Self::Circular { .. }
                    | Self::Egg { .. }
                    | Self::Horseshoe { .. }
                    | Self::Gothic { .. }
                    | Self::Catenary { .. }
                    | Self::SemiElliptical { .. }
                    | Self::BasketHandle { .. }
                    | Self::SemiCircular { .. } => Ok(()),
                    _ => positive("Geom2", geom2),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_columns() {
        let trapezoid = Shape::Trapezoidal {
            height: 10.0,
            base_width: 5.0,
            left_slope: 2.0,
            right_slope: 2.5,
        };
        assert_eq!(trapezoid.keyword(), "TRAPEZOIDAL");
        assert_eq!(trapezoid.geometry(), Some([10.0, 5.0, 2.0, 2.5]));
        assert!(!trapezoid.is_closed());

        let street = Shape::Street {
            street: "street1".into(),
        };
        assert_eq!(street.geometry(), None);
    }

    #[test]
    fn test_shape_validation() {
        assert!(Shape::Circular { diameter: 1.0 }.validate().is_ok());
        assert!(Shape::Circular { diameter: 0.0 }.validate().is_err());
        assert!(Shape::RectClosed {
            height: 1.0,
            width: 0.0
        }
        .validate()
        .is_err());
        assert!(Shape::FilledCircular {
            diameter: 1.0,
            sediment_depth: 1.0
        }
        .validate()
        .is_err());
        assert!(Shape::Dummy.validate().is_ok());
    }

    #[test]
    fn test_shape_serde_tag() {
        let shape: Shape = toml::from_str(
            r#"
            shape = "MODBASKETHANDLE"
            height = 2.0
            bottom_width = 1.5
            top_radius = 0.8
            "#,
        )
        .unwrap();
        assert_eq!(shape.keyword(), "MODBASKETHANDLE");
        assert_eq!(shape.geometry(), Some([2.0, 1.5, 0.8, 0.0]));
    }
}
