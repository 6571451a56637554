//! Maps GeoJSON features onto project records

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::geojson::{xy, Feature, GeoJson, Geometry, Position};
use crate::config::GisConfig;
use crate::error::{Result, SwmmingError};
use crate::models::{
    Conduit, Coordinate, Junction, LinkVertex, Map, MapUnits, Outfall, PolygonVertex,
    Subcatchment,
};
use crate::project::Project;

const KIND: &str = "kind";
const FROM: &str = "from";
const TO: &str = "to";
const LENGTH: &str = "length";
const ROUGHNESS: &str = "roughness";
const MAX_DEPTH: &str = "max_depth";
const PERCENT_IMPERV: &str = "percent_imperv";
const WIDTH: &str = "width";
const SLOPE: &str = "slope";

const DEFAULT_ROUGHNESS: f64 = 0.01;
const DEFAULT_SLOPE: f64 = 0.5;

/// Records added by an import
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    /// Junctions created from points
    pub junctions: usize,
    /// Outfalls created from points
    pub outfalls: usize,
    /// Conduits created from line strings
    pub conduits: usize,
    /// Subcatchments created from polygons
    pub subcatchments: usize,
    /// Polygons outlined on the map
    pub polygons: usize,
    /// Features without a usable geometry
    pub skipped: usize,
}

/// Imports GeoJSON features into a [`Project`]
pub struct GeoImporter {
    config: GisConfig,
}

/// Running extent of the imported geometry
#[derive(Default)]
struct Extent(Option<[f64; 4]>);

impl Extent {
    fn add(&mut self, x: f64, y: f64) {
        self.0 = Some(match self.0 {
            None => [x, y, x, y],
            Some([x1, y1, x2, y2]) => [x1.min(x), y1.min(y), x2.max(x), y2.max(y)],
        });
    }

    /// Extent of every located record of `project`
    fn of_project(project: &Project) -> Self {
        let mut extent = Self::default();
        let points = project
            .coordinates
            .iter()
            .map(|c| (c.x, c.y))
            .chain(project.vertices.iter().map(|v| (v.x, v.y)))
            .chain(project.polygons.iter().map(|p| (p.x, p.y)));
        for (x, y) in points {
            extent.add(x, y);
        }
        extent
    }

    fn padded(&self, margin: f64) -> Option<[f64; 4]> {
        let [x1, y1, x2, y2] = self.0?;
        let span = (x2 - x1).max(y2 - y1);
        let pad = if span > 0.0 { span * margin } else { 1.0 };
        Some([x1 - pad, y1 - pad, x2 + pad, y2 + pad])
    }
}

/// Area enclosed by a ring, by the shoelace formula
pub fn shoelace_area(ring: &[(f64, f64)]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let (x1, y1) = ring[i];
            let (x2, y2) = ring[(i + 1) % n];
            x1 * y2 - x2 * y1
        })
        .sum();
    twice.abs() / 2.0
}

fn points(positions: &[Position]) -> Result<Vec<(f64, f64)>> {
    positions.iter().map(|p| xy(p)).collect()
}

fn polyline_length(line: &[(f64, f64)]) -> f64 {
    line.windows(2)
        .map(|w| (w[1].0 - w[0].0).hypot(w[1].1 - w[0].1))
        .sum()
}

fn in_context(index: usize, name: Option<&str>, err: SwmmingError) -> SwmmingError {
    match err {
        SwmmingError::Geo(msg) => match name {
            Some(name) => SwmmingError::geo(format!("feature #{} ('{}'): {}", index, name, msg)),
            None => SwmmingError::geo(format!("feature #{}: {}", index, msg)),
        },
        other => other,
    }
}

impl GeoImporter {
    /// Create an importer reading the property names of `config`
    pub fn new(config: GisConfig) -> Self {
        Self { config }
    }

    /// Import a GeoJSON file into `project`
    pub fn import_file(&self, path: &Path, project: &mut Project) -> Result<ImportSummary> {
        let summary = self.import(GeoJson::load(path)?, project)?;
        info!(
            "Imported {}: {} junction(s), {} outfall(s), {} conduit(s), {} polygon(s)",
            path.display(),
            summary.junctions,
            summary.outfalls,
            summary.conduits,
            summary.polygons
        );
        Ok(summary)
    }

    /// Import every feature of `doc` into `project` and refit the map extent
    ///
    /// Nothing is added to `project` when a feature fails to import.
    pub fn import(&self, doc: GeoJson, project: &mut Project) -> Result<ImportSummary> {
        let mut staged = Project::default();
        let mut summary = ImportSummary::default();
        let mut extent = Extent::default();

        for (index, feature) in doc.into_features().iter().enumerate() {
            let name = feature
                .text(&self.config.name_property)
                .map_err(|e| in_context(index, None, e))?;

            let Some(geometry) = &feature.geometry else {
                debug!("Skipping feature #{} without geometry", index);
                summary.skipped += 1;
                continue;
            };

            let name = name.ok_or_else(|| {
                SwmmingError::geo(format!(
                    "feature #{}: missing '{}' property",
                    index, self.config.name_property
                ))
            })?;

            let result = match geometry {
                Geometry::Point(position) => {
                    self.point(&name, feature, position, &mut staged, &mut summary, &mut extent)
                }
                Geometry::LineString(line) => {
                    self.line(&name, feature, line, &mut staged, &mut summary, &mut extent)
                }
                Geometry::Polygon(rings) => {
                    self.polygon(&name, feature, rings, &mut staged, &mut summary, &mut extent)
                }
                Geometry::MultiPolygon(polygons) => match polygons.first() {
                    Some(rings) => {
                        self.polygon(&name, feature, rings, &mut staged, &mut summary, &mut extent)
                    }
                    None => Err(SwmmingError::geo("empty MultiPolygon")),
                },
                other => {
                    warn!("Skipping '{}': {} geometries are not imported", name, other.kind());
                    summary.skipped += 1;
                    Ok(())
                }
            };
            result.map_err(|e| in_context(index, Some(&name), e))?;
        }

        project.junctions.append(&mut staged.junctions);
        project.outfalls.append(&mut staged.outfalls);
        project.conduits.append(&mut staged.conduits);
        project.subcatchments.append(&mut staged.subcatchments);
        project.coordinates.append(&mut staged.coordinates);
        project.vertices.append(&mut staged.vertices);
        project.polygons.append(&mut staged.polygons);

        // Refit over every located record, earlier imports included
        if extent.0.is_some() {
            extent = Extent::of_project(project);
        }
        if let Some(dimensions) = extent.padded(self.config.map_margin) {
            let units = project
                .map
                .as_ref()
                .map(|m| m.units)
                .unwrap_or(MapUnits::None);
            project.map = Some(Map::new(dimensions, units));
        }

        Ok(summary)
    }

    fn point(
        &self,
        name: &str,
        feature: &Feature,
        position: &[f64],
        staged: &mut Project,
        summary: &mut ImportSummary,
        extent: &mut Extent,
    ) -> Result<()> {
        let (x, y) = xy(position)?;
        let elevation = match feature.number(&self.config.elevation_property)? {
            Some(elevation) => elevation,
            None => position.get(2).copied().ok_or_else(|| {
                SwmmingError::geo(format!(
                    "missing '{}' property and no Z coordinate",
                    self.config.elevation_property
                ))
            })?,
        };

        let is_outfall = feature
            .text(KIND)?
            .map_or(false, |kind| kind.eq_ignore_ascii_case("outfall"));

        if is_outfall {
            let outfall = Outfall::new(name, elevation);
            staged.coordinates.push(Coordinate::new(&outfall, x, y));
            staged.outfalls.push(outfall);
            summary.outfalls += 1;
        } else {
            let mut junction = Junction::new(name, elevation);
            junction.max_depth = feature.number(MAX_DEPTH)?.unwrap_or(0.0);
            staged.coordinates.push(Coordinate::new(&junction, x, y));
            staged.junctions.push(junction);
            summary.junctions += 1;
        }
        extent.add(x, y);
        Ok(())
    }

    fn line(
        &self,
        name: &str,
        feature: &Feature,
        positions: &[Position],
        staged: &mut Project,
        summary: &mut ImportSummary,
        extent: &mut Extent,
    ) -> Result<()> {
        let (from_node, to_node) = match (feature.text(FROM)?, feature.text(TO)?) {
            (Some(from), Some(to)) => (from, to),
            (None, None) => {
                debug!("Skipping line '{}' without '{}'/'{}' nodes", name, FROM, TO);
                summary.skipped += 1;
                return Ok(());
            }
            _ => {
                return Err(SwmmingError::geo(format!(
                    "both '{}' and '{}' properties are required",
                    FROM, TO
                )))
            }
        };

        let line = points(positions)?;
        if line.len() < 2 {
            return Err(SwmmingError::geo("a line needs at least two positions"));
        }

        let conduit = Conduit {
            name: name.to_string(),
            from_node,
            to_node,
            length: feature.number(LENGTH)?.unwrap_or_else(|| polyline_length(&line)),
            roughness: feature.number(ROUGHNESS)?.unwrap_or(DEFAULT_ROUGHNESS),
            in_offset: 0.0,
            out_offset: 0.0,
            init_flow: 0.0,
            max_flow: None,
        };

        for &(x, y) in &line[1..line.len() - 1] {
            staged.vertices.push(LinkVertex::new(&conduit, x, y));
        }
        for &(x, y) in &line {
            extent.add(x, y);
        }
        staged.conduits.push(conduit);
        summary.conduits += 1;
        Ok(())
    }

    fn polygon(
        &self,
        name: &str,
        feature: &Feature,
        rings: &[Vec<Position>],
        staged: &mut Project,
        summary: &mut ImportSummary,
        extent: &mut Extent,
    ) -> Result<()> {
        let ring = match rings.first() {
            Some(outer) => points(outer)?,
            None => Vec::new(),
        };
        if ring.len() < 3 {
            return Err(SwmmingError::geo("a polygon needs at least three positions"));
        }

        if let Some(outlet) = feature.text(&self.config.outlet_property)? {
            let rain_gage = feature.text(&self.config.rain_gage_property)?.ok_or_else(|| {
                SwmmingError::geo(format!(
                    "subcatchment needs a '{}' property",
                    self.config.rain_gage_property
                ))
            })?;
            let area = shoelace_area(&ring);
            staged.subcatchments.push(Subcatchment {
                name: name.to_string(),
                rain_gage,
                outlet,
                area: area * self.config.area_factor,
                percent_imperv: feature.number(PERCENT_IMPERV)?.unwrap_or(0.0),
                width: feature.number(WIDTH)?.unwrap_or_else(|| area.sqrt()),
                slope: feature.number(SLOPE)?.unwrap_or(DEFAULT_SLOPE),
                curb_length: 0.0,
            });
            summary.subcatchments += 1;
        }

        for &(x, y) in &ring {
            staged.polygons.push(PolygonVertex {
                subcatchment: name.to_string(),
                x,
                y,
            });
            extent.add(x, y);
        }
        summary.polygons += 1;
        Ok(())
    }
}
