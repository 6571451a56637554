//! Cross-reference analysis run before assembly
//!
//! Record validation only sees one record at a time. The analyzer checks
//! the project as a whole: unique names, references that resolve, cross
//! sections that fit their links and data that nothing uses.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_damerau_levenshtein};
use tracing::{debug, warn};

use crate::error::{Result, SwmmingError};
use crate::models::*;
use crate::project::{Project, SectionCount};

/// Minimum similarity for a "did you mean" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Project analyzer for pre-assembly checks
pub struct ProjectAnalyzer<'a> {
    project: &'a Project,
}

/// Analysis report
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Problems that make the input file unusable
    pub errors: Vec<String>,
    /// Suspicious but legal content
    pub warnings: Vec<String>,
    /// Nodes of every kind
    pub node_count: usize,
    /// Links of every kind
    pub link_count: usize,
    /// Records per non-empty section
    pub sections: Vec<SectionCount>,
}

impl AnalysisReport {
    /// Whether the project can be assembled
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Groups of object names that must be unique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Namespace {
    Node,
    Link,
    Conduit,
    Subcatchment,
    Raingage,
    Timeseries,
    Curve,
    Pattern,
    Transect,
    Street,
    Inlet,
}

impl Namespace {
    fn label(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Link => "link",
            Self::Conduit => "conduit",
            Self::Subcatchment => "subcatchment",
            Self::Raingage => "rain gage",
            Self::Timeseries => "time series",
            Self::Curve => "curve",
            Self::Pattern => "pattern",
            Self::Transect => "transect",
            Self::Street => "street",
            Self::Inlet => "inlet",
        }
    }
}

/// Similarity of two object names, between 0 and 1
fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a == b {
        return 1.0;
    }
    (jaro_winkler(&a, &b) + normalized_damerau_levenshtein(&a, &b)) / 2.0
}

/// Closest candidate to `name`, if any is close enough
fn suggest<'n>(name: &str, candidates: impl IntoIterator<Item = &'n str>) -> Option<&'n str> {
    candidates
        .into_iter()
        .map(|candidate| (candidate, similarity(name, candidate)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}

/// State of one analysis pass
struct Scan<'a> {
    names: HashMap<Namespace, Vec<&'a str>>,
    curves: HashMap<&'a str, CurveKind>,
    used_series: HashSet<&'a str>,
    used_curves: HashSet<&'a str>,
    report: AnalysisReport,
}

impl<'a> Scan<'a> {
    fn new() -> Self {
        Self {
            names: HashMap::new(),
            curves: HashMap::new(),
            used_series: HashSet::new(),
            used_curves: HashSet::new(),
            report: AnalysisReport::default(),
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        self.report.errors.push(message.into());
    }

    fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.report.warnings.push(message);
    }

    /// Register names, reporting duplicates within the namespace
    fn declare(&mut self, namespace: Namespace, names: impl IntoIterator<Item = &'a str>) {
        let mut seen: HashSet<&str> = self
            .names
            .get(&namespace)
            .map(|existing| existing.iter().copied().collect())
            .unwrap_or_default();

        for name in names {
            if !seen.insert(name) {
                self.error(
                    SwmmingError::DuplicateName {
                        kind: namespace.label().to_string(),
                        name: name.to_string(),
                    }
                    .to_string(),
                );
                continue;
            }
            self.names.entry(namespace).or_default().push(name);
        }
    }

    fn contains(&self, namespace: Namespace, name: &str) -> bool {
        self.names
            .get(&namespace)
            .map_or(false, |names| names.iter().any(|n| *n == name))
    }

    fn candidates(&self, namespaces: &[Namespace]) -> Vec<&'a str> {
        namespaces
            .iter()
            .filter_map(|ns| self.names.get(ns))
            .flatten()
            .copied()
            .collect()
    }

    fn unknown(&mut self, owner: &str, namespaces: &[Namespace], name: &str) {
        let kind = namespaces
            .iter()
            .map(|ns| ns.label())
            .collect::<Vec<_>>()
            .join(" or ");
        let mut message = SwmmingError::unknown_reference(owner, kind, name).to_string();
        if let Some(close) = suggest(name, self.candidates(namespaces)) {
            message.push_str(&format!(" (did you mean '{}'?)", close));
        }
        self.error(message);
    }

    /// Check that `name` exists in one of `namespaces`
    fn reference(&mut self, owner: &str, namespaces: &[Namespace], name: &'a str) {
        if namespaces.contains(&Namespace::Timeseries) {
            self.used_series.insert(name);
        }
        if !namespaces.iter().any(|ns| self.contains(*ns, name)) {
            self.unknown(owner, namespaces, name);
        }
    }

    /// Check that curve `name` exists and has a kind `accepts` allows
    fn curve(
        &mut self,
        owner: &str,
        name: &'a str,
        accepts: impl Fn(CurveKind) -> bool,
        expected: &str,
    ) {
        self.used_curves.insert(name);
        match self.curves.get(name).copied() {
            None => self.unknown(owner, &[Namespace::Curve], name),
            Some(kind) if !accepts(kind) => self.error(format!(
                "{} needs a {} curve but '{}' is a {} curve",
                owner, expected, name, kind
            )),
            Some(_) => {}
        }
    }
}

fn validate_records<'r, T: Validate + 'r>(
    scan: &mut Scan<'_>,
    section: &str,
    records: impl IntoIterator<Item = &'r T>,
) {
    for record in records {
        if let Err(e) = record.validate() {
            scan.error(format!("[{}] {}", section, e));
        }
    }
}

impl<'a> ProjectAnalyzer<'a> {
    /// Create a new analyzer
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Perform full analysis
    pub fn analyze(&self) -> Result<AnalysisReport> {
        let mut scan = Scan::new();

        self.check_records(&mut scan);
        self.declare_names(&mut scan);
        self.check_forcing(&mut scan);
        self.check_catchments(&mut scan);
        self.check_network(&mut scan);
        self.check_cross_sections(&mut scan);
        self.check_inlets(&mut scan);
        self.check_map(&mut scan);
        self.check_unused(&mut scan);

        let mut report = scan.report;
        report.node_count = self.project.node_count();
        report.link_count = self.project.link_count();
        report.sections = self.project.summary();

        debug!(
            "Analysis found {} error(s) and {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );
        Ok(report)
    }

    /// Record-level validation of every section
    fn check_records(&self, scan: &mut Scan<'a>) {
        let p = self.project;
        validate_records(scan, "TITLE", Some(&p.title));
        validate_records(scan, "OPTIONS", Some(&p.options));
        validate_records(scan, "EVAPORATION", p.evaporation.as_ref());
        validate_records(scan, "TEMPERATURE", p.temperature.as_ref());
        validate_records(scan, "RAINGAGES", &p.raingages);
        validate_records(scan, "SUBCATCHMENTS", &p.subcatchments);
        validate_records(scan, "SUBAREAS", &p.subareas);
        validate_records(scan, "INFILTRATION", &p.infiltration);
        validate_records(scan, "JUNCTIONS", &p.junctions);
        validate_records(scan, "OUTFALLS", &p.outfalls);
        validate_records(scan, "DIVIDERS", &p.dividers);
        validate_records(scan, "CONDUITS", &p.conduits);
        validate_records(scan, "PUMPS", &p.pumps);
        validate_records(scan, "ORIFICES", &p.orifices);
        validate_records(scan, "WEIRS", &p.weirs);
        validate_records(scan, "OUTLETS", &p.outlets);
        validate_records(scan, "XSECTIONS", &p.xsections);
        validate_records(scan, "TRANSECTS", &p.transects);
        validate_records(scan, "STREETS", &p.streets);
        validate_records(scan, "INLETS", &p.inlets);
        validate_records(scan, "INLET_USAGE", &p.inlet_usages);
        validate_records(scan, "CURVES", &p.curves);
        validate_records(scan, "TIMESERIES", &p.timeseries);
        validate_records(scan, "PATTERNS", &p.patterns);
        validate_records(scan, "REPORT", p.report.as_ref());
        validate_records(scan, "MAP", p.map.as_ref());
        validate_records(scan, "COORDINATES", &p.coordinates);
        validate_records(scan, "VERTICES", &p.vertices);
        validate_records(scan, "POLYGONS", &p.polygons);
        validate_records(scan, "SYMBOLS", &p.symbols);
    }

    fn declare_names(&self, scan: &mut Scan<'a>) {
        let p = self.project;
        scan.declare(Namespace::Node, p.nodes().into_iter().map(|n| n.name()));
        scan.declare(Namespace::Link, p.links().into_iter().map(|l| l.name()));
        scan.declare(Namespace::Conduit, p.conduits.iter().map(|c| c.name.as_str()));
        scan.declare(
            Namespace::Subcatchment,
            p.subcatchments.iter().map(|s| s.name.as_str()),
        );
        scan.declare(Namespace::Raingage, p.raingages.iter().map(|r| r.name.as_str()));
        scan.declare(Namespace::Timeseries, p.timeseries.iter().map(|t| t.name.as_str()));
        scan.declare(Namespace::Curve, p.curves.iter().map(|c| c.name.as_str()));
        scan.declare(Namespace::Pattern, p.patterns.iter().map(|t| t.name.as_str()));
        scan.declare(Namespace::Transect, p.transects.iter().map(|t| t.name.as_str()));
        scan.declare(Namespace::Street, p.streets.iter().map(|s| s.name.as_str()));
        scan.declare(Namespace::Inlet, p.inlets.iter().map(|i| i.name.as_str()));

        for curve in &p.curves {
            scan.curves.entry(curve.name.as_str()).or_insert(curve.kind);
        }
    }

    /// Climate and rainfall inputs
    fn check_forcing(&self, scan: &mut Scan<'a>) {
        let p = self.project;
        if let Some(evaporation) = &p.evaporation {
            if let Some(series) = evaporation.timeseries() {
                scan.reference("[EVAPORATION]", &[Namespace::Timeseries], series);
            }
            if let Some(pattern) = &evaporation.recovery {
                scan.reference("[EVAPORATION]", &[Namespace::Pattern], pattern);
            }
        }
        if let Some(series) = p.temperature.as_ref().and_then(Temperature::timeseries) {
            scan.reference("[TEMPERATURE]", &[Namespace::Timeseries], series);
        }
        for gage in &p.raingages {
            if let Some(series) = gage.timeseries() {
                scan.reference(
                    &format!("Rain gage '{}'", gage.name),
                    &[Namespace::Timeseries],
                    series,
                );
            }
        }
    }

    fn check_catchments(&self, scan: &mut Scan<'a>) {
        let p = self.project;
        for s in &p.subcatchments {
            let owner = format!("Subcatchment '{}'", s.name);
            scan.reference(&owner, &[Namespace::Raingage], &s.rain_gage);
            scan.reference(
                &owner,
                &[Namespace::Node, Namespace::Subcatchment],
                &s.outlet,
            );
        }

        let with_subarea: HashSet<&str> =
            p.subareas.iter().map(|a| a.subcatchment.as_str()).collect();
        let with_infiltration: HashSet<&str> =
            p.infiltration.iter().map(|i| i.subcatchment.as_str()).collect();

        for area in &p.subareas {
            scan.reference("[SUBAREAS]", &[Namespace::Subcatchment], &area.subcatchment);
        }

        let default_method = p.options.infiltration;
        for infil in &p.infiltration {
            scan.reference(
                "[INFILTRATION]",
                &[Namespace::Subcatchment],
                &infil.subcatchment,
            );
            if infil.method.is_none() && infil.parameters.len() != default_method.parameter_count()
            {
                scan.error(format!(
                    "Infiltration of '{}' has {} parameters but the default {} model needs {}",
                    infil.subcatchment,
                    infil.parameters.len(),
                    default_method,
                    default_method.parameter_count()
                ));
            }
        }

        for s in &p.subcatchments {
            if !with_subarea.contains(s.name.as_str()) {
                scan.warning(format!("Subcatchment '{}' has no [SUBAREAS] entry", s.name));
            }
            if !with_infiltration.contains(s.name.as_str()) {
                scan.warning(format!(
                    "Subcatchment '{}' has no [INFILTRATION] entry",
                    s.name
                ));
            }
        }
    }

    /// Node and link connectivity
    fn check_network(&self, scan: &mut Scan<'a>) {
        let p = self.project;

        for outfall in &p.outfalls {
            let owner = format!("Outfall '{}'", outfall.name);
            match &outfall.stage {
                OutfallStage::Tidal { curve } => {
                    scan.curve(&owner, curve, |k| k == CurveKind::Tidal, "TIDAL")
                }
                OutfallStage::Timeseries { timeseries } => {
                    scan.reference(&owner, &[Namespace::Timeseries], timeseries)
                }
                _ => {}
            }
            if let Some(area) = &outfall.route_to {
                scan.reference(&owner, &[Namespace::Subcatchment], area);
            }
        }

        for divider in &p.dividers {
            let owner = format!("Divider '{}'", divider.name);
            scan.reference(&owner, &[Namespace::Link], &divider.diverted_link);
            if let DividerKind::Tabular { curve } = &divider.kind {
                scan.curve(&owner, curve, |k| k == CurveKind::Diversion, "DIVERSION");
            }
        }

        for link in p.links() {
            let owner = format!("Link '{}'", link.name());
            scan.reference(&owner, &[Namespace::Node], link.from_node());
            scan.reference(&owner, &[Namespace::Node], link.to_node());
        }

        for pump in &p.pumps {
            if let Some(curve) = &pump.curve {
                scan.curve(
                    &format!("Pump '{}'", pump.name),
                    curve,
                    |k| k.is_pump(),
                    "PUMP1..PUMP5",
                );
            }
        }

        for outlet in &p.outlets {
            if let Some(curve) = outlet.rating.curve() {
                scan.curve(
                    &format!("Outlet '{}'", outlet.name),
                    curve,
                    |k| k == CurveKind::Rating,
                    "RATING",
                );
            }
        }

        let mut incident: HashMap<&str, usize> = HashMap::new();
        for link in p.links() {
            *incident.entry(link.from_node()).or_default() += 1;
            *incident.entry(link.to_node()).or_default() += 1;
        }
        for outfall in &p.outfalls {
            let count = incident.get(outfall.name.as_str()).copied().unwrap_or(0);
            if count > 1 {
                scan.warning(format!(
                    "Outfall '{}' is connected to {} links; SWMM allows only one",
                    outfall.name, count
                ));
            }
        }
    }

    fn check_cross_sections(&self, scan: &mut Scan<'a>) {
        let p = self.project;
        let mut shapes: HashMap<&str, &Shape> = HashMap::new();

        for xs in &p.xsections {
            let owner = format!("Cross section of '{}'", xs.link);
            scan.reference(&owner, &[Namespace::Link], &xs.link);
            if shapes.insert(xs.link.as_str(), &xs.shape).is_some() {
                scan.error(format!("Link '{}' has more than one cross section", xs.link));
            }
            match &xs.shape {
                Shape::Custom { curve, .. } => {
                    scan.curve(&owner, curve, |k| k == CurveKind::Shape, "SHAPE")
                }
                Shape::Irregular { transect } => {
                    scan.reference(&owner, &[Namespace::Transect], transect)
                }
                Shape::Street { street } => scan.reference(&owner, &[Namespace::Street], street),
                _ => {}
            }
        }

        for conduit in &p.conduits {
            if !shapes.contains_key(conduit.name.as_str()) {
                scan.warning(format!("Conduit '{}' has no cross section", conduit.name));
            }
        }

        for orifice in &p.orifices {
            match shapes.get(orifice.name.as_str()) {
                None => scan.warning(format!("Orifice '{}' has no cross section", orifice.name)),
                Some(Shape::Circular { .. } | Shape::RectClosed { .. }) => {}
                Some(shape) => scan.error(format!(
                    "Orifice '{}' must be CIRCULAR or RECT_CLOSED, not {}",
                    orifice.name,
                    shape.keyword()
                )),
            }
        }

        for weir in &p.weirs {
            match shapes.get(weir.name.as_str()) {
                None => scan.warning(format!("Weir '{}' has no cross section", weir.name)),
                Some(shape) if shape.keyword() != weir.required_shape() => {
                    scan.error(format!(
                        "{} weir '{}' must be {}, not {}",
                        weir.kind,
                        weir.name,
                        weir.required_shape(),
                        shape.keyword()
                    ))
                }
                Some(_) => {}
            }
        }
    }

    fn check_inlets(&self, scan: &mut Scan<'a>) {
        let p = self.project;
        for inlet in &p.inlets {
            if let InletDesign::Custom { curve, capture } = &inlet.design {
                let expected = match capture {
                    CaptureCurve::Diversion => CurveKind::Diversion,
                    CaptureCurve::Rating => CurveKind::Rating,
                };
                scan.curve(
                    &format!("Inlet '{}'", inlet.name),
                    curve,
                    |k| k == expected,
                    expected.keyword(),
                );
            }
        }

        for usage in &p.inlet_usages {
            let owner = format!("Inlet usage on '{}'", usage.conduit);
            scan.reference(&owner, &[Namespace::Conduit], &usage.conduit);
            scan.reference(&owner, &[Namespace::Inlet], &usage.inlet);
            scan.reference(&owner, &[Namespace::Node], &usage.node);
        }
    }

    /// Map placement and report selections
    fn check_map(&self, scan: &mut Scan<'a>) {
        let p = self.project;
        for c in &p.coordinates {
            scan.reference("[COORDINATES]", &[Namespace::Node], &c.node);
        }
        for v in &p.vertices {
            scan.reference("[VERTICES]", &[Namespace::Link], &v.link);
        }
        for v in &p.polygons {
            scan.reference("[POLYGONS]", &[Namespace::Subcatchment], &v.subcatchment);
        }
        for s in &p.symbols {
            scan.reference("[SYMBOLS]", &[Namespace::Raingage], &s.gage);
        }

        if let Some(report) = &p.report {
            for name in report.subcatchments.names() {
                scan.reference("[REPORT]", &[Namespace::Subcatchment], name);
            }
            for name in report.nodes.names() {
                scan.reference("[REPORT]", &[Namespace::Node], name);
            }
            for name in report.links.names() {
                scan.reference("[REPORT]", &[Namespace::Link], name);
            }
        }

        if p.map.is_some() {
            let placed: HashSet<&str> = p.coordinates.iter().map(|c| c.node.as_str()).collect();
            for node in p.nodes() {
                if !placed.contains(node.name()) {
                    scan.warning(format!("Node '{}' has no map coordinates", node.name()));
                }
            }
        }
    }

    fn check_unused(&self, scan: &mut Scan<'a>) {
        for ts in &self.project.timeseries {
            if !scan.used_series.contains(ts.name.as_str()) {
                scan.warning(format!("Time series '{}' is never used", ts.name));
            }
        }
        for curve in &self.project.curves {
            if !scan.used_curves.contains(curve.name.as_str()) {
                scan.warning(format!("Curve '{}' is never used", curve.name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn test_fixtures_are_clean() {
        for project in [conduit_project(), street_project(), transect_project()] {
            let report = ProjectAnalyzer::new(&project).analyze().unwrap();
            assert!(report.is_ok(), "{:?}", report.errors);
            assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        }
    }

    #[test]
    fn test_counts() {
        let project = conduit_project();
        let report = ProjectAnalyzer::new(&project).analyze().unwrap();
        assert_eq!(report.node_count, 3);
        assert_eq!(report.link_count, 2);
        assert_eq!(report.sections, project.summary());
    }

    #[test]
    fn test_unknown_reference_suggestion() {
        let mut project = conduit_project();
        project.conduits[1].to_node = "ot1".to_string();

        let report = ProjectAnalyzer::new(&project).analyze().unwrap();
        assert!(!report.is_ok());
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("unknown node 'ot1'") && e.contains("did you mean 'out1'")));
    }

    #[test]
    fn test_duplicate_names() {
        let mut project = conduit_project();
        project.outfalls.push(Outfall::new("j1", 1.0));

        let report = ProjectAnalyzer::new(&project).analyze().unwrap();
        assert!(report.errors.contains(&"Duplicate node name: j1".to_string()));
    }

    #[test]
    fn test_unused_timeseries() {
        let project = subcatchment_project();
        let report = ProjectAnalyzer::new(&project).analyze().unwrap();
        assert!(report.is_ok(), "{:?}", report.errors);
        assert_eq!(
            report.warnings,
            vec!["Time series 'timeseries2' is never used".to_string()]
        );
    }

    #[test]
    fn test_missing_xsection_and_coordinates() {
        let mut project = conduit_project();
        project.xsections.pop();
        project.coordinates.pop();

        let report = ProjectAnalyzer::new(&project).analyze().unwrap();
        assert!(report.is_ok());
        assert!(report
            .warnings
            .contains(&"Conduit 'c2' has no cross section".to_string()));
        assert!(report
            .warnings
            .contains(&"Node 'out1' has no map coordinates".to_string()));
    }

    #[test]
    fn test_structure_shapes() {
        let mut project = conduit_project();
        let j1 = project.junctions[0].clone();
        let j2 = project.junctions[1].clone();

        let orifice = Orifice::new("or1", &j1, &j2, OrificeType::Side, 0.0, 0.65);
        let weir = Weir::new("w1", &j1, &j2, WeirType::VNotch, 1.0, 3.33);
        project.xsections.push(XSection::new(
            &orifice,
            Shape::Trapezoidal {
                height: 1.0,
                base_width: 1.0,
                left_slope: 1.0,
                right_slope: 1.0,
            },
        ));
        project.xsections.push(XSection::new(
            &weir,
            Shape::RectOpen {
                height: 1.0,
                width: 2.0,
            },
        ));
        project.orifices.push(orifice);
        project.weirs.push(weir);

        let report = ProjectAnalyzer::new(&project).analyze().unwrap();
        assert_eq!(report.errors.len(), 2, "{:?}", report.errors);
        assert!(report.errors[0].contains("CIRCULAR or RECT_CLOSED, not TRAPEZOIDAL"));
        assert!(report.errors[1].contains("V-NOTCH weir 'w1' must be TRIANGULAR"));
    }

    #[test]
    fn test_curve_kind_mismatch() {
        let mut project = conduit_project();
        let j1 = project.junctions[0].clone();
        let j2 = project.junctions[1].clone();
        let storage = Curve::new("tank", CurveKind::Storage, vec![(0.0, 10.0), (5.0, 10.0)]);
        project.pumps.push(Pump::new("p1", &j1, &j2, Some(&storage)));
        project.curves.push(storage);

        let report = ProjectAnalyzer::new(&project).analyze().unwrap();
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("needs a PUMP1..PUMP5 curve but 'tank' is a STORAGE curve")));
    }

    #[test]
    fn test_default_infiltration_parameters() {
        let mut project = subcatchment_project();
        project.options.infiltration = InfiltrationMethod::Horton;
        project.infiltration[1].method = None;

        let report = ProjectAnalyzer::new(&project).analyze().unwrap();
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("default HORTON model needs 5")));
    }

    #[test]
    fn test_outfall_with_two_links() {
        let mut project = transect_project();
        let j2 = project.junctions[1].clone();
        let out1 = project.outfalls[0].clone();
        let c3 = Conduit::new("c3", &j2, &out1, 10.0, 0.01);
        project.xsections.push(XSection::new(&c3, Shape::Circular { diameter: 1.0 }));
        project.conduits.push(c3);

        let report = ProjectAnalyzer::new(&project).analyze().unwrap();
        assert!(report
            .warnings
            .contains(&"Outfall 'out1' is connected to 2 links; SWMM allows only one".to_string()));
    }

    #[test]
    fn test_similarity() {
        assert_eq!(suggest("J1", ["j1", "j2"]), Some("j1"));
        assert_eq!(suggest("culvert", ["j1", "out1"]), None);
    }
}
