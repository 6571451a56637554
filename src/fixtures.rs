//! Sample projects shared by the unit tests

use chrono::NaiveDate;

use crate::models::*;
use crate::project::Project;

fn titled(header: &str) -> Title {
    Title::new(header, "A test project for swmming")
}

/// Two conduits with map coordinates and curved link vertices
pub fn conduit_project() -> Project {
    let j1 = Junction::new("j1", 10.0);
    let j2 = Junction::new("j2", 9.0);
    let out1 = Outfall::new("out1", 8.0);
    let c1 = Conduit::new("c1", &j1, &j2, 100.0, 0.015);
    let c2 = Conduit::new("c2", &j2, &out1, 200.0, 0.012);

    let mut vertices: Vec<LinkVertex> = (1..10)
        .map(|i| {
            let x = f64::from(i * 10);
            LinkVertex::new(&c1, x, 0.5 * (-(x - 50.0).powi(2) / 50.0 + 50.0))
        })
        .collect();
    vertices.push(LinkVertex::new(&c2, 150.0, 50.0));

    Project {
        title: titled("Test Project Conduit"),
        options: Options::new(
            FlowUnits::Cfs,
            InfiltrationMethod::ModifiedGreenAmpt,
            RoutingMethod::DynWave,
        ),
        xsections: vec![
            XSection::new(&c1, Shape::Circular { diameter: 10.0 }),
            XSection::new(
                &c2,
                Shape::Trapezoidal {
                    height: 10.0,
                    base_width: 5.0,
                    left_slope: 2.0,
                    right_slope: 2.5,
                },
            ),
        ],
        coordinates: vec![
            Coordinate::new(&j1, 0.0, 0.0),
            Coordinate::new(&j2, 100.0, 0.0),
            Coordinate::new(&out1, 250.0, 100.0),
        ],
        vertices,
        map: Some(Map::new([-50.0, -50.0, 300.0, 150.0], MapUnits::Meters)),
        junctions: vec![j1, j2],
        outfalls: vec![out1],
        conduits: vec![c1, c2],
        ..Project::default()
    }
}

/// Street conduits drained by a grate and a curb inlet
pub fn street_project() -> Project {
    let j1 = Junction::new("j1", 100.0);
    let j2 = Junction::new("j2", 99.5);
    let out1 = Outfall::new("out1", 99.0);
    let c1 = Conduit::new("conduit1", &j1, &j2, 100.0, 0.015);
    let c2 = Conduit::new("conduit2", &j2, &out1, 50.0, 0.012);
    let street = Street::new("street1", 0.2, 0.1, 0.1, 0.050);
    let shape = Shape::Street {
        street: street.name.clone(),
    };

    let grate = Inlet::new(
        "inlet1",
        InletDesign::Grate(GrateInlet {
            length: 2.0,
            width: 0.75,
            grate: GrateType::PBar50,
            generic: None,
        }),
    );
    let curb = Inlet::new(
        "inlet2",
        InletDesign::Curb {
            length: 1.2,
            height: 4.8,
            throat: ThroatAngle::Horizontal,
        },
    );

    Project {
        title: titled("Test Project Street"),
        options: Options::new(
            FlowUnits::Lps,
            InfiltrationMethod::ModifiedGreenAmpt,
            RoutingMethod::DynWave,
        ),
        xsections: vec![XSection::new(&c1, shape.clone()), XSection::new(&c2, shape)],
        inlet_usages: vec![
            InletUsage {
                percent_clogged: 25.0,
                ..InletUsage::new(&c1, &grate, &j2)
            },
            InletUsage::new(&c1, &curb, &j2),
        ],
        inlets: vec![grate, curb],
        streets: vec![street],
        junctions: vec![j1, j2],
        outfalls: vec![out1],
        conduits: vec![c1, c2],
        ..Project::default()
    }
}

/// Natural channels described by two transects
pub fn transect_project() -> Project {
    let station: Vec<f64> = (0..11).map(f64::from).collect();
    let mut t1 = Transect::new(
        "transect1",
        station.clone(),
        (6..=10).rev().chain(5..=10).map(f64::from).collect(),
        1.0,
        3.0,
    )
    .with_roughness(0.020, 0.020, 0.010);
    t1.station_modifier = 0.80;
    let t2 = Transect::new(
        "transect2",
        station,
        (1..=5)
            .rev()
            .map(|i| f64::from(i * 2))
            .chain((0..=5).map(|i| f64::from(i * 2)))
            .collect(),
        1.0,
        3.0,
    )
    .with_roughness(0.025, 0.025, 0.0);

    let j1 = Junction::new("j1", 5.0);
    let j2 = Junction::new("j2", 0.0);
    let out1 = Outfall::new("out1", -1.0);
    let c1 = Conduit::new("c1", &j1, &j2, 100.0, 0.015);
    let c2 = Conduit::new("c2", &j1, &out1, 120.0, 0.010);

    Project {
        title: titled("Test Project Transects"),
        options: Options {
            flow_units: FlowUnits::Lps,
            flow_routing: RoutingMethod::DynWave,
            ..Options::default()
        },
        xsections: vec![
            XSection::new(
                &c1,
                Shape::Irregular {
                    transect: t1.name.clone(),
                },
            ),
            XSection::new(
                &c2,
                Shape::Irregular {
                    transect: t2.name.clone(),
                },
            ),
        ],
        transects: vec![t1, t2],
        junctions: vec![j1, j2],
        outfalls: vec![out1],
        conduits: vec![c1, c2],
        ..Project::default()
    }
}

/// Two subcatchments on rain gages fed by inline time series
pub fn subcatchment_project() -> Project {
    let jan_first = NaiveDate::from_ymd_opt(2022, 1, 1);
    let ts1 = Timeseries::new(
        "timeseries1",
        jan_first,
        vec![0.0, 1.0, 2.0, 3.0],
        vec![0.0, 0.5, 1.0, 0.15],
    )
    .with_description("A short description of timeseries1");
    let ts2 = Timeseries::new(
        "timeseries2",
        jan_first,
        vec![0.0, 1.0, 2.0, 3.0],
        vec![0.0; 4],
    );
    let ts3 = Timeseries::new(
        "timeseries3",
        jan_first,
        vec![0.0, 1.0, 2.0],
        vec![10.0, 20.0, 50.0],
    )
    .with_description("A loong description ".repeat(5));

    let rg1 = Raingage::new(
        "rg1",
        RainFormat::Intensity,
        "1:00",
        RaingageSource::timeseries(&ts1),
    );
    let rg2 = Raingage::new(
        "rg2",
        RainFormat::Volume,
        "1:00",
        RaingageSource::timeseries(&ts3),
    );

    let j1 = Junction::new("j1", 150.0);
    let s1 = Subcatchment::new("s1", &rg1, &j1, 100.0, 100.0, 100.0, 0.15);
    let s2 = Subcatchment::new("s2", &rg2, &j1, 200.0, 25.0, 123.0, 0.9);

    let polygons = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (6.0, 10.0), (6.0, 4.0), (0.0, 4.0), (0.0, 0.0)]
        .into_iter()
        .map(|(x, y)| PolygonVertex::new(&s1, x, y))
        .chain(
            [(20.0, 20.0), (15.0, 18.0), (21.0, 14.0)]
                .into_iter()
                .map(|(x, y)| PolygonVertex::new(&s2, x, y)),
        )
        .collect();

    Project {
        title: titled("Test Project Subcatchments"),
        options: Options {
            flow_units: FlowUnits::Lps,
            flow_routing: RoutingMethod::KinWave,
            ..Options::default()
        },
        subareas: vec![
            Subarea::new(&s1, 0.015, 0.123, 0.010, 0.011, 50.0),
            Subarea::new(&s2, 0.015, 0.123, 0.109, 0.1, 10.0),
        ],
        infiltration: vec![
            Infiltration::new(
                &s1,
                vec![1.0, 2.0, 3.0, 4.0, 5.0],
                Some(InfiltrationMethod::Horton),
            ),
            Infiltration::new(
                &s2,
                vec![10.0, 20.0, 30.0],
                Some(InfiltrationMethod::ModifiedGreenAmpt),
            ),
        ],
        coordinates: vec![Coordinate::new(&j1, 5.0, 15.0)],
        polygons,
        map: Some(Map::new([-10.0, -10.0, 30.0, 20.0], MapUnits::Meters)),
        raingages: vec![rg1, rg2],
        subcatchments: vec![s1, s2],
        junctions: vec![j1],
        timeseries: vec![ts1, ts2, ts3],
        ..Project::default()
    }
}
