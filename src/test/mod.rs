//! Scenario and property tests across building and matching.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::build::{build_index, build_index_with};
use crate::extent::Extent;
use crate::matcher::{match_points, MatchSet};
use crate::point::QueryPoint;
use crate::rtree::{HilbertSort, STRSort, Sort, TileIndex};
use crate::tile::TileRecord;

fn record(id: &str, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> TileRecord {
    TileRecord::from_extent(id, Extent::new(min_x, min_y, max_x, max_y))
}

fn random_records(rng: &mut StdRng, count: usize) -> Vec<TileRecord> {
    (0..count)
        .map(|i| {
            let x = rng.gen_range(-1000.0..1000.0);
            let y = rng.gen_range(-1000.0..1000.0);
            let w = rng.gen_range(0.0..80.0);
            let h = rng.gen_range(0.0..80.0);
            record(&format!("tile_{i:04}"), x, y, x + w, y + h)
        })
        .collect()
}

fn random_route(rng: &mut StdRng, count: usize) -> Vec<QueryPoint> {
    let mut x: f64 = rng.gen_range(-800.0..800.0);
    let mut y: f64 = rng.gen_range(-800.0..800.0);
    (0..count)
        .map(|_| {
            x += rng.gen_range(-15.0..15.0);
            y += rng.gen_range(-15.0..15.0);
            QueryPoint::new(x, y)
        })
        .collect()
}

/// Reference answer without any index.
fn brute_force(records: &[TileRecord], buffer: f64, points: &[QueryPoint]) -> MatchSet {
    let mut matched = MatchSet::new();
    for record in records {
        let extent = record.extent().unwrap().buffered(buffer);
        if points.iter().any(|p| extent.contains(p.x, p.y)) {
            matched.insert(&record.id);
        }
    }
    matched
}

fn build<S: Sort<f64>>(records: &[TileRecord], buffer: f64, node_size: u16) -> TileIndex {
    build_index_with::<f64, S>(records.to_vec(), buffer, node_size)
        .unwrap()
        .index
}

#[test]
fn scenario_buffered_tile_and_distant_tile() {
    let records = vec![
        record("A", 0., 0., 10., 10.),
        record("B", 100., 100., 110., 110.),
    ];
    let index = build_index(records, 5.).unwrap().index;

    let hit = match_points(&index, [QueryPoint::new(12., 12.)], None);
    assert_eq!(hit.into_vec(), vec!["A"]);
    let miss = match_points(&index, [QueryPoint::new(20., 20.)], None);
    assert!(miss.is_empty());

    let both = [QueryPoint::new(12., 12.), QueryPoint::new(20., 20.)];
    assert_eq!(match_points(&index, both, None).into_vec(), vec!["A"]);
}

#[test]
fn scenario_sign_and_pole_layers() {
    let records = vec![
        record("area_07/lane_sign", 0., 0., 50., 50.),
        record("area_07/lane_pole", 0., 0., 50., 50.),
    ];
    let index = build_index(records, 0.).unwrap().index;
    let point = [QueryPoint::new(25., 25.)];

    assert_eq!(match_points(&index, point, None).len(), 2);
    assert_eq!(
        match_points(&index, point, Some("sign")).into_vec(),
        vec!["area_07/lane_sign"]
    );
}

#[test]
fn buffered_corner_is_inclusive() {
    let (min_x, min_y, buffer) = (3.25, -7.5, 2.5);
    let index = build_index(vec![record("t", min_x, min_y, 10., 10.)], buffer)
        .unwrap()
        .index;

    let corner = QueryPoint::new(min_x - buffer, min_y - buffer);
    assert_eq!(match_points(&index, [corner], None).len(), 1);

    for epsilon in [1e-9, 0.01, 1.] {
        let outside = QueryPoint::new(min_x - buffer - epsilon, min_y);
        assert!(match_points(&index, [outside], None).is_empty());
    }
}

#[test]
fn matches_brute_force_on_random_data() {
    let mut rng = StdRng::seed_from_u64(42);
    let records = random_records(&mut rng, 3000);
    let route = random_route(&mut rng, 2000);

    for buffer in [0., 10., 50.] {
        let expected = brute_force(&records, buffer, &route);
        assert!(!expected.is_empty());
        for node_size in [2, 4, 16, 64] {
            let hilbert = build::<HilbertSort>(&records, buffer, node_size);
            assert_eq!(match_points(&hilbert, route.iter().copied(), None), expected);
            let packed_str = build::<STRSort>(&records, buffer, node_size);
            assert_eq!(match_points(&packed_str, route.iter().copied(), None), expected);
        }
    }
}

#[test]
fn buffer_growth_never_loses_matches() {
    let mut rng = StdRng::seed_from_u64(7);
    let records = random_records(&mut rng, 1000);
    let route = random_route(&mut rng, 500);

    let mut previous = MatchSet::new();
    for buffer in [0., 1., 5., 25., 100.] {
        let index = build_index(records.clone(), buffer).unwrap().index;
        let matched = match_points(&index, route.iter().copied(), None);
        assert!(previous.iter().all(|id| matched.contains(id)));
        assert!(matched.len() >= previous.len());
        previous = matched;
    }
}

#[test]
fn matching_is_idempotent_and_order_independent() {
    let mut rng = StdRng::seed_from_u64(3);
    let records = random_records(&mut rng, 800);
    let mut route = random_route(&mut rng, 400);
    let index = build_index(records, 20.).unwrap().index;

    let first = match_points(&index, route.iter().copied(), None);
    let second = match_points(&index, route.iter().copied(), None);
    assert_eq!(first, second);

    route.reverse();
    assert_eq!(match_points(&index, route.iter().copied(), None), first);
}

#[test]
fn filter_results_all_contain_pattern() {
    let mut rng = StdRng::seed_from_u64(11);
    let layers = ["Sign", "pole", "markline"];
    let records: Vec<TileRecord> = random_records(&mut rng, 600)
        .into_iter()
        .enumerate()
        .map(|(i, mut record)| {
            record.id = format!("{}/{}.shp", record.id, layers[i % layers.len()]);
            record
        })
        .collect();
    let route = random_route(&mut rng, 1000);
    let index = build_index(records, 30.).unwrap().index;

    let all = match_points(&index, route.iter().copied(), None);
    let signs = match_points(&index, route.iter().copied(), Some("SIGN"));
    assert!(signs.iter().all(|id| id.to_lowercase().contains("sign")));
    let expected: Vec<&str> = all
        .iter()
        .filter(|id| id.to_lowercase().contains("sign"))
        .collect();
    assert_eq!(signs.iter().collect::<Vec<_>>(), expected);
}

#[test]
fn malformed_row_among_valid_rows() {
    let mut records: Vec<TileRecord> = (0..10)
        .map(|i| record(&format!("t{i}"), i as f64, 0., i as f64 + 1., 1.))
        .collect();
    records.push(TileRecord::new("broken", "1", "two", "3", "4"));

    let output = build_index(records, 0.).unwrap();
    assert_eq!(output.index.len(), 10);
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].id.as_deref(), Some("broken"));
}

#[test]
fn f32_index_agrees_with_f64_index() {
    let mut rng = StdRng::seed_from_u64(5);
    let records = random_records(&mut rng, 500);
    let route = random_route(&mut rng, 300);

    let wide = build::<HilbertSort>(&records, 10., 16);
    let narrow = build_index_with::<f32, HilbertSort>(records, 10., 16)
        .unwrap()
        .index;

    let expected = match_points(&wide, route.iter().copied(), None);
    let narrow_points = route.iter().map(|p| QueryPoint::new(p.x as f32, p.y as f32));
    let found = match_points(&narrow, narrow_points, None);
    // outward rounding can only add tiles on a box edge
    assert!(expected.iter().all(|id| found.contains(id)));
}
