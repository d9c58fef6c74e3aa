use std::fs;
use tempfile::tempdir;
use tradeviz::layout::{self, Geometry};
use tradeviz::models::ChartData;
use tradeviz::storage;

#[test]
fn request_file_round_trip_through_layout() {
    let dir = tempdir().unwrap();
    let req_path = dir.path().join("req.json");
    fs::write(
        &req_path,
        r##"{
            "kind": "scatter",
            "config": { "width": 300, "height": 200, "colors": ["#000", "#0072B2"] },
            "points": [ { "x": 1, "y": 2 }, { "x": 2, "y": 4 }, { "x": 3, "y": 6 } ]
        }"##,
    )
    .unwrap();

    let req = storage::load_request(&req_path).unwrap();
    assert!(matches!(req.data, ChartData::Scatter { show_stats: false, .. }));
    assert_eq!(req.config.height, 200);
    // unspecified options keep their defaults
    assert_eq!(req.config.ticks, 10);

    let g = layout::build(&req).unwrap();
    let geo_path = dir.path().join("geometry.json");
    storage::save_geometry_json(&g, &geo_path).unwrap();
    let back: Geometry = serde_json::from_str(&fs::read_to_string(&geo_path).unwrap()).unwrap();
    assert_eq!(back.marks.len(), g.marks.len());
    assert_eq!((back.width, back.height), (300, 200));
}

#[test]
fn unknown_kind_is_rejected() {
    let err = storage::parse_request(r#"{ "kind": "pie", "slices": [] }"#).unwrap_err();
    assert!(err.to_string().contains("pie"));
}

#[test]
fn bad_color_is_rejected() {
    let err = storage::parse_request(
        r##"{ "kind": "bar", "config": { "colors": ["#12"] }, "bars": [] }"##,
    )
    .unwrap_err();
    assert!(err.to_string().contains("#12"));
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let err = storage::load_request(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}

#[test]
fn csv_tables_feed_charts() {
    let dir = tempdir().unwrap();
    let bars = dir.path().join("bars.csv");
    fs::write(&bars, "category,value,label\n848310,46.3,Transmission Shafts\n854442,44.4,\n").unwrap();
    let rows = storage::load_categories_csv(&bars).unwrap();
    let g = layout::charts::bar(&Default::default(), &rows).unwrap();
    assert_eq!(g.rects().count(), 2);
}
