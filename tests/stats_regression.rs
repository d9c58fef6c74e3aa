use tradeviz::models::Point;
use tradeviz::stats::{self, LeastSquares};
use tradeviz::{ChartError, storage};

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

#[test]
fn exact_line_through_three_points() {
    let fit = stats::linear_regression(&pts(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)])).unwrap();
    assert!((fit.slope - 2.0).abs() < 1e-12);
    assert!(fit.intercept.abs() < 1e-12);
}

#[test]
fn best_fit_through_noisy_points() {
    let fit = stats::linear_regression(&pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0)])).unwrap();
    assert!((fit.slope - 0.5).abs() < 1e-6);
    assert!((fit.intercept - 1.0 / 6.0).abs() < 1e-6);
}

#[test]
fn line_passes_through_the_mean_point() {
    let data = pts(&[(-3.0, 1.5), (0.5, 2.0), (2.0, -1.0), (4.25, 7.0), (9.0, 3.0)]);
    let fit = stats::linear_regression(&data).unwrap();
    let n = data.len() as f64;
    let mx = data.iter().map(|p| p.x).sum::<f64>() / n;
    let my = data.iter().map(|p| p.y).sum::<f64>() / n;
    assert!((fit.predict(mx) - my).abs() < 1e-9);
}

#[test]
fn degenerate_inputs_fail_fast() {
    for data in [
        vec![],
        pts(&[(1.0, 1.0)]),
        pts(&[(2.0, 1.0), (2.0, 5.0), (2.0, 9.0)]),
        pts(&[(0.1, 1.0), (0.1, 2.0)]),
    ] {
        match stats::linear_regression(&data) {
            Err(ChartError::DegenerateInput(_)) => {}
            other => panic!("expected DegenerateInput for {data:?}, got {other:?}"),
        }
    }
}

#[test]
fn accumulator_matches_slice_api() {
    let data = pts(&[(1.0, 3.0), (2.0, 5.5), (4.0, 8.0)]);
    let acc: LeastSquares = data.iter().copied().collect();
    assert_eq!(acc.len(), 3);
    assert_eq!(acc.fit().unwrap(), stats::linear_regression(&data).unwrap());
}

#[test]
fn correlation_of_demo_scatter() {
    let req = storage::load_request(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/scatter_feyes.json"))
        .unwrap();
    let points = match req.data {
        tradeviz::ChartData::Scatter { points, .. } => points,
        other => panic!("unexpected kind {}", other.kind_name()),
    };
    let c = stats::correlation(&points).unwrap();
    assert_eq!(c.df, 14);
    assert!((c.r - 0.6593).abs() < 1e-3, "r = {}", c.r);
    let t = c.t.unwrap();
    assert!((t - 3.281).abs() < 1e-2, "t = {t}");
    // t is consistent with r and df
    assert!((t - c.r * (c.df as f64 / (1.0 - c.r * c.r)).sqrt()).abs() < 1e-9);
}

#[test]
fn perfect_fit_has_no_t() {
    let c = stats::correlation(&pts(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)])).unwrap();
    assert!((c.r - 1.0).abs() < 1e-12);
    assert_eq!(c.t, None);
    assert_eq!(c.df, 1);
}

#[test]
fn flat_y_has_no_correlation() {
    let err = stats::correlation(&pts(&[(0.0, 2.0), (1.0, 2.0), (5.0, 2.0)])).unwrap_err();
    assert!(matches!(err, ChartError::DegenerateInput(_)));
    // ...while the fit itself is a valid horizontal line
    let fit = stats::linear_regression(&pts(&[(0.0, 2.0), (1.0, 2.0), (5.0, 2.0)])).unwrap();
    assert_eq!(fit.slope, 0.0);
    assert_eq!(fit.intercept, 2.0);
}

#[test]
fn extent_skips_non_finite() {
    assert_eq!(stats::extent([3.0, f64::NAN, -1.0, 7.5]), Some((-1.0, 7.5)));
    assert_eq!(stats::extent([f64::INFINITY]), None);
    assert_eq!(stats::extent(Vec::<f64>::new()), None);
}
