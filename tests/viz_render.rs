use std::fs;
use std::path::PathBuf;
use tradeviz::layout::{self, Geometry, Mark, TextMark};
use tradeviz::models::Rgb8;
use tradeviz::storage;
use tradeviz::viz::{self, Renderer, SvgFileRenderer, SvgStringRenderer};

fn demo_geometry(name: &str) -> Geometry {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name);
    layout::build(&storage::load_request(path).unwrap()).unwrap()
}

#[test]
fn svg_string_contains_all_mark_kinds() {
    let g = demo_geometry("scatter_feyes.json");
    let svg = viz::render_svg_string(&g).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<rect"));
    assert!(svg.contains("<circle"));
    assert!(svg.contains("<text"));
    assert!(svg.contains("df = 14"));
}

#[test]
fn writes_svg_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("grouped.svg");
    let g = demo_geometry("grouped_bar_feyes.json");
    viz::render_svg(&g, &out).unwrap();
    let meta = fs::metadata(&out).unwrap();
    assert!(meta.len() > 0);
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("417.2"));
}

#[test]
fn renderers_are_swappable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("line.svg");
    let g = demo_geometry("line_green_share.json");

    let mut renderers: Vec<Box<dyn Renderer>> = vec![
        Box::new(SvgFileRenderer::new(&path)),
        Box::new(SvgStringRenderer::default()),
    ];
    for r in renderers.iter_mut() {
        r.render(&g).unwrap();
    }
    assert!(path.exists());

    let mut mem = SvgStringRenderer::default();
    mem.render(&g).unwrap();
    assert!(mem.document.contains("<polyline"));
}

#[test]
fn hand_built_geometry_renders() {
    let mut g = Geometry::new(120, 80);
    g.background = Some(Rgb8::new(0xF9, 0xF9, 0xF9));
    g.push(Mark::Rect {
        x: 10.0,
        y: 10.0,
        width: 50.0,
        height: 20.0,
        fill: Rgb8::new(0xD5, 0x5E, 0x00),
    });
    g.push(Mark::Text(TextMark::new(60.0, 40.0, "hello", 12).vertical()));
    let svg = viz::render_svg_string(&g).unwrap();
    assert!(svg.contains("hello"));
}

#[test]
fn empty_canvas_is_an_error() {
    let g = Geometry::new(0, 80);
    assert!(viz::render_svg_string(&g).is_err());
    let dir = tempfile::tempdir().unwrap();
    assert!(viz::render_svg(&g, dir.path().join("x.svg")).is_err());
}
