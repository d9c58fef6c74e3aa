use crate::layout::Geometry;
use crate::models::{CategoryValue, ChartRequest, Point};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Load a chart request (config + kind + data) from a JSON file.
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<ChartRequest> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let req: ChartRequest = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing chart request {}", path.display()))?;
    Ok(req)
}

/// Parse a chart request from a JSON string.
pub fn parse_request(json: &str) -> Result<ChartRequest> {
    Ok(serde_json::from_str(json)?)
}

/// Load points from a CSV file with an `x,y` header.
pub fn load_points_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (i, row) in rdr.deserialize::<Point>().enumerate() {
        // Header is line 1.
        out.push(row.with_context(|| format!("{}: bad row at line {}", path.display(), i + 2))?);
    }
    Ok(out)
}

/// Load bars from a CSV file with a `category,value[,label]` header.
pub fn load_categories_csv<P: AsRef<Path>>(path: P) -> Result<Vec<CategoryValue>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (i, row) in rdr.deserialize::<CategoryValue>().enumerate() {
        out.push(row.with_context(|| format!("{}: bad row at line {}", path.display(), i + 2))?);
    }
    Ok(out)
}

/// Save laid-out geometry as pretty JSON, for renderers outside this crate.
pub fn save_geometry_json<P: AsRef<Path>>(geometry: &Geometry, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(geometry)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn read_points_and_categories() {
        let dir = tempdir().unwrap();
        let pts = dir.path().join("p.csv");
        let cats = dir.path().join("c.csv");
        fs::write(&pts, "x,y\n1, 2\n2,4\n3,6\n").unwrap();
        fs::write(&cats, "category,value,label\n848180,59.8,\"Taps, cocks, valves\"\n848310,53.2,\n")
            .unwrap();

        let p = load_points_csv(&pts).unwrap();
        assert_eq!(p, vec![Point::new(1.0, 2.0), Point::new(2.0, 4.0), Point::new(3.0, 6.0)]);

        let c = load_categories_csv(&cats).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c[0].label.as_deref(), Some("Taps, cocks, valves"));
        assert_eq!(c[1].label, None);
    }

    #[test]
    fn bad_row_reports_line() {
        let dir = tempdir().unwrap();
        let pts = dir.path().join("bad.csv");
        fs::write(&pts, "x,y\n1,2\nfoo,3\n").unwrap();
        let err = load_points_csv(&pts).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));
    }
}
