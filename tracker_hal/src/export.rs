//! Point list export.
//!
//! One point per line, `x y z` in millimetres with six decimals.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;
use tracker_common::hal::driver::HalError;
use tracker_core::CapturedPoint;

/// Format one point as an export line (without newline).
pub fn format_point(point: &CapturedPoint) -> String {
    format!("{:.6} {:.6} {:.6}", point.x, point.y, point.z)
}

/// Write `points` to any writer, one line each.
pub fn write_points<W: Write>(mut out: W, points: &[CapturedPoint]) -> std::io::Result<()> {
    for point in points {
        writeln!(out, "{}", format_point(point))?;
    }
    out.flush()
}

/// Write `points` to `path`, replacing its contents.
pub fn export_to_file(path: &Path, points: &[CapturedPoint]) -> Result<usize, HalError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            HalError::ExportError(format!("Failed to create directory {parent:?}: {e}"))
        })?;
    }

    let file = File::create(path)
        .map_err(|e| HalError::ExportError(format!("Failed to create {path:?}: {e}")))?;
    write_points(BufWriter::new(file), points)
        .map_err(|e| HalError::ExportError(format!("Failed to write {path:?}: {e}")))?;

    info!("Exported {} points to {:?}", points.len(), path);
    Ok(points.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn format_matches_six_decimals() {
        let p = CapturedPoint::from_array([1.5, -0.25, 157.0796326]);
        assert_eq!(format_point(&p), "1.500000 -0.250000 157.079633");
    }

    #[test]
    fn write_points_one_line_each() {
        let mut buf = Vec::new();
        let points = [
            CapturedPoint::from_array([0.0, 0.0, 0.0]),
            CapturedPoint::from_array([1.0, 2.0, 3.0]),
        ];
        write_points(&mut buf, &points).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "0.000000 0.000000 0.000000\n1.000000 2.000000 3.000000\n"
        );
    }

    #[test]
    fn export_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/points.txt");
        let n = export_to_file(&path, &[CapturedPoint::from_array([1.0, 1.0, 1.0])]).unwrap();
        assert_eq!(n, 1);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "1.000000 1.000000 1.000000\n"
        );
    }

    #[test]
    fn export_empty_list_writes_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        assert_eq!(export_to_file(&path, &[]).unwrap(), 0);
        assert!(std::fs::read_to_string(&path).unwrap().is_empty());
    }
}
