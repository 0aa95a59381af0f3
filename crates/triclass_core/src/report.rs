//! Text and CSV rendering of classification results.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::class::ClassId;
use crate::classifier::ClassificationResult;
use crate::error::Result;

/// One classified file, as exported to CSV or JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRow {
    pub file: PathBuf,
    #[serde(flatten)]
    pub result: ClassificationResult,
}

/// Status line shown after a class has been (re)trained.
pub fn loaded_message(class: ClassId, count: usize) -> String {
    format!("Class {}: {count} images loaded.", class.number())
}

/// Multi-line distance report with class numbers starting at 1.
pub fn format_distances(result: &ClassificationResult, precision: usize) -> String {
    let mut out = String::from("Distances to classes:\n");
    for (class, distance) in ClassId::ALL.iter().zip(result.distances) {
        let _ = writeln!(out, "Class {}: {distance:.precision$}", class.number());
    }
    let _ = write!(
        out,
        "\nUnknown image assigned to class {} (minimum distance: {:.precision$}).",
        result.predicted.number(),
        result.min_distance,
    );
    out
}

/// Export rows to CSV with headers:
/// file,class_1,class_2,class_3,predicted,min_distance
pub fn export_csv(rows: &[QueryRow], path: impl AsRef<Path>) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([
        "file",
        "class_1",
        "class_2",
        "class_3",
        "predicted",
        "min_distance",
    ])?;

    for row in rows {
        let [d1, d2, d3] = row.result.distances;
        wtr.write_record([
            row.file.to_string_lossy().as_ref(),
            format!("{d1}").as_str(),
            format!("{d2}").as_str(),
            format!("{d3}").as_str(),
            row.result.predicted.number().to_string().as_str(),
            format!("{}", row.result.min_distance).as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> ClassificationResult {
        ClassificationResult {
            distances: [0.0, 4096.0, 2039.9686],
            predicted: ClassId::ALL[0],
            min_distance: 0.0,
        }
    }

    #[test]
    fn report_lists_every_class_then_the_decision() {
        let text = format_distances(&sample(), 4);
        assert_eq!(
            text,
            "Distances to classes:\n\
             Class 1: 0.0000\n\
             Class 2: 4096.0000\n\
             Class 3: 2039.9686\n\
             \n\
             Unknown image assigned to class 1 (minimum distance: 0.0000)."
        );
    }

    #[test]
    fn precision_is_respected() {
        let text = format_distances(&sample(), 1);
        assert!(text.contains("Class 3: 2040.0\n"));
    }

    #[test]
    fn loaded_message_is_one_based() {
        assert_eq!(loaded_message(ClassId::ALL[2], 7), "Class 3: 7 images loaded.");
    }

    #[test]
    fn export_csv_writes_expected_headers_and_rows() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        let rows = vec![
            QueryRow {
                file: PathBuf::from("a.png"),
                result: sample(),
            },
            QueryRow {
                file: PathBuf::from("b.jpg"),
                result: ClassificationResult {
                    distances: [12.5, 3.25, 3.25],
                    predicted: ClassId::ALL[1],
                    min_distance: 3.25,
                },
            },
        ];

        export_csv(&rows, &path)?;

        let mut rdr = csv::Reader::from_path(&path)?;
        let headers = rdr.headers()?.clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["file", "class_1", "class_2", "class_3", "predicted", "min_distance"]
        );

        let mut recs = rdr.records();
        let r1 = recs.next().unwrap()?;
        assert_eq!(&r1[0], "a.png");
        assert_eq!(&r1[1], "0");
        assert_eq!(&r1[2], "4096");
        assert_eq!(&r1[4], "1");

        let r2 = recs.next().unwrap()?;
        assert_eq!(&r2[0], "b.jpg");
        assert_eq!(&r2[3], "3.25");
        assert_eq!(&r2[4], "2");
        assert_eq!(&r2[5], "3.25");

        assert!(recs.next().is_none());
        Ok(())
    }

    #[test]
    fn rows_serialize_flat() -> anyhow::Result<()> {
        let row = QueryRow {
            file: PathBuf::from("x.png"),
            result: sample(),
        };
        let json = serde_json::to_value(&row)?;
        assert_eq!(json["file"], "x.png");
        assert_eq!(json["predicted"], 0);
        Ok(())
    }
}
