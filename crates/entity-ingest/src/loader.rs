//! Format dispatch and per-row validation.

use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use entity_model::RawCompany;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{IngestError, Result};
use crate::lei::normalize_lei;
use crate::{delimited, json};

/// Source file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    /// A single JSON array of objects.
    Json,
    /// One JSON object per line (`.jsonl` or `.ndjson`).
    JsonLines,
}

impl SourceFormat {
    /// Detect the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "jsonl" | "ndjson" => Ok(Self::JsonLines),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Counters describing one or more loaded sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Records kept.
    pub records: usize,
    /// Rows dropped for a missing name or country.
    pub skipped_rows: usize,
    /// LEIs dropped for failing validation; their records were kept.
    pub invalid_leis: usize,
    /// Files read, in load order.
    pub files: Vec<PathBuf>,
}

impl LoadReport {
    pub fn merge(&mut self, other: LoadReport) {
        self.records += other.records;
        self.skipped_rows += other.skipped_rows;
        self.invalid_leis += other.invalid_leis;
        self.files.extend(other.files);
    }
}

/// Companies read from one or more sources, with the load report.
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub companies: Vec<RawCompany>,
    pub report: LoadReport,
}

impl Loaded {
    fn extend(&mut self, other: Loaded) {
        self.companies.extend(other.companies);
        self.report.merge(other.report);
    }
}

/// Load a single reference data file.
///
/// # Errors
///
/// Returns [`IngestError`] if the file is missing, unreadable, malformed,
/// lacks a name or country column, or yields no usable records.
pub fn load_path(path: &Path) -> Result<Loaded> {
    let format = SourceFormat::from_path(path)?;
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut sink = RowSink::new(path);
    match format {
        SourceFormat::Csv => delimited::read_csv(reader, &mut sink)?,
        SourceFormat::Json => json::read_json_array(reader, &mut sink)?,
        SourceFormat::JsonLines => json::read_json_lines(reader, &mut sink)?,
    }
    let loaded = sink.finish()?;

    info!(
        path = %path.display(),
        records = loaded.report.records,
        skipped_rows = loaded.report.skipped_rows,
        invalid_leis = loaded.report.invalid_leis,
        "loaded reference data"
    );
    Ok(loaded)
}

/// Load several files and concatenate them in the order given.
///
/// # Errors
///
/// Fails on the first file that fails to load.
pub fn load_paths<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Loaded> {
    let mut all = Loaded::default();
    for path in paths {
        all.extend(load_path(path.as_ref())?);
    }
    Ok(all)
}

/// Raw field values of one source row.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RowFields<'a> {
    pub name: Option<&'a str>,
    pub country: Option<&'a str>,
    pub lei: Option<&'a str>,
    pub source: Option<&'a str>,
}

/// Validates rows of one source and accumulates the kept companies.
pub(crate) struct RowSink<'p> {
    path: &'p Path,
    default_source: String,
    companies: Vec<RawCompany>,
    skipped_rows: usize,
    invalid_leis: usize,
}

impl<'p> RowSink<'p> {
    pub(crate) fn new(path: &'p Path) -> Self {
        let default_source = path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or("reference")
            .to_string();
        Self {
            path,
            default_source,
            companies: Vec::new(),
            skipped_rows: 0,
            invalid_leis: 0,
        }
    }

    pub(crate) fn path(&self) -> &'p Path {
        self.path
    }

    pub(crate) fn push(&mut self, row: u64, fields: RowFields<'_>) {
        let (Some(name), Some(country)) = (non_blank(fields.name), non_blank(fields.country))
        else {
            warn!(
                path = %self.path.display(),
                row,
                "skipping row without a company name or country"
            );
            self.skipped_rows += 1;
            return;
        };

        let mut raw = RawCompany::new(name, country);
        if let Some(lei) = non_blank(fields.lei) {
            match normalize_lei(lei) {
                Some(code) => raw = raw.with_lei(code),
                None => {
                    warn!(path = %self.path.display(), row, lei, "dropping invalid LEI");
                    self.invalid_leis += 1;
                }
            }
        }
        let source = non_blank(fields.source).unwrap_or(self.default_source.as_str());
        raw = raw.with_source(source);
        self.companies.push(raw);
    }

    pub(crate) fn finish(self) -> Result<Loaded> {
        if self.companies.is_empty() {
            return Err(IngestError::EmptySource {
                path: self.path.to_path_buf(),
            });
        }
        Ok(Loaded {
            report: LoadReport {
                records: self.companies.len(),
                skipped_rows: self.skipped_rows,
                invalid_leis: self.invalid_leis,
                files: vec![self.path.to_path_buf()],
            },
            companies: self.companies,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(SourceFormat::from_path(Path::new("a.CSV")).unwrap(), SourceFormat::Csv);
        assert_eq!(SourceFormat::from_path(Path::new("a.json")).unwrap(), SourceFormat::Json);
        assert_eq!(
            SourceFormat::from_path(Path::new("a.ndjson")).unwrap(),
            SourceFormat::JsonLines
        );
        assert!(matches!(
            SourceFormat::from_path(Path::new("a.xlsx")),
            Err(IngestError::UnsupportedFormat { extension, .. }) if extension == "xlsx"
        ));
        assert!(SourceFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_sink_validates_rows() {
        let path = Path::new("registry.csv");
        let mut sink = RowSink::new(path);
        sink.push(
            2,
            RowFields {
                name: Some(" Apple Inc. "),
                country: Some("us"),
                lei: Some("hwupkr0mpou8fgxbt394"),
                source: None,
            },
        );
        sink.push(
            3,
            RowFields {
                name: Some("  "),
                country: Some("US"),
                ..RowFields::default()
            },
        );
        sink.push(
            4,
            RowFields {
                name: Some("Acme"),
                country: Some("GB"),
                lei: Some("BAD"),
                source: Some("manual"),
            },
        );

        let loaded = sink.finish().unwrap();
        assert_eq!(loaded.report.records, 2);
        assert_eq!(loaded.report.skipped_rows, 1);
        assert_eq!(loaded.report.invalid_leis, 1);

        let apple = &loaded.companies[0];
        assert_eq!(apple.name, "Apple Inc.");
        assert_eq!(apple.lei.as_deref(), Some("HWUPKR0MPOU8FGXBT394"));
        assert_eq!(apple.source.as_deref(), Some("registry"));

        let acme = &loaded.companies[1];
        assert!(acme.lei.is_none());
        assert_eq!(acme.source.as_deref(), Some("manual"));
    }

    #[test]
    fn test_empty_sink_is_an_error() {
        let sink = RowSink::new(Path::new("empty.csv"));
        assert!(matches!(sink.finish(), Err(IngestError::EmptySource { .. })));
    }

    #[test]
    fn test_report_merge() {
        let mut report = LoadReport {
            records: 2,
            skipped_rows: 1,
            invalid_leis: 0,
            files: vec![PathBuf::from("a.csv")],
        };
        report.merge(LoadReport {
            records: 3,
            skipped_rows: 0,
            invalid_leis: 2,
            files: vec![PathBuf::from("b.json")],
        });
        assert_eq!(report.records, 5);
        assert_eq!(report.skipped_rows, 1);
        assert_eq!(report.invalid_leis, 2);
        assert_eq!(report.files.len(), 2);
    }
}
