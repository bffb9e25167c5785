//! Well table CSV ingestion
//!
//! Required columns: `Well Name/API, Leak LPM, PnA $, Reclam $, Sensor $, Other $`.
//! Optional columns: `Depth (ft), County, Baseline Date`.
//!
//! Columns are matched by header name (trimmed, case-insensitive) so their
//! order does not matter and extra columns are ignored. Empty optional cells
//! become `None`; empty cost cells count as zero, except `PnA $`, which stays
//! unset so the depth preset can fill it.

use std::io::BufRead;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::types::WellRecord;

pub const COL_NAME: &str = "Well Name/API";
pub const COL_LEAK: &str = "Leak LPM";
pub const COL_PNA: &str = "PnA $";
pub const COL_RECLAM: &str = "Reclam $";
pub const COL_SENSOR: &str = "Sensor $";
pub const COL_OTHER: &str = "Other $";
pub const COL_DEPTH: &str = "Depth (ft)";
pub const COL_COUNTY: &str = "County";
pub const COL_BASELINE: &str = "Baseline Date";

pub const REQUIRED_COLUMNS: [&str; 6] = [COL_NAME, COL_LEAK, COL_PNA, COL_RECLAM, COL_SENSOR, COL_OTHER];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV is empty")]
    Empty,

    #[error("CSV is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Line {line}: invalid number '{value}' in column '{column}'")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("Line {line}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { line: usize, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone)]
struct ColumnMap {
    name: usize,
    leak: usize,
    pna: usize,
    reclam: usize,
    sensor: usize,
    other: usize,
    depth: Option<usize>,
    county: Option<usize>,
    baseline: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &str) -> Result<Self, IngestError> {
        let columns: Vec<String> = csv_split(header.trim_start_matches('\u{feff}'))
            .into_iter()
            .map(|c| c.trim().to_lowercase())
            .collect();
        let find = |name: &str| columns.iter().position(|c| *c == name.to_lowercase());

        let missing: Vec<String> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|&col| find(col).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(missing));
        }

        let required = |name: &str| find(name).ok_or_else(|| IngestError::MissingColumns(vec![name.to_string()]));
        Ok(Self {
            name: required(COL_NAME)?,
            leak: required(COL_LEAK)?,
            pna: required(COL_PNA)?,
            reclam: required(COL_RECLAM)?,
            sensor: required(COL_SENSOR)?,
            other: required(COL_OTHER)?,
            depth: find(COL_DEPTH),
            county: find(COL_COUNTY),
            baseline: find(COL_BASELINE),
        })
    }
}

/// Read a well table from CSV text.
pub fn read_wells<R: BufRead>(reader: R) -> Result<Vec<WellRecord>, IngestError> {
    let mut lines = reader.lines();
    let header = lines.next().ok_or(IngestError::Empty)??;
    let col_map = ColumnMap::from_header(&header)?;

    let mut wells = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        // Header is line 1
        let well = parse_row(&line, &col_map, idx + 2)?;
        debug!(well = %well.name, "Parsed well row");
        wells.push(well);
    }

    info!(wells = wells.len(), "Well table loaded");
    Ok(wells)
}

/// Convenience wrapper for in-memory CSV text.
pub fn parse_wells(csv: &str) -> Result<Vec<WellRecord>, IngestError> {
    read_wells(csv.as_bytes())
}

fn parse_row(line: &str, col_map: &ColumnMap, line_num: usize) -> Result<WellRecord, IngestError> {
    let fields = csv_split(line);
    let cell = |idx: usize| fields.get(idx).map_or("", |s| s.trim());
    let optional_cell = |idx: Option<usize>| idx.map(cell).filter(|s| !s.is_empty());

    let number = |idx: usize, column: &'static str| parse_number(cell(idx), column, line_num);

    let baseline_date = optional_cell(col_map.baseline)
        .map(|s| parse_date(s, line_num))
        .transpose()?;
    let depth_ft = optional_cell(col_map.depth)
        .map(|s| parse_number(s, COL_DEPTH, line_num))
        .transpose()?
        .flatten();

    Ok(WellRecord {
        name: cell(col_map.name).to_string(),
        leak_rate_lpm: number(col_map.leak, COL_LEAK)?.unwrap_or(0.0),
        pna_cost: number(col_map.pna, COL_PNA)?,
        reclamation_cost: number(col_map.reclam, COL_RECLAM)?.unwrap_or(0.0),
        sensor_cost: number(col_map.sensor, COL_SENSOR)?.unwrap_or(0.0),
        other_cost: number(col_map.other, COL_OTHER)?.unwrap_or(0.0),
        depth_ft,
        county: optional_cell(col_map.county).unwrap_or_default().to_string(),
        baseline_date,
    })
}

/// Empty, `nan` and `null` cells are `None`. Thousands separators and a
/// leading `$` are accepted.
fn parse_number(raw: &str, column: &'static str, line: usize) -> Result<Option<f64>, IngestError> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    let cleaned: String = s.trim_start_matches('$').chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(IngestError::InvalidNumber {
            line,
            column,
            value: raw.to_string(),
        }),
    }
}

fn parse_date(raw: &str, line: usize) -> Result<NaiveDate, IngestError> {
    // Accept datetime cells by taking the date part
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        .ok_or_else(|| IngestError::InvalidDate {
            line,
            value: raw.to_string(),
        })
}

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "\
Well Name/API,Leak LPM,PnA $,Reclam $,Sensor $,Other $,Depth (ft),County,Baseline Date
Well-01,15,30000,5000,12000,1000,1500,Johnson,2025-03-01
Well-02,42,,5000,12000,1000,2200,Tarrant,
\"Smith #3, Unit B\",8.5,\"$45,000\",4000,9000,500,,\"Hood\",03/15/2025
";

    #[test]
    fn test_csv_split_quoted() {
        assert_eq!(csv_split(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
        assert_eq!(csv_split(r#""say ""hi""",x"#), vec![r#"say "hi""#, "x"]);
        assert_eq!(csv_split("a,,"), vec!["a", "", ""]);
    }

    #[test]
    fn test_full_table() {
        let wells = parse_wells(FULL).unwrap();
        assert_eq!(wells.len(), 3);

        assert_eq!(wells[0].name, "Well-01");
        assert_eq!(wells[0].leak_rate_lpm, 15.0);
        assert_eq!(wells[0].pna_cost, Some(30_000.0));
        assert_eq!(wells[0].depth_ft, Some(1_500.0));
        assert_eq!(wells[0].baseline_date, NaiveDate::from_ymd_opt(2025, 3, 1));

        assert_eq!(wells[1].pna_cost, None);
        assert_eq!(wells[1].baseline_date, None);

        assert_eq!(wells[2].name, "Smith #3, Unit B");
        assert_eq!(wells[2].pna_cost, Some(45_000.0));
        assert_eq!(wells[2].depth_ft, None);
        assert_eq!(wells[2].county, "Hood");
        assert_eq!(wells[2].baseline_date, NaiveDate::from_ymd_opt(2025, 3, 15));
    }

    #[test]
    fn test_minimal_columns_any_order() {
        let csv = "other $,Sensor $,Well Name/API,Reclam $,PnA $,Leak LPM\n1000,12000,W-1,5000,0,3.5\n";
        let wells = parse_wells(csv).unwrap();
        assert_eq!(wells[0].name, "W-1");
        assert_eq!(wells[0].leak_rate_lpm, 3.5);
        assert_eq!(wells[0].pna_cost, Some(0.0));
        assert_eq!(wells[0].other_cost, 1_000.0);
        assert!(wells[0].depth_ft.is_none());
        assert!(wells[0].county.is_empty());
    }

    #[test]
    fn test_missing_required_columns_listed() {
        let err = parse_wells("Well Name/API,Leak LPM,PnA $\nW,1,1\n").unwrap_err();
        match err {
            IngestError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["Reclam $", "Sensor $", "Other $"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_number_reports_line() {
        let csv = "Well Name/API,Leak LPM,PnA $,Reclam $,Sensor $,Other $\nW-1,1,1,1,1,1\nW-2,lots,1,1,1,1\n";
        let err = parse_wells(csv).unwrap_err();
        assert!(matches!(err, IngestError::InvalidNumber { line: 3, column: COL_LEAK, .. }));
    }

    #[test]
    fn test_bad_date_is_error() {
        let csv = "Well Name/API,Leak LPM,PnA $,Reclam $,Sensor $,Other $,Baseline Date\nW,1,1,1,1,1,someday\n";
        assert!(matches!(parse_wells(csv), Err(IngestError::InvalidDate { line: 2, .. })));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_wells(""), Err(IngestError::Empty)));
    }

    #[test]
    fn test_blank_lines_skipped_and_bom_stripped() {
        let csv = "\u{feff}Well Name/API,Leak LPM,PnA $,Reclam $,Sensor $,Other $\n\nW,2,1,1,1,1\n\n";
        assert_eq!(parse_wells(csv).unwrap().len(), 1);
    }
}
