use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

use super::model::RawRow;
use crate::error::EngineError;

// ---------------------------------------------------------------------------
// RawSource – where raw rows come from
// ---------------------------------------------------------------------------

/// A readable source of raw play-by-play rows.
///
/// Implementations are read once per normalization run and must not write
/// back to the underlying storage.
pub trait RawSource: Send + Sync {
    fn read_rows(&self) -> Result<Vec<RawRow>, EngineError>;

    /// Short human-readable description used in log lines.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// CSV source
// ---------------------------------------------------------------------------

/// Reads the fixed play-by-play schema from a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RawSource for CsvSource {
    fn read_rows(&self) -> Result<Vec<RawRow>, EngineError> {
        load_csv(&self.path).map_err(|e| EngineError::SourceLoad(format!("{e:#}")))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse every record of the CSV at `path`.
///
/// A missing header or an unreadable row aborts the load; per-cell problems
/// in optional columns are absorbed by the field deserializers below.
fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }
    log::debug!("read {} raw rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Field deserializers
// ---------------------------------------------------------------------------

/// Cell contents treated as "no value" in optional columns.
const MISSING_TOKENS: &[&str] = &["", "NaN", "nan", "NA", "N/A", "null", "NULL", "None"];

pub(crate) fn is_missing_token(s: &str) -> bool {
    MISSING_TOKENS.contains(&s.trim())
}

/// Optional text cell: blank and missing-value tokens become `None`.
pub(crate) fn optional_text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    Ok(raw.filter(|s| !is_missing_token(s)))
}

/// Optional numeric cell: anything that does not parse to a usable number
/// becomes `None` instead of failing the row.
pub(crate) fn lenient_number<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: LenientNumber,
{
    let raw: Option<String> = Option::deserialize(de)?;
    Ok(raw.and_then(|s| T::parse_lenient(s.trim())))
}

/// Numbers that can be coerced from a loosely formatted cell.
pub(crate) trait LenientNumber: Sized {
    fn parse_lenient(s: &str) -> Option<Self>;
}

impl LenientNumber for f64 {
    fn parse_lenient(s: &str) -> Option<Self> {
        // `str::parse` accepts "NaN" and "inf"; neither is a coordinate.
        s.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl LenientNumber for i64 {
    fn parse_lenient(s: &str) -> Option<Self> {
        if let Ok(i) = s.parse::<i64>() {
            return Some(i);
        }
        // Integer columns with gaps are often written as floats ("5.0").
        let f = f64::parse_lenient(s)?;
        (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "game_date,Home Team,Away Team,Period,Clock,Home Team Skaters,Away Team Skaters,Home Team Goals,Away Team Goals,Team,Player,Event,X Coordinate,Y Coordinate,Detail 1,Detail 2,Detail 3,Detail 4,Player 2,X Coordinate 2,Y Coordinate 2";

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{body}").unwrap();
        file
    }

    #[test]
    fn reads_fixed_schema_and_ignores_extra_columns() {
        let file = write_csv(&format!(
            "{HEADER}\n2018-02-11,Olympic (Women) - Canada,Olympic (Women) - Olympic Athletes from Russia,1,19:41,5,5,0,0,Olympic (Women) - Canada,Sarah Nurse,Shot,160,37,Wristshot,On Net,f,f,,,"
        ));
        let rows = CsvSource::new(file.path()).read_rows().unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.period, 1);
        assert_eq!(row.clock.as_deref(), Some("19:41"));
        assert_eq!(row.player.as_deref(), Some("Sarah Nurse"));
        assert_eq!(row.x_coordinate, Some(160.0));
        assert_eq!(row.home_team_skaters, Some(5));
        assert_eq!(row.detail_1.as_deref(), Some("Wristshot"));
        assert_eq!(row.player_2, None);
    }

    #[test]
    fn bad_optional_cells_become_none() {
        let file = write_csv(&format!(
            "{HEADER}\n2018-02-11,A,B,2,,5.0,NaN,0,0,nan,,Takeaway,abc,NaN,,,,,None,,"
        ));
        let rows = CsvSource::new(file.path()).read_rows().unwrap();
        let row = &rows[0];
        assert_eq!(row.clock, None);
        assert_eq!(row.home_team_skaters, Some(5));
        assert_eq!(row.away_team_skaters, None);
        assert_eq!(row.team, None);
        assert_eq!(row.player, None);
        assert_eq!(row.x_coordinate, None);
        assert_eq!(row.y_coordinate, None);
        assert_eq!(row.player_2, None);
    }

    #[test]
    fn missing_header_is_a_load_failure() {
        let file = write_csv("game_date,Home Team,Away Team,Period\n2018-02-11,A,B,1");
        let err = CsvSource::new(file.path()).read_rows().unwrap_err();
        assert!(matches!(err, EngineError::SourceLoad(_)), "{err:?}");
    }

    #[test]
    fn missing_file_is_a_load_failure() {
        let err = CsvSource::new("/definitely/not/here.csv").read_rows().unwrap_err();
        assert!(matches!(err, EngineError::SourceLoad(_)));
    }

    #[test]
    fn lenient_numbers() {
        assert_eq!(f64::parse_lenient("10.5"), Some(10.5));
        assert_eq!(f64::parse_lenient("inf"), None);
        assert_eq!(i64::parse_lenient("4"), Some(4));
        assert_eq!(i64::parse_lenient("4.5"), None);
        assert_eq!(i64::parse_lenient(""), None);
    }
}
