use serde::Deserialize;

use super::loader::{lenient_number, optional_text};

// ---------------------------------------------------------------------------
// RawRow – one line of the play-by-play CSV
// ---------------------------------------------------------------------------

/// A single recorded event exactly as it appears in the source file.
///
/// Header names are fixed; a missing header fails the whole load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRow {
    pub game_date: String,
    #[serde(rename = "Home Team")]
    pub home_team: String,
    #[serde(rename = "Away Team")]
    pub away_team: String,
    #[serde(rename = "Period")]
    pub period: i64,
    /// Countdown clock, `MM:SS` from 20:00.
    #[serde(rename = "Clock", deserialize_with = "optional_text")]
    pub clock: Option<String>,
    #[serde(rename = "Home Team Skaters", deserialize_with = "lenient_number")]
    pub home_team_skaters: Option<i64>,
    #[serde(rename = "Away Team Skaters", deserialize_with = "lenient_number")]
    pub away_team_skaters: Option<i64>,
    #[serde(rename = "Team", deserialize_with = "optional_text")]
    pub team: Option<String>,
    #[serde(rename = "Player", deserialize_with = "optional_text")]
    pub player: Option<String>,
    #[serde(rename = "Event", deserialize_with = "optional_text")]
    pub event: Option<String>,
    #[serde(rename = "X Coordinate", deserialize_with = "lenient_number")]
    pub x_coordinate: Option<f64>,
    #[serde(rename = "Y Coordinate", deserialize_with = "lenient_number")]
    pub y_coordinate: Option<f64>,
    #[serde(rename = "Detail 1", deserialize_with = "optional_text")]
    pub detail_1: Option<String>,
    #[serde(rename = "Detail 2", deserialize_with = "optional_text")]
    pub detail_2: Option<String>,
    #[serde(rename = "Detail 3", deserialize_with = "optional_text")]
    pub detail_3: Option<String>,
    #[serde(rename = "Detail 4", deserialize_with = "optional_text")]
    pub detail_4: Option<String>,
    #[serde(rename = "Player 2", deserialize_with = "optional_text")]
    pub player_2: Option<String>,
}

// ---------------------------------------------------------------------------
// CanonicalRow – a raw row after normalization
// ---------------------------------------------------------------------------

/// A raw row that survived filtering, with every derived column filled in.
///
/// Coordinates are no longer optional: rows without them never get here.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRow {
    pub game_id: String,
    pub game_date: String,
    pub home_team: String,
    pub away_team: String,
    pub period: i64,
    pub clock: Option<String>,
    /// Elapsed seconds since the start of the period.
    pub time_seconds: u32,
    pub team: Option<String>,
    pub team_display: Option<String>,
    pub team_color: &'static str,
    pub team_logo: Option<&'static str>,
    pub player: Option<String>,
    pub event: Option<String>,
    pub x_coordinate: f64,
    pub y_coordinate: f64,
    pub detail_1: Option<String>,
    pub detail_2: Option<String>,
    pub detail_3: Option<String>,
    pub detail_4: Option<String>,
    pub player_2: Option<String>,
    pub home_team_skaters: Option<i64>,
    pub away_team_skaters: Option<i64>,
}

// ---------------------------------------------------------------------------
// CanonicalTable – the normalized dataset
// ---------------------------------------------------------------------------

/// Counters collected while building a [`CanonicalTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    pub rows_read: usize,
    pub dropped_competition: usize,
    pub dropped_coordinates: usize,
    pub clocks_defaulted: usize,
}

/// The full normalized dataset. Row order is the source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalTable {
    pub rows: Vec<CanonicalRow>,
    pub report: NormalizationReport,
}

impl CanonicalTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
