//! Raw rows → canonical rows.
//!
//! Every per-row problem is recovered here with a fixed default so that one
//! bad line never aborts a load.

use super::model::{CanonicalRow, CanonicalTable, NormalizationReport, RawRow};
use crate::team;

/// Substring both team columns must contain for a row to be kept.
pub const COMPETITION_MARKER: &str = "Olympic (Women)";

/// Length of a regulation period in seconds.
pub const PERIOD_SECONDS: u32 = 20 * 60;

// ---------------------------------------------------------------------------
// Clock parsing
// ---------------------------------------------------------------------------

/// Why a clock value fell back to zero elapsed seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockFallback {
    Missing,
    /// Not exactly two `:`-separated parts.
    WrongShape(String),
    /// Minutes or seconds are not unsigned integers.
    NotNumeric(String),
}

/// Outcome of reading a countdown clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockParse {
    Elapsed(u32),
    Defaulted(ClockFallback),
}

impl ClockParse {
    /// Elapsed seconds, or 0 for a defaulted clock.
    pub fn seconds(&self) -> u32 {
        match self {
            ClockParse::Elapsed(s) => *s,
            ClockParse::Defaulted(_) => 0,
        }
    }
}

/// Convert a `MM:SS` countdown clock into seconds elapsed in the period.
///
/// Clocks above 20:00 floor at zero elapsed seconds.
pub fn parse_clock(clock: Option<&str>) -> ClockParse {
    let Some(clock) = clock else {
        return ClockParse::Defaulted(ClockFallback::Missing);
    };
    let parts: Vec<&str> = clock.trim().split(':').collect();
    let [minutes, seconds] = parts.as_slice() else {
        return ClockParse::Defaulted(ClockFallback::WrongShape(clock.to_string()));
    };
    match (minutes.parse::<u32>(), seconds.parse::<u32>()) {
        (Ok(m), Ok(s)) => {
            let remaining = m.saturating_mul(60).saturating_add(s);
            ClockParse::Elapsed(PERIOD_SECONDS.saturating_sub(remaining))
        }
        _ => ClockParse::Defaulted(ClockFallback::NotNumeric(clock.to_string())),
    }
}

/// Elapsed seconds for a clock string, 0 when it cannot be read.
pub fn time_seconds(clock: Option<&str>) -> u32 {
    parse_clock(clock).seconds()
}

/// Render elapsed seconds back into the countdown clock they came from.
pub fn seconds_to_time_string(elapsed: u32) -> String {
    let remaining = PERIOD_SECONDS.saturating_sub(elapsed);
    format!("{:02}:{:02}", remaining / 60, remaining % 60)
}

// ---------------------------------------------------------------------------
// Derived columns
// ---------------------------------------------------------------------------

/// Synthetic game key: same pairing on different dates stays distinct.
pub fn game_id(game_date: &str, home_team: &str, away_team: &str) -> String {
    format!("{game_date} - {home_team} vs {away_team}")
}

fn is_competition_row(row: &RawRow) -> bool {
    row.home_team.contains(COMPETITION_MARKER) && row.away_team.contains(COMPETITION_MARKER)
}

/// Build one canonical row, or `None` when coordinates are missing.
fn canonicalize(row: RawRow, report: &mut NormalizationReport) -> Option<CanonicalRow> {
    let (Some(x), Some(y)) = (row.x_coordinate, row.y_coordinate) else {
        report.dropped_coordinates += 1;
        return None;
    };

    let clock = parse_clock(row.clock.as_deref());
    if let ClockParse::Defaulted(reason) = &clock {
        if !matches!(reason, ClockFallback::Missing) {
            log::warn!("unreadable clock in {} ({reason:?}), using 0s", row.game_date);
        }
        report.clocks_defaulted += 1;
    }

    let team_display = row.team.as_deref().map(team::team_display);
    let team_color = row.team.as_deref().map_or(team::DEFAULT_COLOR, team::team_color);
    let team_logo = team_display.as_deref().and_then(team::team_logo);

    Some(CanonicalRow {
        game_id: game_id(&row.game_date, &row.home_team, &row.away_team),
        time_seconds: clock.seconds(),
        team_display,
        team_color,
        team_logo,
        x_coordinate: x,
        y_coordinate: y,
        game_date: row.game_date,
        home_team: row.home_team,
        away_team: row.away_team,
        period: row.period,
        clock: row.clock,
        team: row.team,
        player: row.player,
        event: row.event,
        detail_1: row.detail_1,
        detail_2: row.detail_2,
        detail_3: row.detail_3,
        detail_4: row.detail_4,
        player_2: row.player_2,
        home_team_skaters: row.home_team_skaters,
        away_team_skaters: row.away_team_skaters,
    })
}

/// Filter raw rows to the competition, drop rows without coordinates and
/// derive every computed column. Source order is preserved.
pub fn normalize(raw: Vec<RawRow>) -> CanonicalTable {
    let mut report = NormalizationReport {
        rows_read: raw.len(),
        ..Default::default()
    };

    let mut rows = Vec::with_capacity(raw.len());
    for row in raw {
        if !is_competition_row(&row) {
            report.dropped_competition += 1;
            continue;
        }
        if let Some(canonical) = canonicalize(row, &mut report) {
            rows.push(canonical);
        }
    }

    CanonicalTable { rows, report }
}
