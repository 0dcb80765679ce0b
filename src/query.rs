//! Query engine over the cached canonical table.
//!
//! Filtering is scoped by [`EventFilter`]; the aggregate accessors always
//! look at the whole table. Everything returned here serializes to JSON
//! without further cleaning.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use serde::Serialize;

use crate::cache::DatasetCache;
use crate::data::filter::{filtered_indices, EventFilter, EventQuery, ALL_GAMES};
use crate::data::model::{CanonicalRow, CanonicalTable};
use crate::data::normalize::{seconds_to_time_string, PERIOD_SECONDS};
use crate::error::EngineResult;
use crate::team;

/// Number of event types kept in [`DatasetStats::event_breakdown`].
pub const TOP_EVENT_TYPES: usize = 10;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// One canonical row as exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub game_id: String,
    pub game_date: String,
    pub home_team: String,
    pub away_team: String,
    pub period: i64,
    pub clock: String,
    pub time_seconds: u32,
    pub team: String,
    pub team_display: String,
    pub team_color: String,
    pub team_logo: Option<String>,
    pub player: String,
    pub event: String,
    pub x_coordinate: Option<f64>,
    pub y_coordinate: Option<f64>,
    pub detail_1: String,
    pub detail_2: String,
    pub detail_3: String,
    pub detail_4: String,
    pub player_2: String,
    pub home_team_skaters: Option<i64>,
    pub away_team_skaters: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub id: String,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub home_display: String,
    pub away_display: String,
    pub display_name: String,
    pub home_logo: Option<String>,
    pub away_logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub total_events: usize,
    pub unique_players: usize,
    pub unique_events: usize,
    pub unique_teams: usize,
    pub most_active_player: PlayerCount,
    pub event_breakdown: BTreeMap<String, usize>,
    pub team_breakdown: BTreeMap<String, usize>,
    pub period_breakdown: BTreeMap<i64, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub min_seconds: u32,
    pub max_seconds: u32,
    pub min_time: String,
    pub max_time: String,
}

// ---------------------------------------------------------------------------
// JSON-safe projection
// ---------------------------------------------------------------------------

/// Text cell for output: missing becomes `""`.
pub fn clean_value(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Numeric cell for output: missing or non-finite becomes `null`.
pub fn clean_numeric_value(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl From<&CanonicalRow> for EventRecord {
    fn from(row: &CanonicalRow) -> Self {
        EventRecord {
            game_id: row.game_id.clone(),
            game_date: row.game_date.clone(),
            home_team: row.home_team.clone(),
            away_team: row.away_team.clone(),
            period: row.period,
            clock: clean_value(row.clock.as_deref()),
            time_seconds: row.time_seconds,
            team: clean_value(row.team.as_deref()),
            team_display: clean_value(row.team_display.as_deref()),
            team_color: row.team_color.to_string(),
            team_logo: row.team_logo.map(String::from),
            player: clean_value(row.player.as_deref()),
            event: clean_value(row.event.as_deref()),
            x_coordinate: clean_numeric_value(Some(row.x_coordinate)),
            y_coordinate: clean_numeric_value(Some(row.y_coordinate)),
            detail_1: clean_value(row.detail_1.as_deref()),
            detail_2: clean_value(row.detail_2.as_deref()),
            detail_3: clean_value(row.detail_3.as_deref()),
            detail_4: clean_value(row.detail_4.as_deref()),
            player_2: clean_value(row.player_2.as_deref()),
            home_team_skaters: row.home_team_skaters,
            away_team_skaters: row.away_team_skaters,
        }
    }
}

// ---------------------------------------------------------------------------
// Frequency helpers
// ---------------------------------------------------------------------------

/// Count values, most frequent first. Equal counts keep first-seen order.
fn ranked_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for value in values {
        match slots.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slots.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn distinct_sorted<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// QueryEngine
// ---------------------------------------------------------------------------

/// Filter and aggregate operations backed by a shared [`DatasetCache`].
#[derive(Clone)]
pub struct QueryEngine {
    cache: Arc<DatasetCache>,
}

impl QueryEngine {
    pub fn new(cache: Arc<DatasetCache>) -> Self {
        Self { cache }
    }

    /// The canonical table, normalized on first use.
    pub fn canonical_table(&self) -> EngineResult<Arc<CanonicalTable>> {
        self.cache.get()
    }

    /// Forget the cached table; the next access re-reads the source.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }

    /// Validate raw parameters, then filter. An invalid parameter fails
    /// before any rows are touched.
    pub fn query_events(&self, query: EventQuery) -> EngineResult<Vec<EventRecord>> {
        let filter = EventFilter::try_from(query)?;
        self.events_matching(&filter)
    }

    /// Rows passing `filter`, projected, in table order.
    pub fn events_matching(&self, filter: &EventFilter) -> EngineResult<Vec<EventRecord>> {
        let table = self.canonical_table()?;
        let records: Vec<EventRecord> = filtered_indices(&table.rows, filter)
            .into_iter()
            .map(|i| EventRecord::from(&table.rows[i]))
            .collect();
        log::debug!("{:?} matched {} of {} rows", filter, records.len(), table.len());
        Ok(records)
    }

    /// Distinct games, ascending by date string.
    pub fn list_games(&self) -> EngineResult<Vec<GameSummary>> {
        let table = self.canonical_table()?;
        let mut seen = HashSet::new();
        let mut games = Vec::new();

        for row in &table.rows {
            if !seen.insert(row.game_id.as_str()) {
                continue;
            }
            let home_display = team::team_display(&row.home_team);
            let away_display = team::team_display(&row.away_team);
            games.push(GameSummary {
                id: row.game_id.clone(),
                date: row.game_date.clone(),
                home_team: row.home_team.clone(),
                away_team: row.away_team.clone(),
                display_name: format!("{home_display} vs {away_display} ({})", row.game_date),
                home_logo: team::team_logo(&home_display).map(String::from),
                away_logo: team::team_logo(&away_display).map(String::from),
                home_display,
                away_display,
            });
        }

        games.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(games)
    }

    /// Distinct team display names, optionally within one game.
    pub fn list_teams(&self, game: Option<&str>) -> EngineResult<Vec<String>> {
        let table = self.canonical_table()?;
        let game = game.filter(|g| !g.is_empty() && *g != ALL_GAMES);
        Ok(distinct_sorted(
            table
                .rows
                .iter()
                .filter(|row| game.map_or(true, |g| row.game_id == g))
                .map(|row| row.team_display.as_deref()),
        ))
    }

    pub fn list_event_types(&self) -> EngineResult<Vec<String>> {
        let table = self.canonical_table()?;
        Ok(distinct_sorted(table.rows.iter().map(|r| r.event.as_deref())))
    }

    pub fn list_players(&self) -> EngineResult<Vec<String>> {
        let table = self.canonical_table()?;
        Ok(distinct_sorted(table.rows.iter().map(|r| r.player.as_deref())))
    }

    /// Summary counts over the whole table.
    pub fn stats(&self) -> EngineResult<DatasetStats> {
        let table = self.canonical_table()?;
        let rows = &table.rows;

        let players = ranked_counts(rows.iter().filter_map(|r| r.player.as_deref()));
        let events = ranked_counts(rows.iter().filter_map(|r| r.event.as_deref()));
        let teams = ranked_counts(rows.iter().filter_map(|r| r.team_display.as_deref()));
        let periods = ranked_counts(rows.iter().map(|r| r.period));

        let most_active_player = players
            .first()
            .map(|(name, count)| PlayerCount {
                name: name.to_string(),
                count: *count,
            })
            .unwrap_or_else(|| PlayerCount {
                name: "N/A".to_string(),
                count: 0,
            });

        Ok(DatasetStats {
            total_events: rows.len(),
            unique_players: players.len(),
            unique_events: events.len(),
            unique_teams: teams.len(),
            most_active_player,
            event_breakdown: events
                .iter()
                .take(TOP_EVENT_TYPES)
                .map(|(e, n)| (e.to_string(), *n))
                .collect(),
            team_breakdown: teams.iter().map(|(t, n)| (t.to_string(), *n)).collect(),
            period_breakdown: periods.into_iter().collect(),
        })
    }

    /// Smallest and largest elapsed time in the table.
    pub fn time_range(&self) -> EngineResult<TimeRange> {
        let table = self.canonical_table()?;
        let times = table.rows.iter().map(|r| r.time_seconds);
        let (min_seconds, max_seconds) = match (times.clone().min(), times.max()) {
            (Some(min), Some(max)) => (min, max),
            _ => (0, PERIOD_SECONDS),
        };
        Ok(TimeRange {
            min_seconds,
            max_seconds,
            min_time: seconds_to_time_string(min_seconds),
            max_time: seconds_to_time_string(max_seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_values() {
        assert_eq!(clean_value(None), "");
        assert_eq!(clean_value(Some("Wristshot")), "Wristshot");
        assert_eq!(clean_numeric_value(Some(f64::NAN)), None);
        assert_eq!(clean_numeric_value(Some(f64::INFINITY)), None);
        assert_eq!(clean_numeric_value(Some(3.5)), Some(3.5));
    }

    #[test]
    fn ranked_counts_break_ties_by_first_seen() {
        let ranked = ranked_counts(["b", "a", "a", "b", "c"]);
        assert_eq!(ranked, vec![("b", 2), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn distinct_sorted_skips_missing() {
        let out = distinct_sorted([Some("b"), None, Some("a"), Some("b")].into_iter());
        assert_eq!(out, vec!["a".to_string(), "b".to_string()]);
    }
}
