use serde::Deserialize;

use super::model::CanonicalRow;
use crate::error::{EngineError, EngineResult};

// ---------------------------------------------------------------------------
// Untyped query parameters
// ---------------------------------------------------------------------------

/// Value of the `game` parameter that means "every game".
pub const ALL_GAMES: &str = "all";

/// Filter parameters as they arrive from a caller, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    pub game: Option<String>,
    pub team: Option<String>,
    pub event: Option<String>,
    pub period: Option<String>,
    pub player: Option<String>,
}

// ---------------------------------------------------------------------------
// Typed filter
// ---------------------------------------------------------------------------

/// A conjunction of optional predicates. `None` means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Exact `game_id`.
    pub game: Option<String>,
    /// Exact `team_display`.
    pub team: Option<String>,
    /// Exact raw event type.
    pub event: Option<String>,
    pub period: Option<i64>,
    /// Case-insensitive substring of the player name, stored lowercased.
    pub player: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse a period parameter. Blank means no filter.
pub fn parse_period(raw: Option<&str>) -> EngineResult<Option<i64>> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<i64>()
        .map(Some)
        .map_err(|e| EngineError::InvalidArgument {
            param: "period",
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

impl TryFrom<EventQuery> for EventFilter {
    type Error = EngineError;

    fn try_from(query: EventQuery) -> EngineResult<Self> {
        let period = parse_period(query.period.as_deref())?;
        Ok(EventFilter {
            game: non_empty(query.game).filter(|g| g != ALL_GAMES),
            team: non_empty(query.team),
            event: non_empty(query.event),
            period,
            player: non_empty(query.player).map(|p| p.to_lowercase()),
        })
    }
}

impl EventFilter {
    pub fn for_game(mut self, game: impl Into<String>) -> Self {
        self.game = non_empty(Some(game.into())).filter(|g| g != ALL_GAMES);
        self
    }

    pub fn for_team(mut self, team: impl Into<String>) -> Self {
        self.team = non_empty(Some(team.into()));
        self
    }

    pub fn for_event(mut self, event: impl Into<String>) -> Self {
        self.event = non_empty(Some(event.into()));
        self
    }

    pub fn for_period(mut self, period: i64) -> Self {
        self.period = Some(period);
        self
    }

    pub fn for_player(mut self, needle: &str) -> Self {
        self.player = non_empty(Some(needle.to_lowercase()));
        self
    }

    /// Whether no predicate is active.
    pub fn is_unrestricted(&self) -> bool {
        *self == EventFilter::default()
    }

    /// Whether a row passes every active predicate.
    ///
    /// A row with no value in a filtered column never passes that column.
    pub fn matches(&self, row: &CanonicalRow) -> bool {
        if let Some(game) = &self.game {
            if row.game_id != *game {
                return false;
            }
        }
        if let Some(team) = &self.team {
            if row.team_display.as_deref() != Some(team.as_str()) {
                return false;
            }
        }
        if let Some(event) = &self.event {
            if row.event.as_deref() != Some(event.as_str()) {
                return false;
            }
        }
        if let Some(period) = self.period {
            if row.period != period {
                return false;
            }
        }
        if let Some(needle) = &self.player {
            match &row.player {
                Some(name) if name.to_lowercase().contains(needle.as_str()) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Return indices of rows that pass the filter, in table order.
pub fn filtered_indices(rows: &[CanonicalRow], filter: &EventFilter) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| filter.matches(row))
        .map(|(i, _)| i)
        .collect()
}
