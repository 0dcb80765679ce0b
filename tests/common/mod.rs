//! Shared test utilities for the rinkside integration harnesses.
//!
//! Import via `mod common; use common::*;` at the top of each harness.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rinkside::{DatasetCache, EngineResult, QueryEngine, RawRow, RawSource};

pub const CAN: &str = "Olympic (Women) - Canada";
pub const USA: &str = "Olympic (Women) - United States";
pub const FIN: &str = "Olympic (Women) - Finland";
pub const OAR: &str = "Olympic (Women) - Olympic Athletes from Russia";

// ---------------------------------------------------------------------------
// RawRowBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawRow`] fixtures. Defaults to a located Canada shot
/// in a Canada vs Olympic Athletes from Russia game.
pub struct RawRowBuilder {
    row: RawRow,
}

impl RawRowBuilder {
    pub fn new() -> Self {
        Self {
            row: RawRow {
                game_date: "2018-02-11".to_string(),
                home_team: CAN.to_string(),
                away_team: OAR.to_string(),
                period: 1,
                clock: Some("20:00".to_string()),
                home_team_skaters: Some(5),
                away_team_skaters: Some(5),
                team: Some(CAN.to_string()),
                player: Some("Sarah Nurse".to_string()),
                event: Some("Shot".to_string()),
                x_coordinate: Some(100.0),
                y_coordinate: Some(40.0),
                detail_1: None,
                detail_2: None,
                detail_3: None,
                detail_4: None,
                player_2: None,
            },
        }
    }

    pub fn game(mut self, date: &str, home: &str, away: &str) -> Self {
        self.row.game_date = date.to_string();
        self.row.home_team = home.to_string();
        self.row.away_team = away.to_string();
        self
    }

    pub fn period(mut self, period: i64) -> Self {
        self.row.period = period;
        self
    }

    pub fn clock(mut self, clock: &str) -> Self {
        self.row.clock = Some(clock.to_string());
        self
    }

    pub fn team(mut self, team: &str) -> Self {
        self.row.team = Some(team.to_string());
        self
    }

    pub fn player(mut self, player: &str) -> Self {
        self.row.player = Some(player.to_string());
        self
    }

    pub fn no_player(mut self) -> Self {
        self.row.player = None;
        self
    }

    pub fn event(mut self, event: &str) -> Self {
        self.row.event = Some(event.to_string());
        self
    }

    pub fn at(mut self, x: Option<f64>, y: Option<f64>) -> Self {
        self.row.x_coordinate = x;
        self.row.y_coordinate = y;
        self
    }

    pub fn detail_1(mut self, detail: &str) -> Self {
        self.row.detail_1 = Some(detail.to_string());
        self
    }

    pub fn build(self) -> RawRow {
        self.row
    }
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// A [`RawSource`] whose rows can be swapped while a cache holds it.
#[derive(Clone, Default)]
pub struct MemorySource {
    rows: Arc<Mutex<Vec<RawRow>>>,
}

impl MemorySource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub fn replace(&self, rows: Vec<RawRow>) {
        *self.rows.lock().unwrap() = rows;
    }
}

impl RawSource for MemorySource {
    fn read_rows(&self) -> EngineResult<Vec<RawRow>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

pub fn engine_over(rows: Vec<RawRow>) -> QueryEngine {
    QueryEngine::new(Arc::new(DatasetCache::new(MemorySource::new(rows))))
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Two games (one rematch on a later date), a club row and an unlocated row.
///
/// Canonical order after normalization:
/// 0. Nurse shot, CAN v OAR, p1 19:41
/// 1. Sosina faceoff win, CAN v OAR, p1 15:30
/// 2. Knight shot, USA v CAN 02-15, p2 10:00
/// 3. Kessel play, USA v CAN 02-15, p3 bad clock
/// 4. Poulin shot, USA v CAN 02-22, p1 00:30
/// 5. Nurse takeaway, USA v CAN 02-22, p1 05:00
pub fn tournament_rows() -> Vec<RawRow> {
    vec![
        RawRowBuilder::new().clock("19:41").build(),
        RawRowBuilder::new()
            .team(OAR)
            .player("Olga Sosina")
            .event("Faceoff Win")
            .clock("15:30")
            .detail_1("Backhand")
            .build(),
        RawRowBuilder::new()
            .game("2019-10-05", "Boston Pride", "Minnesota Whitecaps")
            .team("Boston Pride")
            .player("Jillian Dempsey")
            .build(),
        RawRowBuilder::new()
            .game("2018-02-15", USA, CAN)
            .team(USA)
            .player("Hilary Knight")
            .period(2)
            .clock("10:00")
            .build(),
        RawRowBuilder::new()
            .game("2018-02-15", USA, CAN)
            .team(USA)
            .player("Amanda Kessel")
            .event("Play")
            .period(3)
            .clock("late")
            .build(),
        RawRowBuilder::new()
            .game("2018-02-15", USA, CAN)
            .at(None, Some(10.0))
            .build(),
        RawRowBuilder::new()
            .game("2018-02-22", USA, CAN)
            .player("Marie-Philip Poulin")
            .clock("00:30")
            .build(),
        RawRowBuilder::new()
            .game("2018-02-22", USA, CAN)
            .event("Takeaway")
            .clock("05:00")
            .build(),
    ]
}
