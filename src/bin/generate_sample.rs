//! Write a deterministic synthetic play-by-play CSV in the schema the
//! server expects.

use std::path::Path;

const HEADER: [&str; 21] = [
    "game_date",
    "Home Team",
    "Away Team",
    "Period",
    "Clock",
    "Home Team Skaters",
    "Away Team Skaters",
    "Home Team Goals",
    "Away Team Goals",
    "Team",
    "Player",
    "Event",
    "X Coordinate",
    "Y Coordinate",
    "Detail 1",
    "Detail 2",
    "Detail 3",
    "Detail 4",
    "Player 2",
    "X Coordinate 2",
    "Y Coordinate 2",
];

const EVENTS: [(&str, [&str; 2]); 6] = [
    ("Shot", ["Wristshot", "Snapshot"]),
    ("Play", ["Direct", "Indirect"]),
    ("Incomplete Play", ["Direct", "Indirect"]),
    ("Faceoff Win", ["", ""]),
    ("Puck Recovery", ["", ""]),
    ("Takeaway", ["", ""]),
];

const ROSTERS: [(&str, [&str; 3]); 4] = [
    ("Canada", ["Marie-Philip Poulin", "Sarah Nurse", "Brianne Jenner"]),
    ("United States", ["Hilary Knight", "Kendall Coyne", "Amanda Kessel"]),
    ("Finland", ["Jenni Hiirikoski", "Michelle Karvinen", "Susanna Tapani"]),
    ("Olympic Athletes from Russia", ["Olga Sosina", "Anna Shokhina", "Lyudmila Belyakova"]),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

fn team_name(team: &str) -> String {
    format!("Olympic (Women) - {team}")
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (date, home roster index, away roster index)
    let games = [
        ("2018-02-11", 0, 3),
        ("2018-02-11", 2, 1),
        ("2018-02-13", 1, 3),
        ("2018-02-15", 1, 0),
        ("2018-02-22", 1, 0),
    ];

    let output_path = Path::new("data/sample.csv");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).expect("Failed to create output directory");
    }
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer.write_record(HEADER).expect("Failed to write header");

    let mut rows = 0usize;
    for &(date, home, away) in &games {
        let home_team = team_name(ROSTERS[home].0);
        let away_team = team_name(ROSTERS[away].0);

        for period in 1..=3 {
            // Countdown clock, one event every few seconds.
            let mut remaining: i64 = 1200;
            while remaining > 0 {
                let side = if rng.next_f64() < 0.5 { home } else { away };
                let (team, roster) = ROSTERS[side];
                let (event, details) = EVENTS[rng.below(EVENTS.len())];
                let player = roster[rng.below(roster.len())];
                let opponent = ROSTERS[if side == home { away } else { home }].1[rng.below(3)];

                // About one in forty events has no location.
                let (x, y) = if rng.below(40) == 0 {
                    (String::new(), String::new())
                } else {
                    (
                        format!("{:.0}", rng.next_f64() * 200.0),
                        format!("{:.0}", rng.next_f64() * 85.0),
                    )
                };
                let player_2 = if event == "Faceoff Win" { opponent } else { "" };

                let record = [
                    date.to_string(),
                    home_team.clone(),
                    away_team.clone(),
                    period.to_string(),
                    format!("{}:{:02}", remaining / 60, remaining % 60),
                    "5".to_string(),
                    "5".to_string(),
                    "0".to_string(),
                    "0".to_string(),
                    team_name(team),
                    player.to_string(),
                    event.to_string(),
                    x,
                    y,
                    details[rng.below(2)].to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                    player_2.to_string(),
                    String::new(),
                    String::new(),
                ];
                writer.write_record(&record).expect("Failed to write row");
                rows += 1;
                remaining -= 5 + rng.below(40) as i64;
            }
        }
    }

    // A club game the competition filter should drop.
    writer
        .write_record([
            "2019-10-05", "Boston Pride", "Minnesota Whitecaps", "1", "19:30", "5", "5", "0", "0",
            "Boston Pride", "Jillian Dempsey", "Shot", "150", "40", "Snapshot", "", "", "", "", "",
            "",
        ])
        .expect("Failed to write row");
    rows += 1;

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} events to {}", output_path.display());
}
