// ---------------------------------------------------------------------------
// Team classification table
// ---------------------------------------------------------------------------

/// Colour used for any team that matches no entry of [`TEAMS`].
pub const DEFAULT_COLOR: &str = "#6B7280";

/// One known team: the substring that identifies it in raw team names and
/// the values derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamStyle {
    pub pattern: &'static str,
    pub color: &'static str,
    pub display: &'static str,
    pub logo: &'static str,
}

/// Known teams in match order. Matching is case-sensitive substring
/// containment and the first hit wins.
pub static TEAMS: [TeamStyle; 4] = [
    TeamStyle {
        pattern: "Canada",
        color: "#DC2626",
        display: "Canada",
        logo: "https://flagcdn.com/w80/ca.png",
    },
    TeamStyle {
        pattern: "Finland",
        color: "#87CEEB",
        display: "Finland",
        logo: "https://flagcdn.com/w80/fi.png",
    },
    TeamStyle {
        pattern: "United States",
        color: "#1D4ED8",
        display: "United States",
        logo: "https://flagcdn.com/w80/us.png",
    },
    // Also covers "Olympic Athletes from Russia".
    TeamStyle {
        pattern: "Russia",
        color: "#FFD700",
        display: "Olympic Athletes from Russia",
        logo: "https://flagcdn.com/w80/ru.png",
    },
];

/// Find the known team a raw team name refers to.
pub fn classify(raw: &str) -> Option<&'static TeamStyle> {
    TEAMS.iter().find(|t| raw.contains(t.pattern))
}

/// Colour code for a raw team name.
pub fn team_color(raw: &str) -> &'static str {
    classify(raw).map_or(DEFAULT_COLOR, |t| t.color)
}

/// Canonical short name for a raw team name; unknown names pass through.
pub fn team_display(raw: &str) -> String {
    classify(raw).map_or_else(|| raw.to_string(), |t| t.display.to_string())
}

/// Logo URL for a display name produced by [`team_display`].
pub fn team_logo(display: &str) -> Option<&'static str> {
    TEAMS.iter().find(|t| t.display == display).map(|t| t.logo)
}
