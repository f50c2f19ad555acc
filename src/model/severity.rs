//! Issue severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five-level priority classification of an issue.
///
/// The derived `Ord` follows declaration order, so `Info < Minor < Major <
/// Critical < Blocker` and a descending sort puts the most severe level first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
}

impl Severity {
    /// All levels, most severe first. Ranking passes iterate in this order.
    pub const MOST_SEVERE_FIRST: [Severity; 5] = [
        Severity::Blocker,
        Severity::Critical,
        Severity::Major,
        Severity::Minor,
        Severity::Info,
    ];

    /// Ordinal rank: 1 for the most severe level, 5 for the least.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Blocker => 1,
            Severity::Critical => 2,
            Severity::Major => 3,
            Severity::Minor => 4,
            Severity::Info => 5,
        }
    }

    /// The server's uppercase label for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Minor => "MINOR",
            Severity::Major => "MAJOR",
            Severity::Critical => "CRITICAL",
            Severity::Blocker => "BLOCKER",
        }
    }

    /// Fixed display color for table cells, as an RGB triple.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Severity::Info => (51, 255, 51),
            Severity::Minor => (153, 255, 51),
            Severity::Major => (255, 255, 51),
            Severity::Critical => (255, 153, 51),
            Severity::Blocker => (255, 51, 51),
        }
    }

    /// The display color as a CSS hex string.
    pub fn hex_color(self) -> String {
        let (r, g, b) = self.color();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INFO" => Ok(Severity::Info),
            "MINOR" => Ok(Severity::Minor),
            "MAJOR" => Ok(Severity::Major),
            "CRITICAL" => Ok(Severity::Critical),
            "BLOCKER" => Ok(Severity::Blocker),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}
