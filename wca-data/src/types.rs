//! Response models for the community export and the official API.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel for a did-not-finish attempt.
pub const DNF: i64 = -1;
/// Sentinel for a did-not-start attempt.
pub const DNS: i64 = -2;

/// A person's full result history from the community export.
///
/// `results` preserves the document's key order: competitions newest first,
/// and within an event, rounds listed from the final backwards. Medals,
/// records and ranks are read from the official person document instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonResults {
    /// WCA id, e.g. `2016LOPE37`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// Number of competitions attended.
    pub number_of_competitions: u32,
    /// Competition ids, as listed by the export.
    pub competition_ids: Vec<String>,
    /// `competition id → event code → rounds`.
    pub results: IndexMap<String, IndexMap<String, Vec<RoundResult>>>,
}

impl PersonResults {
    /// True when the person has no recorded rounds at all.
    pub fn is_empty(&self) -> bool {
        self.results
            .values()
            .all(|events| events.values().all(Vec::is_empty))
    }
}

/// One round of one event at one competition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundResult {
    /// Round label as published (`"Final"`, `"First round"`, `"1"`, ...).
    pub round: String,
    /// Placing in the round, when published.
    pub position: Option<u32>,
    /// Best single in centiseconds (or event-specific encoding).
    pub best: i64,
    /// Average in centiseconds (or event-specific encoding); 0 when none.
    pub average: i64,
    /// Round format code (`a`, `m`, `1`, `2`, `3`).
    pub format: String,
    /// Individual attempts, up to five.
    pub solves: Vec<i64>,
}

/// Competition metadata from the community export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Competition {
    /// Competition id, e.g. `MadridOpen2019`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Host city.
    pub city: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// First and last day.
    pub date: CompetitionDate,
    /// Venue details.
    pub venue: Venue,
    /// Events held, as codes.
    pub events: Vec<String>,
}

impl Competition {
    /// The first day of the competition, if published.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.date.from
    }

    /// Venue coordinates as `(latitude, longitude)`, if published.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.venue
            .coordinates
            .as_ref()
            .map(|c| (c.latitude, c.longitude))
    }
}

/// Date span of a competition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitionDate {
    /// First day.
    pub from: Option<NaiveDate>,
    /// Last day.
    pub till: Option<NaiveDate>,
    /// Number of days.
    pub number_of_days: Option<u32>,
}

/// Venue of a competition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Venue {
    /// Venue name.
    pub name: String,
    /// Geographic position, if published.
    pub coordinates: Option<Coordinates>,
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// A registered competitor, from the official API competitor list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Competitor {
    /// WCA id; newcomers have none.
    pub wca_id: Option<String>,
    /// Display name.
    pub name: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_iso2: Option<String>,
}

/// One published scramble, from the official API scramble list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scramble {
    /// Event code, e.g. `333`.
    pub event_id: String,
    /// Round type code: `1`, `2`, `3`, `f`, or `d`/`e`/`g`/`c` for
    /// combined rounds.
    pub round_type_id: String,
    /// Scramble group letter.
    pub group_id: String,
    /// Whether this is an extra (backup) scramble.
    pub is_extra: bool,
    /// Position within the group, 1-based; extras count separately.
    pub scramble_num: u32,
    /// Scramble sequence; multi-blind and megaminx use several lines.
    pub scramble: String,
}
