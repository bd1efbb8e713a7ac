//! Result rows: one per round, joined with competition metadata and put in
//! chronological order.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use wca_data::{Competition, PersonResults};

use crate::pr::PrLabel;

/// Placeholder for metadata that could not be fetched.
pub const UNKNOWN: &str = "Unknown";

/// Stage of a competition a round belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundKind {
    /// Qualification round.
    Qualification,
    /// First round.
    First,
    /// Second round (including B finals).
    Second,
    /// Third round / semi final.
    Semi,
    /// Final.
    Final,
    /// Label we do not recognise; sorts after the final.
    Other,
}

impl RoundKind {
    /// Classify a published round label: either a round type id
    /// (`0`, `h`, `1`, `d`, `2`, `e`, `b`, `3`, `g`, `f`, `c`) or a name such
    /// as `"First round"`, `"Semi Final"` or `"Final"`.
    pub fn parse(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "0" | "h" => return Self::Qualification,
            "1" | "d" => return Self::First,
            "2" | "e" | "b" => return Self::Second,
            "3" | "g" => return Self::Semi,
            "f" | "c" => return Self::Final,
            _ => {}
        }
        if label.contains("qualif") {
            Self::Qualification
        } else if label.contains("first") {
            Self::First
        } else if label.contains("second") || label.starts_with("b final") {
            Self::Second
        } else if label.contains("third") || label.contains("semi") {
            Self::Semi
        } else if label.contains("final") {
            Self::Final
        } else {
            Self::Other
        }
    }
}

/// One round of one event at one competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    /// Competition id.
    pub competition_id: String,
    /// Competition name, or [`UNKNOWN`].
    pub competition_name: String,
    /// First day of the competition, if known.
    pub date: Option<NaiveDate>,
    /// Host country ISO code, empty when unknown.
    pub country: String,
    /// Event code.
    pub event: String,
    /// Round label as published.
    pub round: String,
    /// Classified round stage.
    pub round_kind: RoundKind,
    /// Placing, when published.
    pub position: Option<u32>,
    /// Best single (upstream encoding).
    pub best: i64,
    /// Average (upstream encoding); 0 when the round has none.
    pub average: i64,
    /// Individual attempts, at most five.
    pub solves: Vec<i64>,
    /// Personal-record label, filled by [`crate::pr::label_prs`].
    pub pr: Option<PrLabel>,
}

impl ResultRow {
    /// The row's date formatted `YYYY-MM-DD`, or [`UNKNOWN`].
    pub fn date_label(&self) -> String {
        self.date
            .map_or_else(|| UNKNOWN.to_owned(), |d| d.format("%Y-%m-%d").to_string())
    }
}

/// Maximum attempts kept per row.
const MAX_SOLVES: usize = 5;

/// Build chronologically ordered rows from a person's results document.
///
/// The document lists competitions newest first and rounds from the final
/// backwards; both are reversed to get source-chronological order. Rows are
/// then stably sorted by competition date, competition, and round stage.
/// A competition whose metadata is missing inherits the date of the
/// competition before it so it keeps its place in the sequence.
pub fn build_rows(
    person: &PersonResults,
    competitions: &HashMap<String, Competition>,
) -> Vec<ResultRow> {
    let mut keyed: Vec<(Option<NaiveDate>, usize, ResultRow)> = Vec::new();
    let mut carried_date: Option<NaiveDate> = None;

    for (comp_index, (comp_id, events)) in person.results.iter().rev().enumerate() {
        let meta = competitions.get(comp_id);
        let date = meta.and_then(Competition::start_date);
        if date.is_some() {
            carried_date = date;
        }
        let sort_date = date.or(carried_date);

        let (name, country) = match meta {
            Some(c) if !c.name.is_empty() => (c.name.clone(), c.country.clone()),
            Some(c) => (UNKNOWN.to_owned(), c.country.clone()),
            None => (UNKNOWN.to_owned(), String::new()),
        };

        for (event, rounds) in events {
            for round in rounds.iter().rev() {
                let row = ResultRow {
                    competition_id: comp_id.clone(),
                    competition_name: name.clone(),
                    date,
                    country: country.clone(),
                    event: event.clone(),
                    round: round.round.clone(),
                    round_kind: RoundKind::parse(&round.round),
                    position: round.position,
                    best: round.best,
                    average: round.average,
                    solves: round.solves.iter().take(MAX_SOLVES).copied().collect(),
                    pr: None,
                };
                keyed.push((sort_date, comp_index, row));
            }
        }
    }

    keyed.sort_by(|(da, ia, ra), (db, ib, rb)| {
        da.cmp(db)
            .then(ia.cmp(ib))
            .then(ra.round_kind.cmp(&rb.round_kind))
    });
    keyed.into_iter().map(|(_, _, row)| row).collect()
}
