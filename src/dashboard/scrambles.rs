//! Scramble explorer: a competition's published scrambles grouped by
//! event, round and group.

use std::collections::BTreeMap;

use serde::Serialize;
use wca_data::Scramble;

use crate::events::{compare_events, event_name};
use crate::rows::RoundKind;

const MEGAMINX: &str = "minx";

/// Readable name for a round type code such as `1`, `f` or `d`.
pub fn round_name(code: &str) -> String {
    let name = match code {
        "0" => "Qualification",
        "h" => "Combined Qualification",
        "1" => "First Round",
        "d" => "Combined First Round",
        "2" => "Second Round",
        "e" => "Combined Second Round",
        "b" => "B Final",
        "3" => "Semi-final",
        "g" => "Combined Third Round",
        "f" => "Final",
        "c" => "Combined Final",
        other => return format!("Round {other}"),
    };
    name.to_owned()
}

/// One scramble as listed on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrambleLine {
    /// Position within the group.
    pub num: u32,
    /// `3` for a regular scramble, `E1` for the first extra.
    pub label: String,
    pub is_extra: bool,
    /// Scramble text; multi-line for multi-blind attempts.
    pub scramble: String,
}

/// Scrambles of one group: regular ones first, then extras, each by number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrambleGroup {
    /// Group letter.
    pub group: String,
    pub scrambles: Vec<ScrambleLine>,
}

/// All groups of one round, alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundScrambles {
    /// Round type code.
    pub round: String,
    /// Readable round name, e.g. `Combined Final`.
    pub round_name: String,
    pub groups: Vec<ScrambleGroup>,
}

/// All rounds of one event, first round to final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventScrambles {
    /// Event code.
    pub event: String,
    pub event_name: String,
    pub rounds: Vec<RoundScrambles>,
}

type GroupMap<'a> = BTreeMap<&'a str, Vec<&'a Scramble>>;

/// Build the event → round → group tree. Events follow the catalogue, with
/// unknown events last.
pub fn scramble_sheet(scrambles: &[Scramble]) -> Vec<EventScrambles> {
    let mut tree: BTreeMap<&str, BTreeMap<&str, GroupMap<'_>>> = BTreeMap::new();
    for s in scrambles {
        tree.entry(s.event_id.as_str())
            .or_default()
            .entry(s.round_type_id.as_str())
            .or_default()
            .entry(s.group_id.as_str())
            .or_default()
            .push(s);
    }

    let mut events: Vec<EventScrambles> = tree
        .into_iter()
        .map(|(event, rounds)| {
            let mut rounds: Vec<RoundScrambles> = rounds
                .into_iter()
                .map(|(round, groups)| RoundScrambles {
                    round: round.to_owned(),
                    round_name: round_name(round),
                    groups: groups
                        .into_iter()
                        .map(|(group, list)| scramble_group(event, group, list))
                        .collect(),
                })
                .collect();
            rounds.sort_by(|a, b| {
                RoundKind::parse(&a.round)
                    .cmp(&RoundKind::parse(&b.round))
                    .then_with(|| a.round.cmp(&b.round))
            });
            EventScrambles {
                event: event.to_owned(),
                event_name: event_name(event).to_owned(),
                rounds,
            }
        })
        .collect();
    events.sort_by(|a, b| compare_events(&a.event, &b.event));
    events
}

fn scramble_group(event: &str, group: &str, mut list: Vec<&Scramble>) -> ScrambleGroup {
    list.sort_by_key(|s| (s.is_extra, s.scramble_num));
    let scrambles = list
        .into_iter()
        .map(|s| ScrambleLine {
            num: s.scramble_num,
            label: if s.is_extra {
                format!("E{}", s.scramble_num)
            } else {
                s.scramble_num.to_string()
            },
            is_extra: s.is_extra,
            // Megaminx scrambles arrive one row per line; show them as one.
            scramble: if event == MEGAMINX {
                s.scramble.lines().map(str::trim).collect::<Vec<_>>().join(" ")
            } else {
                s.scramble.clone()
            },
        })
        .collect();
    ScrambleGroup {
        group: group.to_owned(),
        scrambles,
    }
}
