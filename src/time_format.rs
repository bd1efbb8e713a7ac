//! Rendering of WCA result values.
//!
//! Values are integers in the upstream encoding: centiseconds for timed
//! events, a move count for fewest-moves singles (×100 for averages) and a
//! packed integer for multi-blind. `-1` is DNF and `-2` is DNS.

use std::fmt;

use serde::{Deserialize, Serialize};
use wca_data::{DNF, DNS};

use crate::events::{FEWEST_MOVES, MULTI_BLIND};

/// Which column a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// A single attempt or the best single of a round.
    Single,
    /// The round average or mean.
    Average,
}

impl ResultKind {
    /// Lower-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Average => "average",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format centiseconds as `M:SS.cc` or `S.cc`.
///
/// `-1` → `DNF`, `-2` → `DNS`, zero and other negatives → empty.
pub fn format_centiseconds(cs: i64) -> String {
    match cs {
        DNF => return "DNF".to_owned(),
        DNS => return "DNS".to_owned(),
        v if v <= 0 => return String::new(),
        _ => {}
    }
    let hundredths = cs % 100;
    let total_seconds = cs / 100;
    let seconds = total_seconds % 60;
    let minutes = total_seconds / 60;
    if minutes > 0 {
        format!("{minutes}:{seconds:02}.{hundredths:02}")
    } else {
        format!("{seconds}.{hundredths:02}")
    }
}

/// Format a value for `event`, taking its encoding into account.
pub fn format_result(value: i64, event: &str, kind: ResultKind) -> String {
    match value {
        DNF => return "DNF".to_owned(),
        DNS => return "DNS".to_owned(),
        v if v <= 0 => return String::new(),
        _ => {}
    }
    match (event, kind) {
        (FEWEST_MOVES, ResultKind::Single) => value.to_string(),
        (FEWEST_MOVES, ResultKind::Average) => {
            format!("{}.{:02}", value / 100, value % 100)
        }
        (MULTI_BLIND, _) => MultiBlind::decode(value)
            .map(|mbf| mbf.to_string())
            .unwrap_or_default(),
        _ => format_centiseconds(value),
    }
}

/// Comparison key for a positive `value` of `event`; smaller is better.
///
/// The key equals `value` except for old-format multi-blind results, which
/// are re-packed in the current format so results from both eras rank by
/// points, then time, then missed cubes.
pub fn ranking_key(value: i64, event: &str) -> i64 {
    if event != MULTI_BLIND || value < OLD_MULTI_BLIND_MIN {
        return value;
    }
    MultiBlind::decode(value).map_or(value, |mbf| mbf.current_format_value())
}

/// Smallest packed value in the old `1SSAATTTTT` multi-blind format.
const OLD_MULTI_BLIND_MIN: i64 = 1_000_000_000;

/// A decoded multi-blind result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiBlind {
    /// Cubes solved.
    pub solved: u32,
    /// Cubes attempted.
    pub attempted: u32,
    /// Elapsed seconds, when recorded.
    pub seconds: Option<u32>,
}

impl MultiBlind {
    /// Decode a packed multi-blind value.
    ///
    /// Current format `0DDTTTTTMM`: difference = 99 − DD, TTTTT seconds
    /// (99999 = unknown), MM missed. Old format `1SSAATTTTT`: solved =
    /// 99 − SS, AA attempted, TTTTT seconds. Non-positive values yield `None`.
    pub fn decode(value: i64) -> Option<Self> {
        if value <= 0 {
            return None;
        }
        if value >= OLD_MULTI_BLIND_MIN {
            let solved = 99 - (value / 10_000_000) % 100;
            let attempted = (value / 100_000) % 100;
            let seconds = value % 100_000;
            return Some(Self {
                solved: u32::try_from(solved).ok()?,
                attempted: u32::try_from(attempted).ok()?,
                seconds: known_seconds(seconds),
            });
        }
        let difference = 99 - value / 10_000_000;
        let seconds = (value / 100) % 100_000;
        let missed = value % 100;
        let solved = difference + missed;
        Some(Self {
            solved: u32::try_from(solved).ok()?,
            attempted: u32::try_from(solved + missed).ok()?,
            seconds: known_seconds(seconds),
        })
    }

    /// Points scored: solved minus missed.
    pub fn points(&self) -> i64 {
        let missed = i64::from(self.attempted) - i64::from(self.solved);
        i64::from(self.solved) - missed
    }

    /// Packed value in the current `0DDTTTTTMM` format. Unknown times pack
    /// as 99999 seconds.
    pub fn current_format_value(&self) -> i64 {
        let missed = i64::from(self.attempted) - i64::from(self.solved);
        let seconds = i64::from(self.seconds.unwrap_or(99_999));
        (99 - self.points()) * 10_000_000 + seconds * 100 + missed
    }
}

fn known_seconds(seconds: i64) -> Option<u32> {
    if seconds == 99_999 {
        None
    } else {
        u32::try_from(seconds).ok()
    }
}

impl fmt::Display for MultiBlind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.solved, self.attempted)?;
        if let Some(secs) = self.seconds {
            write!(f, " {}:{:02}", secs / 60, secs % 60)?;
        }
        Ok(())
    }
}
