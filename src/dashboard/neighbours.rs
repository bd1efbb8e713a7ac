//! "Neighbours": the people met at the most competitions.
//!
//! Competitor lists come from the official API, one request per
//! competition. The client paces these requests itself; on a rate-limit
//! response the list is retried a bounded number of times before the
//! competition is skipped.

use std::collections::{HashMap, HashSet};

use chrono::Datelike;
use serde::Serialize;
use wca_data::{ProfileSource, WcaError};

use crate::profile::Profile;

/// Someone who attended at least one of the same competitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighbour {
    pub name: String,
    /// `None` for newcomers without an id.
    pub wca_id: Option<String>,
    /// Competitions attended together.
    pub count: u32,
}

/// Ids of the attended competitions held in `year`, or all of them.
pub fn competitions_in_year(profile: &Profile, year: Option<i32>) -> Vec<&str> {
    let mut seen = HashSet::new();
    profile
        .rows
        .iter()
        .filter(|r| year.is_none_or(|y| r.date.is_some_and(|d| d.year() == y)))
        .map(|r| r.competition_id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Years with at least one dated competition, newest first.
pub fn active_years(profile: &Profile) -> Vec<i32> {
    let mut years: Vec<i32> = profile.rows.iter().filter_map(|r| r.date.map(|d| d.year())).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Count co-attendance over the competitions of `year` (all years when
/// `None`). The profile owner is excluded. Sorted by count descending,
/// then name.
pub async fn find_neighbours<S: ProfileSource>(
    source: &S,
    profile: &Profile,
    year: Option<i32>,
    retries: u32,
) -> Vec<Neighbour> {
    let competitions = competitions_in_year(profile, year);
    tracing::info!(
        wca_id = %profile.wca_id,
        competitions = competitions.len(),
        "collecting competitor lists"
    );

    let own_name = profile.display_name();
    let mut tally: HashMap<String, Neighbour> = HashMap::new();

    for competition_id in competitions {
        let Some(competitors) = competitor_list(source, competition_id, retries).await else {
            continue;
        };
        let mut seen_here: HashSet<String> = HashSet::new();
        for person in competitors {
            let is_self = match &person.wca_id {
                Some(id) => id.eq_ignore_ascii_case(&profile.wca_id),
                None => person.name == own_name,
            };
            if is_self {
                continue;
            }
            let key = match &person.wca_id {
                Some(id) => id.to_ascii_uppercase(),
                None => format!("name:{}", person.name),
            };
            if !seen_here.insert(key.clone()) {
                continue;
            }
            tally
                .entry(key)
                .or_insert_with(|| Neighbour {
                    name: person.name.clone(),
                    wca_id: person.wca_id.clone(),
                    count: 0,
                })
                .count += 1;
        }
    }

    let mut neighbours: Vec<Neighbour> = tally.into_values().collect();
    sort_neighbours(&mut neighbours);
    neighbours
}

async fn competitor_list<S: ProfileSource>(
    source: &S,
    competition_id: &str,
    retries: u32,
) -> Option<Vec<wca_data::Competitor>> {
    let mut attempt = 0;
    loop {
        match source.competitors(competition_id).await {
            Ok(Some(list)) => return Some(list),
            Ok(None) => {
                tracing::debug!(competition = competition_id, "no competitor list");
                return None;
            }
            Err(WcaError::RateLimited(host)) if attempt < retries => {
                attempt += 1;
                tracing::debug!(competition = competition_id, %host, attempt, "rate limited, retrying");
            }
            Err(err) => {
                tracing::warn!(competition = competition_id, error = %err, "competitor list unavailable");
                return None;
            }
        }
    }
}

/// Count descending, then name, then id.
pub fn sort_neighbours(neighbours: &mut [Neighbour]) {
    neighbours.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.wca_id.cmp(&b.wca_id))
    });
}

/// Podium place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    const PODIUM: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    /// Medal emoji.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Gold => "🥇",
            Self::Silver => "🥈",
            Self::Bronze => "🥉",
        }
    }
}

/// Everyone sharing one count on the podium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodiumTier {
    pub medal: Medal,
    /// Competitions attended together by everyone in the tier.
    pub count: u32,
    /// Names in the tier, sorted.
    pub names: Vec<String>,
}

/// A ranked entry below the podium.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNeighbour {
    /// Tied entries share the rank of the first of them.
    pub rank: usize,
    pub name: String,
    /// Competitions attended together.
    pub count: u32,
    /// `count` relative to the highest count.
    pub share: f64,
}

/// The neighbours page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NeighbourBoard {
    /// Up to three tiers, gold first.
    pub podium: Vec<PodiumTier>,
    /// The ranked list below the podium.
    pub others: Vec<RankedNeighbour>,
    /// Everyone found, podium included.
    pub total: usize,
}

/// Arrange sorted neighbours into a podium and a ranked list.
///
/// Podium tiers are whole count levels taken from the top until at least
/// three people are on it. The next `list_len` people follow, ranked from
/// just after the podium; people with equal counts share a rank.
pub fn neighbour_board(neighbours: &[Neighbour], list_len: usize) -> NeighbourBoard {
    let mut podium: Vec<PodiumTier> = Vec::new();
    let mut on_podium = 0usize;

    let mut rest = neighbours;
    while on_podium < 3 && podium.len() < Medal::PODIUM.len() {
        let Some(first) = rest.first() else { break };
        let tier_len = rest.iter().take_while(|n| n.count == first.count).count();
        podium.push(PodiumTier {
            medal: Medal::PODIUM[podium.len()],
            count: first.count,
            names: rest[..tier_len].iter().map(|n| n.name.clone()).collect(),
        });
        on_podium += tier_len;
        rest = &rest[tier_len..];
    }

    let max_count = neighbours.first().map_or(0, |n| n.count);
    let mut others = Vec::new();
    let mut rank = on_podium + 1;
    let shown = &rest[..rest.len().min(list_len)];
    let mut i = 0;
    while i < shown.len() {
        let count = shown[i].count;
        let tie_len = shown[i..].iter().take_while(|n| n.count == count).count();
        for n in &shown[i..i + tie_len] {
            others.push(RankedNeighbour {
                rank,
                name: n.name.clone(),
                count: n.count,
                share: if max_count == 0 {
                    0.0
                } else {
                    f64::from(n.count) / f64::from(max_count)
                },
            });
        }
        rank += tie_len;
        i += tie_len;
    }

    NeighbourBoard {
        podium,
        others,
        total: neighbours.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{profile_with, row};
    use std::sync::Mutex;
    use wca_data::{Competition, Competitor, FlatRecord, PersonResults};

    fn n(name: &str, count: u32) -> Neighbour {
        Neighbour {
            name: name.into(),
            wca_id: None,
            count,
        }
    }

    fn names(tier: &PodiumTier) -> Vec<&str> {
        tier.names.iter().map(String::as_str).collect()
    }

    #[test]
    fn podium_of_three_single_people() {
        let list = vec![n("A", 9), n("B", 7), n("C", 5), n("D", 4), n("E", 4), n("F", 1)];
        let board = neighbour_board(&list, 20);
        assert_eq!(board.podium.len(), 3);
        assert_eq!(board.podium[0].medal, Medal::Gold);
        assert_eq!(names(&board.podium[2]), vec!["C"]);
        let ranks: Vec<(usize, &str)> = board.others.iter().map(|o| (o.rank, o.name.as_str())).collect();
        assert_eq!(ranks, vec![(4, "D"), (4, "E"), (6, "F")]);
        assert!((board.others[0].share - 4.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn tied_top_fills_podium_early() {
        let list = vec![n("A", 5), n("B", 5), n("C", 5), n("D", 3), n("E", 2)];
        let board = neighbour_board(&list, 20);
        assert_eq!(board.podium.len(), 1);
        assert_eq!(names(&board.podium[0]), vec!["A", "B", "C"]);
        assert_eq!(board.others[0].rank, 4);
        assert_eq!(board.others[1].rank, 5);
    }

    #[test]
    fn two_tiers_when_second_is_shared() {
        let list = vec![n("A", 6), n("B", 4), n("C", 4), n("D", 2)];
        let board = neighbour_board(&list, 20);
        assert_eq!(board.podium.len(), 2);
        assert_eq!(board.podium[1].medal, Medal::Silver);
        assert_eq!(board.others.len(), 1);
        assert_eq!(board.others[0].rank, 4);
    }

    #[test]
    fn list_length_is_capped() {
        let mut list = vec![n("A", 100), n("B", 99), n("C", 98)];
        list.extend((0..30).map(|i| n(&format!("P{i:02}"), 1)));
        let board = neighbour_board(&list, 20);
        assert_eq!(board.others.len(), 20);
        assert!(board.others.iter().all(|o| o.rank == 4));
        assert_eq!(board.total, 33);
    }

    #[test]
    fn fewer_than_three_people() {
        let board = neighbour_board(&[n("A", 2), n("B", 1)], 20);
        assert_eq!(board.podium.len(), 2);
        assert!(board.others.is_empty());
        assert_eq!(neighbour_board(&[], 20), NeighbourBoard::default());
    }

    #[test]
    fn sort_by_count_then_name() {
        let mut list = vec![n("Zed", 2), n("Amy", 2), n("Bob", 5)];
        sort_neighbours(&mut list);
        let order: Vec<&str> = list.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(order, vec!["Bob", "Amy", "Zed"]);
    }

    #[test]
    fn years_and_competitions_filtered() {
        let profile = profile_with(vec![
            row("A", "2019-01-01", "333", 1, 1),
            row("A", "2019-01-01", "222", 1, 1),
            row("B", "2021-01-01", "333", 1, 1),
        ]);
        assert_eq!(active_years(&profile), vec![2021, 2019]);
        assert_eq!(competitions_in_year(&profile, Some(2019)), vec!["A"]);
        assert_eq!(competitions_in_year(&profile, None), vec!["A", "B"]);
        assert!(competitions_in_year(&profile, Some(2020)).is_empty());
    }

    /// Competitor lists keyed by competition; the first `rate_limits`
    /// requests for `"Flaky"` are rejected.
    struct Lists {
        lists: HashMap<String, Vec<Competitor>>,
        rate_limits: Mutex<u32>,
    }

    impl ProfileSource for Lists {
        async fn person_results(&self, _: &str) -> Result<Option<PersonResults>, WcaError> {
            Ok(None)
        }

        async fn person_info(&self, _: &str) -> Result<Option<FlatRecord>, WcaError> {
            Ok(None)
        }

        async fn competition(&self, _: &str) -> Result<Option<Competition>, WcaError> {
            Ok(None)
        }

        async fn competitors(&self, id: &str) -> Result<Option<Vec<Competitor>>, WcaError> {
            if id == "Flaky" {
                let mut left = self.rate_limits.lock().expect("lock");
                if *left > 0 {
                    *left -= 1;
                    return Err(WcaError::RateLimited("test".into()));
                }
            }
            if id == "Broken" {
                return Err(WcaError::Http("boom".into()));
            }
            Ok(self.lists.get(id).cloned())
        }
    }

    fn person(name: &str, id: Option<&str>) -> Competitor {
        Competitor {
            wca_id: id.map(str::to_owned),
            name: name.into(),
            country_iso2: Some("ES".into()),
        }
    }

    fn source(rate_limits: u32) -> Lists {
        let me = person("Test Cuber", Some("2016TEST01"));
        let alice = person("Alice", Some("2015ALIC01"));
        let bob = person("Bob", Some("2015BOBB01"));
        let newcomer = person("Newcomer", None);
        Lists {
            lists: [
                ("A".to_string(), vec![me.clone(), alice.clone(), bob.clone(), alice.clone()]),
                ("Flaky".to_string(), vec![me.clone(), alice.clone(), newcomer]),
                ("C".to_string(), vec![me, bob]),
            ]
            .into_iter()
            .collect(),
            rate_limits: Mutex::new(rate_limits),
        }
    }

    fn attended() -> Profile {
        profile_with(vec![
            row("A", "2019-01-01", "333", 1, 1),
            row("Flaky", "2019-06-01", "333", 1, 1),
            row("Broken", "2020-01-01", "333", 1, 1),
            row("C", "2020-06-01", "333", 1, 1),
        ])
    }

    #[tokio::test]
    async fn counts_co_attendance_excluding_self() {
        let found = find_neighbours(&source(1), &attended(), None, 3).await;
        let counts: Vec<(&str, u32)> = found.iter().map(|n| (n.name.as_str(), n.count)).collect();
        assert_eq!(counts, vec![("Alice", 2), ("Bob", 2), ("Newcomer", 1)]);
    }

    #[tokio::test]
    async fn rate_limited_list_skipped_after_retries() {
        let found = find_neighbours(&source(10), &attended(), None, 2).await;
        let alice = found.iter().find(|n| n.name == "Alice").expect("alice");
        assert_eq!(alice.count, 1);
        assert!(found.iter().all(|n| n.name != "Newcomer"));
    }

    #[tokio::test]
    async fn year_filter_limits_lookups() {
        let found = find_neighbours(&source(0), &attended(), Some(2020), 0).await;
        let counts: Vec<(&str, u32)> = found.iter().map(|n| (n.name.as_str(), n.count)).collect();
        assert_eq!(counts, vec![("Bob", 1)]);
    }
}
