//! Competition history: list, activity heatmap and map points.

use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::country::flag_emoji;
use crate::events::sort_events;
use crate::profile::Profile;

/// Offset applied to co-located venues, roughly five metres.
pub const JITTER_DEGREES: f64 = 0.000045;

/// One attended competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitionEntry {
    /// Competition id.
    pub id: String,
    pub name: String,
    /// Start date; `None` when metadata is missing.
    pub date: Option<NaiveDate>,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// Flag emoji for `country`.
    pub flag: String,
    /// Events competed in, catalogue order.
    pub events: Vec<String>,
}

/// Attended competitions, newest first.
pub fn competition_list(profile: &Profile) -> Vec<CompetitionEntry> {
    let mut entries: Vec<CompetitionEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in &profile.rows {
        let slot = *index.entry(row.competition_id.as_str()).or_insert_with(|| {
            entries.push(CompetitionEntry {
                id: row.competition_id.clone(),
                name: row.competition_name.clone(),
                date: row.date,
                country: row.country.clone(),
                flag: flag_emoji(&row.country),
                events: Vec::new(),
            });
            entries.len() - 1
        });
        let events = &mut entries[slot].events;
        if !events.contains(&row.event) {
            events.push(row.event.clone());
        }
    }

    for entry in &mut entries {
        sort_events(&mut entry.events);
    }
    entries.reverse();
    entries
}

/// Competitions per year and month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    /// `year → [January..December]` counts.
    pub years: BTreeMap<i32, [u32; 12]>,
}

impl Heatmap {
    /// Largest single-month count.
    pub fn max(&self) -> u32 {
        self.years
            .values()
            .flat_map(|months| months.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Competitions in `year`.
    pub fn year_total(&self, year: i32) -> u32 {
        self.years.get(&year).map_or(0, |m| m.iter().sum())
    }
}

/// Count distinct dated competitions per year × month.
pub fn heatmap(profile: &Profile) -> Heatmap {
    let mut map = Heatmap::default();
    for entry in competition_list(profile) {
        let Some(date) = entry.date else { continue };
        let months = map.years.entry(date.year()).or_insert([0; 12]);
        months[date.month0() as usize] += 1;
    }
    map
}

/// A competition venue to plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub competition_id: String,
    /// Competition name.
    pub name: String,
    pub date: Option<NaiveDate>,
    /// Latitude in degrees, jittered for shared venues.
    pub latitude: f64,
    /// Longitude in degrees, jittered for shared venues.
    pub longitude: f64,
}

/// Map points plus a suggested centre.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompetitionMap {
    /// One point per competition with known coordinates.
    pub points: Vec<MapPoint>,
    /// Centre of the densest 1° cell, `(lat, lon)`.
    pub centre: Option<(f64, f64)>,
}

/// Venue positions of every attended competition with coordinates.
///
/// Competitions sharing exact coordinates are spread on a small circle so
/// they stay distinguishable.
pub fn map_points(profile: &Profile) -> CompetitionMap {
    let mut points: Vec<MapPoint> = competition_list(profile)
        .into_iter()
        .filter_map(|entry| {
            let (latitude, longitude) = profile.competitions.get(&entry.id)?.coordinates()?;
            Some(MapPoint {
                competition_id: entry.id,
                name: entry.name,
                date: entry.date,
                latitude,
                longitude,
            })
        })
        .collect();

    spread_colocated(&mut points);
    let centre = densest_cell(&points);
    CompetitionMap { points, centre }
}

fn spread_colocated(points: &mut [MapPoint]) {
    let mut groups: HashMap<(u64, u64), Vec<usize>> = HashMap::new();
    for (i, p) in points.iter().enumerate() {
        groups
            .entry((p.latitude.to_bits(), p.longitude.to_bits()))
            .or_default()
            .push(i);
    }
    for members in groups.values().filter(|m| m.len() > 1) {
        let n = members.len() as f64;
        for (k, &i) in members.iter().enumerate() {
            let angle = 2.0 * PI * k as f64 / n;
            points[i].latitude += JITTER_DEGREES * angle.cos();
            points[i].longitude += JITTER_DEGREES * angle.sin();
        }
    }
}

fn densest_cell(points: &[MapPoint]) -> Option<(f64, f64)> {
    let mut cells: BTreeMap<(i64, i64), usize> = BTreeMap::new();
    for p in points {
        let key = (p.latitude.round() as i64, p.longitude.round() as i64);
        *cells.entry(key).or_insert(0) += 1;
    }
    let mut best: Option<((i64, i64), usize)> = None;
    for (key, count) in cells {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((key, count));
        }
    }
    best.map(|((lat, lon), _)| (lat as f64, lon as f64))
}
