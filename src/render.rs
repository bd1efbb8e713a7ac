//! Plain-text rendering of dashboard pages.
//!
//! Every function writes into any [`fmt::Write`] so output can go to a
//! `String` in tests and to stdout in the CLI.

use std::fmt::{self, Write};

use crate::dashboard::bests::{BestResult, EventBests, Period};
use crate::dashboard::competitions::{CompetitionEntry, CompetitionMap, Heatmap};
use crate::dashboard::neighbours::NeighbourBoard;
use crate::dashboard::progression::{ProgressPoint, YearComparison};
use crate::dashboard::rankings::{EventRanks, Ranks};
use crate::dashboard::scrambles::EventScrambles;
use crate::dashboard::statistics::{EventCount, Statistics};
use crate::dashboard::summary::{Milestone, Summary, date_range_label, most_played_label};
use crate::events::event_name;
use crate::profile::Profile;
use crate::rows::UNKNOWN;
use crate::time_format::{ResultKind, format_result};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Column-aligned text table.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Table with the given header row.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render empty.
    pub fn push<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let w = cell.chars().count();
                match widths.get_mut(i) {
                    Some(existing) => *existing = (*existing).max(w),
                    None => widths.push(w),
                }
            }
        }
        widths
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_line(f, &widths, &self.headers)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(f, &widths, &rule)?;
        for row in &self.rows {
            write_line(f, &widths, row)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, widths: &[usize], cells: &[String]) -> fmt::Result {
    let mut out = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map_or("", String::as_str);
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        out.extend(std::iter::repeat_n(' ', pad));
    }
    writeln!(f, "{}", out.trim_end())
}

fn heading(out: &mut impl Write, title: &str) -> fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

fn date_or_unknown(date: Option<chrono::NaiveDate>) -> String {
    date.map_or_else(|| UNKNOWN.to_owned(), |d| d.format("%d %b %Y").to_string())
}

/// Every round, newest first.
pub fn results(out: &mut impl Write, profile: &Profile) -> fmt::Result {
    heading(out, &format!("Results: {} ({})", profile.display_name(), profile.wca_id))?;
    let mut table = Table::new([
        "Date", "Competition", "Event", "Round", "Pos", "Single", "Average", "Solves", "PR",
    ]);
    for row in profile.rows_newest_first() {
        let solves: Vec<String> = row
            .solves
            .iter()
            .map(|s| format_result(*s, &row.event, ResultKind::Single))
            .collect();
        table.push([
            row.date_label(),
            row.competition_name.clone(),
            event_name(&row.event).to_owned(),
            row.round.clone(),
            row.position.map_or_else(String::new, |p| p.to_string()),
            format_result(row.best, &row.event, ResultKind::Single),
            format_result(row.average, &row.event, ResultKind::Average),
            solves.join(" "),
            row.pr.map_or_else(String::new, |p| p.to_string()),
        ]);
    }
    write!(out, "{table}")
}

fn milestone_line(out: &mut impl Write, label: &str, m: Option<&Milestone>) -> fmt::Result {
    match m {
        Some(m) => writeln!(
            out,
            "{label}: {} ({}) {} at {}, {}",
            event_name(&m.event),
            m.kind,
            m.formatted,
            m.competition_name,
            m.date.format("%d %b %Y")
        ),
        None => writeln!(out, "{label}: -"),
    }
}

/// Profile overview.
pub fn summary(out: &mut impl Write, s: &Summary) -> fmt::Result {
    heading(out, &format!("{} {}", s.flag, s.name))?;
    writeln!(out, "WCA ID: {}", s.wca_id)?;
    writeln!(out)?;
    writeln!(out, "Competitions: {}", s.competition_count)?;
    writeln!(out, "Solves: {}", s.total_solves)?;
    writeln!(out, "Last competition: {}", s.last_competition.as_deref().unwrap_or("N/A"))?;
    writeln!(
        out,
        "Years active: {} ({})",
        s.years_active,
        date_range_label(s)
    )?;
    writeln!(out, "Most played event: {}", most_played_label(s))?;
    writeln!(
        out,
        "Medals: 🥇 {}  🥈 {}  🥉 {}",
        s.medals.gold, s.medals.silver, s.medals.bronze
    )?;
    if s.records.any() {
        writeln!(
            out,
            "Records held: NR {}  CR {}  WR {}",
            s.records.national, s.records.continental, s.records.world
        )?;
    }
    match &s.top_pr_event {
        Some((event, n)) => writeln!(
            out,
            "PRs: {} (most in {}: {n})",
            s.pr_total,
            event_name(event)
        )?,
        None => writeln!(out, "PRs: {}", s.pr_total)?,
    }
    milestone_line(out, "Oldest active PR", s.oldest_active_pr.as_ref())?;
    milestone_line(out, "Most recent PR", s.most_recent_pr.as_ref())
}

fn period_label(period: &Period) -> String {
    match period {
        Period::All => "all time".to_owned(),
        Period::PastYear => "past year".to_owned(),
        Period::CurrentYear => "current year".to_owned(),
        Period::Range { from, to } => format!("{from} to {to}"),
    }
}

/// Personal bests for `period`.
pub fn bests(out: &mut impl Write, bests: &[EventBests], period: &Period) -> fmt::Result {
    heading(out, &format!("Personal bests ({})", period_label(period)))?;
    if bests.is_empty() {
        return writeln!(out, "No results in this period.");
    }
    let cell = |b: &Option<BestResult>| -> [String; 3] {
        match b {
            Some(b) => [
                b.formatted.clone(),
                b.competition_name.clone(),
                date_or_unknown(b.date),
            ],
            None => [String::new(), String::new(), String::new()],
        }
    };
    let mut table = Table::new([
        "Event", "Single", "Competition", "Date", "Average", "Competition", "Date",
    ]);
    for b in bests {
        let [s, sc, sd] = cell(&b.single);
        let [a, ac, ad] = cell(&b.average);
        table.push([b.event_name.clone(), s, sc, sd, a, ac, ad]);
    }
    write!(out, "{table}")
}

fn counts_table(counts: &[EventCount]) -> Table {
    let mut table = Table::new(["Event", "Count"]);
    for c in counts {
        table.push([c.event_name.clone(), c.count.to_string()]);
    }
    table
}

/// Rounds and PRs per event.
pub fn statistics(out: &mut impl Write, stats: &Statistics) -> fmt::Result {
    heading(out, "Rounds per event")?;
    write!(out, "{}", counts_table(&stats.rounds_per_event))?;
    writeln!(out)?;
    heading(out, "PRs per event")?;
    if stats.prs_per_event.is_empty() {
        writeln!(out, "No PRs recorded yet.")?;
    } else {
        write!(out, "{}", counts_table(&stats.prs_per_event))?;
    }
    writeln!(out, "Total PRs: {}", stats.pr_total)
}

/// PR history of one event, plus the year-over-year block when given.
pub fn progression(
    out: &mut impl Write,
    event: &str,
    kind: ResultKind,
    history: &[ProgressPoint],
    comparison: Option<&YearComparison>,
) -> fmt::Result {
    heading(out, &format!("{} {kind} progression", event_name(event)))?;
    let mut table = Table::new(["Date", "Result", "Competition"]);
    for p in history {
        table.push([
            p.date.format("%d %b %Y").to_string(),
            p.formatted.clone(),
            p.competition_name.clone(),
        ]);
    }
    write!(out, "{table}")?;

    if let Some(c) = comparison {
        writeln!(out)?;
        heading(out, "Year-over-year")?;
        writeln!(out, "PB {}: {}", c.base_year, c.base_formatted)?;
        writeln!(out, "PB {}: {}", c.target_year, c.target_formatted)?;
        writeln!(out, "Improvement: {:.2} {}", c.improvement, c.unit)?;
        writeln!(out, "Percentage: {:.1}%", c.percent)?;
    }
    Ok(())
}

/// Competition list, activity heatmap and venue list.
pub fn competitions(
    out: &mut impl Write,
    list: &[CompetitionEntry],
    heatmap: &Heatmap,
    map: &CompetitionMap,
) -> fmt::Result {
    heading(out, "Competition history")?;
    let mut table = Table::new(["Date", "Competition", "Location", "Events"]);
    for c in list {
        table.push([
            c.date.map_or_else(|| UNKNOWN.to_owned(), |d| d.format("%Y-%m-%d").to_string()),
            c.name.clone(),
            format!("{} {}", c.flag, c.country),
            c.events.join(" "),
        ]);
    }
    write!(out, "{table}")?;

    writeln!(out)?;
    heading(out, "Activity")?;
    let mut grid = Table::new(std::iter::once("Year").chain(MONTHS).chain(std::iter::once("Total")));
    for (year, months) in heatmap.years.iter().rev() {
        let mut cells = vec![year.to_string()];
        cells.extend(months.iter().map(|n| if *n == 0 { ".".to_owned() } else { n.to_string() }));
        cells.push(heatmap.year_total(*year).to_string());
        grid.push(cells);
    }
    write!(out, "{grid}")?;

    writeln!(out)?;
    heading(out, "Venues")?;
    match map.centre {
        Some((lat, lon)) => writeln!(out, "Most visited area: {lat:.0}, {lon:.0}")?,
        None => return writeln!(out, "No location data available."),
    }
    let mut venues = Table::new(["Competition", "Latitude", "Longitude"]);
    for p in &map.points {
        venues.push([p.name.clone(), format!("{:.6}", p.latitude), format!("{:.6}", p.longitude)]);
    }
    write!(out, "{venues}")
}

fn rank_cell(rank: Option<u64>) -> String {
    rank.map_or_else(|| "-".to_owned(), |r| r.to_string())
}

fn rank_cells(r: &Ranks) -> [String; 3] {
    [rank_cell(r.country), rank_cell(r.continent), rank_cell(r.world)]
}

/// Current ranks per event.
pub fn rankings(out: &mut impl Write, ranks: &[EventRanks]) -> fmt::Result {
    heading(out, "Current rankings")?;
    if ranks.is_empty() {
        return writeln!(out, "No ranking data available.");
    }
    let mut table = Table::new([
        "Event", "NR (Single)", "CR (Single)", "WR (Single)", "NR (Avg)", "CR (Avg)", "WR (Avg)",
    ]);
    for r in ranks {
        let [sn, sc, sw] = rank_cells(&r.single);
        let [an, ac, aw] = rank_cells(&r.average);
        table.push([r.event_name.clone(), sn, sc, sw, an, ac, aw]);
    }
    write!(out, "{table}")
}

/// Podium and ranked list of companions.
pub fn neighbours(out: &mut impl Write, board: &NeighbourBoard, year: Option<i32>) -> fmt::Result {
    let scope = year.map_or_else(|| "all years".to_owned(), |y| y.to_string());
    heading(out, &format!("Top companions ({scope})"))?;
    if board.total == 0 {
        return writeln!(out, "No matches found.");
    }
    for tier in &board.podium {
        writeln!(
            out,
            "{} {} comps: {}",
            tier.medal.emoji(),
            tier.count,
            tier.names.join(", ")
        )?;
    }
    if board.others.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    let mut table = Table::new(["#", "Name", "Comps", ""]);
    for n in &board.others {
        let bar = "#".repeat((n.share * 20.0).round() as usize);
        table.push([n.rank.to_string(), n.name.clone(), n.count.to_string(), bar]);
    }
    write!(out, "{table}")
}

/// Scramble sheet of one competition.
pub fn scrambles(out: &mut impl Write, competition_id: &str, sheet: &[EventScrambles]) -> fmt::Result {
    heading(out, &format!("Scrambles: {competition_id}"))?;
    if sheet.is_empty() {
        return writeln!(out, "No public scrambles available for {competition_id}.");
    }
    for event in sheet {
        for round in &event.rounds {
            writeln!(out)?;
            writeln!(out, "{} - {}", event.event_name, round.round_name)?;
            for group in &round.groups {
                writeln!(out, "  Group {}", group.group)?;
                for line in &group.scrambles {
                    let mut parts = line.scramble.lines();
                    let first = parts.next().unwrap_or_default();
                    writeln!(out, "  {:>4}. {first}", line.label)?;
                    for rest in parts {
                        writeln!(out, "        {rest}")?;
                    }
                }
            }
        }
    }
    Ok(())
}
