//! CLI binary for mycubing.

use std::fmt;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use mycubing::dashboard::{self, Period};
use mycubing::dashboard::progression::default_years;
use mycubing::{AppConfig, DashboardError, OutputFormat, Profile, ResultKind, load_profile, render};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use wca_data::WcaClient;

/// MyCubing: competition history and PR progressions for WCA cubers.
#[derive(Parser)]
#[command(name = "mycubing", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "MYCUBING_CONFIG")]
    config: Option<PathBuf>,

    /// Print JSON instead of text tables.
    #[arg(long, global = true)]
    json: bool,

    /// Write a default configuration file and exit.
    #[arg(long)]
    init_config: bool,

    /// WCA id, e.g. 2016LOPE37. Not needed for `scrambles`.
    wca_id: Option<String>,

    /// Page to show.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Dashboard pages.
#[derive(Subcommand)]
enum Command {
    /// Every round, newest first, with PR labels.
    Results,

    /// Profile overview: medals, records, PR milestones.
    Summary,

    /// Best single and average per event.
    Bests {
        /// Period to consider.
        #[arg(long, value_enum, default_value_t = PeriodArg::All)]
        period: PeriodArg,
        /// Range start (YYYY-MM-DD); use with --to.
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Range end (YYYY-MM-DD); use with --from.
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },

    /// Rounds and PRs per event.
    Stats,

    /// PR history of one event, with a year-over-year comparison.
    Progression {
        /// Event code, e.g. 333 or 333oh.
        event: String,
        /// Use averages instead of singles.
        #[arg(long)]
        average: bool,
        /// Base year of the comparison (defaults to the second latest year).
        #[arg(long, requires = "target_year")]
        base_year: Option<i32>,
        /// Target year of the comparison (defaults to the latest year).
        #[arg(long, requires = "base_year")]
        target_year: Option<i32>,
    },

    /// Competition list, activity heatmap and venues.
    Competitions,

    /// Current world, continental and national ranks.
    Rankings,

    /// People met at the most competitions.
    Neighbours {
        /// Restrict to one year.
        #[arg(long)]
        year: Option<i32>,
    },

    /// Published scrambles of a competition, by event, round and group.
    Scrambles {
        /// Competition id, e.g. SpanishChampionship2025.
        competition_id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodArg {
    All,
    PastYear,
    CurrentYear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the page.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mycubing=info,wca_data=info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);

    if cli.init_config {
        AppConfig::default().save_to_file(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let config = if cli.config.is_some() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::load_or_default(&config_path)?
    };
    let output = if cli.json {
        OutputFormat::Json
    } else {
        config.dashboard.output
    };

    let client = WcaClient::new(config.client.clone())?;

    if let Some(Command::Scrambles { competition_id }) = &cli.command {
        let page = scrambles_page(output, &client, competition_id.trim()).await?;
        print!("{page}");
        return Ok(());
    }

    let wca_id = cli
        .wca_id
        .as_deref()
        .map(|id| id.trim().to_uppercase())
        .context("a WCA id is required")?;

    let Some(profile) = load_profile(&client, &wca_id).await else {
        return Err(DashboardError::NoResults(wca_id).into());
    };
    tracing::info!(wca_id = %profile.wca_id, rows = profile.rows.len(), "profile loaded");

    let page = match cli.command.unwrap_or(Command::Results) {
        Command::Results => emit(output, &profile, |out| render::results(out, &profile))?,
        Command::Summary => {
            let summary = dashboard::summarize(&profile, &config.dashboard.milestone_skip_events);
            emit(output, &summary, |out| render::summary(out, &summary))?
        }
        Command::Bests { period, from, to } => {
            let period = match (from, to) {
                (Some(from), Some(to)) => Period::range(from, to)?,
                _ => match period {
                    PeriodArg::All => Period::All,
                    PeriodArg::PastYear => Period::PastYear,
                    PeriodArg::CurrentYear => Period::CurrentYear,
                },
            };
            let today = Local::now().date_naive();
            let bests = dashboard::personal_bests(&profile.rows, &period, today);
            emit(output, &bests, |out| render::bests(out, &bests, &period))?
        }
        Command::Stats => {
            let stats = dashboard::statistics(&profile.rows);
            emit(output, &stats, |out| render::statistics(out, &stats))?
        }
        Command::Progression {
            event,
            average,
            base_year,
            target_year,
        } => progression_page(output, &profile, &event, average, base_year.zip(target_year))?,
        Command::Competitions => {
            let list = dashboard::competition_list(&profile);
            let heatmap = dashboard::heatmap(&profile);
            let map = dashboard::map_points(&profile);
            let view = CompetitionsView {
                competitions: &list,
                heatmap: &heatmap,
                map: &map,
            };
            emit(output, &view, |out| render::competitions(out, &list, &heatmap, &map))?
        }
        Command::Rankings => {
            let ranks = dashboard::rankings(&profile);
            emit(output, &ranks, |out| render::rankings(out, &ranks))?
        }
        Command::Neighbours { year } => {
            let found = dashboard::find_neighbours(
                &client,
                &profile,
                year,
                config.dashboard.neighbour_retries,
            )
            .await;
            let board = dashboard::neighbour_board(&found, config.dashboard.neighbour_list_len);
            emit(output, &board, |out| render::neighbours(out, &board, year))?
        }
        Command::Scrambles { competition_id } => {
            scrambles_page(output, &client, competition_id.trim()).await?
        }
    };

    print!("{page}");
    Ok(())
}

#[derive(Serialize)]
struct CompetitionsView<'a> {
    competitions: &'a [dashboard::CompetitionEntry],
    heatmap: &'a dashboard::Heatmap,
    map: &'a dashboard::CompetitionMap,
}

#[derive(Serialize)]
struct ProgressionView<'a> {
    event: &'a str,
    kind: ResultKind,
    history: &'a [dashboard::progression::ProgressPoint],
    comparison: Option<&'a dashboard::YearComparison>,
}

fn progression_page(
    output: OutputFormat,
    profile: &Profile,
    event: &str,
    average: bool,
    years: Option<(i32, i32)>,
) -> anyhow::Result<String> {
    let kind = if average {
        ResultKind::Average
    } else {
        ResultKind::Single
    };
    let history = dashboard::pr_history(&profile.rows, event, kind)?;
    let years = years.or_else(|| default_years(&dashboard::yearly_bests(&profile.rows, event, kind)));
    let comparison = match years {
        Some((base, target)) => dashboard::compare_years(&profile.rows, event, kind, base, target)?,
        None => None,
    };
    let view = ProgressionView {
        event,
        kind,
        history: &history,
        comparison: comparison.as_ref(),
    };
    emit(output, &view, |out| {
        render::progression(out, event, kind, &history, comparison.as_ref())
    })
}

async fn scrambles_page(
    output: OutputFormat,
    client: &WcaClient,
    competition_id: &str,
) -> anyhow::Result<String> {
    let list = match client.competition_scrambles(competition_id).await? {
        Some(list) => list,
        None => {
            tracing::info!(competition = competition_id, "no published scrambles");
            Vec::new()
        }
    };
    let sheet = dashboard::scramble_sheet(&list);
    emit(output, &sheet, |out| render::scrambles(out, competition_id, &sheet))
}

/// Render `value` as JSON or through `text`.
fn emit<T, F>(output: OutputFormat, value: &T, text: F) -> anyhow::Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&mut String) -> fmt::Result,
{
    match output {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => {
            let mut page = String::new();
            text(&mut page)?;
            Ok(page)
        }
    }
}
