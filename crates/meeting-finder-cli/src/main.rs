//! `meetfind` CLI - find common meeting times for a team from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Rank meeting slots for a team file, shown in London time
//! meetfind find -i team.json --viewer-tz Europe/London
//!
//! # Same, as JSON, without flex hours, for 2-3 hour meetings
//! meetfind find -i team.json --viewer-tz Europe/London --no-flex \
//!     --min-duration 2 --max-duration 3 --json
//!
//! # Pin the instant UTC offsets are evaluated at (reproducible output)
//! meetfind find -i team.json --at 2026-01-15T12:00:00Z
//!
//! # Who is available, flexing, or away at each hour of the viewer's day
//! cat team.json | meetfind hours --viewer-tz America/New_York
//! ```
//!
//! The team file is either a JSON array of participants or a full options
//! object (`participants`, `viewerTimezone`, `minDuration`, ...). Flags
//! override values from the file.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use meeting_finder::analysis::{analyze_day, HourAnalysis};
use meeting_finder::display::format_hour;
use meeting_finder::finder::MIN_PARTICIPANTS;
use meeting_finder::{
    find_meeting_times, MeetingFinderOptions, MeetingFinderResult, Participant, TimeContext,
};
use serde_json::Value;
use std::io::{self, Read};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "meetfind",
    version,
    about = "Find common meeting times across timezones"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log search details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Team file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// IANA timezone to express hours in (overrides the file's viewerTimezone)
    #[arg(long)]
    viewer_tz: Option<String>,
    /// Disable flex hours
    #[arg(long)]
    no_flex: bool,
    /// Hours a participant may shift their day in either direction
    #[arg(long)]
    flex_range: Option<u8>,
    /// RFC 3339 instant to evaluate UTC offsets at (defaults to now)
    #[arg(long)]
    at: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the best meeting slots
    Find {
        #[command(flatten)]
        search: SearchArgs,
        /// Shortest meeting to consider, in hours
        #[arg(long)]
        min_duration: Option<u8>,
        /// Longest meeting to consider, in hours
        #[arg(long)]
        max_duration: Option<u8>,
    },
    /// Show who can make each hour of the viewer's day
    Hours {
        #[command(flatten)]
        search: SearchArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Find {
            search,
            min_duration,
            max_duration,
        } => {
            let mut options = load_options(&search)?;
            // The finder reports too few participants itself.
            if options.participants.len() >= MIN_PARTICIPANTS {
                require_viewer_timezone(&options)?;
            }
            if let Some(min) = min_duration {
                options.min_duration = min;
            }
            if let Some(max) = max_duration {
                options.max_duration = max;
            }
            let reference = parse_reference(search.at.as_deref())?;
            let ctx = TimeContext::iana(reference);

            let result =
                find_meeting_times(&options, &ctx).context("Failed to search for meeting times")?;

            if search.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_slots(&result));
            }
        }
        Commands::Hours { search } => {
            let options = load_options(&search)?;
            require_viewer_timezone(&options)?;
            options.validate().context("Invalid team file")?;
            let reference = parse_reference(search.at.as_deref())?;
            let ctx = TimeContext::iana(reference);

            let day = analyze_day(
                &options.participants,
                &options.viewer_timezone,
                options.effective_flex_range(),
                &ctx,
            )
            .context("Failed to analyze hours")?;

            if search.json {
                println!("{}", serde_json::to_string_pretty(&day)?);
            } else {
                print!("{}", render_hours(&day));
            }
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays parseable. Defaults to warnings only.
fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Read the team file and layer command-line overrides on top of it.
fn load_options(search: &SearchArgs) -> Result<MeetingFinderOptions> {
    let raw = read_input(search.input.as_deref())?;
    let mut options = parse_team_file(&raw)?;

    if let Some(tz) = &search.viewer_tz {
        options.viewer_timezone = tz.clone();
    }
    if search.no_flex {
        options.allow_flex_hours = false;
    }
    if let Some(range) = search.flex_range {
        options.flex_range = range;
    }

    tracing::debug!(
        participants = options.participants.len(),
        viewer_timezone = %options.viewer_timezone,
        "loaded team file"
    );
    Ok(options)
}

/// A team file is either a bare participant array or a full options object.
fn parse_team_file(raw: &str) -> Result<MeetingFinderOptions> {
    let value: Value = serde_json::from_str(raw).context("Failed to parse team file")?;
    match value {
        Value::Array(_) => {
            let participants: Vec<Participant> = serde_json::from_value(value)
                .context("Failed to parse team file as a participant list")?;
            Ok(MeetingFinderOptions::new(participants, ""))
        }
        Value::Object(_) => serde_json::from_value(value)
            .context("Failed to parse team file as a meeting finder options object"),
        _ => bail!("Failed to parse team file: expected a participant array or an options object"),
    }
}

fn require_viewer_timezone(options: &MeetingFinderOptions) -> Result<()> {
    if options.viewer_timezone.is_empty() {
        bail!("No viewer timezone: pass --viewer-tz or set viewerTimezone in the team file");
    }
    Ok(())
}

fn parse_reference(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid --at instant: {}", raw)),
        None => Ok(Utc::now()),
    }
}

fn render_slots(result: &MeetingFinderResult) -> String {
    if !result.has_results {
        return format!(
            "No meeting times found. {}\n",
            result.suggestion.as_deref().unwrap_or_default()
        );
    }

    let mut out = format!(
        "{:<3} {:<15} {:>6}  {:<10} {}\n",
        "#", "Time", "Score", "Quality", "Attendees"
    );
    for (rank, slot) in result.slots.iter().enumerate() {
        let mut attendees: Vec<String> = slot
            .available_members
            .iter()
            .map(|p| p.id.clone())
            .collect();
        attendees.extend(slot.flexing_members.iter().map(|m| {
            format!("{} ({}h {})", m.participant.id, m.hours_needed, m.direction)
        }));
        out.push_str(&format!(
            "{:<3} {:<15} {:>6.1}  {:<10} {}\n",
            rank + 1,
            slot.label(),
            slot.score,
            slot.quality.to_string(),
            attendees.join(", ")
        ));
        if !slot.unavailable_members.is_empty() {
            let missing: Vec<&str> = slot
                .unavailable_members
                .iter()
                .map(|p| p.id.as_str())
                .collect();
            out.push_str(&format!("    missing: {}\n", missing.join(", ")));
        }
    }
    out
}

fn render_hours(day: &[HourAnalysis]) -> String {
    let mut out = format!(
        "{:<6} {:>9} {:>5} {:>5}\n",
        "Hour", "Available", "Flex", "Away"
    );
    for analysis in day {
        out.push_str(&format!(
            "{:<6} {:>9} {:>5} {:>5}\n",
            format_hour(analysis.hour),
            analysis.available.len(),
            analysis.flexing.len(),
            analysis.unavailable.len()
        ));
    }
    out
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
