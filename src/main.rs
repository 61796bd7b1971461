use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use party_profile::{
    active_members, build_party_profile, load_people_csv, sorted_members, MemberFilter,
    PartySnapshot, ProfileConfig, StatsEngine,
};

const USAGE: &str = "\
Usage:
  party-profile render  <snapshot.json> [--filter <mp_type>] [--config <config.json>] [--people-csv <people.csv>] [--as-of YYYY-MM-DD]
  party-profile members <snapshot.json> [--filter <mp_type>] [--people-csv <people.csv>]
  party-profile stats   <snapshot.json> [--config <config.json>] [--people-csv <people.csv>] [--as-of YYYY-MM-DD]";

/// Parsed command-line options shared by every mode
#[derive(Debug, Default)]
struct Options {
    snapshot: PathBuf,
    filter: MemberFilter,
    config: Option<PathBuf>,
    people_csv: Option<PathBuf>,
    as_of: Option<NaiveDate>,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self> {
        let mut options = Options::default();
        let mut snapshot = None;
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--filter" => {
                    let label = iter.next().context("--filter needs a value")?;
                    options.filter = MemberFilter::from_label(label);
                }
                "--config" => {
                    options.config = Some(iter.next().context("--config needs a path")?.into());
                }
                "--people-csv" => {
                    options.people_csv =
                        Some(iter.next().context("--people-csv needs a path")?.into());
                }
                "--as-of" => {
                    let raw = iter.next().context("--as-of needs a date")?;
                    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                        .with_context(|| format!("Invalid --as-of date: {}", raw))?;
                    options.as_of = Some(date);
                }
                flag if flag.starts_with("--") => bail!("Unknown option: {}\n{}", flag, USAGE),
                path if snapshot.is_none() => snapshot = Some(PathBuf::from(path)),
                extra => bail!("Unexpected argument: {}\n{}", extra, USAGE),
            }
        }

        options.snapshot = snapshot.with_context(|| format!("Missing snapshot path\n{}", USAGE))?;
        Ok(options)
    }

    fn as_of(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }

    fn load_config(&self) -> Result<ProfileConfig> {
        match &self.config {
            Some(path) => ProfileConfig::from_file(path),
            None => Ok(ProfileConfig::default()),
        }
    }

    fn load_snapshot(&self) -> Result<PartySnapshot> {
        let mut snapshot = PartySnapshot::from_file(&self.snapshot)?;

        if let Some(csv_path) = &self.people_csv {
            snapshot.people = load_people_csv(csv_path)?;
        }

        Ok(snapshot.normalize())
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "party_profile=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let Some(mode) = args.get(1) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let run = select_mode(mode)?;
    let options = Options::parse(&args[2..])?;

    run(&options)
}

type ModeFn = fn(&Options) -> Result<()>;

fn select_mode(mode: &str) -> Result<ModeFn> {
    match mode {
        "render" => Ok(run_render as ModeFn),
        "members" => Ok(run_members as ModeFn),
        "stats" => Ok(run_stats as ModeFn),
        other => bail!("Unknown mode: {}\n{}", other, USAGE),
    }
}

fn run_render(options: &Options) -> Result<()> {
    let config = options.load_config()?;
    let snapshot = options.load_snapshot()?;

    let profile = build_party_profile(&snapshot, &options.filter, &config, options.as_of());
    info!("{}", profile.summary());

    let json = serde_json::to_string_pretty(&profile).context("Failed to serialize profile")?;
    println!("{}", json);

    Ok(())
}

fn run_members(options: &Options) -> Result<()> {
    let snapshot = options.load_snapshot()?;
    let mps = active_members(&snapshot.people);
    let sorted = sorted_members(&mps, &options.filter);

    info!(shown = sorted.len(), total = mps.len(), "sorted members");

    for member in sorted {
        let seat = match (&member.mp_list, &member.mp_province, &member.mp_zone) {
            (Some(list), _, _) => format!("#{}", list),
            (None, Some(province), Some(zone)) => format!("{} เขต {}", province, zone),
            (None, Some(province), None) => province.clone(),
            _ => String::new(),
        };
        println!(
            "{:<24} {:<14} {}",
            member.full_name(),
            member.mp_type.label().unwrap_or("-"),
            seat
        );
    }

    Ok(())
}

fn run_stats(options: &Options) -> Result<()> {
    let config = options.load_config()?;
    let snapshot = options.load_snapshot()?;
    let mps = snapshot.mps();

    let stats = StatsEngine::with_config(config.stats).load_category_stats(&mps, options.as_of());
    info!("{}", stats.summary());

    for (dimension, tally) in stats.dimensions() {
        println!("{} ({} members)", dimension, tally.total());
        for group in &tally.groups {
            println!("  {:<24} {}", group.name, group.value);
        }
        if tally.excluded > 0 {
            println!("  (excluded: {})", tally.excluded);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use party_profile::MpType;
    use std::path::Path;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let options = Options::parse(&args(&[
            "data/snapshot.json",
            "--filter",
            "แบ่งเขต",
            "--as-of",
            "2024-05-01",
        ]))
        .unwrap();

        assert_eq!(options.snapshot, Path::new("data/snapshot.json"));
        assert_eq!(options.filter, MemberFilter::by_type(MpType::Constituency));
        assert_eq!(options.as_of, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(options.config.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        assert!(Options::parse(&args(&["a.json", "--verbose"])).is_err());
    }

    #[test]
    fn test_parse_requires_snapshot() {
        assert!(Options::parse(&args(&["--filter", "แบ่งเขต"])).is_err());
    }

    #[test]
    fn test_unknown_mode_reported_before_options() {
        let err = select_mode("help").unwrap_err();
        assert!(err.to_string().starts_with("Unknown mode: help"));
        assert!(select_mode("render").is_ok());
        assert!(select_mode("members").is_ok());
        assert!(select_mode("stats").is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        assert!(Options::parse(&args(&["a.json", "--as-of", "01/05/2024"])).is_err());
    }
}
