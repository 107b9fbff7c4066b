use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use sizhu_base::{
    AstronomicalTerms, Branch, Pillar, SolarTermSource, StemBranch, day_pillar, hour_pillar,
    resolve_year,
};
use sizhu_search::{
    AffinityConflictResult, ChartConfig, DEFAULT_YEAR_RANGE, FourPillars, ManualEntry, YearMap,
    YearProjection, analyze, derive_chart, parse_manual_pillars, project,
};
use sizhu_time::{BirthMoment, CivilDate, ClockTime};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// JDN of 1970-01-01.
const UNIX_EPOCH_JDN: i64 = 2_440_588;

#[derive(Parser)]
#[command(name = "sizhu", about = "Four-pillar (八字) calculator")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct RangeArgs {
    /// First year of the lookup window
    #[arg(long, default_value_t = *DEFAULT_YEAR_RANGE.start())]
    from: i32,
    /// Last year of the lookup window
    #[arg(long, default_value_t = *DEFAULT_YEAR_RANGE.end())]
    to: i32,
    /// Years from this one on are marked upcoming (default: this year)
    #[arg(long)]
    current_year: Option<i32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Four pillars, favorable and unfavorable years for a birth moment
    Chart {
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM); omit if unknown
        #[arg(long)]
        time: Option<String>,
        /// Month branch to use instead of solar terms (e.g. 寅 or yin)
        #[arg(long)]
        month_branch: Option<String>,
        /// Use astronomical solar-term dates
        #[arg(long)]
        precise: bool,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Analyze manually entered pillars
    Manual {
        /// Year pillar (e.g. 甲子)
        #[arg(long)]
        year: String,
        /// Month pillar
        #[arg(long)]
        month: String,
        /// Day pillar
        #[arg(long)]
        day: String,
        /// Hour pillar, or 不知道 / 不要 / 不要时 when unknown
        #[arg(long, default_value = "")]
        hour: String,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Day pillar (and hour pillar when a time is given)
    DayPillar {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Time (HH:MM)
        #[arg(long)]
        time: Option<String>,
    },
    /// Year pillar and the Start of Spring it was counted from
    YearPillar {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Use astronomical solar-term dates
        #[arg(long)]
        precise: bool,
    },
    /// The twelve major solar terms of a solar year
    SolarTerms {
        /// Solar year (starting at Start of Spring)
        #[arg(long)]
        year: i32,
        /// Use astronomical solar-term dates
        #[arg(long)]
        precise: bool,
    },
    /// Years carrying a pillar
    Years {
        /// Pillar (e.g. 甲子)
        #[arg(long)]
        pillar: String,
        /// First year
        #[arg(long, default_value_t = *DEFAULT_YEAR_RANGE.start())]
        from: i32,
        /// Last year
        #[arg(long, default_value_t = *DEFAULT_YEAR_RANGE.end())]
        to: i32,
    },
}

fn require_date(s: &str) -> CivilDate {
    s.parse().unwrap_or_else(|e| {
        eprintln!("Invalid date '{s}': {e}");
        std::process::exit(1);
    })
}

fn require_time(s: Option<&str>) -> Option<ClockTime> {
    s.map(|s| {
        s.parse().unwrap_or_else(|e| {
            eprintln!("Invalid time '{s}': {e}");
            std::process::exit(1);
        })
    })
}

fn require_branch(s: &str) -> Branch {
    s.parse().unwrap_or_else(|e| {
        eprintln!("Invalid month branch: {e}");
        std::process::exit(1);
    })
}

fn require_pillar(s: &str) -> Pillar {
    s.parse().unwrap_or_else(|e| {
        eprintln!("Invalid pillar: {e}");
        std::process::exit(1);
    })
}

fn term_source(precise: bool) -> SolarTermSource {
    if precise {
        SolarTermSource::precise(AstronomicalTerms::default())
    } else {
        SolarTermSource::Approximate
    }
}

/// Calendar year of the system clock, in UTC.
fn this_year() -> i32 {
    let days = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() / 86_400) as i64)
        .unwrap_or(0);
    CivilDate::from_jdn(UNIX_EPOCH_JDN + days).year()
}

/// `甲子: 甲子1924年, 甲子1984年, 甲子2044年 ★`, or `None` when no year matches.
fn format_projection(p: &YearProjection) -> Option<String> {
    if p.years.is_empty() {
        return None;
    }
    let parts: Vec<String> = p
        .years
        .iter()
        .map(|m| {
            if m.is_upcoming {
                format!("{}{}年 ★", p.pillar, m.year)
            } else {
                format!("{}{}年", p.pillar, m.year)
            }
        })
        .collect();
    Some(format!("{}: {}", p.pillar, parts.join(", ")))
}

fn print_section(title: &str, pairs: &[StemBranch], range: &RangeArgs, current_year: i32) {
    println!("{title}:");
    let lines: Vec<String> = project(pairs, range.from, range.to, current_year)
        .iter()
        .filter_map(format_projection)
        .collect();
    if lines.is_empty() {
        println!("  (none)");
    }
    for line in lines {
        println!("  {line}");
    }
}

fn print_analysis(pillars: &FourPillars, range: &RangeArgs) {
    let current_year = range.current_year.unwrap_or_else(this_year);
    let result: AffinityConflictResult = analyze(pillars);
    debug!(
        favorable = result.favorable.len(),
        unfavorable = result.unfavorable.len(),
        current_year,
        "analysis"
    );
    print_section("Favorable years", &result.favorable, range, current_year);
    print_section("Unfavorable years", &result.unfavorable, range, current_year);
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Chart {
            date,
            time,
            month_branch,
            precise,
            range,
        } => {
            let moment = BirthMoment::new(require_date(&date), require_time(time.as_deref()));
            let mut config = if precise {
                ChartConfig::precise()
            } else {
                ChartConfig::approximate()
            };
            if let Some(b) = month_branch.as_deref() {
                config = config.with_manual_month_branch(require_branch(b));
            }
            let chart = derive_chart(&moment, &config);
            let p = &chart.pillars;
            println!("Birth:      {}", chart.moment);
            println!(
                "Pillars:    year {}  month {}  day {}  hour {}",
                p.year, p.month, p.day, p.hour
            );
            println!("Provenance: {}", chart.provenance);
            if let Some(term) = chart.month_term {
                println!("Month term: {} ({})", term.name(), chart.effective_year);
            }
            println!();
            print_analysis(p, &range);
        }

        Commands::Manual {
            year,
            month,
            day,
            hour,
            range,
        } => {
            let entry = ManualEntry::new(&year, &month, &day, &hour);
            let pillars = parse_manual_pillars(&entry).unwrap_or_else(|e| {
                eprintln!("Invalid pillars: {e}");
                std::process::exit(1);
            });
            println!("Pillars: {pillars}");
            println!();
            print_analysis(&pillars, &range);
        }

        Commands::DayPillar { date, time } => {
            let moment = BirthMoment::new(require_date(&date), require_time(time.as_deref()));
            let day = day_pillar(moment.date, moment.hour());
            println!("Day:  {day}");
            if moment.time.is_some() {
                println!("Hour: {}", hour_pillar(day.stem(), moment.time));
            }
        }

        Commands::YearPillar { date, precise } => {
            let res = resolve_year(require_date(&date), &term_source(precise));
            println!(
                "{} (year {}, Start of Spring {}, {})",
                res.pillar,
                res.effective_year,
                res.start_of_spring,
                res.source.tag()
            );
        }

        Commands::SolarTerms { year, precise } => {
            let resolved = term_source(precise).resolve_major_terms(year);
            println!("Solar year {year} ({})", resolved.source.tag());
            for (term, date) in resolved.value.iter() {
                println!("  {:<4} {}  {} month", term.name(), date, term.month_branch());
            }
            println!("  next 立春 {}", resolved.value.next_start_of_spring());
        }

        Commands::Years { pillar, from, to } => {
            let pillar = require_pillar(&pillar);
            let years = YearMap::new(from, to).years_for(pillar);
            let list: Vec<String> = years.iter().map(ToString::to_string).collect();
            println!("{pillar}: {}", list.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizhu_search::YearMatch;

    #[test]
    fn projection_line_marks_upcoming() {
        let p = YearProjection {
            pillar: "甲子".parse().unwrap(),
            years: vec![
                YearMatch {
                    year: 1984,
                    is_upcoming: false,
                },
                YearMatch {
                    year: 2044,
                    is_upcoming: true,
                },
            ],
        };
        assert_eq!(
            format_projection(&p).unwrap(),
            "甲子: 甲子1984年, 甲子2044年 ★"
        );
    }

    #[test]
    fn empty_projection_is_hidden() {
        let p = YearProjection {
            pillar: "己寅".parse().unwrap(),
            years: Vec::new(),
        };
        assert!(format_projection(&p).is_none());
    }

    #[test]
    fn clock_year_is_plausible() {
        assert!(this_year() >= 2024);
    }

    #[test]
    fn cli_parses_chart() {
        let cli = Cli::try_parse_from([
            "sizhu", "chart", "--date", "1990-05-18", "--time", "08:00", "--month-branch", "巳",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Chart { precise: false, .. }));
    }
}
