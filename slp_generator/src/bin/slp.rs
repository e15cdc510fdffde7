use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use public_holidays::{ALL_STATES, StateSelector};
use slp_generator::{
    LoadProfileRequest, ProfileType, SlpGenerator,
    calendar::{self, ClockChange},
    config::load_config,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Standard load profile generator")]
struct Cli {
    /// Config file (default: ./slp.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Write a load profile as `time,power` CSV.
    Generate {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,
        /// Last day (inclusive), YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,
        /// Profile class, e.g. H0, G1, L2
        #[arg(long)]
        profile: String,
        #[arg(long, default_value = "DE")]
        country: String,
        /// State code (e.g. DE-BY) or `all_states`
        #[arg(long, default_value = ALL_STATES)]
        state: String,
        /// Annual consumption in MWh
        #[arg(long, default_value_t = 1.0)]
        energy: f64,
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Stamp rows in UTC instead of local time
        #[arg(long)]
        utc: bool,
    },
    /// Print the season and day type of every day of a year.
    Classify {
        #[arg(long)]
        year: i32,
        #[arg(long, default_value = "DE")]
        country: String,
        #[arg(long, default_value = ALL_STATES)]
        state: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.cmd {
        Cmd::Generate {
            start,
            end,
            profile,
            country,
            state,
            energy,
            output,
            utc,
        } => {
            let generator = SlpGenerator::from_config(&config)?;
            let request = LoadProfileRequest::new(
                start,
                end,
                ProfileType::new(&profile)?,
                country,
                StateSelector::parse(&state),
            )
            .with_annual_energy(energy);

            let series = generator.get(&request).await?;

            let sink: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path).with_context(|| format!("create {}", path.display()))?,
                )),
                None => Box::new(io::stdout().lock()),
            };
            let mut writer = csv::Writer::from_writer(sink);
            writer.write_record(["time", "power"])?;
            if utc {
                for (instant, power) in series.to_utc(config.time_zone()?)? {
                    writer.write_record([instant.to_rfc3339(), power.to_string()])?;
                }
            } else {
                for point in &series {
                    writer.write_record([
                        point.time.format("%Y-%m-%d %H:%M").to_string(),
                        point.power.to_string(),
                    ])?;
                }
            }
            writer.flush()?;
            info!(points = series.len(), "load profile written");
        }
        Cmd::Classify {
            year,
            country,
            state,
        } => {
            let provider = config.holiday_provider()?;
            let cal = calendar::classify(
                provider.as_ref(),
                year,
                &country,
                &StateSelector::parse(&state),
            )
            .await?;

            let mut out = io::stdout().lock();
            for day in cal.days() {
                let change = match day.clock_change {
                    Some(ClockChange::ToSummer) => "to_summer",
                    Some(ClockChange::ToWinter) => "to_winter",
                    None => "",
                };
                writeln!(out, "{},{},{},{change}", day.date, day.season, day.day_type)?;
            }
        }
    }

    Ok(())
}
