use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use birken_temp::{
    parse_start_time, render_to_file, BirkenRouteSource, CacheGateway, MetForecastSource,
    ProfileError, ProfileOrigin, Profiler, RaceParameters, RaceType, DEFAULT_CHART_FILE,
    DEFAULT_RESOLUTION,
};
use chrono::{DateTime, Duration, Utc};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, ValueHint};
use env_logger::Env;
use log::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compute the temperature profile of a Birkebeiner race",
    long_about = None
)]
struct Cli {
    /// Which race: 'rennet', 'rittet', or 'løpet'
    #[arg(short, long, value_parser = RaceType::from_str)]
    race: RaceType,

    /// Start time in ISO 8601 format; without an offset it is local time (defaults to now)
    #[arg(short, long, value_parser = parse_start_time)]
    start: Option<DateTime<Utc>>,

    /// Total race time, hours part
    #[arg(short = 't', long, default_value_t = 4)]
    hours: u32,

    /// Total race time, minutes part
    #[arg(short, long, default_value_t = 0)]
    minutes: u32,

    /// Ignore any cached profile and fetch route and forecasts again
    #[arg(short, long, action = ArgAction::SetTrue)]
    fresh: bool,

    /// Maximum number of forecast lookups along the route
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: NonZeroUsize,

    /// Output HTML chart path
    #[arg(short, long, default_value = DEFAULT_CHART_FILE, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Profile cache file (defaults to the system cache directory)
    #[arg(long, value_hint = ValueHint::FilePath)]
    cache_file: Option<PathBuf>,
}

impl Cli {
    fn race_parameters(&self) -> Result<RaceParameters, birken_temp::RaceError> {
        let total =
            Duration::hours(i64::from(self.hours)) + Duration::minutes(i64::from(self.minutes));
        RaceParameters::new(self.race, self.start.unwrap_or_else(Utc::now), total)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let race = match cli.race_parameters() {
        Ok(race) => race,
        Err(e) => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
    };

    match run(&cli, &race).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, race: &RaceParameters) -> Result<(), ProfileError> {
    let cache = match &cli.cache_file {
        Some(path) => CacheGateway::with_file(path),
        None => CacheGateway::new()?,
    };
    info!(
        "Profiling {} starting {} for {} min",
        race.race_type(),
        race.start_time(),
        race.total_duration().num_minutes()
    );

    let profiler = Profiler::builder()
        .route_source(BirkenRouteSource::new())
        .forecast_source(MetForecastSource::new()?)
        .cache(cache)
        .resolution(cli.resolution)
        .build();

    let profile = profiler.run().race(race).fresh(cli.fresh).call().await?;
    if profile.origin == ProfileOrigin::Cache {
        info!("Reused cached profile from {}", profiler.cache().path().display());
    }

    render_to_file(race, &profile.records, &cli.output).await?;
    println!("Wrote temperature profile to {}", cli.output.display());
    Ok(())
}

fn report(error: &ProfileError) {
    eprintln!("Error: {}", error);
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
    if error.is_forecast_unavailable() {
        eprintln!("No profile was cached; rerun once api.met.no answers again.");
    }
}
