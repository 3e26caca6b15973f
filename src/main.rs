use clap::{ArgGroup, Parser};
use daylight::location::{LocationQuery, LocationResolver};
use daylight::{format_report, Clock, DateSelection, DaylightReport, OutputFormat, SolarCalculator, SystemClock};
use std::process::ExitCode;

/// Get sunlight hours for a given date and location.
///
/// Without a location flag the caller's IP address is geolocated.
///
/// Examples:
///   daylight
///   daylight --location "Reykjavik, Iceland" --tomorrow
///   daylight --zipcode 94043 --json
///   daylight --latitude 78.2232 --longitude 15.6267 --date 2025-06-21 --verbose
#[derive(Parser, Debug)]
#[command(name = "daylight", version, about, long_about = None)]
#[command(group(ArgGroup::new("when").args(["date", "today", "tomorrow", "yesterday", "day_after"])))]
#[command(group(ArgGroup::new("output").args(["json", "brief", "verbose"])))]
struct Cli {
    /// Specific date in YYYY-MM-DD format (keywords such as "tomorrow" work too).
    #[arg(long, short = 'd')]
    date: Option<String>,

    /// Use today's date (default).
    #[arg(long)]
    today: bool,

    /// Use tomorrow's date.
    #[arg(long, short = 't')]
    tomorrow: bool,

    /// Use yesterday's date.
    #[arg(long, short = 'y')]
    yesterday: bool,

    /// Use the day after tomorrow.
    #[arg(long)]
    day_after: bool,

    /// Location as 'City, Country' or 'City, State'.
    #[arg(long, short = 'l', conflicts_with_all = ["zipcode", "latitude", "longitude"])]
    location: Option<String>,

    /// Location by ZIP/postal code.
    #[arg(long, short = 'z', conflicts_with_all = ["latitude", "longitude"])]
    zipcode: Option<String>,

    /// Latitude coordinate (-90 to 90).
    #[arg(long, allow_hyphen_values = true, requires = "longitude")]
    latitude: Option<f64>,

    /// Longitude coordinate (-180 to 180).
    #[arg(long, allow_hyphen_values = true, requires = "latitude")]
    longitude: Option<f64>,

    /// Output in JSON format.
    #[arg(long, short = 'j')]
    json: bool,

    /// Output only the hours as a number.
    #[arg(long, short = 'b')]
    brief: bool,

    /// Output detailed information.
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    fn date_selection(&self) -> DateSelection {
        if self.tomorrow {
            DateSelection::Tomorrow
        } else if self.yesterday {
            DateSelection::Yesterday
        } else if self.day_after {
            DateSelection::DayAfter
        } else if let Some(d) = &self.date {
            DateSelection::Literal(d.clone())
        } else {
            DateSelection::Today
        }
    }

    fn location_query(&self) -> LocationQuery {
        if let Some(name) = &self.location {
            LocationQuery::Name(name.clone())
        } else if let Some(code) = &self.zipcode {
            LocationQuery::PostalCode(code.clone())
        } else if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            LocationQuery::Coordinates { lat, lon }
        } else {
            LocationQuery::Ip
        }
    }

    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.brief {
            OutputFormat::Brief
        } else if self.verbose {
            OutputFormat::Verbose
        } else {
            OutputFormat::Default
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    match run(&cli, &SystemClock, &LocationResolver::new()) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run<S: daylight::location::GeoService>(
    cli: &Cli,
    clock: &dyn Clock,
    resolver: &LocationResolver<S>,
) -> daylight::Result<String> {
    let date = cli.date_selection().resolve(clock)?;
    let location = resolver.resolve(&cli.location_query())?;
    log::info!("{} on {}", location, date);

    let report = DaylightReport::compute(&SolarCalculator::new(), date, &location)?;
    format_report(&report, cli.output_format(), clock.today())
}
