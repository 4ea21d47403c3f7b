use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use solar_weather::{
    config::Config,
    data_io::Channel,
    parallel::load_weather_field,
    stations::StationCount,
    time_utils::{format_unix, parse_time},
    WeatherField, WeatherSample,
};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();

    let (name, sub_matches) = match matches.subcommand() {
        Some(sub) => sub,
        None => {
            eprintln!("Please specify a subcommand. Use --help for more information.");
            std::process::exit(1);
        }
    };
    let config = match Config::from_matches(sub_matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(config.verbose);

    let result = match name {
        "warm" => run_warm(&config),
        "inspect" => run_inspect(&config),
        "at" => run_at(sub_matches, &config),
        "during" => run_during(sub_matches, &config),
        other => Err(format!("Unknown subcommand: {}", other)),
    };

    if let Err(e) = result {
        eprintln!("{} error: {}", name, e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_field(config: &Config) -> Result<WeatherField, String> {
    load_weather_field(config, &StationCount(config.station_count)).map_err(|e| e.to_string())
}

fn run_warm(config: &Config) -> Result<(), String> {
    if !config.use_cache {
        return Err("warm writes cache artifacts and cannot run with --no-cache".to_string());
    }
    let field = load_field(config)?;

    let cache = config.grid_cache();
    for input in &config.inputs {
        println!("{} -> {}", input.display(), cache.cache_path(input).display());
    }
    println!("{} grid(s) ready", field.index().len());
    Ok(())
}

fn run_inspect(config: &Config) -> Result<(), String> {
    let field = load_field(config)?;

    println!("Boundary policy: {}", field.boundary());
    println!("Cache policy: {}", config.cache_policy);
    for (i, grid) in field.index().grids().iter().enumerate() {
        let (samples, stations) = grid.shape();
        println!(
            "Grid {}: {} -> {} ({} time samples x {} stations)",
            i,
            format_unix(grid.start_time()),
            format_unix(grid.end_time()),
            samples,
            stations
        );
        for channel in Channel::ALL {
            let (lo, hi) = grid
                .channel(channel)
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            println!(
                "    {:<16} {:>10.3} .. {:<10.3} {}",
                channel.to_string(),
                lo,
                hi,
                channel.units()
            );
        }
    }
    if let Some((start, end)) = field.index().coverage() {
        println!("Coverage: {} -> {}", format_unix(start), format_unix(end));
    }
    Ok(())
}

fn run_at(matches: &ArgMatches, config: &Config) -> Result<(), String> {
    let station = *matches.get_one::<f64>("station").ok_or("Missing station")?;
    let time = parse_time(matches.get_one::<String>("time").ok_or("Missing time")?)?;
    let field = load_field(config)?;

    let sample = field.at(station, time).map_err(|e| e.to_string())?;
    println!("Station {} at {}", station, format_unix(time));
    print_sample(&sample);
    Ok(())
}

fn run_during(matches: &ArgMatches, config: &Config) -> Result<(), String> {
    let station = *matches.get_one::<f64>("station").ok_or("Missing station")?;
    let start = parse_time(matches.get_one::<String>("start").ok_or("Missing start")?)?;
    let end = parse_time(matches.get_one::<String>("end").ok_or("Missing end")?)?;
    let field = load_field(config)?;

    let sample = field.during(station, start, end).map_err(|e| e.to_string())?;
    println!(
        "Station {} between {} and {}",
        station,
        format_unix(start),
        format_unix(end)
    );
    print_sample(&sample);
    Ok(())
}

fn print_sample(sample: &WeatherSample) {
    println!("  ghi:              {:.3} W/m²", sample.ghi);
    println!(
        "  wind:             {:.3} m/s N-S, {:.3} m/s E-W ({:.3} m/s toward {:.1}°)",
        sample.wind.north_south,
        sample.wind.east_west,
        sample.wind.speed(),
        sample.wind.bearing_degrees()
    );
    println!("  air_temp:         {:.3} °C", sample.air_temp);
    println!("  surface_pressure: {:.3}", sample.pressure);
    println!("  air_density:      {:.5}", sample.air_density);
    println!("  1/speed_of_sound: {:.6} s/m", sample.inverse_speed_of_sound);
}

/// Arguments shared by every subcommand
fn weather_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Weather CSV file(s), one grid each")
                .num_args(1..)
                .required(true),
        )
        .arg(
            Arg::new("stations")
                .short('s')
                .long("stations")
                .value_name("COUNT")
                .help("Number of stations per time block")
                .value_parser(value_parser!(usize))
                .required(true),
        )
        .arg(
            Arg::new("cache-policy")
                .long("cache-policy")
                .value_name("POLICY")
                .help("When a cache artifact may be reused")
                .value_parser(["existence", "modified"])
                .default_value("existence"),
        )
        .arg(
            Arg::new("boundary")
                .long("boundary")
                .value_name("POLICY")
                .help("Behaviour outside a grid's sampled range")
                .value_parser(["extrapolate", "clamp"])
                .default_value("extrapolate"),
        )
        .arg(
            Arg::new("threads")
                .short('j')
                .long("threads")
                .value_name("COUNT")
                .help("Threads used to build grids")
                .value_parser(value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            Arg::new("no-cache")
                .long("no-cache")
                .help("Neither read nor write cache artifacts")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
}

fn station_arg() -> Arg {
    Arg::new("station")
        .long("station")
        .value_name("INDEX")
        .help("Station index to query")
        .value_parser(value_parser!(f64))
        .allow_negative_numbers(true)
        .required(true)
}

fn time_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("TIME")
        .help(help)
        .allow_negative_numbers(true)
        .required(true)
}

fn build_cli() -> Command {
    Command::new("solar_weather")
        .version("0.1.0")
        .about("Weather field interpolation for solar-car race strategy")
        .subcommand_required(true)
        .subcommand(weather_args(
            Command::new("warm").about("Build every grid and write its cache artifact"),
        ))
        .subcommand(weather_args(
            Command::new("inspect").about("Print the shape and time coverage of every grid"),
        ))
        .subcommand(weather_args(
            Command::new("at")
                .about("Weather at one station and instant")
                .arg(station_arg())
                .arg(time_arg("time", "Unix seconds or YYYY-MM-DD HH:MM:SS (UTC)")),
        ))
        .subcommand(weather_args(
            Command::new("during")
                .about("Mean weather over an interval (average of the endpoints)")
                .arg(station_arg())
                .arg(time_arg("start", "Interval start"))
                .arg(time_arg("end", "Interval end")),
        ))
}
