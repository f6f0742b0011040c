use clap::Parser;
use sheet_packer::config::{self, SearchConfig};
use sheet_packer::render;
use sheet_packer::search::Search;
use sheet_packer::types::{ItemSpec, Sheet};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "sheet_packer",
    about = "Pack as many rectangular items as possible onto a sheet"
)]
struct Cli {
    /// Sheet dimensions (LxW, e.g. 10x7.5)
    #[arg(long)]
    sheet: String,

    /// Item sizes as LxW, each available in unlimited quantity (e.g. 2x3 1.5x1)
    #[arg(long = "items", num_args = 0..)]
    items: Vec<String>,

    /// Stop after this many search iterations
    #[arg(long, default_value_t = config::DEFAULT_MAX_ITERATIONS)]
    max_iterations: u64,

    /// Stop after this many seconds
    #[arg(long, default_value_t = config::DEFAULT_MAX_RUNTIME.as_secs_f64())]
    max_runtime: f64,

    /// Iterations between progress log lines (0 disables them)
    #[arg(long, default_value_t = config::DEFAULT_PROGRESS_INTERVAL)]
    progress_interval: u64,

    /// Show ASCII layout of the best placement
    #[arg(long)]
    layout: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log every new best placement
    #[arg(short, long)]
    verbose: bool,
}

fn parse_dimensions(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected LxW", s));
    }
    let length = parts[0]
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid length in '{}'", s))?;
    let width = parts[1]
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    Ok((length, width))
}

fn build_config(cli: &Cli) -> Result<SearchConfig, String> {
    let (length, width) = parse_dimensions(&cli.sheet)?;
    let items = cli
        .items
        .iter()
        .map(|s| parse_dimensions(s).map(|(l, w)| ItemSpec::new(l, w)))
        .collect::<Result<Vec<_>, _>>()?;
    let max_runtime =
        config::runtime_from_secs(cli.max_runtime).map_err(|e| e.to_string())?;

    let config = SearchConfig::new(Sheet::new(length, width), items)
        .with_max_iterations(cli.max_iterations)
        .with_max_runtime(max_runtime)
        .with_progress_interval(cli.progress_interval);
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let search = build_config(&cli)
        .and_then(|c| Search::new(c).map_err(|e| e.to_string()))
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    let sheet = search.config().sheet;
    let outcome = search.run();

    if cli.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Total items placed: {}", outcome.count);
    println!("Positions of placed items:");
    for p in &outcome.placements {
        println!("  {} [{}]", p, p.item());
    }
    if cli.layout {
        print!("{}", render::render_sheet(sheet, &outcome.placements));
        println!("{}", render::summary(sheet, &outcome.placements));
    }
    println!();
    println!(
        "Stopped: {} after {} iteration{} in {:.2?}",
        outcome.termination,
        outcome.stats.iterations,
        if outcome.stats.iterations == 1 { "" } else { "s" },
        outcome.stats.elapsed,
    );
}
