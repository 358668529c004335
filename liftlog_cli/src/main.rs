mod prompt;

use clap::{Parser, Subcommand};
use liftlog_core::chart::render_svg;
use liftlog_core::export::export_csv;
use liftlog_core::ledger::capitalize;
use liftlog_core::*;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Strength training log with per-muscle progression tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter a workout session interactively and save it
    Add,

    /// Show worked sets, reps and volume for every muscle group
    Muscles,

    /// List exercises, optionally narrowed by their current variant
    Exercises {
        /// Only exercises currently set up with this equipment (barbell, dumbbell, cable...)
        #[arg(long)]
        equipment: Option<String>,

        /// Only exercises currently using this grip (neutral, overhand...)
        #[arg(long)]
        grip: Option<String>,

        /// Only exercises with this execution (simultaneous, sequential)
        #[arg(long)]
        execution: Option<String>,
    },

    /// Show every logged entry of a muscle group or exercise
    History {
        /// Muscle group or exercise name
        name: String,
    },

    /// Show the progression of a metric over time for a muscle group or exercise
    Progress {
        /// Muscle group or exercise name
        name: String,

        /// Metric to project (weight, reps, volume, sets)
        #[arg(long, default_value = "weight")]
        metric: String,

        /// Render the series as an SVG chart to this path
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Write the series as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Keep stdout for prompts and tables
    liftlog_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    let sessions_dir = config.data.sessions_dir(&data_dir);
    tracing::debug!("Using sessions directory {:?}", sessions_dir);

    // Catalog problems are fatal for every command, including `add`
    let catalog = config.catalog();
    check_catalog(&catalog)?;

    match cli.command {
        Commands::Add => cmd_add(&catalog, &sessions_dir),
        Commands::Muscles => cmd_muscles(&catalog, &sessions_dir),
        Commands::Exercises {
            equipment,
            grip,
            execution,
        } => {
            let filter = ExerciseFilter {
                equipment,
                grip,
                execution,
            };
            cmd_exercises(&catalog, &sessions_dir, &filter)
        }
        Commands::History { name } => cmd_history(&catalog, &sessions_dir, &name),
        Commands::Progress {
            name,
            metric,
            svg,
            csv,
        } => cmd_progress(&config, &catalog, &sessions_dir, &name, &metric, svg, csv),
    }
}

fn check_catalog(catalog: &Catalog) -> Result<()> {
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Catalog("Invalid catalog".into()));
    }
    Ok(())
}

/// Build the ledgers and replay every stored session into them
fn load_ledgers(catalog: &Catalog, sessions_dir: &Path) -> Result<Ledgers> {
    let mut ledgers = Ledgers::from_catalog(catalog)?;
    let report = replay_dir(&mut ledgers, sessions_dir)?;
    for skipped in &report.skipped {
        eprintln!("Skipped {}: {}", skipped.source, skipped.reason);
    }
    Ok(ledgers)
}

fn cmd_add(catalog: &Catalog, sessions_dir: &Path) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    let stdin = io::stdin();
    let session =
        prompt::SessionPrompt::new(stdin.lock(), io::stdout(), catalog, today).run()?;

    let mut sink = SessionDir::new(sessions_dir);
    let path = sink.append(&session)?;

    println!();
    for record in &session.exercises {
        println!(
            "  {}: reps {:?}, weight {:?}",
            record.exercise_name, record.reps, record.weight
        );
    }
    println!("\n✓ Session saved to {}", path.display());
    Ok(())
}

fn cmd_muscles(catalog: &Catalog, sessions_dir: &Path) -> Result<()> {
    let ledgers = load_ledgers(catalog, sessions_dir)?;
    for muscle in ledgers.muscles() {
        println!("{}", muscle);
    }
    Ok(())
}

fn cmd_exercises(
    catalog: &Catalog,
    sessions_dir: &Path,
    exercise_filter: &ExerciseFilter,
) -> Result<()> {
    let ledgers = load_ledgers(catalog, sessions_dir)?;
    let matched = filter(ledgers.exercises(), exercise_filter);

    if matched.is_empty() {
        println!("No exercises match.");
        return Ok(());
    }

    for exercise in matched {
        println!(
            "{:<22} {} / {} / {}  [{}]  {} entries",
            exercise.name(),
            exercise.equipment(),
            exercise.grip(),
            exercise.execution(),
            exercise.definition().muscles.join(", "),
            exercise.history().len()
        );
    }
    Ok(())
}

fn cmd_history(catalog: &Catalog, sessions_dir: &Path, name: &str) -> Result<()> {
    let ledgers = load_ledgers(catalog, sessions_dir)?;
    let tracked = ledgers.tracked(name)?;

    if tracked.history().is_empty() {
        println!("No history for {}", tracked.name());
        return Ok(());
    }

    println!("{}", capitalize(tracked.name()));
    for entry in tracked.history() {
        let variant = entry
            .variant
            .as_ref()
            .map(|v| format!("  ({}, {}, {})", v.equipment, v.grip, v.execution))
            .unwrap_or_default();
        println!(
            "  {}  {} sets  reps {:?}  weight {:?}  volume {}{}",
            entry.date,
            entry.sets,
            entry.reps,
            entry.weight,
            entry.total_volume(),
            variant
        );
    }
    Ok(())
}

fn cmd_progress(
    config: &Config,
    catalog: &Catalog,
    sessions_dir: &Path,
    name: &str,
    metric: &str,
    svg: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let metric: Metric = metric.parse()?;
    let ledgers = load_ledgers(catalog, sessions_dir)?;
    let tracked = ledgers.tracked(name)?;
    let series = project(tracked, metric);

    if series.is_empty() {
        println!("No data to plot for {} ({})", tracked.name(), metric);
        return Ok(());
    }

    println!("{} progression ({})", capitalize(tracked.name()), metric);
    for point in &series {
        println!("  {}  {}", point.date, point.value);
    }

    if let Some(path) = svg {
        let size = (config.chart.width, config.chart.height);
        if let Some(document) = render_svg(tracked.name(), metric, &series, size)? {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, document)?;
            println!("✓ Chart written to {}", path.display());
        }
    }

    if let Some(path) = csv {
        export_csv(&series, &path)?;
        println!("✓ CSV written to {}", path.display());
    }

    Ok(())
}
