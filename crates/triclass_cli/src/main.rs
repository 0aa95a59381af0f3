use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;
use triclass_core::{
    ClassId, Config, QueryRow, ScanOptions, SessionPhase, TrainingState, collect_many,
    export_csv, format_distances, loaded_message,
};

#[derive(Parser)]
#[command(name = "triclass")]
#[command(version = env!("TRICLASS_VERSION"), long_about = None)]
#[command(about = "Nearest-centroid image classifier for three classes")]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML settings file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load training images and report what each class received
    Train {
        #[command(flatten)]
        classes: ClassPaths,
    },
    /// Train all three classes, then classify unknown images
    Classify {
        #[command(flatten)]
        classes: ClassPaths,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Also write results to this CSV file
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
        /// Images to classify
        #[arg(required = true)]
        unknown: Vec<PathBuf>,
    },
}

/// Image files or folders per class. Repeat a flag to pass several paths.
#[derive(Args, Debug, Default)]
struct ClassPaths {
    #[arg(long = "class-1", value_name = "PATH", action = ArgAction::Append)]
    class_1: Vec<PathBuf>,
    #[arg(long = "class-2", value_name = "PATH", action = ArgAction::Append)]
    class_2: Vec<PathBuf>,
    #[arg(long = "class-3", value_name = "PATH", action = ArgAction::Append)]
    class_3: Vec<PathBuf>,
}

impl ClassPaths {
    fn per_class(&self) -> [(ClassId, &[PathBuf]); 3] {
        let [c1, c2, c3] = ClassId::ALL;
        [
            (c1, self.class_1.as_slice()),
            (c2, self.class_2.as_slice()),
            (c3, self.class_3.as_slice()),
        ]
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("logging disabled: {e}");
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(p) => Config::load(p).with_context(|| format!("cannot load {}", p.display())),
        None => Ok(Config::default()),
    }
}

fn train(state: &mut TrainingState, classes: &ClassPaths, out: &mut dyn Write) -> Result<()> {
    let opts = ScanOptions {
        recursive: state.config().recursive,
    };
    for (class, paths) in classes.per_class() {
        if paths.is_empty() {
            continue;
        }
        let start = Instant::now();
        let files =
            collect_many(paths, opts).with_context(|| format!("cannot list images for {class}"))?;
        let slot = state
            .train_from_paths(class, &files)
            .with_context(|| format!("training {class} failed"))?;
        info!("{class} trained in {:.1?}", start.elapsed());
        writeln!(out, "{}", loaded_message(class, slot.image_count()))?;
    }
    Ok(())
}

fn phase_label(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Uninitialized => "no class trained",
        SessionPhase::PartiallyTrained => "partially trained",
        SessionPhase::Trained => "all classes trained",
    }
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let mut state = TrainingState::new(config);

    match cli.command {
        Commands::Train { classes } => {
            train(&mut state, &classes, out)?;
            writeln!(out, "Session: {}", phase_label(state.phase()))?;
        }
        Commands::Classify {
            classes,
            json,
            csv,
            unknown,
        } => {
            train(&mut state, &classes, out)?;
            let mut rows = Vec::with_capacity(unknown.len());
            for path in unknown {
                let result = state
                    .classify_path(&path)
                    .with_context(|| format!("cannot classify {}", path.display()))?;
                rows.push(QueryRow { file: path, result });
            }

            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
            } else {
                for row in &rows {
                    writeln!(out, "\n{}", row.file.display())?;
                    writeln!(out, "{}", format_distances(&row.result, state.config().precision))?;
                }
            }

            if let Some(path) = csv {
                export_csv(&rows, &path)
                    .with_context(|| format!("cannot write {}", path.display()))?;
                info!("CSV exported: {}", path.display());
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run(cli, &mut std::io::stdout().lock())
}
