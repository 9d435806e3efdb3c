//! boxmodel command line tool
//!
//! Inspects and debugs launcher window styles:
//! - List the styles found in the data directories
//! - Check style files for errors
//! - Print resolved styles or a template to start from
//! - Watch a style and report every reload

use anyhow::{Context, Result, bail};
use boxmodel_core::config::{DataLocations, Directories, style_directories};
use boxmodel_core::controller::{ControllerEvent, Environment, UiEvent, WindowController};
use boxmodel_core::placement::StaticDesktop;
use boxmodel_core::style::{Palette, Style, StyleReader, StyleRegistry};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Launcher window style tool
#[derive(Parser, Debug)]
#[command(name = "boxmodel")]
#[command(version, about)]
#[command(after_help = "\
Examples:
  boxmodel styles                 List available styles
  boxmodel check                  Check every style for errors
  boxmodel show Nord --json       Print the resolved Nord style as JSON
  boxmodel template > My.ini      Start a new style from the defaults
  boxmodel watch Nord --dark      Reload Nord on every change
")]
struct Cli {
    /// Use this directory for styles and settings instead of the standard locations
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available styles and their files
    Styles,

    /// Read styles and report errors
    Check {
        /// Style to check (all styles if omitted)
        name: Option<String>,
    },

    /// Print a resolved style
    Show {
        /// Style to show (the default style if omitted)
        name: Option<String>,

        /// Print JSON instead of a style definition file
        #[arg(long)]
        json: bool,

        /// Use the dark default palette
        #[arg(long)]
        dark: bool,
    },

    /// Print a complete style definition of the default style
    Template {
        /// Use the dark default palette
        #[arg(long)]
        dark: bool,
    },

    /// Apply a style and reload it whenever its files change
    Watch {
        /// Style to watch
        name: String,

        /// Select the style for dark mode
        #[arg(long)]
        dark: bool,
    },
}

/// Logs go to stderr, and to `log_file` when given. The returned guard
/// flushes the file writer on drop.
fn setup_logging(verbose: bool, log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("boxmodel={default_level}")));

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose))
            .with(filter)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter)
        .init();
    Ok(Some(guard))
}

fn directories(data_dir: Option<PathBuf>) -> Directories {
    data_dir.map_or_else(Directories::new, Directories::with_base)
}

fn registry(dirs: &Directories) -> StyleRegistry {
    StyleRegistry::scan(style_directories(dirs))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logging(cli.verbose, cli.log_file.as_ref())?;
    let dirs = directories(cli.data_dir);
    debug!("Data locations: {:?}", dirs.data_locations());

    match cli.command {
        Commands::Styles => run_styles(&dirs),
        Commands::Check { name } => run_check(&dirs, name.as_deref()),
        Commands::Show { name, json, dark } => run_show(&dirs, name.as_deref(), json, dark),
        Commands::Template { dark } => {
            print!("{}", Style::from_palette(&Palette::system(dark)).to_ini());
            Ok(())
        }
        Commands::Watch { name, dark } => run_watch(dirs, &name, dark).await,
    }
}

fn run_styles(dirs: &Directories) -> Result<()> {
    let registry = registry(dirs);
    if registry.is_empty() {
        println!("No styles found. User styles go in {}", dirs.user_styles().display());
        return Ok(());
    }
    let width = registry.names().map(str::len).max().unwrap_or(0);
    for (name, path) in registry.iter() {
        println!("{name:<width$}  {}", path.display());
    }
    Ok(())
}

fn run_check(dirs: &Directories, name: Option<&str>) -> Result<()> {
    let reader = StyleReader::with_registry(registry(dirs));
    let names: Vec<String> = match name {
        Some(name) => vec![name.to_string()],
        None => reader.registry().names().map(str::to_string).collect(),
    };

    let mut failed = 0;
    for name in &names {
        match reader.load(name) {
            Ok(loaded) => println!("ok     {name} ({} files)", loaded.sources.len()),
            Err(e) => {
                failed += 1;
                println!("error  {name}: {e}");
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} styles failed to load", names.len());
    }
    Ok(())
}

fn run_show(dirs: &Directories, name: Option<&str>, json: bool, dark: bool) -> Result<()> {
    let style = match name {
        Some(name) => StyleReader::with_registry(registry(dirs))
            .default_palette(Palette::system(dark))
            .read(name)
            .with_context(|| format!("Failed loading style: {name}"))?,
        None => Style::from_palette(&Palette::system(dark)),
    };

    if json {
        let text = serde_json::to_string_pretty(&style).context("Failed to serialize style")?;
        println!("{text}");
    } else {
        print!("{}", style.to_ini());
    }
    Ok(())
}

/// Drive a headless window controller until Ctrl+C.
async fn run_watch(dirs: Directories, name: &str, dark: bool) -> Result<()> {
    let desktop = StaticDesktop {
        dark_mode: dark,
        ..StaticDesktop::default()
    };
    let env = Environment {
        watch_styles: true,
        ..Environment::in_memory(Box::new(dirs), Box::new(desktop))
    };
    let mut controller = WindowController::new(env);

    let style_name = name.to_string();
    controller.add_observer(move |event| match event {
        ControllerEvent::StyleApplied => println!("applied  {style_name}"),
        ControllerEvent::Warning(message) => eprintln!("{message}"),
        _ => {}
    });

    let selected = if dark {
        controller.set_style_dark(Some(name))
    } else {
        controller.set_style_light(Some(name))
    };
    if !selected {
        bail!("Style does not exist: {name}");
    }

    let tx = controller.sender();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(UiEvent::Quit);
        }
    });

    info!("Watching {name}, press Ctrl+C to stop");
    controller.run().await;
    Ok(())
}
