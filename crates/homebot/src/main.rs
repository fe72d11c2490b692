//! homebot
//!
//! Command-line front end for BDL building descriptions.

use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use tracing::debug;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use homebot::bdl::format_syntax_error;
use homebot::bdl::parse_document_with_default_name;
use homebot::config::Config;
use homebot::model::Building;
use homebot::model::Control;
use homebot::model::Node;
use homebot::model::NodeMut;
use homebot::model::Power;
use homebot::PrettyPrint;
use homebot::ToBdl;

/// Inspect and drive BDL building descriptions.
#[derive(Parser, Debug)]
#[command(name = "homebot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the TOML config file (defaults to ./homebot.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// BDL file to load (overrides `building.file` from the config).
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Log at debug level regardless of the config.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse the file and report its size.
    Check,
    /// Print the canonical BDL form.
    Fmt,
    /// Print the building tree with live state.
    Show {
        /// Print JSON instead of the indented tree.
        #[arg(long)]
        json: bool,
    },
    /// List every addressable path.
    Paths,
    /// Print one node and whether it is effectively off.
    Get {
        /// Slash-separated path, e.g. `house/kitchen/light`.
        path: String,
    },
    /// Set a node's state, then print the resulting power report.
    Set {
        path: String,
        /// `on`/`off`, or `0`..=`100` for regulated devices.
        value: String,
    },
    /// Flip a switch-like node, then print the resulting power report.
    Toggle { path: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        config.logging.level.into()
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let Some(file) = cli.file.or_else(|| config.building.file.clone()) else {
        bail!("no BDL file given; pass --file or set building.file in the config");
    };
    let mut building = load_building(&file, &config.building.default_name)?;

    match cli.command {
        Command::Check => {
            println!(
                "ok: {} rooms, {} devices",
                building.rooms().count(),
                building.device_count()
            );
        }
        Command::Fmt => println!("{}", building.to_bdl()),
        Command::Show { json: true } => {
            println!("{}", serde_json::to_string_pretty(&building)?);
        }
        Command::Show { json: false } => print!("{}", building.to_pretty_string()),
        Command::Paths => {
            for path in building.paths() {
                println!("{path}");
            }
        }
        Command::Get { path } => {
            let node = building.resolve(&path)?;
            println!("{}", describe(node, &building));
        }
        Command::Set { path, value } => {
            let mut node = building.resolve_mut(&path)?;
            apply_value(&mut node, &value).with_context(|| format!("setting {path}"))?;
            info!(path = %path, value = %value, "state updated");
            print_power_report(&building)?;
        }
        Command::Toggle { path } => {
            building.resolve_mut(&path)?.toggle()?;
            info!(path = %path, "state toggled");
            print_power_report(&building)?;
        }
    }

    Ok(())
}

fn load_building(path: &Path, default_name: &str) -> Result<Building> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    match parse_document_with_default_name(&source, default_name) {
        Ok(building) => {
            debug!(
                file = %path.display(),
                building = building.name(),
                entries = building.entries().len(),
                "loaded building"
            );
            Ok(building)
        }
        Err(err) => {
            let filename = path.display().to_string();
            eprint!("{}", format_syntax_error(&err, &source, &filename));
            bail!("{filename} is not a valid building description")
        }
    }
}

/// Regulated devices take a level, everything else takes `on`/`off`.
fn apply_value(node: &mut NodeMut<'_>, value: &str) -> Result<()> {
    let regulated = matches!(
        node.as_node(),
        Node::Device(device) if device.control() == Control::Regulate
    );
    if regulated {
        let percent: u8 = value
            .parse()
            .with_context(|| format!("'{value}' is not a level between 0 and 100"))?;
        if percent > 100 {
            bail!("'{value}' is not a level between 0 and 100");
        }
        node.set_level(percent)?;
        return Ok(());
    }

    let power: Power = value
        .parse()
        .with_context(|| format!("'{value}' is not 'on' or 'off'"))?;
    node.set_power(power)?;
    Ok(())
}

fn describe(node: Node<'_>, building: &Building) -> String {
    let effective = if node.is_effectively_off(building) {
        "off"
    } else {
        "on"
    };
    format!(
        "{}: {}, effectively {}",
        node.path(),
        node.state_label(),
        effective
    )
}

fn print_power_report(building: &Building) -> Result<()> {
    for path in building.paths() {
        let node = building.resolve(&path)?;
        println!("{}", describe(node, building));
    }
    Ok(())
}
