use clap::{Parser, Subcommand};
use plutchik::catalog::Catalog;
use plutchik::{EmotionId, MotionConfig, Wheel, WheelConfig};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "plutchik", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Validate an emotion data file (or the built-in set) and print counts
    Check {
        /// Emotion TOML file; the built-in catalog when omitted
        data: Option<PathBuf>,
    },
    /// Render the wheel as a standalone SVG
    Render {
        #[arg(short = 'd', long)]
        data: Option<PathBuf>,

        /// Emotion id to show hovered, with every animation settled
        #[arg(long)]
        hover: Option<String>,

        /// Output file; stdout when omitted
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Print the emotion tree with each wedge's angular span
    List {
        #[arg(short = 'd', long)]
        data: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { data } => check(data.as_deref()),
        Commands::Render {
            data,
            hover,
            output,
        } => render(data.as_deref(), hover, output.as_deref()),
        Commands::List { data } => list(data.as_deref()),
    }
}

fn load_catalog(data: Option<&Path>) -> anyhow::Result<Catalog> {
    let catalog = match data {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}

fn build_wheel(data: Option<&Path>) -> anyhow::Result<Wheel> {
    let catalog = load_catalog(data)?;
    Ok(Wheel::new(
        catalog,
        WheelConfig::default(),
        MotionConfig::default(),
    )?)
}

fn check(data: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load_catalog(data)?;
    Wheel::new(catalog.clone(), WheelConfig::default(), MotionConfig::default())?;

    println!(
        "{} primaries, {} emotions",
        catalog.len(),
        catalog.node_count()
    );
    Ok(())
}

fn render(data: Option<&Path>, hover: Option<String>, output: Option<&Path>) -> anyhow::Result<()> {
    let mut wheel = build_wheel(data)?;

    if let Some(hover) = hover {
        let id = EmotionId::new(hover);
        if !wheel.catalog().contains(&id) {
            anyhow::bail!("No emotion with id '{}' in the catalog.", id);
        }
        wheel.on_enter(&id);
    }
    wheel.settle();

    let svg = wheel.scene().to_svg();
    match output {
        Some(path) => fs_err::write(path, svg)?,
        None => std::io::stdout().write_all(svg.as_bytes())?,
    }
    Ok(())
}

fn list(data: Option<&Path>) -> anyhow::Result<()> {
    let wheel = build_wheel(data)?;
    let mut out = std::io::stdout().lock();

    for wedge in wheel.layout().wedges() {
        let Some(node) = wheel.catalog().get(&wedge.id) else {
            continue;
        };
        let indent = if wedge.id == wedge.family { "" } else { "  " };
        writeln!(
            out,
            "{indent}{:<16} {:<16} {:>7.2} - {:>7.2}",
            node.id.as_str(), node.name, wedge.sector.start_angle, wedge.sector.end_angle
        )?;
    }
    Ok(())
}
