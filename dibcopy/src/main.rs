use dibcopy::{copy_demo, copy_image_file, DirectorySink, DEFAULT_DEMO};
use libdib::{DibFormat, NamedColor};
use std::path::PathBuf;
use tracing::{info, Level};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

#[cfg(not(debug_assertions))]
const DEFAULT_DEBUG_LEVEL: u8 = 1;
#[cfg(debug_assertions)]
const DEFAULT_DEBUG_LEVEL: u8 = 99;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, default_value_t = DEFAULT_DEBUG_LEVEL, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// The directory standing in for the clipboard
    #[arg(short, long, default_value = "clipboard")]
    clipboard_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// copies the bordered 12x10 demo image
    Demo {
        /// Background color (e.g. white, semi-aqua, semi-pink)
        #[arg(short, long, requires = "format")]
        background: Option<NamedColor>,

        /// DIB flavour to copy as: dib, dibv5, dibv5-long
        #[arg(short, long, requires = "background")]
        format: Option<DibFormat>,
    },

    /// copies an image file (any format the `image` crate reads)
    Copy {
        /// The image
        img_file: PathBuf,

        /// DIB flavour to copy as: dib, dibv5, dibv5-long
        #[arg(short, long, default_value = "dibv5-long")]
        format: DibFormat,
    },
}

fn run(cli: Cli) -> Result<()> {
    let mut sink = DirectorySink::new(cli.clipboard_dir);
    info!("clipboard directory: {}", sink.root().display());

    match cli.command {
        Commands::Demo { background, format } => {
            let jobs = match (background, format) {
                (Some(background), Some(format)) => vec![(background, format)],
                (None, None) => DEFAULT_DEMO.to_vec(),
                _ => bail!("--background and --format go together"),
            };
            copy_demo(&mut sink, &jobs)?;
        }
        Commands::Copy { img_file, format } => {
            copy_image_file(&mut sink, &img_file, format)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .init();

    run(cli)?;
    println!("Successfully copied!");
    Ok(())
}
