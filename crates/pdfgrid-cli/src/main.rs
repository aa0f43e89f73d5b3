mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdfgrid",
    version,
    about = "Map coordinates, draw grids and pull numbers from charts embedded in PDFs"
)]
struct Cli {
    /// Settings file (JSON); built-in defaults when omitted
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the embedded images of a PDF or layout file
    Images {
        /// Path to PDF or layout JSON file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Extract every number printed over one image (or all images)
    Scan {
        /// Path to PDF or layout JSON file
        input_file: PathBuf,

        /// Image number as listed by `images` (default: every image)
        #[arg(short, long, value_name = "N")]
        image: Option<usize>,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the extracted points to a CSV file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Also print the raw text lines found over each image
        #[arg(long)]
        raw: bool,
    },
    /// Look up the number nearest to one or more points on an image
    Pick {
        /// Path to PDF or layout JSON file
        input_file: PathBuf,

        /// Image number as listed by `images`
        #[arg(short, long, value_name = "N", default_value_t = 1)]
        image: usize,

        /// Point to look up as X,Y (repeatable)
        #[arg(short, long = "at", value_name = "X,Y", required = true, value_parser = commands::parse_pair, allow_hyphen_values = true)]
        at: Vec<(f64, f64)>,

        /// Coordinate space of --at: doc (default), pixel or widget
        #[arg(short, long, default_value = "doc")]
        space: String,

        /// Widget size as WxH for --space widget (default: image size)
        #[arg(long, value_name = "WxH", value_parser = commands::parse_size)]
        widget: Option<(u32, u32)>,

        /// Zoom in percent for --space widget
        #[arg(long, value_name = "PCT", default_value_t = 100)]
        zoom: u32,

        /// Pan offset as DX,DY for --space widget
        #[arg(long, value_name = "DX,DY", value_parser = commands::parse_offset, allow_hyphen_values = true)]
        pan: Option<(i32, i32)>,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Render the grid overlay of an image to PNG or TIFF
    Overlay {
        /// Path to PDF or layout JSON file
        input_file: PathBuf,

        /// Image number as listed by `images`
        #[arg(short, long, value_name = "N", default_value_t = 1)]
        image: usize,

        /// Output image; .tif/.tiff gives TIFF, anything else PNG
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: PathBuf,

        /// Grid spacing in document units
        #[arg(long, value_name = "UNITS")]
        interval: Option<f64>,

        /// Leave the grid and markers off
        #[arg(long)]
        no_grid: bool,

        /// Auto-extract numbers first so they appear as markers
        #[arg(long)]
        auto: bool,

        /// Mark the number nearest to X,Y in document coordinates (repeatable)
        #[arg(long = "at", value_name = "X,Y", value_parser = commands::parse_pair, allow_hyphen_values = true)]
        at: Vec<(f64, f64)>,

        /// Render the on-screen view of this size (WxH) instead of the bare overlay
        #[arg(long, value_name = "WxH", value_parser = commands::parse_size)]
        view: Option<(u32, u32)>,

        /// Zoom in percent for --view
        #[arg(long, value_name = "PCT", default_value_t = 100)]
        zoom: u32,

        /// Pan offset as DX,DY for --view
        #[arg(long, value_name = "DX,DY", value_parser = commands::parse_offset, allow_hyphen_values = true)]
        pan: Option<(i32, i32)>,
    },
    /// Inspect and validate settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default settings as JSON
    Show,
    /// Validate a settings file
    Validate {
        /// Path to JSON settings file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Images { input_file, output } => {
            commands::images::run(&input_file, config, &output)
        }
        Commands::Scan {
            input_file,
            image,
            output,
            out,
            raw,
        } => commands::scan::run(&input_file, config, image, &output, out, raw),
        Commands::Pick {
            input_file,
            image,
            at,
            space,
            widget,
            zoom,
            pan,
            output,
        } => commands::pick::run(
            &input_file,
            config,
            image,
            &at,
            commands::pick::ViewArgs {
                space,
                widget,
                zoom,
                pan,
            },
            &output,
        ),
        Commands::Overlay {
            input_file,
            image,
            out,
            interval,
            no_grid,
            auto,
            at,
            view,
            zoom,
            pan,
        } => commands::overlay::run(
            commands::overlay::OverlayArgs {
                input_file,
                image,
                out,
                interval,
                no_grid,
                auto,
                at,
                view,
                zoom,
                pan,
            },
            config,
        ),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
