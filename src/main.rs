#![warn(non_snake_case)]
//! # terrain-autopaint
//!
//! Paints a CSV terrain grid into a scenario editor. The grid is split into
//! viewport pages; for every page the elevation cursor is walked through the
//! page's heights and terrain labels are painted with the largest brushes
//! that fit. Actions go to an input driver: by default a dry run that logs
//! them, or with `--plan-out` a JSON action script.
//!
//! Launched without arguments, a terminal form asks for the same settings.
//!
//! ## License
//! Licensed under the MIT License.

use clap::Parser;
use log::{error, info, warn};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use terrain_autopaint::document::Document;
use terrain_autopaint::editor::{RunOptions, Session};
use terrain_autopaint::platform::{LogDriver, Pacing, RecordingDriver};
use terrain_autopaint::profile::{available_profiles, Profile, ScreenLayout, DEFAULT_PROFILE};
use terrain_autopaint::ui::{self, DialogResult};

/// Paint a CSV terrain grid into the scenario editor.
#[derive(Parser, Debug)]
#[command(name = "terrain-autopaint")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File containing input data in CSV format, with x, y and z columns
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Seconds to wait before the first action
    #[arg(short = 'c', long, default_value_t = 5)]
    countdown: u64,

    /// Take the starting map size from the file (when continuing a map)
    #[arg(long)]
    start_size_from_file: bool,

    /// Built-in profile name, or path to a JSON profile
    #[arg(short = 'p', long, default_value = DEFAULT_PROFILE)]
    profile: String,

    /// Minimum time between clicks, in seconds
    #[arg(short = 't', long, default_value_t = Pacing::DEFAULT_MIN_TIME)]
    min_time: f64,

    /// JSON screen layout replacing the built-in one
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Write the action script as JSON to this path instead of a dry run
    #[arg(long)]
    plan_out: Option<PathBuf>,

    /// Write `<input>.checkpoint` with done marks if the run is aborted
    #[arg(long)]
    checkpoint: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Use debug logging level
    #[arg(short = 'd', long)]
    debug: bool,
}

impl Args {
    fn from_form(values: ui::FormValues) -> Self {
        Self {
            input: values.input,
            countdown: values.countdown,
            start_size_from_file: values.start_size_from_file,
            profile: values.profile,
            min_time: values.min_time,
            layout: None,
            plan_out: None,
            checkpoint: false,
            yes: true,
            debug: false,
        }
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn countdown(seconds: u64) {
    for remaining in (1..=seconds).rev() {
        info!("Starting in {}...", remaining);
        thread::sleep(Duration::from_secs(1));
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let layout = match &args.layout {
        Some(path) => ScreenLayout::load(path)?,
        None => ScreenLayout::builtin()?,
    };
    let profile = Profile::resolve(&args.profile)?;
    info!("Using profile '{}' ({} menu entries)", profile.name, profile.menu.len());
    let mut doc = Document::open(&args.input)?;

    if !args.yes {
        let lines = ui::start_instructions(&args.input.display().to_string(), args.countdown);
        let stdin = io::stdin();
        if ui::confirm(&mut stdin.lock(), &mut io::stdout(), &lines)? == DialogResult::Cancel {
            info!("Cancelled by operator.");
            return Ok(());
        }
    }

    let checkpoint = args.checkpoint.then(|| Document::checkpoint_path(&args.input));
    let summary = if let Some(plan_out) = &args.plan_out {
        let options = RunOptions {
            start_size_from_file: args.start_size_from_file,
            pacing: Pacing::none(),
            checkpoint,
        };
        let session = Session::new(&layout, &profile, options);
        let mut driver = RecordingDriver::new();
        let summary = session.run(&mut doc, &mut driver)?;
        let actions = driver.into_actions();
        let writer = BufWriter::new(File::create(plan_out)?);
        serde_json::to_writer_pretty(writer, &actions)?;
        info!("Wrote {} actions to {:?}", actions.len(), plan_out);
        summary
    } else {
        let options = RunOptions {
            start_size_from_file: args.start_size_from_file,
            pacing: Pacing::from_min_time(args.min_time),
            checkpoint,
        };
        let session = Session::new(&layout, &profile, options);
        countdown(args.countdown);
        session.run(&mut doc, &mut LogDriver::new())?
    };

    if summary.aborted {
        warn!("Stopped early: {} cells painted before the abort.", summary.cells_done);
    }
    info!(
        "Painted {} cells on {} pages with {} clicks and {} key presses.",
        summary.cells_done, summary.pages, summary.clicks, summary.key_presses
    );
    info!("terrain-autopaint has finished processing the input data.");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = if std::env::args_os().len() == 1 {
        let stdin = io::stdin();
        match ui::run_form(&mut stdin.lock(), &mut io::stdout(), &available_profiles())? {
            Some(values) => Args::from_form(values),
            None => return Ok(()),
        }
    } else {
        Args::parse()
    };

    init_logging(args.debug);
    info!("terrain-autopaint starting...");

    if let Err(e) = run(args) {
        error!("{}", e);
        return Err(e);
    }
    Ok(())
}
