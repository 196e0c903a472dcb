// dsatty: step-through animation of data-structure operations in code snippets

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

use dsatty::config::Config;
use dsatty::parser::Language;
use dsatty::session::is_snippet_error;
use dsatty::ui::App;
use dsatty::Session;

#[derive(Debug, Parser)]
#[command(name = "dsatty", version, about = "Animate data-structure operations in a code snippet")]
struct Cli {
    /// Snippet to animate
    file: PathBuf,

    /// Snippet language (java, python, javascript, cpp); inferred from the extension if omitted
    #[arg(short, long)]
    lang: Option<String>,

    /// Initial playback speed multiplier (0.25 to 2.0)
    #[arg(short, long)]
    speed: Option<f64>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the run as JSON instead of starting the TUI
    #[arg(long)]
    dump: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(config: &Config, log_file: Option<&Path>, tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));

    // stderr would tear the alternate screen, so the TUI only logs to a file
    let (writer, ansi) = match log_file.or(config.log.file.as_deref()) {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if tui => (BoxMakeWriter::new(io::sink), false),
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .init();
    Ok(())
}

fn resolve_language(cli: &Cli) -> Result<Language> {
    match &cli.lang {
        Some(name) => Ok(name.parse()?),
        None => Language::from_path(&cli.file).with_context(|| {
            format!(
                "cannot infer the language of {}; pass --lang",
                cli.file.display()
            )
        }),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    init_logging(&config, cli.log_file.as_deref(), !cli.dump)?;

    let language = resolve_language(&cli)?;
    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;
    tracing::info!("Loaded {} ({})", cli.file.display(), language);

    let mut session = Session::new(&config.playback);
    if let Some(speed) = cli.speed {
        session.set_speed(speed)?;
    }
    session.set_source(source, language);

    if cli.dump {
        session.execute()?;
        if let Some(report) = session.report() {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        return Ok(());
    }

    // Snippet errors are shown in the log pane; anything else is fatal
    if let Err(e) = session.execute() {
        if !is_snippet_error(&e) {
            return Err(e.into());
        }
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, Some(cli.file.clone()));
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("running the terminal UI")
}
