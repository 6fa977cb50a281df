//! ttykit - demo CLI for the terminal toolkit

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use ttykit::input::NamedKey;
use ttykit::prompt;
use ttykit::render::{self, Align, BaseColor, BorderStyle, Color, TableOptions};
use ttykit::terminal::TtyBackend;
use ttykit::widgets::{Loader, ProgressBar};
use ttykit::{Config, StyleSpec, Terminal};

#[derive(Parser)]
#[command(name = "ttykit")]
#[command(author, version)]
#[command(about = "Try out raw-mode prompts, key decoding and styled output")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick one option with the arrow keys
    Select {
        /// Options to choose from
        #[arg(required = true)]
        options: Vec<String>,
        /// Question shown above the list
        #[arg(short, long, default_value = "Choose one")]
        prompt: String,
        /// Index of the initially highlighted option
        #[arg(short, long, default_value_t = 0)]
        default: usize,
    },
    /// Pick any number of options; space toggles
    Multi {
        /// Options to choose from
        #[arg(required = true)]
        options: Vec<String>,
        /// Question shown above the list
        #[arg(short, long, default_value = "Choose any")]
        prompt: String,
    },
    /// Ask a yes/no question
    Confirm {
        /// The question
        question: String,
        /// Answer yes when Enter is pressed
        #[arg(short = 'y', long)]
        default_yes: bool,
    },
    /// Print the name of every key pressed until Esc
    Keys,
    /// Render comma-separated rows as a table
    Table {
        /// Rows, cells separated by commas
        rows: Vec<String>,
        /// Header cells, separated by commas
        #[arg(long, value_name = "CELLS")]
        headers: Option<String>,
        /// Border style
        #[arg(short, long, value_enum, default_value_t = Border::Single)]
        border: Border,
        /// Column alignments, e.g. "l,r,c"
        #[arg(short, long, value_name = "ALIGNS")]
        align: Option<String>,
    },
    /// Animate a progress bar and a spinner
    Progress {
        /// Number of steps
        #[arg(short, long, default_value_t = 40)]
        total: u64,
        /// Pause between steps in milliseconds
        #[arg(long, default_value_t = 50)]
        delay_ms: u64,
    },
    /// Show detected terminal capabilities
    Caps,
}

#[derive(Clone, Copy, ValueEnum)]
enum Border {
    Single,
    Double,
    Rounded,
    Ascii,
    None,
}

impl From<Border> for BorderStyle {
    fn from(border: Border) -> Self {
        match border {
            Border::Single => BorderStyle::Single,
            Border::Double => BorderStyle::Double,
            Border::Rounded => BorderStyle::Rounded,
            Border::Ascii => BorderStyle::Ascii,
            Border::None => BorderStyle::None,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TTYKIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn terminal(config: &Config) -> Terminal<TtyBackend> {
    let mut term = Terminal::stdio();
    config.apply(&mut term);
    term
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Select {
            options,
            prompt,
            default,
        } => cmd_select(&config, &prompt, &options, default),
        Commands::Multi { options, prompt } => cmd_multi(&config, &prompt, &options),
        Commands::Confirm {
            question,
            default_yes,
        } => cmd_confirm(&config, &question, default_yes),
        Commands::Keys => cmd_keys(&config),
        Commands::Table {
            rows,
            headers,
            border,
            align,
        } => cmd_table(&rows, headers.as_deref(), border, align.as_deref()),
        Commands::Progress { total, delay_ms } => cmd_progress(&config, total, delay_ms),
        Commands::Caps => cmd_caps(&config),
    }
}

#[cfg(not(tarpaulin_include))]
fn cmd_select(config: &Config, prompt: &str, options: &[String], default: usize) -> Result<()> {
    let mut term = terminal(config);
    term.enter()?;
    let picked = prompt::select_value(&mut term, &config.prompt, prompt, options, default);
    term.exit();
    match picked? {
        Some(value) => println!("{value}"),
        None => bail!("cancelled"),
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn cmd_multi(config: &Config, prompt: &str, options: &[String]) -> Result<()> {
    let mut term = terminal(config);
    term.enter()?;
    let picked = prompt::multi_select(&mut term, &config.prompt, prompt, options, &[]);
    term.exit();
    match picked? {
        Some(indices) => {
            for i in indices {
                println!("{}", options[i]);
            }
        }
        None => bail!("cancelled"),
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn cmd_confirm(config: &Config, question: &str, default_yes: bool) -> Result<()> {
    let mut term = terminal(config);
    term.enter()?;
    let answer = prompt::confirm(&mut term, question, default_yes);
    term.exit();
    match answer? {
        Some(true) => Ok(()),
        Some(false) => std::process::exit(1),
        None => bail!("cancelled"),
    }
}

#[cfg(not(tarpaulin_include))]
fn cmd_keys(config: &Config) -> Result<()> {
    let mut term = terminal(config);
    term.enter()?;
    let hint = StyleSpec::new().dim();
    let line = term.style("Press keys to see their names, Esc to quit", &hint);
    term.write_str(&line)?;
    term.write_str("\r\n")?;
    term.flush()?;

    loop {
        let key = term.next_key()?;
        term.write_str(&format!("{key}\r\n"))?;
        term.flush()?;
        if key.is(NamedKey::Esc) {
            break;
        }
    }
    term.try_exit()?;
    Ok(())
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}

fn parse_aligns(spec: &str) -> Result<Vec<Align>> {
    spec.split(',')
        .map(|token| match token.trim() {
            "l" | "left" => Ok(Align::Left),
            "c" | "center" => Ok(Align::Center),
            "r" | "right" => Ok(Align::Right),
            other => bail!("Unknown alignment: {other}"),
        })
        .collect()
}

fn cmd_table(
    rows: &[String],
    headers: Option<&str>,
    border: Border,
    align: Option<&str>,
) -> Result<()> {
    let headers = headers.map(split_cells).unwrap_or_default();
    let rows: Vec<Vec<String>> = rows.iter().map(|r| split_cells(r)).collect();
    let options = TableOptions {
        border: border.into(),
        align: align.map(parse_aligns).transpose()?.unwrap_or_default(),
        ..TableOptions::default()
    };
    println!("{}", render::table(&headers, &rows, &options));
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn cmd_progress(config: &Config, total: u64, delay_ms: u64) -> Result<()> {
    let mut term = terminal(config);
    let capability = term.capability();
    let width = (term.current_size().cols as usize).min(80);
    let delay = Duration::from_millis(delay_ms);
    let mut out = io::stdout();

    let fill = StyleSpec::new().fg(Color::named(BaseColor::Green));
    let mut bar = ProgressBar::new(total, width)
        .label("working")
        .styled(fill, capability);
    bar.draw(&mut out)?;
    while !bar.is_finished() {
        thread::sleep(delay);
        bar.inc(1);
        bar.draw(&mut out)?;
    }
    bar.finish(&mut out)?;

    let glyph = StyleSpec::new().fg(Color::named(BaseColor::Cyan));
    let mut loader = Loader::new("tidying up").styled(glyph, capability);
    loader.draw(&mut out)?;
    for _ in 0..10 {
        thread::sleep(delay);
        if loader.tick(Instant::now()) {
            loader.draw(&mut out)?;
        }
    }
    loader.finish(&mut out, "done")?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn cmd_caps(config: &Config) -> Result<()> {
    use ttykit::Backend;

    let mut term = terminal(config);
    let capability = term.capability();
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    println!("color: {}", capability.name());
    println!("stdin tty: {}", yes_no(term.backend().input_is_tty()));
    println!("stdout tty: {}", yes_no(term.backend().output_is_tty()));
    println!("size: {}", term.current_size());

    let sample = StyleSpec::new().fg(Color::Rgb(255, 135, 0)).bold();
    println!("sample: {}", term.style("ttykit", &sample));
    Ok(())
}
