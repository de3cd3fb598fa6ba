use anyhow::Context;
use chrono::prelude::*;
use clap::Parser;
use std::io::{self, BufRead, Write};

use command::{Command, HELP};
use session::GameSession;

mod command;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper on a 10x10 board with 5 mines", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn init_logging(level: log::Level) {
    use tracing_subscriber::filter::LevelFilter;

    let max_level = match level {
        log::Level::Error => LevelFilter::ERROR,
        log::Level::Warn => LevelFilter::WARN,
        log::Level::Info => LevelFilter::INFO,
        log::Level::Debug => LevelFilter::DEBUG,
        log::Level::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();
}

fn draw(session: &GameSession, ansi: bool, out: &mut impl Write) -> io::Result<()> {
    let now = Utc::now();
    writeln!(out)?;
    writeln!(
        out,
        "{}   {}",
        session.flag_counter(),
        session.timer_text(now)
    )?;
    write!(out, "{}", render::render_board(&session.engine, ansi))?;
    if let Some(banner) = session.banner(now) {
        writeln!(out, "{banner}  (n: new game, q: quit)")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(log_level) = args.verbose.log_level() {
        init_logging(log_level);
    }
    log::debug!("seed: {:?}", args.seed);

    let ansi = !args.no_color;
    let mut session = GameSession::start(args.seed, Utc::now()).context("could not set up board")?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{HELP}")?;
    draw(&session, ansi, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("could not read input")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };

        let now = Utc::now();
        let moved = match command {
            Command::Click(coords) => session.click(coords, now),
            Command::Flag(coords) => session.flag(coords, now),
            Command::Open(coords) => session.open(coords, now),
            Command::Restart => {
                // a forced seed only applies to the first board
                session.restart(None, now).context("could not set up board")?;
                Ok(true)
            }
            Command::Redraw => Ok(true),
            Command::Help => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        };

        match moved {
            Ok(true) => draw(&session, ansi, &mut stdout)?,
            Ok(false) => log::debug!("Ignored {command:?}"),
            Err(err) => writeln!(stdout, "{err}")?,
        }
    }

    Ok(())
}
