//! Terminal front end
//!
//! Plays the same controller, bot and trainer as the window, reading moves
//! from stdin and printing an ASCII board. Lines starting with `:` are
//! commands:
//!
//! | Command         | Effect                               |
//! |-----------------|--------------------------------------|
//! | `:undo`         | take back one turn                   |
//! | `:flip`         | swap the board orientation           |
//! | `:restart`      | start over (trainer: reshuffle)      |
//! | `:hint`         | ask the bot for the best move        |
//! | `:retry`        | ask the bot again after a failure    |
//! | `:depth N`      | set the bot search depth             |
//! | `:skip`         | trainer: show the answer             |
//! | `:opening NAME` | trainer: drill another opening       |
//! | `:moves`        | list legal moves                     |
//! | `:quit`         | leave                                |

use crate::core::{BoardSettings, ModeSetup};
use crate::game::{
    resolve_with, BoardController, GameError, OpponentMoveProvider, OpponentOutcome,
    OpponentRequest, TrainerError, TrainingSession, FEEDBACK_DELAY,
};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// ASCII diagram of the board as it is oriented on screen
pub fn render_ascii(controller: &BoardController) -> String {
    let orientation = controller.orientation();
    let board = controller.board();
    let mut out = String::with_capacity(11 * 10);

    for row in 0..8 {
        let rank = orientation.square_at(0, row).rank();
        out.push(rank.char());
        out.push(' ');
        for col in 0..8 {
            let square = orientation.square_at(col, row);
            out.push(board.piece_at(square).map_or('.', |piece| piece.char()));
        }
        out.push('\n');
    }
    out.push_str("  ");
    for col in 0..8 {
        out.push(orientation.square_at(col, 7).file().char());
    }
    out.push('\n');
    out
}

enum Table {
    Board {
        controller: BoardController,
        provider: Option<Box<dyn OpponentMoveProvider>>,
    },
    Trainer(TrainingSession),
}

/// Line-oriented game loop
pub struct Terminal {
    table: Table,
    feedback_pause: Duration,
}

impl Terminal {
    pub fn from_setup(setup: ModeSetup) -> Self {
        let table = match setup {
            ModeSetup::Viewer(controller) => Table::Board {
                controller,
                provider: None,
            },
            ModeSetup::Bot { controller, client } => Table::Board {
                controller,
                provider: Some(Box::new(client)),
            },
            ModeSetup::Trainer(session) => Table::Trainer(session),
        };
        Self {
            table,
            feedback_pause: FEEDBACK_DELAY,
        }
    }

    /// Board against `provider`
    pub fn with_provider(
        controller: BoardController,
        provider: Box<dyn OpponentMoveProvider>,
    ) -> Self {
        Self {
            table: Table::Board {
                controller,
                provider: Some(provider),
            },
            feedback_pause: FEEDBACK_DELAY,
        }
    }

    /// How long trainer feedback stays up before the next prompt
    pub fn with_feedback_pause(mut self, pause: Duration) -> Self {
        self.feedback_pause = pause;
        self
    }

    /// Board currently shown
    pub fn board(&self) -> &BoardController {
        match &self.table {
            Table::Board { controller, .. } => controller,
            Table::Trainer(session) => session.board(),
        }
    }

    /// Read lines from `input` until EOF or `:quit`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        if let Table::Board {
            controller,
            provider: Some(provider),
        } = &mut self.table
        {
            if let Some(request) = controller.restart() {
                answer(controller, provider.as_ref(), &request, out)?;
            }
        }
        self.show(out)?;

        for line in input.lines() {
            let line = line.context("reading input")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !self.handle_line(line, out)? {
                break;
            }
            self.show(out)?;
        }
        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}", render_ascii(self.board()))?;
        match &self.table {
            Table::Board { controller, .. } => writeln!(out, "{}", controller.prompt())?,
            Table::Trainer(session) => {
                let (current, total) = session.progress();
                writeln!(
                    out,
                    "{} {}/{}  score {}",
                    session.opening(),
                    current,
                    total,
                    session.score()
                )?;
            }
        }
        Ok(())
    }

    /// Returns `false` when the loop should stop
    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        let (command, argument) = match line.strip_prefix(':') {
            Some(rest) => {
                let mut parts = rest.splitn(2, ' ');
                (
                    parts.next().unwrap_or_default(),
                    parts.next().map(str::trim).unwrap_or_default(),
                )
            }
            None => ("", line),
        };
        if command == "quit" {
            return Ok(false);
        }
        if command == "moves" {
            writeln!(out, "{}", self.board().legal_moves_san().join(" "))?;
            return Ok(true);
        }

        let pause = self.feedback_pause;
        match &mut self.table {
            Table::Board {
                controller,
                provider,
            } => board_command(controller, provider.as_deref(), command, argument, out)?,
            Table::Trainer(session) => {
                trainer_command(session, command, argument, pause, out)?
            }
        }
        Ok(true)
    }
}

fn board_command<W: Write>(
    controller: &mut BoardController,
    provider: Option<&dyn OpponentMoveProvider>,
    command: &str,
    argument: &str,
    out: &mut W,
) -> Result<()> {
    let request = match command {
        "" => match controller.submit_move(argument) {
            Ok(outcome) => outcome.request,
            Err(e) => {
                writeln!(out, "{e}")?;
                None
            }
        },
        "undo" => {
            match controller.take_back() {
                Ok(true) if controller.awaits_opponent() => {
                    writeln!(out, "Bot to move, :retry to ask it")?
                }
                Ok(true) => {}
                Ok(false) => writeln!(out, "Nothing to take back")?,
                Err(e) => writeln!(out, "{e}")?,
            }
            None
        }
        "flip" => {
            controller.flip();
            None
        }
        "restart" => controller.restart(),
        "hint" => report(controller.request_hint(), out)?,
        "retry" => report(controller.retry_opponent(), out)?,
        "depth" => {
            match argument.parse::<i64>() {
                Ok(value) => writeln!(out, "Depth {}", controller.set_depth(value))?,
                Err(_) => writeln!(out, "'{argument}' is not a number")?,
            }
            None
        }
        other => {
            writeln!(out, "Unknown command :{other}")?;
            None
        }
    };

    if let (Some(request), Some(provider)) = (request, provider) {
        answer(controller, provider, &request, out)?;
    }
    Ok(())
}

fn report<W: Write>(
    result: Result<OpponentRequest, GameError>,
    out: &mut W,
) -> Result<Option<OpponentRequest>> {
    match result {
        Ok(request) => Ok(Some(request)),
        Err(e) => {
            writeln!(out, "{e}")?;
            Ok(None)
        }
    }
}

/// Ask the bot synchronously and print what it did
fn answer<W: Write>(
    controller: &mut BoardController,
    provider: &dyn OpponentMoveProvider,
    request: &OpponentRequest,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", controller.prompt())?;
    match resolve_with(controller, provider, request) {
        Ok(OpponentOutcome::Replied(applied)) => writeln!(out, "Bot plays {}", applied.san)?,
        Ok(OpponentOutcome::Hinted(hint)) => {
            writeln!(out, "Best move: {} -> {}", hint.from, hint.to)?
        }
        Err(e) => writeln!(out, "{e} (:retry to ask again)")?,
    }
    Ok(())
}

fn trainer_command<W: Write>(
    session: &mut TrainingSession,
    command: &str,
    argument: &str,
    pause: Duration,
    out: &mut W,
) -> Result<()> {
    let feedback = match command {
        "" => session.attempt(argument),
        "skip" => session.skip(),
        "restart" => {
            let opening = session.opening().to_string();
            session.select_opening(&opening, &mut rand::rng())?;
            return Ok(());
        }
        "opening" => {
            match session.select_opening(argument, &mut rand::rng()) {
                Ok(()) => {}
                Err(e) => writeln!(out, "{e}")?,
            }
            return Ok(());
        }
        "flip" => {
            session.flip();
            return Ok(());
        }
        other => {
            writeln!(out, "Unknown command :{other}")?;
            return Ok(());
        }
    };

    match feedback {
        Ok(feedback) => {
            write!(out, "{}", render_ascii(session.board()))?;
            writeln!(out, "{:?}: {}", feedback.verdict, feedback.applied.san)?;
            thread::sleep(pause);
            if let Some(step) = session.advance(FEEDBACK_DELAY) {
                debug!("[TRAINER] {:?}", step);
            }
        }
        Err(TrainerError::Completed) => {
            writeln!(out, "Opening complete, :restart or :opening NAME")?
        }
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

/// Play in the terminal with stdin/stdout
pub fn run(settings: &BoardSettings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let setup = ModeSetup::from_settings(settings).context("setting up the board")?;
    info!("[BOARD] Headless {:?} mode", setup.mode());

    let mut terminal = Terminal::from_setup(setup);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    terminal.run(stdin.lock(), &mut stdout)
}
