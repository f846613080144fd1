//! Session runner - the caller-side scheduler around a [`Game`]
//!
//! Reads one command per line, applies it, and writes the replies as JSON lines.
//! All game mutations happen on the task running [`Session::run`], one command at
//! a time. The runner is also where time passes: a provisional swap is resolved
//! after its wait, and a refill sweep is stepped on a fixed cadence until the
//! board settles.

use std::time::Duration;

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::MissedTickBehavior;

use crate::config::SessionConfig;
use crate::engine::{Game, RefillTick, SelectOutcome};
use crate::protocol::{
    create_cue, create_error, create_resolved, parse_command, Command, ErrorCode, OutcomeBody,
    Outbound, ParsedCommand, SnapshotBody, PROTOCOL_VERSION,
};
use crate::types::Coord;

/// Totals reported when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub commands: u64,
    pub errors: u64,
    pub moves_left: u32,
    pub game_over: bool,
}

/// One scripted game
#[derive(Debug)]
pub struct Session {
    game: Game,
    config: SessionConfig,
    /// Next outbound sequence number
    seq: u64,
    commands: u64,
    errors: u64,
}

impl Session {
    /// Deal a new game from the config
    pub fn new(config: SessionConfig) -> Result<Self> {
        let game = Game::new(config.game, config.seed)
            .map_err(|e| anyhow!("session: cannot deal board: {}", e))?;
        Ok(Self::with_game(game, config))
    }

    /// Run a session over an existing game
    pub fn with_game(game: Game, config: SessionConfig) -> Self {
        Self {
            game,
            config,
            seq: 0,
            commands: 0,
            errors: 0,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Process every line of `reader`, writing replies to `writer`
    pub async fn run<R, W>(&mut self, reader: R, writer: &mut W) -> Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let welcome = self.welcome();
        write_message(writer, &welcome).await?;

        let mut lines = reader.lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| anyhow!("session: read failed: {}", e))?
        {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            for msg in self.handle_line(line).await {
                write_message(writer, &msg).await?;
            }
        }

        let summary = self.summary();
        let bye = Outbound::Bye {
            seq: self.next_seq(),
            commands: summary.commands,
            errors: summary.errors,
            moves_left: summary.moves_left,
            game_over: summary.game_over,
        };
        write_message(writer, &bye).await?;
        writer
            .flush()
            .await
            .map_err(|e| anyhow!("session: flush failed: {}", e))?;

        info!(
            target: "session",
            "session finished: {} commands, {} errors, {} moves left",
            summary.commands, summary.errors, summary.moves_left
        );
        Ok(summary)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            commands: self.commands,
            errors: self.errors,
            moves_left: self.game.moves_left(),
            game_over: self.game.is_over(),
        }
    }

    fn welcome(&mut self) -> Outbound {
        let rules = self.game.config().rules;
        let board = self.game.board();
        let (width, height) = (board.width(), board.height());
        Outbound::Welcome {
            seq: self.next_seq(),
            protocol_version: PROTOCOL_VERSION.to_string(),
            game_id: "match3".to_string(),
            rules: rules.swap_rule.as_str().to_string(),
            row_size: rules.row_size,
            swap_delay_ms: rules.swap_delay_ms,
            width,
            height,
            moves: self.game.moves_left(),
        }
    }

    /// Apply one protocol line and collect the replies
    pub async fn handle_line(&mut self, line: &str) -> Vec<Outbound> {
        let mut out = Vec::new();
        match parse_command(line) {
            Ok(ParsedCommand::Command(command)) => {
                self.commands += 1;
                self.handle_command(command, &mut out).await;
            }
            Ok(ParsedCommand::Unknown { seq, msg_type }) => {
                self.errors += 1;
                warn!(target: "session", "unknown command type: {}", msg_type);
                let msg = format!("unknown command type: {}", msg_type);
                out.push(create_error(
                    self.next_seq(),
                    seq,
                    ErrorCode::UnknownType,
                    &msg,
                ));
            }
            Err(e) => {
                self.errors += 1;
                warn!(target: "session", "invalid command: {}", e);
                out.push(create_error(
                    self.next_seq(),
                    0,
                    ErrorCode::InvalidCommand,
                    &e.to_string(),
                ));
            }
        }
        out
    }

    async fn handle_command(&mut self, command: Command, out: &mut Vec<Outbound>) {
        let command_seq = command.seq();
        match command {
            Command::Select { x, y, .. } => {
                self.handle_select(Coord::new(x, y), command_seq, out).await;
                if self.config.echo_snapshots {
                    self.push_snapshot(command_seq, out);
                }
            }
            Command::Probe { x, y, .. } => {
                let at = Coord::new(x, y);
                let matched = self.game.find_any_matches(at);
                out.push(Outbound::Probe {
                    seq: self.next_seq(),
                    command_seq,
                    at: at.into(),
                    matched,
                });
            }
            Command::Snapshot { .. } => self.push_snapshot(command_seq, out),
            Command::Wait { ms, .. } => {
                tokio::time::sleep(Duration::from_millis(ms as u64)).await;
            }
        }
    }

    async fn handle_select(&mut self, at: Coord, command_seq: u64, out: &mut Vec<Outbound>) {
        let outcome = self.game.select(at);
        debug!(target: "session", "select {} -> {:?}", at, outcome);
        out.push(Outbound::Outcome {
            seq: self.next_seq(),
            command_seq,
            body: OutcomeBody::from(&outcome),
        });
        self.push_cues(out);

        if let SelectOutcome::SwapPending(pending) = outcome {
            tokio::time::sleep(Duration::from_millis(pending.wait_ms as u64)).await;
            let resolution = self.game.resolve_swap(pending.token);
            let seq = self.next_seq();
            out.push(create_resolved(
                seq,
                command_seq,
                pending.token.id(),
                &resolution,
            ));
            self.push_cues(out);
        }

        if self.game.is_shifting() {
            self.run_refill(command_seq, out).await;
        }
    }

    /// Step the refill sweep until the board settles
    async fn run_refill(&mut self, command_seq: u64, out: &mut Vec<Outbound>) {
        let mut ticks = 0u32;
        let mut cascades = 0u32;
        let mut cascade_cleared = 0usize;

        let mut ticker = (self.config.refill_step_ms > 0).then(|| {
            let mut ticker =
                tokio::time::interval(Duration::from_millis(self.config.refill_step_ms as u64));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        while self.game.is_shifting() {
            if let Some(ticker) = ticker.as_mut() {
                ticker.tick().await;
            }
            ticks += 1;
            if let RefillTick::Cascade { cleared } = self.game.advance_refill() {
                cascades += 1;
                cascade_cleared += cleared;
            }
        }

        out.push(Outbound::Refill {
            seq: self.next_seq(),
            command_seq,
            ticks,
            cascades,
            cascade_cleared,
        });
        self.push_cues(out);
    }

    fn push_cues(&mut self, out: &mut Vec<Outbound>) {
        for cue in self.game.drain_cues() {
            let seq = self.next_seq();
            out.push(create_cue(seq, cue));
        }
    }

    fn push_snapshot(&mut self, command_seq: u64, out: &mut Vec<Outbound>) {
        let snapshot = self.game.snapshot();
        out.push(Outbound::Snapshot {
            seq: self.next_seq(),
            command_seq,
            body: SnapshotBody::from(&snapshot),
        });
    }
}

async fn write_message<W>(writer: &mut W, msg: &Outbound) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = msg
        .to_line()
        .map_err(|e| anyhow!("session: encode failed: {}", e))?;
    line.push('\n');
    writer
        .write_all(line.as_bytes())
        .await
        .map_err(|e| anyhow!("session: write failed: {}", e))
}
