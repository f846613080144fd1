//! Protocol module - line-delimited JSON messages for scripted sessions
//!
//! Every message is one JSON object on its own line with a `type` field.
//! Inbound messages may carry a `seq`; outbound messages always carry the
//! session's own monotonic `seq`, and replies echo the command's as `command_seq`.

use serde::{Deserialize, Serialize};

use crate::engine::{
    CommitReport, GameSnapshot, PendingSwap, SelectOutcome, SwapResolution,
};
use crate::types::{Coord, Cue};

pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Client -> Session Messages ==============

/// A cell reference on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub x: u8,
    pub y: u8,
}

impl From<Coord> for CellRef {
    fn from(at: Coord) -> Self {
        Self { x: at.x, y: at.y }
    }
}

impl From<CellRef> for Coord {
    fn from(cell: CellRef) -> Self {
        Coord::new(cell.x, cell.y)
    }
}

/// Parsed inbound command
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Click a cell
    Select {
        #[serde(default)]
        seq: u64,
        x: u8,
        y: u8,
    },
    /// Ask whether a match runs through a cell, without touching the board
    Probe {
        #[serde(default)]
        seq: u64,
        x: u8,
        y: u8,
    },
    /// Request the current state
    Snapshot {
        #[serde(default)]
        seq: u64,
    },
    /// Pause the script
    Wait {
        #[serde(default)]
        seq: u64,
        ms: u32,
    },
}

impl Command {
    pub fn seq(&self) -> u64 {
        match self {
            Command::Select { seq, .. }
            | Command::Probe { seq, .. }
            | Command::Snapshot { seq }
            | Command::Wait { seq, .. } => *seq,
        }
    }
}

/// Result of parsing one inbound line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Command(Command),
    /// Well-formed JSON with a `type` this protocol does not know
    Unknown { seq: u64, msg_type: String },
}

/// Parse a JSON command from a string
pub fn parse_command(json: &str) -> Result<ParsedCommand, serde_json::Error> {
    match serde_json::from_str::<Command>(json) {
        Ok(command) => Ok(ParsedCommand::Command(command)),
        Err(e) => {
            // Unknown message type is not a hard parse error for the protocol.
            #[derive(Debug, Deserialize)]
            struct TypeAndSeq {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let probe = serde_json::from_str::<TypeAndSeq>(json)?;
            let msg_type = probe.msg_type.unwrap_or_else(|| "unknown".to_string());
            if !matches!(msg_type.as_str(), "select" | "probe" | "snapshot" | "wait") {
                return Ok(ParsedCommand::Unknown {
                    seq: probe.seq.unwrap_or(0),
                    msg_type,
                });
            }
            Err(e)
        }
    }
}

// ============== Session -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Line is not a valid command
    InvalidCommand,
    /// Command type is not part of the protocol
    UnknownType,
}

/// Wire form of a provisional swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingWire {
    pub token: u32,
    pub first: CellRef,
    pub second: CellRef,
    pub wait_ms: u32,
    pub will_commit: bool,
}

impl From<PendingSwap> for PendingWire {
    fn from(p: PendingSwap) -> Self {
        Self {
            token: p.token.id(),
            first: p.first.into(),
            second: p.second.into(),
            wait_ms: p.wait_ms,
            will_commit: p.will_commit,
        }
    }
}

/// Kind of select outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Ignored,
    Selected,
    Deselected,
    Reselected,
    SameKindRejected,
    SwapPending,
    Committed,
}

/// Kind of swap resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    Committed,
    Reverted,
    Stale,
}

/// Body of an `outcome` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeBody {
    pub outcome: OutcomeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<CellRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<CellRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingWire>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cleared: Vec<CellRef>,
}

impl OutcomeBody {
    fn new(outcome: OutcomeKind) -> Self {
        Self {
            outcome,
            reason: None,
            at: None,
            from: None,
            pending: None,
            cleared: Vec::new(),
        }
    }
}

fn cleared_cells(report: &CommitReport) -> Vec<CellRef> {
    report.cleared.iter().copied().map(CellRef::from).collect()
}

impl From<&SelectOutcome> for OutcomeBody {
    fn from(outcome: &SelectOutcome) -> Self {
        match outcome {
            SelectOutcome::Ignored(reason) => OutcomeBody {
                reason: Some(reason.as_str().to_string()),
                ..OutcomeBody::new(OutcomeKind::Ignored)
            },
            SelectOutcome::Selected(at) => OutcomeBody {
                at: Some((*at).into()),
                ..OutcomeBody::new(OutcomeKind::Selected)
            },
            SelectOutcome::Deselected(at) => OutcomeBody {
                at: Some((*at).into()),
                ..OutcomeBody::new(OutcomeKind::Deselected)
            },
            SelectOutcome::Reselected { from, to } => OutcomeBody {
                at: Some((*to).into()),
                from: Some((*from).into()),
                ..OutcomeBody::new(OutcomeKind::Reselected)
            },
            SelectOutcome::SameKindRejected { from, to } => OutcomeBody {
                at: Some((*to).into()),
                from: Some((*from).into()),
                ..OutcomeBody::new(OutcomeKind::SameKindRejected)
            },
            SelectOutcome::SwapPending(pending) => OutcomeBody {
                at: Some(pending.second.into()),
                from: Some(pending.first.into()),
                pending: Some((*pending).into()),
                ..OutcomeBody::new(OutcomeKind::SwapPending)
            },
            SelectOutcome::Committed(report) => OutcomeBody {
                at: Some(report.second.into()),
                from: Some(report.first.into()),
                cleared: cleared_cells(report),
                ..OutcomeBody::new(OutcomeKind::Committed)
            },
        }
    }
}

/// Body of a `snapshot` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotBody {
    pub width: u8,
    pub height: u8,
    pub board: Vec<Vec<u8>>,
    pub selected: Option<CellRef>,
    pub pending: Option<PendingWire>,
    pub moves_left: u32,
    pub moves_budget: u32,
    pub shifting: bool,
    pub game_over: bool,
    pub seed: u32,
}

impl From<&GameSnapshot> for SnapshotBody {
    fn from(s: &GameSnapshot) -> Self {
        Self {
            width: s.width,
            height: s.height,
            board: s.board.clone(),
            selected: s.selected.map(CellRef::from),
            pending: s.pending.map(PendingWire::from),
            moves_left: s.moves_left,
            moves_budget: s.moves_budget,
            shifting: s.shifting,
            game_over: s.game_over,
            seed: s.seed,
        }
    }
}

/// Outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    Welcome {
        seq: u64,
        protocol_version: String,
        game_id: String,
        rules: String,
        row_size: usize,
        swap_delay_ms: u32,
        width: u8,
        height: u8,
        moves: u32,
    },
    Outcome {
        seq: u64,
        command_seq: u64,
        #[serde(flatten)]
        body: OutcomeBody,
    },
    Resolved {
        seq: u64,
        command_seq: u64,
        token: u32,
        result: ResolutionKind,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        cleared: Vec<CellRef>,
    },
    Refill {
        seq: u64,
        command_seq: u64,
        ticks: u32,
        cascades: u32,
        cascade_cleared: usize,
    },
    Probe {
        seq: u64,
        command_seq: u64,
        at: CellRef,
        matched: bool,
    },
    Cue {
        seq: u64,
        cue: String,
    },
    Snapshot {
        seq: u64,
        command_seq: u64,
        #[serde(flatten)]
        body: SnapshotBody,
    },
    Error {
        seq: u64,
        command_seq: u64,
        code: ErrorCode,
        message: String,
    },
    Bye {
        seq: u64,
        commands: u64,
        errors: u64,
        moves_left: u32,
        game_over: bool,
    },
}

impl Outbound {
    pub fn seq(&self) -> u64 {
        match self {
            Outbound::Welcome { seq, .. }
            | Outbound::Outcome { seq, .. }
            | Outbound::Resolved { seq, .. }
            | Outbound::Refill { seq, .. }
            | Outbound::Probe { seq, .. }
            | Outbound::Cue { seq, .. }
            | Outbound::Snapshot { seq, .. }
            | Outbound::Error { seq, .. }
            | Outbound::Bye { seq, .. } => *seq,
        }
    }

    /// Serialize as one protocol line (without the trailing newline)
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Create a resolution message
pub fn create_resolved(
    seq: u64,
    command_seq: u64,
    token: u32,
    resolution: &SwapResolution,
) -> Outbound {
    let (result, cleared) = match resolution {
        SwapResolution::Committed(report) => (ResolutionKind::Committed, cleared_cells(report)),
        SwapResolution::Reverted { .. } => (ResolutionKind::Reverted, Vec::new()),
        SwapResolution::Stale => (ResolutionKind::Stale, Vec::new()),
    };
    Outbound::Resolved {
        seq,
        command_seq,
        token,
        result,
        cleared,
    }
}

/// Create a cue message
pub fn create_cue(seq: u64, cue: Cue) -> Outbound {
    Outbound::Cue {
        seq,
        cue: cue.as_str().to_string(),
    }
}

/// Create an error message
pub fn create_error(seq: u64, command_seq: u64, code: ErrorCode, message: &str) -> Outbound {
    Outbound::Error {
        seq,
        command_seq,
        code,
        message: message.to_string(),
    }
}
