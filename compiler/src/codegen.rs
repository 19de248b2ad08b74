// codegen.rs: Brainfuck instruction encoding
//
// Turns one resolved (cell, delta) pair into the pointer movement and cell
// adjustment instructions that realize it, choosing between a direct unary
// run and a counted multiply loop for large adjustments.
//
// Preconditions: `tape` mirrors the real tape at the fragment's start.
// Postconditions: the fragment leaves the real pointer on `cell` with the
//                 adjusted value printed, and `tape` is updated to match.
// Failure modes: no zero-valued scratch cell left of the target when loop
//                encoding is required.
// Side effects: mutates `tape` (cell value and pointer).

use std::fmt;

use crate::tape::TapeState;

// ── Instruction alphabet ────────────────────────────────────────────────────

pub const MOVE_RIGHT: char = '>';
pub const MOVE_LEFT: char = '<';
pub const INC: char = '+';
pub const DEC: char = '-';
pub const LOOP_OPEN: char = '[';
pub const LOOP_CLOSE: char = ']';
pub const OUTPUT: char = '.';
/// Part of the target alphabet; this generator never emits it.
pub const INPUT: char = ',';

/// The full 8-symbol target alphabet.
pub const ALPHABET: &str = "><+-[].,";

// ── Configuration ───────────────────────────────────────────────────────────

/// Tuning knobs for adjustment encoding, shared by everything that reasons
/// about adjustment cost so the unary/loop switchover lives in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Largest magnitude still emitted as a plain unary run.
    pub max_unary: i32,
    /// Loop counter seed for multiply encoding; the loop body applies
    /// `magnitude / loop_step` symbols per iteration.
    pub loop_step: i32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            max_unary: 8,
            loop_step: 4,
        }
    }
}

// ── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// The leftward scan found no zero-valued cell to host a loop counter.
    NoScratchCell { cell: usize },
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::NoScratchCell { cell } => {
                write!(f, "no zero scratch cell left of cell {}", cell)
            }
        }
    }
}

impl std::error::Error for CodegenError {}

// ── Encoding ────────────────────────────────────────────────────────────────

/// Minimal run of single-step moves from the tape's pointer to `target`.
/// Updates `tape.pointer`.
pub fn move_to(tape: &mut TapeState, target: usize) -> String {
    let code = if target >= tape.pointer {
        repeat(MOVE_RIGHT, target - tape.pointer)
    } else {
        repeat(MOVE_LEFT, tape.pointer - target)
    };
    tape.pointer = target;
    code
}

/// Encode one adjust-and-print step: move to `cell`, apply `delta`, print.
pub fn encode(
    cell: usize,
    delta: i32,
    tape: &mut TapeState,
    config: &EncoderConfig,
) -> Result<String, CodegenError> {
    debug_assert!(config.loop_step > 0, "loop_step must be positive");

    let mut out = move_to(tape, cell);
    let op = if delta >= 0 { INC } else { DEC };
    let magnitude = delta.abs();

    if magnitude <= config.max_unary {
        out.push_str(&repeat(op, magnitude as usize));
    } else {
        let scratch = find_scratch(tape, cell).ok_or(CodegenError::NoScratchCell { cell })?;
        let hop = cell - scratch;
        // Counter setup on the scratch cell, then one loop iteration per
        // counter unit, each applying magnitude / loop_step symbols to the
        // target. The remainder lands after the loop. The scratch cell
        // drains back to zero, so the simulated tape needs no update for it.
        out.push_str(&repeat(MOVE_LEFT, hop));
        out.push_str(&repeat(INC, config.loop_step as usize));
        out.push(LOOP_OPEN);
        out.push_str(&repeat(MOVE_RIGHT, hop));
        out.push_str(&repeat(op, (magnitude / config.loop_step) as usize));
        out.push_str(&repeat(MOVE_LEFT, hop));
        out.push(DEC);
        out.push(LOOP_CLOSE);
        out.push_str(&repeat(MOVE_RIGHT, hop));
        out.push_str(&repeat(op, (magnitude % config.loop_step) as usize));
    }

    tape.cells[cell] += delta;
    out.push(OUTPUT);
    Ok(out)
}

/// Nearest zero-valued cell strictly left of `cell`, bounded at cell 0.
/// The target cell itself is excluded: it is about to receive the printed
/// value and cannot host the counter.
fn find_scratch(tape: &TapeState, cell: usize) -> Option<usize> {
    (0..cell).rev().find(|&i| tape.cells[i] == 0)
}

fn repeat(symbol: char, count: usize) -> String {
    std::iter::repeat(symbol).take(count).collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────
