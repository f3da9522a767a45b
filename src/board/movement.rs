// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use thiserror::Error;

use super::piece::{PieceId, PieceKind};
use super::player::Players;
use super::position::Position;
use super::Board;

#[derive(Error, Debug)]
pub enum MoveError {
    #[error("not a legal move")]
    InvalidMove,
    #[error("it's not this player's turn")]
    NotYourTurn,
    #[error("movement entry changes nothing")]
    EmptyStep,
    #[error("cannot rewind {0} movements, only {1} were made")]
    BadCount(usize, usize),
    #[error("no moves available")]
    NoMoves,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Basic,
    Castling,
    EnPassant,
    Promotion,
}

/// One atomic entry of a movement: `from = None` is an addition,
/// `to = None` a removal, both set a relocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    piece: PieceId,
    from: Option<Position>,
    to: Option<Position>,
}

impl Step {
    pub fn new(
        piece: PieceId,
        from: Option<Position>,
        to: Option<Position>,
    ) -> Result<Self, MoveError> {
        if from.is_none() && to.is_none() {
            return Err(MoveError::EmptyStep);
        }
        Ok(Self { piece, from, to })
    }

    fn relocation(piece: PieceId, from: Position, to: Position) -> Self {
        Self {
            piece,
            from: Some(from),
            to: Some(to),
        }
    }

    fn removal(piece: PieceId, from: Position) -> Self {
        Self {
            piece,
            from: Some(from),
            to: None,
        }
    }

    fn addition(piece: PieceId, to: Position) -> Self {
        Self {
            piece,
            from: None,
            to: Some(to),
        }
    }

    #[inline]
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    #[inline]
    pub fn from(&self) -> Option<&Position> {
        self.from.as_ref()
    }

    #[inline]
    pub fn to(&self) -> Option<&Position> {
        self.to.as_ref()
    }

    pub fn is_addition(&self) -> bool {
        self.from.is_none()
    }

    pub fn is_removal(&self) -> bool {
        self.to.is_none()
    }

    pub fn is_relocation(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    fn swapped(&self) -> Self {
        Self {
            piece: self.piece,
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

/// A single-turn transaction over one or more pieces.
///
/// Composite kinds model the special moves: castling is two
/// simultaneous relocations, en passant a removal plus a relocation,
/// promotion an optional capture-removal, the pawn's removal, and the
/// addition of a new piece. Equality compares the acting piece, the
/// ordered entries and the promoted kind; the kind tag is bookkeeping.
#[derive(Debug, Clone)]
pub struct Movement {
    kind: MoveKind,
    steps: Vec<Step>,
    piece: PieceId,
    destination: Position,
    /// The replacement kind of a promotion. The piece itself is
    /// spawned on first application, so candidate movements that are
    /// generated and discarded never touch the arena.
    promotes_to: Option<PieceKind>,
    /// Set on inverses: applying one decrements every relocated
    /// piece's counter by 2, cancelling both the original increment
    /// and the inverse's own.
    compensating: bool,
}

impl Movement {
    /// Relocation to `dest`, preceded by a capture when an enemy
    /// stands there.
    pub fn basic(board: &Board, players: &Players, piece: PieceId, dest: Position) -> Self {
        let mut steps = Vec::with_capacity(2);
        if let Some(target) = board.occupant_unchecked(&dest) {
            if players.can_capture(board.piece(piece).player(), board.piece(target).player()) {
                steps.push(Step::removal(target, dest.clone()));
            }
        }
        steps.push(Step::relocation(
            piece,
            board.piece(piece).position().clone(),
            dest.clone(),
        ));
        Self {
            kind: MoveKind::Basic,
            steps,
            piece,
            destination: dest,
            promotes_to: None,
            compensating: false,
        }
    }

    /// Two simultaneous relocations along the shared axis. The king
    /// steps two squares toward its partner and the partner lands on
    /// the square the king crossed, which generalizes the classical
    /// destinations to any board size.
    pub fn castling(board: &Board, king: PieceId, partner: PieceId) -> Result<Self, MoveError> {
        let king_pos = board.piece(king).position().clone();
        let partner_pos = board.piece(partner).position().clone();
        let diff = &partner_pos - &king_pos;
        let span = diff.coords().iter().map(|c| c.abs()).max().unwrap_or(0);
        let aligned_axes = diff.coords().iter().filter(|&&c| c != 0).count();
        if aligned_axes != 1 || span < 3 {
            return Err(MoveError::InvalidMove);
        }
        let unit = diff.signum();
        let king_dest = &king_pos + &(&unit * 2);
        let partner_dest = &king_dest - &unit;
        Ok(Self {
            kind: MoveKind::Castling,
            steps: vec![
                Step::relocation(king, king_pos, king_dest.clone()),
                Step::relocation(partner, partner_pos, partner_dest),
            ],
            piece: king,
            destination: king_dest,
            promotes_to: None,
            compensating: false,
        })
    }

    /// Victim removal followed by the capturing pawn's relocation.
    pub fn en_passant(board: &Board, pawn: PieceId, dest: Position, victim: PieceId) -> Self {
        Self {
            kind: MoveKind::EnPassant,
            steps: vec![
                Step::removal(victim, board.piece(victim).position().clone()),
                Step::relocation(pawn, board.piece(pawn).position().clone(), dest.clone()),
            ],
            piece: pawn,
            destination: dest,
            promotes_to: None,
            compensating: false,
        }
    }

    /// Optional capture-removal followed by the pawn's removal; the
    /// replacement piece is spawned on first application and inherits
    /// the pawn's move count plus one.
    pub fn promotion(
        board: &Board,
        players: &Players,
        pawn: PieceId,
        dest: Position,
        kind: PieceKind,
    ) -> Self {
        let player = board.piece(pawn).player();
        let mut steps = Vec::with_capacity(3);
        if let Some(target) = board.occupant_unchecked(&dest) {
            if players.can_capture(player, board.piece(target).player()) {
                steps.push(Step::removal(target, dest.clone()));
            }
        }
        steps.push(Step::removal(pawn, board.piece(pawn).position().clone()));
        Self {
            kind: MoveKind::Promotion,
            steps,
            piece: pawn,
            destination: dest,
            promotes_to: Some(kind),
            compensating: false,
        }
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The acting piece: the one the mover picked up.
    #[inline]
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    #[inline]
    pub fn destination(&self) -> &Position {
        &self.destination
    }

    /// Apply every entry in order. Additions place the piece on its
    /// recorded destination, removals deregister, relocations move and
    /// bump the counter.
    ///
    /// A promotion applied for the first time spawns its replacement
    /// piece here and records the addition, so the inverse knows which
    /// arena entry to take back off the board.
    pub fn apply(&mut self, board: &mut Board) {
        if let Some(kind) = self.promotes_to {
            if !self.steps.iter().any(Step::is_addition) {
                let player = board.piece(self.piece).player();
                let count = board.piece(self.piece).moves_made() + 1;
                let promoted = board.spawn(kind, player, self.destination.clone());
                board.piece_mut(promoted).moves_made = count;
                self.steps.push(Step::addition(promoted, self.destination.clone()));
            }
        }
        for step in &self.steps {
            match (&step.from, &step.to) {
                (None, Some(to)) => {
                    board.piece_mut(step.piece).position = to.clone();
                    board.place(step.piece);
                }
                (Some(_), None) => board.withdraw(step.piece),
                (Some(_), Some(to)) => {
                    board.relocate(step.piece, to.clone());
                    if self.compensating {
                        let piece = board.piece_mut(step.piece);
                        piece.moves_made = piece
                            .moves_made
                            .checked_sub(2)
                            .expect("inverse applied to a piece that never moved");
                    }
                }
                (None, None) => unreachable!("empty step"),
            }
        }
    }

    /// The exact inverse: entries reversed with from/to swapped, and
    /// compensation enabled so apply-then-undo leaves every touched
    /// move counter unchanged.
    pub fn inverse(&self) -> Self {
        let steps: Vec<Step> = self.steps.iter().rev().map(Step::swapped).collect();
        let destination = self
            .steps
            .iter()
            .find(|step| step.piece == self.piece)
            .and_then(|step| step.from.clone())
            .unwrap_or_else(|| self.destination.clone());
        Self {
            kind: self.kind,
            steps,
            piece: self.piece,
            destination,
            promotes_to: self.promotes_to,
            compensating: !self.compensating,
        }
    }

    /// Does any entry capture a piece the mover may capture?
    pub fn is_capture(&self, board: &Board, players: &Players) -> bool {
        !self.captured_pieces(board, players).is_empty()
    }

    pub fn captured_pieces(&self, board: &Board, players: &Players) -> Vec<PieceId> {
        let mover = board.piece(self.piece).player();
        self.steps
            .iter()
            .filter(|step| step.is_removal())
            .filter(|step| players.can_capture(mover, board.piece(step.piece).player()))
            .map(|step| step.piece)
            .collect()
    }

    /// The kind a promotion turns its pawn into, if this is one.
    #[inline]
    pub fn promotes_to(&self) -> Option<PieceKind> {
        self.promotes_to
    }

    /// The piece added by a promotion. `None` until the movement has
    /// been applied, since the replacement spawns lazily.
    pub fn promoted_piece(&self) -> Option<PieceId> {
        match self.kind {
            MoveKind::Promotion => self.steps.iter().find(|s| s.is_addition()).map(|s| s.piece),
            _ => None,
        }
    }

    /// Equality up to application state. An applied promotion carries
    /// the addition of its spawned piece while a fresh candidate does
    /// not, so move input matches on the acting piece, the promoted
    /// kind and the non-addition entries.
    pub fn same_effect(&self, other: &Movement) -> bool {
        if self.piece != other.piece || self.promotes_to != other.promotes_to {
            return false;
        }
        self.steps
            .iter()
            .filter(|step| !step.is_addition())
            .eq(other.steps.iter().filter(|step| !step.is_addition()))
    }

    /// Human-readable form, e.g. `"e2 -> e4"` or `"[e1 -> g1, h1 -> f1]"`.
    pub fn describe(&self, board: &Board) -> String {
        let one = |step: &Step| -> String {
            let kind = board.piece(step.piece).kind();
            match (&step.from, &step.to) {
                (None, Some(to)) => format!("+{kind} {to}"),
                (Some(from), None) => format!("-{kind} {from}"),
                (Some(from), Some(to)) => format!("{from} -> {to}"),
                (None, None) => unreachable!(),
            }
        };
        if self.steps.len() == 1 {
            return one(&self.steps[0]);
        }
        let parts: Vec<String> = self.steps.iter().map(one).collect();
        format!("[{}]", parts.join(", "))
    }
}

impl PartialEq for Movement {
    fn eq(&self, other: &Self) -> bool {
        self.piece == other.piece
            && self.steps == other.steps
            && self.promotes_to == other.promotes_to
    }
}

impl Eq for Movement {}

impl Hash for Movement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.piece.hash(state);
        self.steps.hash(state);
        self.promotes_to.hash(state);
    }
}
