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

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumIter};

use super::player::PlayerId;
use super::position::Position;

/// Stable handle into the board's piece arena. A piece keeps its id
/// across capture and restoration, which is what makes movements
/// exactly reversible.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u32);

impl PieceId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    /// Placeholder used by hypothetical-occupancy attack queries. It
    /// never generates or matches a move; it only occupies a square.
    Sentinel,
}

use PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook, Sentinel};

impl PieceKind {
    /// Kinds that may take part in castling.
    pub fn is_castlable(&self) -> bool {
        matches!(*self, King | Rook)
    }

    /// Kinds that may promote on a terminal rank.
    pub fn is_promotable(&self) -> bool {
        matches!(*self, Pawn)
    }

    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }

    /// Upper-case letter code used by the position encoding.
    pub fn letter(&self) -> char {
        match self {
            Pawn => 'P',
            Knight => 'N',
            Bishop => 'B',
            Rook => 'R',
            Queen => 'Q',
            King => 'K',
            Sentinel => '?',
        }
    }

    /// Display glyph for a player slot; slot 0 gets the white set.
    pub fn glyph(&self, slot: usize) -> char {
        let pair = GLYPHS.get(self).copied().unwrap_or(['□', '□']);
        pair[usize::from(slot != 0)]
    }
}

static GLYPHS: Lazy<HashMap<PieceKind, [char; 2]>> = Lazy::new(|| {
    HashMap::from([
        (Pawn, ['♙', '♟']),
        (Knight, ['♘', '♞']),
        (Bishop, ['♗', '♝']),
        (Rook, ['♖', '♜']),
        (Queen, ['♕', '♛']),
        (King, ['♔', '♚']),
        (Sentinel, ['▣', '▣']),
    ])
});

/// A piece at rest: its kind, owner, square, and how many times it has
/// been relocated. The counter drives castling rights, pawn double
/// advances, and en-passant eligibility, so apply/undo must leave it
/// exactly balanced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub(crate) kind: PieceKind,
    pub(crate) player: PlayerId,
    pub(crate) position: Position,
    pub(crate) moves_made: u32,
    pub(crate) on_board: bool,
}

impl Piece {
    pub(crate) fn new(kind: PieceKind, player: PlayerId, position: Position) -> Self {
        Self {
            kind,
            player,
            position,
            moves_made: 0,
            on_board: false,
        }
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    #[inline]
    pub fn on_board(&self) -> bool {
        self.on_board
    }
}
