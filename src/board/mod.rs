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

//! Board state for a generalized, dimension-agnostic chess-like game.
//!
//! A _board_ is a sparse map from coordinates to pieces, sized by an
//! edge length and a dimension count chosen at construction. The
//! following features are supported:
//!
//! [x] Any square board edge length
//! [x] Any number of dimensions (classical chess is the 8×8 2-D case)
//! [x] Sparse storage: only occupied squares cost memory
//! [x] Player × piece-kind index kept in lock-step with the square map
//! [x] Exactly reversible movements (basic, castling, en passant,
//!     promotion), see [`Movement`]
//! [x] Attack queries via scoped hypothetical occupancy
//! [ ] Non-cubic extents (different length per axis)
//!
//! Some of the key abstractions include:
//!
//! * A [`Position`] is an integer coordinate vector with difference and
//!   straight-line path algebra. In two dimensions it converts to and
//!   from algebraic notation.
//!
//! * A [`Piece`] is owned by a [`PlayerId`] from a [`Players`] roster
//!   and lives in the board's arena under a stable [`PieceId`]. The
//!   arena entry outlives capture, which lets an inverse movement put
//!   the identical piece back.
//!
//! * A [`Movement`] is an ordered list of atomic entries (additions,
//!   removals, relocations) applied as one transaction, with an exact
//!   [`Movement::inverse`].
//!
//! * Move generation ([`pseudo_moves`], [`candidates_for`]) is
//!   parameterized by a [`Rules`] value injected at construction time
//!   rather than baked into piece types, so one piece set serves any
//!   game mode.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

mod movegen;
mod movement;
mod piece;
mod player;
mod position;

pub use movegen::*;
pub use movement::*;
pub use piece::*;
pub use player::*;
pub use position::*;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),
}

/// Sparse piece storage plus the player × kind index.
///
/// Invariant: `squares` and `index` always agree; every mutation goes
/// through [`Board::place`], [`Board::withdraw`] or [`Board::relocate`],
/// which update both together.
#[derive(Debug, Clone)]
pub struct Board {
    size: i64,
    dims: usize,
    arena: Vec<Piece>,
    squares: HashMap<Position, PieceId>,
    index: HashMap<PlayerId, HashMap<PieceKind, Vec<PieceId>>>,
}

impl Board {
    pub fn new(size: i64, dims: usize) -> Self {
        Self {
            size,
            dims,
            arena: Vec::new(),
            squares: HashMap::new(),
            index: HashMap::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> i64 {
        self.size
    }

    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn is_inside(&self, pos: &Position) -> bool {
        pos.dims() == self.dims && pos.coords().iter().all(|&c| c >= 0 && c < self.size)
    }

    pub fn is_outside(&self, pos: &Position) -> bool {
        !self.is_inside(pos)
    }

    /// Create an arena entry for a new piece without putting it on the
    /// board. Promotion movements spawn their replacement piece this
    /// way when they are first applied.
    pub fn spawn(&mut self, kind: PieceKind, player: PlayerId, position: Position) -> PieceId {
        let id = PieceId::new(self.arena.len());
        self.arena.push(Piece::new(kind, player, position));
        id
    }

    /// Spawn a piece and immediately place it. Used for game setup.
    pub fn spawn_placed(
        &mut self,
        kind: PieceKind,
        player: PlayerId,
        position: Position,
    ) -> PieceId {
        let id = self.spawn(kind, player, position);
        self.place(id);
        id
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.arena[id.to_index()]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.arena[id.to_index()]
    }

    /// The piece occupying `pos`, or `BoardError::OutOfBounds` when the
    /// position is not on the board at all.
    pub fn occupant(&self, pos: &Position) -> Result<Option<PieceId>, BoardError> {
        if self.is_outside(pos) {
            return Err(BoardError::OutOfBounds(pos.clone()));
        }
        Ok(self.squares.get(pos).copied())
    }

    /// Occupant lookup for positions already known to be inside.
    pub(crate) fn occupant_unchecked(&self, pos: &Position) -> Option<PieceId> {
        self.squares.get(pos).copied()
    }

    /// Register the piece on its current position.
    pub fn place(&mut self, id: PieceId) {
        let piece = &self.arena[id.to_index()];
        debug_assert!(!piece.on_board, "piece placed twice");
        debug_assert!(self.is_inside(&piece.position));
        let previous = self.squares.insert(piece.position.clone(), id);
        debug_assert!(previous.is_none(), "square already occupied");
        self.index
            .entry(piece.player)
            .or_default()
            .entry(piece.kind)
            .or_default()
            .push(id);
        self.arena[id.to_index()].on_board = true;
    }

    /// Remove the piece from the square map and the index. The arena
    /// entry survives so an inverse movement can restore it.
    pub fn withdraw(&mut self, id: PieceId) {
        let piece = &self.arena[id.to_index()];
        debug_assert!(piece.on_board, "piece withdrawn twice");
        let removed = self.squares.remove(&piece.position);
        debug_assert_eq!(removed, Some(id));
        let slot = self
            .index
            .get_mut(&piece.player)
            .and_then(|kinds| kinds.get_mut(&piece.kind))
            .expect("indexed piece missing from index");
        slot.retain(|&other| other != id);
        self.arena[id.to_index()].on_board = false;
    }

    /// Move a registered piece to a new square, incrementing its move
    /// counter exactly once.
    pub fn relocate(&mut self, id: PieceId, new_position: Position) {
        debug_assert!(self.is_inside(&new_position));
        let piece = &mut self.arena[id.to_index()];
        debug_assert!(piece.on_board, "relocating a withdrawn piece");
        let removed = self.squares.remove(&piece.position);
        debug_assert_eq!(removed, Some(id));
        piece.position = new_position.clone();
        piece.moves_made += 1;
        let previous = self.squares.insert(new_position, id);
        debug_assert!(previous.is_none(), "square already occupied");
    }

    /// The straight-line squares strictly between `a` and `b`.
    pub fn path_between(&self, a: &Position, b: &Position) -> Result<Vec<Position>, PathError> {
        let mut path = a.path_to(b)?;
        path.pop();
        Ok(path)
    }

    /// All of a player's pieces currently on the board.
    pub fn pieces_of(&self, player: PlayerId) -> impl Iterator<Item = PieceId> + '_ {
        self.index
            .get(&player)
            .into_iter()
            .flat_map(|kinds| kinds.values())
            .flatten()
            .copied()
    }

    pub fn pieces_of_kind(&self, player: PlayerId, kind: PieceKind) -> &[PieceId] {
        self.index
            .get(&player)
            .and_then(|kinds| kinds.get(&kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn king_of(&self, player: PlayerId) -> Option<PieceId> {
        self.pieces_of_kind(player, PieceKind::King).first().copied()
    }

    /// True when the destination holds a piece the mover may capture.
    pub fn can_capture(&self, players: &Players, id: PieceId, dest: &Position) -> bool {
        match self.occupant_unchecked(dest) {
            Some(target) => {
                players.can_capture(self.piece(id).player, self.piece(target).player)
            }
            None => false,
        }
    }

    /// True when the destination is empty or holds a capturable enemy.
    pub fn can_capture_or_move(&self, players: &Players, id: PieceId, dest: &Position) -> bool {
        match self.occupant_unchecked(dest) {
            Some(target) => {
                players.can_capture(self.piece(id).player, self.piece(target).player)
            }
            None => true,
        }
    }

    /// Run `f` with a sentinel piece occupying `pos` on behalf of
    /// `owner`, displacing any current occupant. The occupant, the
    /// square map and the arena are restored before this returns.
    pub fn with_sentinel<R>(
        &mut self,
        pos: &Position,
        owner: PlayerId,
        f: impl FnOnce(&Board, PieceId) -> R,
    ) -> R {
        let displaced = self.occupant_unchecked(pos);
        if let Some(id) = displaced {
            self.withdraw(id);
        }
        let sentinel = self.spawn(PieceKind::Sentinel, owner, pos.clone());
        self.place(sentinel);
        let result = f(self, sentinel);
        self.withdraw(sentinel);
        // `f` only sees `&Board`, so the sentinel is still the newest
        // arena entry and its slot can be handed back
        self.reclaim_newest(sentinel);
        if let Some(id) = displaced {
            self.place(id);
        }
        result
    }

    /// Hand back a speculative spawn. Only the newest arena entry can
    /// be reclaimed, since earlier ids must stay valid; anything else
    /// is left in place.
    pub(crate) fn reclaim_newest(&mut self, id: PieceId) {
        if id.to_index() + 1 == self.arena.len() && !self.arena[id.to_index()].on_board {
            self.arena.pop();
        }
    }

    /// Would an enemy of `defender` capture a piece standing on `pos`?
    ///
    /// Implemented by hypothetical occupancy: a sentinel owned by the
    /// defender stands in, every enemy piece is asked whether it
    /// targets that square, and the board is restored exactly.
    pub fn would_be_captured(
        &mut self,
        players: &Players,
        rules: &Rules,
        pos: &Position,
        defender: PlayerId,
    ) -> bool {
        let enemies = players.enemies(defender);
        self.with_sentinel(pos, defender, |board, _| {
            enemies.iter().any(|&enemy| {
                board
                    .pieces_of(enemy)
                    .any(|id| movegen::targets(board, players, rules, id, pos))
            })
        })
    }

    #[cfg(test)]
    pub(crate) fn arena_len(&self) -> usize {
        self.arena.len()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for (pos, &id) in &self.squares {
            let piece = self.piece(id);
            assert!(piece.on_board);
            assert_eq!(&piece.position, pos);
            assert!(self.pieces_of_kind(piece.player, piece.kind).contains(&id));
        }
        for kinds in self.index.values() {
            for ids in kinds.values() {
                for &id in ids {
                    assert_eq!(self.squares.get(&self.piece(id).position), Some(&id));
                }
            }
        }
    }
}

impl fmt::Display for Board {
    /// Two-dimensional boards render as a glyph grid with the origin
    /// in the lower-left corner; other dimensions list occupants.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dims == 2 {
            for rank in (0..self.size).rev() {
                for file in 0..self.size {
                    let pos = Position::new([rank, file]);
                    match self.occupant_unchecked(&pos) {
                        Some(id) => {
                            let piece = self.piece(id);
                            write!(f, "{}", piece.kind.glyph(piece.player.to_index()))?;
                        }
                        None => write!(f, "□")?,
                    }
                }
                writeln!(f)?;
            }
            return Ok(());
        }
        for (pos, &id) in &self.squares {
            let piece = self.piece(id);
            writeln!(f, "{}: {} {}", pos, piece.player(), piece.kind)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_two_players() -> (Board, Players, Rules, PlayerId, PlayerId) {
        let mut players = Players::new();
        let white = players.add("White");
        let black = players.add("Black");
        let rules = Rules::new(0, vec![PieceKind::Queen])
            .with_player(white, Position::new([1, 0]), 7)
            .with_player(black, Position::new([-1, 0]), 0);
        (Board::new(8, 2), players, rules, white, black)
    }

    #[test]
    fn test_occupant_out_of_bounds() {
        let (board, _, _, _, _) = board_with_two_players();
        let err = board.occupant(&Position::new([8, 0])).unwrap_err();
        assert!(matches!(err, BoardError::OutOfBounds(_)));
        assert!(board.occupant(&Position::new([0, 0])).unwrap().is_none());
        // wrong dimension count is outside too
        assert!(board.occupant(&Position::new([0, 0, 0])).is_err());
    }

    #[test]
    fn test_place_withdraw_keeps_map_and_index_agreeing() {
        let (mut board, _, _, white, _) = board_with_two_players();
        let rook = board.spawn_placed(PieceKind::Rook, white, Position::new([0, 0]));
        board.assert_consistent();
        assert_eq!(board.occupant_unchecked(&Position::new([0, 0])), Some(rook));
        assert_eq!(board.pieces_of_kind(white, PieceKind::Rook), &[rook]);

        board.withdraw(rook);
        board.assert_consistent();
        assert!(board.occupant_unchecked(&Position::new([0, 0])).is_none());
        assert!(board.pieces_of_kind(white, PieceKind::Rook).is_empty());
        assert!(!board.piece(rook).on_board());

        board.place(rook);
        board.assert_consistent();
        assert_eq!(board.occupant_unchecked(&Position::new([0, 0])), Some(rook));
    }

    #[test]
    fn test_relocate_increments_counter_once() {
        let (mut board, _, _, white, _) = board_with_two_players();
        let rook = board.spawn_placed(PieceKind::Rook, white, Position::new([0, 0]));
        board.relocate(rook, Position::new([0, 5]));
        board.assert_consistent();
        assert_eq!(board.piece(rook).moves_made(), 1);
        assert_eq!(board.piece(rook).position(), &Position::new([0, 5]));
        assert!(board.occupant_unchecked(&Position::new([0, 0])).is_none());
    }

    #[test]
    fn test_would_be_captured_by_enemy_rook() {
        let (mut board, players, rules, white, black) = board_with_two_players();
        board.spawn_placed(PieceKind::Rook, black, Position::new([7, 3]));
        assert!(board.would_be_captured(&players, &rules, &Position::new([0, 3]), white));
        assert!(!board.would_be_captured(&players, &rules, &Position::new([0, 4]), white));
    }

    #[test]
    fn test_would_be_captured_restores_occupant_exactly() {
        let (mut board, players, rules, white, black) = board_with_two_players();
        let queen = board.spawn_placed(PieceKind::Queen, white, Position::new([3, 3]));
        board.spawn_placed(PieceKind::Rook, black, Position::new([3, 7]));
        let before = board.squares.clone();

        assert!(board.would_be_captured(&players, &rules, &Position::new([3, 3]), white));
        assert_eq!(board.squares, before);
        assert_eq!(board.occupant_unchecked(&Position::new([3, 3])), Some(queen));
        assert_eq!(board.piece(queen).moves_made(), 0);
        board.assert_consistent();
    }

    #[test]
    fn test_would_be_captured_does_not_grow_arena() {
        let (mut board, players, rules, white, black) = board_with_two_players();
        board.spawn_placed(PieceKind::Queen, white, Position::new([3, 3]));
        board.spawn_placed(PieceKind::Rook, black, Position::new([3, 7]));
        let len = board.arena_len();

        for _ in 0..100 {
            board.would_be_captured(&players, &rules, &Position::new([3, 3]), white);
            board.would_be_captured(&players, &rules, &Position::new([4, 4]), white);
        }
        assert_eq!(board.arena_len(), len);
        board.assert_consistent();
    }

    #[test]
    fn test_blocked_square_is_not_captured() {
        let (mut board, players, rules, white, black) = board_with_two_players();
        board.spawn_placed(PieceKind::Rook, black, Position::new([7, 3]));
        board.spawn_placed(PieceKind::Pawn, black, Position::new([4, 3]));
        // the black pawn shields the file from its own rook
        assert!(!board.would_be_captured(&players, &rules, &Position::new([0, 3]), white));
    }
}
