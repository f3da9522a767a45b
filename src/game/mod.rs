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

//! Game orchestration: turn order, legality, history and termination.
//!
//! A [`Game`] owns one live [`Board`] and a movement history. Moves are
//! validated and applied in place; search and the check test apply
//! speculative movements to the same board and undo them exactly, so
//! there is never a second copy of the position.
//!
//! Legality is pseudo-legality plus king safety: a movement that leaves
//! the mover's king capturable is rejected. Terminal states follow from
//! the legal move list: none while in check is checkmate, none
//! otherwise is stalemate, and a configurable run of halfmoves without
//! a capture is a draw.

mod classical;

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::board::{
    Board, MoveError, Movement, PieceId, PlayerId, Players, Position, Rules, RulesCtx,
};

/// Halfmoves without a capture before the game is drawn, counting both
/// sides (the classical fifty-move rule).
pub const DRAW_HALFMOVES: usize = 100;

const CACHE_CAPACITY: usize = 64;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No piece is on the board; nothing can happen.
    EmptyBoard,
    /// Pieces are set up but no movement has been made.
    Starting,
    Playing,
    Checkmate,
    Stalemate,
    FiftyMoves,
}

impl GameState {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            GameState::Checkmate | GameState::Stalemate | GameState::FiftyMoves
        )
    }
}

/// Cyclic turn order with a replay queue.
///
/// Rewinding threads the rewound movers (oldest first) and the
/// interrupted current player back in front of the cycle, so replaying
/// the same movements visits players in the original order even with
/// more than two of them.
#[derive(Debug, Clone)]
struct TurnOrder {
    ring: Vec<PlayerId>,
    cursor: usize,
    pending: VecDeque<PlayerId>,
}

impl TurnOrder {
    fn new(ring: Vec<PlayerId>) -> Self {
        Self {
            ring,
            cursor: 0,
            pending: VecDeque::new(),
        }
    }

    fn next(&mut self) -> PlayerId {
        if let Some(player) = self.pending.pop_front() {
            return player;
        }
        let player = self.ring[self.cursor];
        self.cursor = (self.cursor + 1) % self.ring.len();
        player
    }

    /// Re-queue after a rewind: `movers` are the rewound players oldest
    /// first, `interrupted` the player who was about to move. Returns
    /// the new current player.
    fn rethread(&mut self, movers: Vec<PlayerId>, interrupted: PlayerId) -> PlayerId {
        self.pending.push_front(interrupted);
        for &mover in movers.iter().rev() {
            self.pending.push_front(mover);
        }
        self.next()
    }
}

/// Legal-move lists keyed by a hash of the history and the player to
/// move. Alpha-beta revisits positions after rewinding, so entries stay
/// useful across speculation; capacity-bounded FIFO, the oldest entry
/// is evicted first regardless of how often it was hit.
#[derive(Debug, Clone, Default)]
struct MoveCache {
    entries: VecDeque<(u64, Vec<Movement>)>,
}

impl MoveCache {
    fn get(&self, key: u64) -> Option<&Vec<Movement>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, moves)| moves)
    }

    fn put(&mut self, key: u64, moves: Vec<Movement>) {
        if self.entries.len() == CACHE_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back((key, moves));
    }
}

/// One running game: the live board, the roster, the movement rules and
/// the full history.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: Players,
    rules: Rules,
    order: TurnOrder,
    turn: PlayerId,
    history: Vec<Movement>,
    /// History length right after the most recent capture.
    last_capture: usize,
    draw_halfmoves: usize,
    cache: MoveCache,
}

impl Game {
    /// The ring is the turn order; each entry must name a player in the
    /// roster.
    pub fn new(board: Board, players: Players, rules: Rules, ring: Vec<PlayerId>) -> Result<Self> {
        ensure!(!ring.is_empty(), "a game needs at least one player");
        let mut order = TurnOrder::new(ring);
        let turn = order.next();
        Ok(Self {
            board,
            players,
            rules,
            order,
            turn,
            history: Vec::new(),
            last_capture: 0,
            draw_halfmoves: DRAW_HALFMOVES,
            cache: MoveCache::default(),
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn players(&self) -> &Players {
        &self.players
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The player to move.
    #[inline]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    #[inline]
    pub fn history(&self) -> &[Movement] {
        &self.history
    }

    /// Validate and play one movement for the current player.
    ///
    /// The submitted movement must act through a piece still on the
    /// board, must match one the rules generate for its piece and
    /// destination (promotion candidates also match on the promoted
    /// kind) and must not leave the mover's king capturable.
    pub fn advance(&mut self, mv: Movement) -> Result<()> {
        ensure!(self.board.piece(mv.piece()).on_board(), MoveError::InvalidMove);
        let mover = self.board.piece(mv.piece()).player();
        ensure!(mover == self.turn, MoveError::NotYourTurn);
        let candidates = self.raw_candidates(mv.piece(), mv.destination().clone());
        let matched = candidates
            .into_iter()
            .find(|candidate| candidate.same_effect(&mv))
            .ok_or(MoveError::InvalidMove)?;
        ensure!(!self.would_expose_king(&matched), MoveError::InvalidMove);
        self.commit(matched);
        Ok(())
    }

    /// Undo the most recent `n` movements exactly: positions, captured
    /// pieces, move counters and the turn order all return to their
    /// prior state.
    pub fn rewind(&mut self, n: usize) -> Result<()> {
        ensure!(
            n <= self.history.len(),
            MoveError::BadCount(n, self.history.len())
        );
        let movers: Vec<PlayerId> = self.history[self.history.len() - n..]
            .iter()
            .map(|mv| self.board.piece(mv.piece()).player())
            .collect();
        for _ in 0..n {
            let mv = self.history.pop().expect("count checked above");
            mv.inverse().apply(&mut self.board);
            // undone promotions hand their spawned piece back; history
            // is LIFO, so each one is the newest entry when its turn
            // comes
            if let Some(promoted) = mv.promoted_piece() {
                self.board.reclaim_newest(promoted);
            }
        }
        self.turn = self.order.rethread(movers, self.turn);
        self.last_capture = self.recompute_last_capture();
        Ok(())
    }

    fn recompute_last_capture(&self) -> usize {
        self.history
            .iter()
            .rposition(|mv| mv.is_capture(&self.board, &self.players))
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    /// Apply without validation and push onto the history. Used by
    /// search with movements that came out of [`Game::legal_moves`].
    pub(crate) fn commit(&mut self, mut mv: Movement) {
        let capture = mv.is_capture(&self.board, &self.players);
        mv.apply(&mut self.board);
        self.history.push(mv);
        if capture {
            self.last_capture = self.history.len();
        }
        self.turn = self.order.next();
    }

    /// Play `mv`, run `f`, then rewind regardless of what `f` did.
    pub fn probe<R>(&mut self, mv: Movement, f: impl FnOnce(&mut Game) -> R) -> R {
        self.commit(mv);
        let result = f(self);
        self.rewind(1).expect("just committed");
        result
    }

    /// Every legal movement of the player to move.
    pub fn legal_moves(&mut self) -> Vec<Movement> {
        let key = self.cache_key();
        if let Some(moves) = self.cache.get(key) {
            return moves.clone();
        }
        let pieces: Vec<PieceId> = self.board.pieces_of(self.turn).collect();
        let mut moves = Vec::new();
        for piece in pieces {
            moves.extend(self.legal_moves_for(piece));
        }
        self.cache.put(key, moves.clone());
        moves
    }

    /// Every legal movement of one piece, whoever owns it. A piece no
    /// longer on the board has none.
    pub fn legal_moves_for(&mut self, piece: PieceId) -> Vec<Movement> {
        if !self.board.piece(piece).on_board() {
            return Vec::new();
        }
        let ctx = RulesCtx {
            players: &self.players,
            rules: &self.rules,
            last_move: self.history.last(),
        };
        let mut moves = crate::board::pseudo_moves(&ctx, &mut self.board, piece);
        moves.retain(|mv| !self.would_expose_king(mv));
        moves
    }

    /// Legal movements of `piece` landing on `dest`, for move input
    /// disambiguation. Promotion yields one candidate per kind.
    pub fn candidates_for(&mut self, piece: PieceId, dest: &Position) -> Vec<Movement> {
        if !self.board.piece(piece).on_board() {
            return Vec::new();
        }
        let mut moves = self.raw_candidates(piece, dest.clone());
        moves.retain(|mv| !self.would_expose_king(mv));
        moves
    }

    fn raw_candidates(&mut self, piece: PieceId, dest: Position) -> Vec<Movement> {
        let ctx = RulesCtx {
            players: &self.players,
            rules: &self.rules,
            last_move: self.history.last(),
        };
        crate::board::candidates_for(&ctx, &mut self.board, piece, &dest)
    }

    /// Is this player's king currently capturable? A player without a
    /// king on the board is never in check.
    pub fn in_check(&mut self, player: PlayerId) -> bool {
        let Some(king) = self.board.king_of(player) else {
            return false;
        };
        let pos = self.board.piece(king).position().clone();
        self.board
            .would_be_captured(&self.players, &self.rules, &pos, player)
    }

    fn would_expose_king(&mut self, mv: &Movement) -> bool {
        let mover = self.board.piece(mv.piece()).player();
        let mut speculative = mv.clone();
        speculative.apply(&mut self.board);
        let exposed = self.in_check(mover);
        speculative.inverse().apply(&mut self.board);
        if let Some(promoted) = speculative.promoted_piece() {
            self.board.reclaim_newest(promoted);
        }
        exposed
    }

    /// The current state plus the winners it implies: checkmate pays
    /// the mated player's enemies, draws pay everyone, anything still
    /// undecided pays no one.
    pub fn state(&mut self) -> (GameState, Vec<PlayerId>) {
        if self.board.is_empty() {
            return (GameState::EmptyBoard, Vec::new());
        }
        if self.legal_moves().is_empty() {
            if self.in_check(self.turn) {
                return (GameState::Checkmate, self.players.enemies(self.turn));
            }
            return (GameState::Stalemate, self.players.ids().collect());
        }
        if self.history.len() - self.last_capture > self.draw_halfmoves {
            return (GameState::FiftyMoves, self.players.ids().collect());
        }
        if self.history.is_empty() {
            return (GameState::Starting, Vec::new());
        }
        (GameState::Playing, Vec::new())
    }

    fn cache_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.history.hash(&mut hasher);
        self.turn.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{MoveKind, PieceKind::*};

    fn minimal_game() -> Game {
        let mut players = Players::new();
        let white = players.add("White");
        let black = players.add("Black");
        let rules = Rules::new(0, vec![Queen, Rook, Bishop, Knight])
            .with_player(white, Position::new([1, 0]), 7)
            .with_player(black, Position::new([-1, 0]), 0);
        let board = Board::new(8, 2);
        Game::new(board, players, rules, vec![white, black]).unwrap()
    }

    fn pos(name: &str) -> Position {
        Position::try_from_str(name).unwrap()
    }

    #[test]
    fn test_advance_rejects_out_of_turn_and_illegal_moves() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        let w_rook = game.board.spawn_placed(Rook, white, pos("a1"));
        let b_rook = game.board.spawn_placed(Rook, black, pos("h8"));

        let out_of_turn = Movement::basic(&game.board, &game.players, b_rook, pos("h4"));
        assert!(game.advance(out_of_turn).is_err());

        let diagonal = Movement::basic(&game.board, &game.players, w_rook, pos("b2"));
        assert!(game.advance(diagonal).is_err());

        let straight = Movement::basic(&game.board, &game.players, w_rook, pos("a4"));
        game.advance(straight).unwrap();
        assert_eq!(game.turn(), black);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_advance_rejects_a_captured_piece() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        let w_rook = game.board.spawn_placed(Rook, white, pos("a1"));
        let b_rook = game.board.spawn_placed(Rook, black, pos("a8"));

        let capture = Movement::basic(&game.board, &game.players, w_rook, pos("a8"));
        game.advance(capture).unwrap();
        assert!(!game.board().piece(b_rook).on_board());

        // the captured rook's id is still valid but may not act
        let ghost = Movement::basic(&game.board, &game.players, b_rook, pos("a4"));
        let err = game.advance(ghost).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MoveError>(),
            Some(MoveError::InvalidMove)
        ));
        assert!(game.legal_moves_for(b_rook).is_empty());
        assert!(game.candidates_for(b_rook, &pos("a4")).is_empty());
        assert_eq!(game.board().piece(w_rook).position(), &pos("a8"));
        game.board.assert_consistent();
    }

    #[test]
    fn test_pinned_piece_cannot_expose_its_king() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        game.board.spawn_placed(King, white, pos("e1"));
        let bishop = game.board.spawn_placed(Bishop, white, pos("e2"));
        game.board.spawn_placed(Rook, black, pos("e8"));

        // the bishop is pinned to the file; every diagonal step exposes
        // the king
        assert!(game.legal_moves_for(bishop).is_empty());
        let step = Movement::basic(&game.board, &game.players, bishop, pos("d3"));
        assert!(game.advance(step).is_err());
    }

    #[test]
    fn test_check_restricts_legal_moves_to_escapes() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        game.board.spawn_placed(King, white, pos("e1"));
        game.board.spawn_placed(Rook, white, pos("a2"));
        game.board.spawn_placed(Queen, black, pos("e8"));

        assert!(game.in_check(white));
        let moves = game.legal_moves();
        // block on e2, or step the king off the file; the rook's other
        // moves don't address the check
        assert!(moves.iter().all(|mv| {
            let piece = game.board().piece(mv.piece());
            piece.kind() == King || mv.destination() == &pos("e2")
        }));
        assert!(!moves.is_empty());
    }

    #[test]
    fn test_back_rank_checkmate() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        game.board.spawn_placed(King, white, pos("a1"));
        game.board.spawn_placed(Pawn, white, pos("a2"));
        game.board.spawn_placed(Pawn, white, pos("b2"));
        game.board.spawn_placed(Rook, black, pos("h1"));

        let (state, winners) = game.state();
        assert_eq!(state, GameState::Checkmate);
        assert_eq!(winners, vec![black]);
    }

    #[test]
    fn test_stalemate_when_no_move_and_no_check() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        game.board.spawn_placed(King, white, pos("a1"));
        game.board.spawn_placed(Queen, black, pos("c2"));
        game.board.spawn_placed(King, black, pos("c3"));

        assert!(!game.in_check(white));
        let (state, winners) = game.state();
        assert_eq!(state, GameState::Stalemate);
        assert_eq!(winners.len(), 2);
    }

    #[test]
    fn test_fifty_move_draw_counts_from_last_capture() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        let w_rook = game.board.spawn_placed(Rook, white, pos("a1"));
        let b_rook = game.board.spawn_placed(Rook, black, pos("a8"));
        game.board.spawn_placed(King, white, pos("c5"));
        game.board.spawn_placed(King, black, pos("f4"));
        game.draw_halfmoves = 4;

        let shuffle = [
            (w_rook, "a2"),
            (b_rook, "a7"),
            (w_rook, "a1"),
            (b_rook, "a8"),
            (w_rook, "a2"),
        ];
        for (rook, dest) in shuffle {
            let mv = Movement::basic(&game.board, &game.players, rook, pos(dest));
            game.advance(mv).unwrap();
        }
        let (state, _) = game.state();
        assert_eq!(state, GameState::FiftyMoves);

        // a capture resets the clock
        game.rewind(1).unwrap();
        let capture = Movement::basic(&game.board, &game.players, w_rook, pos("a8"));
        game.advance(capture).unwrap();
        let (state, _) = game.state();
        assert_eq!(state, GameState::Playing);
    }

    #[test]
    fn test_rewind_restores_position_and_turn() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        let w_rook = game.board.spawn_placed(Rook, white, pos("a1"));
        let b_pawn = game.board.spawn_placed(Pawn, black, pos("a7"));

        let first = Movement::basic(&game.board, &game.players, w_rook, pos("a5"));
        game.advance(first).unwrap();
        let second = Movement::basic(&game.board, &game.players, b_pawn, pos("a6"));
        game.advance(second).unwrap();
        let third = Movement::basic(&game.board, &game.players, w_rook, pos("a6"));
        game.advance(third).unwrap();
        assert_eq!(game.turn(), black);

        game.rewind(3).unwrap();
        assert_eq!(game.turn(), white);
        assert!(game.history().is_empty());
        assert_eq!(game.board().piece(w_rook).position(), &pos("a1"));
        assert_eq!(game.board().piece(w_rook).moves_made(), 0);
        assert!(game.board().piece(b_pawn).on_board());
        assert_eq!(game.board().piece(b_pawn).position(), &pos("a7"));
        assert_eq!(game.last_capture, 0);
    }

    #[test]
    fn test_rewind_rethreads_three_player_turn_order() {
        let mut players = Players::new();
        let a = players.add("A");
        let b = players.add("B");
        let c = players.add("C");
        players.join_enemies(a, b);
        players.join_enemies(b, c);
        players.join_enemies(a, c);
        let rules = Rules::new(0, vec![Queen])
            .with_player(a, Position::new([1, 0]), 7)
            .with_player(b, Position::new([-1, 0]), 0)
            .with_player(c, Position::new([1, 0]), 7);
        let mut game = Game::new(Board::new(8, 2), players, rules, vec![a, b, c]).unwrap();
        let rook_a = game.board.spawn_placed(Rook, a, pos("a1"));
        let rook_b = game.board.spawn_placed(Rook, b, pos("b8"));
        let rook_c = game.board.spawn_placed(Rook, c, pos("c4"));

        for (rook, dest) in [(rook_a, "a3"), (rook_b, "b6"), (rook_c, "c5")] {
            let mv = Movement::basic(&game.board, &game.players, rook, pos(dest));
            game.advance(mv).unwrap();
        }
        assert_eq!(game.turn(), a);

        game.rewind(2).unwrap();
        // B and C replay in their original order, then A resumes
        assert_eq!(game.turn(), b);
        let mv = Movement::basic(&game.board, &game.players, rook_b, pos("b6"));
        game.advance(mv).unwrap();
        assert_eq!(game.turn(), c);
        let mv = Movement::basic(&game.board, &game.players, rook_c, pos("c5"));
        game.advance(mv).unwrap();
        assert_eq!(game.turn(), a);
    }

    #[test]
    fn test_en_passant_through_the_game_layer() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        let w_pawn = game.board.spawn_placed(Pawn, white, pos("e2"));
        let b_pawn = game.board.spawn_placed(Pawn, black, pos("d7"));
        let w_spare = game.board.spawn_placed(Rook, white, pos("h1"));
        let b_spare = game.board.spawn_placed(Rook, black, pos("a8"));

        for (piece, dest) in [
            (w_pawn, "e4"),
            (b_spare, "a7"),
            (w_pawn, "e5"),
            (b_pawn, "d5"),
        ] {
            let mv = Movement::basic(&game.board, &game.players, piece, pos(dest));
            game.advance(mv).unwrap();
        }
        let captures = game.candidates_for(w_pawn, &pos("d6"));
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].kind(), MoveKind::EnPassant);
        game.advance(captures[0].clone()).unwrap();
        assert!(!game.board().piece(b_pawn).on_board());

        // rewinding brings the captured pawn back and reopens nothing:
        // if white shuffles instead, the window is gone
        game.rewind(1).unwrap();
        assert!(game.board().piece(b_pawn).on_board());
        let shuffle = Movement::basic(&game.board, &game.players, w_spare, pos("h2"));
        game.advance(shuffle).unwrap();
        let reply = Movement::basic(&game.board, &game.players, b_spare, pos("a8"));
        game.advance(reply).unwrap();
        assert!(game.candidates_for(w_pawn, &pos("d6")).is_empty());
    }

    #[test]
    fn test_probe_always_restores() {
        let mut game = minimal_game();
        let white = game.turn();
        let w_rook = game.board.spawn_placed(Rook, white, pos("a1"));
        let mv = Movement::basic(&game.board, &game.players, w_rook, pos("a5"));
        let history_before = game.history().len();

        let dest = game.probe(mv, |game| {
            game.board().piece(w_rook).position().clone()
        });
        assert_eq!(dest, pos("a5"));
        assert_eq!(game.history().len(), history_before);
        assert_eq!(game.board().piece(w_rook).position(), &pos("a1"));
        assert_eq!(game.turn(), white);
    }

    #[test]
    fn test_cached_moves_survive_advance_and_rewind() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        let w_rook = game.board.spawn_placed(Rook, white, pos("a1"));
        game.board.spawn_placed(Rook, black, pos("h8"));

        let before = game.legal_moves();
        let mv = Movement::basic(&game.board, &game.players, w_rook, pos("a4"));
        game.advance(mv).unwrap();
        assert_ne!(game.legal_moves(), before);

        game.rewind(1).unwrap();
        let after = game.legal_moves();
        assert_eq!(after, before);

        // and the rewound list matches a cold recomputation
        let mut cold = minimal_game();
        let cold_white = cold.turn();
        cold.board.spawn_placed(Rook, cold_white, pos("a1"));
        let cold_black = cold.players().ids().nth(1).unwrap();
        cold.board.spawn_placed(Rook, cold_black, pos("h8"));
        assert_eq!(cold.legal_moves(), after);
    }

    #[test]
    fn test_speculation_does_not_grow_the_arena() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        game.board.spawn_placed(Pawn, white, pos("b7"));
        game.board.spawn_placed(King, white, pos("e1"));
        game.board.spawn_placed(King, black, pos("e8"));
        let len = game.board().arena_len();

        // generation, king-safety filtering and full probes all leave
        // the arena exactly as it was, promotion fan-out included
        let moves = game.legal_moves();
        assert!(moves.iter().any(|mv| mv.kind() == MoveKind::Promotion));
        assert_eq!(game.board().arena_len(), len);

        for mv in &moves {
            game.probe(mv.clone(), |game| {
                game.legal_moves();
            });
        }
        assert_eq!(game.board().arena_len(), len);
        game.board.assert_consistent();
    }

    #[test]
    fn test_state_transitions_from_empty_to_playing() {
        let mut game = minimal_game();
        let white = game.turn();
        let black = game.players().ids().nth(1).unwrap();
        assert_eq!(game.state().0, GameState::EmptyBoard);

        let rook = game.board.spawn_placed(Rook, white, pos("a1"));
        game.board.spawn_placed(King, white, pos("e1"));
        game.board.spawn_placed(King, black, pos("e8"));
        assert_eq!(game.state().0, GameState::Starting);

        let mv = Movement::basic(&game.board, &game.players, rook, pos("a4"));
        game.advance(mv).unwrap();
        assert_eq!(game.state().0, GameState::Playing);
    }
}
