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

//! Minimax search with and without alpha-beta pruning.
//!
//! Both engines treat every ally of their player as a maximizing turn
//! and everyone else as minimizing, which degrades to ordinary minimax
//! in a two-player game.

use anyhow::Result;

use super::evaluate::{material_value, Evaluate};
use super::Ai;
use crate::board::{MoveError, Movement, PlayerId};
use crate::game::{Game, GameState};

/// Depth-limited alpha-beta, with captures and promotions searched
/// first. Move ordering is what makes the pruning bite: a movement is
/// ranked by ten times the material it wins, discounted by the value of
/// the piece risked to win it.
pub struct AlphaBeta<E: Evaluate> {
    player: PlayerId,
    depth: u32,
    evaluator: E,
}

impl<E: Evaluate> AlphaBeta<E> {
    pub fn new(player: PlayerId, depth: u32, evaluator: E) -> Self {
        Self {
            player,
            depth,
            evaluator,
        }
    }

    fn ordered_moves(&self, game: &mut Game) -> Vec<Movement> {
        let mut ranked: Vec<(f64, Movement)> = game
            .legal_moves()
            .into_iter()
            .map(|mv| (move_rank(game, &mv), mv))
            .collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).expect("ranks are finite"));
        ranked.into_iter().map(|(_, mv)| mv).collect()
    }

    fn descend(&self, game: &mut Game, depth: u32, alpha: f64, beta: f64) -> f64 {
        if game.players().is_ally(self.player, game.turn()) {
            self.search_max(game, depth, alpha, beta)
        } else {
            self.search_min(game, depth, alpha, beta)
        }
    }

    fn search_max(&self, game: &mut Game, depth: u32, mut alpha: f64, beta: f64) -> f64 {
        let (state, winners) = game.state();
        if depth == 0 || state.is_finished() {
            return leaf_score(&self.evaluator, game, self.player, state, &winners);
        }
        for mv in self.ordered_moves(game) {
            let score = game.probe(mv, |game| self.descend(game, depth - 1, alpha, beta));
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    fn search_min(&self, game: &mut Game, depth: u32, alpha: f64, mut beta: f64) -> f64 {
        let (state, winners) = game.state();
        if depth == 0 || state.is_finished() {
            return leaf_score(&self.evaluator, game, self.player, state, &winners);
        }
        for mv in self.ordered_moves(game) {
            let score = game.probe(mv, |game| self.descend(game, depth - 1, alpha, beta));
            if score <= alpha {
                return alpha;
            }
            if score < beta {
                beta = score;
            }
        }
        beta
    }
}

impl<E: Evaluate> Ai for AlphaBeta<E> {
    fn choose(&mut self, game: &mut Game) -> Result<Movement> {
        let depth = self.depth.saturating_sub(1);
        let mut best: Option<Movement> = None;
        let mut alpha = f64::NEG_INFINITY;
        for mv in self.ordered_moves(game) {
            let score = game.probe(mv.clone(), |game| {
                self.descend(game, depth, alpha, f64::INFINITY)
            });
            if score > alpha || best.is_none() {
                alpha = score;
                best = Some(mv);
            }
        }
        best.ok_or_else(|| MoveError::NoMoves.into())
    }
}

/// Exhaustive minimax without pruning. Much slower than [`AlphaBeta`]
/// and kept as its correctness reference: with the same evaluator and
/// depth the two must value every root movement identically.
pub struct Minimax<E: Evaluate> {
    player: PlayerId,
    depth: u32,
    evaluator: E,
}

impl<E: Evaluate> Minimax<E> {
    pub fn new(player: PlayerId, depth: u32, evaluator: E) -> Self {
        Self {
            player,
            depth,
            evaluator,
        }
    }

    /// The searched value of playing `mv` in the current position.
    pub fn value_of(&self, game: &mut Game, mv: Movement) -> f64 {
        let depth = self.depth.saturating_sub(1);
        game.probe(mv, |game| self.search(game, depth))
    }

    fn search(&self, game: &mut Game, depth: u32) -> f64 {
        let (state, winners) = game.state();
        if depth == 0 || state.is_finished() {
            return leaf_score(&self.evaluator, game, self.player, state, &winners);
        }
        let maximizing = game.players().is_ally(self.player, game.turn());
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for mv in game.legal_moves() {
            let score = game.probe(mv, |game| self.search(game, depth - 1));
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }
}

impl<E: Evaluate> Ai for Minimax<E> {
    fn choose(&mut self, game: &mut Game) -> Result<Movement> {
        let mut best: Option<(f64, Movement)> = None;
        for mv in game.legal_moves() {
            let score = self.value_of(game, mv.clone());
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, mv));
            }
        }
        best.map(|(_, mv)| mv).ok_or_else(|| MoveError::NoMoves.into())
    }
}

fn leaf_score<E: Evaluate>(
    evaluator: &E,
    game: &Game,
    player: PlayerId,
    state: GameState,
    winners: &[PlayerId],
) -> f64 {
    match state {
        GameState::Checkmate => {
            if winners.contains(&player) {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            }
        }
        GameState::Stalemate | GameState::FiftyMoves => 0.0,
        _ => evaluator.score(game, player),
    }
}

fn move_rank(game: &Game, mv: &Movement) -> f64 {
    let board = game.board();
    let captured: f64 = mv
        .captured_pieces(board, game.players())
        .iter()
        .map(|&id| material_value(board.piece(id).kind()))
        .sum();
    let mut rank = 10.0 * captured;
    if captured > 0.0 {
        rank -= material_value(board.piece(mv.piece()).kind());
    }
    if let Some(kind) = mv.promotes_to() {
        rank += 10.0 * material_value(kind);
    }
    rank
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MaterialEvaluator;
    use crate::board::{Board, PieceKind, PieceKind::*, Players, Position, Rules};

    fn game_with(pieces: &[(PieceKind, usize, &str)]) -> Game {
        let mut players = Players::new();
        let white = players.add("White");
        let black = players.add("Black");
        let rules = Rules::new(0, vec![Queen, Rook, Bishop, Knight])
            .with_player(white, Position::new([1, 0]), 7)
            .with_player(black, Position::new([-1, 0]), 0);
        let mut board = Board::new(8, 2);
        for &(kind, slot, square) in pieces {
            let owner = if slot == 0 { white } else { black };
            board.spawn_placed(kind, owner, Position::try_from_str(square).unwrap());
        }
        Game::new(board, players, rules, vec![white, black]).unwrap()
    }

    fn pos(name: &str) -> Position {
        Position::try_from_str(name).unwrap()
    }

    #[test]
    fn test_takes_a_hanging_queen() {
        let mut game = game_with(&[
            (Rook, 0, "a1"),
            (King, 0, "h1"),
            (Queen, 1, "a7"),
            (King, 1, "h8"),
        ]);
        let white = game.turn();
        let mut engine = AlphaBeta::new(white, 2, MaterialEvaluator);
        let mv = engine.choose(&mut game).unwrap();
        assert_eq!(mv.destination(), &pos("a7"));
        assert!(mv.is_capture(game.board(), game.players()));
    }

    #[test]
    fn test_declines_a_defended_pawn() {
        // the pawn on b6 is guarded by the one on a7; taking it trades
        // a rook for a pawn
        let mut game = game_with(&[
            (Rook, 0, "b1"),
            (King, 0, "h1"),
            (Pawn, 1, "b6"),
            (Pawn, 1, "a7"),
            (King, 1, "h8"),
        ]);
        let white = game.turn();
        let mut engine = AlphaBeta::new(white, 2, MaterialEvaluator);
        let mv = engine.choose(&mut game).unwrap();
        assert_ne!(mv.destination(), &pos("b6"));
    }

    #[test]
    fn test_finds_mate_in_one() {
        let mut game = game_with(&[
            (Rook, 0, "b7"),
            (Queen, 0, "c6"),
            (King, 0, "h1"),
            (King, 1, "a8"),
        ]);
        let white = game.turn();
        let mut engine = AlphaBeta::new(white, 2, MaterialEvaluator);
        let mv = engine.choose(&mut game).unwrap();
        game.advance(mv).unwrap();
        assert_eq!(game.state().0, GameState::Checkmate);
    }

    #[test]
    fn test_search_leaves_the_game_untouched() {
        let mut game = game_with(&[
            (Rook, 0, "a1"),
            (King, 0, "h1"),
            (Queen, 1, "a7"),
            (King, 1, "h8"),
        ]);
        let white = game.turn();
        let before = format!("{}", game.board());
        let mut engine = AlphaBeta::new(white, 3, MaterialEvaluator);
        engine.choose(&mut game).unwrap();
        assert_eq!(format!("{}", game.board()), before);
        assert!(game.history().is_empty());
        assert_eq!(game.turn(), white);
    }

    #[test]
    fn test_pruned_search_agrees_with_plain_minimax() {
        let mut game = game_with(&[
            (Rook, 0, "b1"),
            (Knight, 0, "d4"),
            (King, 0, "h1"),
            (Pawn, 1, "b6"),
            (Bishop, 1, "e5"),
            (King, 1, "h8"),
        ]);
        let white = game.turn();
        let mut pruned = AlphaBeta::new(white, 3, MaterialEvaluator);
        let oracle = Minimax::new(white, 3, MaterialEvaluator);

        let choice = pruned.choose(&mut game).unwrap();
        let choice_value = oracle.value_of(&mut game, choice);
        let best_value = game
            .legal_moves()
            .into_iter()
            .map(|mv| oracle.value_of(&mut game, mv))
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(choice_value, best_value);
    }

    #[test]
    fn test_move_ordering_puts_the_biggest_capture_first() {
        let mut game = game_with(&[
            (Rook, 0, "d4"),
            (King, 0, "h1"),
            (Queen, 1, "d7"),
            (Knight, 1, "d1"),
            (King, 1, "h8"),
        ]);
        let white = game.turn();
        let engine = AlphaBeta::new(white, 2, MaterialEvaluator);
        let ordered = engine.ordered_moves(&mut game);
        // rook takes queen ahead of rook takes knight ahead of the rest
        assert_eq!(ordered[0].destination(), &pos("d7"));
        assert_eq!(ordered[1].destination(), &pos("d1"));
    }
}
