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
use std::collections::HashMap;

use crate::board::{PieceKind, PlayerId};
use crate::game::Game;

/// Weight of a player's own standing against that of their allies.
const OWN_WEIGHT: f64 = 0.75;

static MATERIAL_VALUES: Lazy<HashMap<PieceKind, f64>> = Lazy::new(|| {
    HashMap::from([
        (PieceKind::Pawn, 1.0),
        (PieceKind::Knight, 3.0),
        (PieceKind::Bishop, 3.0),
        (PieceKind::Rook, 5.0),
        (PieceKind::Queen, 9.0),
        (PieceKind::King, 0.0),
    ])
});

pub fn material_value(kind: PieceKind) -> f64 {
    MATERIAL_VALUES.get(&kind).copied().unwrap_or(0.0)
}

/// A position evaluation from one player's point of view.
pub trait Evaluate {
    /// One player's raw standing, higher is better for them.
    fn evaluate_player(&self, game: &Game, player: PlayerId) -> f64;

    /// Relative score: the player's side minus the enemies' average.
    ///
    /// With allies the player's own standing keeps most of the weight
    /// and the allies split the remainder, so an engine still prefers
    /// its own material over a teammate's.
    fn score(&self, game: &Game, player: PlayerId) -> f64 {
        let players = game.players();
        let own = self.evaluate_player(game, player);
        let allies: Vec<PlayerId> = players
            .allies(player)
            .iter()
            .copied()
            .filter(|&ally| ally != player)
            .collect();
        let side = if allies.is_empty() {
            own
        } else {
            let share = (1.0 - OWN_WEIGHT) / allies.len() as f64;
            let ally_sum: f64 = allies
                .iter()
                .map(|&ally| self.evaluate_player(game, ally))
                .sum();
            OWN_WEIGHT * own + share * ally_sum
        };
        let enemies = players.enemies(player);
        if enemies.is_empty() {
            return side;
        }
        let enemy_sum: f64 = enemies
            .iter()
            .map(|&enemy| self.evaluate_player(game, enemy))
            .sum();
        side - enemy_sum / enemies.len() as f64
    }
}

/// Plain material count; the king carries no weight since it cannot be
/// taken off the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluate for MaterialEvaluator {
    fn evaluate_player(&self, game: &Game, player: PlayerId) -> f64 {
        game.board()
            .pieces_of(player)
            .map(|id| material_value(game.board().piece(id).kind()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, PieceKind::*, Players, Position, Rules};

    fn game_with(pieces: &[(PieceKind, usize, &str)]) -> Game {
        let mut players = Players::new();
        let white = players.add("White");
        let black = players.add("Black");
        let rules = Rules::new(0, vec![Queen])
            .with_player(white, Position::new([1, 0]), 7)
            .with_player(black, Position::new([-1, 0]), 0);
        let mut board = Board::new(8, 2);
        for &(kind, slot, square) in pieces {
            let owner = if slot == 0 { white } else { black };
            board.spawn_placed(kind, owner, Position::try_from_str(square).unwrap());
        }
        Game::new(board, players, rules, vec![white, black]).unwrap()
    }

    #[test]
    fn test_material_score_is_relative() {
        let game = game_with(&[
            (King, 0, "e1"),
            (Queen, 0, "d1"),
            (King, 1, "e8"),
            (Rook, 1, "a8"),
        ]);
        let white = game.players().ids().next().unwrap();
        let black = game.players().ids().nth(1).unwrap();
        let eval = MaterialEvaluator;
        assert_eq!(eval.score(&game, white), 4.0);
        assert_eq!(eval.score(&game, black), -4.0);
    }

    #[test]
    fn test_captured_pieces_stop_counting() {
        let mut game = game_with(&[
            (Rook, 0, "a1"),
            (King, 0, "e1"),
            (Pawn, 1, "a7"),
            (King, 1, "e8"),
        ]);
        let white = game.players().ids().next().unwrap();
        let eval = MaterialEvaluator;
        assert_eq!(eval.score(&game, white), 4.0);

        let rook = game.board().occupant(&Position::try_from_str("a1").unwrap()).unwrap().unwrap();
        let capture = crate::board::Movement::basic(
            game.board(),
            game.players(),
            rook,
            Position::try_from_str("a7").unwrap(),
        );
        game.advance(capture).unwrap();
        assert_eq!(eval.score(&game, white), 5.0);
    }
}
