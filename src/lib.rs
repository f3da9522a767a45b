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

//! A chess-like rules engine generalized over board size, dimension
//! count and player roster.
//!
//! Classical chess is one configuration of the engine:
//!
//! ```
//! use modular_chess::Game;
//!
//! let mut game = Game::classical("White", "Black").unwrap();
//! assert_eq!(game.legal_moves().len(), 20);
//! ```
//!
//! [`board`] holds positions, pieces, players and move generation,
//! [`game`] the turn and legality logic, and [`ai`] the computer
//! players.

pub mod ai;
pub mod board;
pub mod game;

#[cfg(feature = "random")]
pub use ai::RandomAi;
pub use ai::{Ai, AlphaBeta, Evaluate, MaterialEvaluator, Minimax};
pub use board::{
    Board, Movement, Piece, PieceId, PieceKind, Player, PlayerId, Players, Position, Rules,
};
pub use game::{Game, GameState};
