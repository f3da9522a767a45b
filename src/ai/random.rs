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

use anyhow::Result;
use rand::{seq::SliceRandom, thread_rng};

use super::Ai;
use crate::board::{MoveError, Movement};
use crate::game::Game;

/// Plays a uniformly random legal movement. Useful as a sparring
/// partner and for randomized soak tests of the engine itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAi;

impl Ai for RandomAi {
    fn choose(&mut self, game: &mut Game) -> Result<Movement> {
        game.legal_moves()
            .choose(&mut thread_rng())
            .cloned()
            .ok_or_else(|| MoveError::NoMoves.into())
    }
}
