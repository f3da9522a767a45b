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

//! Computer players.
//!
//! Engines search by speculating on the game's single live board:
//! every line is played with [`Game::probe`], which undoes it exactly,
//! so a search of any depth never copies the position.

mod evaluate;
#[cfg(feature = "random")]
mod random;
mod search;

pub use evaluate::*;
#[cfg(feature = "random")]
pub use random::*;
pub use search::*;

use anyhow::Result;

use crate::board::Movement;
use crate::game::Game;

pub trait Ai {
    /// Pick a movement for the player to move. Fails when the position
    /// offers none.
    fn choose(&mut self, game: &mut Game) -> Result<Movement>;

    /// Pick a movement and play it.
    fn play(&mut self, game: &mut Game) -> Result<Movement> {
        let mv = self.choose(game)?;
        game.advance(mv.clone())?;
        Ok(mv)
    }
}
