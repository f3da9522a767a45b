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
use std::fmt;

/// Index into a [`Players`] roster.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(usize);

impl PlayerId {
    #[inline]
    pub const fn to_index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    allies: Vec<PlayerId>,
    enemies: Vec<PlayerId>,
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The roster of everyone at the table.
///
/// The engine only reads relations: the embedding application decides
/// who allies with whom. An empty enemy set means "anyone who is not
/// an ally is an enemy", which is the default for every player.
/// A player is always its own ally.
#[derive(Debug, Clone, Default)]
pub struct Players(Vec<Player>);

impl Players {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>) -> PlayerId {
        let id = PlayerId(self.0.len());
        self.0.push(Player {
            name: name.into(),
            allies: vec![id],
            enemies: Vec::new(),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> &Player {
        &self.0[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.0.len()).map(PlayerId)
    }

    /// Declare `a` and `b` mutual allies.
    pub fn join_allies(&mut self, a: PlayerId, b: PlayerId) {
        if !self.0[a.0].allies.contains(&b) {
            self.0[a.0].allies.push(b);
        }
        if !self.0[b.0].allies.contains(&a) {
            self.0[b.0].allies.push(a);
        }
    }

    /// Declare `a` and `b` mutual enemies, overriding the default
    /// everyone-not-allied rule for both.
    pub fn join_enemies(&mut self, a: PlayerId, b: PlayerId) {
        if !self.0[a.0].enemies.contains(&b) {
            self.0[a.0].enemies.push(b);
        }
        if !self.0[b.0].enemies.contains(&a) {
            self.0[b.0].enemies.push(a);
        }
    }

    pub fn is_ally(&self, a: PlayerId, b: PlayerId) -> bool {
        self.0[a.0].allies.contains(&b)
    }

    pub fn allies(&self, id: PlayerId) -> &[PlayerId] {
        &self.0[id.0].allies
    }

    pub fn enemies(&self, id: PlayerId) -> Vec<PlayerId> {
        let explicit = &self.0[id.0].enemies;
        if !explicit.is_empty() {
            return explicit.clone();
        }
        self.ids().filter(|&other| !self.is_ally(id, other)).collect()
    }

    pub fn can_capture(&self, capturer: PlayerId, owner: PlayerId) -> bool {
        capturer != owner && !self.is_ally(capturer, owner)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player #{}", self.0)
    }
}
