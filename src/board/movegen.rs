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

//! Pseudo-legal move generation, parameterized by per-player [`Rules`].
//!
//! "Pseudo-legal" means geometry, occupancy and capture permissions are
//! honored but king exposure is not; the game layer filters for that.
//! All movement patterns generalize to any dimension count: rook lines
//! run along one axis, diagonals pair two axes, knights jump 2-then-1
//! across any ordered axis pair, and kings step one square in Chebyshev
//! distance.

use std::collections::HashMap;

use super::movement::Movement;
use super::piece::{PieceId, PieceKind};
use super::player::{PlayerId, Players};
use super::position::Position;
use super::Board;

/// Per-player movement conventions that piece geometry alone cannot
/// decide: which way pawns advance, where they promote, and to what.
#[derive(Debug, Clone)]
pub struct Rules {
    pawn_advance: HashMap<PlayerId, Position>,
    promotion_axis: usize,
    promotion_rank: HashMap<PlayerId, i64>,
    promotion_kinds: Vec<PieceKind>,
}

impl Rules {
    pub fn new(promotion_axis: usize, promotion_kinds: Vec<PieceKind>) -> Self {
        Self {
            pawn_advance: HashMap::new(),
            promotion_axis,
            promotion_rank: HashMap::new(),
            promotion_kinds,
        }
    }

    pub fn with_player(mut self, player: PlayerId, advance: Position, promotion_rank: i64) -> Self {
        self.pawn_advance.insert(player, advance);
        self.promotion_rank.insert(player, promotion_rank);
        self
    }

    pub fn pawn_advance(&self, player: PlayerId) -> Option<&Position> {
        self.pawn_advance.get(&player)
    }

    #[inline]
    pub fn promotion_axis(&self) -> usize {
        self.promotion_axis
    }

    pub fn promotion_rank(&self, player: PlayerId) -> Option<i64> {
        self.promotion_rank.get(&player).copied()
    }

    pub fn promotion_kinds(&self) -> &[PieceKind] {
        &self.promotion_kinds
    }

    fn promotes_at(&self, player: PlayerId, pos: &Position) -> bool {
        self.promotion_rank(player) == Some(pos[self.promotion_axis])
    }
}

/// Everything move generation needs besides the board itself.
pub struct RulesCtx<'a> {
    pub players: &'a Players,
    pub rules: &'a Rules,
    /// The most recent movement of the whole game, for the en passant
    /// window.
    pub last_move: Option<&'a Movement>,
}

/// Every pseudo-legal movement of one piece.
///
/// Needs `&mut Board` because castling asks attack queries through a
/// sentinel; the board is exactly as it was on return.
pub fn pseudo_moves(ctx: &RulesCtx, board: &mut Board, id: PieceId) -> Vec<Movement> {
    let mut out = Vec::new();
    match board.piece(id).kind() {
        PieceKind::Rook => slide(ctx, board, id, &rook_directions(board.dims()), &mut out),
        PieceKind::Bishop => slide(ctx, board, id, &bishop_directions(board.dims()), &mut out),
        PieceKind::Queen => {
            slide(ctx, board, id, &rook_directions(board.dims()), &mut out);
            slide(ctx, board, id, &bishop_directions(board.dims()), &mut out);
        }
        PieceKind::Knight => hop(ctx, board, id, &knight_offsets(board.dims()), &mut out),
        PieceKind::King => {
            hop(ctx, board, id, &king_offsets(board.dims()), &mut out);
            castling_moves(ctx, board, id, &mut out);
        }
        PieceKind::Pawn => pawn_moves(ctx, board, id, &mut out),
        PieceKind::Sentinel => {}
    }
    out
}

/// Pseudo-legal movements of `id` landing on `dest`. Promotion returns
/// one candidate per promotable kind.
pub fn candidates_for(
    ctx: &RulesCtx,
    board: &mut Board,
    id: PieceId,
    dest: &Position,
) -> Vec<Movement> {
    let mut moves = pseudo_moves(ctx, board, id);
    moves.retain(|mv| mv.destination() == dest);
    moves
}

/// Does `id` attack `pos` with a capture-shaped movement?
///
/// This is the read-only core of the check test: pawn forward steps and
/// castling never capture, so they are not consulted. Sliding pieces
/// additionally need the line between them and `pos` to be clear.
pub fn targets(
    board: &Board,
    players: &Players,
    rules: &Rules,
    id: PieceId,
    pos: &Position,
) -> bool {
    if !board.can_capture(players, id, pos) {
        return false;
    }
    let piece = board.piece(id);
    let diff = pos - piece.position();
    match piece.kind() {
        PieceKind::Rook => is_rook_line(&diff) && line_is_clear(board, piece.position(), pos),
        PieceKind::Bishop => is_bishop_line(&diff) && line_is_clear(board, piece.position(), pos),
        PieceKind::Queen => {
            (is_rook_line(&diff) || is_bishop_line(&diff))
                && line_is_clear(board, piece.position(), pos)
        }
        PieceKind::Knight => is_knight_jump(&diff),
        PieceKind::King => diff.coords().iter().all(|c| c.abs() <= 1) && !diff.is_zero(),
        PieceKind::Pawn => match rules.pawn_advance(piece.player()) {
            Some(advance) => is_pawn_capture(&diff, advance),
            None => false,
        },
        PieceKind::Sentinel => false,
    }
}

fn is_rook_line(diff: &Position) -> bool {
    diff.coords().iter().filter(|&&c| c != 0).count() == 1
}

fn is_bishop_line(diff: &Position) -> bool {
    let nonzero: Vec<i64> = diff
        .coords()
        .iter()
        .filter(|&&c| c != 0)
        .map(|c| c.abs())
        .collect();
    nonzero.len() == 2 && nonzero[0] == nonzero[1]
}

fn is_knight_jump(diff: &Position) -> bool {
    let mut nonzero: Vec<i64> = diff
        .coords()
        .iter()
        .filter(|&&c| c != 0)
        .map(|c| c.abs())
        .collect();
    nonzero.sort_unstable();
    nonzero == [1, 2]
}

/// Diagonal forward step: the advance vector plus one lateral unit.
fn is_pawn_capture(diff: &Position, advance: &Position) -> bool {
    let lateral = diff - advance;
    let nonzero: Vec<(usize, i64)> = lateral
        .coords()
        .iter()
        .enumerate()
        .filter(|(_, &c)| c != 0)
        .map(|(axis, &c)| (axis, c.abs()))
        .collect();
    matches!(nonzero.as_slice(), [(axis, 1)] if advance[*axis] == 0)
}

fn line_is_clear(board: &Board, from: &Position, to: &Position) -> bool {
    match board.path_between(from, to) {
        Ok(between) => between
            .iter()
            .all(|step| board.occupant_unchecked(step).is_none()),
        Err(_) => false,
    }
}

fn rook_directions(dims: usize) -> Vec<Position> {
    let mut dirs = Vec::with_capacity(2 * dims);
    for axis in 0..dims {
        for sign in [1, -1] {
            dirs.push(Position::zero(dims).replace(axis, sign));
        }
    }
    dirs
}

fn bishop_directions(dims: usize) -> Vec<Position> {
    let mut dirs = Vec::new();
    for a in 0..dims {
        for b in (a + 1)..dims {
            for sa in [1, -1] {
                for sb in [1, -1] {
                    dirs.push(Position::zero(dims).replace(a, sa).replace(b, sb));
                }
            }
        }
    }
    dirs
}

fn knight_offsets(dims: usize) -> Vec<Position> {
    let mut offsets = Vec::new();
    for a in 0..dims {
        for b in 0..dims {
            if a == b {
                continue;
            }
            for sa in [2, -2] {
                for sb in [1, -1] {
                    offsets.push(Position::zero(dims).replace(a, sa).replace(b, sb));
                }
            }
        }
    }
    offsets
}

/// Every non-zero vector in `{-1, 0, 1}^dims`, enumerated base-3.
fn king_offsets(dims: usize) -> Vec<Position> {
    let count = 3usize.pow(dims as u32);
    let mut offsets = Vec::with_capacity(count - 1);
    for mut n in 0..count {
        let mut coords = Vec::with_capacity(dims);
        for _ in 0..dims {
            coords.push((n % 3) as i64 - 1);
            n /= 3;
        }
        let offset = Position::new(coords);
        if !offset.is_zero() {
            offsets.push(offset);
        }
    }
    offsets
}

/// Walk each direction until the edge or a blocker, including a final
/// capture square when the blocker is capturable.
fn slide(ctx: &RulesCtx, board: &Board, id: PieceId, dirs: &[Position], out: &mut Vec<Movement>) {
    let origin = board.piece(id).position().clone();
    let player = board.piece(id).player();
    for dir in dirs {
        let mut current = &origin + dir;
        while board.is_inside(&current) {
            match board.occupant_unchecked(&current) {
                None => out.push(Movement::basic(board, ctx.players, id, current.clone())),
                Some(target) => {
                    if ctx.players.can_capture(player, board.piece(target).player()) {
                        out.push(Movement::basic(board, ctx.players, id, current.clone()));
                    }
                    break;
                }
            }
            current = &current + dir;
        }
    }
}

fn hop(ctx: &RulesCtx, board: &Board, id: PieceId, offsets: &[Position], out: &mut Vec<Movement>) {
    let origin = board.piece(id).position().clone();
    for offset in offsets {
        let dest = &origin + offset;
        if board.is_inside(&dest) && board.can_capture_or_move(ctx.players, id, &dest) {
            out.push(Movement::basic(board, ctx.players, id, dest));
        }
    }
}

/// Castling between an unmoved king and each unmoved castlable partner
/// on a clear shared line, provided no square the king starts on,
/// crosses or lands on is attacked.
fn castling_moves(ctx: &RulesCtx, board: &mut Board, king: PieceId, out: &mut Vec<Movement>) {
    if board.piece(king).moves_made() != 0 {
        return;
    }
    let player = board.piece(king).player();
    let partners: Vec<PieceId> = board
        .pieces_of(player)
        .filter(|&id| id != king)
        .filter(|&id| {
            board.piece(id).kind().is_castlable() && board.piece(id).moves_made() == 0
        })
        .collect();
    for partner in partners {
        let Ok(mv) = Movement::castling(board, king, partner) else {
            continue;
        };
        let king_pos = board.piece(king).position().clone();
        let partner_pos = board.piece(partner).position().clone();
        if !line_is_clear(board, &king_pos, &partner_pos) {
            continue;
        }
        let unit = (&partner_pos - &king_pos).signum();
        let transit = [king_pos.clone(), &king_pos + &unit, &king_pos + &(&unit * 2)];
        let safe = transit
            .iter()
            .all(|square| !board.would_be_captured(ctx.players, ctx.rules, square, player));
        if safe {
            out.push(mv);
        }
    }
}

fn pawn_moves(ctx: &RulesCtx, board: &mut Board, id: PieceId, out: &mut Vec<Movement>) {
    let Some(advance) = ctx.rules.pawn_advance(board.piece(id).player()) else {
        return;
    };
    let advance = advance.clone();
    let origin = board.piece(id).position().clone();
    let player = board.piece(id).player();

    let forward = &origin + &advance;
    if board.is_inside(&forward) && board.occupant_unchecked(&forward).is_none() {
        push_advance(ctx, board, id, forward.clone(), out);

        // double advance off the starting square, both squares clear
        if board.piece(id).moves_made() == 0 {
            let double = &forward + &advance;
            if board.is_inside(&double) && board.occupant_unchecked(&double).is_none() {
                out.push(Movement::basic(board, ctx.players, id, double));
            }
        }
    }

    for axis in 0..board.dims() {
        if advance[axis] != 0 {
            continue;
        }
        for sign in [1, -1] {
            let side = origin.replace(axis, origin[axis] + sign);
            let dest = &side + &advance;
            if board.is_outside(&dest) {
                continue;
            }
            if board.can_capture(ctx.players, id, &dest) {
                push_advance(ctx, board, id, dest, out);
                continue;
            }
            if board.occupant_unchecked(&dest).is_some() {
                continue;
            }
            if let Some(victim) = en_passant_victim(ctx, board, player, &side, &dest) {
                out.push(Movement::en_passant(board, id, dest, victim));
            }
        }
    }
}

/// A forward landing: fans out over the promotable kinds when the
/// destination sits on the player's promotion rank.
fn push_advance(
    ctx: &RulesCtx,
    board: &mut Board,
    id: PieceId,
    dest: Position,
    out: &mut Vec<Movement>,
) {
    let player = board.piece(id).player();
    if ctx.rules.promotes_at(player, &dest) {
        for kind in ctx.rules.promotion_kinds().to_vec() {
            out.push(Movement::promotion(board, ctx.players, id, dest.clone(), kind));
        }
    } else {
        out.push(Movement::basic(board, ctx.players, id, dest));
    }
}

/// The pawn beside us that just double-advanced past `dest`, if the en
/// passant window is open: it must be an enemy pawn on its first move,
/// and the game's most recent movement must be exactly its double step.
fn en_passant_victim(
    ctx: &RulesCtx,
    board: &Board,
    player: PlayerId,
    side: &Position,
    dest: &Position,
) -> Option<PieceId> {
    let victim = board.occupant_unchecked(side)?;
    let piece = board.piece(victim);
    if piece.kind() != PieceKind::Pawn
        || !ctx.players.can_capture(player, piece.player())
        || piece.moves_made() != 1
    {
        return None;
    }
    let last = ctx.last_move?;
    if last.piece() != victim {
        return None;
    }
    let step = last
        .steps()
        .iter()
        .find(|s| s.piece() == victim && s.is_relocation())?;
    let travelled = step.to()? - step.from()?;
    let their_advance = ctx.rules.pawn_advance(piece.player())?;
    if &travelled != &(their_advance * 2) {
        return None;
    }
    // land exactly on the square the victim skipped
    let skipped = step.from()? + their_advance;
    (&skipped == dest).then_some(victim)
}
