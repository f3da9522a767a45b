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

//! The classical 8×8 game as a configuration of the general engine,
//! plus FEN export for two-dimensional boards.

use anyhow::{ensure, Result};

use crate::board::{Board, PieceKind, Players, Position, Rules};

use super::Game;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Game {
    /// Standard chess: an 8×8 two-dimensional board, the usual starting
    /// position, white advancing up the ranks and moving first.
    pub fn classical(white: impl Into<String>, black: impl Into<String>) -> Result<Game> {
        let mut players = Players::new();
        let white = players.add(white);
        let black = players.add(black);
        let rules = Rules::new(
            0,
            vec![
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight,
            ],
        )
        .with_player(white, Position::new([1, 0]), 7)
        .with_player(black, Position::new([-1, 0]), 0);

        let mut board = Board::new(8, 2);
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as i64;
            board.spawn_placed(kind, white, Position::new([0, file]));
            board.spawn_placed(PieceKind::Pawn, white, Position::new([1, file]));
            board.spawn_placed(kind, black, Position::new([7, file]));
            board.spawn_placed(PieceKind::Pawn, black, Position::new([6, file]));
        }
        Game::new(board, players, rules, vec![white, black])
    }

    /// Forsyth-Edwards notation of the current position. Only defined
    /// for two-dimensional boards; player 0 gets the uppercase letters
    /// and moves as "w". The halfmove clock counts movements since the
    /// last capture.
    pub fn to_fen(&self) -> Result<String> {
        ensure!(
            self.board.dims() == 2,
            "FEN is only defined for two-dimensional boards"
        );
        let size = self.board.size();
        let mut rows = Vec::with_capacity(size as usize);
        for rank in (0..size).rev() {
            let mut row = String::new();
            let mut run = 0;
            for file in 0..size {
                match self.board.occupant_unchecked(&Position::new([rank, file])) {
                    None => run += 1,
                    Some(id) => {
                        if run > 0 {
                            row.push_str(&run.to_string());
                            run = 0;
                        }
                        let piece = self.board.piece(id);
                        let letter = piece.kind().letter();
                        row.push(if piece.player().to_index() == 0 {
                            letter.to_ascii_uppercase()
                        } else {
                            letter.to_ascii_lowercase()
                        });
                    }
                }
            }
            if run > 0 {
                row.push_str(&run.to_string());
            }
            rows.push(row);
        }
        let placement = rows.join("/");
        let side = if self.turn.to_index() == 0 { 'w' } else { 'b' };
        let halfmoves = self.history.len() - self.last_capture;
        let fullmoves = self.history.len() / 2 + 1;
        Ok(format!(
            "{placement} {side} {} {} {halfmoves} {fullmoves}",
            self.castling_rights(),
            self.en_passant_target(),
        ))
    }

    /// The letters of the still-available castlings: a pair counts
    /// while both the king and that rook are unmoved.
    fn castling_rights(&self) -> String {
        let mut rights = String::new();
        for player in self.players.ids() {
            let Some(king) = self.board.king_of(player) else {
                continue;
            };
            if self.board.piece(king).moves_made() != 0 {
                continue;
            }
            let king_file = self.board.piece(king).position()[1];
            let mut kingside = false;
            let mut queenside = false;
            for &rook in self.board.pieces_of_kind(player, PieceKind::Rook) {
                if self.board.piece(rook).moves_made() != 0 {
                    continue;
                }
                if self.board.piece(rook).position()[1] > king_file {
                    kingside = true;
                } else {
                    queenside = true;
                }
            }
            let upper = player.to_index() == 0;
            if kingside {
                rights.push(if upper { 'K' } else { 'k' });
            }
            if queenside {
                rights.push(if upper { 'Q' } else { 'q' });
            }
        }
        if rights.is_empty() {
            rights.push('-');
        }
        rights
    }

    /// The square a just-double-advanced pawn skipped, or "-".
    fn en_passant_target(&self) -> String {
        let target = self.history.last().and_then(|last| {
            let piece = self.board.piece(last.piece());
            if piece.kind() != PieceKind::Pawn {
                return None;
            }
            let advance = self.rules.pawn_advance(piece.player())?;
            let step = last
                .steps()
                .iter()
                .find(|s| s.piece() == last.piece() && s.is_relocation())?;
            let (from, to) = (step.from()?, step.to()?);
            if to - from != advance * 2 {
                return None;
            }
            Some(format!("{}", from + advance))
        });
        target.unwrap_or_else(|| "-".to_string())
    }
}
