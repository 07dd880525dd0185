//! リバーシのルール実装モジュール
//! 合法手の判定と石のフリップ処理を担当する。
//! ゲーム終了の判定はセッション側の責務とし、ここでは純粋な盤面操作のみを扱う。

use super::board::Board;
use super::types::{Cell, Player, Position};

/// 盤面上の8方向への移動ベクトル
/// 探索順は固定で、フリップ座標の並びもこの順になる
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),  // 左上、上、右上
    (0, -1),           (0, 1),   // 左、右
    (1, -1),  (1, 0),  (1, 1),   // 左下、下、右下
];

/// リバーシのルールを実装する構造体
/// スタティックメソッドのみを提供する
pub struct ReversiRules;

impl ReversiRules {
    /// 指定した位置に石を置けるかチェックする
    /// 空のマスで、かつ相手の石を少なくとも1個フリップできる必要がある
    pub fn is_valid_move(board: &Board, position: Position, player: Player) -> bool {
        if !board.is_empty(position) {
            return false;
        }

        DIRECTIONS
            .iter()
            .any(|&direction| !Self::captured_line(board, position, player, direction).is_empty())
    }

    /// 一方向に沿って挟める相手の石の列を返す
    /// 自分の石で終端されない場合は空
    fn captured_line(board: &Board, position: Position, player: Player, (dr, dc): (i8, i8)) -> Vec<Position> {
        let mut line = Vec::new();
        let mut row = position.row as i8 + dr;
        let mut col = position.col as i8 + dc;

        while (0..8).contains(&row) && (0..8).contains(&col) {
            let current = Position {
                row: row as usize,
                col: col as usize,
            };

            match board.get_cell(current) {
                Some(Cell::Occupied(owner)) if owner == player.opponent() => line.push(current),
                Some(Cell::Occupied(_)) => return line,
                _ => break,
            }

            row += dr;
            col += dc;
        }

        Vec::new()
    }

    /// 指定した位置に石を置いた場合にフリップされる石の位置を返す
    pub fn get_flipped_positions(board: &Board, position: Position, player: Player) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .flat_map(|&direction| Self::captured_line(board, position, player, direction))
            .collect()
    }

    /// 指定したプレイヤーの合法手を全て取得する
    /// 行優先で走査するため、返す順序は探索のタイブレークにも使われる
    pub fn valid_moves(board: &Board, player: Player) -> Vec<Position> {
        board
            .cells()
            .filter(|&(position, _)| Self::is_valid_move(board, position, player))
            .map(|(position, _)| position)
            .collect()
    }

    /// 石を置いて挟んだ石を裏返した新しい盤面を返す
    /// 元の盤面は変更しない。合法性の再検証は行わない
    pub fn apply_move(board: &Board, position: Position, player: Player) -> (Board, Vec<Position>) {
        let flipped = Self::get_flipped_positions(board, position, player);
        let mut next = *board;

        next.set_cell(position, Cell::Occupied(player));
        for flip in &flipped {
            next.set_cell(*flip, Cell::Occupied(player));
        }

        (next, flipped)
    }

    /// 指定したプレイヤーの石の数
    pub fn count_stones(board: &Board, player: Player) -> usize {
        board.count_stones(player)
    }

    /// 指定したプレイヤーに合法手があるかチェックする
    pub fn has_valid_moves(board: &Board, player: Player) -> bool {
        board
            .cells()
            .any(|(position, _)| Self::is_valid_move(board, position, player))
    }

    /// 最終スコアに基づいて勝者を決定する
    /// 同数の場合はNone（引き分け）を返す
    pub fn determine_winner(board: &Board) -> Option<Player> {
        let (black_count, white_count) = board.count_pieces();

        if black_count > white_count {
            Some(Player::Black)
        } else if white_count > black_count {
            Some(Player::White)
        } else {
            None
        }
    }
}
