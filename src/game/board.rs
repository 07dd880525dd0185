//! リバーシゲームの盤面状態を管理するモジュール
//! 8x8グリッドの盤面と石の配置、操作を担当する。

use super::types::{Cell, Player, Position};
use serde::{Deserialize, Serialize};

/// 8x8リバーシ盤面を表現する構造体
/// 値型として扱い、コピーは全64マスを複製する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

impl Board {
    /// 新しいリバーシ盤面を作成する
    /// 中央の4マスに初期配置を設定する
    pub fn new() -> Self {
        let mut board = Self::empty();

        board.cells[3][3] = Cell::Occupied(Player::White);
        board.cells[3][4] = Cell::Occupied(Player::Black);
        board.cells[4][3] = Cell::Occupied(Player::Black);
        board.cells[4][4] = Cell::Occupied(Player::White);

        board
    }

    /// 石が一つもない盤面
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; 8]; 8],
        }
    }

    /// 指定した位置のセル状態を取得する
    /// 範囲外の場合はNoneを返す
    pub fn get_cell(&self, position: Position) -> Option<Cell> {
        if position.is_valid() {
            Some(self.cells[position.row][position.col])
        } else {
            None
        }
    }

    /// 指定した位置にセル状態を設定する
    /// 範囲外の場合はfalseを返す
    pub fn set_cell(&mut self, position: Position, cell: Cell) -> bool {
        if position.is_valid() {
            self.cells[position.row][position.col] = cell;
            true
        } else {
            false
        }
    }

    /// 指定した位置が空かチェックする
    pub fn is_empty(&self, position: Position) -> bool {
        matches!(self.get_cell(position), Some(Cell::Empty))
    }

    /// 指定プレイヤーの石の数
    pub fn count_stones(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_owned_by(player))
            .count()
    }

    /// 盤面上の黒石と白石の数を数える
    /// 戻り値: (黒石数, 白石数)
    pub fn count_pieces(&self) -> (usize, usize) {
        (
            self.count_stones(Player::Black),
            self.count_stones(Player::White),
        )
    }

    /// 全64マスが埋まっているか
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| *cell != Cell::Empty)
    }

    /// 行優先で全マスを走査する
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &cell)| (Position { row, col }, cell))
        })
    }

    /// 座標見出し付きの盤面文字列
    /// ●が黒、○が白、.が空マス
    pub fn display(&self) -> String {
        let mut text = String::from("  A B C D E F G H");

        for (position, cell) in self.cells() {
            if position.col == 0 {
                text.push_str(&format!("\n{}", position.row + 1));
            }
            text.push(' ');
            text.push(match cell {
                Cell::Empty => '.',
                Cell::Occupied(Player::Black) => '●',
                Cell::Occupied(Player::White) => '○',
            });
        }

        text.push('\n');
        text
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
