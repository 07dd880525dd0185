//! ゲームの基本型定義モジュール
//! リバーシゲームで使用される基本的な型とenum、構造体を定義する。

use serde::{Deserialize, Serialize};

/// ゲームのプレイヤーを表すenum
/// 先手は黒、後手は白
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// 相手プレイヤーを返す
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// 手番ごとの設定配列へのインデックス
    pub fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }

    /// 表示用のラベル
    pub fn label(self) -> &'static str {
        match self {
            Player::Black => "Black",
            Player::White => "White",
        }
    }
}

/// 盤面の各マスの状態を表現するenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    /// 指定プレイヤーの石が置かれているか
    pub fn is_owned_by(self, player: Player) -> bool {
        self == Cell::Occupied(player)
    }
}

/// 各プレイヤーの操作主体
/// 人間か、探索エンジンによるコンピュータか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlType {
    Human,
    Computer,
}

/// 8x8リバーシ盤面上の座標を表す構造体
/// row, colともに0-7の範囲で有効。x = col, y = row として扱う
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// 範囲チェック付きのコンストラクタ
    /// 8x8盤面の範囲外の座標の場合はNoneを返す
    pub fn new(row: usize, col: usize) -> Option<Position> {
        if row < 8 && col < 8 {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// (x, y) 座標から作成する
    pub fn from_xy(x: usize, y: usize) -> Option<Position> {
        Self::new(y, x)
    }

    pub fn x(&self) -> usize {
        self.col
    }

    pub fn y(&self) -> usize {
        self.row
    }

    /// 座標が有効範囲内かチェックする
    pub fn is_valid(&self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// 棋譜表記（列A-H + 行1-8）に変換する
    pub fn notation(&self) -> String {
        let column = (b'A' + self.col as u8) as char;
        format!("{}{}", column, self.row + 1)
    }

    /// "D3" のような棋譜表記を解析する
    /// 大文字小文字は区別しない
    pub fn parse_notation(text: &str) -> Option<Position> {
        let mut chars = text.trim().chars();
        let column = chars.next()?.to_ascii_uppercase();
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        let row: usize = digits.parse().ok()?;

        if !('A'..='H').contains(&column) || row == 0 {
            return None;
        }

        Self::new(row - 1, (column as u8 - b'A') as usize)
    }
}
