//! AIの盤面評価システム
//! 探索の葉ノードで使う静的評価関数を提供する。
//! 固定の位置重みテーブルのみで評価し、可動性などの項は持たない。

use crate::game::{Board, Cell, Player};

/// マスごとの位置重み（行優先）
/// コーナーが最大、コーナー隣接が最小、辺は小さな正、内側はほぼ0か負
pub const POSITION_WEIGHTS: [[i32; 8]; 8] = [
    [100, -20, 10,  5,  5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [ 10,  -2, -1, -1, -1, -1,  -2,  10],
    [  5,  -2, -1, -1, -1, -1,  -2,   5],
    [  5,  -2, -1, -1, -1, -1,  -2,   5],
    [ 10,  -2, -1, -1, -1, -1,  -2,  10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10,  5,  5, 10, -20, 100],
];

/// 盤面評価を行うスタティックメソッド集
pub struct BoardEvaluator;

impl BoardEvaluator {
    /// 指定したプレイヤーにとっての盤面評価値
    /// 自分の石の重み合計 - 相手の石の重み合計。正の値が有利
    pub fn score(board: &Board, player: Player) -> i32 {
        board
            .cells()
            .map(|(position, cell)| {
                let weight = POSITION_WEIGHTS[position.row][position.col];
                match cell {
                    Cell::Occupied(owner) if owner == player => weight,
                    Cell::Occupied(_) => -weight,
                    Cell::Empty => 0,
                }
            })
            .sum()
    }
}
