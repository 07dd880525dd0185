//! ゲームの進行状態モジュール
//! 盤面から手番待ち/終局を判定し、終局時の結果を表現する。

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::rules::ReversiRules;
use super::types::Player;

/// 初期配置の4石を除いた最大着手数
pub const MAX_PLACEMENTS: usize = 60;

/// 終局時の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
    /// 探索が候補手を返せなかった場合
    NoMoveFound,
}

impl GameOutcome {
    /// 表示用の結果テキスト
    pub fn text(&self) -> String {
        match self {
            GameOutcome::Winner(player) => format!("{} wins", player.label()),
            GameOutcome::Draw => "Draw".to_string(),
            GameOutcome::NoMoveFound => "No move found".to_string(),
        }
    }
}

/// ゲームの進行状態を表すenum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 指定プレイヤーの着手待ち
    AwaitingMove(Player),
    /// 終局（結果と最終スコアを記録）
    Finished {
        outcome: GameOutcome,
        score: (usize, usize),
    },
}

impl GameStatus {
    /// 盤面と手番から状態を判定する
    /// どちらかの石が0個、または両者とも合法手がなければ終局
    pub fn evaluate(board: &Board, side_to_move: Player) -> Self {
        let score = board.count_pieces();
        let wiped_out = score.0 == 0 || score.1 == 0;
        let blocked = board.is_full()
            || (!ReversiRules::has_valid_moves(board, Player::Black)
                && !ReversiRules::has_valid_moves(board, Player::White));

        if wiped_out || blocked {
            let outcome = match ReversiRules::determine_winner(board) {
                Some(winner) => GameOutcome::Winner(winner),
                None => GameOutcome::Draw,
            };
            GameStatus::Finished { outcome, score }
        } else {
            GameStatus::AwaitingMove(side_to_move)
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Finished { .. })
    }

    /// 終局時のみ結果テキストを返す
    pub fn result_text(&self) -> Option<String> {
        match self {
            GameStatus::Finished { outcome, .. } => Some(outcome.text()),
            GameStatus::AwaitingMove(_) => None,
        }
    }
}

/// 初期4石を除いた着手済みの石数（情報表示用）
pub fn placements(board: &Board) -> usize {
    let (black, white) = board.count_pieces();
    (black + white).saturating_sub(4)
}
