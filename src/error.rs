//! アプリケーション全体のエラー定義モジュール
//! ゲームロジックと探索サービスのエラーを統一管理。

use thiserror::Error;

use crate::game::{Player, Position};

/// ゲームロジックに関連するエラー
/// いずれのエラーも状態を変更しないまま返される
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid move: {reason}")]
    InvalidMove { reason: String },

    #[error("Not a human turn: {player:?} is computer-controlled")]
    NotHumanTurn { player: Player },

    #[error("Not a computer turn: {player:?} is human-controlled")]
    NotComputerTurn { player: Player },

    #[error("Game already finished")]
    GameFinished,

    #[error("Cannot pass: {player:?} still has legal moves")]
    CannotPass { player: Player },

    #[error("Search depth {depth} is outside {min}..={max}")]
    InvalidDepth { depth: u8, min: u8, max: u8 },

    #[error("Search error: {source}")]
    Search {
        #[from]
        source: SearchError,
    },
}

impl GameError {
    pub(crate) fn invalid_move(position: Position, player: Player) -> Self {
        GameError::InvalidMove {
            reason: format!(
                "Position {} is not a valid move for {:?}",
                position.notation(),
                player
            ),
        }
    }
}

/// 探索サービスに関連するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("A search is already in progress")]
    Busy,

    #[error("No valid moves available")]
    NoValidMoves,

    #[error("Search worker failed: {message}")]
    WorkerFailed { message: String },
}

/// ゲームエラーをベースとした結果型
pub type Result<T> = std::result::Result<T, GameError>;
