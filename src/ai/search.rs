//! αβ法による探索モジュール
//! 手番側（ルート）視点のみで評価する単純なミニマックスにαβ枝刈りを加える。

use serde::{Deserialize, Serialize};

use crate::game::{Board, Player, Position, ReversiRules};

use super::evaluation::BoardEvaluator;

/// 探索結果
/// positionがNoneの場合は候補手が見つからなかったことを表す
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub position: Option<Position>,
    pub score: i32,
    /// 評価した葉ノード数
    pub nodes: u64,
}

/// 深さ制限付きのαβ探索
#[derive(Debug, Clone)]
pub struct AlphaBetaSearch {
    root: Player,
    nodes: u64,
}

impl AlphaBetaSearch {
    /// 手番側を最大化する最善手を探索する
    /// 合法手がない場合はposition: Noneと静的評価値を返す
    pub fn best_move(board: &Board, depth: u8, player: Player) -> SearchResult {
        let mut search = AlphaBetaSearch { root: player, nodes: 0 };
        let (score, position) = search.alpha_beta(board, depth, player, i32::MIN, i32::MAX);

        SearchResult {
            position,
            score,
            nodes: search.nodes,
        }
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        side_to_move: Player,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<Position>) {
        let moves = if depth == 0 {
            Vec::new()
        } else {
            ReversiRules::valid_moves(board, side_to_move)
        };

        // 葉ノード: 常にルート側の視点で評価する
        if moves.is_empty() {
            self.nodes += 1;
            return (BoardEvaluator::score(board, self.root), None);
        }

        let maximizing = side_to_move == self.root;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_position = None;

        for position in moves {
            let (next, _) = ReversiRules::apply_move(board, position, side_to_move);
            let (score, _) = self.alpha_beta(&next, depth - 1, side_to_move.opponent(), alpha, beta);

            if maximizing {
                if score > best_score || best_position.is_none() {
                    best_score = score;
                    best_position = Some(position);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score || best_position.is_none() {
                    best_score = score;
                    best_position = Some(position);
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                break;
            }
        }

        (best_score, best_position)
    }
}
