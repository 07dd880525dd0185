//! 探索サービスの抽象化層モジュール
//! 探索の実行場所（ワーカー、テスト用モックなど）を統一した
//! インターフェースで提供する。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::SearchError;
use crate::game::{Board, Player};

use super::search::{AlphaBetaSearch, SearchResult};

/// 探索の依頼内容
/// 盤面は値でコピーされるため、依頼後に履歴が変わっても影響しない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub board: Board,
    pub depth: u8,
    pub player: Player,
}

/// 探索結果と計算の統計情報
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub result: SearchResult,
    /// 思考時間（ミリ秒）
    pub thinking_time_ms: u64,
}

/// 探索サービスの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchServiceType {
    /// ブロッキングスレッドプールで実行するローカル探索
    Local,
    /// テスト用のモック
    Mock,
}

/// 探索サービスの統一インターフェース
#[async_trait]
pub trait SearchService: Send + Sync {
    /// 指定した局面の最善手を計算する
    async fn search(&self, request: SearchRequest) -> Result<SearchReport, SearchError>;

    /// サービスが利用可能かチェックする
    async fn is_available(&self) -> bool {
        true
    }

    /// サービス名を返す
    fn get_name(&self) -> &'static str;

    /// サービスの種類を返す
    fn get_service_type(&self) -> SearchServiceType;
}

/// αβ探索をブロッキングスレッドで実行するサービス
/// 呼び出し側のタスクを探索時間中ブロックしない
#[derive(Debug, Clone, Default)]
pub struct LocalSearchService;

impl LocalSearchService {
    pub fn new() -> Self {
        LocalSearchService
    }
}

#[async_trait]
impl SearchService for LocalSearchService {
    async fn search(&self, request: SearchRequest) -> Result<SearchReport, SearchError> {
        let start_time = Instant::now();

        let result = tokio::task::spawn_blocking(move || {
            AlphaBetaSearch::best_move(&request.board, request.depth, request.player)
        })
        .await
        .map_err(|e| SearchError::WorkerFailed {
            message: e.to_string(),
        })?;

        Ok(SearchReport {
            result,
            thinking_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    fn get_name(&self) -> &'static str {
        "LocalSearchService"
    }

    fn get_service_type(&self) -> SearchServiceType {
        SearchServiceType::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, ReversiRules};

    #[tokio::test]
    async fn test_local_search_service_creation() {
        let service = LocalSearchService::new();
        assert_eq!(service.get_name(), "LocalSearchService");
        assert_eq!(service.get_service_type(), SearchServiceType::Local);
        assert!(service.is_available().await);
    }

    #[tokio::test]
    async fn test_local_search_returns_legal_move() {
        let service = LocalSearchService::new();
        let board = Board::new();
        let request = SearchRequest { board, depth: 3, player: Player::Black };

        let report = service.search(request).await.unwrap();
        let position = report.result.position.unwrap();

        assert!(ReversiRules::valid_moves(&board, Player::Black).contains(&position));
        assert!(report.result.nodes > 0);
    }

    #[tokio::test]
    async fn test_local_search_matches_direct_search() {
        let service = LocalSearchService::new();
        let (board, _) = ReversiRules::apply_move(&Board::new(), Position::from_xy(2, 3).unwrap(), Player::Black);
        let request = SearchRequest { board, depth: 2, player: Player::White };

        let report = service.search(request).await.unwrap();
        assert_eq!(report.result, AlphaBetaSearch::best_move(&board, 2, Player::White));
    }

    #[test]
    fn test_service_type_serialization() {
        let service_type = SearchServiceType::Local;
        let serialized = serde_json::to_string(&service_type).unwrap();
        let deserialized: SearchServiceType = serde_json::from_str(&serialized).unwrap();
        assert_eq!(service_type, deserialized);
    }
}
