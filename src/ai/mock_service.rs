use async_trait::async_trait;
use std::time::Instant;
use tokio::time::{sleep, Duration};

use crate::error::SearchError;
use crate::game::{Position, ReversiRules};

use super::evaluation::BoardEvaluator;
use super::search::SearchResult;
use super::service::{SearchReport, SearchRequest, SearchService, SearchServiceType};

#[derive(Debug, Clone)]
pub struct MockSearchConfig {
    pub available: bool,
    pub response_time_ms: u64,
    pub should_error: bool,
    /// 合法なら優先して返す手
    pub fixed_move: Option<Position>,
    /// 候補手なしの結果を返す
    pub return_no_move: bool,
}

impl Default for MockSearchConfig {
    fn default() -> Self {
        Self {
            available: true,
            response_time_ms: 0,
            should_error: false,
            fixed_move: None,
            return_no_move: false,
        }
    }
}

/// 応答時間や返す手を制御できるテスト用の探索サービス
/// 既定では最初の合法手を返す
#[derive(Debug, Clone)]
pub struct MockSearchService {
    config: MockSearchConfig,
}

impl MockSearchService {
    pub fn new(config: MockSearchConfig) -> Self {
        Self { config }
    }

    pub fn new_default() -> Self {
        Self::new(MockSearchConfig::default())
    }

    pub fn new_delayed(response_time_ms: u64) -> Self {
        Self::new(MockSearchConfig {
            response_time_ms,
            ..MockSearchConfig::default()
        })
    }

    pub fn new_with_fixed_move(position: Position) -> Self {
        Self::new(MockSearchConfig {
            fixed_move: Some(position),
            ..MockSearchConfig::default()
        })
    }

    pub fn new_no_move() -> Self {
        Self::new(MockSearchConfig {
            return_no_move: true,
            ..MockSearchConfig::default()
        })
    }

    pub fn new_error() -> Self {
        Self::new(MockSearchConfig {
            should_error: true,
            ..MockSearchConfig::default()
        })
    }
}

#[async_trait]
impl SearchService for MockSearchService {
    async fn search(&self, request: SearchRequest) -> Result<SearchReport, SearchError> {
        let start_time = Instant::now();

        if !self.config.available {
            return Err(SearchError::WorkerFailed {
                message: "Mock search service is configured as unavailable".to_string(),
            });
        }

        if self.config.response_time_ms > 0 {
            sleep(Duration::from_millis(self.config.response_time_ms)).await;
        }

        if self.config.should_error {
            return Err(SearchError::WorkerFailed {
                message: "Mock search error".to_string(),
            });
        }

        let valid_moves = ReversiRules::valid_moves(&request.board, request.player);
        let position = if self.config.return_no_move {
            None
        } else {
            match self.config.fixed_move {
                Some(fixed) if valid_moves.contains(&fixed) => Some(fixed),
                _ => valid_moves.first().copied(),
            }
        };

        Ok(SearchReport {
            result: SearchResult {
                position,
                score: BoardEvaluator::score(&request.board, request.player),
                nodes: valid_moves.len() as u64,
            },
            thinking_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    async fn is_available(&self) -> bool {
        self.config.available
    }

    fn get_name(&self) -> &'static str {
        "MockSearchService"
    }

    fn get_service_type(&self) -> SearchServiceType {
        SearchServiceType::Mock
    }
}
