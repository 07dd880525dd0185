//! 手番進行モジュール
//! 状態遷移のたびに次の手番を判定し、コンピュータの手番では探索をワーカーに依頼する。
//! 探索結果はチャネル経由でこの構造体に戻り、セッションへの反映は常にここで行う。

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use crate::ai::{SearchReport, SearchService};
use crate::error::{Result, SearchError};
use crate::game::{ControlType, Player, Position, ReversiRules};

use super::game_session::{GameSession, SearchPurpose, SearchResolution, SearchTicket};

/// 進行判定の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// 人間の着手待ち
    AwaitingHuman(Player),
    /// 探索の結果待ち
    Searching,
    /// 過去局面の閲覧中のため進行しない
    Browsing,
    /// 終局
    Finished,
}

/// ワーカーから戻る探索結果
#[derive(Debug)]
pub struct SearchMessage {
    pub ticket: SearchTicket,
    pub outcome: std::result::Result<SearchReport, SearchError>,
}

/// セッションを所有し、コンピュータの手番を自動で進める
/// 探索はtokio::spawnで起動するため、操作はtokioランタイム上で呼び出すこと
pub struct TurnOrchestrator {
    session: GameSession,
    search_service: Arc<dyn SearchService>,
    sender: mpsc::UnboundedSender<SearchMessage>,
    receiver: mpsc::UnboundedReceiver<SearchMessage>,
}

impl std::fmt::Debug for TurnOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnOrchestrator")
            .field("session", &self.session.id)
            .field("search_service", &self.search_service.get_name())
            .finish()
    }
}

impl TurnOrchestrator {
    pub fn new(session: GameSession, search_service: Arc<dyn SearchService>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            session,
            search_service,
            sender,
            receiver,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// 現在の局面から進められるところまで進める
    /// 合法手のない手番はパスし、コンピュータの手番では探索を依頼する
    pub fn advance(&mut self) -> TurnState {
        loop {
            if self.session.is_finished() {
                return TurnState::Finished;
            }

            if !self.session.is_at_frontier() {
                return TurnState::Browsing;
            }

            let player = self.session.current_player();
            let control = self.session.control(player);

            if !ReversiRules::has_valid_moves(self.session.board(), player) {
                if let Err(e) = self.session.pass() {
                    warn!(error = %e, "pass rejected");
                    return TurnState::Finished;
                }
                continue;
            }

            if control == ControlType::Human {
                return TurnState::AwaitingHuman(player);
            }

            if !self.session.is_searching() {
                if let Err(e) = self.dispatch(SearchPurpose::Move) {
                    warn!(error = %e, "search could not be started");
                }
            }
            return TurnState::Searching;
        }
    }

    /// 探索をワーカーで開始する
    fn dispatch(&mut self, purpose: SearchPurpose) -> Result<()> {
        let (ticket, request) = self.session.begin_search(purpose)?;
        let service = Arc::clone(&self.search_service);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let outcome = service.search(request).await;
            if sender.send(SearchMessage { ticket, outcome }).is_err() {
                debug!("orchestrator dropped before search finished");
            }
        });

        Ok(())
    }

    /// 届いた探索結果を反映して進行を再判定する
    pub fn handle_message(&mut self, message: SearchMessage) -> (SearchResolution, TurnState) {
        let resolution = self.session.finish_search(message.ticket, message.outcome);
        (resolution, self.advance())
    }

    /// 次の探索結果を待って反映する
    pub async fn next_resolution(&mut self) -> Option<(SearchResolution, TurnState)> {
        let message = self.receiver.recv().await?;
        Some(self.handle_message(message))
    }

    /// 人間の手番、閲覧中、または終局まで進める
    /// 両者がコンピュータなら終局まで自動で対局が続く
    #[instrument(skip(self), fields(session = %self.session.id))]
    pub async fn run_until_idle(&mut self) -> TurnState {
        let mut state = self.advance();
        while state == TurnState::Searching && self.session.is_searching() {
            match self.next_resolution().await {
                Some((_, next)) => state = next,
                None => break,
            }
        }
        state
    }

    // ---- 表示層向けの操作 ----

    /// 人間の着手
    pub fn place(&mut self, position: Position) -> Result<TurnState> {
        self.session.apply_human_move(position)?;
        Ok(self.advance())
    }

    /// 人間の手番でヒントの探索を開始する
    pub fn request_hint(&mut self) -> Result<()> {
        self.dispatch(SearchPurpose::Hint)
    }

    pub fn withdraw_hint(&mut self) {
        self.session.withdraw_hint();
    }

    pub fn undo(&mut self) -> TurnState {
        self.session.undo();
        self.advance()
    }

    pub fn redo(&mut self) -> TurnState {
        self.session.redo();
        self.advance()
    }

    pub fn reset(&mut self) -> TurnState {
        self.session.reset();
        self.advance()
    }

    pub fn set_control(&mut self, player: Player, control: ControlType) -> TurnState {
        self.session.set_control(player, control);
        self.advance()
    }

    pub fn set_search_depth(&mut self, depth: u8) -> Result<()> {
        self.session.set_search_depth(depth)
    }
}
