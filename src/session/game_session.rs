//! 対局セッション管理モジュール
//! 履歴・手番・操作主体・ヒントなど対局の状態を一元管理し、
//! 表示層向けの問い合わせと、着手/パス/アンドゥ/リドゥなどの操作を提供する。

use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::ai::{SearchReport, SearchRequest};
use crate::config::Config;
use crate::error::{GameError, Result, SearchError};
use crate::game::{
    Board, ControlType, GameOutcome, GameStatus, History, MoveRecord, Player, Position, ReversiRules,
};

/// 探索の用途
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPurpose {
    /// コンピュータの着手
    Move,
    /// 人間へのヒント（履歴は変更しない）
    Hint,
}

/// 探索開始時の局面を識別する札
/// 結果が届いた時点で一致しなければその結果は破棄される
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub cursor: usize,
    pub player: Player,
    pub purpose: SearchPurpose,
}

/// 探索結果を反映した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResolution {
    /// コンピュータの手を適用した
    Applied(Position),
    /// ヒントを設定した（候補なしの場合はNone）
    HintReady(Option<Position>),
    /// 候補手がなく終局扱いにした
    NoMoveFound,
    /// 局面が変わっていたため破棄した
    Stale,
}

/// 棋譜の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLogEntry {
    pub mover: Player,
    pub by_computer: bool,
    /// 棋譜表記、パスの場合は"PASS"
    pub notation: String,
}

impl fmt::Display for MoveLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.mover.label(), self.notation)
    }
}

/// 1局分の対局セッション
/// 全ての変更はこの構造体を所有する単一のシーケンスから行う
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: Uuid,
    history: History,
    controls: [ControlType; 2],
    search_depth: u8,
    min_search_depth: u8,
    max_search_depth: u8,
    status: GameStatus,
    hint: Option<Position>,
    searching: Option<SearchTicket>,
    last_flipped: Vec<Position>,
    /// 履歴が変化するたびに増える世代番号
    generation: u64,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl GameSession {
    /// 操作主体と探索深度を指定して新しい対局を作成する
    /// 深度は既定の範囲（1..=5）外ならエラー
    pub fn new(black: ControlType, white: ControlType, search_depth: u8) -> Result<Self> {
        let mut session = Self::with_depth_range(black, white, 1, 5);
        session.set_search_depth(search_depth)?;
        Ok(session)
    }

    /// 設定から対局を作成する
    pub fn from_config(config: &Config) -> Result<Self> {
        let limits = &config.system_limits;
        let mut session = Self::with_depth_range(
            config.engine.black,
            config.engine.white,
            limits.min_search_depth,
            limits.max_search_depth,
        );
        session.set_search_depth(config.engine.search_depth)?;
        Ok(session)
    }

    fn with_depth_range(black: ControlType, white: ControlType, min_search_depth: u8, max_search_depth: u8) -> Self {
        let history = History::new();
        let status = GameStatus::evaluate(&history.current().board, history.current().next_player);

        Self {
            id: Uuid::new_v4(),
            history,
            controls: [black, white],
            search_depth: min_search_depth,
            min_search_depth,
            max_search_depth,
            status,
            hint: None,
            searching: None,
            last_flipped: Vec::new(),
            generation: 0,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    // ---- 問い合わせ ----

    pub fn board(&self) -> &Board {
        &self.history.current().board
    }

    pub fn current_player(&self) -> Player {
        self.history.current().next_player
    }

    /// (黒石数, 白石数)
    pub fn stone_counts(&self) -> (usize, usize) {
        self.board().count_pieces()
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn result_text(&self) -> Option<String> {
        self.status.result_text()
    }

    /// 手番側の合法手。終局後は空
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.is_finished() {
            return Vec::new();
        }
        ReversiRules::valid_moves(self.board(), self.current_player())
    }

    /// 直前の着手で裏返った石
    pub fn last_flipped(&self) -> &[Position] {
        &self.last_flipped
    }

    pub fn hint(&self) -> Option<Position> {
        self.hint
    }

    pub fn can_undo(&self) -> bool {
        self.history.cursor() > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.history.is_at_tail()
    }

    pub fn is_searching(&self) -> bool {
        self.searching.is_some()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// カーソルが最新局面にあるか（過去局面の閲覧中でないか）
    pub fn is_at_frontier(&self) -> bool {
        self.history.is_at_tail()
    }

    pub fn control(&self, player: Player) -> ControlType {
        self.controls[player.index()]
    }

    pub fn search_depth(&self) -> u8 {
        self.search_depth
    }

    pub fn depth_range(&self) -> (u8, u8) {
        (self.min_search_depth, self.max_search_depth)
    }

    fn all_computer(&self) -> bool {
        self.controls.iter().all(|control| *control == ControlType::Computer)
    }

    /// カーソルまでの棋譜
    pub fn move_log(&self) -> Vec<MoveLogEntry> {
        let entries = self.history.entries();
        (1..=self.history.cursor())
            .map(|index| {
                let record = &entries[index];
                MoveLogEntry {
                    mover: entries[index - 1].next_player,
                    by_computer: record.by_computer,
                    notation: record
                        .position
                        .map(|position| position.notation())
                        .unwrap_or_else(|| "PASS".to_string()),
                }
            })
            .collect()
    }

    // ---- 状態遷移 ----

    /// 人間の手番で着手する
    /// 不正な手の場合は状態を変更せずにエラーを返す
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn apply_human_move(&mut self, position: Position) -> Result<Vec<Position>> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }

        let player = self.current_player();
        if self.control(player) != ControlType::Human {
            return Err(GameError::NotHumanTurn { player });
        }

        self.commit_move(position, false)
    }

    /// コンピュータの着手を適用する
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn apply_computer_move(&mut self, position: Position, score: i32) -> Result<Vec<Position>> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }

        let player = self.current_player();
        if self.control(player) != ControlType::Computer {
            return Err(GameError::NotComputerTurn { player });
        }

        debug!(score, "computer move selected");
        self.commit_move(position, true)
    }

    fn commit_move(&mut self, position: Position, by_computer: bool) -> Result<Vec<Position>> {
        let player = self.current_player();
        if !ReversiRules::is_valid_move(self.board(), position, player) {
            return Err(GameError::invalid_move(position, player));
        }

        let (board, flipped) = ReversiRules::apply_move(self.board(), position, player);
        self.history.push(MoveRecord {
            board,
            next_player: player.opponent(),
            position: Some(position),
            by_computer,
        });

        info!(player = ?player, position = %position.notation(), flipped = flipped.len(), "move applied");
        self.last_flipped = flipped.clone();
        self.after_history_change();
        Ok(flipped)
    }

    /// 手番側に合法手がなく相手にはある場合に手番を渡す
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn pass(&mut self) -> Result<()> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }

        let player = self.current_player();
        if ReversiRules::has_valid_moves(self.board(), player) {
            return Err(GameError::CannotPass { player });
        }

        let board = *self.board();
        self.history.push(MoveRecord {
            board,
            next_player: player.opponent(),
            position: None,
            by_computer: self.control(player) == ControlType::Computer,
        });

        info!(player = ?player, "pass");
        self.last_flipped.clear();
        self.after_history_change();
        Ok(())
    }

    /// カーソルを戻す
    /// 人間が含まれる対局では、次の手番が人間である最も近い局面まで戻る
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }

        let target = if self.all_computer() {
            self.history.cursor() - 1
        } else {
            let controls = self.controls;
            self.history
                .previous_matching(|record| controls[record.next_player.index()] == ControlType::Human)
        };

        self.navigate_to(target)
    }

    /// カーソルを進める
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }

        let target = if self.all_computer() {
            self.history.cursor() + 1
        } else {
            let controls = self.controls;
            self.history
                .next_matching(|record| controls[record.next_player.index()] == ControlType::Human)
        };

        self.navigate_to(target)
    }

    fn navigate_to(&mut self, index: usize) -> bool {
        if !self.history.seek(index) {
            return false;
        }

        debug!(cursor = index, len = self.history.len(), "history navigated");
        self.last_flipped = self.flipped_at(index);
        self.after_history_change();
        true
    }

    /// 指定エントリの着手で裏返った石を直前の盤面から求め直す
    fn flipped_at(&self, index: usize) -> Vec<Position> {
        if index == 0 {
            return Vec::new();
        }

        let previous = &self.history.entries()[index - 1];
        match self.history.entries()[index].position {
            Some(position) => ReversiRules::get_flipped_positions(&previous.board, position, previous.next_player),
            None => Vec::new(),
        }
    }

    /// 初期局面からやり直す
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn reset(&mut self) {
        self.history.reset();
        self.last_flipped.clear();
        info!("game reset");
        self.after_history_change();
    }

    /// プレイヤーの操作主体を変更する
    pub fn set_control(&mut self, player: Player, control: ControlType) {
        if self.controls[player.index()] != control {
            info!(player = ?player, control = ?control, "control changed");
            self.controls[player.index()] = control;
            self.hint = None;
            self.touch();
        }
    }

    /// 探索深度を変更する
    pub fn set_search_depth(&mut self, depth: u8) -> Result<()> {
        if !(self.min_search_depth..=self.max_search_depth).contains(&depth) {
            return Err(GameError::InvalidDepth {
                depth,
                min: self.min_search_depth,
                max: self.max_search_depth,
            });
        }

        self.search_depth = depth;
        self.touch();
        Ok(())
    }

    pub fn withdraw_hint(&mut self) {
        self.hint = None;
    }

    fn after_history_change(&mut self) {
        self.generation += 1;
        self.hint = None;
        self.status = GameStatus::evaluate(self.board(), self.current_player());

        if let Some(text) = self.status.result_text() {
            let (black, white) = self.stone_counts();
            info!(result = %text, black, white, "game finished");
        }

        self.touch();
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    // ---- 探索の受付と結果反映 ----

    /// 探索を開始する。探索中は新たな依頼を拒否する
    pub fn begin_search(&mut self, purpose: SearchPurpose) -> Result<(SearchTicket, SearchRequest)> {
        if self.searching.is_some() {
            return Err(SearchError::Busy.into());
        }

        if self.is_finished() {
            return Err(GameError::GameFinished);
        }

        let player = self.current_player();
        if purpose == SearchPurpose::Hint && self.control(player) != ControlType::Human {
            return Err(GameError::NotHumanTurn { player });
        }

        if !ReversiRules::has_valid_moves(self.board(), player) {
            return Err(SearchError::NoValidMoves.into());
        }

        let ticket = SearchTicket {
            generation: self.generation,
            cursor: self.history.cursor(),
            player,
            purpose,
        };
        let request = SearchRequest {
            board: *self.board(),
            depth: self.search_depth,
            player,
        };

        debug!(?ticket, depth = self.search_depth, "search started");
        self.searching = Some(ticket);
        Ok((ticket, request))
    }

    /// 札が現在の局面と一致しなくなったか
    pub fn is_stale(&self, ticket: &SearchTicket) -> bool {
        let expected_control = match ticket.purpose {
            SearchPurpose::Move => ControlType::Computer,
            SearchPurpose::Hint => ControlType::Human,
        };

        ticket.generation != self.generation
            || ticket.cursor != self.history.cursor()
            || ticket.player != self.current_player()
            || self.control(ticket.player) != expected_control
            || self.is_finished()
    }

    /// 探索結果を反映する
    /// 局面が変わっていた場合は何も変更せずに破棄する
    #[instrument(skip(self, outcome), fields(session = %self.id))]
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        outcome: std::result::Result<SearchReport, SearchError>,
    ) -> SearchResolution {
        if self.searching == Some(ticket) {
            self.searching = None;
        }

        if self.is_stale(&ticket) {
            debug!(?ticket, "stale search result discarded");
            return SearchResolution::Stale;
        }

        let report = match outcome {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(error = %e, "search failed");
                None
            }
        };
        let position = report.and_then(|report| report.result.position);

        match ticket.purpose {
            SearchPurpose::Hint => {
                self.hint = position;
                SearchResolution::HintReady(position)
            }
            SearchPurpose::Move => {
                let score = report.map(|report| report.result.score).unwrap_or_default();
                match position.map(|position| (position, self.apply_computer_move(position, score))) {
                    Some((position, Ok(_))) => SearchResolution::Applied(position),
                    Some((_, Err(e))) => {
                        warn!(error = %e, "search returned an unusable move");
                        self.declare_no_move()
                    }
                    None => self.declare_no_move(),
                }
            }
        }
    }

    fn declare_no_move(&mut self) -> SearchResolution {
        self.status = GameStatus::Finished {
            outcome: GameOutcome::NoMoveFound,
            score: self.stone_counts(),
        };
        warn!("no move found");
        self.touch();
        SearchResolution::NoMoveFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AlphaBetaSearch, SearchResult};

    fn pos(x: usize, y: usize) -> Position {
        Position::from_xy(x, y).unwrap()
    }

    fn report_for(request: &SearchRequest) -> SearchReport {
        SearchReport {
            result: AlphaBetaSearch::best_move(&request.board, request.depth, request.player),
            thinking_time_ms: 0,
        }
    }

    #[test]
    fn test_new_session_initial_state() {
        let session = GameSession::new(ControlType::Human, ControlType::Human, 3).unwrap();

        assert_eq!(session.current_player(), Player::Black);
        assert_eq!(session.stone_counts(), (2, 2));
        assert_eq!(session.valid_moves().len(), 4);
        assert!(!session.can_undo());
        assert!(!session.can_redo());
        assert!(!session.is_searching());
        assert_eq!(session.result_text(), None);
        assert_eq!(session.status(), &GameStatus::AwaitingMove(Player::Black));
    }

    #[test]
    fn test_human_move_flips_and_switches_turn() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Human, 3).unwrap();

        let flipped = session.apply_human_move(pos(2, 3)).unwrap();
        assert_eq!(flipped, vec![pos(3, 3)]);
        assert_eq!(session.stone_counts(), (4, 1));
        assert_eq!(session.current_player(), Player::White);
        assert_eq!(session.last_flipped(), &[pos(3, 3)]);
        assert!(session.can_undo());
    }

    #[test]
    fn test_invalid_move_leaves_state_untouched() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Human, 3).unwrap();
        let before = session.history().clone();

        assert!(matches!(session.apply_human_move(pos(0, 0)), Err(GameError::InvalidMove { .. })));
        assert!(matches!(session.apply_human_move(pos(3, 3)), Err(GameError::InvalidMove { .. })));
        assert_eq!(session.history(), &before);
    }

    #[test]
    fn test_human_move_rejected_on_computer_turn() {
        let mut session = GameSession::new(ControlType::Computer, ControlType::Human, 3).unwrap();

        let result = session.apply_human_move(pos(2, 3));
        assert_eq!(result, Err(GameError::NotHumanTurn { player: Player::Black }));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_new_session_rejects_depth_outside_range() {
        assert_eq!(
            GameSession::new(ControlType::Computer, ControlType::Human, 0).err(),
            Some(GameError::InvalidDepth { depth: 0, min: 1, max: 5 })
        );
        assert_eq!(
            GameSession::new(ControlType::Computer, ControlType::Human, 6).err(),
            Some(GameError::InvalidDepth { depth: 6, min: 1, max: 5 })
        );

        let session = GameSession::new(ControlType::Computer, ControlType::Human, 5).unwrap();
        assert_eq!(session.search_depth(), 5);
        assert_eq!(session.depth_range(), (1, 5));
    }

    #[test]
    fn test_computer_move_rejected_on_human_turn() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Computer, 3).unwrap();

        let result = session.apply_computer_move(pos(2, 3), 0);
        assert_eq!(result, Err(GameError::NotComputerTurn { player: Player::Black }));
        assert_eq!(session.history().len(), 1);

        session.apply_human_move(pos(2, 3)).unwrap();
        assert!(session.apply_computer_move(pos(2, 2), 0).is_ok());
        assert!(session.history().current().by_computer);
    }

    #[test]
    fn test_pass_rejected_with_moves_available() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Human, 3).unwrap();
        assert_eq!(session.pass(), Err(GameError::CannotPass { player: Player::Black }));
    }

    #[test]
    fn test_undo_redo_single_step_all_computer() {
        let mut session = GameSession::new(ControlType::Computer, ControlType::Computer, 1).unwrap();
        for _ in 0..4 {
            let (ticket, request) = session.begin_search(SearchPurpose::Move).unwrap();
            let resolution = session.finish_search(ticket, Ok(report_for(&request)));
            assert!(matches!(resolution, SearchResolution::Applied(_)));
        }
        assert_eq!(session.history().cursor(), 4);

        assert!(session.undo());
        assert_eq!(session.history().cursor(), 3);
        assert!(session.undo());
        assert_eq!(session.history().cursor(), 2);

        assert!(session.redo());
        assert_eq!(session.history().cursor(), 3);
    }

    #[test]
    fn test_undo_skips_computer_entries() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Computer, 1).unwrap();
        session.apply_human_move(pos(2, 3)).unwrap();
        let (ticket, request) = session.begin_search(SearchPurpose::Move).unwrap();
        session.finish_search(ticket, Ok(report_for(&request)));
        assert_eq!(session.history().cursor(), 2);
        let tail_board = *session.board();

        // 黒（人間）の手番まで戻る: 2 -> 0
        assert!(session.undo());
        assert_eq!(session.history().cursor(), 0);
        assert_eq!(session.board(), &Board::new());

        // 次の人間の手番まで進む: 0 -> 2
        assert!(session.redo());
        assert_eq!(session.history().cursor(), 2);
        assert_eq!(session.board(), &tail_board);
    }

    #[test]
    fn test_undo_lands_on_boundary_without_human_entry() {
        // 白が人間、黒がコンピュータ: 初期エントリの次手番は黒
        let mut session = GameSession::new(ControlType::Computer, ControlType::Human, 1).unwrap();
        let (ticket, request) = session.begin_search(SearchPurpose::Move).unwrap();
        session.finish_search(ticket, Ok(report_for(&request)));
        assert_eq!(session.history().cursor(), 1);

        assert!(session.undo());
        assert_eq!(session.history().cursor(), 0);
        assert!(!session.undo());
    }

    #[test]
    fn test_branching_discards_redo_tail() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Human, 3).unwrap();
        session.apply_human_move(pos(2, 3)).unwrap();
        session.apply_human_move(pos(2, 2)).unwrap();
        assert!(session.undo());
        assert!(session.undo());
        assert_eq!(session.history().len(), 3);

        session.apply_human_move(pos(4, 5)).unwrap();
        assert_eq!(session.history().len(), 2);
        assert!(!session.can_redo());
        assert_eq!(session.history().entries()[0], MoveRecord::initial());
    }

    #[test]
    fn test_navigation_restores_last_flipped() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Human, 3).unwrap();
        session.apply_human_move(pos(2, 3)).unwrap();
        let flipped = session.last_flipped().to_vec();
        session.apply_human_move(pos(2, 2)).unwrap();

        session.undo();
        assert_eq!(session.last_flipped(), flipped.as_slice());
        session.undo();
        assert!(session.last_flipped().is_empty());
    }

    #[test]
    fn test_reset_restores_pristine_history() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Human, 3).unwrap();
        session.apply_human_move(pos(2, 3)).unwrap();
        session.reset();

        assert_eq!(session.history(), &History::new());
        assert_eq!(session.current_player(), Player::Black);
    }

    #[test]
    fn test_search_depth_bounds() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Computer, 3).unwrap();

        assert!(session.set_search_depth(5).is_ok());
        assert_eq!(session.search_depth(), 5);
        assert_eq!(
            session.set_search_depth(0),
            Err(GameError::InvalidDepth { depth: 0, min: 1, max: 5 })
        );
        assert!(session.set_search_depth(6).is_err());
        assert_eq!(session.search_depth(), 5);
    }

    #[test]
    fn test_second_search_is_rejected() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Computer, 2).unwrap();
        session.begin_search(SearchPurpose::Hint).unwrap();

        let second = session.begin_search(SearchPurpose::Hint);
        assert_eq!(second.err(), Some(GameError::Search { source: SearchError::Busy }));
        assert!(session.is_searching());
    }

    #[test]
    fn test_hint_does_not_touch_history() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Computer, 2).unwrap();
        let (ticket, request) = session.begin_search(SearchPurpose::Hint).unwrap();

        let resolution = session.finish_search(ticket, Ok(report_for(&request)));
        assert!(matches!(resolution, SearchResolution::HintReady(Some(_))));
        assert!(session.hint().is_some());
        assert_eq!(session.history().len(), 1);
        assert!(!session.is_searching());

        session.withdraw_hint();
        assert_eq!(session.hint(), None);
    }

    #[test]
    fn test_stale_result_after_undo_is_discarded() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Computer, 2).unwrap();
        session.apply_human_move(pos(2, 3)).unwrap();
        let (ticket, request) = session.begin_search(SearchPurpose::Move).unwrap();

        session.undo();
        let resolution = session.finish_search(ticket, Ok(report_for(&request)));

        assert_eq!(resolution, SearchResolution::Stale);
        assert!(!session.is_searching());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().cursor(), 0);
    }

    #[test]
    fn test_stale_result_after_reset_is_discarded() {
        let mut session = GameSession::new(ControlType::Computer, ControlType::Computer, 1).unwrap();
        let (ticket, request) = session.begin_search(SearchPurpose::Move).unwrap();

        // 同じカーソル・同じ手番に戻っても世代が異なる
        session.reset();
        let resolution = session.finish_search(ticket, Ok(report_for(&request)));

        assert_eq!(resolution, SearchResolution::Stale);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_result_discarded_after_control_change() {
        let mut session = GameSession::new(ControlType::Computer, ControlType::Human, 1).unwrap();
        let (ticket, request) = session.begin_search(SearchPurpose::Move).unwrap();

        session.set_control(Player::Black, ControlType::Human);
        let resolution = session.finish_search(ticket, Ok(report_for(&request)));

        assert_eq!(resolution, SearchResolution::Stale);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_no_candidate_becomes_terminal() {
        let mut session = GameSession::new(ControlType::Computer, ControlType::Human, 1).unwrap();
        let (ticket, _) = session.begin_search(SearchPurpose::Move).unwrap();

        let empty = SearchReport {
            result: SearchResult { position: None, score: 0, nodes: 0 },
            thinking_time_ms: 0,
        };
        let resolution = session.finish_search(ticket, Ok(empty));

        assert_eq!(resolution, SearchResolution::NoMoveFound);
        assert!(session.is_finished());
        assert_eq!(session.result_text().as_deref(), Some("No move found"));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_move_log_notation() {
        let mut session = GameSession::new(ControlType::Human, ControlType::Human, 3).unwrap();
        session.apply_human_move(pos(2, 3)).unwrap();
        session.apply_human_move(pos(2, 2)).unwrap();

        let log: Vec<String> = session.move_log().iter().map(|entry| entry.to_string()).collect();
        assert_eq!(log, vec!["Black: C4".to_string(), "White: C3".to_string()]);

        session.undo();
        assert_eq!(session.move_log().len(), 1);
    }
}
