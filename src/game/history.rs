//! 手の履歴管理モジュール
//! 盤面スナップショットの列とカーソルで、分岐付きのアンドゥ/リドゥを表現する。

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::types::{Player, Position};

/// 履歴の1エントリ
/// 着手後の盤面と次の手番を保持する不変のスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub board: Board,
    pub next_player: Player,
    /// Noneはパスを表す
    pub position: Option<Position>,
    pub by_computer: bool,
}

impl MoveRecord {
    /// 対局開始時の初期エントリ
    pub fn initial() -> Self {
        Self {
            board: Board::new(),
            next_player: Player::Black,
            position: None,
            by_computer: false,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.position.is_none()
    }
}

/// 手の履歴とカーソル
/// 不変条件: 0 <= cursor < entries.len()、entries[0] は常に初期エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<MoveRecord>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: vec![MoveRecord::initial()],
            cursor: 0,
        }
    }

    /// カーソル位置のエントリ
    pub fn current(&self) -> &MoveRecord {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[MoveRecord] {
        &self.entries
    }

    /// カーソルが末尾（最新局面）にあるか
    pub fn is_at_tail(&self) -> bool {
        self.cursor + 1 == self.entries.len()
    }

    /// カーソル以降を切り捨ててから新しいエントリを追加する
    pub fn push(&mut self, record: MoveRecord) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(record);
        self.cursor = self.entries.len() - 1;
    }

    /// カーソルより前で条件を満たす最も近いインデックス
    /// 見つからなければ0
    pub fn previous_matching<F>(&self, accept: F) -> usize
    where
        F: Fn(&MoveRecord) -> bool,
    {
        (0..self.cursor)
            .rev()
            .find(|&index| accept(&self.entries[index]))
            .unwrap_or(0)
    }

    /// カーソルより後で条件を満たす最も近いインデックス
    /// 見つからなければ末尾
    pub fn next_matching<F>(&self, accept: F) -> usize
    where
        F: Fn(&MoveRecord) -> bool,
    {
        (self.cursor + 1..self.entries.len())
            .find(|&index| accept(&self.entries[index]))
            .unwrap_or(self.entries.len() - 1)
    }

    /// カーソルを移動する。範囲外なら何もしない
    pub fn seek(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    /// 初期エントリのみの状態に戻す
    pub fn reset(&mut self) {
        self.entries.truncate(1);
        self.entries[0] = MoveRecord::initial();
        self.cursor = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ReversiRules;

    fn record_after(previous: &MoveRecord, x: usize, y: usize) -> MoveRecord {
        let position = Position::from_xy(x, y).unwrap();
        let (board, _) = ReversiRules::apply_move(&previous.board, position, previous.next_player);
        MoveRecord {
            board,
            next_player: previous.next_player.opponent(),
            position: Some(position),
            by_computer: false,
        }
    }

    #[test]
    fn test_history_new() {
        let history = History::new();

        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(history.is_at_tail());
        assert_eq!(history.current(), &MoveRecord::initial());
        assert!(history.current().is_pass());
    }

    #[test]
    fn test_history_push_advances_cursor() {
        let mut history = History::new();
        let record = record_after(history.current(), 2, 3);
        history.push(record.clone());

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.current(), &record);
    }

    #[test]
    fn test_history_push_discards_redo_branch() {
        let mut history = History::new();
        let first = record_after(history.current(), 2, 3);
        history.push(first);
        let second = record_after(history.current(), 2, 2);
        history.push(second);
        assert_eq!(history.len(), 3);

        assert!(history.seek(0));
        let branch = record_after(history.current(), 4, 5);
        history.push(branch.clone());

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.current(), &branch);
        assert_eq!(history.entries()[0], MoveRecord::initial());
    }

    #[test]
    fn test_history_matching_boundaries() {
        let mut history = History::new();
        let first = record_after(history.current(), 2, 3);
        history.push(first);
        let second = record_after(history.current(), 2, 2);
        history.push(second);

        assert_eq!(history.previous_matching(|_| false), 0);
        assert_eq!(history.previous_matching(|r| r.next_player == Player::White), 1);

        history.seek(0);
        assert_eq!(history.next_matching(|_| false), 2);
        assert_eq!(history.next_matching(|r| r.next_player == Player::Black), 2);
    }

    #[test]
    fn test_history_seek_out_of_range() {
        let mut history = History::new();
        assert!(!history.seek(1));
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_history_reset() {
        let mut history = History::new();
        let first = record_after(history.current(), 2, 3);
        history.push(first);

        history.reset();
        assert_eq!(history, History::new());
    }
}
