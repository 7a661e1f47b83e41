//! KanbanContext - the single owner of a board's state
//!
//! The context holds the board, the activity log and the event channel. It
//! offers access primitives only; commands do all the work.

use crate::error::{KanbanError, Result};
use crate::types::{Board, BoardEvent};
use std::collections::VecDeque;
use taskboard_operations::LogEntry;
use tokio::sync::{broadcast, RwLock};

/// How many undelivered events a slow subscriber may fall behind by
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Activity entries kept before the oldest are dropped
pub const ACTIVITY_CAPACITY: usize = 1024;

/// Context passed to every command - provides access, not logic
pub struct KanbanContext {
    board: RwLock<Option<Board>>,
    /// Newest first
    activity: RwLock<VecDeque<LogEntry>>,
    events: broadcast::Sender<BoardEvent>,
}

impl KanbanContext {
    /// Create a context with no board yet
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            board: RwLock::new(None),
            activity: RwLock::new(VecDeque::new()),
            events,
        }
    }

    // =========================================================================
    // Board access
    // =========================================================================

    pub async fn is_initialized(&self) -> bool {
        self.board.read().await.is_some()
    }

    /// Snapshot of the current board
    pub async fn read_board(&self) -> Result<Board> {
        self.board
            .read()
            .await
            .clone()
            .ok_or(KanbanError::NotInitialized)
    }

    /// Install the board. Fails if one is already present.
    pub async fn install_board(&self, board: Board) -> Result<()> {
        let mut slot = self.board.write().await;
        if let Some(existing) = slot.as_ref() {
            return Err(KanbanError::AlreadyInitialized {
                id: existing.id.to_string(),
            });
        }
        *slot = Some(board);
        Ok(())
    }

    /// Run `f` against the board under the write lock.
    ///
    /// Nothing else observes the board while `f` runs, so a closure that
    /// validates before it mutates is all-or-nothing. Commands emit their
    /// events from inside `f`; subscribers then see events in the order the
    /// mutations were applied, however many callers share the context.
    pub async fn with_board<R>(&self, f: impl FnOnce(&mut Board) -> Result<R>) -> Result<R> {
        let mut slot = self.board.write().await;
        let board = slot.as_mut().ok_or(KanbanError::NotInitialized)?;
        f(board)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Receive every event emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Send an event to current subscribers. Having none is fine.
    pub fn emit(&self, event: BoardEvent) {
        tracing::debug!(event = event.name(), task = %event.task_id(), "board event");
        let _ = self.events.send(event);
    }

    // =========================================================================
    // Activity log
    // =========================================================================

    /// Record an entry, dropping the oldest once [`ACTIVITY_CAPACITY`] is reached
    pub async fn append_activity(&self, entry: LogEntry) {
        let mut activity = self.activity.write().await;
        if activity.len() == ACTIVITY_CAPACITY {
            activity.pop_back();
        }
        activity.push_front(entry);
    }

    /// Activity entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Vec<LogEntry> {
        let activity = self.activity.read().await;
        let limit = limit.unwrap_or(activity.len());
        activity.iter().take(limit).cloned().collect()
    }
}

impl Default for KanbanContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnId, TaskId};

    #[tokio::test]
    async fn test_uninitialized_context() {
        let ctx = KanbanContext::new();
        assert!(!ctx.is_initialized().await);
        assert!(matches!(
            ctx.read_board().await,
            Err(KanbanError::NotInitialized)
        ));
        let result = ctx.with_board(|_| Ok(())).await;
        assert!(matches!(result, Err(KanbanError::NotInitialized)));
    }

    #[tokio::test]
    async fn test_install_board_once() {
        let ctx = KanbanContext::new();
        ctx.install_board(Board::new("One")).await.unwrap();
        assert!(ctx.is_initialized().await);
        let again = ctx.install_board(Board::new("Two")).await;
        assert!(matches!(again, Err(KanbanError::AlreadyInitialized { .. })));
        assert_eq!(ctx.read_board().await.unwrap().title, "One");
    }

    #[tokio::test]
    async fn test_events_reach_subscribers() {
        let ctx = KanbanContext::new();
        let mut rx = ctx.subscribe();
        ctx.emit(BoardEvent::TaskRemoved {
            task_id: TaskId::from(1),
            column_id: ColumnId::from("todo"),
        });
        let event = rx.try_recv().unwrap();
        assert_eq!(event.name(), "taskRemoved");
    }

    #[tokio::test]
    async fn test_activity_newest_first() {
        let ctx = KanbanContext::new();
        ctx.append_activity(LogEntry::new("add task", serde_json::Value::Null, serde_json::Value::Null, None, 0))
            .await;
        ctx.append_activity(LogEntry::new("move task", serde_json::Value::Null, serde_json::Value::Null, None, 0))
            .await;
        let entries = ctx.read_activity(None).await;
        assert_eq!(entries[0].op, "move task");
        assert_eq!(ctx.read_activity(Some(1)).await.len(), 1);
    }

    #[tokio::test]
    async fn test_activity_drops_oldest_at_capacity() {
        let ctx = KanbanContext::new();
        for n in 0..=ACTIVITY_CAPACITY {
            let entry = LogEntry::new(format!("op {}", n), serde_json::Value::Null, serde_json::Value::Null, None, 0);
            ctx.append_activity(entry).await;
        }
        let entries = ctx.read_activity(None).await;
        assert_eq!(entries.len(), ACTIVITY_CAPACITY);
        assert_eq!(entries[0].op, format!("op {}", ACTIVITY_CAPACITY));
        assert_eq!(entries[ACTIVITY_CAPACITY - 1].op, "op 1");
    }
}
