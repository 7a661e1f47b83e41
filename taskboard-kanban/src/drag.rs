//! Drag session state for the board unit
//!
//! A gesture goes `start -> hover* -> drop | cancel`. The session only tracks
//! the gesture; the board model is touched solely when a drop is turned into
//! a move.

use crate::types::{ColumnId, DragEndEvent, DragStartEvent, TaskId};

/// Where the current gesture stands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        start: DragStartEvent,
        /// Column currently under the pointer, if any
        over: Option<ColumnId>,
    },
}

/// Tracks at most one in-flight drag
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The task being dragged and its source column
    pub fn current(&self) -> Option<&DragStartEvent> {
        match &self.state {
            DragState::Dragging { start, .. } => Some(start),
            DragState::Idle => None,
        }
    }

    pub fn hovered(&self) -> Option<&ColumnId> {
        match &self.state {
            DragState::Dragging { over, .. } => over.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Begin a gesture. A gesture already in flight is abandoned.
    pub fn start(&mut self, start: DragStartEvent) {
        if let Some(previous) = self.current() {
            tracing::debug!(task = %previous.task_id, "abandoning unfinished drag");
        }
        tracing::debug!(task = %start.task_id, source = %start.source_column_id, "drag started");
        self.state = DragState::Dragging { start, over: None };
    }

    /// Record the column under the pointer. Ignored while idle.
    pub fn hover(&mut self, column: impl Into<ColumnId>) {
        if let DragState::Dragging { over, .. } = &mut self.state {
            *over = Some(column.into());
        }
    }

    /// The pointer left every column
    pub fn leave(&mut self) {
        if let DragState::Dragging { over, .. } = &mut self.state {
            *over = None;
        }
    }

    /// Finish the gesture over `target`.
    ///
    /// Returns the completed gesture when the dropped task is the one this
    /// session saw start. A drop without a matching start (the host lost the
    /// start event, or the drag came from elsewhere) yields `None`; the caller
    /// still owns the decision to move.
    pub fn drop_on(&mut self, task_id: &TaskId, target: impl Into<ColumnId>) -> Option<DragEndEvent> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { start, .. } if start.task_id == *task_id => Some(DragEndEvent {
                task_id: start.task_id,
                source_column_id: start.source_column_id,
                target_column_id: target.into(),
            }),
            DragState::Dragging { start, .. } => {
                tracing::warn!(
                    started = %start.task_id,
                    dropped = %task_id,
                    "drop does not match the drag in flight"
                );
                None
            }
            DragState::Idle => None,
        }
    }

    /// Abandon the gesture (released outside any column)
    pub fn cancel(&mut self) -> Option<DragStartEvent> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { start, .. } => {
                tracing::debug!(task = %start.task_id, "drag cancelled");
                Some(start)
            }
            DragState::Idle => None,
        }
    }
}
