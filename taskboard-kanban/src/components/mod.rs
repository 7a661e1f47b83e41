//! Presentational units of a board and the contracts between them
//!
//! Data flows down as props and changes flow up as emitted events:
//!
//! ```text
//! KanbanBoard ── props ──▶ KanbanColumn ── props ──▶ TaskCard
//!      ▲                        │  ▲                      │
//!      └──── ColumnEvent ───────┘  └────── CardEvent ─────┘
//! ```
//!
//! Cards and columns never mutate anything. The board is the only owner of
//! the task/column graph and applies every change through the operation
//! processor, which keeps the activity log and emits [`BoardEvent`]s.
//!
//! [`BoardEvent`]: crate::types::BoardEvent

mod board;
mod card;
mod column;

pub use board::{KanbanBoard, KanbanBoardProps, DEFAULT_BOARD_TITLE};
pub use card::{CardEvent, TaskCard, TaskCardProps};
pub use column::{ColumnEvent, KanbanColumn, KanbanColumnProps};
