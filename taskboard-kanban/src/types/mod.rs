//! Core types for the kanban engine

mod board;
mod drag;
mod events;
mod ids;
mod ordered;
mod position;
mod task;
mod update;

pub use board::{Board, Column, TaskLocation, TaskMove};
pub use drag::{DragEndEvent, DragEvent, DragStartEvent, DragStartPayload, DropPayload};
pub use events::BoardEvent;
pub use ids::{BoardId, ColumnId, TaskId};
pub use ordered::{Keyed, Ordered};
pub use position::Position;
pub use task::{Priority, Task, TaskStatus};
pub use update::{TaskUpdate, UpdateTaskPayload};
