//! Applying one CLI command to the mounted board

use crate::cli::Commands;
use crate::error::Result;
use crate::state::AppContext;
use serde_json::Value;
use taskboard_kanban::components::CardEvent;
use taskboard_kanban::schema::{all_operations, describe_operation, find_operation};
use taskboard_kanban::task::{AddTask, MoveTask, UpdateTask};
use taskboard_kanban::types::{DragEvent, DropPayload};
use taskboard_kanban::{
    Board, BoardEvent, ColumnId, KanbanError, LogEntry, Position, TaskId, TaskStatus, TaskUpdate,
};

/// What a command produced
pub enum Output {
    Board {
        /// Result of the command, when it ran one
        result: Option<Value>,
        events: Vec<BoardEvent>,
        board: Board,
        activity: Option<Vec<LogEntry>>,
    },
    Operations(Vec<Value>),
}

pub async fn run(ctx: &mut AppContext, command: Commands) -> Result<Output> {
    let mut events_rx = ctx.board.subscribe();
    let mut show_activity = false;

    let result = match command {
        Commands::Show { activity } => {
            show_activity = activity;
            None
        }
        Commands::Add {
            content,
            column,
            status,
            priority,
            id,
            index,
        } => {
            let mut add = AddTask::new(content);
            if let Some(column) = column {
                add = add.with_column(column);
            }
            if let Some(status) = status {
                add = add.with_status(status.parse::<TaskStatus>()?);
            }
            if let Some(priority) = priority {
                add = add.with_priority(priority.parse()?);
            }
            if let Some(id) = id {
                add = add.with_id(TaskId::parse(&id));
            }
            if let Some(index) = index {
                add = add.with_index(index);
            }
            Some(ctx.board.apply(&add).await?)
        }
        Commands::Move { id, column, index } => {
            let id = resolve_task(ctx, &id).await?;
            let position = Position::new(column.into(), index);
            Some(ctx.board.apply(&MoveTask::new(id, position)).await?)
        }
        Commands::Remove { id } => {
            let id = resolve_task(ctx, &id).await?;
            Some(ctx.board.remove_task(&id).await?)
        }
        Commands::Update { id, key, value } => {
            let id = resolve_task(ctx, &id).await?;
            let update = TaskUpdate::from_key_text(&key, &value)?;
            Some(ctx.board.apply(&UpdateTask::new(id).with_update(update)).await?)
        }
        Commands::Drag {
            id,
            to,
            index,
            cancel,
        } => drag(ctx, &id, to, index, cancel).await?,
        Commands::Ops { op: None } => {
            let described = all_operations()
                .iter()
                .map(|op| describe_operation(op.as_ref()))
                .collect();
            return Ok(Output::Operations(described));
        }
        Commands::Ops { op: Some(name) } => {
            let op = find_operation(&name).ok_or_else(|| {
                KanbanError::invalid_value("op", format!("unknown operation '{}'", name))
            })?;
            return Ok(Output::Operations(vec![describe_operation(op.as_ref())]));
        }
    };

    let mut events = Vec::new();
    while let Ok(event) = events_rx.try_recv() {
        events.push(event);
    }
    let activity = if show_activity {
        Some(ctx.board.activity(None).await)
    } else {
        None
    };

    Ok(Output::Board {
        result,
        events,
        board: ctx.board.snapshot().await?,
        activity,
    })
}

/// Ids typed on the command line are matched against the board first, so
/// "7" finds a task whose id is the string "7" as well as the number 7.
async fn resolve_task(ctx: &AppContext, text: &str) -> Result<TaskId> {
    let board = ctx.board.snapshot().await?;
    Ok(board
        .resolve_task_id(text)
        .unwrap_or_else(|| TaskId::parse(text)))
}

/// Lift the card, hover the target and drop (or cancel)
async fn drag(
    ctx: &mut AppContext,
    id: &str,
    to: String,
    index: Option<usize>,
    cancel: bool,
) -> Result<Option<Value>> {
    let id = resolve_task(ctx, id).await?;
    let board = ctx.board.snapshot().await?;
    let location = board
        .locate_task(&id)
        .ok_or_else(|| KanbanError::TaskNotFound { id: id.to_string() })?;

    let source = ctx.board.column(&location.column).await?;
    let card = source
        .card(&id)
        .ok_or_else(|| KanbanError::TaskNotFound { id: id.to_string() })?;

    let lifted = card.drag_start(DragEvent::default());
    let CardEvent::DragStart(start) = &lifted else {
        return Ok(None);
    };
    let mut event = start.event.clone();
    ctx.board.handle(source.forward(lifted)).await?;
    ctx.board.drag_over(to.as_str());

    if cancel {
        ctx.board.cancel_drag();
        return Ok(None);
    }

    if let Some(index) = index {
        event = event.with_index_hint(index);
    }
    let target = ctx.board.column(&ColumnId::from(to.as_str())).await?;
    let Some(dropped) = target.drop(DropPayload::new(event, to)) else {
        return Ok(None);
    };
    Ok(ctx.board.handle(dropped).await?)
}
