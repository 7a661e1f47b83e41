//! Property tests: arbitrary command sequences keep the board consistent

use proptest::prelude::*;
use taskboard_kanban::board::InitBoard;
use taskboard_kanban::column::UpdateColumn;
use taskboard_kanban::task::{AddTask, DeleteTask, MoveTask, UpdateTask};
use taskboard_kanban::types::Position;
use taskboard_kanban::{Board, Column, Execute, KanbanContext, TaskId, TaskStatus};

#[derive(Debug, Clone)]
enum Step {
    Add { column: usize },
    Move { task: usize, column: usize, index: Option<usize> },
    Delete { task: usize },
    SetStatus { task: usize, status: TaskStatus },
    Remap { column: usize, status: Option<TaskStatus> },
}

const COLUMNS: [&str; 5] = ["todo", "doing", "done", "later", "missing"];

fn status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::Doing),
        Just(TaskStatus::Done),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..COLUMNS.len()).prop_map(|column| Step::Add { column }),
        (0..8usize, 0..COLUMNS.len(), proptest::option::of(0..6usize))
            .prop_map(|(task, column, index)| Step::Move { task, column, index }),
        (0..8usize).prop_map(|task| Step::Delete { task }),
        (0..8usize, status()).prop_map(|(task, status)| Step::SetStatus { task, status }),
        (0..4usize, proptest::option::of(status()))
            .prop_map(|(column, status)| Step::Remap { column, status }),
    ]
}

fn columns() -> Vec<Column> {
    let mut columns = Board::default_columns();
    columns.push(Column::new("later", "Later"));
    columns
}

fn assert_unchanged(before: &Board, after: &Board) {
    assert_eq!(
        serde_json::to_value(before).unwrap(),
        serde_json::to_value(after).unwrap()
    );
}

/// Every id once, and mapped columns hold only tasks of their status
fn check(board: &Board, expected: usize) {
    board.validate().unwrap();
    assert_eq!(board.task_count(), expected);
    for column in board.columns.iter() {
        if let Some(status) = column.status {
            assert!(column.tasks.iter().all(|t| t.status == status));
        }
    }
}

async fn run(steps: Vec<Step>) {
    let ctx = KanbanContext::new();
    InitBoard::new("Props")
        .with_columns(columns())
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    let mut ids: Vec<TaskId> = Vec::new();
    for (n, step) in steps.into_iter().enumerate() {
        let before = ctx.read_board().await.unwrap();
        match step {
            Step::Add { column } => {
                let id = TaskId::from(n as u64);
                let result = AddTask::new(format!("task {}", n))
                    .with_id(id.clone())
                    .with_column(COLUMNS[column])
                    .execute(&ctx)
                    .await
                    .into_result();
                if COLUMNS[column] == "missing" {
                    assert!(result.is_err());
                } else {
                    result.unwrap();
                    ids.push(id);
                }
            }
            Step::Move { task, column, index } => {
                let Some(id) = ids.get(task).cloned() else { continue };
                let target = COLUMNS[column];
                let result = MoveTask::new(id.clone(), Position::new(target.into(), index))
                    .execute(&ctx)
                    .await
                    .into_result();
                if target == "missing" {
                    assert!(result.is_err());
                    assert_unchanged(&before, &ctx.read_board().await.unwrap());
                } else {
                    result.unwrap();
                    let after = ctx.read_board().await.unwrap();
                    assert_eq!(after.locate_task(&id).unwrap().column.as_str(), target);
                }
            }
            Step::Delete { task } => {
                if task < ids.len() {
                    let id = ids.remove(task);
                    DeleteTask::new(id).execute(&ctx).await.into_result().unwrap();
                }
            }
            Step::SetStatus { task, status } => {
                let Some(id) = ids.get(task).cloned() else { continue };
                let result = UpdateTask::new(id.clone())
                    .with_status(status)
                    .execute(&ctx)
                    .await
                    .into_result();
                let after = ctx.read_board().await.unwrap();
                match result {
                    Ok(_) => assert_eq!(after.find_task(&id).unwrap().status, status),
                    Err(_) => assert_unchanged(&before, &after),
                }
            }
            Step::Remap { column, status } => {
                let id = COLUMNS[column];
                let holds_other = before
                    .find_column(&id.into())
                    .unwrap()
                    .tasks
                    .iter()
                    .any(|t| Some(t.status) != status);
                let result = UpdateColumn::new(id)
                    .with_status(status)
                    .execute(&ctx)
                    .await
                    .into_result();
                if status.is_some() && holds_other {
                    assert!(result.is_err());
                    assert_unchanged(&before, &ctx.read_board().await.unwrap());
                } else {
                    result.unwrap();
                }
            }
        }
        check(&ctx.read_board().await.unwrap(), ids.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn commands_keep_board_consistent(steps in proptest::collection::vec(step(), 1..40)) {
        tokio_test::block_on(run(steps));
    }
}
