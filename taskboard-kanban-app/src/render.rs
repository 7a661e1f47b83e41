//! Terminal output
//!
//! Tables are sized to the terminal with crossterm, falling back to 120
//! columns when not connected to a TTY.

use crate::commands::Output;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::{json, Value};
use taskboard_kanban::{Board, BoardEvent, LogEntry, Task};

const FALLBACK_WIDTH: u16 = 120;
const MAX_CONTENT_CHARS: usize = 60;

/// Create a table pre-configured for terminal-width-aware output
pub fn new_table() -> Table {
    let width = crossterm::terminal::size()
        .ok()
        .map(|(w, _)| w)
        .filter(|w| *w > 0)
        .unwrap_or(FALLBACK_WIDTH);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width);
    table
}

/// Render the output as JSON or as text
pub fn render(output: &Output, as_json: bool) -> serde_json::Result<String> {
    if as_json {
        return serde_json::to_string_pretty(&to_json(output)?);
    }
    Ok(match output {
        Output::Board {
            events,
            board,
            activity,
            ..
        } => {
            let mut sections = Vec::new();
            if !events.is_empty() {
                sections.push(events.iter().map(event_line).collect::<Vec<_>>().join("\n"));
            }
            sections.push(board_table(board).to_string());
            if let Some(activity) = activity {
                sections.push(activity_table(activity).to_string());
            }
            sections.join("\n\n")
        }
        Output::Operations(ops) => operations_table(ops).to_string(),
    })
}

fn to_json(output: &Output) -> serde_json::Result<Value> {
    Ok(match output {
        Output::Board {
            result,
            events,
            board,
            activity,
        } => {
            let mut value = json!({
                "result": result,
                "events": events,
                "board": board,
            });
            if let Some(activity) = activity {
                value["activity"] = serde_json::to_value(activity)?;
            }
            value
        }
        Output::Operations(ops) => json!(ops),
    })
}

/// One line per emitted event, e.g. `taskMoved 1: todo -> done`
pub fn event_line(event: &BoardEvent) -> String {
    match event {
        BoardEvent::TaskAdded { task, column_id } => {
            format!("taskAdded {} -> {}", task.id, column_id)
        }
        BoardEvent::TaskRemoved { task_id, column_id } => {
            format!("taskRemoved {} <- {}", task_id, column_id)
        }
        BoardEvent::TaskMoved {
            task_id,
            from_column_id,
            to_column_id,
        } => format!("taskMoved {}: {} -> {}", task_id, from_column_id, to_column_id),
    }
}

/// Columns side by side, tasks top to bottom
pub fn board_table(board: &Board) -> Table {
    let mut table = new_table();
    table.set_header(
        board
            .columns
            .iter()
            .map(|column| Cell::new(format!("{} ({})", column.title, column.tasks.len()))),
    );

    let depth = board
        .columns
        .iter()
        .map(|column| column.tasks.len())
        .max()
        .unwrap_or(0);
    for row in 0..depth {
        table.add_row(board.columns.iter().map(|column| {
            column
                .tasks
                .get_index(row)
                .map(task_cell)
                .unwrap_or_default()
        }));
    }
    table
}

fn task_cell(task: &Task) -> String {
    let mut cell = format!("[{}] {}", task.id, truncate_str(&task.content, MAX_CONTENT_CHARS));
    if let Some(priority) = task.priority {
        cell.push_str(&format!(" !{}", priority));
    }
    cell
}

fn activity_table(activity: &[LogEntry]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Time", "Operation", "Actor", "Result"]);
    for entry in activity {
        table.add_row(vec![
            entry.timestamp.format("%H:%M:%S%.3f").to_string(),
            entry.op.clone(),
            entry.actor.clone().unwrap_or_default(),
            if entry.is_failure() { "failed" } else { "ok" }.to_string(),
        ]);
    }
    table
}

fn operations_table(ops: &[Value]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Operation", "Description", "Parameters"]);
    for op in ops {
        let params = op["parameters"]
            .as_array()
            .map(|params| params.iter().map(param_line).collect::<Vec<_>>().join("\n"))
            .unwrap_or_default();
        table.add_row(vec![
            op["op"].as_str().unwrap_or_default().to_string(),
            op["description"].as_str().unwrap_or_default().to_string(),
            params,
        ]);
    }
    table
}

fn param_line(param: &Value) -> String {
    let name = param["name"].as_str().unwrap_or_default();
    let kind = param["type"].as_str().unwrap_or_default();
    let marker = if param["required"] == true { "" } else { "?" };
    let aliases: Vec<&str> = param["aliases"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    if aliases.is_empty() {
        format!("{}{}: {}", name, marker, kind)
    } else {
        format!("{}{}: {} (alias {})", name, marker, kind, aliases.join(", "))
    }
}

/// Truncate a string to `max` characters, appending "..." if truncated.
///
/// Safe for multi-byte (UTF-8) strings.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
