use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use timeago::Formatter;
use todoz::catalog::TodoFile;
use todoz::model::{Priority, Todo};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TASK_WIDTH: usize = 40;
const LABELS_WIDTH: usize = 24;
const COLUMN_GAP: &str = "  ";

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_info(message: &str) {
    println!("{}", message.dimmed());
}

pub(super) fn print_warning(message: &str) {
    println!("{}", message.yellow());
}

pub(super) fn print_todos(todos: &[Todo]) {
    if todos.is_empty() {
        println!("No todos found.");
        return;
    }

    let header = ["ID", "Task", "Due", "Priority", "Done", "Labels", "Updated"];
    let rows: Vec<Vec<Cell>> = todos
        .iter()
        .map(|todo| {
            vec![
                Cell::styled(todo.id.clone(), |s| s.yellow()),
                Cell::plain(truncate_to_width(&todo.task, TASK_WIDTH)),
                Cell::plain(todo.due_date.format("%Y-%m-%d").to_string()),
                priority_cell(todo.priority),
                done_cell(todo.completed),
                Cell::plain(truncate_to_width(&todo.labels.join(", "), LABELS_WIDTH)),
                Cell::styled(format_time_ago(todo.updated_at), |s| s.dimmed()),
            ]
        })
        .collect();

    print_table(&header, &rows);
}

pub(super) fn print_todo(todo: &Todo) {
    println!("{} {}", todo.id.yellow(), todo.task.bold());
    println!("--------------------------------");
    println!("due:       {}", todo.due_date.format("%Y-%m-%d"));
    println!("priority:  {}", priority_cell(todo.priority).styled);
    println!("completed: {}", done_cell(todo.completed).styled);
    if !todo.labels.is_empty() {
        println!("labels:    {}", todo.labels.join(", "));
    }
    println!(
        "created:   {}",
        todo.created_at.format("%Y-%m-%d %H:%M")
    );
    println!(
        "updated:   {}",
        todo.updated_at.format("%Y-%m-%d %H:%M")
    );
}

pub(super) fn print_files(files: &[TodoFile]) {
    if files.is_empty() {
        println!("No todo files found.");
        return;
    }

    let header = ["File", "Size (KB)", "Modified"];
    let rows: Vec<Vec<Cell>> = files
        .iter()
        .map(|file| {
            let modified = file
                .modified
                .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            vec![
                Cell::styled(file.name.clone(), |s| s.bold()),
                Cell::plain(format!("{:.2}", file.size as f64 / 1024.0)),
                Cell::styled(modified, |s| s.dimmed()),
            ]
        })
        .collect();

    print_table(&header, &rows);
}

struct Cell {
    width: usize,
    styled: ColoredString,
}

impl Cell {
    fn plain(text: String) -> Self {
        Self::styled(text, |s| s.normal())
    }

    fn styled(text: String, style: impl Fn(&str) -> ColoredString) -> Self {
        Self {
            width: text.width(),
            styled: style(&text),
        }
    }
}

fn priority_cell(priority: Priority) -> Cell {
    let text = priority.to_string();
    match priority {
        Priority::High => Cell::styled(text, |s| s.red().bold()),
        Priority::Medium => Cell::styled(text, |s| s.yellow()),
        Priority::Low => Cell::plain(text),
    }
}

fn done_cell(completed: bool) -> Cell {
    if completed {
        Cell::styled("yes".to_string(), |s| s.green())
    } else {
        Cell::styled("no".to_string(), |s| s.dimmed())
    }
}

// Widths are measured on the plain text; ANSI codes don't count.
fn print_table(header: &[&str], rows: &[Vec<Cell>]) {
    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width);
        }
    }

    let header_line: Vec<String> = header
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{}{}", h.bold(), " ".repeat(w - h.width())))
        .collect();
    println!("{}", header_line.join(COLUMN_GAP).trim_end());

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{}{}", cell.styled, " ".repeat(w - cell.width)))
            .collect();
        println!("{}", line.join(COLUMN_GAP).trim_end());
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
