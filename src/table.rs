// Table output

use crate::models::{Task, format_timestamp};
use prettytable::{Table, row};

/// Build the task table: a header row, then one row per task in order
pub fn build_table(tasks: &[Task]) -> Table {
    let mut table = Table::new();

    table.set_titles(row!["ID", "Content", "Done", "Tag", "DueDate", "UpdatedAt"]);
    for task in tasks {
        table.add_row(row![
            task.id,
            task.content,
            task.done,
            task.tag,
            format_timestamp(&task.due_date),
            format_timestamp(&task.updated_at)
        ]);
    }

    table
}

/// Print the task table to stdout
pub fn print_tasks(tasks: &[Task]) {
    build_table(tasks).printstd();
}
