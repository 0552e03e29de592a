use prettytable::{row, Table};
use time::macros::format_description;
use time::OffsetDateTime;

use crate::reminder::Reminder;
use crate::time_expr::from_timestamp;

pub fn format_moment(moment: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    moment
        .format(&format)
        .unwrap_or_else(|_| moment.to_string())
}

fn format_timestamp(secs: f64) -> String {
    match from_timestamp(secs) {
        Some(moment) => format_moment(moment),
        None => secs.to_string(),
    }
}

pub fn tabular_output(reminders: &[Reminder]) -> String {
    let mut table = Table::new();
    table.add_row(row!["#", "START", "END", "MESSAGE"]);
    for (index, reminder) in reminders.iter().enumerate() {
        let end = reminder.end.map(format_timestamp).unwrap_or_default();
        table.add_row(row![
            index,
            format_timestamp(reminder.start),
            end,
            reminder.message
        ]);
    }
    table.to_string()
}
