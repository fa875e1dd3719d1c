//! Table presenter
//!
//! Renders the person list as a bordered, aligned text table with fixed
//! column widths (4 / 30 / 14 / 19) and Russian headers.

use crate::date::format_date;
use crate::person::Person;

/// Notice emitted instead of a table when the list is empty.
pub const EMPTY_LIST_NOTICE: &str = "Список людей пуст!";

/// Render a sequence of persons as a table, or the empty-list notice.
///
/// Rows are numbered from 1. Alignment widths count characters, so Cyrillic
/// names line up with the borders.
pub fn render(people: &[Person]) -> String {
    if people.is_empty() {
        return EMPTY_LIST_NOTICE.to_string();
    }

    let rule = format!(
        "+-{}-+-{}-+-{}-+-{}-+",
        "-".repeat(4),
        "-".repeat(30),
        "-".repeat(14),
        "-".repeat(19)
    );

    let mut lines = Vec::with_capacity(people.len() + 4);
    lines.push(rule.clone());
    lines.push(format!(
        "| {:^4} | {:^30} | {:^14} | {:^19} |",
        "№п/п", "Фамилия Имя", "Номер телефона", "Дата рождения"
    ));
    lines.push(rule.clone());

    for (number, person) in people.iter().enumerate() {
        lines.push(format!(
            "| {:>4} | {:<30} | {:<14} | {:>19} |",
            number + 1,
            person.name,
            person.phone,
            format_date(person.birth)
        ));
    }

    lines.push(rule);
    lines.join("\n")
}
