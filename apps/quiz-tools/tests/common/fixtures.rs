//! Sample question files.

pub const HEADER: &str = "no,memo,category,question,option1,option2,option3,option4,answer";

/// A canonical CSV with one row per entry.
pub fn csv(rows: &[&str]) -> String {
    let mut content = HEADER.to_string();
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content
}

/// A raw export: two metadata lines, no header, loose quoting.
pub fn raw_export(rows: &[&str]) -> String {
    let mut content = String::from("Question export\nExported at 2024-05-01 09:00\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

/// `count` questions that are always answered correctly by picking option 1.
///
/// Each question offers a single option, so option order does not depend on
/// the shuffle.
pub fn single_option_questions(category: &str, count: usize) -> String {
    let rows: Vec<String> = (1..=count)
        .map(|i| format!("{i},,{category},{category} question {i},Answer {i},,,,Answer {i}"))
        .collect();
    csv(&rows.iter().map(String::as_str).collect::<Vec<_>>())
}

/// A question whose only offered option is wrong.
pub fn trick_question(category: &str, text: &str) -> String {
    format!("99,remember this,{category},{text},Wrong,,,,Right")
}
