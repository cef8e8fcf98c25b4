use std::fmt::Write;

use crate::collection::{AnswerFrequency, QuestionBlock};

/// Render the per-question collection of distinct graded answers.
pub fn render(blocks: &[QuestionBlock]) -> String {
    let mut text = String::new();
    for block in blocks {
        let _ = write!(text, "QUESTION {}:\n\n", block.question_number);
        text.push_str("ACCEPTED:\n");
        for row in &block.accepted {
            let _ = writeln!(text, "+ {}", frequency_entry(row));
        }
        text.push_str("\n\n");
        text.push_str("DECLINED:\n");
        for row in &block.declined {
            let _ = writeln!(text, "- {}", frequency_entry(row));
        }
        text.push_str("\n\n\n");
    }
    text
}

/// An answer with its frequency, the count shown only when it repeats.
fn frequency_entry(row: &AnswerFrequency) -> String {
    if row.count > 1 {
        format!("{} [{}]", row.text, row.count)
    } else {
        row.text.clone()
    }
}
