use std::fmt::Write;

use crate::consistency::ConsistencyReport;

const ROW_SEPARATOR: &str =
    "----------------------------------------------------------------------------------";

/// Render the grading violations that block a report, naming the report
/// that could not be built.
pub fn render(report: &ConsistencyReport, blocked_report_title: &str) -> String {
    let mut text = String::new();
    text.push_str("ATTENTION!\n");
    text.push_str("Identical answers to the same question were graded differently for different teams.\n");
    text.push_str("The details are below. Please correct the grades so the data agree.\n");
    let _ = write!(
        text,
        "Until then the '{}' report cannot be built correctly.\n\n\n",
        blocked_report_title
    );

    for row in &report.rows {
        let _ = writeln!(text, "Question #{}", row.question_number);
        let _ = writeln!(text, "Answer: {}", row.answer_body);
        text.push_str("Accepted for teams:\n");
        for team in &row.accepted_for {
            let _ = writeln!(text, "+ {} ({})", team.title, team.number);
        }
        text.push_str("\n\n");
        text.push_str("Declined for teams:\n");
        for team in &row.declined_for {
            let _ = writeln!(text, "- {} ({})", team.title, team.number);
        }
        text.push('\n');
        text.push_str(ROW_SEPARATOR);
        text.push_str("\n\n");
    }

    text
}
