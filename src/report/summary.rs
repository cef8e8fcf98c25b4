use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::summary::SummaryReport;

/// Render the submission summary as the duty-robot message.
pub fn render(
    report: &SummaryReport,
    out_of_competition: &[u32],
    generated_at: DateTime<Utc>,
) -> String {
    let mut text = String::new();

    if let Some(note) = super::out_of_competition_note(out_of_competition) {
        text.push_str(&note);
        text.push_str("\n\n");
    }

    text.push_str("Dear experts!\n\n");
    text.push_str("This is the duty team robot speaking.\n\n");
    let _ = write!(
        text,
        "As of: {} UTC in the '{}' round, answers have been received from the teams:\n\n",
        generated_at.format("%A, %d.%m.%Y %H:%M"),
        report.round.label()
    );

    for row in &report.rows {
        let _ = writeln!(text, "{}  [{}]", row.team_title, row.email_count);
    }

    text.push_str("\n------------------\n");
    let _ = writeln!(text, "Total teams: {}", report.total_teams);
    let _ = writeln!(text, "Total emails: {}", report.total_emails);
    text.push_str("\n\n--\n\nGood luck\n\n-Robot\n\n\n-----------------------------------------------");

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Round;
    use crate::summary::SummaryRow;

    fn sample_report() -> SummaryReport {
        SummaryReport {
            round: Round::Preliminary,
            rows: vec![
                SummaryRow { team_title: "Alpha".to_string(), email_count: 2 },
                SummaryRow { team_title: "Beta".to_string(), email_count: 1 },
            ],
            total_teams: 2,
            total_emails: 3,
        }
    }

    #[test]
    fn test_summary_text() {
        let generated_at = DateTime::from_timestamp(0, 0).unwrap();
        let text = render(&sample_report(), &[], generated_at);
        let expected = "Dear experts!\n\n\
                        This is the duty team robot speaking.\n\n\
                        As of: Thursday, 01.01.1970 00:00 UTC in the 'Preliminary' round, \
                        answers have been received from the teams:\n\n\
                        Alpha  [2]\n\
                        Beta  [1]\n\
                        \n------------------\n\
                        Total teams: 2\n\
                        Total emails: 3\n\
                        \n\n--\n\nGood luck\n\n-Robot\n\n\n\
                        -----------------------------------------------";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_note_precedes_the_greeting() {
        let generated_at = DateTime::from_timestamp(0, 0).unwrap();
        let text = render(&sample_report(), &[9], generated_at);
        assert!(text.starts_with(
            "Question 9 was played out of competition.\n\nDear experts!\n\n"
        ));
    }
}
