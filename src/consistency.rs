use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::model::Grade;
use crate::store::Competition;

/// Team reference carried into the violations report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMark {
    pub number: u32,
    pub title: String,
}

/// One (question, answer text) group graded both ways.
#[derive(Debug, Clone)]
pub struct ConsistencyRow {
    pub question_number: u32,
    pub answer_body: String,
    pub accepted_for: Vec<TeamMark>,
    pub declined_for: Vec<TeamMark>,
}

/// Result of the cross-team grading check. A non-empty row list blocks the
/// results and collection reports until the grades are corrected.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyReport {
    pub rows: Vec<ConsistencyRow>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Group the governing answers by (question number, answer body), with the
/// duty comment excluded from the key, and flag every group where the same
/// text was both accepted and declined. Ungraded answers sit on neither
/// side. Rows come out sorted by question number, then body; team lists
/// keep snapshot order.
pub fn check(competition: &Competition) -> Result<ConsistencyReport, EngineError> {
    let mut groups: BTreeMap<(u32, String), (Vec<TeamMark>, Vec<TeamMark>)> = BTreeMap::new();

    for answer in competition.resolved_answers() {
        let team = competition.team_by_id(answer.team_id).ok_or(
            EngineError::TeamLookupFailed {
                team_id: answer.team_id,
                question_number: answer.question_number,
            },
        )?;
        let mark = TeamMark {
            number: team.number,
            title: team.title.clone(),
        };
        let group = groups
            .entry((answer.question_number, answer.body.clone()))
            .or_default();
        match answer.grade {
            Grade::Accepted => group.0.push(mark),
            Grade::NotAccepted => group.1.push(mark),
            Grade::Ungraded => {}
        }
    }

    let rows = groups
        .into_iter()
        .filter(|(_, (accepted_for, declined_for))| {
            !accepted_for.is_empty() && !declined_for.is_empty()
        })
        .map(
            |((question_number, answer_body), (accepted_for, declined_for))| ConsistencyRow {
                question_number,
                answer_body,
                accepted_for,
                declined_for,
            },
        )
        .collect();

    Ok(ConsistencyReport { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, Question, Round, Team};
    use chrono::DateTime;

    fn sample_team(id: u64, number: u32, title: &str) -> Team {
        Team {
            id,
            number,
            title: title.to_string(),
        }
    }

    fn sample_question(number: u32) -> Question {
        Question {
            id: number as u64,
            number,
            credited: true,
        }
    }

    fn sample_answer(team_id: u64, question_number: u32, body: &str, grade: Grade) -> Answer {
        Answer {
            team_id,
            question_number,
            round: Round::Preliminary,
            body: body.to_string(),
            comment: None,
            grade,
            sent_on: DateTime::from_timestamp(100, 0).unwrap(),
        }
    }

    fn sample_competition(answers: Vec<Answer>) -> Competition {
        Competition::new(
            vec![sample_team(1, 1, "Alpha"), sample_team(2, 2, "Beta")],
            vec![sample_question(5), sample_question(6)],
            answers,
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_split_grades_for_identical_text_are_flagged() {
        let competition = sample_competition(vec![
            sample_answer(1, 5, "Paris", Grade::Accepted),
            sample_answer(2, 5, "Paris", Grade::NotAccepted),
        ]);
        let report = check(&competition).unwrap();
        assert!(!report.is_consistent());
        assert_eq!(report.rows.len(), 1);

        let row = &report.rows[0];
        assert_eq!(row.question_number, 5);
        assert_eq!(row.answer_body, "Paris");
        assert_eq!(row.accepted_for, vec![TeamMark { number: 1, title: "Alpha".to_string() }]);
        assert_eq!(row.declined_for, vec![TeamMark { number: 2, title: "Beta".to_string() }]);
    }

    #[test]
    fn test_matching_grades_are_consistent() {
        let competition = sample_competition(vec![
            sample_answer(1, 5, "Paris", Grade::Accepted),
            sample_answer(2, 5, "Paris", Grade::Accepted),
            sample_answer(1, 6, "Lyon", Grade::NotAccepted),
            sample_answer(2, 6, "Lyon", Grade::NotAccepted),
        ]);
        assert!(check(&competition).unwrap().is_consistent());
    }

    #[test]
    fn test_different_texts_never_conflict() {
        let competition = sample_competition(vec![
            sample_answer(1, 5, "Paris", Grade::Accepted),
            sample_answer(2, 5, "London", Grade::NotAccepted),
        ]);
        assert!(check(&competition).unwrap().is_consistent());
    }

    #[test]
    fn test_ungraded_answers_sit_on_neither_side() {
        let competition = sample_competition(vec![
            sample_answer(1, 5, "Paris", Grade::Accepted),
            sample_answer(2, 5, "Paris", Grade::Ungraded),
        ]);
        assert!(check(&competition).unwrap().is_consistent());
    }

    #[test]
    fn test_comment_is_excluded_from_the_key() {
        let mut accepted = sample_answer(1, 5, "Paris", Grade::Accepted);
        accepted.comment = Some("confident".to_string());
        let declined = sample_answer(2, 5, "Paris", Grade::NotAccepted);
        let competition = sample_competition(vec![accepted, declined]);
        assert_eq!(check(&competition).unwrap().rows.len(), 1);
    }

    #[test]
    fn test_whitespace_variants_collide_after_normalization() {
        let competition = sample_competition(vec![
            sample_answer(1, 5, "Santa  Barbara", Grade::Accepted),
            sample_answer(2, 5, "Santa\tBarbara", Grade::NotAccepted),
        ]);
        let report = check(&competition).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].answer_body, "Santa Barbara");
    }

    #[test]
    fn test_rows_sorted_by_question_then_body() {
        let competition = sample_competition(vec![
            sample_answer(1, 6, "Zurich", Grade::Accepted),
            sample_answer(2, 6, "Zurich", Grade::NotAccepted),
            sample_answer(1, 5, "Paris", Grade::Accepted),
            sample_answer(2, 5, "Paris", Grade::NotAccepted),
        ]);
        let report = check(&competition).unwrap();
        let keys: Vec<(u32, &str)> = report
            .rows
            .iter()
            .map(|row| (row.question_number, row.answer_body.as_str()))
            .collect();
        assert_eq!(keys, vec![(5, "Paris"), (6, "Zurich")]);
    }

    #[test]
    fn test_only_the_governing_answer_is_checked() {
        // Beta's declined record is superseded by a matching accepted one.
        let mut first = sample_answer(2, 5, "Paris", Grade::NotAccepted);
        first.sent_on = DateTime::from_timestamp(100, 0).unwrap();
        let mut second = sample_answer(2, 5, "Paris", Grade::Accepted);
        second.sent_on = DateTime::from_timestamp(200, 0).unwrap();
        let competition = sample_competition(vec![
            sample_answer(1, 5, "Paris", Grade::Accepted),
            first,
            second,
        ]);
        assert!(check(&competition).unwrap().is_consistent());
    }
}
