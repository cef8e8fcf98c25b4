use std::collections::{HashMap, HashSet};

use crate::error::EngineError;
use crate::model::{normalize_answer_body, Answer, Email, Question, Round, Team};
use crate::resolver;

/// Upper bound on team display numbers, matching the registration form.
pub const MAX_TEAM_NUMBER: u32 = 99_999;

/// A validated, immutable snapshot of one competition.
///
/// Every engine component reads through the narrow queries below; nothing
/// here is mutated after construction, so one `Competition` per report pass
/// gives the consistent view the scoring invariants rely on.
#[derive(Debug)]
pub struct Competition {
    teams: Vec<Team>,
    answers: Vec<Answer>,
    emails: Vec<Email>,
    team_index: HashMap<u64, usize>,
    credited_numbers: Vec<u32>,
    out_of_competition_numbers: Vec<u32>,
}

impl Competition {
    /// Validate raw records and build the snapshot. Answer bodies are
    /// normalized here (whitespace runs collapsed), so every later text
    /// comparison is plain equality.
    pub fn new(
        teams: Vec<Team>,
        questions: Vec<Question>,
        mut answers: Vec<Answer>,
        emails: Vec<Email>,
    ) -> Result<Self, EngineError> {
        let mut seen_ids = HashSet::new();
        let mut seen_numbers = HashSet::new();
        let mut seen_titles = HashSet::new();
        for team in &teams {
            if !seen_ids.insert(team.id) {
                return Err(EngineError::DuplicateTeamId { id: team.id });
            }
            if team.number == 0 || team.number > MAX_TEAM_NUMBER {
                return Err(EngineError::TeamNumberOutOfBounds {
                    number: team.number,
                    max: MAX_TEAM_NUMBER,
                });
            }
            if team.title.is_empty() {
                return Err(EngineError::EmptyTeamTitle { id: team.id });
            }
            if !seen_numbers.insert(team.number) {
                return Err(EngineError::DuplicateTeamNumber { number: team.number });
            }
            if !seen_titles.insert(team.title.clone()) {
                return Err(EngineError::DuplicateTeamTitle {
                    title: team.title.clone(),
                });
            }
        }

        let mut question_numbers = HashSet::new();
        let mut credited_numbers = Vec::new();
        let mut out_of_competition_numbers = Vec::new();
        for question in &questions {
            if question.number == 0 {
                return Err(EngineError::NonPositiveQuestionNumber { id: question.id });
            }
            if !question_numbers.insert(question.number) {
                return Err(EngineError::DuplicateQuestionNumber {
                    number: question.number,
                });
            }
            if question.credited {
                credited_numbers.push(question.number);
            } else {
                out_of_competition_numbers.push(question.number);
            }
        }
        if credited_numbers.is_empty() {
            return Err(EngineError::EmptyQuestionRange);
        }
        credited_numbers.sort_unstable();
        out_of_competition_numbers.sort_unstable();

        let team_index: HashMap<u64, usize> = teams
            .iter()
            .enumerate()
            .map(|(index, team)| (team.id, index))
            .collect();

        for answer in &mut answers {
            if !team_index.contains_key(&answer.team_id) {
                return Err(EngineError::UnknownAnswerTeam {
                    team_id: answer.team_id,
                    question_number: answer.question_number,
                });
            }
            if !question_numbers.contains(&answer.question_number) {
                return Err(EngineError::UnknownAnswerQuestion {
                    team_id: answer.team_id,
                    question_number: answer.question_number,
                });
            }
            answer.body = normalize_answer_body(&answer.body);
        }

        for email in &emails {
            if !team_index.contains_key(&email.team_id) {
                return Err(EngineError::UnknownEmailTeam {
                    team_id: email.team_id,
                });
            }
        }

        Ok(Self {
            teams,
            answers,
            emails,
            team_index,
            credited_numbers,
            out_of_competition_numbers,
        })
    }

    /// Teams in snapshot order. This is the declared, fixed iteration order
    /// for the rating scan; re-ordering the input changes the ratings.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team_by_id(&self, id: u64) -> Option<&Team> {
        self.team_index.get(&id).map(|&index| &self.teams[index])
    }

    /// Credited question numbers, ascending. Rating and consistency
    /// computations run over exactly this set.
    pub fn credited_numbers(&self) -> &[u32] {
        &self.credited_numbers
    }

    pub fn out_of_competition_numbers(&self) -> &[u32] {
        &self.out_of_competition_numbers
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn governing_answer(
        &self,
        team_id: u64,
        question_number: u32,
        round: Option<Round>,
    ) -> Option<&Answer> {
        resolver::governing_answer(&self.answers, team_id, question_number, round)
    }

    /// One governing answer per (team, credited question) across both
    /// rounds, in (question, team snapshot order) order. Input for the
    /// consistency check and the collection report.
    pub fn resolved_answers(&self) -> Vec<&Answer> {
        let mut resolved = Vec::new();
        for &question_number in &self.credited_numbers {
            for team in &self.teams {
                if let Some(answer) = self.governing_answer(team.id, question_number, None) {
                    resolved.push(answer);
                }
            }
        }
        resolved
    }

    pub fn emails_for_round(&self, round: Round) -> impl Iterator<Item = &Email> {
        self.emails.iter().filter(move |email| email.round == round)
    }

    pub fn email_count(&self) -> usize {
        self.emails.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Grade;
    use chrono::DateTime;

    fn sample_team(id: u64, number: u32, title: &str) -> Team {
        Team {
            id,
            number,
            title: title.to_string(),
        }
    }

    fn sample_question(id: u64, number: u32, credited: bool) -> Question {
        Question {
            id,
            number,
            credited,
        }
    }

    fn sample_answer(team_id: u64, question_number: u32, body: &str) -> Answer {
        Answer {
            team_id,
            question_number,
            round: Round::Preliminary,
            body: body.to_string(),
            comment: None,
            grade: Grade::Accepted,
            sent_on: DateTime::from_timestamp(100, 0).unwrap(),
        }
    }

    #[test]
    fn test_splits_credited_and_out_of_competition_numbers() {
        let competition = Competition::new(
            vec![sample_team(1, 1, "Alpha")],
            vec![
                sample_question(1, 3, true),
                sample_question(2, 1, true),
                sample_question(3, 2, false),
            ],
            vec![],
            vec![],
        )
        .unwrap();
        assert_eq!(competition.credited_numbers(), &[1, 3]);
        assert_eq!(competition.out_of_competition_numbers(), &[2]);
    }

    #[test]
    fn test_rejects_snapshot_without_credited_questions() {
        let result = Competition::new(
            vec![sample_team(1, 1, "Alpha")],
            vec![sample_question(1, 1, false)],
            vec![],
            vec![],
        );
        assert_eq!(result.unwrap_err(), EngineError::EmptyQuestionRange);
    }

    #[test]
    fn test_rejects_duplicate_team_number() {
        let result = Competition::new(
            vec![sample_team(1, 7, "Alpha"), sample_team(2, 7, "Beta")],
            vec![sample_question(1, 1, true)],
            vec![],
            vec![],
        );
        assert_eq!(
            result.unwrap_err(),
            EngineError::DuplicateTeamNumber { number: 7 }
        );
    }

    #[test]
    fn test_rejects_duplicate_team_id() {
        // Two rows sharing an id would both resolve the same answer set and
        // double-count it, so the snapshot must not validate.
        let result = Competition::new(
            vec![sample_team(1, 1, "Alpha"), sample_team(1, 2, "Beta")],
            vec![sample_question(1, 1, true)],
            vec![sample_answer(1, 1, "Paris")],
            vec![],
        );
        assert_eq!(result.unwrap_err(), EngineError::DuplicateTeamId { id: 1 });
    }

    #[test]
    fn test_rejects_answer_for_unknown_team() {
        let result = Competition::new(
            vec![sample_team(1, 1, "Alpha")],
            vec![sample_question(1, 1, true)],
            vec![sample_answer(99, 1, "Paris")],
            vec![],
        );
        assert_eq!(
            result.unwrap_err(),
            EngineError::UnknownAnswerTeam {
                team_id: 99,
                question_number: 1
            }
        );
    }

    #[test]
    fn test_rejects_answer_for_unknown_question() {
        let result = Competition::new(
            vec![sample_team(1, 1, "Alpha")],
            vec![sample_question(1, 1, true)],
            vec![sample_answer(1, 42, "Paris")],
            vec![],
        );
        assert_eq!(
            result.unwrap_err(),
            EngineError::UnknownAnswerQuestion {
                team_id: 1,
                question_number: 42
            }
        );
    }

    #[test]
    fn test_normalizes_answer_bodies_on_load() {
        let competition = Competition::new(
            vec![sample_team(1, 1, "Alpha")],
            vec![sample_question(1, 1, true)],
            vec![sample_answer(1, 1, "Santa\t\n  Barbara")],
            vec![],
        )
        .unwrap();
        assert_eq!(competition.answers()[0].body, "Santa Barbara");
    }

    #[test]
    fn test_resolved_answers_take_latest_across_rounds() {
        let mut early = sample_answer(1, 1, "first take");
        early.round = Round::Preliminary;
        let mut late = sample_answer(1, 1, "second take");
        late.round = Round::Main;
        late.sent_on = DateTime::from_timestamp(200, 0).unwrap();

        let competition = Competition::new(
            vec![sample_team(1, 1, "Alpha")],
            vec![sample_question(1, 1, true)],
            vec![early, late],
            vec![],
        )
        .unwrap();

        let resolved = competition.resolved_answers();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].body, "second take");
    }
}
