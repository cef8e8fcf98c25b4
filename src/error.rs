use thiserror::Error;

/// Errors raised while validating a snapshot or computing a report.
///
/// A consistency violation is deliberately not represented here: it is a
/// routine result state with its own report, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no credited questions in the snapshot")]
    EmptyQuestionRange,
    #[error("question number must be positive (question id {id})")]
    NonPositiveQuestionNumber { id: u64 },
    #[error("duplicate question number {number}")]
    DuplicateQuestionNumber { number: u32 },
    #[error("team number {number} is out of bounds (1..={max})")]
    TeamNumberOutOfBounds { number: u32, max: u32 },
    #[error("duplicate team id {id}")]
    DuplicateTeamId { id: u64 },
    #[error("duplicate team number {number}")]
    DuplicateTeamNumber { number: u32 },
    #[error("duplicate team title '{title}'")]
    DuplicateTeamTitle { title: String },
    #[error("team {id} has an empty title")]
    EmptyTeamTitle { id: u64 },
    #[error("answer references unknown team {team_id} (question {question_number})")]
    UnknownAnswerTeam { team_id: u64, question_number: u32 },
    #[error("answer references unknown question {question_number} (team {team_id})")]
    UnknownAnswerQuestion { team_id: u64, question_number: u32 },
    #[error("email references unknown team {team_id}")]
    UnknownEmailTeam { team_id: u64 },
    #[error(
        "resolved answer for question {question_number} references team {team_id} \
         missing from the team map"
    )]
    TeamLookupFailed { team_id: u64, question_number: u32 },
}
