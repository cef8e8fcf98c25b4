use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Grade assigned to an answer by the duty team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// No grade recorded yet; excluded from scoring and consistency checks.
    #[default]
    Ungraded,
    Accepted,
    NotAccepted,
}

impl Grade {
    pub fn is_graded(self) -> bool {
        self != Grade::Ungraded
    }
}

/// Competition round. Answers and emails are tallied per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Round {
    Preliminary,
    Main,
}

impl Round {
    pub fn number(self) -> u8 {
        match self {
            Round::Preliminary => 1,
            Round::Main => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Round::Preliminary => "Preliminary",
            Round::Main => "Main",
        }
    }
}

impl TryFrom<u8> for Round {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Round::Preliminary),
            2 => Ok(Round::Main),
            other => Err(format!("round must be 1 or 2, got {}", other)),
        }
    }
}

impl From<Round> for u8 {
    fn from(round: Round) -> Self {
        round.number()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub number: u32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    pub number: u32,
    /// Credited questions count toward scoring; the rest are shown
    /// in reports as played out of competition.
    #[serde(default = "default_credited")]
    pub credited: bool,
}

fn default_credited() -> bool {
    true
}

/// One submission in the append-only answer log. Re-submissions and
/// re-gradings add new records; nothing is mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub team_id: u64,
    pub question_number: u32,
    pub round: Round,
    pub body: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub grade: Grade,
    /// Submission time, taken from the email the answer arrived in.
    pub sent_on: DateTime<Utc>,
}

impl Answer {
    /// Answer text as shown in the collection report: the body, with the
    /// duty comment appended after " % " when one is present.
    pub fn display_text(&self) -> String {
        match self.comment.as_deref() {
            Some(comment) if !comment.is_empty() => format!("{} % {}", self.body, comment),
            _ => self.body.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub team_id: u64,
    pub round: Round,
    pub sent_on: DateTime<Utc>,
}

/// Collapse every run of tab/CR/LF characters into a single space, then
/// collapse runs of spaces. Applied once when a snapshot is validated, so
/// all later answer-text comparisons are plain equality.
pub fn normalize_answer_body(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut previous_was_gap = false;
    for ch in raw.chars() {
        if matches!(ch, ' ' | '\t' | '\n' | '\r') {
            if !previous_was_gap {
                normalized.push(' ');
            }
            previous_was_gap = true;
        } else {
            normalized.push(ch);
            previous_was_gap = false;
        }
    }
    normalized
}
