pub mod collection;
pub mod results;
pub mod summary;
pub mod violations;

pub use results::TableLayout;

use chrono::{DateTime, Utc};

use crate::error::EngineError;
use crate::model::Round;
use crate::store::Competition;
use crate::{collection as collection_data, consistency, rating, summary as summary_data};

/// Outcome of a report that runs behind the grading-consistency gate.
/// `Blocked` carries the violations report that replaces the numeric body;
/// numeric reports are only ever produced from consistent data.
#[derive(Debug)]
pub enum ReportOutcome {
    Ready(String),
    Blocked(String),
}

impl ReportOutcome {
    pub fn text(&self) -> &str {
        match self {
            ReportOutcome::Ready(text) | ReportOutcome::Blocked(text) => text,
        }
    }
}

/// Results table in the requested layout, both rounds or one.
pub fn results_report(
    competition: &Competition,
    layout: TableLayout,
    round: Option<Round>,
    generated_at: DateTime<Utc>,
) -> Result<ReportOutcome, EngineError> {
    gated_report(competition, "Results table", generated_at, |competition| {
        let standings = rating::compute_standings(competition);
        results::render(&standings, layout, round)
    })
}

/// Per-question collection of distinct answers with frequencies.
pub fn collection_report(
    competition: &Competition,
    generated_at: DateTime<Utc>,
) -> Result<ReportOutcome, EngineError> {
    gated_report(competition, "Answer collection", generated_at, |competition| {
        collection::render(&collection_data::aggregate(competition))
    })
}

/// Submission summary for one round. Counts emails only, so it is not
/// gated by the consistency check.
pub fn summary_report(
    competition: &Competition,
    round: Round,
    generated_at: DateTime<Utc>,
) -> Result<String, EngineError> {
    let report = summary_data::summarize(competition, round)?;
    Ok(summary::render(
        &report,
        competition.out_of_competition_numbers(),
        generated_at,
    ))
}

fn gated_report(
    competition: &Competition,
    report_title: &str,
    generated_at: DateTime<Utc>,
    build_body: impl FnOnce(&Competition) -> String,
) -> Result<ReportOutcome, EngineError> {
    let check = consistency::check(competition)?;

    let mut text = generated_at_line(generated_at);
    text.push_str("\n\n");

    if !check.is_consistent() {
        text.push_str(&violations::render(&check, report_title));
        return Ok(ReportOutcome::Blocked(text));
    }

    if let Some(note) = out_of_competition_note(competition.out_of_competition_numbers()) {
        text.push_str(&note);
        text.push_str("\n\n");
    }
    text.push_str(&build_body(competition));
    Ok(ReportOutcome::Ready(text))
}

pub(crate) fn generated_at_line(generated_at: DateTime<Utc>) -> String {
    format!(
        "Generated at: {}",
        generated_at.format("%A, %d.%m.%Y %H:%M")
    )
}

pub(crate) fn out_of_competition_note(numbers: &[u32]) -> Option<String> {
    if numbers.is_empty() {
        return None;
    }
    let listed = numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    Some(if numbers.len() == 1 {
        format!("Question {} was played out of competition.", listed)
    } else {
        format!("Questions {} were played out of competition.", listed)
    })
}
