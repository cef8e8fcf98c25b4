use std::collections::HashMap;

use crate::error::EngineError;
use crate::model::Round;
use crate::store::Competition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub team_title: String,
    pub email_count: u32,
}

/// Submission tally for one round: emails per team, alphabetical by title.
/// Teams that sent nothing in the round are omitted rather than zero-filled.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub round: Round,
    pub rows: Vec<SummaryRow>,
    pub total_teams: u32,
    pub total_emails: u32,
}

pub fn summarize(competition: &Competition, round: Round) -> Result<SummaryReport, EngineError> {
    let mut counts: HashMap<u64, u32> = HashMap::new();
    for email in competition.emails_for_round(round) {
        *counts.entry(email.team_id).or_insert(0) += 1;
    }

    let mut rows = Vec::with_capacity(counts.len());
    let mut total_emails = 0;
    for (team_id, email_count) in counts {
        let team = competition
            .team_by_id(team_id)
            .ok_or(EngineError::UnknownEmailTeam { team_id })?;
        total_emails += email_count;
        rows.push(SummaryRow {
            team_title: team.title.clone(),
            email_count,
        });
    }
    rows.sort_by(|a, b| a.team_title.cmp(&b.team_title));

    Ok(SummaryReport {
        round,
        total_teams: rows.len() as u32,
        rows,
        total_emails,
    })
}
