use std::collections::BTreeMap;

use crate::model::{Grade, Round};
use crate::store::Competition;

/// One team's line in a round block: solved flags aligned with the credited
/// question numbers, counts for this and the previous round, and the score
/// summed from final question ratings.
#[derive(Debug, Clone)]
pub struct TeamRow {
    pub team_number: u32,
    pub team_title: String,
    pub answer_flags: Vec<bool>,
    pub solved_this_round: u32,
    pub solved_previous_round: u32,
    pub score: u32,
}

/// Computed standings for one round.
#[derive(Debug, Clone)]
pub struct RoundStandings {
    pub round: Round,
    pub question_numbers: Vec<u32>,
    /// Final difficulty rating per question: 1 plus one for every team
    /// that did not solve it in this round.
    pub ratings: BTreeMap<u32, u32>,
    /// Rows ordered for display: solved this round, then solved previous
    /// round, then score (all descending), then title.
    pub rows: Vec<TeamRow>,
}

impl RoundStandings {
    pub fn max_score(&self) -> u32 {
        self.rows.iter().map(|row| row.score).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct Standings {
    pub preliminary: RoundStandings,
    pub main: RoundStandings,
}

impl Standings {
    pub fn for_round(&self, round: Round) -> &RoundStandings {
        match round {
            Round::Preliminary => &self.preliminary,
            Round::Main => &self.main,
        }
    }
}

/// Compute both round blocks. The preliminary round goes first so its
/// per-team solved counts can be carried into the main-round rows as the
/// informational "solved in previous round" column.
pub fn compute_standings(competition: &Competition) -> Standings {
    let preliminary = compute_round(competition, Round::Preliminary, None);
    let main = compute_round(competition, Round::Main, Some(&preliminary));
    Standings { preliminary, main }
}

/// Two ordered passes, exactly in this sequence:
///
/// 1. Scan teams in snapshot order; every question a team did not solve
///    gets its rating bumped immediately. The resulting ratings depend on
///    that declared team order and on nothing else.
/// 2. Only after the scan has finished for all teams, sum each team's score
///    from the now-final ratings, so a team's score never depends on its own
///    position within the scan.
fn compute_round(
    competition: &Competition,
    round: Round,
    previous: Option<&RoundStandings>,
) -> RoundStandings {
    let question_numbers = competition.credited_numbers().to_vec();
    let mut ratings: BTreeMap<u32, u32> =
        question_numbers.iter().map(|&number| (number, 1)).collect();

    let mut rows: Vec<TeamRow> = Vec::with_capacity(competition.teams().len());
    for team in competition.teams() {
        let mut answer_flags = Vec::with_capacity(question_numbers.len());
        let mut solved_this_round = 0u32;
        for &question_number in &question_numbers {
            let solved = competition
                .governing_answer(team.id, question_number, Some(round))
                .map(|answer| answer.grade == Grade::Accepted)
                .unwrap_or(false);
            answer_flags.push(solved);
            if solved {
                solved_this_round += 1;
            } else if let Some(rating) = ratings.get_mut(&question_number) {
                *rating += 1;
            }
        }

        let solved_previous_round = previous
            .and_then(|standings| {
                standings
                    .rows
                    .iter()
                    .find(|row| row.team_number == team.number)
            })
            .map(|row| row.solved_this_round)
            .unwrap_or(0);

        rows.push(TeamRow {
            team_number: team.number,
            team_title: team.title.clone(),
            answer_flags,
            solved_this_round,
            solved_previous_round,
            score: 0,
        });
    }

    for row in &mut rows {
        let mut score = 0;
        for (&solved, &question_number) in row.answer_flags.iter().zip(&question_numbers) {
            if solved {
                score += ratings[&question_number];
            }
        }
        row.score = score;
    }

    rows.sort_by(|a, b| {
        b.solved_this_round
            .cmp(&a.solved_this_round)
            .then(b.solved_previous_round.cmp(&a.solved_previous_round))
            .then(b.score.cmp(&a.score))
            .then(a.team_title.cmp(&b.team_title))
    });

    RoundStandings {
        round,
        question_numbers,
        ratings,
        rows,
    }
}
