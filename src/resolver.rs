use crate::model::{Answer, Round};

/// Select the governing answer for a (team, question) pair: the record with
/// the greatest submission time, regardless of its grade. An ungraded
/// resubmission supersedes an earlier accepted one; the duty team's latest
/// action is authoritative.
///
/// `round` of `None` considers submissions from both rounds.
///
/// Ties on the timestamp go to the record appearing later in the log.
/// `None` means the team never attempted the question, which is distinct
/// from "attempted but ungraded".
pub fn governing_answer<'a>(
    answers: &'a [Answer],
    team_id: u64,
    question_number: u32,
    round: Option<Round>,
) -> Option<&'a Answer> {
    let mut winner: Option<&Answer> = None;
    for answer in answers {
        if answer.team_id != team_id || answer.question_number != question_number {
            continue;
        }
        if let Some(round) = round {
            if answer.round != round {
                continue;
            }
        }
        match winner {
            Some(current) if answer.sent_on < current.sent_on => {}
            _ => winner = Some(answer),
        }
    }
    winner
}
