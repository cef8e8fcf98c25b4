use std::collections::BTreeMap;

use crate::model::Grade;
use crate::store::Competition;

/// One distinct answer text and how many teams submitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFrequency {
    pub text: String,
    pub count: u32,
}

/// All graded answers to one question, grouped by text.
#[derive(Debug, Clone)]
pub struct QuestionBlock {
    pub question_number: u32,
    pub accepted: Vec<AnswerFrequency>,
    pub declined: Vec<AnswerFrequency>,
}

/// Group the governing graded answers by question and display text (body
/// plus duty comment), counting occurrences across teams. Within a question
/// both sides are ordered by text; blocks are ordered by question number.
/// Questions with no graded answers are omitted.
pub fn aggregate(competition: &Competition) -> Vec<QuestionBlock> {
    let mut per_question: BTreeMap<u32, BTreeMap<String, (u32, u32)>> = BTreeMap::new();

    for answer in competition.resolved_answers() {
        if !answer.grade.is_graded() {
            continue;
        }
        let counts = per_question
            .entry(answer.question_number)
            .or_default()
            .entry(answer.display_text())
            .or_insert((0, 0));
        match answer.grade {
            Grade::Accepted => counts.0 += 1,
            Grade::NotAccepted => counts.1 += 1,
            Grade::Ungraded => unreachable!(),
        }
    }

    per_question
        .into_iter()
        .map(|(question_number, texts)| {
            let mut accepted = Vec::new();
            let mut declined = Vec::new();
            for (text, (accepted_count, declined_count)) in texts {
                if accepted_count > 0 {
                    accepted.push(AnswerFrequency {
                        text: text.clone(),
                        count: accepted_count,
                    });
                }
                if declined_count > 0 {
                    declined.push(AnswerFrequency {
                        text,
                        count: declined_count,
                    });
                }
            }
            QuestionBlock {
                question_number,
                accepted,
                declined,
            }
        })
        .collect()
}
