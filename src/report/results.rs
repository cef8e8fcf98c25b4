use std::fmt::Write;

use crate::model::Round;
use crate::rating::{RoundStandings, Standings, TeamRow};

/// Column density of the results table. Full spells every question number
/// out in its own column, medium collapses the columns to single digits in
/// groups of five, short drops the grouping too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    Full,
    Medium,
    Short,
}

/// Fixed column widths shared by both round blocks. The question column is
/// wide enough for the largest credited question number and for the largest
/// rating a question can reach, which is one more than the team count.
struct Geometry {
    team_number_width: usize,
    question_number_width: usize,
    column_width: usize,
    digest_width: usize,
}

impl Geometry {
    fn new(standings: &Standings) -> Self {
        let rows = &standings.preliminary.rows;
        let team_number_width = rows
            .iter()
            .map(|row| digits(row.team_number))
            .max()
            .unwrap_or(1);
        let question_number_width = standings
            .preliminary
            .question_numbers
            .last()
            .map(|&number| digits(number))
            .unwrap_or(1);
        let rating_width = digits(rows.len() as u32 + 1);
        Geometry {
            team_number_width,
            question_number_width,
            column_width: question_number_width.max(rating_width),
            digest_width: question_number_width * 2 + 1,
        }
    }
}

/// Render the requested round blocks, both rounds separated by a blank
/// line when no single round is asked for.
pub fn render(standings: &Standings, layout: TableLayout, round: Option<Round>) -> String {
    let rounds: &[Round] = match round {
        Some(Round::Preliminary) => &[Round::Preliminary],
        Some(Round::Main) => &[Round::Main],
        None => &[Round::Preliminary, Round::Main],
    };
    let geometry = Geometry::new(standings);
    let blocks: Vec<String> = rounds
        .iter()
        .map(|&round| round_block(standings.for_round(round), &geometry, layout))
        .collect();
    blocks.join("\n")
}

fn round_block(standings: &RoundStandings, geometry: &Geometry, layout: TableLayout) -> String {
    let score_width = digits(standings.max_score());
    let mut block = String::new();

    let _ = writeln!(block, "STANDINGS  {}", standings.round.label());
    header_line(&mut block, standings, geometry, layout, score_width);
    for row in &standings.rows {
        team_line(&mut block, row, geometry, layout, score_width);
    }
    footer_lines(&mut block, standings, geometry, layout);
    block
}

fn header_line(
    block: &mut String,
    standings: &RoundStandings,
    geometry: &Geometry,
    layout: TableLayout,
    score_width: usize,
) {
    block.push_str(&right_aligned(geometry.team_number_width, "N"));
    block.push_str("  ");
    match layout {
        TableLayout::Full => {
            for &number in &standings.question_numbers {
                block.push_str(&right_aligned(geometry.column_width, &number.to_string()));
                block.push(' ');
            }
        }
        TableLayout::Medium => {
            for (index, _) in standings.question_numbers.iter().enumerate() {
                push_shorthand_digit(block, index);
                if (index + 1) % GROUP_SIZE == 0 {
                    block.push(' ');
                }
            }
        }
        TableLayout::Short => {
            for (index, _) in standings.question_numbers.iter().enumerate() {
                push_shorthand_digit(block, index);
            }
            block.push(' ');
        }
    }
    block.push_str(&right_aligned(geometry.digest_width, "A"));
    block.push(' ');
    block.push_str(&right_aligned(score_width, "S"));
    block.push_str(" TEAM\n");
}

fn team_line(
    block: &mut String,
    row: &TeamRow,
    geometry: &Geometry,
    layout: TableLayout,
    score_width: usize,
) {
    block.push_str(&right_aligned(
        geometry.team_number_width,
        &row.team_number.to_string(),
    ));
    block.push_str("  ");
    match layout {
        TableLayout::Full => {
            for &flag in &row.answer_flags {
                block.push_str(&right_aligned(geometry.column_width, flag_symbol(flag)));
                block.push(' ');
            }
        }
        TableLayout::Medium => {
            for (index, &flag) in row.answer_flags.iter().enumerate() {
                block.push_str(flag_symbol(flag));
                if (index + 1) % GROUP_SIZE == 0 {
                    block.push(' ');
                }
            }
        }
        TableLayout::Short => {
            for &flag in &row.answer_flags {
                block.push_str(flag_symbol(flag));
            }
            block.push(' ');
        }
    }
    block.push_str(&zero_padded(
        geometry.question_number_width,
        row.solved_this_round,
    ));
    block.push('.');
    block.push_str(&zero_padded(
        geometry.question_number_width,
        row.solved_previous_round,
    ));
    block.push(' ');
    block.push_str(&right_aligned(score_width, &row.score.to_string()));
    block.push(' ');
    block.push_str(&row.team_title);
    block.push('\n');
}

fn footer_lines(
    block: &mut String,
    standings: &RoundStandings,
    geometry: &Geometry,
    layout: TableLayout,
) {
    match layout {
        TableLayout::Full => {
            block.push_str(&right_aligned(geometry.team_number_width, "R"));
            block.push_str("  ");
            for &number in &standings.question_numbers {
                let rating = standings.ratings[&number];
                block.push_str(&right_aligned(geometry.column_width, &rating.to_string()));
                block.push(' ');
            }
            block.push('\n');
        }
        TableLayout::Medium | TableLayout::Short => {
            block.push_str("Rating\n");
            for &number in &standings.question_numbers {
                block.push_str(&right_aligned(geometry.column_width, &number.to_string()));
                block.push(' ');
            }
            block.push('\n');
            for &number in &standings.question_numbers {
                let rating = standings.ratings[&number];
                block.push_str(&right_aligned(geometry.column_width, &rating.to_string()));
                block.push(' ');
            }
            block.push('\n');
        }
    }
}

const GROUP_SIZE: usize = 5;

/// Single-digit column labels for the dense layouts: 1..9 then 0, cycling.
fn push_shorthand_digit(block: &mut String, index: usize) {
    let digit = (index + 1) % 10;
    let _ = write!(block, "{}", digit);
}

fn flag_symbol(flag: bool) -> &'static str {
    if flag {
        "+"
    } else {
        "-"
    }
}

fn right_aligned(width: usize, text: &str) -> String {
    format!("{:>width$}", text)
}

fn zero_padded(width: usize, value: u32) -> String {
    format!("{:0>width$}", value)
}

fn digits(value: u32) -> usize {
    value.to_string().len()
}
