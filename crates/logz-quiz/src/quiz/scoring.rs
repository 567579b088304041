//! Weighted diagnostic score.
//!
//! Each answered question contributes `question_weight * normalized_option_weight`,
//! where the option weight is looked up by the option's display position. The
//! first option normalizes to 1.0 and the fourth to 0.25.

use std::collections::BTreeMap;

use serde::Serialize;

pub const OPTION_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];
pub const QUESTION_WEIGHTS: [f64; 5] = [3.0, 2.5, 2.0, 1.5, 1.0];

/// Weight tables used to turn answers into contributions.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringWeights {
    option_weights: [f64; 4],
    question_weights: Vec<f64>,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::new(OPTION_WEIGHTS, QUESTION_WEIGHTS.to_vec())
    }
}

impl ScoringWeights {
    pub fn new(option_weights: [f64; 4], question_weights: Vec<f64>) -> Self {
        Self {
            option_weights,
            question_weights,
        }
    }

    pub fn max_option_weight(&self) -> f64 {
        self.option_weights[0]
    }

    /// Positions past the table weigh nothing.
    pub fn option_weight(&self, option_index: usize) -> f64 {
        self.option_weights.get(option_index).copied().unwrap_or(0.0)
    }

    pub fn normalized(&self, option_index: usize) -> f64 {
        let max = self.max_option_weight();
        if max == 0.0 {
            return 0.0;
        }
        self.option_weight(option_index) / max
    }

    /// Indices past the table reuse its last entry; an empty table weighs 1.0.
    pub fn question_weight(&self, question_index: usize) -> f64 {
        self.question_weights
            .get(question_index)
            .or_else(|| self.question_weights.last())
            .copied()
            .unwrap_or(1.0)
    }

    pub fn contribution(&self, question_index: usize, option_index: usize) -> f64 {
        self.question_weight(question_index) * self.normalized(option_index)
    }

    /// Score reached when every one of `question_count` questions gets its first option.
    pub fn max_possible(&self, question_count: usize) -> f64 {
        (0..question_count)
            .map(|index| self.question_weight(index))
            .sum()
    }
}

/// Contribution of a single answer under the default weight tables.
pub fn score(question_index: usize, option_index: usize) -> f64 {
    ScoringWeights::default().contribution(question_index, option_index)
}

pub fn total_score<I>(contributions: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    contributions.into_iter().sum()
}

/// `100 * total / max`, clamped to `[0, 100]`; a non-positive max yields 0.
pub fn percentage(total: f64, max_possible: f64) -> f64 {
    if max_possible <= 0.0 || !total.is_finite() {
        return 0.0;
    }
    (total / max_possible * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnswerRecord {
    pub question_index: usize,
    /// Display position of the chosen option.
    pub option_index: usize,
    pub contribution: f64,
}

/// Answers keyed by question index plus the running total.
#[derive(Debug, Clone, Default)]
pub struct ScoreSheet {
    answers: BTreeMap<usize, AnswerRecord>,
    total: f64,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an answer, replacing any earlier answer to the same question.
    /// Returns the replaced record.
    pub fn record(&mut self, record: AnswerRecord) -> Option<AnswerRecord> {
        let previous = self.answers.insert(record.question_index, record);
        let previous_contribution = previous.map(|old| old.contribution).unwrap_or(0.0);
        self.total = self.total - previous_contribution + record.contribution;
        previous
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn get(&self, question_index: usize) -> Option<&AnswerRecord> {
        self.answers.get(&question_index)
    }

    pub fn answers(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.answers.values()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
        self.total = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn later_positions_never_contribute_more() {
        let weights = ScoringWeights::default();
        for question_index in 0..7 {
            let contributions: Vec<f64> = (0..4)
                .map(|option_index| weights.contribution(question_index, option_index))
                .collect();
            assert!(contributions.windows(2).all(|pair| pair[0] >= pair[1]));
        }
    }

    #[test]
    fn first_position_normalizes_to_one() {
        let weights = ScoringWeights::default();
        assert_close(weights.normalized(0), 1.0);
        assert_close(weights.normalized(1), 0.75);
        assert_close(weights.normalized(2), 0.5);
        assert_close(weights.normalized(3), 0.25);
        assert_close(score(0, 0), 3.0);
        assert_close(score(1, 2), 2.5 * 0.5);
    }

    #[test]
    fn position_past_the_table_contributes_nothing() {
        let weights = ScoringWeights::default();
        assert_close(weights.option_weight(4), 0.0);
        assert_close(weights.contribution(0, 9), 0.0);
    }

    #[test]
    fn question_weight_clamps_to_last_entry() {
        let weights = ScoringWeights::default();
        assert_close(weights.question_weight(4), 1.0);
        assert_close(weights.question_weight(5), 1.0);
        assert_close(weights.question_weight(42), 1.0);

        let empty = ScoringWeights::new(OPTION_WEIGHTS, Vec::new());
        assert_close(empty.question_weight(0), 1.0);
    }

    #[test]
    fn zero_max_option_weight_normalizes_to_zero() {
        let weights = ScoringWeights::new([0.0, 0.3, 0.2, 0.1], QUESTION_WEIGHTS.to_vec());
        for option_index in 0..4 {
            assert_close(weights.normalized(option_index), 0.0);
        }
    }

    #[test]
    fn max_possible_sums_clamped_weights() {
        let weights = ScoringWeights::default();
        assert_close(weights.max_possible(5), 10.0);
        assert_close(weights.max_possible(7), 12.0);
        assert_close(weights.max_possible(0), 0.0);
    }

    #[test]
    fn re_answering_replaces_contribution() {
        let weights = ScoringWeights::default();
        let mut sheet = ScoreSheet::new();
        sheet.record(AnswerRecord {
            question_index: 0,
            option_index: 0,
            contribution: weights.contribution(0, 0),
        });
        let replaced = sheet.record(AnswerRecord {
            question_index: 0,
            option_index: 3,
            contribution: weights.contribution(0, 3),
        });

        assert_eq!(replaced.map(|record| record.option_index), Some(0));
        assert_eq!(sheet.len(), 1);
        assert_close(sheet.total(), 0.75);
    }

    #[test]
    fn percentage_is_clamped() {
        assert_close(percentage(15.0, 10.0), 100.0);
        assert_close(percentage(-1.0, 10.0), 0.0);
        assert_close(percentage(5.0, 10.0), 50.0);
        assert_close(percentage(5.0, 0.0), 0.0);
    }

    #[test]
    fn total_score_sums_contributions() {
        assert_close(total_score([3.0, 0.625, 1.0]), 4.625);
        assert_close(total_score(Vec::new()), 0.0);
    }
}
