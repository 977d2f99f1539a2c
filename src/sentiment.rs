use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::SentimentLabel;

static LEXICON: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, f64>>(raw).expect("valid sentiment lexicon")
});

/// Normalization constant for the compound score (approaches ±1 as |sum| grows).
const ALPHA: f64 = 15.0;
/// Valence multiplier applied when a negator precedes the word.
const NEGATION_SCALAR: f64 = -0.74;

/// Four polarity sub-scores for one piece of text.
///
/// `negative`, `neutral` and `positive` are proportions summing to ~1 (or all
/// zero for text without tokens); `compound` is the aggregate in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

/// Black-box text scorer used by the enrichment stage.
pub trait SentimentScorer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> PolarityScores;
}

/// Map a compound score onto a label. Both thresholds are inclusive.
pub fn label_for(compound: f64) -> SentimentLabel {
    if compound >= 0.05 {
        SentimentLabel::Positive
    } else if compound <= -0.05 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Lexicon-based scorer over the embedded valence table.
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn word_valence(&self, w: &str) -> f64 {
        LEXICON.get(w).copied().unwrap_or(0.0)
    }

    /// Per-token valences after negation handling. Non-lexicon tokens are 0.
    fn valences(&self, text: &str) -> Vec<f64> {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut out = Vec::with_capacity(tokens.len());

        for i in 0..tokens.len() {
            let base = self.word_valence(tokens[i].as_str());
            if base == 0.0 {
                out.push(0.0);
                continue;
            }
            // negator within the previous three tokens?
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            out.push(if negated { base * NEGATION_SCALAR } else { base });
        }

        out
    }
}

impl SentimentScorer for LexiconScorer {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        let valences = self.valences(text);
        if valences.is_empty() {
            return PolarityScores::default();
        }

        let sum: f64 = valences.iter().sum();
        let compound = (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for v in &valences {
            if *v > 0.0 {
                pos_sum += v + 1.0;
            } else if *v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        let total = pos_sum + neg_sum.abs() + neu_count;

        PolarityScores {
            negative: round_to(neg_sum.abs() / total, 3),
            neutral: round_to(neu_count / total, 3),
            positive: round_to(pos_sum / total, 3),
            compound: round_to(compound, 4),
        }
    }
}

fn round_to(x: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (x * f).round() / f
}

/// Lower-cased alphanumeric tokens; apostrophes stay inside words ("isn't").
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "nor"
            | "none"
            | "nothing"
            | "isn't"
            | "isnt"
            | "wasn't"
            | "wasnt"
            | "aren't"
            | "arent"
            | "won't"
            | "wont"
            | "can't"
            | "cant"
            | "don't"
            | "dont"
            | "doesn't"
            | "doesnt"
            | "didn't"
            | "didnt"
            | "cannot"
            | "without"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_thresholds_are_inclusive() {
        assert_eq!(label_for(0.05), SentimentLabel::Positive);
        assert_eq!(label_for(-0.05), SentimentLabel::Negative);
        assert_eq!(label_for(0.0499), SentimentLabel::Neutral);
        assert_eq!(label_for(-0.0499), SentimentLabel::Neutral);
        assert_eq!(label_for(0.0), SentimentLabel::Neutral);
        assert_eq!(label_for(1.0), SentimentLabel::Positive);
        assert_eq!(label_for(-1.0), SentimentLabel::Negative);
    }

    #[test]
    fn empty_text_scores_zero() {
        let s = LexiconScorer::new().polarity_scores("   ");
        assert_eq!(s, PolarityScores::default());
    }

    #[test]
    fn text_without_lexicon_words_is_fully_neutral() {
        let s = LexiconScorer::new().polarity_scores("The committee met on Tuesday");
        assert_eq!(s.compound, 0.0);
        assert_eq!(s.neutral, 1.0);
        assert_eq!(s.positive, 0.0);
        assert_eq!(s.negative, 0.0);
    }

    #[test]
    fn polarity_direction_follows_lexicon() {
        let scorer = LexiconScorer::new();
        let good = scorer.polarity_scores("A great victory and a wonderful day");
        let bad = scorer.polarity_scores("Deadly attack leaves many killed in tragic disaster");
        assert!(good.compound > 0.5, "{good:?}");
        assert!(bad.compound < -0.5, "{bad:?}");
        assert!(good.positive > good.negative);
        assert!(bad.negative > bad.positive);
    }

    #[test]
    fn negation_flips_polarity() {
        let scorer = LexiconScorer::new();
        let plain = scorer.polarity_scores("The plan is good");
        let negated = scorer.polarity_scores("The plan is not good");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn compound_stays_in_range() {
        let text = "great ".repeat(200);
        let s = LexiconScorer::new().polarity_scores(&text);
        assert!(s.compound <= 1.0 && s.compound > 0.99);
    }
}
