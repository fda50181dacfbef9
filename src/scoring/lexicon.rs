//! Rule-based polarity scorer.
//!
//! Each token found in the valence lexicon contributes its valence, adjusted
//! by intensity modifiers and negations in the three preceding tokens. The sum
//! is mapped into (-1, 1) with `x / sqrt(x^2 + alpha)`.

use std::collections::{HashMap, HashSet};

use anyhow::Result;

use super::Scorer;

/// Normalisation constant; larger values flatten the curve.
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Applied to the valence of a word preceded by a negation.
const NEGATION_SCALAR: f64 = -0.74;

/// Intensity shift contributed by a booster (positive) or dampener (negative).
const BOOSTER_INCREMENT: f64 = 0.293;

/// Emphasis per exclamation mark, counted up to `MAX_EXCLAMATIONS`.
const EXCLAMATION_EMPHASIS: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

/// How many tokens before a sentiment word are searched for modifiers, and
/// the weight a modifier carries at each distance.
const MODIFIER_WINDOW: usize = 3;
const MODIFIER_DECAY: [f64; MODIFIER_WINDOW] = [1.0, 0.95, 0.9];

const VALENCES: &[(&str, f64)] = &[
    // positive
    ("love", 3.2),
    ("loved", 2.9),
    ("loves", 2.7),
    ("great", 3.1),
    ("good", 1.9),
    ("best", 3.2),
    ("better", 1.9),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("perfect", 2.7),
    ("beautiful", 2.9),
    ("happy", 2.7),
    ("glad", 2.0),
    ("nice", 1.8),
    ("easy", 1.9),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("fun", 2.3),
    ("helpful", 1.9),
    ("pleased", 1.9),
    ("recommend", 1.5),
    ("success", 2.7),
    ("successful", 2.8),
    ("win", 2.8),
    ("strong", 2.3),
    ("reliable", 1.9),
    ("thanks", 1.9),
    // negative
    ("hate", -2.7),
    ("hated", -3.2),
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("poor", -2.1),
    ("sad", -2.1),
    ("angry", -2.3),
    ("annoying", -1.7),
    ("boring", -1.3),
    ("ugly", -2.3),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("problem", -1.7),
    ("problems", -1.7),
    ("difficult", -1.5),
    ("disappointing", -2.2),
    ("disappointed", -1.9),
    ("useless", -1.8),
    ("wrong", -2.1),
    ("pain", -2.3),
    ("painful", -2.4),
    ("fear", -2.2),
    ("hurt", -2.4),
    ("stupid", -2.4),
    ("broken", -2.0),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("very", BOOSTER_INCREMENT),
    ("really", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT),
    ("incredibly", BOOSTER_INCREMENT),
    ("absolutely", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT),
    ("highly", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT),
    ("super", BOOSTER_INCREMENT),
    ("slightly", -BOOSTER_INCREMENT),
    ("somewhat", -BOOSTER_INCREMENT),
    ("barely", -BOOSTER_INCREMENT),
    ("hardly", -BOOSTER_INCREMENT),
    ("marginally", -BOOSTER_INCREMENT),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "cannot", "without",
    "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "cant", "wont", "shouldnt",
];

/// Scores text against a built-in valence lexicon.
pub struct LexiconScorer {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            valences: VALENCES.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token) || token.ends_with("n't")
    }

    /// Valence of the token at `index` after applying the modifiers before it.
    fn token_valence(&self, tokens: &[String], index: usize) -> Option<f64> {
        let mut valence = *self.valences.get(tokens[index].as_str())?;
        let direction = valence.signum();

        let window_start = index.saturating_sub(MODIFIER_WINDOW);
        let mut negated = false;
        for (distance, modifier) in tokens[window_start..index].iter().rev().enumerate() {
            if let Some(increment) = self.boosters.get(modifier.as_str()) {
                valence += increment * direction * MODIFIER_DECAY[distance];
            }
            if self.is_negation(modifier) {
                negated = true;
            }
        }

        if negated {
            valence *= NEGATION_SCALAR;
        }

        Some(valence)
    }
}

impl Scorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64> {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(normalize_token)
            .filter(|token| !token.is_empty())
            .collect();

        let mut sum: f64 = (0..tokens.len())
            .filter_map(|index| self.token_valence(&tokens, index))
            .sum();

        if sum != 0.0 {
            let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
            sum += exclamations * EXCLAMATION_EMPHASIS * sum.signum();
        }

        Ok(normalize(sum))
    }
}

fn normalize_token(raw: &str) -> String {
    raw.to_lowercase()
        .replace('\u{2019}', "'")
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .trim_matches('\'')
        .to_string()
}

fn normalize(sum: f64) -> f64 {
    if sum == 0.0 {
        return 0.0;
    }
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconScorer::new().score(text).unwrap()
    }

    #[test]
    fn text_without_lexicon_words_is_neutral() {
        assert_eq!(score("the table is made of oak"), 0.0);
        assert_eq!(score(""), 0.0);
    }

    #[test]
    fn polarity_follows_the_lexicon() {
        assert!(score("I love X. It") > 0.5);
        assert!(score("this was a terrible idea") < 0.0);
    }

    #[test]
    fn punctuation_and_case_do_not_hide_words() {
        assert_eq!(score("GREAT."), score("great"));
        assert_eq!(score("\"great\""), score("great"));
    }

    #[test]
    fn negation_flips_and_dampens() {
        let plain = score("good");
        let negated = score("not good");
        assert!(negated < 0.0);
        assert!(negated.abs() < plain);
        assert!(score("it isn't good") < 0.0);
    }

    #[test]
    fn boosters_and_dampeners_shift_intensity() {
        assert!(score("very good") > score("good"));
        assert!(score("slightly good") < score("good"));
        assert!(score("very bad") < score("bad"));
    }

    #[test]
    fn exclamations_add_emphasis() {
        assert!(score("good!") > score("good"));
        assert_eq!(score("good!!!!!!!!"), score("good!!!!"));
        assert_eq!(score("the oak table!"), 0.0);
    }

    #[test]
    fn scores_stay_within_bounds() {
        let gushing = "love ".repeat(500);
        let furious = "hate ".repeat(500);
        let up = score(&gushing);
        let down = score(&furious);
        assert!(up > 0.99 && up <= 1.0);
        assert!(down < -0.99 && down >= -1.0);
    }

    #[test]
    fn identical_text_scores_identically() {
        let text = "It is easy and fast, but the docs are poor!";
        assert_eq!(score(text), score(text));
    }
}
