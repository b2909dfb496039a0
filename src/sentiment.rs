//! Sentiment scoring for journal text.
//!
//! The mood bands are tuned to a compound valence score in `[-1, 1]`, where
//! more negative means more negative sentiment. Any scorer producing that
//! scale can be plugged in through [`SentimentScorer`].

use std::collections::HashMap;

/// Produces a compound valence score for a piece of text.
pub trait SentimentScorer {
    fn score_text(&self, text: &str) -> f64;
}

/// Normalisation constant for the compound score.
const ALPHA: f64 = 15.0;
/// Multiplier applied to a word's valence when a negator precedes it.
const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// How many preceding tokens are checked for a negator.
const NEGATION_WINDOW: usize = 3;

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "none", "neither", "nor", "without", "cannot",
    "cant", "dont", "didnt", "doesnt", "isnt", "wasnt", "wont", "wouldnt", "shouldnt",
    "couldnt", "arent", "werent", "hasnt", "havent", "hadnt", "aint",
];

const BOOSTERS: &[&str] = &[
    "very",
    "really",
    "so",
    "extremely",
    "incredibly",
    "absolutely",
    "totally",
    "completely",
    "deeply",
    "super",
    "truly",
    "especially",
];

const DAMPENERS: &[&str] = &[
    "slightly",
    "somewhat",
    "barely",
    "hardly",
    "kinda",
    "marginally",
    "partly",
    "little",
];

/// Word-valence scorer with negation, intensity, contrast, and emphasis rules.
///
/// Valences use a `[-4, 4]` scale; the summed valence is squashed into
/// `[-1, 1]` with `sum / sqrt(sum² + 15)`.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
}

impl LexiconScorer {
    pub fn empty() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    /// Adds or replaces a word. Valence is clamped to `[-4, 4]`.
    pub fn with_word(mut self, word: &str, valence: f64) -> Self {
        self.words.insert(word.to_lowercase(), valence.clamp(-4.0, 4.0));
        self
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|raw| {
                raw.trim_matches(|c: char| !c.is_alphanumeric())
                    .chars()
                    .filter(|c| *c != '\'' && *c != '’')
                    .collect::<String>()
                    .to_lowercase()
            })
            .filter(|token| !token.is_empty())
            .collect()
    }

    fn is_negator(token: &str) -> bool {
        NEGATORS.contains(&token)
    }

    fn intensity(token: &str) -> f64 {
        if BOOSTERS.contains(&token) {
            BOOSTER_INCREMENT
        } else if DAMPENERS.contains(&token) {
            -BOOSTER_INCREMENT
        } else {
            0.0
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        let mut scorer = Self::empty();
        for (word, valence) in DEFAULT_WORDS {
            scorer.words.insert((*word).to_string(), *valence);
        }
        scorer
    }
}

impl SentimentScorer for LexiconScorer {
    fn score_text(&self, text: &str) -> f64 {
        let tokens = Self::tokenize(text);
        let mut valences: Vec<f64> = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.words.get(token) else {
                valences.push(0.0);
                continue;
            };

            let mut valence = base;
            if i > 0 {
                let modifier = Self::intensity(&tokens[i - 1]);
                valence += modifier * base.signum();
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i].iter().any(|t| Self::is_negator(t)) {
                valence *= NEGATION_SCALAR;
            }
            valences.push(valence);
        }

        if let Some(pivot) = tokens.iter().position(|t| t == "but") {
            for (i, valence) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *valence *= 0.5;
                } else if i > pivot {
                    *valence *= 1.5;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();
        if sum == 0.0 {
            return 0.0;
        }

        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
        sum += exclamations as f64 * EXCLAMATION_INCREMENT * sum.signum();

        (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}

const DEFAULT_WORDS: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("blessed", 2.9),
    ("calm", 1.3),
    ("celebrate", 2.7),
    ("cheerful", 2.5),
    ("comfortable", 1.5),
    ("confident", 2.2),
    ("delighted", 3.2),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("fantastic", 2.6),
    ("fine", 0.8),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("grateful", 2.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("hope", 1.9),
    ("joy", 2.8),
    ("kind", 2.4),
    ("laugh", 2.6),
    ("like", 1.5),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("okay", 0.9),
    ("peaceful", 2.2),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("proud", 2.1),
    ("relaxed", 2.2),
    ("smile", 1.5),
    ("success", 2.7),
    ("thankful", 2.7),
    ("win", 2.8),
    ("wonderful", 2.7),
    // negative
    ("afraid", -2.0),
    ("alone", -1.0),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("anxious", -1.0),
    ("ashamed", -2.1),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bored", -1.1),
    ("boring", -1.3),
    ("cried", -1.6),
    ("cry", -2.1),
    ("depressed", -2.3),
    ("disappointed", -1.9),
    ("disgusted", -2.4),
    ("disgusting", -2.4),
    ("dread", -2.0),
    ("embarrassed", -1.5),
    ("exhausted", -1.5),
    ("fail", -2.5),
    ("failed", -2.3),
    ("fear", -2.2),
    ("frustrated", -2.0),
    ("furious", -2.7),
    ("gross", -2.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("jealous", -2.0),
    ("lonely", -1.8),
    ("lost", -1.3),
    ("miserable", -2.2),
    ("nervous", -1.1),
    ("overwhelmed", -1.5),
    ("panic", -2.3),
    ("rage", -2.6),
    ("sad", -2.1),
    ("scared", -2.2),
    ("sick", -2.3),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("terrible", -2.1),
    ("terrified", -3.0),
    ("tired", -1.9),
    ("ugly", -3.1),
    ("upset", -1.6),
    ("worried", -1.2),
    ("worry", -1.9),
    ("worst", -3.1),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconScorer::default().score_text(text)
    }

    #[test]
    fn neutral_text_scores_zero() {
        assert_eq!(score("I went to the store and bought bread"), 0.0);
        assert_eq!(score(""), 0.0);
    }

    #[test]
    fn single_word_normalisation() {
        // 3.1 / sqrt(3.1² + 15)
        let expected = 3.1 / (3.1_f64 * 3.1 + 15.0).sqrt();
        assert!((score("I had a great day") - expected).abs() < 1e-9);
        assert!(score("I had a great day") >= 0.6);
    }

    #[test]
    fn negation_flips_polarity() {
        assert!(score("the day was good") > 0.0);
        assert!(score("the day was not good") < 0.0);
        assert!(score("I don't feel happy") < 0.0);
    }

    #[test]
    fn boosters_and_dampeners_adjust_intensity() {
        assert!(score("very happy") > score("happy"));
        assert!(score("slightly happy") < score("happy"));
        assert!(score("very sad") < score("sad"));
    }

    #[test]
    fn contrast_weights_the_second_clause() {
        assert!(score("the morning was good but the evening was terrible") < 0.0);
        assert!(score("the morning was terrible but the evening was good") > 0.0);
    }

    #[test]
    fn exclamations_add_emphasis() {
        assert!(score("great!!!") > score("great"));
        assert!(score("awful!!") < score("awful"));
        assert_eq!(score("!!!"), 0.0);
    }

    #[test]
    fn scores_stay_in_range() {
        let text = "best best best best best best best love love love amazing!!!!!!";
        let s = score(text);
        assert!(s <= 1.0 && s > 0.9);
        let text = "worst hate hate terrible awful rage furious ugly!!!!";
        let s = score(text);
        assert!(s >= -1.0 && s < -0.9);
    }

    #[test]
    fn custom_words_override_defaults() {
        let scorer = LexiconScorer::default()
            .with_word("Sunny", 2.0)
            .with_word("great", -3.1)
            .with_word("x", 9.0);
        assert!(scorer.score_text("a sunny day") > 0.0);
        assert!(scorer.score_text("a great day") < 0.0);
        // clamped to 4.0
        let expected = 4.0 / (16.0_f64 + 15.0).sqrt();
        assert!((scorer.score_text("x") - expected).abs() < 1e-9);
    }
}
