use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete mood derived from a compound sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Joy,
    Envy,
    Embarrassment,
    Boredom,
    Anxiety,
    Fear,
    Disgust,
    Sadness,
    Anger,
}

impl Mood {
    /// All moods, highest band first. `classify` walks this order.
    pub const ALL: [Mood; 9] = [
        Mood::Joy,
        Mood::Envy,
        Mood::Embarrassment,
        Mood::Boredom,
        Mood::Anxiety,
        Mood::Fear,
        Mood::Disgust,
        Mood::Sadness,
        Mood::Anger,
    ];

    /// Inclusive lower bound of this mood's band. `None` means unbounded below.
    pub fn lower_bound(self) -> Option<f64> {
        match self {
            Mood::Joy => Some(0.6),
            Mood::Envy => Some(0.2),
            Mood::Embarrassment => Some(0.05),
            Mood::Boredom => Some(-0.05),
            Mood::Anxiety => Some(-0.2),
            Mood::Fear => Some(-0.4),
            Mood::Disgust => Some(-0.6),
            Mood::Sadness => Some(-0.8),
            Mood::Anger => None,
        }
    }

    /// Exclusive upper bound of this mood's band. `None` means unbounded above.
    pub fn upper_bound(self) -> Option<f64> {
        match self {
            Mood::Joy => None,
            Mood::Envy => Some(0.6),
            Mood::Embarrassment => Some(0.2),
            Mood::Boredom => Some(0.05),
            Mood::Anxiety => Some(-0.05),
            Mood::Fear => Some(-0.2),
            Mood::Disgust => Some(-0.4),
            Mood::Sadness => Some(-0.6),
            Mood::Anger => Some(-0.8),
        }
    }

    pub fn band_contains(self, score: f64) -> bool {
        let above = self.lower_bound().map_or(true, |low| score >= low);
        let below = self.upper_bound().map_or(true, |high| score < high);
        above && below
    }

    pub fn suggestion(self) -> &'static str {
        match self {
            Mood::Joy => "You’re radiating happiness! Share your light with others today.",
            Mood::Envy => "You might be comparing yourself to others. Focus on your own growth 🌱",
            Mood::Embarrassment => {
                "Everyone makes mistakes. Be kind to yourself and move forward ❤️"
            }
            Mood::Boredom => "Things feel dull? Try doing something new or creative today 🎨",
            Mood::Anxiety => "You seem tense. Take a deep breath and slow down 💆",
            Mood::Fear => "Something’s worrying you. Talk it out with someone you trust 🫂",
            Mood::Disgust => {
                "You're put off by something. Take a moment to understand why and reset 🧼"
            }
            Mood::Sadness => "It’s okay to feel down. Let yourself rest and recharge 🛌",
            Mood::Anger => "Strong feelings today. Channel them into something constructive 💪",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Joy => "Joy",
            Mood::Envy => "Envy",
            Mood::Embarrassment => "Embarrassment",
            Mood::Boredom => "Boredom",
            Mood::Anxiety => "Anxiety",
            Mood::Fear => "Fear",
            Mood::Disgust => "Disgust",
            Mood::Sadness => "Sadness",
            Mood::Anger => "Anger",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a compound score to a mood and its suggestion.
///
/// Bands are checked from the top down and the first match wins. Anything
/// below -0.8 (including scores outside [-1, 1], and NaN) lands on `Anger`.
pub fn classify(score: f64) -> (Mood, &'static str) {
    let mood = Mood::ALL
        .into_iter()
        .find(|mood| mood.band_contains(score))
        .unwrap_or(Mood::Anger);
    (mood, mood.suggestion())
}
