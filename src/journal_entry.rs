use crate::mood::{classify, Mood};
use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column names of the backing CSV file, in order.
pub const HEADER: [&str; 4] = ["Date", "Text", "Mood_Label", "Suggestion"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(rename = "Date", with = "timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Mood_Label")]
    pub mood: Mood,
    #[serde(rename = "Suggestion")]
    pub suggestion: String,
}

impl JournalEntry {
    /// Builds an entry stamped with the current local time.
    pub fn new(text: String, score: f64) -> Self {
        Self::at(Local::now().naive_local(), text, score)
    }

    pub fn at(timestamp: NaiveDateTime, text: String, score: f64) -> Self {
        let (mood, suggestion) = classify(score);
        JournalEntry {
            timestamp: timestamp.trunc_subsecs(0),
            text,
            mood,
            suggestion: suggestion.to_string(),
        }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
            .map_err(|e| de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_milli_opt(9, 0, 0, 750))
            .unwrap()
    }

    #[test]
    fn entry_derives_mood_and_suggestion_from_score() {
        let entry = JournalEntry::at(morning(), "I had a great day".into(), 0.75);
        assert_eq!(entry.mood, Mood::Joy);
        assert_eq!(entry.suggestion, Mood::Joy.suggestion());
        assert_eq!(entry.text, "I had a great day");
    }

    #[test]
    fn timestamp_is_truncated_to_seconds() {
        let entry = JournalEntry::at(morning(), "x".into(), 0.0);
        assert_eq!(entry.formatted_timestamp(), "2024-01-01 09:00:00");
        assert_eq!(entry.timestamp.nanosecond(), 0);
    }

    #[test]
    fn serializes_with_csv_column_names() {
        let entry = JournalEntry::at(morning(), "a, b".into(), -0.3);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["Date"], "2024-01-01 09:00:00");
        assert_eq!(json["Text"], "a, b");
        assert_eq!(json["Mood_Label"], "Fear");
    }
}
