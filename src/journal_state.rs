use crate::error::JournalError;
use crate::journal_entry::{JournalEntry, HEADER};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Append-only journal backed by a CSV file.
///
/// Every append rewrites the whole file from memory, so after `append`
/// returns the file always holds exactly `entries()`. Single writer only.
pub struct JournalStore {
    path: PathBuf,
    entries: Vec<JournalEntry>,
}

impl JournalStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JournalError> {
        let path = path.into();
        let entries = Self::load_all(&path)?;
        info!(path = %path.display(), entries = entries.len(), "opened journal");
        Ok(JournalStore { path, entries })
    }

    /// Reads every entry from `path` in stored order.
    ///
    /// A missing file is created with the header row only.
    pub fn load_all(path: &Path) -> Result<Vec<JournalEntry>, JournalError> {
        if !path.exists() {
            if let Some(dir) = parent_dir(path) {
                fs::create_dir_all(dir).map_err(|e| JournalError::persistence(path, e))?;
            }
            save_to_file(path, &[])?;
            info!(path = %path.display(), "created empty journal");
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_path(path)
            .map_err(|e| JournalError::from_read(path, e))?;

        let headers = reader
            .headers()
            .map_err(|e| JournalError::from_read(path, e))?;
        if !headers.iter().eq(HEADER.iter().copied()) {
            return Err(JournalError::corrupt(
                path,
                format!(
                    "expected header {:?}, found {:?}",
                    HEADER.join(","),
                    headers.iter().collect::<Vec<_>>().join(",")
                ),
            ));
        }

        let mut entries = Vec::new();
        for record in reader.deserialize::<JournalEntry>() {
            let entry = record.map_err(|e| JournalError::from_read(path, e))?;
            entries.push(entry);
        }
        debug!(path = %path.display(), entries = entries.len(), "loaded journal");
        Ok(entries)
    }

    /// Classifies `text` with `score`, stamps it, and persists it.
    pub fn append(&mut self, text: &str, score: f64) -> Result<JournalEntry, JournalError> {
        self.append_entry(JournalEntry::new(text.to_string(), score))
    }

    /// Persists a prepared entry. On a failed write the entry is dropped
    /// from memory again so memory and disk stay in step.
    pub fn append_entry(&mut self, entry: JournalEntry) -> Result<JournalEntry, JournalError> {
        self.entries.push(entry.clone());
        if let Err(e) = save_to_file(&self.path, &self.entries) {
            self.entries.pop();
            warn!(path = %self.path.display(), error = %e, "append rolled back");
            return Err(e);
        }
        debug!(mood = %entry.mood, total = self.entries.len(), "appended entry");
        Ok(entry)
    }

    pub fn get_entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Case-insensitive match on entry text or mood label.
    pub fn search_entries(&self, query: &str) -> Vec<JournalEntry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.text.to_lowercase().contains(&query)
                    || e.mood.as_str().to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}

/// Writes header and entries to a sibling temp file, then renames it over `path`.
///
/// An existing file keeps its permissions, and a symlinked path is written
/// through to the file it points at.
fn save_to_file(path: &Path, entries: &[JournalEntry]) -> Result<(), JournalError> {
    let fail = |e: std::io::Error| JournalError::persistence(path, e);

    let existing = fs::metadata(path).ok();
    let target = match existing {
        Some(_) => fs::canonicalize(path).map_err(fail)?,
        None => path.to_path_buf(),
    };

    let dir = parent_dir(&target).unwrap_or_else(|| Path::new("."));
    let tmp = NamedTempFile::new_in(dir).map_err(fail)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file());
        writer.write_record(HEADER).map_err(|e| fail(e.into()))?;
        for entry in entries {
            writer.serialize(entry).map_err(|e| fail(e.into()))?;
        }
        writer.flush().map_err(fail)?;
    }
    if let Some(meta) = existing {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(fail)?;
    }
    tmp.as_file().sync_all().map_err(fail)?;
    tmp.persist(&target).map_err(|e| fail(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::{classify, Mood};
    use crate::sentiment::{LexiconScorer, SentimentScorer};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn stamped(second: u32, text: &str, score: f64) -> JournalEntry {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(9, 0, second))
            .unwrap();
        JournalEntry::at(ts, text.to_string(), score)
    }

    #[test]
    fn opening_missing_file_creates_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("mood_journal.csv");

        let store = JournalStore::open(&path).unwrap();
        assert!(store.is_empty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Date,Text,Mood_Label,Suggestion\n"
        );
    }

    #[test]
    fn append_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.csv");
        let scorer = LexiconScorer::default();

        let mut store = JournalStore::open(&path).unwrap();
        let score = scorer.score_text("some text");
        let entry = store.append("some text", score).unwrap();

        let loaded = JournalStore::load_all(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], entry);
        assert_eq!(loaded[0].text, "some text");
        let (mood, suggestion) = classify(score);
        assert_eq!(loaded[0].mood, mood);
        assert_eq!(loaded[0].suggestion, suggestion);
    }

    #[test]
    fn reopen_preserves_order_and_escaping() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.csv");
        let texts = [
            "plain",
            "commas, everywhere, really",
            "she said \"hello\"",
            "line one\nline two\r\nline three",
            "emoji 🎨 and ’quotes’",
        ];

        let mut written = Vec::new();
        {
            let mut store = JournalStore::open(&path).unwrap();
            for (i, text) in texts.iter().enumerate() {
                let score = 0.8 - i as f64 * 0.35;
                written.push(store.append_entry(stamped(i as u32, text, score)).unwrap());
            }
        }

        let reopened = JournalStore::open(&path).unwrap();
        assert_eq!(reopened.get_entries(), written.as_slice());
        assert_eq!(reopened.get_entries()[3].text, texts[3]);
    }

    #[test]
    fn file_matches_expected_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.csv");
        let mut store = JournalStore::open(&path).unwrap();
        store.append_entry(stamped(0, "I had a great day", 0.75)).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let mut lines = raw.lines();
        assert_eq!(lines.next(), Some("Date,Text,Mood_Label,Suggestion"));
        assert_eq!(
            lines.next(),
            Some("2024-01-01 09:00:00,I had a great day,Joy,You’re radiating happiness! Share your light with others today.")
        );
    }

    #[test]
    fn reads_files_written_by_earlier_versions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.csv");
        fs::write(
            &path,
            "Date,Text,Mood_Label,Suggestion\n\
             2024-01-01 09:00:00,\"I had a great day\",Joy,\"You're radiating happiness! Share your light with others today.\"\n\
             2024-01-02 21:15:30,\"meh, nothing happened\",Boredom,Things feel dull? Try doing something new or creative today 🎨\n",
        )
        .unwrap();

        let entries = JournalStore::load_all(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].mood, Mood::Joy);
        assert_eq!(
            entries[0].suggestion,
            "You're radiating happiness! Share your light with others today."
        );
        assert_eq!(entries[1].text, "meh, nothing happened");
        assert_eq!(entries[1].formatted_timestamp(), "2024-01-02 21:15:30");
    }

    #[test]
    fn short_header_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.csv");
        fs::write(&path, "Date,Text,Mood\n2024-01-01 09:00:00,hi,Joy\n").unwrap();

        let err = JournalStore::open(&path).err().unwrap();
        assert!(matches!(err, JournalError::CorruptStore { .. }), "{err:?}");
        // no repair attempted
        assert!(fs::read_to_string(&path).unwrap().starts_with("Date,Text,Mood\n"));
    }

    #[test]
    fn row_with_wrong_field_count_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.csv");
        fs::write(
            &path,
            "Date,Text,Mood_Label,Suggestion\n2024-01-01 09:00:00,hi,Joy\n",
        )
        .unwrap();

        let err = JournalStore::load_all(&path).unwrap_err();
        assert!(matches!(err, JournalError::CorruptStore { .. }), "{err:?}");

        fs::write(
            &path,
            "Date,Text,Mood_Label,Suggestion\n2024-01-01 09:00:00,hi,Joy,yay,extra\n",
        )
        .unwrap();

        let err = JournalStore::load_all(&path).unwrap_err();
        assert!(matches!(err, JournalError::CorruptStore { .. }), "{err:?}");
    }

    #[test]
    fn directory_at_journal_path_is_unreadable_not_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.csv");
        fs::create_dir(&path).unwrap();

        let err = JournalStore::open(&path).err().unwrap();
        assert!(matches!(err, JournalError::Unreadable { .. }), "{err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn append_keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.csv");
        fs::write(&path, "Date,Text,Mood_Label,Suggestion\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut store = JournalStore::open(&path).unwrap();
        store.append("hi", 0.7).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn append_writes_through_symlink() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real.csv");
        let link = dir.path().join("journal.csv");
        fs::write(&real, "Date,Text,Mood_Label,Suggestion\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let mut store = JournalStore::open(&link).unwrap();
        store.append("hi", 0.7).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(JournalStore::load_all(&real).unwrap().len(), 1);
    }

    #[test]
    fn unknown_mood_label_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.csv");
        fs::write(
            &path,
            "Date,Text,Mood_Label,Suggestion\n2024-01-01 09:00:00,hi,Elation,yay\n",
        )
        .unwrap();

        assert!(matches!(
            JournalStore::load_all(&path),
            Err(JournalError::CorruptStore { .. })
        ));
    }

    #[test]
    fn empty_file_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.csv");
        fs::write(&path, "").unwrap();

        assert!(matches!(
            JournalStore::load_all(&path),
            Err(JournalError::CorruptStore { .. })
        ));
    }

    #[test]
    fn failed_write_rolls_back_memory() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        let path = sub.join("journal.csv");
        let mut store = JournalStore::open(&path).unwrap();
        store.append_entry(stamped(0, "kept", 0.1)).unwrap();

        fs::remove_dir_all(&sub).unwrap();
        let err = store.append("lost", 0.1).unwrap_err();

        assert!(matches!(err, JournalError::Persistence { .. }), "{err:?}");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_entries()[0].text, "kept");
    }

    #[test]
    fn search_matches_text_and_mood() {
        let dir = tempdir().unwrap();
        let mut store = JournalStore::open(dir.path().join("journal.csv")).unwrap();
        store.append_entry(stamped(0, "Walked the dog", 0.0)).unwrap();
        store.append_entry(stamped(1, "Exam tomorrow", -0.1)).unwrap();

        assert_eq!(store.search_entries("DOG").len(), 1);
        let anxious = store.search_entries("anxiety");
        assert_eq!(anxious.len(), 1);
        assert_eq!(anxious[0].text, "Exam tomorrow");
        assert!(store.search_entries("cat").is_empty());
    }
}
