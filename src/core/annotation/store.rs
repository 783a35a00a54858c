use std::collections::HashMap;

use super::label::Verdict;
use crate::core::dataset::ImageGroup;

type RecordKey = (String, String);

fn record_key(song_id: &str, image_id: &str) -> RecordKey {
    (song_id.to_string(), image_id.to_string())
}

/// A persisted (song, image, group, verdict) tuple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub song_id: String,
    pub image_id: String,
    pub group: ImageGroup,
    pub verdict: Verdict,
}

impl AnnotationRecord {
    pub fn new(
        song_id: impl Into<String>,
        image_id: impl Into<String>,
        group: ImageGroup,
        verdict: Verdict,
    ) -> Self {
        Self {
            song_id: song_id.into(),
            image_id: image_id.into(),
            group,
            verdict,
        }
    }
}

/// Accumulated annotations, at most one per (song, image) pair.
///
/// The first record for a pair wins: later inserts for the same pair are
/// ignored. Records are kept in insertion order and are never removed.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    records: Vec<AnnotationRecord>,
    index: HashMap<RecordKey, usize>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously exported records, dropping repeated pairs
    pub fn seeded(records: impl IntoIterator<Item = AnnotationRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Insert `record` unless its pair is already recorded.
    /// Returns whether the record was added.
    pub fn insert(&mut self, record: AnnotationRecord) -> bool {
        let key = record_key(&record.song_id, &record.image_id);
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.records.len());
        self.records.push(record);
        true
    }

    pub fn contains(&self, song_id: &str, image_id: &str) -> bool {
        self.index.contains_key(&record_key(song_id, image_id))
    }

    pub fn get(&self, song_id: &str, image_id: &str) -> Option<&AnnotationRecord> {
        self.index
            .get(&record_key(song_id, image_id))
            .map(|&position| &self.records[position])
    }

    /// Records in insertion order
    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of recorded images for one song
    pub fn count_for_song(&self, song_id: &str) -> usize {
        self.records.iter().filter(|r| r.song_id == song_id).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(song: &str, image: &str, verdict: Verdict) -> AnnotationRecord {
        AnnotationRecord::new(song, image, ImageGroup::Positive, verdict)
    }

    #[test]
    fn test_first_insert_wins() {
        let mut store = AnnotationStore::new();

        assert!(store.insert(record("s1", "a.jpg", Verdict::Positive)));
        assert!(!store.insert(record("s1", "a.jpg", Verdict::Negative)));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("s1", "a.jpg").unwrap().verdict, Verdict::Positive);
    }

    #[test]
    fn test_same_image_for_different_songs_is_distinct() {
        let mut store = AnnotationStore::new();

        assert!(store.insert(record("s1", "a.jpg", Verdict::Positive)));
        assert!(store.insert(record("s2", "a.jpg", Verdict::Negative)));

        assert_eq!(store.len(), 2);
        assert!(store.contains("s2", "a.jpg"));
        assert!(!store.contains("s3", "a.jpg"));
        assert_eq!(store.count_for_song("s1"), 1);
    }

    #[test]
    fn test_seeded_store_keeps_first_duplicate_in_order() {
        let store = AnnotationStore::seeded(vec![
            record("s1", "a.jpg", Verdict::Negative),
            record("s1", "b.jpg", Verdict::Positive),
            record("s1", "a.jpg", Verdict::Positive),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].image_id, "a.jpg");
        assert_eq!(store.records()[1].image_id, "b.jpg");
        assert_eq!(store.get("s1", "a.jpg").unwrap().verdict, Verdict::Negative);
    }
}
