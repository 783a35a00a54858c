use tracing::debug;

use crate::core::annotation::{AnnotationRecord, AnnotationStore, Label};
use crate::core::dataset::ImageGroup;

/// One labeled image of the current page, as handed to commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub song_id: String,
    pub image_id: String,
    pub group: ImageGroup,
    pub label: Label,
}

/// What a commit did with each entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub merged: usize,
    pub skipped_neutral: usize,
    pub skipped_existing: usize,
}

/// Merge page entries into the store.
///
/// Neutral entries are dropped, then entries whose (song, image) pair is
/// already recorded are dropped; the rest are inserted. Running the same
/// entries twice merges nothing the second time.
pub fn commit_entries(
    store: &mut AnnotationStore,
    entries: impl IntoIterator<Item = PageEntry>,
) -> CommitReport {
    let mut report = CommitReport::default();

    for entry in entries {
        let Some(verdict) = entry.label.verdict() else {
            report.skipped_neutral += 1;
            continue;
        };

        if store.contains(&entry.song_id, &entry.image_id) {
            debug!(
                "({}, {}) already recorded, keeping the stored label",
                entry.song_id, entry.image_id
            );
            report.skipped_existing += 1;
            continue;
        }

        store.insert(AnnotationRecord::new(
            entry.song_id,
            entry.image_id,
            entry.group,
            verdict,
        ));
        report.merged += 1;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::annotation::Verdict;

    fn entry(image: &str, label: Label) -> PageEntry {
        PageEntry {
            song_id: "s1".to_string(),
            image_id: image.to_string(),
            group: ImageGroup::Positive,
            label,
        }
    }

    #[test]
    fn test_neutral_entries_are_never_stored() {
        let mut store = AnnotationStore::new();

        let report = commit_entries(
            &mut store,
            vec![entry("a.jpg", Label::Neutral), entry("b.jpg", Label::Negative)],
        );

        assert_eq!(report.merged, 1);
        assert_eq!(report.skipped_neutral, 1);
        assert!(!store.contains("s1", "a.jpg"));
        assert!(store.contains("s1", "b.jpg"));
    }

    #[test]
    fn test_recorded_pairs_keep_first_label() {
        let mut store = AnnotationStore::new();
        commit_entries(&mut store, vec![entry("a.jpg", Label::Positive)]);

        let report = commit_entries(&mut store, vec![entry("a.jpg", Label::Negative)]);

        assert_eq!(report.skipped_existing, 1);
        assert_eq!(store.get("s1", "a.jpg").unwrap().verdict, Verdict::Positive);
    }

    #[test]
    fn test_commit_twice_equals_commit_once() {
        let entries = vec![
            entry("a.jpg", Label::Positive),
            entry("b.jpg", Label::Neutral),
            entry("c.jpg", Label::Negative),
        ];

        let mut once = AnnotationStore::new();
        commit_entries(&mut once, entries.clone());

        let mut twice = AnnotationStore::new();
        commit_entries(&mut twice, entries.clone());
        let second = commit_entries(&mut twice, entries);

        assert_eq!(second.merged, 0);
        assert_eq!(second.skipped_existing, 2);
        assert_eq!(once.records(), twice.records());
    }

    #[test]
    fn test_repeated_image_within_one_commit() {
        let mut store = AnnotationStore::new();
        let mut city = entry("a.jpg", Label::Negative);
        city.group = ImageGroup::City;

        let report = commit_entries(&mut store, vec![entry("a.jpg", Label::Positive), city]);

        assert_eq!(report.merged, 1);
        assert_eq!(report.skipped_existing, 1);
        assert_eq!(store.get("s1", "a.jpg").unwrap().group, ImageGroup::Positive);
    }
}
