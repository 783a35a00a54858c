use std::path::PathBuf;

use crate::core::annotation::Label;
use crate::core::dataset::{ImageGroup, SongRow};
use crate::core::media::{MediaLibrary, MediaWarning};

/// Identity of a label control: the song and the dataset column it reads.
///
/// The column fixes both the image and the group it is shown in, so a
/// repeated render of the same page maps back onto the same choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub song_id: String,
    pub column: String,
}

impl SlotKey {
    pub fn new(song_id: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            song_id: song_id.into(),
            column: column.into(),
        }
    }

    /// Stable widget id for the presentation layer
    pub fn widget_id(&self) -> String {
        format!("{}_{}", self.song_id, self.column)
    }
}

/// Where the current page stands relative to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// Freshly shown, no choices made yet
    Viewing,
    /// Choices made that have not been committed
    Editing,
    /// Choices merged into the store
    Committed,
}

/// One candidate image on the page with its in-page label
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSlot {
    pub key: SlotKey,
    pub image_id: String,
    pub group: ImageGroup,
    pub path: PathBuf,
    /// Whether the image file exists. Missing images get no label control.
    pub available: bool,
    pub label: Label,
}

impl ImageSlot {
    pub fn warning(&self) -> Option<MediaWarning> {
        (!self.available).then(|| MediaWarning::MissingImage {
            image_id: self.image_id.clone(),
        })
    }
}

/// The images of one group on the page, in dataset column order
#[derive(Debug, Clone, PartialEq)]
pub struct PageSection {
    pub group: ImageGroup,
    pub slots: Vec<ImageSlot>,
}

impl PageSection {
    /// Slots split into display rows of `per_row` images
    pub fn rows(&self, per_row: usize) -> std::slice::Chunks<'_, ImageSlot> {
        self.slots.chunks(per_row.max(1))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Snapshot of the song under the cursor, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Zero-based row index
    pub index: usize,
    pub total: usize,
    pub song_id: String,
    pub audio: Option<PathBuf>,
    pub sections: Vec<PageSection>,
    pub status: PageStatus,
}

impl Page {
    /// Resolve media for `song` and build a page with every label neutral
    pub fn build(index: usize, total: usize, song: &SongRow, media: &MediaLibrary) -> Self {
        let sections = ImageGroup::ALL
            .iter()
            .map(|&group| PageSection {
                group,
                slots: song
                    .candidates(group)
                    .iter()
                    .map(|candidate| ImageSlot {
                        key: SlotKey::new(&song.song_id, &candidate.column),
                        image_id: candidate.image_id.clone(),
                        group,
                        path: media.image_path(&candidate.image_id),
                        available: media.image_exists(&candidate.image_id),
                        label: Label::Neutral,
                    })
                    .collect(),
            })
            .collect();

        Self {
            index,
            total,
            song_id: song.song_id.clone(),
            audio: media.find_audio(&song.song_id),
            sections,
            status: PageStatus::Viewing,
        }
    }

    /// One-based position for display
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn slots(&self) -> impl Iterator<Item = &ImageSlot> {
        self.sections.iter().flat_map(|section| section.slots.iter())
    }

    pub fn slot(&self, key: &SlotKey) -> Option<&ImageSlot> {
        self.slots().find(|slot| &slot.key == key)
    }

    pub(crate) fn slot_mut(&mut self, key: &SlotKey) -> Option<&mut ImageSlot> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.slots.iter_mut())
            .find(|slot| &slot.key == key)
    }

    /// Missing audio first, then missing images in display order
    pub fn warnings(&self) -> Vec<MediaWarning> {
        let audio = self
            .audio
            .is_none()
            .then(|| MediaWarning::MissingAudio {
                song_id: self.song_id.clone(),
            });
        audio
            .into_iter()
            .chain(self.slots().filter_map(ImageSlot::warning))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::{ColumnPatterns, Dataset};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, MediaLibrary, Dataset) {
        let dir = TempDir::new().unwrap();
        let media = MediaLibrary::new(dir.path().join("audio"), dir.path().join("image"));
        fs::create_dir_all(media.audio_root()).unwrap();
        fs::create_dir_all(media.image_root()).unwrap();
        for image in ["p1.jpg", "p2.jpg", "p3.jpg", "n1.jpg"] {
            fs::write(media.image_root().join(image), b"img").unwrap();
        }

        let dataset = Dataset::from_csv_str(
            "test.csv",
            "song_id,match_img1_x,match_img2_x,match_img3_x,match_img1_y,city_day_img1\n\
             s1,p1.jpg,p2.jpg,p3.jpg,n1.jpg,c1.jpg\n",
            &ColumnPatterns::default(),
        )
        .unwrap();
        (dir, media, dataset)
    }

    #[test]
    fn test_build_lists_groups_in_order() {
        let (_dir, media, dataset) = setup();
        let page = Page::build(0, 1, dataset.song(0).unwrap(), &media);

        let groups: Vec<ImageGroup> = page.sections.iter().map(|s| s.group).collect();
        assert_eq!(groups, ImageGroup::ALL.to_vec());
        assert_eq!(page.sections[0].slots.len(), 3);
        assert_eq!(page.sections[0].slots[2].image_id, "p3.jpg");
        assert_eq!(page.status, PageStatus::Viewing);
        assert!(page.slots().all(|slot| slot.label == Label::Neutral));
    }

    #[test]
    fn test_missing_media_becomes_warnings() {
        let (_dir, media, dataset) = setup();
        let page = Page::build(0, 1, dataset.song(0).unwrap(), &media);

        let city = &page.sections[2].slots[0];
        assert!(!city.available);
        assert_eq!(
            page.warnings(),
            vec![
                MediaWarning::MissingAudio {
                    song_id: "s1".to_string()
                },
                MediaWarning::MissingImage {
                    image_id: "c1.jpg".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_audio_is_resolved() {
        let (_dir, media, dataset) = setup();
        fs::write(media.audio_root().join("s1.mp3"), b"id3").unwrap();

        let page = Page::build(0, 1, dataset.song(0).unwrap(), &media);

        assert_eq!(page.audio, Some(media.audio_root().join("s1.mp3")));
        assert_eq!(page.warnings().len(), 1);
    }

    #[test]
    fn test_rows_chunk_slots() {
        let (_dir, media, dataset) = setup();
        let page = Page::build(0, 1, dataset.song(0).unwrap(), &media);

        let sizes: Vec<usize> = page.sections[0].rows(2).map(|row| row.len()).collect();
        assert_eq!(sizes, vec![2, 1]);
        assert_eq!(page.sections[0].rows(0).count(), 3);
    }

    #[test]
    fn test_slot_lookup_by_key() {
        let (_dir, media, dataset) = setup();
        let page = Page::build(0, 1, dataset.song(0).unwrap(), &media);

        let key = SlotKey::new("s1", "match_img2_x");
        assert_eq!(page.slot(&key).unwrap().image_id, "p2.jpg");
        assert_eq!(key.widget_id(), "s1_match_img2_x");
        assert!(page.slot(&SlotKey::new("s2", "match_img2_x")).is_none());
    }
}
