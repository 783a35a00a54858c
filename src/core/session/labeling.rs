use tracing::{debug, info};

use super::commit::{commit_entries, CommitReport, PageEntry};
use super::page::{Page, PageStatus, SlotKey};
use super::pager::Pager;
use crate::core::annotation::{AnnotationStore, Label};
use crate::core::dataset::{Dataset, SongRow};
use crate::core::error::{LoadError, SessionError};
use crate::core::media::MediaLibrary;

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationOutcome {
    pub moved: bool,
    /// Non-neutral choices dropped because the page was left uncommitted
    pub discarded: usize,
}

impl NavigationOutcome {
    fn stayed() -> Self {
        Self {
            moved: false,
            discarded: 0,
        }
    }
}

/// One user's labeling session.
///
/// Owns the dataset, the cursor, the annotation store and the page being
/// labeled. In-page choices live only on the page: committing merges them
/// into the store, moving to another song throws them away. Coming back to a
/// song shows neutral controls again even when the store already holds
/// answers for it; those answers stay frozen.
pub struct LabelingSession {
    dataset: Dataset,
    pager: Pager,
    store: AnnotationStore,
    media: MediaLibrary,
    page: Page,
}

impl LabelingSession {
    pub fn new(
        dataset: Dataset,
        store: AnnotationStore,
        media: MediaLibrary,
    ) -> Result<Self, LoadError> {
        Self::starting_at(dataset, store, media, 0)
    }

    /// Start at row `index`, clamped to the last song
    pub fn starting_at(
        dataset: Dataset,
        store: AnnotationStore,
        media: MediaLibrary,
        index: usize,
    ) -> Result<Self, LoadError> {
        let pager = Pager::starting_at(dataset.song_count(), index).ok_or(LoadError::Empty)?;
        let page = Self::build_page(&dataset, &pager, &media);

        info!(
            "Labeling session started at song {}/{} with {} stored annotations",
            pager.cursor() + 1,
            pager.total(),
            store.len()
        );

        Ok(Self {
            dataset,
            pager,
            store,
            media,
            page,
        })
    }

    fn build_page(dataset: &Dataset, pager: &Pager, media: &MediaLibrary) -> Page {
        let song = &dataset.songs()[pager.cursor()];
        Page::build(pager.cursor(), pager.total(), song, media)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn current_song(&self) -> &SongRow {
        &self.dataset.songs()[self.pager.cursor()]
    }

    pub fn cursor(&self) -> usize {
        self.pager.cursor()
    }

    pub fn total(&self) -> usize {
        self.pager.total()
    }

    pub fn is_first(&self) -> bool {
        self.pager.is_first()
    }

    pub fn is_last(&self) -> bool {
        self.pager.is_last()
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn media(&self) -> &MediaLibrary {
        &self.media
    }

    /// In-page label of a slot, neutral for unknown slots
    pub fn label_of(&self, key: &SlotKey) -> Label {
        self.page.slot(key).map(|slot| slot.label).unwrap_or_default()
    }

    /// Record an in-page choice. Nothing reaches the store before commit.
    pub fn set_label(&mut self, key: &SlotKey, label: Label) -> Result<(), SessionError> {
        let slot = self
            .page
            .slot_mut(key)
            .ok_or_else(|| SessionError::UnknownSlot {
                song_id: key.song_id.clone(),
                column: key.column.clone(),
            })?;

        if !slot.available {
            return Err(SessionError::MediaUnavailable(slot.image_id.clone()));
        }

        debug!(
            "Label for ({}, {}) set to {:?}",
            key.song_id, slot.image_id, label
        );
        slot.label = label;
        self.page.status = PageStatus::Editing;
        Ok(())
    }

    /// Every labelable image of the page with its in-page label
    pub fn page_entries(&self) -> Vec<PageEntry> {
        self.page
            .slots()
            .filter(|slot| slot.available)
            .map(|slot| PageEntry {
                song_id: self.page.song_id.clone(),
                image_id: slot.image_id.clone(),
                group: slot.group,
                label: slot.label,
            })
            .collect()
    }

    /// Non-neutral in-page choices whose pair is not in the store yet
    pub fn uncommitted_choices(&self) -> usize {
        self.page
            .slots()
            .filter(|slot| slot.available && !slot.label.is_neutral())
            .filter(|slot| !self.store.contains(&self.page.song_id, &slot.image_id))
            .count()
    }

    /// Merge the page's non-neutral, not yet recorded choices into the store.
    /// Does not move the cursor.
    pub fn commit(&mut self) -> CommitReport {
        let entries = self.page_entries();
        let report = commit_entries(&mut self.store, entries);
        self.page.status = PageStatus::Committed;

        info!(
            "Committed song {}: {} merged, {} neutral, {} already recorded, store size {}",
            self.page.song_id,
            report.merged,
            report.skipped_neutral,
            report.skipped_existing,
            self.store.len()
        );
        report
    }

    pub fn next(&mut self) -> NavigationOutcome {
        let moved = self.pager.advance();
        self.after_move(moved)
    }

    pub fn previous(&mut self) -> NavigationOutcome {
        let moved = self.pager.retreat();
        self.after_move(moved)
    }

    /// Jump to a zero-based row; out-of-range rows are ignored
    pub fn jump_to(&mut self, index: usize) -> NavigationOutcome {
        let moved = self.pager.jump_to(index);
        self.after_move(moved)
    }

    pub fn first(&mut self) -> NavigationOutcome {
        self.jump_to(0)
    }

    pub fn last(&mut self) -> NavigationOutcome {
        self.jump_to(self.pager.total() - 1)
    }

    fn after_move(&mut self, moved: bool) -> NavigationOutcome {
        if !moved {
            return NavigationOutcome::stayed();
        }

        let discarded = self.uncommitted_choices();
        if discarded > 0 {
            debug!(
                "Leaving song {} dropped {} uncommitted choices",
                self.page.song_id, discarded
            );
        }

        self.page = Self::build_page(&self.dataset, &self.pager, &self.media);
        info!(
            "Now at song {}/{}: {}",
            self.page.position(),
            self.page.total,
            self.page.song_id
        );

        NavigationOutcome {
            moved: true,
            discarded,
        }
    }
}
