use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::columns::{ColumnPatterns, ImageGroup};
use crate::core::error::LoadError;

/// Required identifier column of the dataset
pub const SONG_ID_COLUMN: &str = "song_id";

/// Cell values treated as "no value", matching what pandas reads as NA
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Strip a leading UTF-8 byte order mark, if present
pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

pub(crate) fn is_missing(value: &str) -> bool {
    value.is_empty() || MISSING_MARKERS.contains(&value)
}

/// One image candidate taken from a dataset cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Column the value was read from
    pub column: String,
    /// Image file name relative to the image root
    pub image_id: String,
}

/// A dataset row: one song and its candidate images per group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRow {
    pub song_id: String,
    positive: Vec<Candidate>,
    negative: Vec<Candidate>,
    city: Vec<Candidate>,
}

impl SongRow {
    pub fn new(song_id: impl Into<String>) -> Self {
        Self {
            song_id: song_id.into(),
            positive: Vec::new(),
            negative: Vec::new(),
            city: Vec::new(),
        }
    }

    /// Candidates of `group`, in dataset column order
    pub fn candidates(&self, group: ImageGroup) -> &[Candidate] {
        match group {
            ImageGroup::Positive => &self.positive,
            ImageGroup::Negative => &self.negative,
            ImageGroup::City => &self.city,
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.positive.len() + self.negative.len() + self.city.len()
    }

    pub(crate) fn push(&mut self, group: ImageGroup, candidate: Candidate) {
        match group {
            ImageGroup::Positive => self.positive.push(candidate),
            ImageGroup::Negative => self.negative.push(candidate),
            ImageGroup::City => self.city.push(candidate),
        }
    }
}

/// The loaded song table. Always holds at least one song.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    songs: Vec<SongRow>,
}

impl Dataset {
    /// Parse CSV text. `source` is only kept for display and logging.
    pub fn from_csv_str(
        source: impl Into<PathBuf>,
        text: &str,
        patterns: &ColumnPatterns,
    ) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(strip_bom(text).as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|name| name.trim().to_string())
            .collect();

        let song_id_index = headers
            .iter()
            .position(|name| name == SONG_ID_COLUMN)
            .ok_or_else(|| LoadError::MissingColumn(SONG_ID_COLUMN.to_string()))?;

        // (column index, column name, group) in file order
        let grouped_columns: Vec<(usize, &str, ImageGroup)> = headers
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                patterns
                    .classify(name)
                    .map(|group| (index, name.as_str(), group))
            })
            .collect();
        debug!(
            "Dataset has {} columns, {} of them feed image groups",
            headers.len(),
            grouped_columns.len()
        );

        let mut songs = Vec::new();
        for record in reader.records() {
            let record = record?;

            let song_id = record.get(song_id_index).map(str::trim).unwrap_or("");
            if is_missing(song_id) {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                warn!("Skipping dataset line {} without a song id", line);
                continue;
            }

            let mut song = SongRow::new(song_id);
            for &(index, column, group) in &grouped_columns {
                let value = record.get(index).map(str::trim).unwrap_or("");
                if is_missing(value) {
                    continue;
                }
                song.push(
                    group,
                    Candidate {
                        column: column.to_string(),
                        image_id: value.to_string(),
                    },
                );
            }
            songs.push(song);
        }

        if songs.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(Self {
            source: source.into(),
            songs,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn songs(&self) -> &[SongRow] {
        &self.songs
    }

    pub fn song(&self, index: usize) -> Option<&SongRow> {
        self.songs.get(index)
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }
}

/// Read and parse the dataset file at `path`
pub fn load_dataset(path: &Path, patterns: &ColumnPatterns) -> Result<Dataset, LoadError> {
    info!("Loading dataset from: {:?}", path);

    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = Dataset::from_csv_str(path, &text, patterns)?;

    info!("Dataset loaded, {} songs", dataset.song_count());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "song_id,match_img1_x,match_img2_x,match_img1_y,city_day_img1,city_night_img1,genre\n\
                          s1,a.jpg,b.jpg,c.jpg,d.jpg,e.jpg,rock\n\
                          s2,f.jpg,,g.jpg,NaN,h.jpg,pop\n";

    fn parse(text: &str) -> Result<Dataset, LoadError> {
        Dataset::from_csv_str("test.csv", text, &ColumnPatterns::default())
    }

    fn image_ids(song: &SongRow, group: ImageGroup) -> Vec<&str> {
        song.candidates(group)
            .iter()
            .map(|c| c.image_id.as_str())
            .collect()
    }

    #[test]
    fn test_groups_follow_column_order() {
        let dataset = parse(SAMPLE).unwrap();
        assert_eq!(dataset.song_count(), 2);

        let song = dataset.song(0).unwrap();
        assert_eq!(song.song_id, "s1");
        assert_eq!(image_ids(song, ImageGroup::Positive), vec!["a.jpg", "b.jpg"]);
        assert_eq!(image_ids(song, ImageGroup::Negative), vec!["c.jpg"]);
        assert_eq!(image_ids(song, ImageGroup::City), vec!["d.jpg", "e.jpg"]);
        assert_eq!(song.candidates(ImageGroup::Positive)[1].column, "match_img2_x");
    }

    #[test]
    fn test_missing_cells_are_excluded() {
        let dataset = parse(SAMPLE).unwrap();
        let song = dataset.song(1).unwrap();

        assert_eq!(image_ids(song, ImageGroup::Positive), vec!["f.jpg"]);
        assert_eq!(image_ids(song, ImageGroup::City), vec!["h.jpg"]);
        assert_eq!(song.candidate_count(), 3);

        let text = "song_id,match_img1_x,match_img2_x,match_img1_y,city_day_img1,city_night_img1\n\
                    s1,#N/A,-NaN,#NA,1.#QNAN,#N/A N/A\n\
                    s2,-1.#IND,<NA>,1.#IND,-1.#QNAN,null\n";
        let dataset = parse(text).unwrap();
        for song in dataset.songs() {
            assert_eq!(song.candidate_count(), 0, "{} kept a marker", song.song_id);
        }
    }

    #[test]
    fn test_bom_and_padded_headers_are_accepted() {
        let text = "\u{feff}song_id , match_img1_x\ns1, a.jpg \n";
        let dataset = parse(text).unwrap();

        let song = dataset.song(0).unwrap();
        assert_eq!(image_ids(song, ImageGroup::Positive), vec!["a.jpg"]);
    }

    #[test]
    fn test_rows_without_song_id_are_skipped() {
        let text = "song_id,match_img1_x\n,a.jpg\ns2,b.jpg\n";
        let dataset = parse(text).unwrap();

        assert_eq!(dataset.song_count(), 1);
        assert_eq!(dataset.song(0).unwrap().song_id, "s2");
    }

    #[test]
    fn test_missing_song_id_column_is_an_error() {
        let result = parse("track,match_img1_x\ns1,a.jpg\n");
        assert!(matches!(result, Err(LoadError::MissingColumn(name)) if name == "song_id"));
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let result = parse("song_id,match_img1_x\ns1,a.jpg,extra\n");
        assert!(matches!(result, Err(LoadError::Csv(_))));
    }

    #[test]
    fn test_header_only_dataset_is_empty() {
        let result = parse("song_id,match_img1_x\n");
        assert!(matches!(result, Err(LoadError::Empty)));
    }

    #[test]
    fn test_load_dataset_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("music_image_combined.csv");
        fs::write(&path, SAMPLE).unwrap();

        let dataset = load_dataset(&path, &ColumnPatterns::default()).unwrap();
        assert_eq!(dataset.source(), path.as_path());
        assert_eq!(dataset.song_count(), 2);
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_dataset(&dir.path().join("absent.csv"), &ColumnPatterns::default());
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
