use gazeplot_core::{EyeMovement, GazeRecord};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const COL_STIMULUS: &str = "Presented Stimulus name";
pub const COL_MOVEMENT: &str = "Eye movement type";
pub const COL_PARTICIPANT: &str = "Participant name";
pub const COL_NORM_X: &str = "Fixation point X (MCSnorm)";
pub const COL_NORM_Y: &str = "Fixation point Y (MCSnorm)";
pub const COL_DURATION: &str = "Gaze event duration";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_STIMULUS,
    COL_MOVEMENT,
    COL_PARTICIPANT,
    COL_NORM_X,
    COL_NORM_Y,
    COL_DURATION,
];

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset {} has no header row", .path.display())]
    MissingHeader { path: PathBuf },
    #[error("dataset {} is missing required column \"{column}\"", .path.display())]
    MissingColumn {
        path: PathBuf,
        column: &'static str,
    },
}

/// Positions of the required columns within one export's header.
struct ColumnIndex {
    stimulus: usize,
    movement: usize,
    participant: usize,
    norm_x: usize,
    norm_y: usize,
    duration: usize,
}

impl ColumnIndex {
    fn resolve(header: &[&str], path: &Path) -> Result<Self, DatasetError> {
        let find = |column: &'static str| {
            header
                .iter()
                .position(|name| *name == column)
                .ok_or_else(|| DatasetError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };
        Ok(Self {
            stimulus: find(COL_STIMULUS)?,
            movement: find(COL_MOVEMENT)?,
            participant: find(COL_PARTICIPANT)?,
            norm_x: find(COL_NORM_X)?,
            norm_y: find(COL_NORM_Y)?,
            duration: find(COL_DURATION)?,
        })
    }

    fn record_from(&self, cells: &[&str]) -> GazeRecord {
        GazeRecord {
            participant: cell(cells, self.participant).to_string(),
            stimulus: cell(cells, self.stimulus).to_string(),
            movement: EyeMovement::from_cell(cell(cells, self.movement)),
            norm_x: parse_float(cell(cells, self.norm_x)),
            norm_y: parse_float(cell(cells, self.norm_y)),
            duration_ms: parse_float(cell(cells, self.duration)).unwrap_or(0.0),
        }
    }
}

/// Short rows are padded with empty cells rather than rejected; exports
/// routinely truncate trailing blanks.
fn cell<'a>(cells: &[&'a str], index: usize) -> &'a str {
    cells.get(index).copied().unwrap_or("")
}

fn parse_float(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// A fully loaded gaze export. The file handle lives only for the duration
/// of [`GazeDataset::load`].
#[derive(Debug)]
pub struct GazeDataset {
    path: PathBuf,
    column_count: usize,
    records: Vec<GazeRecord>,
}

impl GazeDataset {
    /// Reads a tab-separated export. The header row is required and must
    /// contain every column in [`REQUIRED_COLUMNS`]; extra columns are
    /// ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let io_error = |source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let mut lines = BufReader::new(file).lines();

        let header_line = match lines.next() {
            Some(line) => line.map_err(io_error)?,
            None => {
                return Err(DatasetError::MissingHeader {
                    path: path.to_path_buf(),
                })
            }
        };
        let header: Vec<&str> = header_line.split('\t').collect();
        let columns = ColumnIndex::resolve(&header, path)?;
        let column_count = header.len();

        let mut records = Vec::new();
        for line in lines {
            let line = line.map_err(io_error)?;
            if line.is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split('\t').collect();
            records.push(columns.record_from(&cells));
        }

        Ok(Self {
            path: path.to_path_buf(),
            column_count,
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[GazeRecord] {
        &self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Distinct non-empty participant names, in first-appearance order.
    pub fn participants(&self) -> Vec<&str> {
        self.distinct(|record| &record.participant)
    }

    /// Distinct non-empty stimulus names, in first-appearance order.
    pub fn stimuli(&self) -> Vec<&str> {
        self.distinct(|record| &record.stimulus)
    }

    fn distinct(&self, field: impl Fn(&GazeRecord) -> &String) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            let value = field(record).as_str();
            if !value.is_empty() && !seen.contains(&value) {
                seen.push(value);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dataset(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write dataset");
        file
    }

    const HEADER: &str = "Recording timestamp\tParticipant name\tPresented Stimulus name\tEye movement type\tGaze event duration\tFixation point X (MCSnorm)\tFixation point Y (MCSnorm)";

    #[test]
    fn loads_rows_and_ignores_extra_columns() {
        let file = write_dataset(&format!(
            "{HEADER}\n\
             100\tParticipant1\tQuestion-pic\tFixation\t250\t0.41\t0.52\n\
             140\tParticipant1\tQuestion-pic\tSaccade\t30\t\t\n\
             180\tParticipant2\tIntro-pic\tFixation\t120\t0.9\t0.1\n"
        ));

        let dataset = GazeDataset::load(file.path()).unwrap();
        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.column_count(), 7);

        let first = &dataset.records()[0];
        assert_eq!(first.participant, "Participant1");
        assert_eq!(first.stimulus, "Question-pic");
        assert!(first.movement.is_fixation());
        assert_eq!(first.norm_x, Some(0.41));
        assert_eq!(first.norm_y, Some(0.52));
        assert_eq!(first.duration_ms, 250.0);
    }

    #[test]
    fn blank_cells_become_absent_coordinates() {
        let file = write_dataset(&format!(
            "{HEADER}\n\
             100\tParticipant1\t\tSaccade\t\t\t\n"
        ));

        let dataset = GazeDataset::load(file.path()).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.norm_x, None);
        assert_eq!(record.norm_y, None);
        assert_eq!(record.duration_ms, 0.0);
        assert_eq!(record.stimulus, "");
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let file = write_dataset(
            "Recording timestamp\tParticipant name\tPresented Stimulus name\n1\tParticipant1\tQuestion-pic\n",
        );

        let err = GazeDataset::load(file.path()).unwrap_err();
        match err {
            DatasetError::MissingColumn { column, .. } => {
                assert_eq!(column, COL_MOVEMENT);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GazeDataset::load("/nonexistent/export.tsv").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("export.tsv"));
    }

    #[test]
    fn empty_file_has_no_header() {
        let file = write_dataset("");
        let err = GazeDataset::load(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingHeader { .. }));
    }

    #[test]
    fn distinct_listings_preserve_first_appearance_order() {
        let file = write_dataset(&format!(
            "{HEADER}\n\
             1\tParticipant2\tQuestion-pic\tFixation\t100\t0.5\t0.5\n\
             2\tParticipant1\tIntro-pic\tFixation\t100\t0.5\t0.5\n\
             3\tParticipant2\tQuestion-pic\tSaccade\t20\t\t\n\
             4\t\t\tUnclassified\t\t\t\n"
        ));

        let dataset = GazeDataset::load(file.path()).unwrap();
        assert_eq!(dataset.participants(), vec!["Participant2", "Participant1"]);
        assert_eq!(dataset.stimuli(), vec!["Question-pic", "Intro-pic"]);
    }

    #[test]
    fn short_rows_are_padded() {
        let file = write_dataset(&format!(
            "{HEADER}\n\
             1\tParticipant1\tQuestion-pic\tFixation\t100\n"
        ));

        let dataset = GazeDataset::load(file.path()).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.duration_ms, 100.0);
        assert_eq!(record.norm_x, None);
    }
}
