// ── Input file reading ──
//
// Rows come from a delimited text file whose first line may or may not be
// a header. Detection looks at a short sample from the top of the file:
// a first line whose cells look unlike the cells beneath it in the same
// column is a header.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::InputRow;

/// Bytes read from the top of the file for header detection.
pub const SAMPLE_LEN: usize = 1024;

/// Data rows compared against the candidate header.
const ROWS_CHECKED: usize = 20;

/// Per-column shape, as seen across the sampled data rows.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Numeric,
    Length(usize),
}

impl Kind {
    fn of(cell: &str) -> Self {
        if cell.trim().parse::<f64>().is_ok() {
            Kind::Numeric
        } else {
            Kind::Length(cell.chars().count())
        }
    }
}

/// Guess whether the first line of `sample` is a header.
///
/// Each column settles on a kind when every sampled data row agrees on
/// it: all numeric, or all the same length. Columns whose rows disagree
/// drop out. The first line then scores one point per settled column it
/// does not fit and loses one per column it does; a positive score means
/// header. Rows whose width differs from the first line are ignored, as
/// are columns no row ever settled.
///
/// `sample` may stop mid-line. When it is exactly [`SAMPLE_LEN`] long,
/// the trailing partial line is dropped before parsing.
pub fn has_header(sample: &[u8], delimiter: u8) -> bool {
    let sample = complete_lines(sample);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(sample);

    let mut records = rdr.byte_records();
    let Some(Ok(header)) = records.next() else {
        return false;
    };
    let header: Vec<String> = header
        .iter()
        .map(|cell| String::from_utf8_lossy(cell).into_owned())
        .collect();

    // None: unseen. Some(None): rows disagreed. Some(Some(k)): settled.
    let mut kinds: Vec<Option<Option<Kind>>> = vec![None; header.len()];

    for record in records.take(ROWS_CHECKED) {
        let Ok(record) = record else { break };
        if record.len() != header.len() {
            continue;
        }
        for (slot, cell) in kinds.iter_mut().zip(record.iter()) {
            let kind = Kind::of(&String::from_utf8_lossy(cell));
            *slot = match *slot {
                None => Some(Some(kind)),
                Some(Some(seen)) if seen == kind => Some(Some(seen)),
                Some(_) => Some(None),
            };
        }
    }

    let score: i32 = kinds
        .iter()
        .zip(&header)
        .filter_map(|(slot, cell)| match slot {
            Some(Some(kind)) => Some(if Kind::of(cell) == *kind { -1 } else { 1 }),
            _ => None,
        })
        .sum();

    score > 0
}

fn complete_lines(sample: &[u8]) -> &[u8] {
    if sample.len() < SAMPLE_LEN {
        return sample;
    }
    match sample.iter().rposition(|b| *b == b'\n') {
        Some(end) => &sample[..=end],
        None => sample,
    }
}

/// Streaming reader over the rows of an input file.
///
/// Yields rows in file order with the header, if detected, skipped once.
/// Blank lines are ignored. A row with fewer than two columns ends the
/// iteration with [`CoreError::InvalidInput`].
pub struct InputReader {
    path: PathBuf,
    records: csv::StringRecordsIntoIter<File>,
    header_skipped: bool,
    failed: bool,
}

impl std::fmt::Debug for InputReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputReader")
            .field("path", &self.path)
            .field("header_skipped", &self.header_skipped)
            .finish_non_exhaustive()
    }
}

impl InputReader {
    /// Open `path`, detect a header and position the reader on the first
    /// data row.
    pub fn open(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| CoreError::io(path, e))?;

        let mut sample = Vec::with_capacity(SAMPLE_LEN);
        (&mut file)
            .take(u64::try_from(SAMPLE_LEN).unwrap_or(u64::MAX))
            .read_to_end(&mut sample)
            .map_err(|e| CoreError::io(path, e))?;
        let header = has_header(&sample, delimiter);
        file.seek(SeekFrom::Start(0))
            .map_err(|e| CoreError::io(path, e))?;

        let mut records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(file)
            .into_records();

        if header {
            if let Some(first) = records.next() {
                let first = first.map_err(|e| CoreError::csv(path, e))?;
                info!(
                    header = ?first.iter().collect::<Vec<_>>(),
                    "header row detected, skipping it"
                );
            }
        } else {
            debug!(path = %path.display(), "no header row detected");
        }

        Ok(Self {
            path: path.to_path_buf(),
            records,
            header_skipped: header,
            failed: false,
        })
    }

    /// Whether the first line was treated as a header.
    pub fn header_skipped(&self) -> bool {
        self.header_skipped
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for InputReader {
    type Item = Result<InputRow, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(CoreError::csv(&self.path, e)));
                }
            };

            if record.iter().all(|cell| cell.trim().is_empty()) && record.len() < 2 {
                continue;
            }

            if record.len() < 2 {
                self.failed = true;
                let line = record.position().map_or(0, csv::Position::line);
                return Some(Err(CoreError::InvalidInput {
                    line,
                    reason: format!(
                        "expected at least 2 columns (identifier, location), found {}",
                        record.len()
                    ),
                }));
            }

            return Some(Ok(InputRow::new(&record[0], &record[1])));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    fn file(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    fn rows(reader: InputReader) -> Vec<InputRow> {
        reader.map(Result::unwrap).collect()
    }

    // ── Header detection ─────────────────────────────────────────────

    #[test]
    fn named_columns_over_macs_is_a_header() {
        let sample = b"apMac,location\n\
            aa:bb:cc:dd:ee:01,Floor1\n\
            aa:bb:cc:dd:ee:02,Floor2\n";
        assert!(has_header(sample, b','));
    }

    #[test]
    fn data_only_is_not_a_header() {
        let sample = b"aa:bb:cc:dd:ee:01,Floor1\n\
            aa:bb:cc:dd:ee:02,Floor2\n\
            aa:bb:cc:dd:ee:03,Floor3\n";
        assert!(!has_header(sample, b','));
    }

    #[test]
    fn text_over_numbers_is_a_header() {
        let sample = b"id,room\n1,101\n2,102\n3,215\n";
        assert!(has_header(sample, b','));
    }

    #[test]
    fn single_line_is_not_a_header() {
        assert!(!has_header(b"apMac,location\n", b','));
        assert!(!has_header(b"", b','));
    }

    #[test]
    fn honours_delimiter() {
        let sample = b"apMac;location\n\
            aa:bb:cc:dd:ee:01;Floor1\n\
            aa:bb:cc:dd:ee:02;Floor2\n";
        assert!(has_header(sample, b';'));
    }

    #[test]
    fn rows_of_other_width_are_ignored() {
        let sample = b"apMac,location\n\
            aa:bb:cc:dd:ee:01,Floor1,extra\n\
            aa:bb:cc:dd:ee:02,Floor2\n\
            aa:bb:cc:dd:ee:03,Floor3\n";
        assert!(has_header(sample, b','));
    }

    #[test]
    fn truncated_last_line_is_dropped() {
        // Header and rows tie: "id" is not numeric (+1), the second column
        // has the same length everywhere (-1). A cut-off last row would
        // unsettle the second column and tip the vote.
        let mut sample = format!("id,{}\n", "h".repeat(50));
        for _ in 0..25 {
            sample.push_str(&format!("1,{}\n", "L".repeat(50)));
        }
        let sample = &sample.as_bytes()[..SAMPLE_LEN];
        assert!(!has_header(sample, b','));
    }

    // ── Reading ──────────────────────────────────────────────────────

    #[test]
    fn reads_rows_in_order_without_header() {
        let f = file("aa:bb:cc:dd:ee:01,Floor1\naa:bb:cc:dd:ee:02,Floor2\n");
        let reader = InputReader::open(f.path(), b',').unwrap();
        assert!(!reader.header_skipped());
        assert_eq!(
            rows(reader),
            vec![
                InputRow::new("aa:bb:cc:dd:ee:01", "Floor1"),
                InputRow::new("aa:bb:cc:dd:ee:02", "Floor2"),
            ]
        );
    }

    #[test]
    fn skips_detected_header_once() {
        let f = file(
            "apMac,location\n\
             aa:bb:cc:dd:ee:01,Floor1\n\
             aa:bb:cc:dd:ee:02,Floor2\n",
        );
        let reader = InputReader::open(f.path(), b',').unwrap();
        assert!(reader.header_skipped());
        let rows = rows(reader);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], InputRow::new("aa:bb:cc:dd:ee:01", "Floor1"));
    }

    #[test]
    fn extra_columns_and_blank_lines_are_ignored() {
        let f = file("aa:bb:cc:dd:ee:01;Floor1;note\n\naa:bb:cc:dd:ee:02;Floor2\n");
        let reader = InputReader::open(f.path(), b';').unwrap();
        assert_eq!(
            rows(reader),
            vec![
                InputRow::new("aa:bb:cc:dd:ee:01", "Floor1"),
                InputRow::new("aa:bb:cc:dd:ee:02", "Floor2"),
            ]
        );
    }

    #[test]
    fn empty_location_is_kept() {
        let f = file("aa:bb:cc:dd:ee:01,\n");
        let reader = InputReader::open(f.path(), b',').unwrap();
        assert_eq!(rows(reader), vec![InputRow::new("aa:bb:cc:dd:ee:01", "")]);
    }

    #[test]
    fn short_row_is_fatal_with_line_number() {
        let f = file("aa:bb:cc:dd:ee:01,Floor1\naa:bb:cc:dd:ee:02\naa:bb:cc:dd:ee:03,Floor3\n");
        let mut reader = InputReader::open(f.path(), b',').unwrap();

        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidInput { line: 2, .. }),
            "{err}"
        );
        assert!(reader.next().is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = InputReader::open(dir.path().join("nope.csv"), b',').unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }

    #[test]
    fn empty_file_yields_nothing() {
        let f = file("");
        let reader = InputReader::open(f.path(), b',').unwrap();
        assert!(rows(reader).is_empty());
    }
}
