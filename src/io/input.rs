use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{GraphError, Result};
use crate::models::HfmeaRecord;
use crate::stages::{LineOutcome, NormalizeStats, normalize_line};

/// Text lines split on `\n`, `\r\n` or a lone `\r`.
///
/// Bytes are split before decoding; neither terminator can occur inside a
/// multi-byte UTF-8 sequence.
pub struct UniversalLines<R> {
    reader: R,
}

impl<R: BufRead> UniversalLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return if bytes.is_empty() {
                    Ok(None)
                } else {
                    decode(bytes).map(Some)
                };
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    let ended_on_cr = available[end] == b'\r';
                    bytes.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    if ended_on_cr && self.reader.fill_buf()?.first() == Some(&b'\n') {
                        self.reader.consume(1);
                    }
                    return decode(bytes).map(Some);
                }
                None => {
                    let len = available.len();
                    bytes.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for UniversalLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

fn decode(bytes: Vec<u8>) -> io::Result<String> {
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Lazy reader over the data lines of an HFMEA source file.
///
/// The header line is consumed on open; a file without one is an error.
/// Each call to `next` reads until it finds a line that normalizes to a
/// record; blank and unhandled lines are skipped. The reader stops after the first I/O or decoding error.
pub struct RecordReader {
    path: PathBuf,
    lines: UniversalLines<BufReader<File>>,
    line_number: usize,
    stats: NormalizeStats,
    failed: bool,
}

impl RecordReader {
    /// Open `path` and skip its header line
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GraphError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GraphError::NotFound {
                path: path.to_path_buf(),
            },
            _ => GraphError::processing(path, e),
        })?;

        let mut lines = UniversalLines::new(BufReader::new(file));
        let header = lines
            .next()
            .unwrap_or_else(|| {
                Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "missing header line",
                ))
            })
            .map_err(|e| GraphError::processing(path, e))?;
        debug!("Skipping header of {:?}: {}", path, header);

        Ok(Self {
            path: path.to_path_buf(),
            lines,
            line_number: 1,
            stats: NormalizeStats::default(),
            failed: false,
        })
    }

    /// Outcome counts for the lines read so far
    pub fn stats(&self) -> NormalizeStats {
        self.stats
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for RecordReader {
    type Item = Result<HfmeaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(GraphError::processing(&self.path, e)));
                }
            };

            let outcome = normalize_line(&line);
            self.stats.record(&outcome);

            match &outcome {
                LineOutcome::Repaired(_) => info!(
                    "Repaired line {} (split PotentialEffect): {}",
                    self.line_number,
                    line.trim()
                ),
                LineOutcome::Unhandled { field_count } => warn!(
                    "Dropping line {} with unexpected format ({} fields): {}",
                    self.line_number,
                    field_count,
                    line.trim()
                ),
                LineOutcome::Blank | LineOutcome::Clean(_) => {}
            }

            if let Some(record) = outcome.into_record() {
                return Some(Ok(record));
            }
        }

        None
    }
}

/// Open an HFMEA source file as a lazy record sequence
pub fn read_records(path: &Path) -> Result<RecordReader> {
    RecordReader::open(path)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const HEADER: &str = "Etapa do Processo,Modo de Falha,Causa,Efeito Potencial,Controles Atuais,S,O,D,NPR";

    fn write_source(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_records_in_file_order() {
        let file = write_source(
            format!(
                "{HEADER}\nPrescribe,Wrong drug,Similar names,Adverse reaction,Tall-man lettering,9,3,4,108\n\
                 Dispense,Wrong dose,Calculation error,Overdose,Pharmacist review,8,2,3,48\n"
            )
            .as_bytes(),
        );

        let records: Vec<HfmeaRecord> = read_records(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].process_step, "Prescribe");
        assert_eq!(records[1].process_step, "Dispense");
        assert_eq!(records[1].risk_priority_number, "48");
    }

    #[test]
    fn test_header_is_never_a_record() {
        let file = write_source(b"a,b,c,d,e,f,g,h,i\n");
        let mut reader = read_records(file.path()).unwrap();
        assert!(reader.next().is_none());
        assert_eq!(reader.stats().data_lines, 0);
    }

    #[test]
    fn test_empty_file_is_processing_error() {
        let file = write_source(b"");
        let err = read_records(file.path()).err().unwrap();
        assert!(matches!(
            err,
            GraphError::Processing { ref source, .. } if source.kind() == io::ErrorKind::UnexpectedEof
        ));
    }

    #[test]
    fn test_header_only_without_newline_yields_nothing() {
        let file = write_source(b"a,b,c,d,e,f,g,h,i");
        let records: Vec<_> = read_records(file.path()).unwrap().collect();
        assert!(records.is_empty());
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let file = write_source(b"h\rA,B,C,D,E,1,2,3,6\rF,G,H,I,J,1,2,3,6\r");

        let records: Vec<HfmeaRecord> = read_records(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].process_step, "A");
        assert_eq!(records[1].process_step, "F");
        assert_eq!(records[1].risk_priority_number, "6");
    }

    #[test]
    fn test_universal_lines_splits_every_terminator() {
        let lines: Vec<String> = UniversalLines::new(io::Cursor::new(&b"a\rb\r\nc\n\rd"[..]))
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);
    }

    #[test]
    fn test_universal_lines_no_trailing_empty_line() {
        let lines: Vec<String> = UniversalLines::new(io::Cursor::new(&b"x\r\ny\r\n"[..]))
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["x", "y"]);
    }

    #[test]
    fn test_malformed_and_blank_lines_are_absorbed() {
        let file = write_source(
            format!(
                "{HEADER}\n\
                 Step A,Mode,Cause,Effect,Control,1,2,3,6\n\
                 \n\
                 only,seven,fields,here,x,y,z\n\
                 Step B,Mode,Cause,motor overheats,due to friction,Control,5,5,5,125\n"
            )
            .as_bytes(),
        );

        let mut reader = read_records(file.path()).unwrap();
        let records: Vec<HfmeaRecord> = reader.by_ref().collect::<Result<_>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].process_step, "Step A");
        assert_eq!(records[1].process_step, "Step B");
        assert_eq!(records[1].potential_effect, "motor overheats, due to friction");

        let stats = reader.stats();
        assert_eq!(stats.data_lines, 4);
        assert_eq!(stats.blank, 1);
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.repaired, 1);
        assert_eq!(stats.clean, 1);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hfmea2.csv");

        let err = read_records(&path).err().unwrap();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("hfmea2.csv"));
    }

    #[test]
    fn test_invalid_utf8_is_processing_error() {
        let mut content = format!("{HEADER}\n").into_bytes();
        content.extend_from_slice(b"Step,\xff\xfe,Cause,Effect,Control,1,2,3,6\n");
        let file = write_source(&content);

        let result: Result<Vec<HfmeaRecord>> = read_records(file.path()).unwrap().collect();
        let err = result.unwrap_err();
        assert!(matches!(err, GraphError::Processing { .. }));
    }

    #[test]
    fn test_reader_stops_after_error() {
        let mut content = format!("{HEADER}\n").into_bytes();
        content.extend_from_slice(b"\xff\n");
        content.extend_from_slice(b"Step,Mode,Cause,Effect,Control,1,2,3,6\n");
        let file = write_source(&content);

        let mut reader = read_records(file.path()).unwrap();
        assert!(matches!(reader.next(), Some(Err(_))));
        assert!(reader.next().is_none());
    }
}
