use serde::Serialize;

use crate::models::{EXPECTED_FIELDS, HfmeaRecord};

/// Field count of a line whose PotentialEffect text contains one stray comma
pub const SPLIT_EFFECT_FIELDS: usize = EXPECTED_FIELDS + 1;

/// Separator restored between the two halves of a split PotentialEffect
const EFFECT_REJOIN: &str = ", ";

/// What happened to a single data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Empty after trimming; ignored
    Blank,
    /// Exactly the expected number of fields
    Clean(HfmeaRecord),
    /// Recovered by the split-effect rule
    Repaired(HfmeaRecord),
    /// Field count the normalizer has no rule for; the line is dropped
    Unhandled { field_count: usize },
}

impl LineOutcome {
    /// The record produced by this line, if any
    pub fn into_record(self) -> Option<HfmeaRecord> {
        match self {
            LineOutcome::Clean(record) | LineOutcome::Repaired(record) => Some(record),
            LineOutcome::Blank | LineOutcome::Unhandled { .. } => None,
        }
    }
}

/// Running tally of line outcomes for one pass over a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    /// Lines after the header, blank ones included
    pub data_lines: usize,
    pub blank: usize,
    pub clean: usize,
    pub repaired: usize,
    pub dropped: usize,
}

impl NormalizeStats {
    pub fn record(&mut self, outcome: &LineOutcome) {
        self.data_lines += 1;
        match outcome {
            LineOutcome::Blank => self.blank += 1,
            LineOutcome::Clean(_) => self.clean += 1,
            LineOutcome::Repaired(_) => self.repaired += 1,
            LineOutcome::Unhandled { .. } => self.dropped += 1,
        }
    }

    /// Number of records emitted
    pub fn emitted(&self) -> usize {
        self.clean + self.repaired
    }
}

/// Normalize one raw data line.
///
/// The line is trimmed and split on every comma; there is no quoting support.
/// Only 9-field lines and the 10-field split-effect shape produce a record.
pub fn normalize_line(raw: &str) -> LineOutcome {
    let line = raw.trim();
    if line.is_empty() {
        return LineOutcome::Blank;
    }

    let fields: Vec<&str> = line.split(',').collect();
    match fields.len() {
        EXPECTED_FIELDS => {
            let mut row = [""; EXPECTED_FIELDS];
            row.copy_from_slice(&fields);
            LineOutcome::Clean(HfmeaRecord::from_fields(row))
        }
        SPLIT_EFFECT_FIELDS => LineOutcome::Repaired(repair_split_effect(&fields)),
        field_count => LineOutcome::Unhandled { field_count },
    }
}

/// Split-effect repair rule.
///
/// Assumes the stray comma sits inside the PotentialEffect column: fields 3 and
/// 4 are rejoined and everything after them shifts left by one. Corruption in any
/// other column is not detected and will produce misaligned values.
fn repair_split_effect(fields: &[&str]) -> HfmeaRecord {
    debug_assert_eq!(fields.len(), SPLIT_EFFECT_FIELDS);

    HfmeaRecord {
        process_step: fields[0].to_string(),
        failure_mode: fields[1].to_string(),
        cause: fields[2].to_string(),
        potential_effect: [fields[3], fields[4]].join(EFFECT_REJOIN),
        current_controls: fields[5].to_string(),
        severity: fields[6].to_string(),
        occurrence: fields[7].to_string(),
        detectability: fields[8].to_string(),
        risk_priority_number: fields[9].to_string(),
    }
}
