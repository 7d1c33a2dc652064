use serde::{Deserialize, Serialize};

/// Number of comma-separated fields in a well-formed data line
pub const EXPECTED_FIELDS: usize = 9;

/// One normalized HFMEA data row.
///
/// Every field is kept as the raw text from the source file, including the
/// numeric scoring columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HfmeaRecord {
    /// Step of the care process being analysed
    pub process_step: String,
    /// How the step can fail
    pub failure_mode: String,
    /// Why the failure happens
    pub cause: String,
    /// What the failure leads to
    pub potential_effect: String,
    /// Safeguards already in place
    pub current_controls: String,
    /// Severity score (S)
    pub severity: String,
    /// Occurrence score (O)
    pub occurrence: String,
    /// Detectability score (D)
    pub detectability: String,
    /// Risk priority number (RPN)
    pub risk_priority_number: String,
}

impl HfmeaRecord {
    /// Build a record from exactly nine fields in column order.
    pub fn from_fields(fields: [&str; EXPECTED_FIELDS]) -> Self {
        let [
            process_step,
            failure_mode,
            cause,
            potential_effect,
            current_controls,
            severity,
            occurrence,
            detectability,
            risk_priority_number,
        ] = fields;

        Self {
            process_step: process_step.to_string(),
            failure_mode: failure_mode.to_string(),
            cause: cause.to_string(),
            potential_effect: potential_effect.to_string(),
            current_controls: current_controls.to_string(),
            severity: severity.to_string(),
            occurrence: occurrence.to_string(),
            detectability: detectability.to_string(),
            risk_priority_number: risk_priority_number.to_string(),
        }
    }

    /// Text shown on the graph node for `category`, or `None` when the cell is empty
    pub fn label_for(&self, category: NodeCategory) -> Option<&str> {
        let value = match category {
            NodeCategory::ProcessStep => &self.process_step,
            NodeCategory::FailureMode => &self.failure_mode,
            NodeCategory::Cause => &self.cause,
            NodeCategory::Effect => &self.potential_effect,
            NodeCategory::Control => &self.current_controls,
        };
        Some(value.as_str()).filter(|v| !v.is_empty())
    }
}

/// Analytical stage a graph node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCategory {
    ProcessStep,
    FailureMode,
    Cause,
    Effect,
    Control,
}

impl NodeCategory {
    /// All categories in chain order, left to right
    pub const CHAIN: [NodeCategory; 5] = [
        NodeCategory::ProcessStep,
        NodeCategory::FailureMode,
        NodeCategory::Cause,
        NodeCategory::Effect,
        NodeCategory::Control,
    ];

    /// Layout column. Even spacing leaves room for annotation columns.
    pub fn column(self) -> u32 {
        match self {
            NodeCategory::ProcessStep => 0,
            NodeCategory::FailureMode => 2,
            NodeCategory::Cause => 4,
            NodeCategory::Effect => 6,
            NodeCategory::Control => 8,
        }
    }
}
