use serde::{Deserialize, Serialize};

/// A student profile supplied fresh for one matching run.
///
/// Records are immutable once a run starts; the engine only reads them.
/// All attribute fields are optional free text — absent or blank fields are
/// simply skipped when the text representation is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateRecord {
    /// Opaque identifier, unique within the run.
    pub candidate_id: String,
    /// Human-readable name used by reporting; never embedded.
    pub display_name: String,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub stream: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub preferred_locations: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Demographic fields carried for reporting collaborators.
    /// These never enter the text representation.
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub caste: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub financial_status: Option<String>,
}

impl CandidateRecord {
    /// A record with only identity set; attributes default to absent.
    pub fn new(candidate_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            display_name: display_name.into(),
            skills: None,
            degree: None,
            stream: None,
            city: None,
            state: None,
            preferred_locations: None,
            notes: None,
            pincode: None,
            caste: None,
            gender: None,
            financial_status: None,
        }
    }
}

/// A company opening with a bounded number of seats.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotRecord {
    /// Opaque identifier, unique within the run.
    pub slot_id: String,
    /// Organization name used by reporting; never embedded.
    pub display_name: String,
    #[serde(default)]
    pub position_title: Option<String>,
    #[serde(default)]
    pub required_skills: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub priority_flags: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Monthly stipend, informational only; never embedded.
    #[serde(default)]
    pub stipend: Option<f32>,
    /// Raw seat count as supplied. Use [`SlotRecord::capacity`] when
    /// consuming it — non-positive values read as 1.
    #[serde(default = "default_openings")]
    pub openings: i32,
}

fn default_openings() -> i32 {
    1
}

impl SlotRecord {
    /// A record with only identity set; one opening, attributes absent.
    pub fn new(slot_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            slot_id: slot_id.into(),
            display_name: display_name.into(),
            position_title: None,
            required_skills: None,
            description: None,
            city: None,
            state: None,
            priority_flags: None,
            notes: None,
            stipend: None,
            openings: default_openings(),
        }
    }

    /// Effective capacity for assignment. Missing or non-positive `openings`
    /// normalize to 1, never 0.
    pub fn capacity(&self) -> usize {
        self.openings.max(1) as usize
    }
}
