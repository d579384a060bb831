//! Health assessments and their closed set of kinds.

use serde::{Deserialize, Serialize};

use super::{Identified, RecordId};

/// Every assessment kind the API can return.
///
/// Unknown kinds fail deserialization instead of falling through to a
/// default view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentKind {
    SymptomCheck,
    MoodTracker,
    SleepQuality,
    Intake,
}

impl AssessmentKind {
    /// Template used to render an assessment of this kind.
    pub fn template(&self) -> &'static str {
        match self {
            AssessmentKind::SymptomCheck => "assessments/symptom-check",
            AssessmentKind::MoodTracker => "assessments/mood-tracker",
            AssessmentKind::SleepQuality => "assessments/sleep-quality",
            AssessmentKind::Intake => "assessments/intake",
        }
    }

    /// Whether answers feed the care team's view of the patient.
    pub fn shared_with_care_team(&self) -> bool {
        match self {
            AssessmentKind::SymptomCheck | AssessmentKind::Intake => true,
            AssessmentKind::MoodTracker | AssessmentKind::SleepQuality => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    pub title: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl Identified for Assessment {
    type Id = RecordId;

    fn id(&self) -> &RecordId {
        &self.id
    }
}
