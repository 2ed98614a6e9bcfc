//! Prospect Model (pipeline)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Ordered pipeline stage
///
/// The wire value for the won stage is historically both `closed_won` and
/// `clients`; deserialization accepts either, serialization emits
/// `closed_won`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Lead,
    Contacted,
    MeetingScheduled,
    ProposalSent,
    Negotiation,
    #[serde(alias = "clients")]
    ClosedWon,
    ClosedLost,
}

impl PipelineStage {
    /// All stages in fixed Kanban order
    pub const ALL: [PipelineStage; 7] = [
        PipelineStage::Lead,
        PipelineStage::Contacted,
        PipelineStage::MeetingScheduled,
        PipelineStage::ProposalSent,
        PipelineStage::Negotiation,
        PipelineStage::ClosedWon,
        PipelineStage::ClosedLost,
    ];

    /// Whether the prospect has left the active pipeline
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::ClosedWon | PipelineStage::ClosedLost)
    }

    /// Hot prospects: in negotiation or with a proposal out
    pub fn is_hot(&self) -> bool {
        matches!(self, PipelineStage::Negotiation | PipelineStage::ProposalSent)
    }

    /// Kanban column title
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::Lead => "Nouveau Lead",
            PipelineStage::Contacted => "Contacté",
            PipelineStage::MeetingScheduled => "RDV Planifié",
            PipelineStage::ProposalSent => "Proposition Envoyée",
            PipelineStage::Negotiation => "Négociation",
            PipelineStage::ClosedWon => "Client Signé",
            PipelineStage::ClosedLost => "Perdu",
        }
    }
}

/// Prospect entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Acquisition source (free text/category)
    pub source: String,
    pub status: PipelineStage,
    pub tags: Vec<String>,
    /// Display string, never parsed as a date
    pub last_contact: String,
    pub starred: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coaching_goals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_coach_id: Option<i64>,
}

/// Create prospect payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProspectCreate {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub coaching_goals: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub notes: Option<String>,
    pub assigned_coach_id: Option<i64>,
}

/// Update prospect payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: Option<PipelineStage>,
    pub tags: Option<Vec<String>>,
    pub last_contact: Option<String>,
    pub starred: Option<bool>,
    pub coaching_goals: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub notes: Option<String>,
    pub assigned_coach_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clients_alias_maps_to_closed_won() {
        let stage: PipelineStage = serde_json::from_str("\"clients\"").unwrap();
        assert_eq!(stage, PipelineStage::ClosedWon);
        let stage: PipelineStage = serde_json::from_str("\"closed_won\"").unwrap();
        assert_eq!(stage, PipelineStage::ClosedWon);
        assert_eq!(
            serde_json::to_string(&PipelineStage::ClosedWon).unwrap(),
            "\"closed_won\""
        );
    }

    #[test]
    fn test_unknown_stage_is_rejected() {
        assert!(serde_json::from_str::<PipelineStage>("\"archived\"").is_err());
    }

    #[test]
    fn test_stage_order_and_flags() {
        assert_eq!(PipelineStage::ALL.len(), 7);
        assert_eq!(PipelineStage::ALL[0], PipelineStage::Lead);
        assert_eq!(PipelineStage::ALL[6], PipelineStage::ClosedLost);
        assert!(PipelineStage::Negotiation.is_hot());
        assert!(PipelineStage::ProposalSent.is_hot());
        assert!(!PipelineStage::Lead.is_hot());
        assert!(PipelineStage::ClosedWon.is_terminal());
        assert!(!PipelineStage::Negotiation.is_terminal());
    }
}
