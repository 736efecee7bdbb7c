use std::fmt::Display;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    HighlightRequested,
    HighlightCreated,
    HighlightApproved,
    HighlightRejected,
    HighlightDeleted,
    BusinessPlanChanged,
    BusinessStatusChanged,
}

impl Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self {
            AuditAction::HighlightRequested => "highlight.requested",
            AuditAction::HighlightCreated => "highlight.created",
            AuditAction::HighlightApproved => "highlight.approved",
            AuditAction::HighlightRejected => "highlight.rejected",
            AuditAction::HighlightDeleted => "highlight.deleted",
            AuditAction::BusinessPlanChanged => "business.plan_changed",
            AuditAction::BusinessStatusChanged => "business.status_changed",
        };
        write!(f, "{}", action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub business_id: Uuid,
    pub actor_id: Uuid,
}
