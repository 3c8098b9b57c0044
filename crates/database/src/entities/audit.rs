//! Audit log entries.
//!
//! One append-only row per successful mutation, written in the same
//! transaction as the mutation it describes.

/// The closed set of audit actions. Entity scoping comes from the table the
/// entry is written to (`user_logs` or `chat_logs`), not from the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    MessageSent,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::Updated => "updated",
            AuditAction::Deleted => "deleted",
            AuditAction::MessageSent => "message_sent",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NewAuditEntry {
    pub action: AuditAction,
    /// Id of the entity the action touched. Zero when no entity id is
    /// meaningful (the message wire contract carries no chat id).
    pub entity_id: i64,
}

impl NewAuditEntry {
    pub fn new(action: AuditAction, entity_id: i64) -> Self {
        Self { action, entity_id }
    }
}
