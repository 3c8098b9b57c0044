//! Chat domain service.
//!
//! Mirrors the user service: one entity write plus one audit-log write per
//! mutation, committed or rolled back together.

use std::sync::Arc;

use parley_database::{
    AuditAction, AuditLogRepository, Chat, ChatRepository, NewAuditEntry, NewChat,
    TransactionError, TxManager,
};
use tracing::info;

use crate::types::{ChatServiceError, IncomingMessage};

/// Audit rows for messages carry no chat id; the wire contract does not
/// include one.
const NO_ENTITY_ID: i64 = 0;

pub struct ChatService {
    chats: Arc<dyn ChatRepository>,
    audit: Arc<dyn AuditLogRepository>,
    tx: TxManager,
}

impl ChatService {
    pub fn new(
        chats: Arc<dyn ChatRepository>,
        audit: Arc<dyn AuditLogRepository>,
        tx: TxManager,
    ) -> Self {
        Self { chats, audit, tx }
    }

    /// Atomically insert the chat and its "created" audit row. Returns the
    /// generated id.
    pub async fn create(&self, usernames: Vec<String>) -> Result<i64, ChatServiceError> {
        validate_usernames(&usernames)?;

        let new_chat = NewChat { usernames };
        let chats = Arc::clone(&self.chats);
        let audit = Arc::clone(&self.audit);
        let id = self
            .tx
            .read_committed(move |conn| {
                Box::pin(async move {
                    let id = chats.create(&mut *conn, &new_chat).await?;
                    audit
                        .record(&mut *conn, &NewAuditEntry::new(AuditAction::Created, id))
                        .await?;
                    Ok::<i64, ChatServiceError>(id)
                })
            })
            .await?;

        info!(id, "chat created");
        Ok(id)
    }

    /// Single read, outside any transaction.
    pub async fn get(&self, id: i64) -> Result<Chat, ChatServiceError> {
        let mut conn = self
            .tx
            .pool()
            .acquire()
            .await
            .map_err(|e| TransactionError::Acquire(e.to_string()))?;

        let chat = self.chats.get(&mut conn, id).await?;
        Ok(chat)
    }

    /// Atomically delete the chat and write its "deleted" audit row.
    pub async fn delete(&self, id: i64) -> Result<(), ChatServiceError> {
        let chats = Arc::clone(&self.chats);
        let audit = Arc::clone(&self.audit);
        self.tx
            .read_committed(move |conn| {
                Box::pin(async move {
                    chats.delete(&mut *conn, id).await?;
                    audit
                        .record(&mut *conn, &NewAuditEntry::new(AuditAction::Deleted, id))
                        .await?;
                    Ok::<(), ChatServiceError>(())
                })
            })
            .await?;

        info!(id, "chat deleted");
        Ok(())
    }

    /// Record a message. There is no message table yet, so the message itself
    /// is only logged; the audit row is still written atomically.
    pub async fn send_message(&self, message: IncomingMessage) -> Result<(), ChatServiceError> {
        info!(
            from = %message.from,
            timestamp = %message.timestamp,
            text = %message.text,
            "message received"
        );

        let audit = Arc::clone(&self.audit);
        self.tx
            .read_committed(move |conn| {
                Box::pin(async move {
                    audit
                        .record(
                            &mut *conn,
                            &NewAuditEntry::new(AuditAction::MessageSent, NO_ENTITY_ID),
                        )
                        .await?;
                    Ok::<(), ChatServiceError>(())
                })
            })
            .await?;

        Ok(())
    }
}

fn validate_usernames(usernames: &[String]) -> Result<(), ChatServiceError> {
    if usernames.is_empty() {
        return Err(ChatServiceError::Validation(
            "username list must not be empty".to_string(),
        ));
    }

    if usernames.iter().any(|name| name.trim().is_empty()) {
        return Err(ChatServiceError::Validation(
            "usernames must not be blank".to_string(),
        ));
    }

    Ok(())
}
