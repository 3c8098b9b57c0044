pub mod audit_log_repository;
pub mod chat_repository;
pub mod user_repository;

pub use audit_log_repository::{AuditLogRepository, AuditTable, SqliteAuditLogRepository};
pub use chat_repository::{ChatRepository, SqliteChatRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
