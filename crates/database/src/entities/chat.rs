//! Chat entity.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    pub id: i64,
    pub usernames: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewChat {
    pub usernames: Vec<String>,
}
