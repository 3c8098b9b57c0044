pub mod audit;
pub mod chat;
pub mod user;
