//! Durable storage for knowledge chunks and chat history

mod database;

pub use database::Database;
