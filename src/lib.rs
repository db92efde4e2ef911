pub mod api;
pub mod config;
pub mod llm;
pub mod review;
pub mod search;
