pub mod catalog;
pub mod clear;
pub mod config;
pub mod context;
pub mod library;
pub mod prompts;
pub mod spinner;
pub mod theme;
