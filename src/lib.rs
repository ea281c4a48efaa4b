pub mod cli;
pub mod config;
pub mod error;
pub mod recognizer;
pub mod recommend;
pub mod scanner;
