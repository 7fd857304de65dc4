pub mod action;
pub mod board;
pub mod client;
pub mod config;
pub mod domain;
pub mod schedule;
pub mod worker;
