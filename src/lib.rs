//! sqldojo - An interactive SQL learning sandbox backed by PostgreSQL
//!
//! Untrusted learners submit free-form SQL text against a shared practice
//! dataset. The sandbox enforces read-only, single-statement execution
//! through a lexical validator, bounds result sizes, and routes every
//! learner statement through a restricted database role. A privileged
//! owner role is used only to seed and reset the dataset.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod sandbox;
