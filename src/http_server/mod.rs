//! # sqldojo HTTP Server Module
//!
//! HTTP surface for the query sandbox.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/query` - Execute learner SQL
//! - `/api/explain` - JSON query plan for learner SQL
//! - `/api/reset` - Replay the seed script

pub mod config;
pub mod sandbox_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
