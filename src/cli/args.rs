//! CLI argument definitions using clap
//!
//! Commands:
//! - sqldojo serve
//! - sqldojo seed
//! - sqldojo query <SQL>
//! - sqldojo explain <SQL>

use clap::{Parser, Subcommand};

/// sqldojo - An interactive SQL learning sandbox backed by PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "sqldojo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed the dataset (with startup retry) and serve the sandbox API
    Serve,

    /// Run the startup seed once and exit (0 on success, 1 on failure)
    Seed,

    /// Validate and execute a single query, printing the JSON result
    Query {
        /// Learner SQL text
        sql: String,
    },

    /// Validate a query and print its JSON execution plan
    Explain {
        /// Learner SQL text
        sql: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
