//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! `travis-ci` binary.

use clap::{Parser, Subcommand};

/// Travis CI command-line interface.
#[derive(Parser, Debug)]
#[command(name = "travis-ci", about = "Manage Travis CI for GitHub repositories", version)]
pub struct Cli {
    /// Output results as JSON instead of human-readable text.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Talk to travis-ci.com instead of travis-ci.org.
    #[arg(long, global = true, default_value = "false")]
    pub pro: bool,

    /// Default GitHub organization for short repository names.
    #[arg(long, global = true, env = "GITHUB_ORG")]
    pub org: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Turn CI on for a repository.
    Enable {
        /// Repository name (`repo` or `org/repo`).
        repo: String,
    },

    /// Turn CI off for a repository.
    Disable {
        /// Repository name (`repo` or `org/repo`).
        repo: String,
    },

    /// Show whether CI is on for a repository.
    Status {
        /// Repository name (`repo` or `org/repo`).
        repo: String,
    },

    /// List the repositories of a user or organization.
    Repos {
        /// Owner login (defaults to `--org`).
        #[arg(long)]
        owner: Option<String>,

        /// Only show repositories with CI on.
        #[arg(long)]
        active: bool,

        /// Index of the first repository.
        #[arg(long)]
        offset: Option<u32>,

        /// Maximum number of repositories.
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Resync the account's repositories from GitHub.
    Sync {
        /// Block until the sync finishes.
        #[arg(long)]
        wait: bool,

        /// Give up waiting after this many seconds.
        #[arg(long, default_value = "300")]
        timeout: u64,

        /// Seconds between status checks.
        #[arg(long, default_value = "1")]
        interval: u64,
    },

    /// Show the authenticated user.
    Whoami,
}
