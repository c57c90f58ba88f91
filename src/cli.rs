//! CLI definitions for owner-capture.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Owner capture CLI.
#[derive(Parser)]
#[command(name = "owner-capture")]
#[command(about = "Hands business lookups to the registry and posts officials back")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.owner-capture/config.toml)
    #[arg(short, long, global = true, env = "OWNER_CAPTURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Handoff store file, overrides `store.path`
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Start a lookup as if a trigger was clicked on the origin page
    Trigger {
        /// Business name to look up; picks the matching trigger with --page
        #[arg(required_unless_present = "page")]
        name: Option<String>,

        /// Saved origin page; the name comes from its lookup triggers
        #[arg(long)]
        page: Option<PathBuf>,

        /// URL of the origin page the trigger lives on
        #[arg(long, default_value = "http://localhost:5000/")]
        origin: String,
    },

    /// Run the search stage with the stored business name
    Search {
        /// Saved search page; a bare form with the configured ids when omitted
        #[arg(long)]
        page: Option<PathBuf>,
    },

    /// Follow the "More information" link of an expanded result panel
    Results {
        /// Saved results page
        page: PathBuf,

        /// Id of the expanded panel
        panel: String,
    },

    /// Extract officials from a saved profile page and print the payload
    Extract {
        /// Saved profile page
        page: PathBuf,
    },

    /// Run the profile stage on a saved page: extract, deliver, signal reload
    Deliver {
        /// Saved profile page
        page: PathBuf,

        /// URL the page was loaded from (default: the configured profile prefix)
        #[arg(long)]
        url: Option<String>,
    },

    /// Watch for refresh tokens like an open origin page, until Ctrl+C
    Watch {
        /// URL of the origin page being watched
        #[arg(long, default_value = "http://localhost:5000/")]
        origin: String,
    },

    /// Handoff store commands
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },

    /// Print the workflow stage of a URL
    Classify {
        url: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum StoreAction {
    /// Show the stored handoff state
    Show,

    /// Remove every stored key
    Clear,
}
