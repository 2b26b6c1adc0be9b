//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::settings::Overrides;

/// Command line client for a DokuWiki instance
#[derive(Debug, Parser)]
#[command(name = "dokuwiki", version, about)]
pub struct Cli {
    /// Configuration file (default: conf/dokuwiki.yml, if present)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint URL
    #[arg(long)]
    pub url: Option<String>,

    #[arg(short = 'u', long = "user")]
    pub username: Option<String>,

    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Print the wiki version
    Version,
    /// List namespaces directly below a namespace
    Namespaces { namespace: String },
    /// List pages of a namespace
    Pages {
        namespace: String,
        /// Absolute depth; 0 lists the whole subtree
        #[arg(long, default_value_t = 0)]
        depth: u32,
    },
    /// List names of pages directly in a namespace
    PageNames { namespace: String },
    /// List every page of the wiki
    AllPages,
    /// Full-text search
    Search {
        query: String,
        /// Print only matching page ids
        #[arg(long)]
        ids: bool,
    },
    /// Print page content
    Get { id: String },
    /// Create or replace a page from a file or stdin
    Put {
        id: String,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        minor: bool,
    },
    /// Delete one page
    DeletePage { id: String },
    /// Delete all pages of a namespace subtree
    DeletePages { namespace: String },
    /// List attachments of a namespace
    Attachments {
        namespace: String,
        /// Absolute depth; defaults to attachments directly in the namespace
        #[arg(long)]
        depth: Option<u32>,
        /// Print only file names
        #[arg(long)]
        names: bool,
    },
    /// Download an attachment
    GetAttachment {
        id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Upload an attachment
    PutAttachment {
        id: String,
        file: PathBuf,
        #[arg(long)]
        overwrite: bool,
        /// Modification time to record, in Unix seconds
        #[arg(long)]
        mtime: Option<i64>,
    },
    /// Delete one attachment
    DeleteAttachment { id: String },
    /// Delete all attachments of a namespace subtree
    DeleteAttachments { namespace: String },
    /// Delete all pages and then all attachments of a namespace subtree
    DeleteNamespace { namespace: String },
}
