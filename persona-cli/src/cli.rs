//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "persona")]
#[command(about = "Persona chatbot: chat, ask, search memories, inspect logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Corpus file (overrides CORPUS_PATH).
    #[arg(long, global = true)]
    pub corpus: Option<String>,

    /// Do not write exchanges to the conversation log.
    #[arg(long, global = true)]
    pub no_log: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat over stdin. `/reset` starts a new conversation, `/quit` exits.
    Chat {
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Answer a single question and exit.
    Ask {
        question: String,
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Show the memories retrieved for a query, with distances. No generation.
    Search {
        query: String,
        #[arg(short, long, default_value = "5")]
        k: usize,
    },
    /// List every memory loaded from the corpus.
    Chunks,
    /// Show the most recent logged exchanges.
    History {
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
}
