//! persona CLI: chat with the persona, ask one question, search memories, list the corpus,
//! show logged exchanges. Config from env (`.env` supported) and CLI flags.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use embedding::{EmbeddingService, EnvEmbeddingConfig};
use llm_client::EnvLlmConfig;
use persona::{AgentConfig, KnowledgeBase, PersonaAgent, PersonaError, Retriever};
use persona_cli::providers::{create_embedding_service, create_generation_client, create_log_sink};
use persona_cli::{logger, AppConfig, Cli, Commands};
use storage::SqliteConversationLog;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

const PREVIEW_LEN: usize = 80;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.corpus, cli.no_log)?;
    logger::init_tracing(&config.log_file)?;

    match cli.command {
        Commands::Chat { session } => handle_chat(&config, session).await,
        Commands::Ask { question, session } => handle_ask(&config, &question, session).await,
        Commands::Search { query, k } => handle_search(&config, &query, k).await,
        Commands::Chunks => handle_chunks(&config).await,
        Commands::History { limit } => handle_history(&config, limit).await,
    }
}

/// Embedding service plus the knowledge base built from the configured corpus.
async fn load_knowledge(
    config: &AppConfig,
) -> Result<(Arc<KnowledgeBase>, Arc<dyn EmbeddingService>)> {
    let embedding_config = EnvEmbeddingConfig::from_env()
        .context("Load embedding config (EMBEDDING_PROVIDER, EMBEDDING_MODEL, OPENAI_API_KEY)")?;
    let embedding = create_embedding_service(&embedding_config).await?;

    let knowledge = KnowledgeBase::load(&config.corpus_path, embedding.as_ref())
        .await
        .with_context(|| format!("Build knowledge base from {}", config.corpus_path.display()))?;
    Ok((Arc::new(knowledge), embedding))
}

async fn build_agent(config: &AppConfig) -> Result<PersonaAgent> {
    let agent_config = AgentConfig::from_env()
        .context("Load agent config (RETRIEVAL_TOP_K, MAX_HISTORY_TURNS, HISTORY_ON_FAILURE)")?;
    let llm_config =
        EnvLlmConfig::from_env().context("Load LLM config (OPENAI_API_KEY, MODEL)")?;
    let preamble = config.preamble()?;

    let (knowledge, embedding) = load_knowledge(config).await?;
    let generator = create_generation_client(&llm_config);
    let sink = create_log_sink(config).await?;

    info!(
        top_k = agent_config.top_k,
        max_history_turns = ?agent_config.max_history_turns,
        history_on_failure = agent_config.history_on_failure.as_str(),
        "step: agent ready"
    );
    Ok(PersonaAgent::new(
        Retriever::new(knowledge, embedding),
        generator,
        sink,
        preamble,
        agent_config,
    ))
}

fn new_session_id() -> String {
    format!("cli-{}", chrono::Local::now().format("%Y%m%d%H%M%S"))
}

async fn handle_chat(config: &AppConfig, session: Option<String>) -> Result<()> {
    let agent = build_agent(config).await?;
    let session_id = session.unwrap_or_else(new_session_id);

    println!(
        "Memory status: online | total memories: {}",
        agent.retriever().knowledge().len()
    );
    println!("Session: {}  (/reset starts a new conversation, /quit exits)\n", session_id);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "/quit" | "/exit" => break,
            "/reset" => {
                agent.reset_session(&session_id).await;
                println!("(new conversation)\n");
                continue;
            }
            _ => {}
        }

        match agent.handle_turn(&session_id, &line).await {
            Ok(reply) => println!("persona> {}\n", reply),
            Err(PersonaError::EmptyInput) => {}
            Err(e) => {
                warn!(error = %e, "turn failed");
                println!("(error: {})\n", e);
            }
        }
    }

    Ok(())
}

async fn handle_ask(config: &AppConfig, question: &str, session: Option<String>) -> Result<()> {
    let agent = build_agent(config).await?;
    let session_id = session.unwrap_or_else(new_session_id);
    let reply = agent.handle_turn(&session_id, question).await?;
    println!("{}", reply);
    Ok(())
}

async fn handle_search(config: &AppConfig, query: &str, k: usize) -> Result<()> {
    let (knowledge, embedding) = load_knowledge(config).await?;
    let retriever = Retriever::new(knowledge, embedding);

    let results = retriever.retrieve_scored(query, k).await?;
    println!("Top {} memories for {:?}:\n", results.len(), query);
    println!("{:<6} {:<6} {:<10} {}", "rank", "chunk", "distance", "text");
    println!("{}", "-".repeat(100));
    for (rank, scored) in results.iter().enumerate() {
        println!(
            "{:<6} {:<6} {:<10.4} {}",
            rank + 1,
            scored.chunk.index,
            scored.distance,
            preview(&scored.chunk.text)
        );
    }
    Ok(())
}

async fn handle_chunks(config: &AppConfig) -> Result<()> {
    let (knowledge, _) = load_knowledge(config).await?;
    println!(
        "{} memories (dimension {}) from {}:\n",
        knowledge.len(),
        knowledge.dimension(),
        config.corpus_path.display()
    );
    for chunk in knowledge.chunks() {
        println!("[{}] {}", chunk.index, preview(&chunk.text));
    }
    Ok(())
}

async fn handle_history(config: &AppConfig, limit: i64) -> Result<()> {
    let log = SqliteConversationLog::new(&config.database_url)
        .await
        .with_context(|| format!("Open conversation log at {}", config.database_url))?;
    let total = log.count().await?;
    let records = log.recent(limit).await?;

    if records.is_empty() {
        println!("No exchanges logged (path: {}).", config.database_url);
        return Ok(());
    }

    println!(
        "Recent {} of {} exchange(s) (path: {}):\n",
        records.len(),
        total,
        config.database_url
    );
    for r in &records {
        println!(
            "{}  [{}]",
            r.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"),
            r.session_id
        );
        println!("  Q: {}", preview(&r.question));
        println!("  A: {}", preview(&r.answer));
    }
    Ok(())
}

/// `text` on one line, cut to [`PREVIEW_LEN`] chars.
fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    match flat.char_indices().nth(PREVIEW_LEN) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}
