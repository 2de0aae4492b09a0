//! # Prompt
//!
//! Composes the single prompt string sent to the generation client.
//!
//! ## Format
//!
//! 1. **Persona preamble**: identity, language policy, memory instruction ([`Persona`]).
//! 2. **Long-term memories**: retrieved corpus chunks, one `- ` bullet each, in retrieval order.
//! 3. **Short-term memory**: conversation history as `role: content` lines, oldest first.
//! 4. **Current question**: `user: {query}`, then an `assistant:` continuation cue.
//!
//! Empty memories or empty history render as an empty block under their heading.
//!
//! ## External interactions
//!
//! - **Generation client**: output is sent as-is to the LLM.

mod persona;
mod turn;

pub use persona::{LanguagePolicy, Persona, DEFAULT_IDENTITY};
pub use turn::{ConversationTurn, Role};

/// Heading for retrieved corpus chunks.
pub const SECTION_MEMORIES: &str = "[LONG-TERM MEMORIES - Relevant for this specific moment]";

/// Heading for the session history.
pub const SECTION_HISTORY: &str =
    "[SHORT-TERM MEMORY - The last few turns of our current conversation]";

/// Heading for the new user query.
pub const SECTION_QUESTION: &str = "[USER'S CURRENT QUESTION]";

/// Heading before the continuation cue.
pub const SECTION_RESPONSE: &str = "[YOUR RESPONSE]";

/// Renders retrieved memories as a bulleted block (no heading).
pub fn render_memories<M, MI>(memories: M) -> String
where
    M: IntoIterator<Item = MI>,
    MI: AsRef<str>,
{
    let mut out = String::new();
    for memory in memories {
        out.push_str("- ");
        out.push_str(memory.as_ref());
        out.push('\n');
    }
    out
}

/// Renders history as `role: content` lines, oldest first (no heading).
pub fn render_history(history: &[ConversationTurn]) -> String {
    let mut out = String::new();
    for turn in history {
        out.push_str(&turn.to_line());
        out.push('\n');
    }
    out
}

/// Builds the full prompt from its four sections.
///
/// Pure: no I/O, no mutation. Every memory string and every history turn's content
/// appears verbatim in the output.
///
/// # Arguments
///
/// * `preamble` - Persona/behavior instructions (see [`Persona::preamble`])
/// * `memories` - Retrieved chunk texts, closest first
/// * `history` - Prior turns of this session, oldest first
/// * `query` - The new user message
pub fn compose<M, MI>(
    preamble: &str,
    memories: M,
    history: &[ConversationTurn],
    query: &str,
) -> String
where
    M: IntoIterator<Item = MI>,
    MI: AsRef<str>,
{
    let mut out = String::new();

    out.push_str(preamble.trim_end());
    out.push_str("\n\n");

    out.push_str(SECTION_MEMORIES);
    out.push('\n');
    out.push_str(&render_memories(memories));
    out.push('\n');

    out.push_str(SECTION_HISTORY);
    out.push('\n');
    out.push_str(&render_history(history));
    out.push('\n');

    out.push_str(SECTION_QUESTION);
    out.push('\n');
    out.push_str(&ConversationTurn::user(query).to_line());
    out.push_str("\n\n");

    out.push_str(SECTION_RESPONSE);
    out.push('\n');
    out.push_str(Role::Assistant.as_str());
    out.push(':');
    out
}
