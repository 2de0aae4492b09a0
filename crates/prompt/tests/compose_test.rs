//! Tests for `prompt::compose` and its section renderers.
//! External interactions: none (pure function tests).

use prompt::{
    compose, render_history, render_memories, ConversationTurn, Persona, Role, SECTION_HISTORY,
    SECTION_MEMORIES, SECTION_QUESTION, SECTION_RESPONSE,
};

const PREAMBLE: &str = "You are a test persona.";

/// **Test: First turn (no memories, no history) still yields a well-formed prompt.**
#[test]
fn compose_first_turn_renders_empty_blocks() {
    let out = compose(PREAMBLE, &[] as &[&str], &[], "Hello there");

    let expected = format!(
        "{PREAMBLE}\n\n{SECTION_MEMORIES}\n\n{SECTION_HISTORY}\n\n{SECTION_QUESTION}\nuser: Hello there\n\n{SECTION_RESPONSE}\nassistant:"
    );
    assert_eq!(out, expected);
}

/// **Test: Sections appear in order: preamble, memories, history, question, cue.**
#[test]
fn compose_orders_sections() {
    let history = vec![ConversationTurn::user("hi"), ConversationTurn::assistant("hey!")];
    let out = compose(PREAMBLE, ["I love chess."], &history, "what did I just say?");

    let positions: Vec<usize> = [
        PREAMBLE,
        SECTION_MEMORIES,
        "- I love chess.",
        SECTION_HISTORY,
        "user: hi\nassistant: hey!",
        SECTION_QUESTION,
        "user: what did I just say?",
        SECTION_RESPONSE,
    ]
    .iter()
    .map(|needle| out.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    assert!(out.ends_with("assistant:"));
}

/// **Test: Every memory and every history content appears verbatim.**
#[test]
fn compose_contains_all_inputs_verbatim() {
    let memories = vec![
        "I grew up in Delhi.".to_string(),
        "Multi-line memory\nsecond line".to_string(),
    ];
    let history = vec![
        ConversationTurn::user("first question"),
        ConversationTurn::assistant("first answer\nwith detail"),
        ConversationTurn::user("second question"),
    ];
    let out = compose(PREAMBLE, &memories, &history, "third question");

    for m in &memories {
        assert!(out.contains(m.as_str()));
    }
    for t in &history {
        assert!(out.contains(t.content.as_str()));
    }
    assert!(out.contains("third question"));
}

/// **Test: Memories keep the supplied order as bullets.**
#[test]
fn render_memories_bullets_in_order() {
    assert_eq!(render_memories(["b", "a", "c"]), "- b\n- a\n- c\n");
    assert_eq!(render_memories(Vec::<String>::new()), "");
}

/// **Test: History renders role-labelled lines, oldest first.**
#[test]
fn render_history_role_lines() {
    let history = vec![
        ConversationTurn::new(Role::User, "hi"),
        ConversationTurn::new(Role::Assistant, "hello"),
    ];
    assert_eq!(render_history(&history), "user: hi\nassistant: hello\n");
    assert_eq!(render_history(&[]), "");
}

/// **Test: Trailing whitespace in the preamble does not leak extra blank lines.**
#[test]
fn compose_trims_preamble_tail() {
    let out = compose("Persona.\n\n\n", &[] as &[&str], &[], "q");
    assert!(out.starts_with(&format!("Persona.\n\n{SECTION_MEMORIES}")));
}

/// **Test: The default persona preamble carries the language policy into the prompt.**
#[test]
fn compose_with_default_persona() {
    let preamble = Persona::default().preamble();
    let out = compose(&preamble, ["I value loyalty above all."], &[], "Namaste, Hindi mein baat karo");
    assert!(out.contains("[LANGUAGE INSTRUCTION]"));
    assert!(out.contains("- I value loyalty above all."));
}
