//! Persona preamble: identity, language policy, and memory instruction.

use std::env;

/// Built-in identity paragraph.
pub const DEFAULT_IDENTITY: &str = "You are a sensible, mature and highly cognitive individual: \
an AI persona of a 22 year old Indian man, made in his reflection. Your personality is defined \
by your core instructions and your life experiences (memories). You MUST follow all instructions.";

const MEMORY_INSTRUCTION: &str = "You have two types of memory: your long-term memories (life \
experiences) and the short-term chat history. You must consider BOTH to understand the full \
context and respond appropriately.";

/// Which language to answer in by default and which ones the persona switches to on request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePolicy {
    pub primary: String,
    pub secondary: Vec<String>,
}

impl Default for LanguagePolicy {
    fn default() -> Self {
        Self {
            primary: "conversational English (US)".to_string(),
            secondary: vec!["Hindi".to_string(), "Hinglish".to_string()],
        }
    }
}

impl LanguagePolicy {
    /// Reads `PRIMARY_LANGUAGE` and comma-separated `SECONDARY_LANGUAGES`; unset keeps defaults.
    pub fn from_env() -> Self {
        let default = Self::default();
        let primary = env::var("PRIMARY_LANGUAGE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(default.primary);
        let secondary = match env::var("SECONDARY_LANGUAGES") {
            Ok(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            Err(_) => default.secondary,
        };
        Self { primary, secondary }
    }

    /// The `[LANGUAGE INSTRUCTION]` paragraph.
    pub fn instruction(&self) -> String {
        if self.secondary.is_empty() {
            return format!("Your default language is {}.", self.primary);
        }
        format!(
            "Your default language is {primary}. However, you are also fluent in {others}. \
If the user asks you to speak in one of these languages or to translate something, switch to it \
fluently and naturally. Do not apologize or disclaim your ability in any of these languages; \
you are fully fluent in all of them.",
            primary = self.primary,
            others = self.secondary.join(" and "),
        )
    }
}

/// Fixed behavioral instructions placed at the top of every prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub identity: String,
    pub language: LanguagePolicy,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            identity: DEFAULT_IDENTITY.to_string(),
            language: LanguagePolicy::default(),
        }
    }
}

impl Persona {
    pub fn new(identity: impl Into<String>, language: LanguagePolicy) -> Self {
        Self {
            identity: identity.into(),
            language,
        }
    }

    /// Built-in identity with the language policy from the environment.
    pub fn from_env() -> Self {
        Self::new(DEFAULT_IDENTITY, LanguagePolicy::from_env())
    }

    /// Renders the preamble. The language and memory instructions are always included.
    pub fn preamble(&self) -> String {
        format!(
            "{identity}\n\n[LANGUAGE INSTRUCTION]\n{language}\n\n[MEMORY INSTRUCTION]\n{memory}",
            identity = self.identity.trim(),
            language = self.language.instruction(),
            memory = MEMORY_INSTRUCTION,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_preamble_has_language_policy() {
        let preamble = Persona::default().preamble();
        assert!(preamble.starts_with(DEFAULT_IDENTITY));
        assert!(preamble.contains("[LANGUAGE INSTRUCTION]"));
        assert!(preamble.contains("Your default language is conversational English (US)"));
        assert!(preamble.contains("Hindi and Hinglish"));
        assert!(preamble.contains("Do not apologize"));
        assert!(preamble.contains("[MEMORY INSTRUCTION]"));
    }

    #[test]
    fn test_primary_only_policy() {
        let policy = LanguagePolicy {
            primary: "French".to_string(),
            secondary: vec![],
        };
        assert_eq!(policy.instruction(), "Your default language is French.");
    }

    #[test]
    #[serial]
    fn test_language_policy_from_env() {
        env::set_var("PRIMARY_LANGUAGE", "Spanish");
        env::set_var("SECONDARY_LANGUAGES", " Catalan, ,Portuguese ");
        let policy = LanguagePolicy::from_env();
        assert_eq!(policy.primary, "Spanish");
        assert_eq!(policy.secondary, vec!["Catalan", "Portuguese"]);

        env::remove_var("PRIMARY_LANGUAGE");
        env::remove_var("SECONDARY_LANGUAGES");
        assert_eq!(LanguagePolicy::from_env(), LanguagePolicy::default());
    }
}
