//! Natural-language to command translation.
//!
//! Wraps the completion provider: builds the deterministic prompt,
//! sanitizes the raw reply down to exactly one command line, and maps
//! the sentinels. Provider failures never escape as errors - they become
//! `Rejected`, because a failed translation must not take the session down.

use std::path::Path;

use crate::dialect::Dialect;
use crate::providers::CompletionProvider;

/// Reply sentinel meaning the input was already a valid command.
pub const VALID_SENTINEL: &str = "VALID_COMMAND";

/// Prefix of reply sentinels meaning no safe translation exists.
pub const ERROR_PREFIX: &str = "ERROR:";

/// Outcome of translating a natural-language line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    /// The original line should run unmodified.
    Direct,
    /// The translated command line to execute.
    Command(String),
    /// No safe or valid translation exists; the reason is rendered verbatim.
    Rejected(String),
}

/// Translator holding the completion-provider capability.
///
/// The provider is constructor input, never ambient state; tests hand in
/// a double, the CLI hands in the Gemini client.
pub struct Translator {
    provider: Box<dyn CompletionProvider>,
    dialect: Dialect,
}

impl Translator {
    pub fn new(provider: Box<dyn CompletionProvider>, dialect: Dialect) -> Self {
        Self { provider, dialect }
    }

    /// Translates one natural-language request in the context of `cwd`.
    pub async fn translate(&self, line: &str, cwd: &Path) -> TranslationResult {
        let prompt = self.build_prompt(line, cwd);

        let raw = match self.provider.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, kind = %e.kind, "translation request failed");
                return TranslationResult::Rejected(format!(
                    "{ERROR_PREFIX} Failed to translate command: {e}"
                ));
            }
        };

        let reply = sanitize_reply(&raw);
        if reply == VALID_SENTINEL {
            TranslationResult::Direct
        } else if reply.starts_with(ERROR_PREFIX) {
            TranslationResult::Rejected(reply)
        } else if reply.is_empty() {
            TranslationResult::Rejected(format!(
                "{ERROR_PREFIX} Unable to translate to a valid {} command.",
                self.dialect.shell_name()
            ))
        } else {
            TranslationResult::Command(reply)
        }
    }

    fn build_prompt(&self, line: &str, cwd: &Path) -> String {
        let shell = self.dialect.shell_name();
        format!(
            "You are an expert in translating natural language queries into {shell} commands.\n\
             \n\
             Current working directory: {cwd}\n\
             \n\
             User query: {line}\n\
             \n\
             Determine if this query is already a valid {shell} command. If it is, return \"{VALID_SENTINEL}\".\n\
             \n\
             If it's natural language, translate it into a valid {shell} command.\n\
             Provide ONLY the {shell} command without any explanations, prefixes, or comments.\n\
             Do not include ANY extra text, markdown formatting, or code blocks in your response.\n\
             Your response must contain exactly one line with just the {shell} command.\n\
             \n\
             Be lenient with natural language queries and try to find the most reasonable {shell} equivalent.\n\
             Only respond with \"{ERROR_PREFIX} Unable to translate to a valid {shell} command.\" if you're absolutely certain\n\
             there is no reasonable {shell} command that can satisfy the request.\n\
             \n\
             If the query is asking for something that could be harmful or destructive, respond with\n\
             \"{ERROR_PREFIX} This command could be potentially harmful.\"",
            cwd = cwd.display(),
        )
    }
}

/// Reduces a raw provider reply to a single command line.
///
/// Strips code-fence markers, drops blank and comment-only lines, and
/// keeps the first remaining line. Sentinel replies pass through as-is.
pub fn sanitize_reply(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with(ERROR_PREFIX) || trimmed == VALID_SENTINEL {
        return trimmed.to_string();
    }

    trimmed
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("```") && !line.starts_with('#'))
        .unwrap_or_default()
        .to_string()
}
