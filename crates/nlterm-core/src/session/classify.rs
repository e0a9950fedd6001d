//! Input classification.
//!
//! Decides whether a submitted line is a direct shell command or a
//! natural-language request to translate. Pure heuristic over the line
//! text; the per-dialect constant tables live in [`Dialect`].

use crate::dialect::Dialect;

/// Classification of a submitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Run the line against the host shell as-is.
    Direct,
    /// Send the line to the completion provider for translation.
    NaturalLanguage,
}

/// Words that tip an ambiguous line toward natural language.
const NATURAL_INDICATORS: &[&str] = &[
    "show", "list", "display", "find", "get", "what", "how", "create", "make", "write", "search",
    "tell", "give", "count", "calculate", "please", "help", "can", "could", "would", "do", "does",
];

/// Classifies a line as a direct command or a natural-language request.
///
/// First matching rule wins:
/// 1. leads with a known command name (or cmdlet verb prefix)
/// 2. contains a shell metacharacter
/// 3. contains an option flag token
/// 4. contains a path separator, home marker, or matched quote pair
/// 5. is a whole-line shorthand token
/// 6. has multiple words or a natural-language indicator word
/// 7. fallback: a lone unknown token is assumed to be a command name
///
/// Blank lines are never passed here; the pipeline controller treats them
/// as a no-op before classification.
pub fn classify(line: &str, dialect: Dialect) -> InputKind {
    let line = line.trim();
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if leads_with_known_command(&tokens, dialect) {
        return InputKind::Direct;
    }

    if line.contains(dialect.metacharacters()) {
        return InputKind::Direct;
    }

    if has_flag_token(&tokens, dialect) {
        return InputKind::Direct;
    }

    if line.contains(dialect.path_separators())
        || line.contains('~')
        || has_quote_pair(line, '"')
        || has_quote_pair(line, '\'')
    {
        return InputKind::Direct;
    }

    if dialect.shorthand_tokens().contains(&line) {
        return InputKind::Direct;
    }

    let has_indicator = tokens
        .iter()
        .any(|t| NATURAL_INDICATORS.contains(&t.to_lowercase().as_str()));
    if tokens.len() > 1 || has_indicator {
        return InputKind::NaturalLanguage;
    }

    InputKind::Direct
}

fn leads_with_known_command(tokens: &[&str], dialect: Dialect) -> bool {
    let Some(first) = tokens.first() else {
        return false;
    };
    dialect.known_commands().contains(first)
        || dialect
            .command_prefixes()
            .iter()
            .any(|prefix| first.starts_with(prefix))
}

/// A flag token starts with a dialect flag marker and carries at least one
/// more character (a bare `-` is not a flag).
fn has_flag_token(tokens: &[&str], dialect: Dialect) -> bool {
    tokens.iter().skip(1).any(|token| {
        dialect
            .flag_markers()
            .iter()
            .any(|marker| token.starts_with(marker) && token.len() > marker.len())
    })
}

fn has_quote_pair(line: &str, quote: char) -> bool {
    line.matches(quote).count() >= 2
}
