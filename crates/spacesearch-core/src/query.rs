//! Match expression construction for the FTS5 strategy.
//!
//! Terms are offered to the engine as three graduated candidates, tightest
//! first, so native phrase ranking puts whole-phrase hits ahead of scattered
//! prefix hits:
//!
//! 1. every term quoted, space-joined
//! 2. the same phrase with a trailing prefix marker
//! 3. every term prefix-marked on its own (multi-term input only)
//!
//! The candidates are OR-ed and scoped to the `content` and
//! `exactMatchContent` columns.

/// Returned by [`build_match_expression`] when there is nothing to match.
pub const NO_TERMS: &str = "";

const MATCH_COLUMNS: &str = "{content exactMatchContent}";

/// Splits raw arguments into lowercase terms, collapsing whitespace runs.
pub fn normalize_terms<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split_whitespace())
        .map(str::to_lowercase)
        .collect()
}

pub fn build_match_expression<S: AsRef<str>>(terms: &[S]) -> String {
    let quoted = terms
        .iter()
        .map(AsRef::as_ref)
        .filter(|term| !term.is_empty())
        .map(quote_term)
        .collect::<Vec<_>>();
    if quoted.is_empty() {
        return NO_TERMS.to_string();
    }

    let phrase = quoted.join(" ");
    let mut candidates = vec![format!("({phrase})"), format!("({phrase}*)")];
    if quoted.len() > 1 {
        let each_prefixed = quoted
            .iter()
            .map(|term| format!("{term}*"))
            .collect::<Vec<_>>()
            .join(" ");
        candidates.push(format!("({each_prefixed})"));
    }

    format!("{MATCH_COLUMNS} : ({})", candidates.join(" OR "))
}

fn quote_term(term: &str) -> String {
    format!("\"{}\"", term.replace('"', " "))
}

/// Terms plus the expression built from them, computed once per request and
/// shared by every space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
    match_expression: String,
}

impl SearchQuery {
    pub fn new<S: AsRef<str>>(args: &[S]) -> Self {
        let terms = normalize_terms(args);
        let match_expression = build_match_expression(&terms);
        Self {
            terms,
            match_expression,
        }
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn match_expression(&self) -> &str {
        &self.match_expression
    }

    /// No terms: spaces fall back to their unfiltered browse query.
    #[must_use]
    pub fn is_browse(&self) -> bool {
        self.match_expression == NO_TERMS
    }
}
