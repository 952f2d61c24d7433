//! Shared identifier-term splitting (§4.5 supplemental).
//!
//! Backs both the semantic matcher's tokenizer, the fuzzy matcher's `word`
//! strategy, and the dependency graph's term-overlap edge boost: split on
//! `_`/`-`/whitespace and additionally on a lowercase-to-uppercase
//! (camelCase) transition, lowercasing every resulting token.

/// Splits an identifier into lowercase word terms on snake_case, kebab-case,
/// whitespace, and camelCase boundaries.
///
/// Examples: `"calculate_user_score"` -> `["calculate", "user", "score"]`,
/// `"getUserName"` -> `["get", "user", "name"]`.
pub fn split_identifier_terms(ident: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in ident.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                terms.push(std::mem::take(&mut current).to_lowercase());
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            terms.push(std::mem::take(&mut current).to_lowercase());
        }
        current.push(c);
        prev_lower = c.is_lowercase();
    }
    if !current.is_empty() {
        terms.push(current.to_lowercase());
    }
    terms
}

/// Common filler words dropped from graph term-overlap scoring (kept out of
/// the shared tokenizer itself since C5 callers want them for exact recall).
pub fn is_common_term(term: &str) -> bool {
    matches!(
        term,
        "get" | "set" | "new" | "the" | "and" | "for" | "with" | "from" | "into"
    )
}

/// Whether an identifier reads as intentionally named: snake_case or
/// camelCase, at least 8 characters (§4.7 supplemental "well-named" boost).
pub fn is_well_named(ident: &str) -> bool {
    if ident.len() < 8 {
        return false;
    }
    let has_underscore = ident
        .chars()
        .enumerate()
        .any(|(i, c)| c == '_' && i > 0 && i < ident.len() - 1);
    if has_underscore {
        return true;
    }
    let chars: Vec<char> = ident.chars().collect();
    chars
        .windows(2)
        .any(|w| w[0].is_lowercase() && w[1].is_uppercase())
}

/// Classifies a definition-kind identifier by naming convention alone,
/// backing both the facade's identifier-kind histogram (§4.10) and the
/// dependency graph's per-node function/class split (§3 DependencyNode).
///
/// - `ALL_UPPER_WITH_UNDERSCORES` -> constant
/// - `InitialCapital` -> class
/// - contains an underscore (other than all-upper) or reads like a call
///   site (`foo()`) -> function
/// - all lowercase -> variable
/// - anything else -> other
pub fn classify_identifier_kind(name: &str) -> crate::types::IdentifierKind {
    use crate::types::IdentifierKind;

    let trimmed = name.trim_end_matches("()");
    if trimmed.is_empty() {
        return IdentifierKind::Other;
    }

    let has_alpha = trimmed.chars().any(|c| c.is_alphabetic());
    if !has_alpha {
        return IdentifierKind::Other;
    }

    let is_all_upper = trimmed
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(|c| c.is_uppercase());
    if is_all_upper && trimmed.contains('_') {
        return IdentifierKind::Constant;
    }

    let starts_upper = trimmed.chars().next().is_some_and(|c| c.is_uppercase());
    if starts_upper {
        return IdentifierKind::Class;
    }

    let is_all_lower = trimmed.chars().all(|c| !c.is_alphabetic() || c.is_lowercase());
    if name.ends_with("()") || (trimmed.contains('_') && !is_all_upper) {
        return IdentifierKind::Function;
    }
    if is_all_lower {
        return IdentifierKind::Variable;
    }
    IdentifierKind::Other
}

#[cfg(test)]
#[path = "terms.test.rs"]
mod tests;
