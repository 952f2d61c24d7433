use super::*;

#[test]
fn splits_snake_case() {
    assert_eq!(
        split_identifier_terms("calculate_user_score"),
        vec!["calculate", "user", "score"]
    );
}

#[test]
fn splits_camel_case() {
    assert_eq!(
        split_identifier_terms("getUserName"),
        vec!["get", "user", "name"]
    );
}

#[test]
fn splits_kebab_and_whitespace() {
    assert_eq!(
        split_identifier_terms("docker-build thing"),
        vec!["docker", "build", "thing"]
    );
}

#[test]
fn single_lowercase_word_is_one_term() {
    assert_eq!(split_identifier_terms("repomap"), vec!["repomap"]);
}

#[test]
fn well_named_requires_length_and_convention() {
    assert!(!is_well_named("get"));
    assert!(!is_well_named("abcdefgh"));
    assert!(is_well_named("calculate_score"));
    assert!(is_well_named("calculateScore"));
}

#[test]
fn common_terms_are_filtered() {
    assert!(is_common_term("get"));
    assert!(!is_common_term("score"));
}

#[test]
fn classifies_constant_by_all_upper_with_underscores() {
    use crate::types::IdentifierKind;
    assert_eq!(classify_identifier_kind("MAX_WORKERS"), IdentifierKind::Constant);
}

#[test]
fn classifies_class_by_initial_capital() {
    use crate::types::IdentifierKind;
    assert_eq!(classify_identifier_kind("DependencyGraph"), IdentifierKind::Class);
}

#[test]
fn classifies_function_by_underscore_or_call_suffix() {
    use crate::types::IdentifierKind;
    assert_eq!(classify_identifier_kind("build_edges"), IdentifierKind::Function);
    assert_eq!(classify_identifier_kind("build()"), IdentifierKind::Function);
}

#[test]
fn classifies_variable_by_all_lowercase() {
    use crate::types::IdentifierKind;
    assert_eq!(classify_identifier_kind("threshold"), IdentifierKind::Variable);
}
