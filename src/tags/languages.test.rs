use super::*;

#[test]
fn tags_configuration_builds_for_every_language() {
    for language in [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::Go,
        Language::C,
        Language::Cpp,
        Language::CSharp,
    ] {
        let result = tags_configuration(language);
        assert!(result.is_ok(), "{language:?} tags query failed");
    }
}
