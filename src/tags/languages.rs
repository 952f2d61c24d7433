//! Per-language tag query configuration for the tree-sitter-tags extractor.
//!
//! Each [`crate::types::Language`] maps to a grammar and a tags query that
//! captures definitions and references using the conventional
//! `@definition.*` / `@reference.*` / `@name` capture names tree-sitter-tags
//! expects.

use tree_sitter_tags::TagsConfiguration;

use crate::error::RepoMapError;
use crate::error::Result;
use crate::types::Language;

const EMPTY_LOCALS: &str = "";

fn build(language: tree_sitter::Language, query: &str) -> Result<TagsConfiguration> {
    TagsConfiguration::new(language, query, EMPTY_LOCALS).map_err(|e| RepoMapError::ParseError {
        path: std::path::PathBuf::new(),
        cause: format!("invalid tags query: {e}"),
    })
}

/// Builds the [`TagsConfiguration`] used to extract tags for `language`.
pub fn tags_configuration(language: Language) -> Result<TagsConfiguration> {
    match language {
        Language::Python => build(tree_sitter_python::LANGUAGE.into(), PYTHON_TAGS),
        Language::JavaScript => build(tree_sitter_javascript::LANGUAGE.into(), JAVASCRIPT_TAGS),
        Language::TypeScript => {
            build(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(), TYPESCRIPT_TAGS)
        }
        Language::Java => build(tree_sitter_java::LANGUAGE.into(), JAVA_TAGS),
        Language::Go => build(tree_sitter_go::LANGUAGE.into(), GO_TAGS),
        Language::C => build(tree_sitter_c::LANGUAGE.into(), C_TAGS),
        Language::Cpp => build(tree_sitter_cpp::LANGUAGE.into(), CPP_TAGS),
        Language::CSharp => build(tree_sitter_c_sharp::LANGUAGE.into(), C_SHARP_TAGS),
    }
}

const PYTHON_TAGS: &str = r#"
(function_definition
  name: (identifier) @name) @definition.function

(class_definition
  name: (identifier) @name) @definition.class

(call
  function: (identifier) @name) @reference.call

(call
  function: (attribute
    attribute: (identifier) @name)) @reference.call

(import_statement
  name: (dotted_name) @name) @reference.import

(import_from_statement
  module_name: (dotted_name) @name) @reference.import

(import_from_statement
  module_name: (relative_import
    (dotted_name) @name)) @reference.import
"#;

const JAVASCRIPT_TAGS: &str = r#"
(function_declaration
  name: (identifier) @name) @definition.function

(method_definition
  name: (property_identifier) @name) @definition.method

(class_declaration
  name: (identifier) @name) @definition.class

(variable_declarator
  name: (identifier) @name
  value: [(arrow_function) (function_expression)]) @definition.function

(call_expression
  function: (identifier) @name) @reference.call

(call_expression
  function: (member_expression
    property: (property_identifier) @name)) @reference.call

(import_statement
  source: (string (string_fragment) @name)) @reference.import
"#;

const TYPESCRIPT_TAGS: &str = r#"
(function_declaration
  name: (identifier) @name) @definition.function

(method_definition
  name: (property_identifier) @name) @definition.method

(class_declaration
  name: (type_identifier) @name) @definition.class

(interface_declaration
  name: (type_identifier) @name) @definition.interface

(variable_declarator
  name: (identifier) @name
  value: [(arrow_function) (function_expression)]) @definition.function

(call_expression
  function: (identifier) @name) @reference.call

(call_expression
  function: (member_expression
    property: (property_identifier) @name)) @reference.call

(import_statement
  source: (string (string_fragment) @name)) @reference.import
"#;

const JAVA_TAGS: &str = r#"
(method_declaration
  name: (identifier) @name) @definition.method

(class_declaration
  name: (identifier) @name) @definition.class

(interface_declaration
  name: (identifier) @name) @definition.interface

(method_invocation
  name: (identifier) @name) @reference.call

(object_creation_expression
  type: (type_identifier) @name) @reference.class

(import_declaration
  (scoped_identifier) @name) @reference.import

(import_declaration
  (identifier) @name) @reference.import
"#;

const GO_TAGS: &str = r#"
(function_declaration
  name: (identifier) @name) @definition.function

(method_declaration
  name: (field_identifier) @name) @definition.method

(type_spec
  name: (type_identifier) @name
  type: (struct_type)) @definition.class

(type_spec
  name: (type_identifier) @name
  type: (interface_type)) @definition.interface

(call_expression
  function: (identifier) @name) @reference.call

(call_expression
  function: (selector_expression
    field: (field_identifier) @name)) @reference.call

(import_spec
  path: (interpreted_string_literal) @name) @reference.import
"#;

const C_TAGS: &str = r#"
(function_definition
  declarator: (function_declarator
    declarator: (identifier) @name)) @definition.function

(struct_specifier
  name: (type_identifier) @name) @definition.class

(call_expression
  function: (identifier) @name) @reference.call

(preproc_include
  path: (string_literal) @name) @reference.import

(preproc_include
  path: (system_lib_string) @name) @reference.import
"#;

const CPP_TAGS: &str = r#"
(function_definition
  declarator: (function_declarator
    declarator: (identifier) @name)) @definition.function

(function_definition
  declarator: (function_declarator
    declarator: (field_identifier) @name)) @definition.method

(class_specifier
  name: (type_identifier) @name) @definition.class

(struct_specifier
  name: (type_identifier) @name) @definition.class

(call_expression
  function: (identifier) @name) @reference.call

(preproc_include
  path: (string_literal) @name) @reference.import

(preproc_include
  path: (system_lib_string) @name) @reference.import
"#;

const C_SHARP_TAGS: &str = r#"
(method_declaration
  name: (identifier) @name) @definition.method

(class_declaration
  name: (identifier) @name) @definition.class

(interface_declaration
  name: (identifier) @name) @definition.interface

(invocation_expression
  function: (identifier) @name) @reference.call

(object_creation_expression
  type: (identifier) @name) @reference.class

(using_directive
  (qualified_name) @name) @reference.import

(using_directive
  (identifier) @name) @reference.import
"#;

#[cfg(test)]
#[path = "languages.test.rs"]
mod tests;
