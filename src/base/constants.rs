//! Domain constants shared by the compiler and the loader.

/// Name of the bundled grammar directory, looked up next to the executable
/// and under the crate manifest directory.
pub const BUILTIN_GRAMMAR_DIR: &str = "grammar";

/// Environment variable holding extra colon-separated grammar directories.
pub const GRAMMAR_PATH_ENV: &str = "GRAMMAR";

/// Separator used by [`GRAMMAR_PATH_ENV`].
pub const SEARCH_PATH_SEPARATOR: char = ':';

/// Tokens that introduce a rule body. Text containing one of them (past the
/// first character) is treated as inline grammar source rather than a path.
pub const RULE_SEPARATORS: &[&str] = &["=", "<-"];

/// Semantic-action functions whose first argument still takes part in
/// recognition. Any other function name contributes no matching of its own.
pub const TRANSPARENT_FUNCTIONS: &[&str] = &[
    "lazy", "scope", "symbol", "def", "match", "equals", "contains", "cat",
];

/// Check whether `name` is one of the [`TRANSPARENT_FUNCTIONS`].
pub fn is_transparent_function(name: &str) -> bool {
    TRANSPARENT_FUNCTIONS.contains(&name)
}
