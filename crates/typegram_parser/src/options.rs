//! Parser options.
//!
//! Mirrors the camelCase JSON shape used by configuration files, so an
//! options object can be read straight from a `--config` file.

use serde::{Deserialize, Serialize};

/// Options that control a single parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Start the file in ambient context, as for declaration files.
    pub ambient: bool,
    /// Collect comments onto the source file.
    pub collect_comments: bool,
    /// Accept `return` at the top level.
    pub allow_return_outside_function: bool,
    /// Nesting limit for types, expressions and statements.
    pub max_recursion_depth: u32,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            ambient: false,
            collect_comments: true,
            allow_return_outside_function: false,
            max_recursion_depth: 256,
        }
    }
}

impl ParserOptions {
    /// Defaults for a file name: `.d.ts` files start ambient.
    pub fn for_file(file_name: &str) -> Self {
        Self { ambient: file_name.ends_with(".d.ts"), ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParserOptions::default();
        assert!(!options.ambient);
        assert!(options.collect_comments);
        assert_eq!(options.max_recursion_depth, 256);
    }

    #[test]
    fn test_declaration_files_start_ambient() {
        assert!(ParserOptions::for_file("lib.d.ts").ambient);
        assert!(!ParserOptions::for_file("main.ts").ambient);
    }

    #[test]
    fn test_json_uses_camel_case_and_fills_defaults() {
        let options: ParserOptions =
            serde_json::from_str(r#"{ "ambient": true, "maxRecursionDepth": 64 }"#).unwrap();
        assert!(options.ambient);
        assert!(options.collect_comments);
        assert_eq!(options.max_recursion_depth, 64);

        let json = serde_json::to_string(&ParserOptions::default()).unwrap();
        assert!(json.contains("allowReturnOutsideFunction"));
    }
}
