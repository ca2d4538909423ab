use indexmap::IndexMap;
use log::trace;
use serde::Deserialize;

use crate::{
    jsonc,
    path_util::{basename, dirname, normalize},
    types::{TsConfig, TsConfigPaths, rebase_dir},
};

/// The options of a single tsconfig file, as declared in that file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTsConfig {
    pub(crate) extends: Option<String>,
    pub(crate) compiler_options: Option<RawCompilerOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCompilerOptions {
    root_dir: Option<String>,
    out_dir: Option<String>,
    declaration_dir: Option<String>,
    base_url: Option<String>,
    /// Declaration order kept; a repeated pattern keeps its first position
    /// and its last templates.
    paths: Option<IndexMap<String, Vec<String>>>,
    import_helpers: Option<bool>,
    allow_js: Option<bool>,
    resolve_json_module: Option<bool>,
    declaration: Option<bool>,
}

impl RawTsConfig {
    pub(crate) fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        jsonc::from_slice(bytes)
    }

    /// The `extends` value, empty when absent.
    pub(crate) fn extends(&self) -> &str {
        self.extends.as_deref().unwrap_or("")
    }
}

impl TsConfig {
    /// Builds the effective config for the file at `config_path` (workspace
    /// relative) from its own declarations and its already resolved base.
    pub(crate) fn from_raw(config_path: &str, raw: RawTsConfig, base: Option<&TsConfig>) -> Self {
        let config_dir = dirname(config_path);
        let extends = raw.extends.clone().unwrap_or_default();
        let opts = raw.compiler_options.unwrap_or_default();

        // `paths` and `baseUrl` travel as one unit.
        let declares_paths = opts.base_url.is_some() || opts.paths.is_some();
        let (paths, base_url) = if declares_paths {
            let table = TsConfigPaths {
                map: opts.paths.unwrap_or_default(),
                ..TsConfigPaths::new(opts.base_url.as_deref().unwrap_or("."))
            };
            trace!("{} declares {} path aliases relative to '{}'", config_path, table.len(), table.rel);
            (Some(table), opts.base_url.as_deref().map(normalize))
        } else {
            match base {
                Some(b) => (
                    b.paths.as_ref().map(|p| p.rebased(&b.config_dir, &config_dir)),
                    b.base_url.as_deref().map(|u| rebase_dir(u, &b.config_dir, &config_dir)),
                ),
                None => (None, None),
            }
        };

        Self {
            config_name: basename(config_path),
            root_dir: opts
                .root_dir
                .as_deref()
                .map(normalize)
                .or_else(|| base.map(|b| b.root_dir.clone()))
                .unwrap_or_else(|| ".".to_string()),
            out_dir: opts
                .out_dir
                .as_deref()
                .map(normalize)
                .or_else(|| base.map(|b| b.out_dir.clone()))
                .unwrap_or_else(|| ".".to_string()),
            declaration_dir: opts
                .declaration_dir
                .as_deref()
                .map(normalize)
                .or_else(|| base.and_then(|b| b.declaration_dir.clone())),
            import_helpers: opts.import_helpers.or(base.map(|b| b.import_helpers)).unwrap_or(false),
            allow_js: opts.allow_js.or(base.map(|b| b.allow_js)).unwrap_or(false),
            resolve_json_module: opts
                .resolve_json_module
                .or(base.map(|b| b.resolve_json_module))
                .unwrap_or(false),
            declaration: opts.declaration.or(base.map(|b| b.declaration)).unwrap_or(false),
            extends,
            base_url,
            paths,
            config_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(config_path: &str, json: &str, base: Option<&TsConfig>) -> TsConfig {
        let raw = RawTsConfig::from_slice(json.as_bytes()).unwrap();
        TsConfig::from_raw(config_path, raw, base)
    }

    #[test]
    fn test_config_metadata() {
        let config = build("sub/dir/tsconfig.json", "{}", None);
        assert_eq!(config.config_dir, "sub/dir");
        assert_eq!(config.config_name, "tsconfig.json");

        let root = build("tsconfig.json", "{}", None);
        assert_eq!(root.config_dir, ".");
    }

    #[test]
    fn test_empty_config_defaults() {
        for json in ["{}", r#"{"compilerOptions": {}}"#, r#"{"compilerOptions": null}"#] {
            let config = build("tsconfig.json", json, None);
            assert_eq!(config.root_dir, ".");
            assert_eq!(config.out_dir, ".");
            assert_eq!(config.declaration_dir, None);
            assert!(!config.import_helpers);
            assert!(config.paths.is_none());
            assert!(config.base_url.is_none());
            assert_eq!(config.extends, "");
        }
    }

    #[test]
    fn test_root_dir_normalization() {
        let cases = [
            ("", "."),
            (".", "."),
            ("./", "."),
            ("src", "src"),
            ("src/", "src"),
            ("./src", "src"),
            ("./src/", "src"),
            ("./src/./foo/../", "src"),
        ];
        for (input, expected) in cases {
            let json = format!(r#"{{"compilerOptions": {{"rootDir": "{input}"}}}}"#);
            assert_eq!(build("tsconfig.json", &json, None).root_dir, expected, "rootDir {input:?}");
        }
    }

    #[test]
    fn test_boolean_options() {
        let config = build(
            "tsconfig.json",
            r#"{"compilerOptions": {"importHelpers": true, "allowJs": true, "declaration": true}}"#,
            None,
        );
        assert!(config.import_helpers);
        assert!(config.allow_js);
        assert!(config.declaration);
        assert!(!config.resolve_json_module);
    }

    #[test]
    fn test_paths_keep_declaration_order() {
        let config = build(
            "tsconfig.json",
            r#"{"compilerOptions": {"paths": {"z/*": ["z1/*", "z2/*"], "a": ["a"], "m*": ["m/*"]}}}"#,
            None,
        );
        let paths = config.paths.unwrap();
        assert_eq!(paths.rel, ".");
        let patterns: Vec<&str> = paths.map.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(patterns, vec!["z/*", "a", "m*"]);
        assert_eq!(paths.get("z/*").unwrap(), &["z1/*".to_string(), "z2/*".to_string()]);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_repeated_pattern_keeps_first_position_and_last_templates() {
        let config = build(
            "tsconfig.json",
            r#"{"compilerOptions": {"paths": {"a": ["first"], "b": ["b"], "a": ["second"]}}}"#,
            None,
        );
        let paths = config.paths.unwrap();
        let patterns: Vec<&str> = paths.map.keys().map(String::as_str).collect();
        assert_eq!(patterns, vec!["a", "b"]);
        assert_eq!(paths.get("a").unwrap(), &["second".to_string()]);
    }

    #[test]
    fn test_base_url_without_paths_creates_empty_table() {
        let config = build("tsconfig.json", r#"{"compilerOptions": {"baseUrl": "./src/"}}"#, None);
        let paths = config.paths.unwrap();
        assert_eq!(paths.rel, "src");
        assert!(paths.is_empty());
        assert_eq!(config.base_url.as_deref(), Some("src"));
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        assert!(RawTsConfig::from_slice(br#"{"compilerOptions": {"rootDir": 5}}"#).is_err());
        assert!(RawTsConfig::from_slice(br#"{"compilerOptions": {"paths": {"a": "b"}}}"#).is_err());
        assert!(RawTsConfig::from_slice(br#"{"extends": true}"#).is_err());
        assert!(RawTsConfig::from_slice(br#""just a string""#).is_err());
        assert!(RawTsConfig::from_slice(b"null").is_err());
    }

    #[test]
    fn test_unknown_options_are_ignored() {
        let config = build(
            "tsconfig.json",
            r#"{"compilerOptions": {"strict": true, "target": "ES2020"}, "include": ["src"]}"#,
            None,
        );
        assert_eq!(config.root_dir, ".");
    }

    #[test]
    fn test_scalars_inherit_unless_overridden() {
        let base = build(
            "tsconfig.json",
            r#"{"compilerOptions": {"rootDir": "src", "outDir": "dist", "declarationDir": "types", "importHelpers": true}}"#,
            None,
        );
        let child = build(
            "tsconfig.app.json",
            r#"{"extends": "./tsconfig.json", "compilerOptions": {"outDir": "out", "importHelpers": false}}"#,
            Some(&base),
        );

        assert_eq!(child.root_dir, "src");
        assert_eq!(child.out_dir, "out");
        assert_eq!(child.declaration_dir.as_deref(), Some("types"));
        assert!(!child.import_helpers);
        assert_eq!(child.extends, "./tsconfig.json");
    }

    #[test]
    fn test_child_paths_replace_base_paths_entirely() {
        let base = build(
            "tsconfig.json",
            r#"{"compilerOptions": {"baseUrl": "src", "paths": {"alias-a": ["src/lib/a"]}}}"#,
            None,
        );
        let child = build(
            "sub/tsconfig.json",
            r#"{"compilerOptions": {"paths": {"alias-b": ["src/lib/b"]}}}"#,
            Some(&base),
        );

        let paths = child.paths.unwrap();
        assert_eq!(paths.rel, ".");
        assert!(!paths.contains("alias-a"));
        assert_eq!(paths.get("alias-b").unwrap(), &["src/lib/b".to_string()]);
        assert!(child.base_url.is_none());
    }

    #[test]
    fn test_inherited_paths_are_rebased() {
        let base = build(
            "tsconfig.json",
            r#"{"compilerOptions": {"baseUrl": ".", "paths": {"@app/*": ["app/*"]}}}"#,
            None,
        );
        let child = build("sub/dir/tsconfig.json", r#"{"compilerOptions": {"importHelpers": true}}"#, Some(&base));

        let paths = child.paths.as_ref().unwrap();
        assert_eq!(paths.rel, "../..");
        assert_eq!(paths.get("@app/*").unwrap(), &["app/*".to_string()]);
        assert_eq!(child.base_url.as_deref(), Some("../.."));

        // The base itself is untouched.
        assert_eq!(base.paths.as_ref().unwrap().rel, ".");
    }
}
