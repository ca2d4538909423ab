use indexmap::IndexMap;
use log::warn;

use crate::path_util::{join, normalize};

/// The `paths` alias table of a tsconfig together with the directory its
/// templates resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsConfigPaths {
    /// Directory, relative to the owning config's directory, that templates
    /// are resolved against (the `baseUrl`, or `.` without one).
    pub rel: String,
    /// Alias patterns in declaration order, each with its templates in
    /// declaration order.
    pub map: IndexMap<String, Vec<String>>,
}

impl TsConfigPaths {
    pub fn new(rel: &str) -> Self {
        Self { rel: normalize(rel), map: IndexMap::new() }
    }

    /// Appends an alias, replacing the templates of an existing pattern in place.
    pub fn with_alias<S: Into<String>>(mut self, pattern: &str, templates: Vec<S>) -> Self {
        self.map.insert(pattern.to_string(), templates.into_iter().map(Into::into).collect());
        self
    }

    pub fn get(&self, pattern: &str) -> Option<&[String]> {
        self.map.get(pattern).map(Vec::as_slice)
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.map.contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Copy of this table for a config living in `to_dir`, inherited from a
    /// config living in `from_dir`. Only `rel` changes; templates stay as
    /// written.
    pub(crate) fn rebased(&self, from_dir: &str, to_dir: &str) -> Self {
        Self { rel: rebase_dir(&self.rel, from_dir, to_dir), map: self.map.clone() }
    }
}

/// Re-expresses `rel`, written relative to `from_dir`, relative to `to_dir`.
///
/// When `to_dir` climbs out of the workspace through `..` no relative path
/// can be computed; `rel` is then kept as written.
pub(crate) fn rebase_dir(rel: &str, from_dir: &str, to_dir: &str) -> String {
    let (from_dir, to_dir) = (normalize(from_dir), normalize(to_dir));
    if from_dir == to_dir {
        return normalize(rel);
    }
    let target = join(&from_dir, rel);
    match pathdiff::diff_paths(&target, &to_dir) {
        Some(diff) => normalize(&diff.to_string_lossy().replace('\\', "/")),
        None => {
            warn!("Cannot express '{}' relative to '{}', keeping '{}' unrebased", target, to_dir, rel);
            normalize(rel)
        }
    }
}

/// The effective configuration of one tsconfig file, with its `extends`
/// chain already merged in.
///
/// All directory values are normalized (see [`crate::path_util::normalize`]).
/// `config_dir` is relative to the workspace root, every other directory is
/// relative to `config_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsConfig {
    pub config_dir: String,
    pub config_name: String,

    pub root_dir: String,
    pub out_dir: String,
    /// `None` when no config in the chain sets `declarationDir`, in which
    /// case declarations follow `out_dir`.
    pub declaration_dir: Option<String>,

    pub import_helpers: bool,
    pub allow_js: bool,
    pub resolve_json_module: bool,
    pub declaration: bool,

    /// The `extends` value exactly as written, even when it did not resolve.
    pub extends: String,

    /// Directory the unaliased fallback of an expansion resolves against.
    pub base_url: Option<String>,
    pub paths: Option<TsConfigPaths>,
}

impl Default for TsConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl TsConfig {
    /// An empty in-memory config located in `config_dir`.
    pub fn new(config_dir: &str) -> Self {
        Self {
            config_dir: normalize(config_dir),
            config_name: String::new(),
            root_dir: ".".to_string(),
            out_dir: ".".to_string(),
            declaration_dir: None,
            import_helpers: false,
            allow_js: false,
            resolve_json_module: false,
            declaration: false,
            extends: String::new(),
            base_url: None,
            paths: None,
        }
    }

    pub fn with_paths(mut self, paths: TsConfigPaths) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(normalize(base_url));
        self
    }

    /// Workspace-relative path of the file this config was read from.
    pub fn config_path(&self) -> String {
        join(&self.config_dir, &self.config_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_table_keeps_declaration_order() {
        let paths = TsConfigPaths::new(".")
            .with_alias("z/*", vec!["z/*"])
            .with_alias("a/*", vec!["a1/*", "a2/*"])
            .with_alias("m", vec!["m"]);

        let patterns: Vec<&str> = paths.map.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(patterns, vec!["z/*", "a/*", "m"]);
        assert_eq!(paths.get("a/*").unwrap(), &["a1/*".to_string(), "a2/*".to_string()]);
    }

    #[test]
    fn test_duplicate_alias_replaces_in_place() {
        let paths = TsConfigPaths::new(".")
            .with_alias("a", vec!["first"])
            .with_alias("b", vec!["b"])
            .with_alias("a", vec!["second"]);

        assert_eq!(paths.len(), 2);
        assert_eq!(paths.map.get_index(0), Some((&"a".to_string(), &vec!["second".to_string()])));
    }

    #[test]
    fn test_rebase_dir() {
        assert_eq!(rebase_dir("src", "tests", "tests"), "src");
        assert_eq!(rebase_dir("./src/", "tests", "tests"), "src");
        assert_eq!(rebase_dir("src", "tests", "tests/subdir"), "../src");
        assert_eq!(rebase_dir(".", ".", "sub/dir"), "../..");
        assert_eq!(rebase_dir("lib", "base", "app"), "../base/lib");
        assert_eq!(rebase_dir("../shared", "apps/web", "apps/api"), "../shared");
        assert_eq!(rebase_dir("src", "..", "../other"), "../src");
    }

    #[test]
    fn test_rebase_dir_out_of_workspace_keeps_rel() {
        assert_eq!(rebase_dir("src", "b", "../a"), "src");
        assert_eq!(rebase_dir("./src/", ".", "../outside"), "src");
    }

    #[test]
    fn test_rebased_keeps_templates() {
        let paths = TsConfigPaths::new("src").with_alias("alias-a", vec!["src/lib/a"]);
        let rebased = paths.rebased("tests", "tests/subdir");
        assert_eq!(rebased.rel, "../src");
        assert_eq!(rebased.map, paths.map);
    }

    #[test]
    fn test_new_config_defaults() {
        let config = TsConfig::new("./sub/dir/");
        assert_eq!(config.config_dir, "sub/dir");
        assert_eq!(config.root_dir, ".");
        assert_eq!(config.out_dir, ".");
        assert!(config.declaration_dir.is_none());
        assert!(config.paths.is_none());
        assert!(!config.import_helpers);
    }
}
