use anyhow::{Result, anyhow};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::{sync::Arc, thread};

use tsresolve_core::{ConfigError, TsConfig, TsConfigCache, collect_tsconfigs};

use crate::config::Config;

#[derive(Debug)]
pub struct ScanResult {
    pub resolved: Vec<Arc<TsConfig>>,
    pub failures: Vec<(String, ConfigError)>,
}

/// Resolves every tsconfig file of the workspace.
///
/// Files are resolved in parallel, each with its own cache, so no cache is
/// ever shared between threads.
pub fn run_scan(cfg: &Config) -> Result<ScanResult> {
    info!("Starting tsconfig scan");
    let root = cfg.root()?;

    let configs = collect_tsconfigs(root)?;
    if configs.is_empty() {
        warn!("No tsconfig files found under {}", root.display());
        return Err(anyhow!("No tsconfig files found under {}", root.display()));
    }
    info!("Resolving {} tsconfig files in parallel", configs.len());

    let outcomes: Vec<(String, Result<Arc<TsConfig>, ConfigError>)> = configs
        .par_iter()
        .map(|config_path| {
            debug!("Thread {:?} resolving: {}", thread::current().id(), config_path);
            let resolver = cfg.resolver.build(root);
            let mut cache = TsConfigCache::new();
            let loaded = cache.load(resolver.as_ref(), root, config_path);
            trace!("Cache for {} held {} configs", config_path, cache.len());
            (config_path.clone(), loaded)
        })
        .collect();

    let mut resolved = Vec::new();
    let mut failures = Vec::new();
    for (config_path, outcome) in outcomes {
        match outcome {
            Ok(config) => resolved.push(config),
            Err(e) => {
                warn!("Failed to resolve {}: {}", config_path, e);
                failures.push((config_path, e));
            }
        }
    }

    info!("Scan complete: {} resolved, {} failed", resolved.len(), failures.len());
    Ok(ScanResult { resolved, failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverKind;
    use std::{
        fs,
        path::{Path, PathBuf},
    };
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn initialized(root: &Path) -> Config {
        let mut cfg = Config { root: Some(root.to_path_buf()), resolver: ResolverKind::Package };
        cfg.initialize().unwrap();
        cfg
    }

    #[test]
    fn test_scan_resolves_each_tsconfig() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "tsconfig.base.json",
            r#"{"compilerOptions": {"baseUrl": ".", "paths": {"@lib/*": ["libs/*"]}}}"#,
        );
        create_test_file(root, "apps/web/tsconfig.json", r#"{"extends": "../../tsconfig.base.json"}"#);
        create_test_file(root, "apps/api/tsconfig.json", r#"{"extends": "../../tsconfig.base.json", "compilerOptions": {"outDir": "dist"}}"#);

        let result = run_scan(&initialized(root)).unwrap();
        assert!(result.failures.is_empty());
        assert_eq!(result.resolved.len(), 3);

        let web = result.resolved.iter().find(|c| c.config_dir == "apps/web").unwrap();
        assert_eq!(web.paths.as_ref().unwrap().rel, "../..");
        assert_eq!(web.expand_paths(".", "@lib/x"), vec!["libs/x", "@lib/x"]);

        let api = result.resolved.iter().find(|c| c.config_dir == "apps/api").unwrap();
        assert_eq!(api.to_out_dir("src/main.ts"), "dist/src/main.ts");
    }

    #[test]
    fn test_scan_reports_failures() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "tsconfig.json", "{}");
        create_test_file(root, "broken/tsconfig.json", r#"{"compilerOptions": "#);

        let result = run_scan(&initialized(root)).unwrap();
        assert_eq!(result.resolved.len(), 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].0, "broken/tsconfig.json");
        assert!(matches!(result.failures[0].1, ConfigError::MalformedConfig { .. }));
    }

    #[test]
    fn test_scan_without_tsconfigs_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(run_scan(&initialized(temp_dir.path())).is_err());
    }
}
