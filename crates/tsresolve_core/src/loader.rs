use log::{debug, trace, warn};
use std::{collections::HashMap, fs, path::Path, sync::Arc};

use crate::{
    config::RawTsConfig,
    error::ConfigError,
    path_util::{dirname, normalize},
    resolver::ExtendsResolver,
    types::TsConfig,
};

#[derive(Debug, Clone)]
enum CacheEntry {
    /// The file is being resolved further up the call stack.
    Loading,
    Loaded(Arc<TsConfig>),
}

/// Memoizes resolved configs by workspace-relative file path.
///
/// One cache belongs to one resolution tree: every file is parsed at most
/// once per cache, and a file that is still being resolved when it is
/// reached again through `extends` ends the chain instead of recursing. The
/// cache is not meant to be shared by concurrent resolutions; allocate one
/// per tree.
#[derive(Debug, Default)]
pub struct TsConfigCache {
    entries: HashMap<String, CacheEntry>,
}

impl TsConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fully resolved configs.
    pub fn len(&self) -> usize {
        self.entries.values().filter(|e| matches!(e, CacheEntry::Loaded(_))).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A previously resolved config.
    pub fn get(&self, config_path: &str) -> Option<Arc<TsConfig>> {
        match self.entries.get(&normalize(config_path)) {
            Some(CacheEntry::Loaded(config)) => Some(Arc::clone(config)),
            _ => None,
        }
    }

    /// Reads and resolves the tsconfig at `config_path`, relative to the
    /// workspace `root`, following its `extends` chain.
    ///
    /// Only failures of this file itself are returned; a base that cannot be
    /// found or parsed is skipped with a warning.
    pub fn load(
        &mut self,
        resolver: &dyn ExtendsResolver,
        root: &Path,
        config_path: &str,
    ) -> Result<Arc<TsConfig>, ConfigError> {
        let key = normalize(config_path);
        if let Some(config) = self.get(&key) {
            trace!("Cache hit for tsconfig: {}", key);
            return Ok(config);
        }

        let file = root.join(&key);
        trace!("Reading tsconfig: {}", file.display());
        let bytes = fs::read(&file).map_err(|source| ConfigError::ReadFailure { path: file, source })?;

        self.parse(resolver, root, &key, &bytes)
    }

    /// Resolves tsconfig content that is already in memory, as if it had been
    /// read from `config_path`.
    pub fn parse(
        &mut self,
        resolver: &dyn ExtendsResolver,
        root: &Path,
        config_path: &str,
        bytes: &[u8],
    ) -> Result<Arc<TsConfig>, ConfigError> {
        let key = normalize(config_path);
        let raw = RawTsConfig::from_slice(bytes)
            .map_err(|source| ConfigError::MalformedConfig { path: root.join(&key), source })?;

        self.entries.insert(key.clone(), CacheEntry::Loading);

        let extends = raw.extends().to_string();
        let base = if extends.is_empty() {
            None
        } else {
            self.resolve_base(resolver, root, &key, &extends)
        };

        let config = Arc::new(TsConfig::from_raw(&key, raw, base.as_deref()));
        debug!(
            "Resolved tsconfig {} (extends: {:?}, base: {:?})",
            key,
            config.extends,
            base.as_ref().map(|b| b.config_path())
        );
        self.entries.insert(key, CacheEntry::Loaded(Arc::clone(&config)));
        Ok(config)
    }

    /// First candidate of `extends` that loads, if any.
    fn resolve_base(
        &mut self,
        resolver: &dyn ExtendsResolver,
        root: &Path,
        key: &str,
        extends: &str,
    ) -> Option<Arc<TsConfig>> {
        for candidate in resolver.resolve(&dirname(key), extends) {
            let candidate = normalize(&candidate);
            match self.entries.get(&candidate) {
                Some(CacheEntry::Loaded(config)) => return Some(Arc::clone(config)),
                Some(CacheEntry::Loading) => {
                    debug!("Cyclic extends in {}: '{}' is still being resolved", key, candidate);
                    return None;
                }
                None => {}
            }

            match self.load(resolver, root, &candidate) {
                Ok(config) => return Some(config),
                Err(e) => trace!("Skipping extends candidate {}: {}", candidate, e),
            }
        }

        warn!("Could not resolve extends '{}' of {}, continuing without a base", extends, key);
        None
    }
}
