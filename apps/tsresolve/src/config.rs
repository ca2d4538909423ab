use anyhow::{Result, anyhow};
use clap::{Args, ValueEnum};
use log::{debug, info};
use std::path::{Path, PathBuf};

use tsresolve_core::{ExtendsResolver, IdentityResolver, PackageResolver, path_util::normalize};

/// How `extends` values are turned into files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolverKind {
    /// Treat `extends` as a path relative to the extending file
    Identity,
    /// Also look up package names in `node_modules`
    Package,
}

impl ResolverKind {
    /// A fresh resolver for one resolution tree rooted at `root`.
    pub fn build(self, root: &Path) -> Box<dyn ExtendsResolver> {
        match self {
            ResolverKind::Identity => Box::new(IdentityResolver),
            ResolverKind::Package => Box::new(PackageResolver::new(root)),
        }
    }
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Root directory of the workspace (defaults to git root)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Strategy used to resolve `extends`
    #[arg(long, value_enum, default_value_t = ResolverKind::Package, global = true)]
    pub resolver: ResolverKind,
}

impl Config {
    /// Initialize the config by resolving the workspace root
    pub fn initialize(&mut self) -> Result<()> {
        let root = if let Some(r) = self.root.take() {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or(r)
        } else {
            debug!("No root provided, searching for git root");
            tsresolve_core::find_git_root()?
        };
        info!("Using root directory: {}", root.display());

        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    pub fn extends_resolver(&self) -> Result<Box<dyn ExtendsResolver>> {
        Ok(self.resolver.build(self.root()?))
    }

    /// `path` as given on the command line, made relative to the workspace root.
    pub fn workspace_relative(&self, path: &Path) -> Result<String> {
        let root = self.root()?;
        let rel = if path.is_absolute() {
            let abs = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
            abs.strip_prefix(root)
                .map_err(|_| anyhow!("{} is outside of workspace {}", path.display(), root.display()))?
                .to_path_buf()
        } else {
            path.to_path_buf()
        };
        Ok(normalize(&rel.to_string_lossy().replace('\\', "/")))
    }
}
