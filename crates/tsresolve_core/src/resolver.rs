use log::trace;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    constants::{PACKAGE_JSON, PACKAGE_TSCONFIG_FIELD, TSCONFIG_FILE_NAME},
    path_util::{dirname, is_relative_path, join, normalize},
};

/// Strategy turning an `extends` value into the files to try as the base
/// config, in priority order.
///
/// `dir` is the workspace-relative directory of the extending config.
/// Returned paths are workspace relative as well. Implementations never
/// fail; an empty list means "no base".
pub trait ExtendsResolver {
    fn resolve(&self, dir: &str, extends: &str) -> Vec<String>;
}

impl<F> ExtendsResolver for F
where
    F: Fn(&str, &str) -> Vec<String>,
{
    fn resolve(&self, dir: &str, extends: &str) -> Vec<String> {
        self(dir, extends)
    }
}

/// Treats `extends` as a file path relative to the extending config.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl ExtendsResolver for IdentityResolver {
    fn resolve(&self, dir: &str, extends: &str) -> Vec<String> {
        let mut candidates = vec![join(dir, extends)];
        if !extends.ends_with(".json") {
            candidates.push(join(dir, &format!("{extends}.json")));
        }
        candidates
    }
}

/// Resolves package-style `extends` values (`@tsconfig/node18`,
/// `my-pkg/tsconfig.base.json`) through `node_modules` folders, walking from
/// the extending config up to the workspace root. Relative and absolute
/// values fall back to [`IdentityResolver`].
#[derive(Debug, Clone)]
pub struct PackageResolver {
    root: PathBuf,
}

impl PackageResolver {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn package_candidates(&self, pkg_dir: &str, extends: &str) -> Vec<String> {
        if extends.ends_with(".json") {
            return vec![pkg_dir.to_string()];
        }

        let mut candidates = Vec::new();
        if let Some(declared) = declared_tsconfig(&self.root.join(pkg_dir).join(PACKAGE_JSON)) {
            trace!("Package '{}' declares tsconfig '{}'", extends, declared);
            candidates.push(join(pkg_dir, &declared));
        }
        candidates.push(join(pkg_dir, TSCONFIG_FILE_NAME));
        candidates.push(format!("{pkg_dir}.json"));
        candidates
    }
}

impl ExtendsResolver for PackageResolver {
    fn resolve(&self, dir: &str, extends: &str) -> Vec<String> {
        if extends.is_empty() {
            return Vec::new();
        }
        if is_relative_path(extends) || Path::new(extends).is_absolute() {
            return IdentityResolver.resolve(dir, extends);
        }

        let mut candidates = Vec::new();
        let mut current = normalize(dir);
        loop {
            let pkg_dir = join(&join(&current, "node_modules"), extends);
            if self.root.join(&pkg_dir).exists() || self.root.join(format!("{pkg_dir}.json")).exists() {
                trace!("Found package '{}' at {}", extends, pkg_dir);
                candidates.extend(self.package_candidates(&pkg_dir, extends));
            } else {
                trace!("No package '{}' at {}", extends, pkg_dir);
            }

            if current == "." || current.starts_with("..") || current.starts_with('/') {
                break;
            }
            current = dirname(&current);
        }
        candidates
    }
}

/// The `tsconfig` field of a package.json, if readable.
fn declared_tsconfig(package_json: &Path) -> Option<String> {
    let txt = fs::read_to_string(package_json).ok()?;
    let v = serde_json::from_str::<serde_json::Value>(&txt).ok()?;
    v.get(PACKAGE_TSCONFIG_FIELD).and_then(|x| x.as_str()).map(str::to_string)
}
