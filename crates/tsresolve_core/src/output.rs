use log::trace;

use crate::{
    path_util::{join, normalize, strip_segment_prefix},
    types::TsConfig,
};

impl TsConfig {
    /// Where the compiled output of the source file `path` (relative to the
    /// config directory) lands: the part of `path` below `rootDir`,
    /// re-rooted under `outDir`.
    pub fn to_out_dir(&self, path: &str) -> String {
        self.reroot(path, &self.out_dir)
    }

    /// Like [`TsConfig::to_out_dir`] but for declaration files, which follow
    /// `declarationDir` when set and `outDir` otherwise.
    pub fn to_declaration_out_dir(&self, path: &str) -> String {
        let target = self.declaration_dir.as_deref().unwrap_or(&self.out_dir);
        self.reroot(path, target)
    }

    fn reroot(&self, path: &str, target: &str) -> String {
        let normalized = normalize(path);
        // Paths outside rootDir keep their full form.
        let rest = strip_segment_prefix(&normalized, &self.root_dir).unwrap_or(&normalized);
        let mapped = if target == "." { rest.to_string() } else { join(target, rest) };
        trace!("Mapped '{}' to '{}' (rootDir '{}', target '{}')", path, mapped, self.root_dir, target);
        mapped
    }
}
