//! File names recognized while locating and resolving tsconfig files.

/// Default config file name, also the fallback file inside an extended package.
pub const TSCONFIG_FILE_NAME: &str = "tsconfig.json";

/// Prefix and suffix of variant config files such as `tsconfig.build.json`.
pub const TSCONFIG_VARIANT_PREFIX: &str = "tsconfig.";
pub const TSCONFIG_VARIANT_SUFFIX: &str = ".json";

pub const PACKAGE_JSON: &str = "package.json";

/// `package.json` field naming a package's shareable tsconfig.
pub const PACKAGE_TSCONFIG_FIELD: &str = "tsconfig";

/// Directories never descended into while collecting tsconfig files.
pub const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Whether `file_name` names a tsconfig file (`tsconfig.json` or `tsconfig.*.json`).
pub fn is_tsconfig_file_name(file_name: &str) -> bool {
    file_name == TSCONFIG_FILE_NAME
        || (file_name.starts_with(TSCONFIG_VARIANT_PREFIX)
            && file_name.ends_with(TSCONFIG_VARIANT_SUFFIX)
            && file_name.len() > TSCONFIG_VARIANT_PREFIX.len() + TSCONFIG_VARIANT_SUFFIX.len())
}
