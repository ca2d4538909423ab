//! Module specifier expansion through `compilerOptions.paths`.
//!
//! Matching follows the compiler's rules: a pattern without `*` matches only
//! the identical specifier, a pattern with one `*` matches any specifier that
//! starts with the text before the star and ends with the text after it.
//! Candidates are ordered by pattern specificity and always end with the
//! unaliased specifier itself. Nothing here touches the filesystem.

use log::trace;
use std::cmp::Reverse;

use crate::{
    path_util::{is_relative_path, join},
    types::TsConfig,
};

/// A pattern of the alias table that matched a specifier.
#[derive(Debug)]
struct AliasMatch<'a> {
    /// Text substituted for `*` in templates, `None` for exact matches.
    capture: Option<&'a str>,
    templates: &'a [String],
    rank: Rank,
}

/// Exact matches outrank every wildcard; wildcards rank by the length of the
/// text before their star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Wildcard(usize),
    Exact,
}

fn match_pattern<'a>(pattern: &str, specifier: &'a str) -> Option<(Option<&'a str>, Rank)> {
    let Some((prefix, suffix)) = pattern.split_once('*') else {
        return (pattern == specifier).then_some((None, Rank::Exact));
    };
    if suffix.contains('*') {
        trace!("Ignoring alias pattern '{}' with more than one '*'", pattern);
        return None;
    }
    if specifier.len() < prefix.len() + suffix.len()
        || !specifier.starts_with(prefix)
        || !specifier.ends_with(suffix)
    {
        return None;
    }
    let capture = &specifier[prefix.len()..specifier.len() - suffix.len()];
    Some((Some(capture), Rank::Wildcard(prefix.len())))
}

impl TsConfig {
    /// Expands `specifier` into every workspace-relative path it may refer
    /// to, most specific first.
    ///
    /// `relative_to_dir` is the directory, relative to this config's
    /// directory, that relative specifiers (and unaliased specifiers when no
    /// `baseUrl` applies) resolve against.
    pub fn expand_paths(&self, relative_to_dir: &str, specifier: &str) -> Vec<String> {
        let fallback_dir = match (&self.base_url, is_relative_path(specifier)) {
            (Some(base_url), false) => base_url.as_str(),
            _ => relative_to_dir,
        };
        let fallback = join(&self.config_dir, &join(fallback_dir, specifier));

        let Some(paths) = self.paths.as_ref().filter(|_| !is_relative_path(specifier)) else {
            return vec![fallback];
        };

        let mut matches: Vec<AliasMatch> = paths
            .map
            .iter()
            .filter_map(|(pattern, templates)| {
                let (capture, rank) = match_pattern(pattern, specifier)?;
                trace!("Alias '{}' matches '{}' (capture {:?})", pattern, specifier, capture);
                Some(AliasMatch { capture, templates, rank })
            })
            .collect();

        // Stable: equal ranks keep declaration order.
        matches.sort_by_key(|m| Reverse(m.rank));

        let base = join(&self.config_dir, &paths.rel);
        let mut candidates: Vec<String> = matches
            .iter()
            .flat_map(|m| {
                m.templates.iter().map(|template| {
                    let substituted = match m.capture {
                        Some(capture) => template.replacen('*', capture, 1),
                        None => template.clone(),
                    };
                    join(&base, &substituted)
                })
            })
            .collect();

        candidates.push(fallback);
        trace!("Expanded '{}' to {:?}", specifier, candidates);
        candidates
    }
}
