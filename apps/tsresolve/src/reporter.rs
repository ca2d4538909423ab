use std::io::{self, Write};

use colored::Colorize;
use log::debug;
use tsresolve_core::TsConfig;

use crate::scan::ScanResult;

fn flag(value: bool) -> String {
    if value { "true".green().to_string() } else { "false".dimmed().to_string() }
}

pub fn print_config<W: Write>(writer: &mut W, config: &TsConfig) -> io::Result<()> {
    writeln!(writer, "{} {}", "●".bright_blue(), config.config_path().bold())?;
    if !config.extends.is_empty() {
        writeln!(writer, "  extends:        {}", config.extends.cyan())?;
    }
    writeln!(writer, "  rootDir:        {}", config.root_dir)?;
    writeln!(writer, "  outDir:         {}", config.out_dir)?;
    if let Some(declaration_dir) = &config.declaration_dir {
        writeln!(writer, "  declarationDir: {}", declaration_dir)?;
    }
    writeln!(writer, "  importHelpers:  {}", flag(config.import_helpers))?;
    writeln!(writer, "  allowJs:        {}", flag(config.allow_js))?;
    writeln!(writer, "  resolveJson:    {}", flag(config.resolve_json_module))?;
    writeln!(writer, "  declaration:    {}", flag(config.declaration))?;
    if let Some(base_url) = &config.base_url {
        writeln!(writer, "  baseUrl:        {}", base_url)?;
    }

    match &config.paths {
        Some(paths) => {
            writeln!(writer, "  paths (relative to {}):", paths.rel.cyan())?;
            for (pattern, templates) in &paths.map {
                writeln!(writer, "    {} → {}", pattern.yellow(), templates.join(", "))?;
            }
        }
        None => writeln!(writer, "  paths:          {}", "none".dimmed())?,
    }

    writer.flush()
}

pub fn print_candidates<W: Write>(writer: &mut W, specifier: &str, candidates: &[String]) -> io::Result<()> {
    debug!("Printing {} candidates for '{}'", candidates.len(), specifier);
    writeln!(writer, "{} {}", "●".bright_blue(), specifier.bold())?;
    for (i, candidate) in candidates.iter().enumerate() {
        let marker = if i + 1 == candidates.len() { "└──" } else { "├──" };
        writeln!(writer, "  {} {}", marker.dimmed(), candidate)?;
    }
    writer.flush()
}

pub fn print_out_paths<W: Write>(writer: &mut W, mapped: &[(String, String)]) -> io::Result<()> {
    for (source, output) in mapped {
        writeln!(writer, "{} {} {}", source, "→".dimmed(), output.cyan())?;
    }
    writer.flush()
}

pub fn print_scan_summary<W: Write>(writer: &mut W, result: &ScanResult) -> io::Result<()> {
    for config in &result.resolved {
        let aliases = config.paths.as_ref().map_or(0, |p| p.len());
        write!(writer, "{} {}", "✓".green().bold(), config.config_path())?;
        if !config.extends.is_empty() {
            write!(writer, " {} {}", "extends".dimmed(), config.extends.cyan())?;
        }
        writeln!(writer, " ({} aliases)", aliases)?;
    }
    for (config_path, error) in &result.failures {
        writeln!(writer, "{} {}: {}", "✗".red().bold(), config_path.bold(), error)?;
    }
    writer.flush()
}
