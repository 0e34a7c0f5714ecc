//! Rendering of the final version list

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::config::{OutputConfig, github_output_path};
use crate::version::types::Versions;

/// Writes versions as plain text
#[derive(Debug, Clone, Default)]
pub struct TextOutput {
    config: OutputConfig,
}

impl TextOutput {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Versions sorted and rendered as configured
    pub fn render(&self, versions: Versions) -> Vec<String> {
        versions
            .sorted(self.config.reverse_order)
            .to_strings(!self.config.no_prefix)
    }

    /// One version per line
    pub fn write<W: Write>(&self, versions: Versions, writer: &mut W) -> io::Result<()> {
        for line in self.render(versions) {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }

    /// `versions=<space separated list>`, the single-line form a GitHub
    /// Actions step output accepts
    pub fn write_action<W: Write>(&self, versions: Versions, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "versions={}", self.render(versions).join(" "))
    }

    /// Write to stdout, or append to `$GITHUB_OUTPUT` when running as an action
    pub fn emit(&self, versions: Versions) -> anyhow::Result<()> {
        if !self.config.as_action {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            return self.write(versions, &mut lock).context("failed to write to stdout");
        }

        self.append_action(versions, &github_output_path()?)
    }

    /// Append the action line to an existing output file
    pub fn append_action(&self, versions: Versions, path: &Path) -> anyhow::Result<()> {
        debug!("Appending versions to {:?}", path);
        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open file {:?}", path))?;
        self.write_action(versions, &mut file)
            .with_context(|| format!("failed to write to file {:?}", path))
    }
}
