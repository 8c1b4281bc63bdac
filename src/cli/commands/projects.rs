//! Implementation of the `bluecarbon projects` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput};

#[derive(Args, Debug)]
pub struct ProjectsArgs {}

#[derive(Debug, Serialize)]
pub struct ProjectsOutput {
    pub projects: Vec<String>,
}

impl CommandOutput for ProjectsOutput {
    fn to_human(&self) -> String {
        if self.projects.is_empty() {
            return "No projects imported. Use `bluecarbon import <file>` first.".to_string();
        }
        let mut lines = vec![format!("{} imported project(s):", self.projects.len())];
        lines.extend(self.projects.iter().map(|id| format!("  {id}")));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(_args: ProjectsArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let projects = ctx
        .telemetry_store()
        .project_ids()
        .await
        .context("Failed to list projects")?;
    output(&ProjectsOutput { projects }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_hints_at_import() {
        let out = ProjectsOutput {
            projects: Vec::new(),
        };
        assert!(out.to_human().contains("bluecarbon import"));
        assert_eq!(out.to_json()["projects"], serde_json::json!([]));
    }

    #[test]
    fn test_listing() {
        let out = ProjectsOutput {
            projects: vec!["kelp-7".to_string(), "mangrove-01".to_string()],
        };
        let human = out.to_human();
        assert!(human.starts_with("2 imported project(s):"));
        assert!(human.contains("  mangrove-01"));
    }
}
