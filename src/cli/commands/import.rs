//! Implementation of the `bluecarbon import` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::ProjectTelemetry;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file holding one project or an array of projects
    pub file: PathBuf,
}

/// Accepted document shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TelemetryDocument {
    Many(Vec<ProjectTelemetry>),
    One(Box<ProjectTelemetry>),
}

impl TelemetryDocument {
    pub fn into_projects(self) -> Vec<ProjectTelemetry> {
        match self {
            Self::Many(projects) => projects,
            Self::One(project) => vec![*project],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImportedProject {
    pub project_id: String,
    pub entries: usize,
}

#[derive(Debug, Serialize)]
pub struct ImportOutput {
    pub source: PathBuf,
    pub projects: Vec<ImportedProject>,
}

impl CommandOutput for ImportOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Imported {} project(s) from {}",
            self.projects.len(),
            self.source.display()
        )];
        for project in &self.projects {
            lines.push(format!("  - {} ({} entries)", project.project_id, project.entries));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ImportArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let document: TelemetryDocument = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse telemetry in {}", args.file.display()))?;

    let store = ctx.telemetry_store();
    let mut projects = Vec::new();
    for project in document.into_projects() {
        let entries = store
            .import(&project)
            .await
            .with_context(|| format!("Failed to import project {}", project.project_id))?;
        projects.push(ImportedProject {
            project_id: project.project_id,
            entries,
        });
    }

    output(
        &ImportOutput {
            source: args.file,
            projects,
        },
        json_mode,
    );
    Ok(())
}
