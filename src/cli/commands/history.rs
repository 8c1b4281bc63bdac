//! Implementation of the `bluecarbon history` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{output, table, truncate, CommandOutput};
use crate::domain::models::VerificationRecord;
use crate::domain::ports::ResultStore;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Project whose verification history to show
    pub project_id: String,

    /// Maximum number of records to display
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

#[derive(Debug, Serialize)]
pub struct HistoryOutput {
    pub project_id: String,
    pub records: Vec<VerificationRecord>,
}

impl CommandOutput for HistoryOutput {
    fn to_human(&self) -> String {
        if self.records.is_empty() {
            return format!("No verifications recorded for {}", self.project_id);
        }

        let mut t = table([
            "Verified At",
            "Verified",
            "Confidence",
            "Compliance",
            "tCO2/ha/yr",
            "Risk Factors",
        ]);
        for record in &self.records {
            t.add_row(vec![
                record.verified_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                if record.verified { "yes" } else { "no" }.to_string(),
                format!("{:.3}", record.confidence),
                format!("{:.3}", record.compliance_score),
                format!("{:.2}", record.carbon_sequestration),
                truncate(&record.risk_factors.join("; "), 60),
            ]);
        }
        format!("Verification history for {}\n{t}", self.project_id)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: HistoryArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let mut records = ctx
        .result_store()
        .history(&args.project_id)
        .await
        .with_context(|| format!("Failed to load history for {}", args.project_id))?;
    records.truncate(args.limit);

    output(
        &HistoryOutput {
            project_id: args.project_id,
            records,
        },
        json_mode,
    );
    Ok(())
}
