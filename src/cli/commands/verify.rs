//! Implementation of the `bluecarbon verify` command.

use anyhow::{anyhow, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cli::context::AppContext;
use crate::cli::output::{output, table, CommandOutput};
use crate::domain::models::VerificationResult;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Project to verify
    pub project_id: String,

    /// Abandon the run if it has not finished after this many seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct VerifyOutput {
    pub result: VerificationResult,
}

fn bullet_list(title: &str, items: &[String]) -> Vec<String> {
    let mut lines = vec![format!("\n{title}:")];
    if items.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(items.iter().map(|item| format!("  - {item}")));
    lines
}

impl CommandOutput for VerifyOutput {
    fn to_human(&self) -> String {
        let r = &self.result;
        let status = if r.verified {
            style("VERIFIED").green().bold()
        } else {
            style("NOT VERIFIED").red().bold()
        };

        let mut lines = vec![
            format!("Project {}: {status}", r.project_id),
            format!("Confidence:        {:.3}", r.confidence),
            format!("Compliance score:  {:.3}", r.compliance_score),
            format!(
                "Sequestration:     {:.2} tCO2/ha/yr",
                r.prediction.carbon_sequestration
            ),
            format!("Biomass:           {:.2}", r.prediction.biomass),
            format!("Growth rate:       {:.3}", r.prediction.growth_rate),
            format!("Health score:      {:.3}", r.prediction.health_score),
        ];

        if let Some(checks) = r.check_scores {
            let mut t = table(["Check", "Score"]);
            let rows = [
                ("Data quality", checks.data_quality),
                ("Growth consistency", checks.growth_consistency),
                ("Environmental health", checks.environmental_health),
                ("Satellite consistency", checks.satellite_consistency),
                ("Carbon calculation", checks.carbon_calculation),
                ("Compliance", checks.compliance_check),
            ];
            for (name, score) in rows {
                t.add_row(vec![name.to_string(), format!("{score:.3}")]);
            }
            lines.push(String::new());
            lines.push(t.to_string());
        }

        lines.extend(bullet_list("Risk factors", &r.risk_factors));
        lines.extend(bullet_list("Recommendations", &r.recommendations));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.result).unwrap_or_default()
    }
}

pub async fn execute(args: VerifyArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let orchestrator = ctx.orchestrator()?;

    let token = CancellationToken::new();
    let canceller = token.clone();
    let deadline = args.deadline_secs.map(Duration::from_secs);
    let watcher = tokio::spawn(async move {
        let expired = async {
            match deadline {
                Some(after) => tokio::time::sleep(after).await,
                None => std::future::pending().await,
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => warn!("interrupt received, cancelling verification"),
            () = expired => warn!("deadline reached, cancelling verification"),
        }
        canceller.cancel();
    });

    let outcome = orchestrator
        .verify_cancellable(&args.project_id, &token)
        .await;
    watcher.abort();

    let result =
        outcome.ok_or_else(|| anyhow!("verification of {} was cancelled", args.project_id))?;
    output(&VerifyOutput { result }, json_mode);
    Ok(())
}
