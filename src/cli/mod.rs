//! Command-line interface

pub mod commands;
pub mod context;
pub mod output;
pub mod types;

pub use context::{build_orchestrator, AppContext};
pub use types::{Cli, Commands};

/// Print an error the way the active output mode expects and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", console::style("Error:").red().bold());
    }
    std::process::exit(1);
}
