//! Backend health check command.
//!
//! Calls `GET /health` (or `GET /ready` with `--ready`) and prints the
//! per-dependency report. Exits non-zero when the backend is unreachable
//! or reports unhealthy, so the command works in scripts and CI.

use console::style;

use askbook_infra::http::HttpChatBackend;

fn check_mark(ok: bool) -> String {
    if ok {
        format!("{}", style("✓").green())
    } else {
        format!("{}", style("✗").red())
    }
}

/// Run the health (or readiness) check against the backend.
pub async fn run_health(backend: &HttpChatBackend, ready: bool, json: bool) -> anyhow::Result<()> {
    if ready {
        let reply = backend.ready().await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&reply)?);
        } else {
            println!("  {} backend is {}", check_mark(reply.status == "ready"), reply.status);
        }
        return Ok(());
    }

    let report = backend.health().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!(
            "  {} {}",
            style("Backend health:").bold(),
            if report.is_healthy() {
                style(report.status.as_str()).green()
            } else {
                style(report.status.as_str()).red()
            }
        );
        println!("  {} {}", style("Checked at:").bold(), style(&report.timestamp).dim());
        println!();
        for (name, status) in &report.dependencies {
            println!("  {} {name}: {status}", check_mark(status == "healthy"));
        }
        println!();
    }

    if !report.is_healthy() {
        std::process::exit(1);
    }
    Ok(())
}
