//! Cold-start check and lifecycle relay.
use std::sync::Arc;

use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use watchdog_core::api as core_api;
use watchdog_core::api::{AppLifecycleState, LaunchReport, MessageBus};

use crate::commands::cli::LaunchArgs;

pub fn launch_report(args: &LaunchArgs) -> Option<LaunchReport> {
    (!args.no_launch_report).then(|| LaunchReport::new(args.did_crash))
}

/// Handle launch command
pub async fn handle_launch(
    args: LaunchArgs,
    ctx: &core_api::AppContext,
) -> Result<i32, core_api::CliError> {
    if !ctx.cfg().watchdog.enabled {
        tracing::info!("watchdog termination monitoring disabled by config");
        println!("{}", json!({ "enabled": false }));
        return Ok(0);
    }

    let monitor = ctx.build_monitor().await?;
    let verdict = monitor.start(launch_report(&args)).await;
    let manager = monitor.app_state_manager();
    // the baseline must be stored before this process can exit
    manager.read_app_state().await;

    let output = json!({
        "enabled": true,
        "classified": verdict.is_some(),
        "result": verdict,
        "monitoring": manager.is_monitoring(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output)
            .map_err(|e| core_api::CliError::Command(e.to_string()))?
    );

    if args.watch && manager.is_monitoring() {
        let bus = MessageBus::new();
        bus.subscribe(Arc::new(manager.clone()));
        relay_states(BufReader::new(tokio::io::stdin()), &bus).await?;
        // wait for queued updates to land before exiting
        manager.read_app_state().await;
    }

    Ok(0)
}

/// Publishes one lifecycle state per input line until EOF, `terminated`, or Ctrl-C.
pub async fn relay_states<R>(input: R, bus: &MessageBus) -> Result<(), core_api::CliError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("input closed without termination notice");
                    return Ok(());
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<AppLifecycleState>() {
                    Ok(state) => {
                        tracing::debug!(%state, "relaying lifecycle state");
                        bus.publish_state(state);
                        if state == AppLifecycleState::Terminated {
                            return Ok(());
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted; publishing termination notice");
                bus.publish_state(AppLifecycleState::Terminated);
                return Ok(());
            }
        }
    }
}
