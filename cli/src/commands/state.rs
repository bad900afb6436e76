//! Inspection and maintenance of the persisted app state.
use serde::Serialize;
use watchdog_core::api as core_api;

fn print_json<T: Serialize>(value: &T) -> Result<(), core_api::CliError> {
    let s = serde_json::to_string_pretty(value)
        .map_err(|e| core_api::CliError::Command(e.to_string()))?;
    println!("{s}");
    Ok(())
}

/// Handle inspect command
pub async fn handle_inspect(ctx: &core_api::AppContext) -> Result<i32, core_api::CliError> {
    let monitor = ctx.build_monitor().await?;
    let state = monitor.app_state_manager().read_app_state().await;
    print_json(&state)?;
    Ok(0)
}

/// Handle probe command
pub async fn handle_probe(ctx: &core_api::AppContext) -> Result<i32, core_api::CliError> {
    let monitor = ctx.build_monitor().await?;
    let state = monitor.app_state_manager().current_app_state()?;
    print_json(&state)?;
    Ok(0)
}

/// Handle clear command
pub async fn handle_clear(ctx: &core_api::AppContext) -> Result<i32, core_api::CliError> {
    let monitor = ctx.build_monitor().await?;
    let manager = monitor.app_state_manager();
    manager.delete_app_state();
    // flush: the read is queued behind the delete
    let remaining = manager.read_app_state().await;
    if remaining.is_some() {
        return Err(core_api::CliError::Command(
            "app state still present after delete".into(),
        ));
    }
    println!("app state cleared");
    Ok(0)
}
