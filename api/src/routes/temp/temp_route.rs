//! GET /api/temp — board temperature from an external command.

use std::{
    sync::{Arc, LazyLock},
    time::Duration,
};

use axum::{Json, extract::State};
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::{
    core::{app_config::TempCommand, app_state::AppState},
    routes::temp::temp_response::TempResponse,
};

/// Upper bound for one temperature read; the child is killed after it.
pub const TEMP_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("static decimal regex"));

/// First decimal number in the command output, e.g. `temp=48.3'C` → `48.3`.
pub fn parse_temperature(output: &str) -> Option<f64> {
    DECIMAL
        .find(output)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Handler: GET /api/temp
///
/// Failures are reported in the body, not as an HTTP error.
#[tracing::instrument(skip_all)]
pub async fn temp(State(state): State<Arc<AppState>>) -> Json<TempResponse> {
    match read_temperature(&state.temp_command, TEMP_COMMAND_TIMEOUT).await {
        Ok(value) => {
            debug!(temperature = value, "temperature read");
            Json(TempResponse::celsius(value))
        }
        Err(error) => {
            warn!(command = %state.temp_command.program, %error, "temperature unavailable");
            Json(TempResponse::Failure { error })
        }
    }
}

async fn read_temperature(cmd: &TempCommand, limit: Duration) -> Result<f64, String> {
    let mut command = Command::new(&cmd.program);
    command.args(&cmd.args).kill_on_drop(true);
    let output = tokio::time::timeout(limit, command.output())
        .await
        .map_err(|_| format!("`{}` timed out after {}s", cmd.program, limit.as_secs_f32()))?
        .map_err(|e| format!("failed to run `{}`: {e}", cmd.program))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "`{}` exited with {}: {}",
            cmd.program,
            output.status,
            stderr.trim()
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_temperature(&stdout).ok_or_else(|| format!("no temperature in output `{}`", stdout.trim()))
}
