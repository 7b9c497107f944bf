use std::process::ExitCode;

use room_engine::{run_app_with_metrics, MetricsHandle};
use tracing::{error, info};

use super::bootstrap::AppWiring;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let metrics = MetricsHandle::default();
    if let Err(err) = run_app_with_metrics(app.config, app.atlas, metrics.clone()) {
        error!(error = %err, "startup_failed");
        return ExitCode::FAILURE;
    }

    let last = metrics.snapshot();
    info!(fps = last.fps, tps = last.tps, "final_metrics");
    ExitCode::SUCCESS
}
