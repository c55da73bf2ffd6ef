//! Application event handling.
//!
//! Turns background task results (catalog fetch, timers, export) into state
//! machine signals and status updates.

use crate::app::{App, AppEvent, Signal, StatusKind};
use tokio::sync::mpsc;

/// Handle an event reported by a background task.
///
/// Runs on the UI task, so each event is applied to completion before the
/// next input or event is looked at.
pub fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    app.needs_redraw = true;
    match event {
        AppEvent::CatalogFetched(Ok(records)) => {
            app.dispatch(Signal::DataReady(records), event_tx);
        }
        AppEvent::CatalogFetched(Err(e)) => {
            tracing::warn!(error = %e, "Catalog fetch failed");
            app.dispatch(
                Signal::DataFailed {
                    reason: e.user_message(),
                },
                event_tx,
            );
        }
        AppEvent::StatusClearDue => app.clear_status(),
        AppEvent::CopyFeedbackElapsed { epoch, unit } => app.clear_copied(epoch, unit),
        AppEvent::ExportComplete { count, path } => {
            tracing::info!(count, path = %path, "HTML export complete");
            app.set_status(
                format!("Exported {} products to {}", count, path),
                StatusKind::Success,
            );
        }
        AppEvent::ExportFailed { error } => {
            tracing::error!(error = %error, "HTML export failed");
            app.set_status(format!("Export failed: {}", error), StatusKind::Error);
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            if task == "catalog_fetch" {
                app.dispatch(
                    Signal::DataFailed {
                        reason: format!("Internal error: {}", error),
                    },
                    event_tx,
                );
            } else {
                app.set_status(format!("Internal error in {} task", task), StatusKind::Error);
            }
        }
    }
}
