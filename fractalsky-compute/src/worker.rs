//! JSON request handling for a worker thread.

use crate::{PassOutcome, WorkDispatcher, WorkerError};
use fractalsky_core::{WorkerRequest, WorkerResponse};

/// Parse one request, run it against `dispatcher` and describe the result.
///
/// A `Colorize` request expects the cursor to have been reset by the host.
/// `Terminate` runs nothing; the caller stops feeding requests after it.
pub fn handle_request(
    message_json: &str,
    dispatcher: &WorkDispatcher<'_>,
) -> Result<WorkerResponse, WorkerError> {
    let request: WorkerRequest = serde_json::from_str(message_json)?;

    match request {
        WorkerRequest::Compute { params } => {
            params.validate()?;
            Ok(match dispatcher.compute_and_colorize(&params) {
                PassOutcome::Complete => WorkerResponse::Complete,
                PassOutcome::Suspended { resume_at } => WorkerResponse::Suspended { resume_at },
            })
        }
        WorkerRequest::Colorize { colors } => {
            colors.validate()?;
            dispatcher.colorize_all(&colors);
            Ok(WorkerResponse::Colorized)
        }
        WorkerRequest::Terminate => Ok(WorkerResponse::Terminated),
    }
}

/// [`handle_request`], with failures folded into [`WorkerResponse::Error`].
pub fn respond(message_json: &str, dispatcher: &WorkDispatcher<'_>) -> WorkerResponse {
    handle_request(message_json, dispatcher).unwrap_or_else(|err| {
        log::warn!("Worker request failed: {}", err);
        WorkerResponse::Error {
            message: err.to_string(),
        }
    })
}
