use crate::{ColorParameters, RenderParameters};
use serde::{Deserialize, Serialize};

/// Messages sent from the host to a worker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum WorkerRequest {
    /// Run one budgeted compute-and-colorize loop over the shared cursor.
    Compute { params: RenderParameters },

    /// Recolor every resolved pixel without computing.
    Colorize { colors: ColorParameters },

    /// Terminate worker.
    Terminate,
}

/// Messages sent from a worker back to the host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum WorkerResponse {
    /// Worker is loaded and ready for requests.
    Ready,

    /// The cursor ran past the last pixel.
    Complete,

    /// Budget exhausted; a later pass can resume at `resume_at`.
    Suspended { resume_at: usize },

    /// Recolor loop finished.
    Colorized,

    /// Worker is shutting down.
    Terminated,

    /// Worker encountered an error.
    Error { message: String },
}
