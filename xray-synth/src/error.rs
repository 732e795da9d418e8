/// Error types for false-colour synthesis.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    /// Unknown, unresolvable or uncalibrated material, or an invalid tunable.
    #[error("{message}. Available materials are {available:?}")]
    Configuration {
        message: String,
        available: Vec<String>,
    },

    /// Unusable command line input, e.g. no mesh files.
    #[error("{0}")]
    Input(String),

    #[error("Mesh error in {}: {reason}", .path.display())]
    Mesh { path: PathBuf, reason: String },

    /// Failure inside a generation task, tagged with the task that failed.
    #[error("Task '{task}' failed: {source}")]
    Worker {
        task: String,
        #[source]
        source: Box<SynthError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Progress template error: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
}

impl SynthError {
    pub fn mesh(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SynthError::Mesh {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wraps this error with the identity of the task it escaped from.
    pub fn in_task(self, task: impl Into<String>) -> Self {
        SynthError::Worker {
            task: task.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SynthError>;
