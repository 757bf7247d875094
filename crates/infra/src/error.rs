use std::path::PathBuf;

use thiserror::Error;

use marketlens_analysis::AnalysisError;

pub type InfraResult<T> = Result<T, InfraError>;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write report {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to render chart {}: {message}", .path.display())]
    Chart { path: PathBuf, message: String },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl InfraError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>) -> impl FnOnce(csv::Error) -> Self {
        let path = path.into();
        move |source| Self::Csv { path, source }
    }

    pub(crate) fn chart(path: impl Into<PathBuf>) -> impl FnOnce(String) -> Self {
        let path = path.into();
        move |message| Self::Chart { path, message }
    }
}
