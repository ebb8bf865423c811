//! Image map rebuild errors.

use std::fmt::Write as _;

use thiserror::Error;

use super::NetworkError;
use crate::domain::entities::Category;

/// Failure of a full fetch and parse cycle.
#[derive(Debug, Clone, Error)]
pub enum RebuildError {
    /// One or both cover lists could not be downloaded.
    #[error("failed to download cover lists: {}", describe(.failures))]
    ListFetch {
        /// Every category that failed, with its cause.
        failures: Vec<(Category, NetworkError)>,
    },
}

impl RebuildError {
    /// Returns the categories whose download failed.
    #[must_use]
    pub fn failed_categories(&self) -> Vec<Category> {
        match self {
            Self::ListFetch { failures } => failures.iter().map(|(c, _)| *c).collect(),
        }
    }

    /// Returns whether every failure may clear up on a later attempt.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ListFetch { failures } => failures.iter().all(|(_, e)| e.is_transient()),
        }
    }
}

fn describe(failures: &[(Category, NetworkError)]) -> String {
    let mut out = String::new();
    for (i, (category, error)) in failures.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "{category}: {error}");
    }
    out
}
