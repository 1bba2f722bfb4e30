// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Side channel the ledger reports each mutation outcome to.

use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Human-readable result of a ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Outcome {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Warning,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

pub trait Notifier {
    fn notify(&self, outcome: &Outcome);
}

#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _outcome: &Outcome) {}
}

/// Forwards outcomes to the tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, outcome: &Outcome) {
        match outcome.severity {
            Severity::Success => {
                tracing::info!(title = %outcome.title, "{}", outcome.description)
            }
            Severity::Warning => {
                tracing::warn!(title = %outcome.title, "{}", outcome.description)
            }
            Severity::Error => {
                tracing::error!(title = %outcome.title, "{}", outcome.description)
            }
        }
    }
}

/// Keeps every outcome in memory; handy for asserting on notifications.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    outcomes: Mutex<Vec<Outcome>>,
}

impl RecordingNotifier {
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, outcome: &Outcome) {
        if let Ok(mut v) = self.outcomes.lock() {
            v.push(outcome.clone());
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, outcome: &Outcome) {
        (**self).notify(outcome)
    }
}
