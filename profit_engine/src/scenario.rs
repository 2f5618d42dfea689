//! Named estimator scenarios.
//!
//! A scenario is a stored set of funnel assumptions, e.g. "launch week"
//! or "ramadan campaign", kept as one JSON file per scenario.  The
//! [`ScenarioBook`] holds the loaded scenarios in memory and evaluates
//! them through the engine.

use crate::engine::{compute, compute_batch};
use crate::error::ApiError;
use crate::models::{CalculationInput, CalculationResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input: CalculationInput,
}

/// Listing entry returned by [`ScenarioBook::summaries`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub description: Option<String>,
}

/// A scenario together with its computed result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioEvaluation {
    pub name: String,
    pub input: CalculationInput,
    pub result: CalculationResult,
}

/// Load all scenarios from a directory.
///
/// Every `.json` file is parsed as a [`Scenario`].  Files that cannot
/// be read or fail to parse are logged and skipped.  A missing
/// directory yields an empty list.  The result is sorted by name.
pub fn load_scenarios_from_dir(path: &Path) -> Result<Vec<Scenario>> {
    let mut scenarios = Vec::new();
    if !path.is_dir() {
        debug!(path = %path.display(), "scenario directory not found");
        return Ok(scenarios);
    }
    let entries = std::fs::read_dir(path)
        .with_context(|| format!("Failed to read scenario directory: {}", path.display()))?;
    for entry in entries {
        let entry = entry?;
        let file_path = entry.path();
        if !entry.file_type()?.is_file() || file_path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        let data = match std::fs::read(&file_path) {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %file_path.display(), error = %err, "skipping unreadable scenario");
                continue;
            }
        };
        match serde_json::from_slice::<Scenario>(&data) {
            Ok(scenario) => scenarios.push(scenario),
            Err(err) => warn!(path = %file_path.display(), error = %err, "skipping unparseable scenario"),
        }
    }
    scenarios.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(scenarios)
}

/// In-memory collection of scenarios keyed by name.  Later entries with
/// a duplicate name replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ScenarioBook {
    scenarios: BTreeMap<String, Scenario>,
}

impl ScenarioBook {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        let scenarios = scenarios
            .into_iter()
            .map(|scenario| (scenario.name.clone(), scenario))
            .collect();
        Self { scenarios }
    }

    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self::new(load_scenarios_from_dir(dir)?))
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.scenarios.keys().map(String::as_str).collect()
    }

    pub fn summaries(&self) -> Vec<ScenarioSummary> {
        self.scenarios
            .values()
            .map(|s| ScenarioSummary {
                name: s.name.clone(),
                description: s.description.clone(),
            })
            .collect()
    }

    pub fn evaluate(&self, name: &str) -> Result<ScenarioEvaluation, ApiError> {
        let scenario = self
            .get(name)
            .ok_or_else(|| ApiError::ScenarioNotFound(name.to_string()))?;
        Ok(ScenarioEvaluation {
            name: scenario.name.clone(),
            input: scenario.input.clone(),
            result: compute(&scenario.input),
        })
    }

    /// Evaluate every scenario in parallel, in name order.
    pub fn evaluate_all(&self) -> Vec<ScenarioEvaluation> {
        let inputs: Vec<CalculationInput> =
            self.scenarios.values().map(|s| s.input.clone()).collect();
        compute_batch(&inputs)
            .into_iter()
            .zip(self.scenarios.values())
            .map(|(result, scenario)| ScenarioEvaluation {
                name: scenario.name.clone(),
                input: scenario.input.clone(),
                result,
            })
            .collect()
    }
}
