use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Size ceilings applied before expensive work starts.
///
/// Every analyzer runs to completion once started, so these limits are the
/// only guard against pathological inputs. Exceeding one fails fast with
/// [`crate::GraphError::SizeLimitExceeded`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisLimits {
    /// Largest graph a [`crate::loader::GraphSource`] will hand out.
    #[serde(default = "default_max_vertices")]
    pub max_vertices: usize,
    /// Largest graph the forbidden-subgraph search will scan.
    ///
    /// That search enumerates every 5- and 6-vertex subset.
    #[serde(default = "default_planarity_max_vertices")]
    pub planarity_max_vertices: usize,
    /// Largest cost matrix dimension the assignment solver accepts.
    #[serde(default = "default_assignment_max_vertices")]
    pub assignment_max_vertices: usize,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            max_vertices: default_max_vertices(),
            planarity_max_vertices: default_planarity_max_vertices(),
            assignment_max_vertices: default_assignment_max_vertices(),
        }
    }
}

impl AnalysisLimits {
    /// Parse limits from TOML text; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not valid TOML for this shape.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).context("Failed to parse analysis limits")
    }
}

/// Load limits from a TOML file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_limits(path: &Path) -> Result<AnalysisLimits> {
    if !path.exists() {
        return Ok(AnalysisLimits::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisLimits>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_max_vertices() -> usize {
    10_000
}

const fn default_planarity_max_vertices() -> usize {
    40
}

const fn default_assignment_max_vertices() -> usize {
    2_000
}
