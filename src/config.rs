//! Comparison configuration: the role table and chart canvas
//!
//! The role table is declarative. Each entry names a role, the substring
//! that identifies its configuration, and the cardinality rules that apply
//! when resolving it against the configs present in a sample store.

use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};

/// Part a configuration plays in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Reference configuration every ratio is computed against
    Baseline,
    /// Alternate or legacy implementation, shown between baseline and optimized
    Alternate,
    /// The optimizing configuration under test
    Optimized,
    /// Configuration that reports JIT counters
    Stats,
}

/// One row of the role table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub role: Role,
    /// Human name used in table headings and chart legends
    pub label: String,
    /// Substring a config name must contain to fill this role
    pub marker: String,
    /// Zero matches is an error when set
    #[serde(default)]
    pub required: bool,
    /// Config may lack results for some benchmarks without failing
    #[serde(default)]
    pub allow_incomplete: bool,
}

impl RoleSpec {
    fn new(role: Role, label: &str, marker: &str, required: bool) -> Self {
        Self {
            role,
            label: label.to_string(),
            marker: marker.to_string(),
            required,
            allow_incomplete: false,
        }
    }

    /// True if `config_name` carries this role's marker
    pub fn matches(&self, config_name: &str) -> bool {
        config_name.contains(&self.marker)
    }
}

/// Configuration for a comparison run
///
/// # Example
/// ```
/// use speedboard::config::CompareConfig;
///
/// let config = CompareConfig::default();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.chart_width, 1000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Role table, alternates in display priority order
    pub roles: Vec<RoleSpec>,

    /// Platform whose stats config is borrowed when the filtered platform has none
    #[serde(default)]
    pub stats_fallback_platform: Option<String>,

    /// Single benchmark whose speedup is quoted next to the headline geomean
    #[serde(default)]
    pub headline_benchmark: Option<String>,

    /// Pixel size the normalized chart layout is scaled to
    pub chart_width: f64,
    pub chart_height: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        let mut mjit_latest = RoleSpec::new(Role::Alternate, "MJIT", "prod_ruby_with_mjit", false);
        // Prerelease MJIT builds routinely skip benchmarks they crash on
        mjit_latest.allow_incomplete = true;

        Self {
            roles: vec![
                RoleSpec::new(Role::Baseline, "No JIT", "no_jit", true),
                RoleSpec::new(Role::Alternate, "MJIT3.0", "ruby_30_with_mjit", false),
                mjit_latest,
                RoleSpec::new(Role::Alternate, "Truffle", "truffleruby", false),
                RoleSpec::new(Role::Optimized, "YJIT", "with_yjit", true),
                RoleSpec::new(Role::Stats, "YJIT stats", "yjit_stats", true),
            ],
            stats_fallback_platform: Some("x86_64".to_string()),
            headline_benchmark: Some("railsbench".to_string()),
            chart_width: 1000.0,
            chart_height: 600.0,
        }
    }
}

impl CompareConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CompareConfig =
            toml::from_str(text).map_err(|e| CompareError::InvalidConfig(e.to_string()))?;
        config.validate().map_err(CompareError::InvalidConfig)?;
        Ok(config)
    }

    /// Role table entries for one role, in table order
    pub fn specs_for(&self, role: Role) -> impl Iterator<Item = &RoleSpec> {
        self.roles.iter().filter(move |spec| spec.role == role)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        for role in [Role::Baseline, Role::Optimized, Role::Stats] {
            let count = self.specs_for(role).count();
            if count != 1 {
                return Err(format!(
                    "role table must contain exactly one {:?} entry, got {}",
                    role, count
                ));
            }
            if self.specs_for(role).any(|spec| !spec.required) {
                return Err(format!("{:?} role must be required", role));
            }
        }

        for spec in &self.roles {
            if spec.marker.is_empty() {
                return Err(format!("role {:?} has an empty marker", spec.label));
            }
            if spec.required && spec.allow_incomplete {
                return Err(format!(
                    "role {:?} cannot be both required and allowed incomplete",
                    spec.label
                ));
            }
        }

        if !(self.chart_width > 0.0 && self.chart_height > 0.0) {
            return Err(format!(
                "chart size must be positive, got {}x{}",
                self.chart_width, self.chart_height
            ));
        }

        Ok(())
    }
}
