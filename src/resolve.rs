//! Role resolution: map the role table onto the configs present in a store
//!
//! Cardinality rules come from the role table: required roles need exactly
//! one match, optional roles accept zero or one. Resolution happens once per
//! comparison and the resulting `RoleMap` is immutable.

use crate::config::{CompareConfig, Role, RoleSpec};
use crate::error::{CompareError, ConfigResolutionKind, Result};

/// A config assigned to a role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub role: Role,
    pub label: String,
    pub name: String,
    pub allow_incomplete: bool,
}

/// Typed role → config mapping for one comparison
///
/// Display order is fixed: baseline first, alternates in role-table order,
/// optimized last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMap {
    configs: Vec<ResolvedConfig>,
    stats: ResolvedConfig,
}

impl RoleMap {
    /// Every compared config in display order, baseline included
    pub fn configs(&self) -> &[ResolvedConfig] {
        &self.configs
    }

    pub fn baseline(&self) -> &ResolvedConfig {
        &self.configs[0]
    }

    pub fn optimized(&self) -> &ResolvedConfig {
        &self.configs[self.configs.len() - 1]
    }

    /// Config that reports JIT counters (may be the optimized config)
    pub fn stats(&self) -> &ResolvedConfig {
        &self.stats
    }

    /// Non-baseline configs in display order
    pub fn comparisons(&self) -> impl Iterator<Item = &ResolvedConfig> {
        self.configs.iter().skip(1)
    }

    /// Look up a compared config by name
    pub fn get(&self, name: &str) -> Option<&ResolvedConfig> {
        self.configs.iter().find(|c| c.name == name)
    }

    /// Config names in display order
    pub fn names(&self) -> Vec<String> {
        self.configs.iter().map(|c| c.name.clone()).collect()
    }
}

/// Pick the config for one role, enforcing its cardinality rule
fn select_one(spec: &RoleSpec, names: &[&str]) -> Result<Option<String>> {
    let matching: Vec<&str> = names.iter().copied().filter(|n| spec.matches(n)).collect();
    match matching.as_slice() {
        [] if spec.required => Err(CompareError::ConfigResolution {
            kind: ConfigResolutionKind::ZeroMatches,
            role: spec.label.clone(),
            candidates: names.iter().map(|n| n.to_string()).collect(),
        }),
        [] => Ok(None),
        [one] => Ok(Some(one.to_string())),
        _ => Err(CompareError::ConfigResolution {
            kind: ConfigResolutionKind::MultipleMatches,
            role: spec.label.clone(),
            candidates: matching.iter().map(|n| n.to_string()).collect(),
        }),
    }
}

fn resolved(spec: &RoleSpec, name: String) -> ResolvedConfig {
    ResolvedConfig {
        role: spec.role,
        label: spec.label.clone(),
        name,
        allow_incomplete: spec.allow_incomplete,
    }
}

/// Resolve the role table against the available config names
///
/// `platform_filter` keeps only names containing that substring. When the
/// filtered set has no stats-bearing config, the stats config is borrowed
/// from `config.stats_fallback_platform` if one exists there.
///
/// # Example
/// ```
/// use speedboard::config::CompareConfig;
/// use speedboard::resolve::resolve;
///
/// let names: Vec<String> = [
///     "x86_64_prod_ruby_no_jit",
///     "x86_64_prod_ruby_with_yjit",
///     "x86_64_yjit_stats",
/// ]
/// .iter()
/// .map(|s| s.to_string())
/// .collect();
/// let roles = resolve(&CompareConfig::default(), &names, Some("x86_64")).unwrap();
/// assert_eq!(roles.baseline().name, "x86_64_prod_ruby_no_jit");
/// assert_eq!(roles.optimized().name, "x86_64_prod_ruby_with_yjit");
/// assert_eq!(roles.stats().name, "x86_64_yjit_stats");
/// ```
pub fn resolve(
    config: &CompareConfig,
    config_names: &[String],
    platform_filter: Option<&str>,
) -> Result<RoleMap> {
    config.validate().map_err(CompareError::InvalidConfig)?;

    let filtered: Vec<&str> = config_names
        .iter()
        .map(String::as_str)
        .filter(|name| platform_filter.map_or(true, |plat| name.contains(plat)))
        .collect();

    let mut baseline = None;
    let mut optimized = None;
    let mut alternates = Vec::new();
    let mut stats = None;

    for spec in &config.roles {
        let selected = if spec.role == Role::Stats {
            select_stats(config, spec, &filtered, config_names)?
        } else {
            select_one(spec, &filtered)?
        };

        let Some(name) = selected else {
            tracing::debug!("Role {:?} ({}) absent", spec.role, spec.label);
            continue;
        };
        tracing::debug!("Role {:?} ({}) -> {}", spec.role, spec.label, name);

        let entry = resolved(spec, name);
        match spec.role {
            Role::Baseline => baseline = Some(entry),
            Role::Optimized => optimized = Some(entry),
            Role::Alternate => alternates.push(entry),
            Role::Stats => stats = Some(entry),
        }
    }

    // validate() guarantees one required spec per mandatory role, and select_one
    // fails on zero matches for required specs, so these are always present.
    let (Some(baseline), Some(optimized), Some(stats)) = (baseline, optimized, stats) else {
        return Err(CompareError::InvalidConfig(
            "role table lacks a baseline, optimized or stats entry".to_string(),
        ));
    };

    let mut configs = Vec::with_capacity(alternates.len() + 2);
    configs.push(baseline);
    configs.extend(alternates);
    configs.push(optimized);

    Ok(RoleMap { configs, stats })
}

fn select_stats(
    config: &CompareConfig,
    spec: &RoleSpec,
    filtered: &[&str],
    all_names: &[String],
) -> Result<Option<String>> {
    if filtered.iter().any(|n| spec.matches(n)) {
        return select_one(spec, filtered);
    }

    let Some(fallback) = config.stats_fallback_platform.as_deref() else {
        return select_one(spec, filtered);
    };

    let fallback_names: Vec<&str> = all_names
        .iter()
        .map(String::as_str)
        .filter(|n| n.contains(fallback))
        .collect();
    if !fallback_names.iter().any(|n| spec.matches(n)) {
        return select_one(spec, filtered);
    }

    let selected = select_one(spec, &fallback_names)?;
    if let Some(name) = &selected {
        tracing::warn!(
            "No {} config on the requested platform, falling back to {}",
            spec.label,
            name
        );
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn full_set() -> Vec<String> {
        names(&[
            "x86_64_prod_ruby_no_jit",
            "x86_64_prod_ruby_with_yjit",
            "x86_64_prod_ruby_with_mjit",
            "x86_64_ruby_30_with_mjit",
            "x86_64_truffleruby",
            "x86_64_yjit_stats",
            "aarch64_prod_ruby_no_jit",
            "aarch64_prod_ruby_with_yjit",
        ])
    }

    #[test]
    fn test_resolve_orders_baseline_alternates_optimized() {
        let roles = resolve(&CompareConfig::default(), &full_set(), Some("x86_64")).unwrap();
        let labels: Vec<&str> = roles.configs().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["No JIT", "MJIT3.0", "MJIT", "Truffle", "YJIT"]);
        assert_eq!(roles.baseline().role, Role::Baseline);
        assert_eq!(roles.optimized().role, Role::Optimized);
        assert_eq!(roles.comparisons().count(), 4);
    }

    #[test]
    fn test_resolve_optional_roles_absent() {
        let roles = resolve(&CompareConfig::default(), &full_set(), Some("aarch64")).unwrap();
        assert_eq!(
            roles.names(),
            names(&["aarch64_prod_ruby_no_jit", "aarch64_prod_ruby_with_yjit"])
        );
    }

    #[test]
    fn test_resolve_stats_fallback_platform() {
        let roles = resolve(&CompareConfig::default(), &full_set(), Some("aarch64")).unwrap();
        assert_eq!(roles.stats().name, "x86_64_yjit_stats");
    }

    #[test]
    fn test_resolve_without_fallback_fails_on_missing_stats() {
        let mut config = CompareConfig::default();
        config.stats_fallback_platform = None;
        let err = resolve(&config, &full_set(), Some("aarch64")).unwrap_err();
        match err {
            CompareError::ConfigResolution { kind, role, .. } => {
                assert_eq!(kind, ConfigResolutionKind::ZeroMatches);
                assert_eq!(role, "YJIT stats");
            }
            other => panic!("Expected ConfigResolution, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_missing_baseline() {
        let err = resolve(
            &CompareConfig::default(),
            &names(&["x86_64_prod_ruby_with_yjit", "x86_64_yjit_stats"]),
            None,
        )
        .unwrap_err();
        match err {
            CompareError::ConfigResolution {
                kind,
                role,
                candidates,
            } => {
                assert_eq!(kind, ConfigResolutionKind::ZeroMatches);
                assert_eq!(role, "No JIT");
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("Expected ConfigResolution, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_multiple_optimized_without_filter() {
        let err = resolve(&CompareConfig::default(), &full_set(), None).unwrap_err();
        match err {
            CompareError::ConfigResolution {
                kind, candidates, ..
            } => {
                assert_eq!(kind, ConfigResolutionKind::MultipleMatches);
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("Expected ConfigResolution, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_multiple_optional_matches_fail() {
        let list = names(&[
            "no_jit",
            "with_yjit",
            "yjit_stats",
            "truffleruby_a",
            "truffleruby_b",
        ]);
        let err = resolve(&CompareConfig::default(), &list, None).unwrap_err();
        assert!(matches!(
            err,
            CompareError::ConfigResolution {
                kind: ConfigResolutionKind::MultipleMatches,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_stats_may_coincide_with_optimized() {
        let mut config = CompareConfig::default();
        for spec in &mut config.roles {
            if spec.role == Role::Stats {
                spec.marker = "with_yjit".to_string();
            }
        }
        let roles = resolve(&config, &names(&["a_no_jit", "a_with_yjit"]), None).unwrap();
        assert_eq!(roles.stats().name, roles.optimized().name);
    }

    #[test]
    fn test_resolve_allow_incomplete_carried() {
        let roles = resolve(&CompareConfig::default(), &full_set(), Some("x86_64")).unwrap();
        let mjit = roles.get("x86_64_prod_ruby_with_mjit").unwrap();
        assert!(mjit.allow_incomplete);
        assert!(!roles.baseline().allow_incomplete);
        assert!(roles.get("x86_64_yjit_stats").is_none());
    }
}
