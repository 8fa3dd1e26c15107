use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A named bundle of resource limits. A limit of `0` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanDefinition {
    pub id: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub memory_mb: u64,
    pub cpu_percent: u64,
    pub disk_mb: u64,
}

impl PlanDefinition {
    const fn fixed(id: &'static str, label: &'static str, memory_mb: u64, cpu_percent: u64, disk_mb: u64) -> Self {
        Self {
            id: Cow::Borrowed(id),
            label: Cow::Borrowed(label),
            memory_mb,
            cpu_percent,
            disk_mb,
        }
    }

    /// `"Unlimited"` for a zero memory limit, otherwise `"<n>MB"`.
    pub fn memory_display(&self) -> String {
        if self.memory_mb == 0 {
            "Unlimited".to_string()
        } else {
            format!("{}MB", self.memory_mb)
        }
    }
}

pub const PLANS: &[PlanDefinition] = &[
    PlanDefinition::fixed("1gb", "Starter", 1024, 30, 1024),
    PlanDefinition::fixed("2gb", "Basic", 2048, 60, 2048),
    PlanDefinition::fixed("4gb", "Pro", 4096, 110, 4096),
    PlanDefinition::fixed("8gb", "Turbo", 8192, 230, 8192),
    PlanDefinition::fixed("unli", "God Mode", 0, 0, 0),
];

/// Look up a catalog plan by id.
pub fn resolve_plan(id: &str) -> Result<PlanDefinition> {
    PLANS
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(|| Error::UnknownPlan(id.to_string()))
}

/// How a caller picks a plan: a catalog id, or inline limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanSelector {
    Id(String),
    Limits {
        #[serde(default)]
        label: Option<String>,
        memory: u64,
        cpu: u64,
        disk: u64,
    },
}

impl PlanSelector {
    pub fn resolve(&self) -> Result<PlanDefinition> {
        match self {
            Self::Id(id) => resolve_plan(id),
            Self::Limits { label, memory, cpu, disk } => Ok(PlanDefinition {
                id: Cow::Borrowed("custom"),
                label: label
                    .clone()
                    .filter(|l| !l.trim().is_empty())
                    .map(Cow::Owned)
                    .unwrap_or(Cow::Borrowed("Custom")),
                memory_mb: *memory,
                cpu_percent: *cpu,
                disk_mb: *disk,
            }),
        }
    }
}
