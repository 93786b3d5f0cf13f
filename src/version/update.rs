//! Update flow for modules already recorded in a pack manifest
//!
//! ```text
//! Loaded ──diff──▶ Diffed ──confirm──▶ Confirmed ──apply──▶ Applied
//!                   │  ▲
//!             adjust│  │diff
//!                   ▼  │
//!               AdjustedLoop          Diffed ──cancel──▶ Cancelled
//! ```
//!
//! The caller owns the prompt loop; [`UpdateSession`] only validates the
//! transitions and answers what changed.

use indexmap::IndexMap;
use semver::Version;
use tracing::{debug, info};

use crate::version::descriptor::{ReleaseTrack, VersionDescriptor};
use crate::version::diff::{Change, diff};
use crate::version::error::UpdateError;
use crate::version::platform::PlatformVersion;
use crate::version::range::RangeTable;

/// A module and the version chosen for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRecord {
    pub module: String,
    pub version: VersionDescriptor,
}

impl SelectionRecord {
    pub fn new(module: impl Into<String>, version: VersionDescriptor) -> Self {
        Self {
            module: module.into(),
            version,
        }
    }

    /// Build a record from a manifest dependency entry such as `1.2.0-beta`
    pub fn parse(module: impl Into<String>, version: &str) -> Option<Self> {
        VersionDescriptor::parse(version).map(|version| Self::new(module, version))
    }

    /// Text written back to the manifest
    pub fn manifest_version(&self) -> &str {
        self.version.module_semver()
    }

    /// Package spec for the package manager, e.g. `@minecraft/server@1.2.0`
    pub fn install_spec(&self) -> String {
        format!("{}@{}", self.module, self.version.raw())
    }
}

/// What the user may switch a module to while adjusting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateChoice {
    Unused,
    Stable,
    Beta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedModule {
    pub from: Option<VersionDescriptor>,
    pub to: Option<VersionDescriptor>,
    pub stable: Option<VersionDescriptor>,
    pub beta: Option<VersionDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleChange {
    pub module: String,
    pub from: Option<VersionDescriptor>,
    pub to: Option<VersionDescriptor>,
    pub change: Change,
}

/// Proposed targets for every module that has a range table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    modules: IndexMap<String, TrackedModule>,
}

impl UpdatePlan {
    /// Resolve each module against `platform`.
    ///
    /// Previously beta modules stay on beta when possible, stable ones on
    /// stable. Modules not in `previous` start out unused.
    pub fn new(
        previous: &[SelectionRecord],
        tables: &IndexMap<String, RangeTable>,
        platform: &PlatformVersion,
    ) -> Self {
        let modules = tables
            .iter()
            .map(|(module, table)| {
                let from = previous
                    .iter()
                    .find(|record| &record.module == module)
                    .map(|record| record.version.clone());
                let stable = table.resolve(ReleaseTrack::Stable, platform).cloned();
                let beta = table.resolve(ReleaseTrack::Beta, platform).cloned();

                let to = match &from {
                    Some(from) if from.is_beta() => beta.clone().or_else(|| stable.clone()),
                    Some(_) => stable.clone().or_else(|| beta.clone()),
                    None => None,
                };
                debug!(
                    "Update target for {}: {:?} -> {:?}",
                    module,
                    from.as_ref().map(VersionDescriptor::module_semver),
                    to.as_ref().map(VersionDescriptor::raw)
                );

                (
                    module.clone(),
                    TrackedModule {
                        from,
                        to,
                        stable,
                        beta,
                    },
                )
            })
            .collect();

        Self { modules }
    }

    pub fn modules(&self) -> &IndexMap<String, TrackedModule> {
        &self.modules
    }

    pub fn changes(&self) -> Vec<ModuleChange> {
        self.modules
            .iter()
            .map(|(module, tracked)| ModuleChange {
                module: module.clone(),
                from: tracked.from.clone(),
                to: tracked.to.clone(),
                change: diff(tracked.from.as_ref(), tracked.to.as_ref()),
            })
            .collect()
    }

    pub fn has_change(&self) -> bool {
        self.modules
            .values()
            .any(|tracked| diff(tracked.from.as_ref(), tracked.to.as_ref()) != Change::Unchanged)
    }

    /// Point one module at its stable or beta candidate, or drop it
    pub fn choose(&mut self, module: &str, choice: UpdateChoice) -> Result<(), UpdateError> {
        let tracked = self
            .modules
            .get_mut(module)
            .ok_or_else(|| UpdateError::UnknownModule(module.to_string()))?;

        tracked.to = match choice {
            UpdateChoice::Unused => None,
            UpdateChoice::Stable => tracked.stable.clone(),
            UpdateChoice::Beta => tracked.beta.clone(),
        };
        Ok(())
    }

    fn finish(&self) -> AppliedUpdate {
        let has_change = self.has_change();

        let records: Vec<SelectionRecord> = self
            .modules
            .iter()
            .filter_map(|(module, tracked)| {
                tracked
                    .to
                    .clone()
                    .map(|version| SelectionRecord::new(module.clone(), version))
            })
            .collect();

        let (installs, uninstalls) = if has_change {
            let installs = records.iter().map(SelectionRecord::install_spec).collect();
            let uninstalls = self
                .modules
                .iter()
                .filter(|(_, tracked)| tracked.from.is_some() && tracked.to.is_none())
                .map(|(module, _)| module.clone())
                .collect();
            (installs, uninstalls)
        } else {
            (Vec::new(), Vec::new())
        };

        AppliedUpdate {
            installs,
            uninstalls,
            records,
            has_change,
        }
    }
}

/// Result of a confirmed update, for the caller to write out and install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedUpdate {
    /// `module@raw` specs; empty when nothing changed
    pub installs: Vec<String>,
    /// Previously tracked modules that are now unused
    pub uninstalls: Vec<String>,
    pub records: Vec<SelectionRecord>,
    pub has_change: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Loaded,
    Diffed,
    AdjustedLoop,
    Confirmed,
    Applied,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateEvent {
    Diff,
    Adjust,
    Confirm,
    Cancel,
    Apply,
}

impl UpdateState {
    pub fn next(self, event: UpdateEvent) -> Result<Self, UpdateError> {
        use UpdateEvent as E;
        use UpdateState as S;

        match (self, event) {
            (S::Loaded | S::AdjustedLoop, E::Diff) => Ok(S::Diffed),
            (S::Diffed, E::Adjust) => Ok(S::AdjustedLoop),
            (S::Diffed, E::Confirm) => Ok(S::Confirmed),
            (S::Diffed, E::Cancel) => Ok(S::Cancelled),
            (S::Confirmed, E::Apply) => Ok(S::Applied),
            (state, event) => Err(UpdateError::InvalidTransition { state, event }),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, UpdateState::Applied | UpdateState::Cancelled)
    }
}

/// Drives an [`UpdatePlan`] through the update states
#[derive(Debug, Clone)]
pub struct UpdateSession {
    plan: UpdatePlan,
    state: UpdateState,
}

impl UpdateSession {
    pub fn new(plan: UpdatePlan) -> Self {
        Self {
            plan,
            state: UpdateState::Loaded,
        }
    }

    pub fn state(&self) -> UpdateState {
        self.state
    }

    pub fn plan(&self) -> &UpdatePlan {
        &self.plan
    }

    fn transition(&mut self, event: UpdateEvent) -> Result<(), UpdateError> {
        self.state = self.state.next(event)?;
        Ok(())
    }

    pub fn diff(&mut self) -> Result<Vec<ModuleChange>, UpdateError> {
        self.transition(UpdateEvent::Diff)?;
        Ok(self.plan.changes())
    }

    pub fn adjust(&mut self) -> Result<(), UpdateError> {
        self.transition(UpdateEvent::Adjust)
    }

    /// Revise one module; only allowed while adjusting
    pub fn choose(&mut self, module: &str, choice: UpdateChoice) -> Result<(), UpdateError> {
        if self.state != UpdateState::AdjustedLoop {
            return Err(UpdateError::InvalidTransition {
                state: self.state,
                event: UpdateEvent::Adjust,
            });
        }
        self.plan.choose(module, choice)
    }

    pub fn confirm(&mut self) -> Result<(), UpdateError> {
        self.transition(UpdateEvent::Confirm)
    }

    pub fn cancel(&mut self) -> Result<(), UpdateError> {
        self.transition(UpdateEvent::Cancel)
    }

    pub fn apply(&mut self) -> Result<AppliedUpdate, UpdateError> {
        self.transition(UpdateEvent::Apply)?;
        let applied = self.plan.finish();
        info!(
            "Applied update: {} installs, {} uninstalls",
            applied.installs.len(),
            applied.uninstalls.len()
        );
        Ok(applied)
    }
}

/// Next pack version: minor bumped, patch reset
pub fn next_pack_version(current: &Version) -> Version {
    Version::new(current.major, current.minor.saturating_add(1), 0)
}

/// Raise a manifest's `min_engine_version` to the target platform if lower
pub fn raise_min_engine_version(current: [u32; 3], platform: &PlatformVersion) -> [u32; 3] {
    current.max(platform.release())
}
