//! Classify how a module's selection changes between two states

use crate::version::descriptor::VersionDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Unchanged,
    Changed,
    Removed,
    Added,
}

/// Compare a previous selection with a new one.
///
/// Betas never count as unchanged: the same `x.y.z-beta` text can point at a
/// different platform build, so they always need confirming again.
pub fn diff(old: Option<&VersionDescriptor>, new: Option<&VersionDescriptor>) -> Change {
    match (old, new) {
        (None, None) => Change::Unchanged,
        (Some(_), None) => Change::Removed,
        (None, Some(_)) => Change::Added,
        (Some(old), Some(new)) => {
            if !new.is_beta() && old.module_semver() == new.module_semver() {
                Change::Unchanged
            } else {
                Change::Changed
            }
        }
    }
}
