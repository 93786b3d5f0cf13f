//! Concurrent range table construction for several modules

use futures::future::join_all;
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::version::range::RangeTable;
use crate::version::registry::Registry;

/// Fetch every module concurrently and build one table per module.
///
/// A module whose fetch fails gets an empty table, so callers can still
/// offer the remaining modules.
pub async fn fetch_range_tables<R, S>(registry: &R, modules: &[S]) -> IndexMap<String, RangeTable>
where
    R: Registry + ?Sized,
    S: AsRef<str>,
{
    let fetches = modules.iter().map(|module| async move {
        let module = module.as_ref();
        let versions = registry
            .fetch_versions(module)
            .await
            .inspect_err(|e| warn!("Failed to fetch versions for {}: {}", module, e))
            .unwrap_or_default();
        (module.to_string(), versions)
    });

    join_all(fetches)
        .await
        .into_iter()
        .map(|(module, versions)| {
            let table = RangeTable::build(&versions);
            info!(
                "{}: {} versions, {} stable ranges, {} beta ranges",
                module,
                versions.len(),
                table.stable().len(),
                table.beta().len()
            );
            (module, table)
        })
        .collect()
}
