//! Fetch, extract, filter: the pipeline behind the command line

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::config::Params;
use crate::filter::{Filter, VersionFilter, parse_filter};
use crate::output::TextOutput;
use crate::version::extract::extract_versions;
use crate::version::registries::create_registry;
use crate::version::registry::Registry;
use crate::version::types::Versions;

/// Fetch the names of `package_name`, turn them into versions and narrow them
/// with `filter`.
///
/// Names that are not versions are logged and skipped. The filter sees the
/// versions sorted ascending; the result is not sorted for display.
pub async fn run<R>(
    registry: &R,
    package_name: &str,
    prefix: &str,
    filter: &VersionFilter,
) -> anyhow::Result<Versions>
where
    R: Registry + ?Sized,
{
    let names = registry
        .fetch_all_versions(package_name)
        .await
        .with_context(|| {
            format!(
                "failed to fetch versions of {} from {}",
                package_name,
                registry.source_kind()
            )
        })?;
    info!(
        "Fetched {} names for {} from {}",
        names.len(),
        package_name,
        registry.source_kind()
    );

    let fetched = extract_versions(names, prefix);
    for ignored in &fetched.ignored {
        warn!("Ignoring {:?}: {}", ignored.raw, ignored.reason);
    }

    // Registries return names in their own order; grouping needs ascending.
    let filtered = filter.apply(fetched.versions.sorted(false));
    debug!("{} versions left after filter {:?}", filtered.len(), filter.to_string());

    Ok(filtered)
}

/// Run one invocation of the command line tool
pub async fn run_cli(params: Params) -> anyhow::Result<()> {
    let filter = parse_filter(&params.filters)?;
    let package_name = params.package_name()?;
    let registry = create_registry(params.source);

    let versions = run(registry.as_ref(), &package_name, &params.prefix, &filter).await?;

    TextOutput::new(params.output).emit(versions)
}
