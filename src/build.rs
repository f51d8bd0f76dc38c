//! Site-wide props build.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── clean output (optional)
//!     │
//!     ├── ContentStore::load() ──► url_paths()
//!     │
//!     ├── GLOBAL_PROPS_CACHE.clear()
//!     │
//!     └── par_iter(url_paths)
//!             │
//!             └── build_page() ──► resolve ──► fit ──► <output>/<url>/props.json
//! ```

use crate::{
    budget::{BudgetReport, Budgeted, Budgeter},
    config::FolioConfig,
    content::ContentStore,
    log,
    logger::ProgressBars,
    props::{GLOBAL_PROPS_CACHE, PropsCache, PropsError, Resolver},
    utils::size::format_size,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

/// File name of the per-page props document.
pub const PROPS_FILE: &str = "props.json";

/// Build every page with the process-wide props cache.
pub fn build_site(config: &FolioConfig) -> Result<Vec<BudgetReport>> {
    build_with_cache(config, &GLOBAL_PROPS_CACHE)
}

/// Build every page, writing one props file per routable URL path.
///
/// The cache is cleared first so that a long-lived process never serves
/// props from a previous content tree.
pub fn build_with_cache(config: &FolioConfig, cache: &PropsCache) -> Result<Vec<BudgetReport>> {
    let start = Instant::now();
    let output = &config.build.output;

    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean output directory: {}", output.display()))?;
        log!("build"; "cleaned {}", output.display());
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let store = load_store(&config.build.content)?;
    let paths = store.url_paths();
    log!("content"; "loaded {} objects, {} pages", store.len(), paths.len());

    cache.clear();
    let resolver = Resolver::new(&store, cache);
    let budgeter = Budgeter::new(&config.budget);

    let progress = ProgressBars::new_filtered(&[("pages", paths.len())]);
    let reports = paths
        .par_iter()
        .map(|url_path| {
            let report = build_page(url_path, resolver, budgeter, output);
            if let Some(progress) = &progress {
                progress.inc_by_name("pages");
            }
            report
        })
        .collect::<Result<Vec<_>>>();
    if let Some(progress) = progress {
        progress.finish();
    }
    let reports = reports?;

    let reduced = reports.iter().filter(|r| r.reduced()).count();
    let over = reports.iter().filter(|r| !r.within_ceiling).count();
    log!(
        "build";
        "wrote {} pages ({} reduced, {} over ceiling) in {:.2?}",
        reports.len(),
        reduced,
        over,
        start.elapsed()
    );

    Ok(reports)
}

/// Load the content store, naming the directory on failure.
pub fn load_store(content: &Path) -> Result<ContentStore> {
    ContentStore::load(content)
        .with_context(|| format!("Failed to load content from {}", content.display()))
}

/// `<output>/<url_path>/props.json`
pub fn props_file(output: &Path, url_path: &str) -> PathBuf {
    output.join(url_path.trim_start_matches('/')).join(PROPS_FILE)
}

fn build_page(
    url_path: &str,
    resolver: Resolver<'_>,
    budgeter: Budgeter<'_>,
    output: &Path,
) -> Result<BudgetReport> {
    let start = Instant::now();

    let props = resolver
        .resolve(url_path)
        .with_context(|| format!("Failed to resolve {url_path}"))?;
    let Budgeted { props, report } = budgeter.fit(url_path, &props)?;

    let file = props_file(output, url_path);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_vec(&props).map_err(PropsError::from)?;
    fs::write(&file, json).with_context(|| format!("Failed to write {}", file.display()))?;

    log!(
        "pages";
        "{}: {} in {}ms",
        url_path,
        format_size(report.final_bytes),
        start.elapsed().as_millis()
    );
    Ok(report)
}
