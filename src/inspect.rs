//! Single-page inspection commands: `resolve` and `paths`.

use crate::{
    budget::Budgeter,
    build::load_store,
    config::FolioConfig,
    props::{PropsCache, Resolver},
};
use anyhow::{Context, Result};

/// Output options of `folio resolve`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    pub pretty: bool,
    /// Skip the budgeter
    pub raw: bool,
}

/// Resolve one page and render its props as JSON.
pub fn resolve_page(
    config: &FolioConfig,
    cache: &PropsCache,
    url_path: &str,
    options: ResolveOptions,
) -> Result<String> {
    let store = load_store(&config.build.content)?;
    let props = Resolver::new(&store, cache)
        .resolve(url_path)
        .with_context(|| format!("Failed to resolve {url_path}"))?;

    let props = if options.raw {
        props
    } else {
        Budgeter::new(&config.budget).fit(url_path, &props)?.props
    };

    let json = if options.pretty {
        serde_json::to_string_pretty(&props)
    } else {
        serde_json::to_string(&props)
    };
    Ok(json?)
}

/// Every routable URL path, in content order.
pub fn list_paths(config: &FolioConfig) -> Result<Vec<String>> {
    let store = load_store(&config.build.content)?;
    Ok(store.url_paths().into_iter().map(str::to_owned).collect())
}
