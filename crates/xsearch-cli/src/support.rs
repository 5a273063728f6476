use crate::cli::SiteArg;
use crate::config::Config;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xsearch_catalog::{JsonCatalogStore, Site};
use xsearch_core::{Catalog, Criterion, FacetIndex, FacetValue};

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Structured logs go to stderr so stdout stays clean for paths and JSON.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

pub fn load_config_or_exit(path: Option<&str>) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        eprintln!("error: failed to load config: {e}");
        std::process::exit(1);
    })
}

pub fn map_site(arg: SiteArg) -> Site {
    match arg {
        SiteArg::Default => Site::Default,
        SiteArg::Lc => Site::Lc,
        SiteArg::Nimbus => Site::Nimbus,
    }
}

/// Catalog store from config, with command-line overrides applied.
pub fn store_from(
    config: &Config,
    catalog_root: Option<String>,
    site: Option<SiteArg>,
) -> JsonCatalogStore {
    let root = catalog_root.unwrap_or_else(|| config.catalog_root.clone());
    let site = site.map(map_site).unwrap_or(config.site);
    JsonCatalogStore::new(root).with_site(site)
}

/// Load a catalog for inspection commands. A missing catalog is empty.
pub fn load_catalog_or_exit(
    store: &JsonCatalogStore,
    experiment: &str,
    variable: &str,
    frequency: Option<&str>,
) -> Catalog {
    let catalog = store
        .load_catalog(experiment, variable)
        .unwrap_or_else(|e| {
            eprintln!("error: failed to load catalog: {e}");
            std::process::exit(1);
        })
        .unwrap_or_default();
    match frequency {
        Some(frequency) => {
            FacetIndex::new(&catalog).restrict_to_value("frequency", &FacetValue::from(frequency))
        }
        None => catalog,
    }
}

pub fn parse_criteria_or_exit(names: &[String]) -> Vec<Criterion> {
    names
        .iter()
        .map(|name| {
            name.parse().unwrap_or_else(|e| {
                eprintln!("error: {e}");
                std::process::exit(1);
            })
        })
        .collect()
}

pub fn parse_filters_or_exit(raw: &[String]) -> Vec<(String, FacetValue)> {
    raw.iter()
        .map(|item| {
            parse_filter(item).unwrap_or_else(|e| {
                eprintln!("error: {e}");
                std::process::exit(1);
            })
        })
        .collect()
}

fn parse_filter(raw: &str) -> Result<(String, FacetValue), String> {
    let (facet, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid filter `{raw}`; expected FACET=VALUE"))?;
    let facet = facet.trim();
    if facet.is_empty() {
        return Err(format!("invalid filter `{raw}`; facet name is empty"));
    }
    Ok((facet.to_string(), FacetValue::parse_loose(value)))
}

pub fn print_json(payload: &impl Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}
