use crate::cli::SiteArg;
use crate::config::Config;
use crate::support::{load_catalog_or_exit, print_json, store_from};
use serde_json::json;
use xsearch_core::{FacetIndex, natural_cmp};

pub struct Args {
    pub experiment: String,
    pub variable: String,
    pub facet: String,
    pub frequency: Option<String>,
    pub catalog_root: Option<String>,
    pub site: Option<SiteArg>,
    pub json: bool,
}

pub fn run(config: &Config, args: Args) {
    let store = store_from(config, args.catalog_root, args.site);
    let catalog = load_catalog_or_exit(
        &store,
        &args.experiment,
        &args.variable,
        args.frequency.as_deref(),
    );

    let mut groups = FacetIndex::new(&catalog)
        .group_paths(&args.facet)
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        });
    groups.sort_by(|(a, _), (b, _)| natural_cmp(&a.to_string(), &b.to_string()));

    if args.json {
        let values: Vec<_> = groups
            .iter()
            .map(|(value, paths)| json!({ "value": value, "count": paths.len() }))
            .collect();
        let payload = json!({
            "experiment": args.experiment,
            "variable": args.variable,
            "facet": args.facet,
            "frequency": args.frequency,
            "datasets": catalog.len(),
            "values": values,
        });
        print_json(&payload);
    } else {
        println!(
            "xsearch values {} {} {}",
            args.experiment, args.variable, args.facet
        );
        println!("  Datasets: {}", catalog.len());
        for (value, paths) in &groups {
            println!("  - {value} ({})", paths.len());
        }
    }
}
