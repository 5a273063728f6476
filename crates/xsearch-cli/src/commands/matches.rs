use crate::cli::SiteArg;
use crate::config::Config;
use crate::support::{load_catalog_or_exit, print_json, store_from};
use serde_json::json;
use xsearch_core::FacetIndex;

pub struct Args {
    pub experiment: String,
    pub variable: String,
    pub facet: String,
    pub pattern: String,
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

    let paths = FacetIndex::new(&catalog)
        .match_facet(&args.facet, &args.pattern)
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        });

    if args.json {
        let payload = json!({
            "experiment": args.experiment,
            "variable": args.variable,
            "facet": args.facet,
            "pattern": args.pattern,
            "count": paths.len(),
            "paths": paths,
        });
        print_json(&payload);
    } else {
        for path in &paths {
            println!("{path}");
        }
    }
}
