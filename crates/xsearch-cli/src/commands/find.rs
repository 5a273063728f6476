use crate::cli::SiteArg;
use crate::config::Config;
use crate::support::{parse_criteria_or_exit, parse_filters_or_exit, print_json, store_from};
use serde_json::json;
use xsearch_core::{ResolvedCatalog, SearchQuery, SearchResult, find};

pub struct Args {
    pub experiment: String,
    pub variable: String,
    pub frequency: String,
    pub catalog_root: Option<String>,
    pub site: Option<SiteArg>,
    pub criteria: Vec<String>,
    pub filters: Vec<String>,
    pub no_deduplicate: bool,
    pub include_retired: bool,
    pub include_retracted: bool,
    pub include_ignored: bool,
    pub full_metadata: bool,
    pub print_duplicates: bool,
    pub quiet: bool,
    pub json: bool,
}

pub fn run(config: &Config, args: Args) {
    let store = store_from(config, args.catalog_root, args.site);
    let criteria = if args.criteria.is_empty() {
        parse_criteria_or_exit(&config.criteria)
    } else {
        parse_criteria_or_exit(&args.criteria)
    };
    let report_duplicates = args.print_duplicates && !args.no_deduplicate;

    let mut query = SearchQuery::new(args.experiment, args.variable, args.frequency)
        .with_criteria(criteria)
        .with_advisory_facets(config.advisory_facets.clone())
        .deduplicate(!args.no_deduplicate)
        .exclude_retired(!args.include_retired)
        .exclude_retracted(!args.include_retracted)
        .exclude_ignored(!args.include_ignored)
        .full_metadata(args.full_metadata || report_duplicates)
        .verbose(!args.quiet);
    for (facet, value) in parse_filters_or_exit(&args.filters) {
        query = query.with_filter(facet, value);
    }

    let outcome = find(&store, &query).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if report_duplicates
        && let SearchResult::Metadata(entries) = &outcome.result
    {
        // Report goes to stderr when stdout carries JSON.
        let report = duplicate_report(entries);
        if args.json {
            eprint!("{report}");
        } else {
            print!("{report}");
        }
    }

    let result = if args.full_metadata {
        outcome.result
    } else {
        SearchResult::Paths(outcome.result.paths())
    };

    if args.json {
        let payload = json!({
            "experiment": query.experiment,
            "variable": query.variable,
            "frequency": query.frequency,
            "criteria": query.criteria.iter().map(|c| c.name()).collect::<Vec<_>>(),
            "count": result.len(),
            "result": result,
            "advisories": outcome.advisories,
        });
        print_json(&payload);
        return;
    }

    match result {
        SearchResult::Paths(paths) => {
            if !report_duplicates {
                for path in paths {
                    println!("{path}");
                }
            }
        }
        metadata @ SearchResult::Metadata(_) => print_json(&metadata),
    }
}

/// Chosen dataset per member, followed by the paths it won over.
fn duplicate_report(entries: &ResolvedCatalog) -> String {
    let mut out = String::from("Chosen values\n");
    for (path, entry) in entries {
        out.push_str(&format!("* {path}\n"));
        for alternate in entry.alternate_paths.iter().flatten() {
            out.push_str(&format!("     duplicate: {alternate}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsearch_core::{Catalog, Deduplicator, Record};

    fn dataset(model: &str, member: &str, version: &str) -> Record {
        Record::new()
            .with("model", model)
            .with("member", member)
            .with("version", version)
    }

    #[test]
    fn report_lists_alternates_under_survivor() {
        let catalog: Catalog = [
            ("/p/CESM2/r1/v1/", dataset("CESM2", "r1i1p1f1", "v1")),
            ("/p/CESM2/r1/v2/", dataset("CESM2", "r1i1p1f1", "v2")),
            ("/p/CESM2/r2/v1/", dataset("CESM2", "r2i1p1f1", "v1")),
        ]
        .into_iter()
        .map(|(path, record)| (path.to_string(), record))
        .collect();
        let resolved = Deduplicator::default()
            .deduplicate(&catalog)
            .expect("dedup");

        assert_eq!(
            duplicate_report(&resolved),
            "Chosen values\n\
             * /p/CESM2/r1/v2/\n\
             \x20    duplicate: /p/CESM2/r1/v1/\n\
             * /p/CESM2/r2/v1/\n"
        );
    }
}
