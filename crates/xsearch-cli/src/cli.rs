use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "xsearch",
    about = "xsearch: find the best dataset path per model member in climate-model catalogs",
    version
)]
pub struct Cli {
    /// Path to a TOML config file (defaults to $XSEARCH_CONFIG, then ~/.xsearch/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log filter, e.g. `debug` or `xsearch_core=debug` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Skip the ~/.xsearch/version update check
    #[arg(long, global = true)]
    pub no_version_notice: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a catalog and resolve one dataset path per model member
    Find {
        /// Experiment id (glob allowed, e.g. `ssp*`)
        experiment: String,

        /// Variable id (glob allowed)
        variable: String,

        /// Frequency id, matched exactly (e.g. `mon`, `day`)
        frequency: String,

        /// Catalog root directory (overrides config)
        #[arg(long)]
        catalog_root: Option<String>,

        /// Site path layout (overrides config)
        #[arg(long, value_enum)]
        site: Option<SiteArg>,

        /// Comma-separated criteria, most significant first (overrides config)
        #[arg(long, value_delimiter = ',')]
        criteria: Vec<String>,

        /// Facet filter `facet=value` (repeatable). Text facets take globs.
        #[arg(long = "filter", value_name = "FACET=VALUE")]
        filters: Vec<String>,

        /// Return every matching dataset instead of one per member
        #[arg(long)]
        no_deduplicate: bool,

        /// Keep datasets flagged as retired
        #[arg(long)]
        include_retired: bool,

        /// Keep datasets flagged as retracted
        #[arg(long)]
        include_retracted: bool,

        /// Keep datasets flagged as ignored
        #[arg(long)]
        include_ignored: bool,

        /// Return full metadata (with unique/alternate_paths) instead of paths
        #[arg(long)]
        full_metadata: bool,

        /// Print each chosen dataset with its duplicates
        #[arg(long)]
        print_duplicates: bool,

        /// Suppress facet advisories
        #[arg(long)]
        quiet: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the distinct values of one facet in a catalog
    Values {
        /// Experiment id (glob allowed)
        experiment: String,

        /// Variable id (glob allowed)
        variable: String,

        /// Facet name (e.g. `model`, `member`, `grid`)
        facet: String,

        /// Only consider records with this frequency
        #[arg(long)]
        frequency: Option<String>,

        /// Catalog root directory (overrides config)
        #[arg(long)]
        catalog_root: Option<String>,

        /// Site path layout (overrides config)
        #[arg(long, value_enum)]
        site: Option<SiteArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List dataset paths whose facet matches a glob, naturally sorted
    Match {
        /// Experiment id (glob allowed)
        experiment: String,

        /// Variable id (glob allowed)
        variable: String,

        /// Facet name
        facet: String,

        /// Glob pattern (`*`, `?`, `[...]`)
        pattern: String,

        /// Only consider records with this frequency
        #[arg(long)]
        frequency: Option<String>,

        /// Catalog root directory (overrides config)
        #[arg(long)]
        catalog_root: Option<String>,

        /// Site path layout (overrides config)
        #[arg(long, value_enum)]
        site: Option<SiteArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SiteArg {
    #[value(name = "default")]
    Default,
    #[value(name = "lc")]
    Lc,
    #[value(name = "nimbus")]
    Nimbus,
}
