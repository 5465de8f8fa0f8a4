use clap::Parser;
use log::{error, info};
use repgraph::graph::RepeatGraph;
use repgraph::multiplicity::{BalanceConfig, MultiplicityInferer, DEFAULT_SLACK_PENALTY};

///
/// Infer edge multiplicities of a repeat graph from coverage and flow conservation
///
/// The graph is read from and written to JSON dumps.
/// Set RUST_LOG=info (or debug) to see the progress.
///
#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    /// Input graph (JSON dump)
    #[clap(long)]
    graph: std::path::PathBuf,
    /// Output graph (JSON dump). stdout if not specified
    #[clap(long)]
    output: Option<std::path::PathBuf>,
    /// Cost of a unit of flow of emergency source/sink
    #[clap(long, default_value_t = DEFAULT_SLACK_PENALTY)]
    slack_penalty: f64,
    /// Upper bound of multiplicity of each edge
    #[clap(long)]
    max_multiplicity: Option<usize>,
    /// Disable emergency source/sink: fail if the graph cannot be balanced
    #[clap(long)]
    strict: bool,
    /// Only estimate multiplicities from coverage
    #[clap(long)]
    estimate_only: bool,
}

impl Opts {
    fn to_config(&self) -> BalanceConfig {
        BalanceConfig {
            slack_penalty: self.slack_penalty,
            use_slack: !self.strict,
            max_multiplicity: self.max_multiplicity,
        }
    }
}

fn write_graph(graph: &RepeatGraph, opts: &Opts) {
    let ret = match &opts.output {
        Some(path) => graph.to_json_file(path),
        None => graph.write_json(std::io::stdout()),
    };
    if let Err(e) = ret {
        error!("could not write graph: {}", e);
        std::process::exit(1);
    }
}

fn main() {
    env_logger::init();
    let opts: Opts = Opts::parse();
    info!("started_at={}", chrono::Local::now());
    info!("opts={:?}", opts);

    let mut graph = match RepeatGraph::from_json_file(&opts.graph) {
        Ok(graph) => graph,
        Err(e) => {
            error!("could not read graph {}: {}", opts.graph.display(), e);
            std::process::exit(1);
        }
    };
    info!(
        "loaded graph: {} nodes, {} edges",
        graph.n_nodes(),
        graph.n_edges()
    );

    let mut inferer = MultiplicityInferer::new(&mut graph, opts.to_config());
    inferer.estimate_by_coverage();
    if !opts.estimate_only {
        match inferer.balance_graph() {
            Ok(report) => info!(
                "balanced: {} edges changed, {} nodes unbalanced",
                report.changes.len(),
                report.unbalanced_nodes.len()
            ),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        }
    }

    write_graph(&graph, &opts);
    info!("finished_at={}", chrono::Local::now());
}
