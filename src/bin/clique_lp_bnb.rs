use std::process;
use std::rc::Rc;

use clap::{App, load_yaml};
use dogs::search_algorithm::{NeverStoppingCriterion, TimeStoppingCriterion};
use log::{error, info};
use serde_json::json;

use dogs_clique_lp::color::GraphInstance;
use dogs_clique_lp::error::Result;
use dogs_clique_lp::search::clique_lp_bnb::{BnbConfig, LpCliqueBnb};
use dogs_clique_lp::search::lp_solver::GoodLpSolver;
use dogs_clique_lp::util::{init_logger, read_params, export_results};


/** solves a CLIQUE instance using the LP-based branch & bound */
fn run() -> Result<()> {
    // parse arguments
    let yaml = load_yaml!("clique_lp_bnb.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    init_logger(main_args.occurrences_of("verbose"));
    let params = read_params(&main_args)?;
    let instance:Rc<dyn GraphInstance> = params.instance.clone();
    info!("coloring strategy: {}", params.coloring);

    // solve it
    let config = BnbConfig { coloring: params.coloring, ..BnbConfig::default() };
    let mut bnb = LpCliqueBnb::new(instance, GoodLpSolver::new(), config);
    let result = match params.time_limit {
        None => bnb.solve(NeverStoppingCriterion::default())?,
        Some(t) => {
            info!("time limit: {}", t);
            bnb.solve(TimeStoppingCriterion::new(t))?
        },
    };
    info!(
        "branch & bound took {:.3} seconds. Clique size: {}{}",
        result.stats.time_searched, result.size, if result.is_optimal { "" } else { " (not proven optimal)" }
    );
    println!("Maximum clique size: {}", result.size);
    println!("Nodes: {:?}", result.clique.iter().map(|v| v+1).collect::<Vec<_>>());
    let stats = json!({
        "primal_list": result.primal_list,
        "time_searched": result.stats.time_searched,
        "inst_name": params.inst_filename,
        "is_optimal": result.is_optimal,
        "search": result.stats,
    });

    // export results
    export_results(
        &params.instance,
        &result.clique,
        &stats,
        params.perf_file.as_deref(),
        params.sol_file.as_deref(),
    )
}

pub fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}
