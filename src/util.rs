use std::io::Write;
use std::rc::Rc;
use std::time::Instant;

use clap::ArgMatches;
use env_logger::{Builder, Env};
use log::{LevelFilter, info, warn};
use serde_json::Value;

use crate::{
    color::{GraphInstance, VertexId, CheckerResult, clique_checker},
    dimacs::DimacsInstance,
    error::{CliqueError, Result},
    search::coloring_strategy::ColoringStrategy,
};

/** command line parameters of the solver executables */
#[derive(Debug)]
pub struct Params {
    /// instance filename
    pub inst_filename: String,
    /// instance
    pub instance: Rc<DimacsInstance>,
    /// time limit in seconds (None: no limit)
    pub time_limit: Option<f32>,
    /// coloring heuristic generating the independent set cuts
    pub coloring: ColoringStrategy,
    /// where to write the solution
    pub sol_file: Option<String>,
    /// where to write the statistics
    pub perf_file: Option<String>,
}

/** installs the logger. RUST_LOG takes precedence, otherwise the level is info
increased by the verbosity. Every line is prefixed by the elapsed time. */
pub fn init_logger(verbosity:u64) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let t_start = Instant::now();
    let env = Env::default().default_filter_or(level.as_str());
    // try_init: a logger may already be installed (tests)
    let _ = Builder::from_env(env)
        .format(move |buf, record| {
            let elapsed = t_start.elapsed().as_millis();
            writeln!(buf, "{:>6}.{:03} [{}] {}", elapsed / 1000, elapsed % 1000, record.level(), record.args())
        })
        .try_init();
}

/** reads command line input and the instance */
pub fn read_params(main_args:&ArgMatches) -> Result<Params> {
    let inst_filename = main_args.value_of("instance")
        .ok_or_else(|| CliqueError::InvalidArgument("missing instance".to_string()))?;
    let time_limit = match main_args.value_of("time") {
        None => None,
        Some(t) => Some(t.parse::<f32>().map_err(|_|
            CliqueError::InvalidArgument(format!("unable to parse the time given ({})", t))
        )?),
    };
    let mut coloring = match main_args.value_of("coloring") {
        None => ColoringStrategy::default(),
        Some(s) => s.parse::<ColoringStrategy>()?,
    };
    if let Some(seed) = main_args.value_of("seed") {
        let seed = seed.parse::<u64>().map_err(|_|
            CliqueError::InvalidArgument(format!("unable to parse the seed given ({})", seed))
        )?;
        coloring = coloring.with_seed(seed);
    }
    // read value of the solution filename
    let sol_file = main_args.value_of("solution").map(|e| {
        info!("printing solutions in: {}", e);
        e.to_string()
    });
    // read value of the performance logs filename
    let perf_file = main_args.value_of("perf").map(|e| {
        info!("printing perfs in: {}", e);
        e.to_string()
    });
    info!("reading instance: {}...", inst_filename);
    let instance = Rc::new(DimacsInstance::from_file(inst_filename)?);
    instance.display_statistics();
    info!("=======================");
    Ok(Params {
        inst_filename: inst_filename.to_string(),
        instance,
        time_limit,
        coloring,
        sol_file,
        perf_file,
    })
}

/// exports search results to files
pub fn export_results(
    instance:&DimacsInstance,
    clique:&[VertexId],
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
) -> Result<()> {
    // export statistics
    if let Some(filename) = perf_file {
        let content = serde_json::to_string(stats)
            .map_err(|e| CliqueError::InvalidArgument(format!("unable to serialize statistics: {}", e)))?;
        std::fs::write(filename, content)
            .map_err(|source| CliqueError::Io { path: filename.to_string(), source })?;
    }
    // export solution
    if let Some(filename) = sol_file {
        match clique_checker(instance, clique) {
            CheckerResult::Ok(_) => {},
            checker_result => { warn!("invalid solution (reason: {:?})", checker_result) }
        };
        instance.write_solution(filename, clique)?;
    }
    Ok(())
}
