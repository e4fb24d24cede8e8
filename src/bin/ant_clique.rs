use clap::{App, ArgMatches, load_yaml};
use log::{error, warn};
use serde_json::json;

use max_clique::error::Error;
use max_clique::search::ant_colony::{AntColony, AntColonyConfig};
use max_clique::stopping::TimeStopping;
use max_clique::util::{export_results, export_solution, parse_param, read_params};

/** searches for a large clique using the ant colony heuristic. */
pub fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
    let yaml = load_yaml!("ant_clique.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(main_args:&ArgMatches) -> Result<(), Error> {
    let (inst_filename, instance, t, sol_file, perf_file) = read_params(main_args)?;
    let config = AntColonyConfig {
        num_ants: parse_param(main_args, "ants")?,
        taomin: parse_param(main_args, "taomin")?,
        taomax: parse_param(main_args, "taomax")?,
        alpha: parse_param(main_args, "alpha")?,
        rho: parse_param(main_args, "rho")?,
        max_cycles: parse_param(main_args, "cycles")?,
        seed: parse_param(main_args, "seed")?,
    };
    let parallel = main_args.is_present("parallel");

    // solve it
    let stopping = TimeStopping::new(t);
    let solver = AntColony::new(config.clone());
    let res = solver.run(&instance, parallel, &stopping)?;
    if res.interrupted {
        warn!("time limit reached after {} cycles", res.nb_cycles);
    }

    let stats = json!({
        "primal_list": vec![res.size],
        "time_searched": res.elapsed.as_secs_f32(),
        "time_to_best_ms": res.time_to_best_ms,
        "cycle_of_best": res.cycle_of_best,
        "nb_cycles": res.nb_cycles,
        "interrupted": res.interrupted,
        "parallel": parallel,
        "config": config,
        "inst_name": inst_filename,
    });
    export_results(&stats, perf_file)?;
    if let Some(filename) = sol_file {
        export_solution(filename.as_str(), &res.clique)?;
    }
    Ok(())
}
