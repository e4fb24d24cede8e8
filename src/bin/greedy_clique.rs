use std::time::Instant;

use clap::{App, ArgMatches, load_yaml};
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::json;

use max_clique::error::Error;
use max_clique::search::greedy::greedy_clique;
use max_clique::util::{export_results, export_solution, parse_param, read_params};

/** builds a single greedy maximal clique. */
pub fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
    let yaml = load_yaml!("greedy_clique.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(main_args:&ArgMatches) -> Result<(), Error> {
    let (inst_filename, instance, _, sol_file, perf_file) = read_params(main_args)?;
    let seed:u64 = parse_param(main_args, "seed")?;

    let t_start = Instant::now();
    let clique = greedy_clique(&instance, &mut StdRng::seed_from_u64(seed));
    let duration = t_start.elapsed().as_secs_f32();
    info!("clique size: {}, time(ms): {:.3}", clique.len(), duration*1000.);

    let stats = json!({
        "primal_list": vec![clique.len()],
        "time_searched": duration,
        "seed": seed,
        "inst_name": inst_filename,
    });
    export_results(&stats, perf_file)?;
    if let Some(filename) = sol_file {
        export_solution(filename.as_str(), &clique)?;
    }
    Ok(())
}
