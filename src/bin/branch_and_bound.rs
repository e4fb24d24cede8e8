use clap::{App, ArgMatches, load_yaml};
use log::{error, warn};
use serde_json::json;

use max_clique::error::Error;
use max_clique::search::branch_and_bound::BranchAndBound;
use max_clique::search::greedy::greedy_clique;
use max_clique::stopping::TimeStopping;
use max_clique::util::{export_results, export_solution, parse_param, read_params};

use rand::{SeedableRng, rngs::StdRng};

/** solves a maximum clique problem exactly using branch-and-bound. */
pub fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
    let yaml = load_yaml!("branch_and_bound.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(main_args:&ArgMatches) -> Result<(), Error> {
    let (inst_filename, instance, t, sol_file, perf_file) = read_params(main_args)?;

    // optionally seed the lower bound with a greedy maximal clique
    let mut lower_bound:usize = parse_param(main_args, "lb")?;
    let mut incumbent:Option<Vec<usize>> = None;
    if main_args.is_present("greedy_lb") {
        let greedy = greedy_clique(&instance, &mut StdRng::seed_from_u64(0));
        println!("greedy lower bound: {}", greedy.len());
        if greedy.len() > lower_bound {
            lower_bound = greedy.len();
            incumbent = Some(greedy);
        }
    }

    // solve it
    let stopping = TimeStopping::new(t);
    let mut solver = BranchAndBound::new(lower_bound);
    let res = solver.run(&instance, &stopping);
    if res.interrupted {
        warn!("time limit reached: the reported clique may not be maximum");
    }
    // fall back on the greedy incumbent if the bound was not beaten
    let best_clique = if res.clique.is_empty() {
        incumbent.unwrap_or_default()
    } else { res.clique.clone() };

    let stats = json!({
        "primal_list": vec![res.size],
        "time_searched": res.elapsed.as_secs_f32(),
        "nb_calls": res.nb_calls,
        "lower_bound": lower_bound,
        "interrupted": res.interrupted,
        "inst_name": inst_filename,
    });
    export_results(&stats, perf_file)?;
    if let Some(filename) = sol_file {
        export_solution(filename.as_str(), &best_clique)?;
    }
    Ok(())
}
