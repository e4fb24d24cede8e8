use std::rc::Rc;
use std::str::FromStr;

use clap::ArgMatches;
use serde_json::Value;

use crate::error::Error;
use crate::graph::{Instance, VertexId};

/** reads the command line arguments shared by all solver binaries and loads
the instance. Returns (instance filename, instance, time limit,
solution filename, perf filename). A malformed instance aborts here, before
any solver executes. */
pub fn read_params(main_args:&ArgMatches) -> Result<(String, Rc<Instance>, f32, Option<String>, Option<String>), Error> {
    let inst_filename = main_args.value_of("instance").unwrap(); // required by clap
    let t:f32 = parse_param(main_args, "time")?;
    // read value of the solution filename
    let sol_file:Option<String> = match main_args.value_of("solution") {
        None => None,
        Some(e) => {
            println!("printing solutions in: {}", e);
            Some(e.to_string())
        }
    };
    // read value of the performance logs filename
    let perf_file:Option<String> = match main_args.value_of("perf") {
        None => None,
        Some(e) => {
            println!("printing perfs in: {}\n", e);
            Some(e.to_string())
        }
    };
    println!("reading instance: {}...", inst_filename);
    let instance = Rc::new(Instance::from_file(inst_filename)?);
    instance.display_statistics();
    println!("=======================");
    Ok((inst_filename.to_string(), instance, t, sol_file, perf_file))
}

/// parses a typed command line parameter, rejecting unparsable values
/// before the search starts
pub fn parse_param<T:FromStr>(main_args:&ArgMatches, name:&str) -> Result<T, Error> {
    main_args.value_of(name)
        .ok_or_else(|| Error::InvalidConfiguration(format!("missing parameter '{}'", name)))?
        .parse::<T>()
        .map_err(|_| Error::InvalidConfiguration(format!("unable to parse parameter '{}'", name)))
}

/// exports search statistics to a JSON file if one was requested
pub fn export_results(stats:&Value, perf_file:Option<String>) -> Result<(), Error> {
    match perf_file {
        None => Ok(()),
        Some(filename) => {
            std::fs::write(filename, serde_json::to_string(stats).unwrap() + "\n")?;
            Ok(())
        }
    }
}

/// writes a clique into a file, one 1-indexed vertex per line
/// (matching the DIMACS labels of the instance)
pub fn export_solution(filename:&str, clique:&[VertexId]) -> Result<(), Error> {
    let mut res = String::new();
    for v in clique {
        res += format!("{}\n", v+1).as_str();
    }
    std::fs::write(filename, res)?;
    Ok(())
}

/** strict timeout policy helper: turns an interrupted run into a
`SearchTimeout` for callers that prefer failing over a partial best. */
pub fn require_complete<T>(interrupted:bool, value:T) -> Result<T, Error> {
    if interrupted { Err(Error::SearchTimeout) } else { Ok(value) }
}
