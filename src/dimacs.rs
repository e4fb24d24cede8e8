use std::fs;

use log::warn;
use nom::IResult;
use nom::bytes::complete::tag;
use nom::character::complete::{alphanumeric1, digit1, space1};
use nom::combinator::map_res;
use nom::sequence::{preceded, separated_pair, tuple};

use crate::error::Error;
use crate::graph::{Instance, VertexId};

/** line-oriented DIMACS benchmark reader.
`c` lines and any line that is neither a `p` nor an `e` line (e.g. the
instance name header) are ignored. `p edge <n> <m>` (or `p col`) declares the
sizes; `e <a> <b>` declares a 1-indexed undirected edge. Self-loops are
discarded, duplicate edges are a no-op. A missing or malformed `p` line, a
malformed edge line or an endpoint outside `1..=n` is a `MalformedInput`
error: a broken file never yields a silently-empty graph. */
pub fn read_from_file(filename:&str) -> Result<Instance, Error> {
    let content = fs::read_to_string(filename)?;
    read_from_str(content.as_str())
}

/// reads an instance from the contents of a DIMACS file
pub fn read_from_str(content:&str) -> Result<Instance, Error> {
    let mut declared:Option<(usize,usize)> = None;
    let mut edge_list:Vec<(VertexId,VertexId)> = Vec::new();
    for (i,raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.starts_with("p ") {
            let (_,(n,m)) = read_header(line).map_err(|_| Error::MalformedInput(
                format!("line {}: invalid problem line {:?}", i+1, line)
            ))?;
            if declared.replace((n,m)).is_some() {
                return Err(Error::MalformedInput(
                    format!("line {}: duplicate problem line", i+1)
                ));
            }
        } else if line.starts_with("e ") {
            let (n,_) = declared.ok_or_else(|| Error::MalformedInput(
                format!("line {}: edge line before the problem line", i+1)
            ))?;
            let (_,(a,b)) = read_edge(line).map_err(|_| Error::MalformedInput(
                format!("line {}: invalid edge line {:?}", i+1, line)
            ))?;
            if a == 0 || b == 0 || a > n || b > n {
                return Err(Error::MalformedInput(
                    format!("line {}: vertex out of range 1..={}", i+1, n)
                ));
            }
            if a != b { // self-loops are discarded
                edge_list.push((a-1,b-1));
            }
        } // all other lines are ignored
    }
    let (n,m) = declared.ok_or_else(||
        Error::MalformedInput("missing problem line".to_string())
    )?;
    let inst = Instance::from_edge_list(n, &edge_list);
    // some benchmark files list each edge in both directions
    if inst.m() != m && 2*inst.m() != m {
        warn!("declared {} edges, parsed {} unique edges", m, inst.m());
    }
    Ok(inst)
}

/// reads an integer
fn integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads a problem line containing (n,m); the format token is free-form
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        tuple((tag("p"), space1, alphanumeric1, space1)),
        separated_pair(integer, space1, integer),
    )(s)
}

/// reads an edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        tuple((tag("e"), space1)),
        separated_pair(integer, space1, integer),
    )(s)
}
