use std::fs;
use std::str::FromStr;

use clap::ArgMatches;
use log::{info, warn};
use serde_json::json;

use crate::{
    color::{CheckerResult, checker},
    error::ColoringError,
    generator::erdos_renyi,
    graph::Graph,
    report::{run_stats, write_solution},
    search::decentralized::{Evaluation, SearchConfig, SearchResult},
    sweep::SweepConfig,
};

/// parameters of a single search, read from the command line
#[derive(Debug)]
pub struct SearchParams {
    /// instance name ("random" for a generated graph)
    pub inst_name: String,
    /// graph to color
    pub graph: Graph,
    /// search configuration
    pub config: SearchConfig,
    /// solution file (if any)
    pub sol_file: Option<String>,
    /// performance statistics file (if any)
    pub perf_file: Option<String>,
}

/// parses an optional argument, returns None if absent
pub fn parse_arg<T:FromStr>(main_args:&ArgMatches, name:&str) -> Result<Option<T>, ColoringError> {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|_|
            ColoringError::Parse(format!("unable to parse argument {} (given: {})", name, s))
        )
    }
}

/// reads an optional file name argument
fn read_filename(main_args:&ArgMatches, name:&str) -> Option<String> {
    main_args.value_of(name).map(|e| {
        info!("printing {} in: {}", name, e);
        e.to_string()
    })
}

/** reads command line input and returns the graph, the search configuration and
the output files. The graph is read from a DIMACS file (--instance), or generated
(--nodes, --probability) if no instance is given.
*/
pub fn read_search_params(main_args:&ArgMatches) -> Result<SearchParams, ColoringError> {
    let palette_size:usize = parse_arg(main_args, "colors")?
        .ok_or_else(|| ColoringError::Parse("missing number of colors".to_string()))?;
    let mut config = SearchConfig::new(palette_size, parse_arg(main_args, "seed")?.unwrap_or(0));
    if let Some(max_iterations) = parse_arg(main_args, "iterations")? {
        config.max_iterations = max_iterations;
    }
    if let Some(hold) = parse_arg(main_args, "hold")? {
        config.hold = hold;
    }
    if main_args.is_present("incremental") {
        config.evaluation = Evaluation::IncrementalDelta;
    }
    let (inst_name, graph) = match main_args.value_of("instance") {
        Some(inst_filename) => {
            info!("reading instance: {}...", inst_filename);
            (inst_filename.to_string(), Graph::from_dimacs_file(inst_filename)?)
        },
        None => {
            let n:usize = parse_arg(main_args, "nodes")?.unwrap_or(50);
            let p:f64 = parse_arg(main_args, "probability")?.unwrap_or(0.3);
            let graph_seed:u64 = parse_arg(main_args, "graph_seed")?.unwrap_or(config.seed);
            info!("generating random graph G({}, {})...", n, p);
            ("random".to_string(), erdos_renyi(n, p, graph_seed)?)
        }
    };
    graph.display_statistics();
    info!("=======================");
    Ok(SearchParams {
        inst_name,
        graph,
        config,
        sol_file: read_filename(main_args, "solution"),
        perf_file: read_filename(main_args, "perf"),
    })
}

/** reads the sweep configuration: from a json file (--config) if given,
then overridden by the command line arguments.
*/
pub fn read_sweep_config(main_args:&ArgMatches) -> Result<SweepConfig, ColoringError> {
    let mut config = match main_args.value_of("config") {
        None => SweepConfig::default(),
        Some(filename) => SweepConfig::from_file(filename)?,
    };
    if let Some(n) = parse_arg(main_args, "nodes")? { config.nb_vertices = n; }
    if let Some(p) = parse_arg(main_args, "probability")? { config.edge_probability = p; }
    if let Some(c) = parse_arg(main_args, "start")? { config.start_colors = c; }
    if let Some(c) = parse_arg(main_args, "end")? { config.end_colors = c; }
    if let Some(i) = parse_arg(main_args, "iterations")? { config.max_iterations = i; }
    if let Some(h) = parse_arg(main_args, "hold")? { config.hold = h; }
    if let Some(s) = parse_arg(main_args, "seed")? { config.seed = s; }
    if main_args.is_present("incremental") {
        config.evaluation = Evaluation::IncrementalDelta;
    }
    config.validate()?;
    Ok(config)
}

/// exports search results to files
pub fn export_results(
    params:&SearchParams,
    result:&SearchResult,
    time_searched:f32,
    check_result:bool,
) -> Result<(), ColoringError> {
    // export statistics
    if let Some(filename) = &params.perf_file {
        let mut stats = run_stats(&params.config, result);
        stats["inst_name"] = json!(params.inst_name);
        stats["time_searched"] = json!(time_searched);
        fs::write(filename, serde_json::to_string(&stats)?)?;
    }
    // export solution
    if let Some(filename) = &params.sol_file {
        if check_result {
            match checker(&params.graph, &result.elite, params.config.palette_size) {
                CheckerResult::Ok(nb_colors) => info!("proper coloring using {} colors", nb_colors),
                CheckerResult::Conflicts(nb, (u,v)) => {
                    info!("{} conflicting edges remaining (first one: {} {})", nb, u, v)
                },
                checker_result => warn!("invalid solution (reason: {:?})", checker_result),
            };
        }
        write_solution(filename, &result.elite)?;
    }
    Ok(())
}
