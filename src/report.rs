use std::fs;

use log::info;
use serde_json::{json, Value};

use crate::color::Coloring;
use crate::error::ColoringError;
use crate::graph::Graph;
use crate::search::decentralized::{SearchConfig, SearchResult};
use crate::sweep::SweepRecord;

/** receives the colorings produced by the search (display, aggregation, export).
The search itself never calls a reporter.
*/
pub trait Reporter {
    /// called once per search run
    fn report_run(&mut self, graph:&Graph, config:&SearchConfig, result:&SearchResult) -> Result<(), ColoringError>;

    /// called once at the end of a sweep over palette sizes
    fn report_sweep(&mut self, records:&[SweepRecord]) -> Result<(), ColoringError>;
}


/// logs a summary of each run and the final (colors, conflicts) table
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report_run(&mut self, graph:&Graph, config:&SearchConfig, result:&SearchResult) -> Result<(), ColoringError> {
        info!(
            "{} vertices, {} edges, {} colors: {} conflicts after {} iterations",
            graph.nb_vertices(), graph.nb_edges(), config.palette_size,
            result.elite_conflicts, result.iterations
        );
        Ok(())
    }

    fn report_sweep(&mut self, records:&[SweepRecord]) -> Result<(), ColoringError> {
        info!("colors \t conflicts \t iterations");
        for r in records {
            info!("{} \t {} \t {}", r.palette_size, r.conflicts, r.iterations);
        }
        Ok(())
    }
}


/// collects every run and writes them, with the sweep table, into a json file
#[derive(Debug)]
pub struct JsonReporter {
    /// output file
    filename: String,
    /// runs reported so far
    runs: Vec<Value>,
}

impl JsonReporter {
    /// creates a reporter writing into filename
    pub fn new(filename:&str) -> Self {
        Self { filename: filename.to_string(), runs: Vec::new() }
    }
}

impl Reporter for JsonReporter {
    fn report_run(&mut self, _graph:&Graph, config:&SearchConfig, result:&SearchResult) -> Result<(), ColoringError> {
        self.runs.push(run_stats(config, result));
        Ok(())
    }

    fn report_sweep(&mut self, records:&[SweepRecord]) -> Result<(), ColoringError> {
        let stats = json!({
            "runs": self.runs,
            "records": records,
        });
        fs::write(&self.filename, serde_json::to_string(&stats)?)?;
        info!("sweep statistics written in {}", self.filename);
        Ok(())
    }
}


/// statistics of a run (configuration, conflicts, per-iteration history)
pub fn run_stats(config:&SearchConfig, result:&SearchResult) -> Value {
    let history:Vec<(usize,usize)> = result.trace.iter()
        .map(|o| (o.current_conflicts, o.elite_conflicts))
        .collect();
    json!({
        "config": config,
        "elite_conflicts": result.elite_conflicts,
        "iterations": result.iterations,
        "history": history,
    })
}

/** writes a string encoding the solution (use this to export the solution).
each line corresponds to a color class.
*/
pub fn solution_to_string(coloring:&Coloring) -> String {
    let mut res = String::default();
    for e in coloring.to_partition() {
        for v in e {
            res += format!("{} ", v).as_str();
        }
        res += "\n";
    }
    res
}

/** writes a solution into a file. each line corresponds to a color. */
pub fn write_solution(filename:&str, coloring:&Coloring) -> Result<(), ColoringError> {
    fs::write(filename, solution_to_string(coloring))?;
    Ok(())
}
