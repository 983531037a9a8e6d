use std::fs;

use log::info;
use serde::{Serialize, Deserialize};

use crate::color::conflict_count;
use crate::error::ColoringError;
use crate::generator::erdos_renyi;
use crate::report::Reporter;
use crate::search::decentralized::{
    run_search, Evaluation, SearchConfig, DEFAULT_HOLD, DEFAULT_MAX_ITERATIONS
};

/** parameters of a sweep over palette sizes.
For each palette size in [start_colors, end_colors], a fresh random graph is built
and colored.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// number of vertices of each generated graph
    pub nb_vertices: usize,
    /// edge probability of each generated graph
    pub edge_probability: f64,
    /// first palette size
    pub start_colors: usize,
    /// last palette size (included)
    pub end_colors: usize,
    /// iteration budget of each search
    pub max_iterations: usize,
    /// reset period of each search
    pub hold: usize,
    /// base seed (graph and search seeds are derived from it)
    pub seed: u64,
    /// conflict evaluation strategy
    pub evaluation: Evaluation,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            nb_vertices: 50,
            edge_probability: 0.3,
            start_colors: 2,
            end_colors: 10,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            hold: DEFAULT_HOLD,
            seed: 0,
            evaluation: Evaluation::default(),
        }
    }
}

impl SweepConfig {
    /// reads a sweep configuration from a json file (missing fields take their default value)
    pub fn from_file(filename:&str) -> Result<Self, ColoringError> {
        let content = fs::read_to_string(filename)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// checks the configuration
    pub fn validate(&self) -> Result<(), ColoringError> {
        if self.start_colors < 1 {
            return Err(ColoringError::InvalidPaletteSize(self.start_colors));
        }
        if self.start_colors > self.end_colors {
            return Err(ColoringError::InvalidColorRange {
                start: self.start_colors, end: self.end_colors
            });
        }
        if self.nb_vertices == 0 {
            return Err(ColoringError::EmptyGraph);
        }
        if !(0. ..=1.).contains(&self.edge_probability) {
            return Err(ColoringError::InvalidEdgeProbability(self.edge_probability));
        }
        if self.max_iterations < 1 {
            return Err(ColoringError::InvalidMaxIterations(self.max_iterations));
        }
        if self.hold < 1 {
            return Err(ColoringError::InvalidHold(self.hold));
        }
        Ok(())
    }

    /// seed used for the graph and the search of a given palette size
    pub fn run_seed(&self, palette_size:usize) -> u64 {
        self.seed.wrapping_mul(1_000_003).wrapping_add(palette_size as u64)
    }

    /// search configuration for a given palette size
    pub fn search_config(&self, palette_size:usize) -> SearchConfig {
        SearchConfig {
            palette_size,
            max_iterations: self.max_iterations,
            hold: self.hold,
            seed: self.run_seed(palette_size),
            evaluation: self.evaluation,
        }
    }
}


/// result of the search for one palette size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepRecord {
    /// number of colors
    pub palette_size: usize,
    /// number of vertices of the generated graph
    pub nb_vertices: usize,
    /// number of edges of the generated graph
    pub nb_edges: usize,
    /// conflicts of the best coloring found
    pub conflicts: usize,
    /// number of sweeps used by the search
    pub iterations: usize,
    /// seed used for the graph and the search
    pub seed: u64,
}


/**
for each palette size, generates a graph, colors it, and records the number of
remaining conflicts. Every run is given to each reporter.
*/
pub fn color_vs_conflicts(
    config:&SweepConfig,
    reporters:&mut [Box<dyn Reporter>],
) -> Result<Vec<SweepRecord>, ColoringError> {
    config.validate()?;
    let mut records = Vec::with_capacity(config.end_colors - config.start_colors + 1);
    for palette_size in config.start_colors..=config.end_colors {
        let search_config = config.search_config(palette_size);
        let graph = erdos_renyi(config.nb_vertices, config.edge_probability, search_config.seed)?;
        let result = run_search(&graph, &search_config)?;
        let conflicts = conflict_count(&graph, &result.elite);
        info!("number of conflicts for {} colors: {}", palette_size, conflicts);
        for reporter in reporters.iter_mut() {
            reporter.report_run(&graph, &search_config, &result)?;
        }
        records.push(SweepRecord {
            palette_size,
            nb_vertices: graph.nb_vertices(),
            nb_edges: graph.nb_edges(),
            conflicts,
            iterations: result.iterations,
            seed: search_config.seed,
        });
    }
    for reporter in reporters.iter_mut() {
        reporter.report_sweep(&records)?;
    }
    Ok(records)
}
