use fastrand::Rng;
use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::color::{Coloring, Color, VertexId, conflict_count, recolor_delta};
use crate::error::ColoringError;
use crate::graph::Graph;

/// default iteration budget
pub const DEFAULT_MAX_ITERATIONS:usize = 100;

/// default number of sweeps between two resets to the elite coloring
pub const DEFAULT_HOLD:usize = 20;

/** how a tentative recoloring is evaluated.
Both evaluations accept and reject exactly the same moves and consume the random
generator identically. They only differ in cost.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    /// recompute the conflict count over every edge: O(|E|) per trial
    FullRescan,
    /// only look at the edges incident to the recolored vertex: O(d(v)) per trial
    IncrementalDelta,
}

impl Default for Evaluation {
    fn default() -> Self { Evaluation::FullRescan }
}

fn default_max_iterations() -> usize { DEFAULT_MAX_ITERATIONS }
fn default_hold() -> usize { DEFAULT_HOLD }

/// parameters of a single search run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// number of colors k (colors are 1..=k)
    pub palette_size: usize,
    /// maximum number of sweeps
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// every `hold` sweeps, the current coloring is replaced by the elite one
    #[serde(default = "default_hold")]
    pub hold: usize,
    /// seed of the random generator
    #[serde(default)]
    pub seed: u64,
    /// conflict evaluation strategy
    #[serde(default)]
    pub evaluation: Evaluation,
}

impl SearchConfig {
    /// creates a configuration with the default budget and hold
    pub fn new(palette_size:usize, seed:u64) -> Self {
        Self {
            palette_size,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            hold: DEFAULT_HOLD,
            seed,
            evaluation: Evaluation::default(),
        }
    }

    /// checks the configuration against the graph to color
    pub fn validate(&self, graph:&Graph) -> Result<(), ColoringError> {
        if self.palette_size < 1 {
            return Err(ColoringError::InvalidPaletteSize(self.palette_size));
        }
        if graph.nb_vertices() == 0 {
            return Err(ColoringError::EmptyGraph);
        }
        if self.max_iterations < 1 {
            return Err(ColoringError::InvalidMaxIterations(self.max_iterations));
        }
        if self.hold < 1 {
            return Err(ColoringError::InvalidHold(self.hold));
        }
        Ok(())
    }
}


/// what happened during one sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepOutcome {
    /// sweep number (starts at 1)
    pub iteration: usize,
    /// number of accepted recolorings
    pub nb_accepted: usize,
    /// conflicts of the current coloring at the end of the sweep (before a reset)
    pub current_conflicts: usize,
    /// conflicts of the elite coloring after the sweep
    pub elite_conflicts: usize,
    /// true if the current coloring became the new elite
    pub promoted: bool,
    /// true if the current coloring was reset to the elite
    pub reset: bool,
}


/// output of a search run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// best coloring found
    pub elite: Coloring,
    /// number of conflicts of the elite coloring
    pub elite_conflicts: usize,
    /// number of sweeps performed
    pub iterations: usize,
    /// one entry per sweep
    pub trace: Vec<SweepOutcome>,
}


/** randomized conflict-minimizing local search.

Each sweep visits the vertices in a freshly shuffled order. Every vertex draws a
color uniformly in the palette (possibly its own) and keeps it only if it strictly
reduces the number of conflicts. After a sweep, a strictly better coloring becomes
the elite one, and every `hold` sweeps the current coloring is reset to the elite.

The random generator is consumed in a fixed order: the initial coloring, then for
each sweep the shuffle followed by one draw per visited vertex.
*/
#[derive(Debug)]
pub struct LocalSearch<'a> {
    /// graph to color
    graph: &'a Graph,
    /// run parameters
    config: SearchConfig,
    /// random number generator
    rng: Rng,
    /// visiting order (shuffled at each sweep)
    order: Vec<VertexId>,
    /// coloring being modified
    current: Coloring,
    /// number of conflicts of the current coloring
    current_conflicts: usize,
    /// best coloring seen so far
    elite: Coloring,
    /// number of conflicts of the elite coloring
    elite_conflicts: usize,
    /// number of sweeps performed
    iteration: usize,
    /// sweep history
    trace: Vec<SweepOutcome>,
}

impl<'a> LocalSearch<'a> {

    /** builds the initial state: random coloring, elite = copy of it.
    fails if the configuration is invalid (before consuming any randomness).
    */
    pub fn new(graph:&'a Graph, config:SearchConfig) -> Result<Self, ColoringError> {
        config.validate(graph)?;
        let mut rng = Rng::with_seed(config.seed);
        let current = Coloring::random(graph.nb_vertices(), config.palette_size, &mut rng);
        let current_conflicts = conflict_count(graph, &current);
        debug!("initial coloring: {} conflicts", current_conflicts);
        Ok(Self {
            graph,
            rng,
            order: graph.vertices().collect(),
            elite: current.clone(),
            elite_conflicts: current_conflicts,
            current,
            current_conflicts,
            iteration: 0,
            trace: Vec::new(),
            config,
        })
    }

    /// current coloring
    pub fn current(&self) -> &Coloring { &self.current }

    /// conflicts of the current coloring
    pub fn current_conflicts(&self) -> usize { self.current_conflicts }

    /// best coloring seen so far
    pub fn elite(&self) -> &Coloring { &self.elite }

    /// conflicts of the best coloring seen so far
    pub fn elite_conflicts(&self) -> usize { self.elite_conflicts }

    /// number of sweeps performed
    pub fn iteration(&self) -> usize { self.iteration }

    /// run parameters
    pub fn config(&self) -> &SearchConfig { &self.config }

    /// true if the search should stop (no conflict left or budget exhausted)
    pub fn is_finished(&self) -> bool {
        self.current_conflicts == 0 || self.iteration >= self.config.max_iterations
    }

    /** tries to recolor v with c. Keeps it if the conflict count strictly decreases.
    returns true if the move is accepted.
    */
    fn try_recolor(&mut self, v:VertexId, c:Color) -> bool {
        match self.config.evaluation {
            Evaluation::FullRescan => {
                let previous_color = self.current.get(v);
                self.current.set(v, c);
                let new_conflicts = conflict_count(self.graph, &self.current);
                if new_conflicts < self.current_conflicts {
                    self.current_conflicts = new_conflicts;
                    true
                } else {
                    self.current.set(v, previous_color);
                    false
                }
            },
            Evaluation::IncrementalDelta => {
                let delta = recolor_delta(self.graph, &self.current, v, c);
                if delta < 0 {
                    self.current.set(v, c);
                    self.current_conflicts -= (-delta) as usize;
                    true
                } else {
                    false
                }
            }
        }
    }

    /** performs one sweep: shuffle, one recoloring trial per vertex (in sequence),
    then elite promotion and periodic reset.
    */
    pub fn sweep(&mut self) -> SweepOutcome {
        self.iteration += 1;
        self.rng.shuffle(&mut self.order);
        let mut nb_accepted = 0;
        for i in 0..self.order.len() {
            let v = self.order[i];
            let c = self.rng.usize(1..=self.config.palette_size);
            if self.try_recolor(v, c) {
                nb_accepted += 1;
            }
        }
        debug!("iteration: {}\tconflicts: {}", self.iteration, self.current_conflicts);
        let current_conflicts = self.current_conflicts;
        // strict improvement only
        let promoted = self.current_conflicts < self.elite_conflicts;
        if promoted {
            self.elite = self.current.clone();
            self.elite_conflicts = self.current_conflicts;
        }
        let reset = self.iteration % self.config.hold == 0;
        if reset {
            self.current = self.elite.clone();
            self.current_conflicts = self.elite_conflicts;
        }
        let outcome = SweepOutcome {
            iteration: self.iteration,
            nb_accepted,
            current_conflicts,
            elite_conflicts: self.elite_conflicts,
            promoted,
            reset,
        };
        self.trace.push(outcome);
        outcome
    }

    /// sweeps until the search is finished
    pub fn run(&mut self) {
        while !self.is_finished() {
            self.sweep();
        }
        info!(
            "search finished after {} iterations: {} conflicts ({} colors)",
            self.iteration, self.elite_conflicts, self.config.palette_size
        );
    }

    /// consumes the search and returns its elite coloring
    pub fn into_result(self) -> SearchResult {
        SearchResult {
            elite: self.elite,
            elite_conflicts: self.elite_conflicts,
            iterations: self.iteration,
            trace: self.trace,
        }
    }
}


/**
Runs the local search on a graph with a fixed palette until no conflict remains or
the iteration budget is exhausted. Returns the best coloring found, which may still
contain conflicts.
*/
pub fn run_search(graph:&Graph, config:&SearchConfig) -> Result<SearchResult, ColoringError> {
    let mut search = LocalSearch::new(graph, config.clone())?;
    search.run();
    Ok(search.into_result())
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::generator::{erdos_renyi, complete_graph};

    fn config(k:usize, seed:u64) -> SearchConfig { SearchConfig::new(k, seed) }

    #[test]
    fn test_single_edge_is_colored() {
        let g = Graph::new(2, &[(0,1)]).unwrap();
        let solved = (0..20).any(|seed| {
            run_search(&g, &config(2, seed)).unwrap().elite_conflicts == 0
        });
        assert!(solved);
    }

    #[test]
    fn test_triangle_with_two_colors() {
        let g = complete_graph(3).unwrap();
        for seed in 0..50 {
            let res = run_search(&g, &config(2, seed)).unwrap();
            assert_eq!(res.elite_conflicts, 1);
            assert_eq!(res.iterations, DEFAULT_MAX_ITERATIONS);
        }
        for max_iterations in 1..5 {
            let mut c = config(2, max_iterations as u64);
            c.max_iterations = max_iterations;
            let res = run_search(&g, &c).unwrap();
            assert!(res.elite_conflicts >= 1);
            assert_eq!(res.iterations, max_iterations);
        }
    }

    #[test]
    fn test_empty_graph_needs_no_sweep() {
        let g = Graph::new(8, &[]).unwrap();
        for k in 1..4 {
            let res = run_search(&g, &config(k, 1)).unwrap();
            assert_eq!(res.elite_conflicts, 0);
            assert_eq!(res.iterations, 0);
            assert!(res.trace.is_empty());
        }
    }

    #[test]
    fn test_hold_one_resets_every_sweep() {
        let g = erdos_renyi(30, 0.4, 5).unwrap();
        let mut c = config(3, 11);
        c.hold = 1;
        let mut search = LocalSearch::new(&g, c).unwrap();
        while !search.is_finished() {
            let outcome = search.sweep();
            assert!(outcome.reset);
            assert_eq!(search.current(), search.elite());
            assert_eq!(search.current_conflicts(), search.elite_conflicts());
        }
    }

    #[test]
    fn test_elite_is_consistent() {
        let g = erdos_renyi(40, 0.3, 2).unwrap();
        for k in 2..7 {
            let res = run_search(&g, &config(k, k as u64)).unwrap();
            assert_eq!(res.elite_conflicts, conflict_count(&g, &res.elite));
            assert!(res.elite.within_palette(k));
        }
    }

    #[test]
    fn test_elite_is_non_increasing() {
        let g = erdos_renyi(40, 0.5, 9).unwrap();
        let res = run_search(&g, &config(4, 3)).unwrap();
        assert_eq!(res.trace.len(), res.iterations);
        for w in res.trace.windows(2) {
            assert!(w[1].elite_conflicts <= w[0].elite_conflicts);
        }
        for o in &res.trace {
            assert!(o.elite_conflicts <= o.current_conflicts);
            if o.promoted {
                assert_eq!(o.elite_conflicts, o.current_conflicts);
            }
        }
    }

    #[test]
    fn test_elite_is_minimum_seen() {
        let g = erdos_renyi(25, 0.5, 4).unwrap();
        let mut search = LocalSearch::new(&g, config(3, 8)).unwrap();
        let mut minimum = search.current_conflicts();
        while !search.is_finished() {
            let outcome = search.sweep();
            minimum = minimum.min(outcome.current_conflicts);
            assert_eq!(search.elite_conflicts(), minimum);
        }
    }

    #[test]
    fn test_deterministic() {
        let g = erdos_renyi(50, 0.3, 17).unwrap();
        let a = run_search(&g, &config(5, 1234)).unwrap();
        let b = run_search(&g, &config(5, 1234)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_incremental_delta_matches_full_rescan() {
        for seed in 0..10 {
            let g = erdos_renyi(35, 0.35, seed).unwrap();
            for k in 2..6 {
                let full = config(k, seed * 31 + k as u64);
                let mut incremental = full.clone();
                incremental.evaluation = Evaluation::IncrementalDelta;
                assert_eq!(run_search(&g, &full).unwrap(), run_search(&g, &incremental).unwrap());
            }
        }
    }

    #[test]
    fn test_huge_budget_on_easy_graph() {
        let g = Graph::new(2, &[(0,1)]).unwrap();
        let mut c = config(2, 6);
        c.max_iterations = usize::MAX / 2;
        let res = run_search(&g, &c).unwrap();
        assert_eq!(res.elite_conflicts, 0);
        assert!(res.iterations < 1000);
        assert_eq!(res.trace.len(), res.iterations);
    }

    #[test]
    fn test_stops_at_zero_conflicts() {
        let g = erdos_renyi(20, 0.1, 3).unwrap();
        let res = run_search(&g, &config(6, 0)).unwrap();
        if res.iterations < DEFAULT_MAX_ITERATIONS {
            assert_eq!(res.elite_conflicts, 0);
        }
    }

    #[test]
    fn test_invalid_configurations() {
        let g = Graph::new(2, &[(0,1)]).unwrap();
        assert!(matches!(run_search(&g, &config(0, 0)), Err(ColoringError::InvalidPaletteSize(0))));
        let mut c = config(2, 0);
        c.max_iterations = 0;
        assert!(matches!(run_search(&g, &c), Err(ColoringError::InvalidMaxIterations(0))));
        let mut c = config(2, 0);
        c.hold = 0;
        assert!(matches!(run_search(&g, &c), Err(ColoringError::InvalidHold(0))));
        let empty = Graph::new(0, &[]).unwrap();
        assert!(matches!(run_search(&empty, &config(2, 0)), Err(ColoringError::EmptyGraph)));
    }

    #[test]
    fn test_config_from_json() {
        let c:SearchConfig = serde_json::from_str(
            r#"{"palette_size": 4, "evaluation": "incremental_delta"}"#
        ).unwrap();
        assert_eq!(c.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(c.hold, DEFAULT_HOLD);
        assert_eq!(c.seed, 0);
        assert_eq!(c.evaluation, Evaluation::IncrementalDelta);
    }
}
