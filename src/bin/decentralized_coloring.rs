use std::time::Instant;

use clap::{App, load_yaml};
use log::{error, info};

use decentralized_color::error::ColoringError;
use decentralized_color::search::decentralized::run_search;
use decentralized_color::util::{read_search_params, export_results};


/** colors a graph (DIMACS file or random graph) with a fixed number of colors */
fn run() -> Result<(), ColoringError> {
    // parse arguments
    let yaml = load_yaml!("decentralized_coloring.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let params = read_search_params(&main_args)?;
    let time_init = Instant::now();
    // solve it
    let result = run_search(&params.graph, &params.config)?;
    let time_searched = time_init.elapsed().as_secs_f32();
    info!("number of conflicts for {} colors: {}", params.config.palette_size, result.elite_conflicts);
    info!("iterations: {}\t time: {:.3}s", result.iterations, time_searched);
    // export results
    export_results(&params, &result, time_searched, main_args.is_present("check"))
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
