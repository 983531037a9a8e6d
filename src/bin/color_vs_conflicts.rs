use clap::{App, load_yaml};
use log::error;

use decentralized_color::error::ColoringError;
use decentralized_color::report::{Reporter, LogReporter, JsonReporter};
use decentralized_color::sweep::color_vs_conflicts;
use decentralized_color::util::read_sweep_config;


/** for each number of colors in a range, colors a fresh random graph and reports
the number of remaining conflicts */
fn run() -> Result<(), ColoringError> {
    // parse arguments
    let yaml = load_yaml!("color_vs_conflicts.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let config = read_sweep_config(&main_args)?;
    let mut reporters:Vec<Box<dyn Reporter>> = vec![Box::new(LogReporter)];
    if let Some(filename) = main_args.value_of("perf") {
        reporters.push(Box::new(JsonReporter::new(filename)));
    }
    let records = color_vs_conflicts(&config, &mut reporters)?;
    // colors / conflicts table on stdout
    for r in records {
        println!("{}\t{}", r.palette_size, r.conflicts);
    }
    Ok(())
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
