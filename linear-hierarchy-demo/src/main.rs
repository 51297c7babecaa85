//! Terminal demo for the hierarchy navigator.
//!
//! Usage: `linear-hierarchy-demo [document.json] [config.json]`

mod app;

use std::fs::{self, File};
use std::io;

use linear_hierarchy::{NavigatorConfig, parse_document};
use linear_hierarchy_demo::DEFAULT_DOCUMENT;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use app::App;

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("linear-hierarchy-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .map_err(io::Error::other)?;

    let mut args = std::env::args().skip(1);

    let document = match args.next() {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_DOCUMENT.to_string(),
    };
    let roots = parse_document(&document).map_err(io::Error::other)?;

    let config = match args.next() {
        Some(path) => NavigatorConfig::from_json(&fs::read_to_string(path)?)
            .map_err(io::Error::other)?,
        None => NavigatorConfig::default(),
    };

    info!("Starting demo with {} root nodes", roots.len());
    App::new(roots, config)?.run()
}
