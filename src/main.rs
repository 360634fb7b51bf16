mod app;
mod config;
mod database;
mod handlers;
mod middleware;
mod model;
mod views;

use std::process;
use std::sync::{Arc, Mutex};

use iron::Iron;
use log::{error, info};

use crate::config::Config;
use crate::database::Database;

// RUST_LOG=info,logger=info hermes_blog > logs 2>&1 &
fn main() {
    env_logger::init();

    let config = Config::default();
    let database = Arc::new(Mutex::new(Database::new()));

    match Iron::new(app::server(&config, database)).http(config.address.as_str()) {
        Ok(_listening) => info!("Blog app listening at http://{}", config.address),
        Err(e) => {
            error!("could not listen on {}: {}", config.address, e);
            process::exit(1);
        }
    }
}
