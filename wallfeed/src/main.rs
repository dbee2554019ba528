use clap::Parser;
use std::process;

use wallfeed::FeedError;

mod cli;
mod services;
mod settings;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .format_timestamp_secs()
        .init();

    if let Err(e) = services::run(args).await {
        if e
            .downcast_ref::<FeedError>()
            .is_some_and(FeedError::is_cancelled)
        {
            eprintln!("Cancelled");
            process::exit(130);
        }
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
