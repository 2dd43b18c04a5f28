use clap::Parser;
use podarchive::{cli, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = logging::init_logging() {
        eprintln!("{err:#}");
    }

    if let Err(err) = cli::run(cli::Cli::parse()).await {
        eprintln!("podarchive error: {err:#}");
        std::process::exit(1);
    }
}
