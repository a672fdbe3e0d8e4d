use clap::Parser;
use featcloud::FeatsFileExtractor;
use log::error;
use query_kdir::*;
use std::io;
use std::path::PathBuf;
use std::process::exit;

#[derive(Parser, Debug)]
#[command(author, version, about = "Finds the images most similar to a query image", long_about = None)]
struct Cli {
    /// The yaml configuration file
    #[arg(short, long, default_value = "kdir.yml")]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let config = match QueryConfig::from_yaml(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("The configuration file {} couldn't be used: {}", cli.config.display(), e);
            exit(1);
        }
    };
    if let Err(e) = init_logger(config.level_filter(), &config.logger_filename) {
        eprintln!("Error: can't initialize the logger: {}", e);
        exit(1);
    }

    // Images are read through their sibling `.feats` files, extraction mode rewrites them in place.
    let extractor = FeatsFileExtractor::with_dim(config.pca_dimension);
    let session = match QuerySession::new(config, extractor) {
        Ok(session) => session,
        Err(e) => {
            error!("Unable to build the index: {}", e);
            exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = session.run(stdin.lock(), stdout.lock()) {
        error!("Query session failed: {}", e);
        exit(1);
    }
}
