//! Times generation of a large dataset with a random seed.
//! Run with `RUST_LOG=warn cargo run --release --example benchmark`

use std::error::Error;
use std::io;
use std::time::Instant;

use csv::WriterBuilder;
use log::warn;
use rand::{thread_rng, Rng};

use tx_generator::config::GeneratorConfig;
use tx_generator::dataset::Dataset;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = GeneratorConfig {
        num_users: 10_000,
        num_transactions: 250_000,
        num_records: 600,
        seed: thread_rng().gen(),
        ..GeneratorConfig::default()
    };
    warn!("Seed: {}", config.seed);

    let start = Instant::now();
    let dataset = Dataset::generate(&config)?;
    warn!("Generating took: {:.2?}", start.elapsed());

    let start_writing = Instant::now();
    let mut writer = WriterBuilder::new().from_writer(io::sink());
    dataset.write_transactions(&mut writer)?;
    let mut writer = WriterBuilder::new().from_writer(io::sink());
    dataset.write_merged(&mut writer)?;
    warn!("Writing took: {:.2?}", start_writing.elapsed());

    warn!("Total took: {:.2?}", start.elapsed());

    Ok(())
}
