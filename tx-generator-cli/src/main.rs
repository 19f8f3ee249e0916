use std::error::Error;
use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime, SubsecRound};
use clap::{ArgEnum, Parser};
use csv::WriterBuilder;
use log::info;

use tx_generator::config::{
    GeneratorConfig, DEFAULT_NUM_RECORDS, DEFAULT_NUM_TRANSACTIONS, DEFAULT_NUM_USERS,
    DEFAULT_SEED,
};
use tx_generator::dataset::{Dataset, MERGED_FILE, TRANSACTIONS_FILE};
use tx_generator::user::IdStrategy;

#[derive(ArgEnum, Clone, Copy, Debug)]
enum IdScheme {
    /// YYMMDDLLNNNN identifiers with display names
    Encoded,
    /// Zero-padded sequential identifiers
    Sequential,
}

impl From<IdScheme> for IdStrategy {
    fn from(scheme: IdScheme) -> Self {
        match scheme {
            IdScheme::Encoded => IdStrategy::EncodedAttributes,
            IdScheme::Sequential => IdStrategy::Sequential,
        }
    }
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Number of synthetic users
    #[clap(long, default_value_t = DEFAULT_NUM_USERS)]
    pub(crate) users: usize,
    /// Maximum number of rows in the transaction table
    #[clap(long, default_value_t = DEFAULT_NUM_TRANSACTIONS)]
    pub(crate) transactions: usize,
    /// Target number of rows in the merged table
    #[clap(long, default_value_t = DEFAULT_NUM_RECORDS)]
    pub(crate) records: usize,
    /// Seed for the random stream
    #[clap(long, default_value_t = DEFAULT_SEED)]
    pub(crate) seed: u64,
    /// How user identifiers are built
    #[clap(long, arg_enum, default_value = "encoded")]
    pub(crate) id_scheme: IdScheme,
    /// Date-time months are counted back from, e.g. 2024-06-01T12:00:00 (defaults to now)
    #[clap(long)]
    pub(crate) reference_time: Option<NaiveDateTime>,
    /// Directory the CSV files are written to
    #[clap(long, parse(from_os_str), default_value = ".")]
    pub(crate) out_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = GeneratorConfig {
        num_users: cli.users,
        num_transactions: cli.transactions,
        num_records: cli.records,
        id_strategy: cli.id_scheme.into(),
        seed: cli.seed,
        reference_time: cli
            .reference_time
            .unwrap_or_else(|| Local::now().naive_local().trunc_subsecs(0)),
    };

    let dataset = Dataset::generate(&config)?;
    fs::create_dir_all(&cli.out_dir)?;

    let path = cli.out_dir.join(TRANSACTIONS_FILE);
    let mut writer = WriterBuilder::new().from_path(&path)?;
    dataset.write_transactions(&mut writer)?;
    info!(
        "Wrote {} transactions to {}",
        dataset.transactions().len(),
        path.display()
    );

    let path = cli.out_dir.join(MERGED_FILE);
    let mut writer = WriterBuilder::new().from_path(&path)?;
    dataset.write_merged(&mut writer)?;
    info!(
        "Wrote {} merged records to {}",
        dataset.merged().len(),
        path.display()
    );

    Ok(())
}
