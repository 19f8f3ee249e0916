use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::error::GenError;
use crate::ledger::MONTHS;
use crate::user::IdStrategy;

pub const DEFAULT_NUM_USERS: usize = 84;
pub const DEFAULT_NUM_TRANSACTIONS: usize = 2000;
pub const DEFAULT_NUM_RECORDS: usize = 500;
pub const DEFAULT_SEED: u64 = 42;

/// Parameters of one generation run.
///
/// Two runs with equal configs, including `reference_time`, produce identical
/// tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Users to create
    pub num_users: usize,
    /// Upper bound on rows in the transaction table
    pub num_transactions: usize,
    /// Target rows in the merged table, rounded down to whole users
    pub num_records: usize,
    pub id_strategy: IdStrategy,
    pub seed: u64,
    /// The "now" that every month is counted back from
    pub reference_time: NaiveDateTime,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            num_users: DEFAULT_NUM_USERS,
            num_transactions: DEFAULT_NUM_TRANSACTIONS,
            num_records: DEFAULT_NUM_RECORDS,
            id_strategy: IdStrategy::default(),
            seed: DEFAULT_SEED,
            reference_time: Local::now().naive_local().trunc_subsecs(0),
        }
    }
}

impl GeneratorConfig {
    /// # Errors
    /// Errors when a count is zero, or `num_records` is too small to hold a
    /// single user's months.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.num_users == 0 {
            return Err(GenError::InvalidConfig(
                "the number of users must be positive".to_owned(),
            ));
        }
        if self.num_transactions == 0 {
            return Err(GenError::InvalidConfig(
                "the number of transactions must be positive".to_owned(),
            ));
        }
        if self.num_records < MONTHS as usize {
            return Err(GenError::InvalidConfig(format!(
                "the number of merged records must be at least {}, got {}",
                MONTHS, self.num_records
            )));
        }
        Ok(())
    }
}
