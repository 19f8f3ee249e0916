use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime};
use log::{debug, info};
use rand::seq::index;

use crate::error::GenError;
use crate::rng::DatasetRng;
use crate::transaction::{sample_month, Transaction};
use crate::user::User;

/// Months of history generated for every user
pub const MONTHS: u32 = 6;

/// Months are fixed 30 day strides back from the reference time, not calendar
/// months.
pub const DAYS_PER_MONTH: i64 = 30;

/// Reference date-time of the month `offset` strides before `reference_time`
#[must_use]
pub fn month_reference(reference_time: NaiveDateTime, offset: u32) -> NaiveDateTime {
    reference_time - Duration::days(DAYS_PER_MONTH * i64::from(offset))
}

/// The transaction table
#[derive(Debug, Default)]
pub struct Ledger {
    pub(crate) transactions: Vec<Transaction>,
}

impl Ledger {
    /// Samples [`MONTHS`] months of spending for every user, in user order,
    /// then caps the table at `target` rows.
    ///
    /// # Errors
    /// Errors when a month of transactions cannot be sampled
    pub fn generate(
        rng: &mut DatasetRng,
        users: &[User],
        reference_time: NaiveDateTime,
        target: usize,
    ) -> Result<Self, GenError> {
        let mut ledger = Ledger::default();
        for user in users {
            for offset in 0..MONTHS {
                ledger.record_month(rng, &user.user_id, month_reference(reference_time, offset))?;
            }
        }
        info!(
            "Sampled {} transactions for {} users",
            ledger.transactions.len(),
            users.len()
        );
        ledger.cap_to(rng, target);
        Ok(ledger)
    }

    /// # Errors
    /// Errors when the month cannot be sampled
    pub fn record_month(
        &mut self,
        rng: &mut DatasetRng,
        user_id: &str,
        month_start: NaiveDateTime,
    ) -> Result<(), GenError> {
        let month = sample_month(rng, user_id, month_start)?;
        debug!(
            "{} transactions for {} from {}",
            month.len(),
            user_id,
            month_start
        );
        self.transactions.extend(month);
        Ok(())
    }

    /// Uniformly subsamples the table, without replacement, down to `target`
    /// rows. The kept rows come out in draw order. A table already at or under
    /// `target` is left untouched and no randomness is consumed.
    pub fn cap_to(&mut self, rng: &mut DatasetRng, target: usize) {
        let len = self.transactions.len();
        if len <= target {
            return;
        }
        let kept = index::sample(rng, len, target);
        self.transactions = kept
            .iter()
            .map(|i| self.transactions[i].clone())
            .collect();
        info!("Subsampled transactions from {} down to {}", len, target);
    }

    /// User ids in the order they are first seen in the table
    #[must_use]
    pub fn distinct_users(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.transactions
            .iter()
            .map(|tx| tx.user_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// A user's transactions in the 30 day window ending at `window_end`.
    /// The start of the window is excluded, the end included.
    pub fn window<'a>(
        &'a self,
        user_id: &'a str,
        window_end: NaiveDateTime,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        let window_start = window_end - Duration::days(DAYS_PER_MONTH);
        self.transactions.iter().filter(move |tx| {
            tx.user_id == user_id && tx.timestamp > window_start && tx.timestamp <= window_end
        })
    }

    #[must_use]
    pub fn transactions(&self) -> &Vec<Transaction> {
        &self.transactions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
