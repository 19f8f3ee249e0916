use std::collections::HashMap;

use chrono::NaiveDateTime;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::GenError;
use crate::ledger::{month_reference, Ledger, MONTHS};
use crate::metrics::{percent_of, MonthlyMetrics};
use crate::rng::DatasetRng;
use crate::transaction::NUM_DECIMAL_PLACES;
use crate::user::User;

/// Share of gross income kept as net income, 0.8
fn net_income_rate() -> Decimal {
    Decimal::new(8, 1)
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Permanence {
    Yes,
    No,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GigTier {
    HighValue,
    LowValue,
}

/// Attributes drawn once per user and shared by all of that user's months
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub years_of_employment: u32,
    pub permanent_employment: Permanence,
    pub type_of_gig: GigTier,
    pub gross_income: Decimal,
    pub social_media_activeness_score: Decimal,
}

impl Profile {
    pub fn sample(rng: &mut DatasetRng) -> Self {
        Profile {
            years_of_employment: rng.int_between(0, 20),
            permanent_employment: rng.pick(&[Permanence::Yes, Permanence::No]),
            type_of_gig: rng.pick(&[GigTier::HighValue, GigTier::LowValue]),
            gross_income: rng.uniform_2dp(3000.0, 15000.0),
            social_media_activeness_score: rng.uniform_2dp(1.0, 5.0),
        }
    }

    #[must_use]
    pub fn net_income(&self) -> Decimal {
        let mut net = self.gross_income * net_income_rate();
        net.rescale(NUM_DECIMAL_PLACES);
        net
    }
}

/// One row of the merged table: a user's month of profile, spending metrics
/// and behavioural scores.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MergedRecord {
    pub user_id: String,
    pub full_name: Option<String>,
    pub month_offset: u32,
    pub cancellation_rate: Decimal,
    pub ratings: Decimal,
    pub responsiveness_to_task: Decimal,
    pub min_max_diff_past_6_months: Decimal,
    pub ratings_influx: Decimal,
    pub type_of_gig: GigTier,
    pub social_media_activeness_score: Decimal,
    pub permanent_employment: Permanence,
    pub years_of_employment: u32,
    pub fluctuation_rate: Decimal,
    pub gross_income: Decimal,
    pub net_income: Decimal,
    pub impulsive_purchase_rate: Decimal,
    pub necessity_ratio: Decimal,
    pub recurring_expense_consistency: Decimal,
    pub expense_to_income_ratio: Decimal,
    pub regular_saving: bool,
    pub regular_savings_amount: Decimal,
    pub emergency_fund_availability: bool,
    pub emergency_fund_amount: Decimal,
    pub consistent_spending: bool,
    pub spending_amount: Decimal,
    pub portfolio_diversification_risk: Decimal,
    pub awareness_of_utilisation_of_pfm: u32,
    pub timestamp: NaiveDateTime,
}

impl MergedRecord {
    /// Combines a month's metrics with the profile, drawing the behavioural
    /// fields fresh from `rng`.
    pub fn sample(
        rng: &mut DatasetRng,
        user: &User,
        profile: &Profile,
        month_offset: u32,
        metrics: MonthlyMetrics,
        timestamp: NaiveDateTime,
    ) -> Self {
        MergedRecord {
            user_id: user.user_id.clone(),
            full_name: user.full_name.clone(),
            month_offset,
            cancellation_rate: rng.uniform_2dp(0.0, 5.0),
            ratings: rng.uniform_2dp(3.5, 5.0),
            responsiveness_to_task: rng.uniform_2dp(3.0, 5.0),
            min_max_diff_past_6_months: rng.uniform_2dp(0.0, 1.0),
            ratings_influx: rng.uniform_2dp(3.0, 5.0),
            type_of_gig: profile.type_of_gig,
            social_media_activeness_score: profile.social_media_activeness_score,
            permanent_employment: profile.permanent_employment,
            years_of_employment: profile.years_of_employment,
            fluctuation_rate: rng.uniform_2dp(1.0, 10.0),
            gross_income: profile.gross_income,
            net_income: profile.net_income(),
            impulsive_purchase_rate: metrics.impulsive_purchase_rate,
            necessity_ratio: metrics.necessity_ratio,
            recurring_expense_consistency: rng.uniform_2dp(60.0, 95.0),
            expense_to_income_ratio: percent_of(metrics.total_spending, profile.gross_income),
            regular_saving: rng.pick(&[true, false]),
            regular_savings_amount: rng.uniform_2dp(100.0, 1000.0),
            emergency_fund_availability: rng.pick(&[true, false]),
            emergency_fund_amount: rng.uniform_2dp(1000.0, 10000.0),
            consistent_spending: rng.pick(&[true, false]),
            spending_amount: metrics.total_spending,
            portfolio_diversification_risk: rng.uniform_2dp(1.0, 5.0),
            awareness_of_utilisation_of_pfm: rng.int_between(1, 5),
            timestamp,
        }
    }
}

/// Builds [`MONTHS`] records for each of the first `num_records / MONTHS`
/// distinct users in the ledger. Users are taken in the order they first
/// appear in the ledger, never at random.
///
/// # Errors
/// Errors when a window's spending cannot be totalled
pub fn build_merged_records(
    rng: &mut DatasetRng,
    ledger: &Ledger,
    users: &[User],
    num_records: usize,
    reference_time: NaiveDateTime,
) -> Result<Vec<MergedRecord>, GenError> {
    // later duplicates of an encoded id win, matching a plain map insert
    let lookup: HashMap<&str, &User> = users.iter().map(|u| (u.user_id.as_str(), u)).collect();
    let selected: Vec<&str> = ledger
        .distinct_users()
        .into_iter()
        .take(num_records / MONTHS as usize)
        .collect();

    let mut records = Vec::with_capacity(selected.len() * MONTHS as usize);
    for user_id in selected {
        let user = lookup
            .get(user_id)
            .map_or_else(|| User::new(user_id.to_owned(), None), |u| (*u).clone());
        let profile = Profile::sample(rng);
        debug!("Profile for {}: {:?}", user_id, profile);

        for offset in 0..MONTHS {
            let record_date = month_reference(reference_time, offset);
            let metrics = MonthlyMetrics::from_transactions(ledger.window(user_id, record_date))?;
            records.push(MergedRecord::sample(
                rng,
                &user,
                &profile,
                offset,
                metrics,
                record_date,
            ));
        }
    }

    info!("Built {} merged records", records.len());
    Ok(records)
}
