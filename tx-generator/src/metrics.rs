use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::GenError;
use crate::transaction::{Amount, Transaction, NUM_DECIMAL_PLACES};

/// Spending figures for one user over one window
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyMetrics {
    pub total_spending: Decimal,
    /// Percentage of `total_spending` outside the necessity categories
    pub impulsive_purchase_rate: Decimal,
    /// Percentage of `total_spending` in the necessity categories
    pub necessity_ratio: Decimal,
}

/// `part` as a percentage of `whole`, or zero when `whole` is zero
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::new(0, NUM_DECIMAL_PLACES);
    }
    let mut percent = part / whole * Decimal::ONE_HUNDRED;
    percent.rescale(NUM_DECIMAL_PLACES);
    percent
}

impl MonthlyMetrics {
    /// # Errors
    /// Errors when the window's spending overflows
    pub fn from_transactions<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Result<Self, GenError> {
        let mut necessity = Amount::default();
        let mut non_essential = Amount::default();
        for tx in transactions {
            if tx.necessity_flag {
                necessity = necessity.checked_add(tx.spending_amount)?;
            } else {
                non_essential = non_essential.checked_add(tx.spending_amount)?;
            }
        }

        let total_spending = necessity.checked_add(non_essential)?.value();
        Ok(MonthlyMetrics {
            total_spending,
            impulsive_purchase_rate: percent_of(non_essential.value(), total_spending),
            necessity_ratio: percent_of(necessity.value(), total_spending),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use chrono::NaiveDate;

    use super::*;
    use crate::transaction::{Amount, Category};

    fn tx(category: Category, cents: i64) -> Transaction {
        let timestamp = NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Transaction::new(
            "000001".to_owned(),
            Amount::try_from(Decimal::new(cents, 2)).unwrap(),
            category,
            timestamp,
        )
    }

    #[test]
    fn test_empty_window() {
        let metrics = MonthlyMetrics::from_transactions(&Vec::<Transaction>::new()).unwrap();
        assert_eq!(metrics.total_spending, Decimal::ZERO);
        assert_eq!(metrics.impulsive_purchase_rate, Decimal::ZERO);
        assert_eq!(metrics.necessity_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_mixed_window() {
        let txs = vec![
            tx(Category::Rental, 30000),
            tx(Category::Groceries, 10000),
            tx(Category::Fashion, 10000),
        ];
        let metrics = MonthlyMetrics::from_transactions(&txs).unwrap();
        assert_eq!(metrics.total_spending, Decimal::new(50000, 2));
        assert_eq!(metrics.impulsive_purchase_rate, Decimal::new(2000, 2));
        assert_eq!(metrics.necessity_ratio, Decimal::new(8000, 2));
    }

    #[test]
    fn test_ratios_round_to_cents() {
        let txs = vec![
            tx(Category::Taxes, 1000),
            tx(Category::GymMembership, 1000),
            tx(Category::Investment, 1000),
        ];
        let metrics = MonthlyMetrics::from_transactions(&txs).unwrap();
        assert_eq!(metrics.necessity_ratio, Decimal::new(3333, 2));
        assert_eq!(metrics.impulsive_purchase_rate, Decimal::new(6667, 2));
        assert_eq!(
            metrics.necessity_ratio + metrics.impulsive_purchase_rate,
            Decimal::ONE_HUNDRED
        );
    }

    #[test]
    fn test_all_necessity() {
        let txs = vec![tx(Category::Telco, 4550), tx(Category::Utility, 12025)];
        let metrics = MonthlyMetrics::from_transactions(&txs).unwrap();
        assert_eq!(metrics.total_spending, Decimal::new(16575, 2));
        assert_eq!(metrics.impulsive_purchase_rate, Decimal::ZERO);
        assert_eq!(metrics.necessity_ratio, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_overflowing_window() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let huge = Amount::try_from(Decimal::MAX).unwrap();
        let txs = vec![
            Transaction::new("000001".to_owned(), huge, Category::Rental, timestamp),
            Transaction::new("000001".to_owned(), huge, Category::Taxes, timestamp),
        ];
        let res = MonthlyMetrics::from_transactions(&txs);
        assert!(matches!(res, Err(GenError::InvalidAmount)));

        // each subtotal fits, their sum does not
        let txs = vec![
            Transaction::new("000001".to_owned(), huge, Category::Rental, timestamp),
            Transaction::new("000001".to_owned(), huge, Category::Fashion, timestamp),
        ];
        assert!(MonthlyMetrics::from_transactions(&txs).is_err());
    }
}
