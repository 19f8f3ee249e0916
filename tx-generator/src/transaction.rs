use std::convert::TryFrom;
use std::fmt;

use chrono::{Duration, NaiveDateTime};
use rand::seq::SliceRandom;
use rust_decimal::prelude::*;
use serde::Serialize;

use crate::error::GenError;
use crate::rng::DatasetRng;

pub const NUM_DECIMAL_PLACES: u32 = 2;

/// Bounds on how many categories a user spends in during one month.
pub const MIN_CATEGORIES_PER_MONTH: u32 = 3;
pub const MAX_CATEGORIES_PER_MONTH: u32 = 8;

/// Transactions land between `month_start` and this many days after it.
pub const MAX_DAY_OFFSET: u32 = 27;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "food")]
    Food,
    #[serde(rename = "transportation")]
    Transportation,
    #[serde(rename = "fashion")]
    Fashion,
    #[serde(rename = "insurance")]
    Insurance,
    #[serde(rename = "investment")]
    Investment,
    #[serde(rename = "utility")]
    Utility,
    #[serde(rename = "telco")]
    Telco,
    #[serde(rename = "rental")]
    Rental,
    #[serde(rename = "credit card payment")]
    CreditCardPayment,
    #[serde(rename = "buy now pay later")]
    BuyNowPayLater,
    #[serde(rename = "mortgage loan")]
    MortgageLoan,
    #[serde(rename = "installments")]
    Installments,
    #[serde(rename = "gym membership")]
    GymMembership,
    #[serde(rename = "taxes")]
    Taxes,
    #[serde(rename = "groceries")]
    Groceries,
}

/// The category vocabulary as sampled. `Insurance` is listed twice and so
/// carries double selection weight.
pub const CATEGORY_VOCABULARY: [Category; 16] = [
    Category::Food,
    Category::Transportation,
    Category::Fashion,
    Category::Insurance,
    Category::Investment,
    Category::Utility,
    Category::Telco,
    Category::Rental,
    Category::Insurance,
    Category::CreditCardPayment,
    Category::BuyNowPayLater,
    Category::MortgageLoan,
    Category::Installments,
    Category::GymMembership,
    Category::Taxes,
    Category::Groceries,
];

pub const NECESSITY_CATEGORIES: [Category; 9] = [
    Category::Food,
    Category::Transportation,
    Category::Utility,
    Category::Telco,
    Category::Rental,
    Category::Insurance,
    Category::MortgageLoan,
    Category::Taxes,
    Category::Groceries,
];

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Food,
        Category::Transportation,
        Category::Fashion,
        Category::Insurance,
        Category::Investment,
        Category::Utility,
        Category::Telco,
        Category::Rental,
        Category::CreditCardPayment,
        Category::BuyNowPayLater,
        Category::MortgageLoan,
        Category::Installments,
        Category::GymMembership,
        Category::Taxes,
        Category::Groceries,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transportation => "transportation",
            Category::Fashion => "fashion",
            Category::Insurance => "insurance",
            Category::Investment => "investment",
            Category::Utility => "utility",
            Category::Telco => "telco",
            Category::Rental => "rental",
            Category::CreditCardPayment => "credit card payment",
            Category::BuyNowPayLater => "buy now pay later",
            Category::MortgageLoan => "mortgage loan",
            Category::Installments => "installments",
            Category::GymMembership => "gym membership",
            Category::Taxes => "taxes",
            Category::Groceries => "groceries",
        }
    }

    #[must_use]
    pub fn is_necessity(self) -> bool {
        NECESSITY_CATEGORIES.contains(&self)
    }

    /// How many times the category occurs in [`CATEGORY_VOCABULARY`]
    #[must_use]
    pub fn selection_weight(self) -> u32 {
        CATEGORY_VOCABULARY
            .iter()
            .fold(0, |n, c| if *c == self { n + 1 } else { n })
    }

    /// Inclusive range the spending amount for this category is drawn from
    #[must_use]
    pub fn amount_range(self) -> (f64, f64) {
        match self {
            Category::Investment | Category::MortgageLoan => (1000.0, 10000.0),
            Category::Fashion | Category::BuyNowPayLater => (50.0, 500.0),
            _ => (10.0, 1000.0),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-negative money amount kept at [`NUM_DECIMAL_PLACES`]
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl TryFrom<Decimal> for Amount {
    type Error = GenError;
    fn try_from(mut decimal: Decimal) -> Result<Self, Self::Error> {
        if decimal >= Decimal::ZERO {
            decimal.rescale(NUM_DECIMAL_PLACES);
            Ok(Amount(decimal))
        } else {
            Err(GenError::InvalidAmount)
        }
    }
}

impl Amount {
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    /// # Errors
    /// Errors when `other` + `self` would overflow
    pub fn checked_add(self, other: Amount) -> Result<Amount, GenError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(GenError::InvalidAmount)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub user_id: String,
    pub spending_amount: Amount,
    pub recipient_category: Category,
    pub necessity_flag: bool,
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    #[must_use]
    pub fn new(
        user_id: String,
        spending_amount: Amount,
        recipient_category: Category,
        timestamp: NaiveDateTime,
    ) -> Self {
        Transaction {
            user_id,
            spending_amount,
            recipient_category,
            necessity_flag: recipient_category.is_necessity(),
            timestamp,
        }
    }
}

/// Draws one month of spending for `user_id`: between
/// [`MIN_CATEGORIES_PER_MONTH`] and [`MAX_CATEGORIES_PER_MONTH`] distinct
/// categories, one transaction each.
///
/// # Errors
/// Errors when the category weights cannot be sampled or an amount is negative
pub fn sample_month(
    rng: &mut DatasetRng,
    user_id: &str,
    month_start: NaiveDateTime,
) -> Result<Vec<Transaction>, GenError> {
    let count = rng.int_between(MIN_CATEGORIES_PER_MONTH, MAX_CATEGORIES_PER_MONTH) as usize;
    let categories: Vec<Category> = Category::ALL
        .choose_multiple_weighted(rng, count, |c| c.selection_weight())?
        .copied()
        .collect();

    let mut transactions = Vec::with_capacity(count);
    for category in categories {
        let (low, high) = category.amount_range();
        let amount = Amount::try_from(rng.uniform_2dp(low, high))?;
        let days = rng.int_between(0, MAX_DAY_OFFSET);
        let timestamp = month_start + Duration::days(i64::from(days));
        transactions.push(Transaction::new(
            user_id.to_owned(),
            amount,
            category,
            timestamp,
        ));
    }

    Ok(transactions)
}
