use chrono::{Datelike, NaiveDateTime};
use rand::Rng;
use serde::Serialize;

use crate::names::NameGenerator;
use crate::rng::DatasetRng;

/// Age bounds, in years, implied by an encoded identifier's birth date
pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 65;

/// Upper bound of the two digit location code in an encoded identifier
pub const MAX_LOCATION_CODE: u32 = 14;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// `YYMMDDLLNNNN`: birth date, location code, random suffix. Collisions
    /// are possible.
    #[default]
    EncodedAttributes,
    /// Zero-based index padded to six digits.
    Sequential,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub full_name: Option<String>,
}

impl User {
    #[must_use]
    pub fn new(user_id: String, full_name: Option<String>) -> Self {
        User { user_id, full_name }
    }
}

#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Builds an identifier of the form `YYMMDDLLNNNN` for someone aged between
/// [`MIN_AGE`] and [`MAX_AGE`] in `reference_year`.
pub fn encoded_id(rng: &mut DatasetRng, reference_year: i32) -> String {
    let birth_year = rng.gen_range((reference_year - MAX_AGE)..=(reference_year - MIN_AGE));
    let month = rng.int_between(1, 12);
    let day = rng.int_between(1, days_in_month(birth_year, month));
    let location = rng.int_between(1, MAX_LOCATION_CODE);
    let suffix = rng.int_between(0, 9999);
    format!(
        "{:02}{:02}{:02}{:02}{:04}",
        birth_year.rem_euclid(100),
        month,
        day,
        location,
        suffix
    )
}

#[must_use]
pub fn sequential_id(index: usize) -> String {
    format!("{:06}", index)
}

/// Creates `count` users in index order. Encoded identifiers are each
/// followed by a drawn display name; sequential ones carry none.
pub fn generate_users(
    rng: &mut DatasetRng,
    strategy: IdStrategy,
    count: usize,
    reference_time: NaiveDateTime,
) -> Vec<User> {
    (0..count)
        .map(|index| match strategy {
            IdStrategy::EncodedAttributes => {
                let user_id = encoded_id(rng, reference_time.year());
                let full_name = NameGenerator::generate_full_name(rng);
                User::new(user_id, Some(full_name))
            }
            IdStrategy::Sequential => User::new(sequential_id(index), None),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use super::*;

    fn reference_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn test_encoded_id_shape() {
        let mut rng = DatasetRng::new(42);
        let reference_year = 2024;
        // 1959..=2006 spans fewer than 100 years, so each YY names one year
        let birth_years: HashMap<i32, i32> = ((reference_year - MAX_AGE)
            ..=(reference_year - MIN_AGE))
            .map(|y| (y % 100, y))
            .collect();
        assert_eq!(birth_years.len(), 48);

        for _ in 0..2000 {
            let id = encoded_id(&mut rng, reference_year);
            assert_eq!(id.len(), 12);
            assert!(id.chars().all(|c| c.is_ascii_digit()));

            let yy: i32 = id[0..2].parse().unwrap();
            let mm: u32 = id[2..4].parse().unwrap();
            let dd: u32 = id[4..6].parse().unwrap();
            let ll: u32 = id[6..8].parse().unwrap();
            let year = birth_years[&yy];
            assert!((1..=12).contains(&mm));
            assert!((1..=days_in_month(year, mm)).contains(&dd), "{}", id);
            assert!((1..=MAX_LOCATION_CODE).contains(&ll));
        }
    }

    #[test]
    fn test_sequential_users() {
        let mut rng = DatasetRng::new(42);
        let users = generate_users(&mut rng, IdStrategy::Sequential, 3, reference_time());
        let ids: Vec<&str> = users.iter().map(|u| u.user_id.as_str()).collect();
        assert_eq!(ids, vec!["000000", "000001", "000002"]);
        assert!(users.iter().all(|u| u.full_name.is_none()));
        assert_eq!(sequential_id(123_456), "123456");
    }

    #[test]
    fn test_encoded_users_have_names() {
        let mut rng = DatasetRng::new(42);
        let users = generate_users(
            &mut rng,
            IdStrategy::EncodedAttributes,
            20,
            reference_time(),
        );
        assert_eq!(users.len(), 20);
        for user in &users {
            assert_eq!(user.user_id.len(), 12);
            let name = user.full_name.as_ref().unwrap();
            assert_eq!(name.split(' ').count(), 2);
        }
    }
}
