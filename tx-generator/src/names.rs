use crate::rng::DatasetRng;

pub struct NameGenerator;

impl NameGenerator {
    /// "First Last", first name drawn before last name
    pub fn generate_full_name(rng: &mut DatasetRng) -> String {
        let first_name = Self::generate_first_name(rng);
        let last_name = Self::generate_last_name(rng);
        format!("{} {}", first_name, last_name)
    }

    pub fn generate_first_name(rng: &mut DatasetRng) -> &'static str {
        rng.pick(FIRST_NAMES)
    }

    pub fn generate_last_name(rng: &mut DatasetRng) -> &'static str {
        rng.pick(LAST_NAMES)
    }
}

const FIRST_NAMES: &[&str] = &[
    "Aisyah", "Ahmad", "Amir", "Anita", "Arjun", "Azlan", "Benjamin", "Chloe", "Daniel",
    "Deepa", "Emily", "Farah", "Faizal", "Grace", "Hafiz", "Hannah", "Ismail", "Jasmine",
    "Jason", "Kavitha", "Kevin", "Lina", "Marcus", "Mei", "Michael", "Nadia", "Nurul",
    "Omar", "Priya", "Rachel", "Rajesh", "Ryan", "Sarah", "Siti", "Suresh", "Tan", "Vanessa",
    "Wei", "Yusuf", "Zara",
];

const LAST_NAMES: &[&str] = &[
    "Abdullah", "Ahmad", "Ali", "Chan", "Chong", "Fernandez", "Goh", "Hassan", "Ibrahim",
    "Ismail", "Kaur", "Khoo", "Kumar", "Lee", "Lim", "Low", "Mohamed", "Nair", "Ng", "Ong",
    "Pillai", "Rahman", "Raj", "Singh", "Tan", "Teo", "Wong", "Yap", "Yusof", "Zainal",
];
