#![deny(rust_2018_idioms)]
#![deny(clippy::correctness)]
#![deny(clippy::perf)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod ledger;
pub mod merged;
pub mod metrics;
pub mod names;
pub mod rng;
pub mod transaction;
pub mod user;
