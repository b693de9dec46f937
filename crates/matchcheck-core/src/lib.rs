pub mod config;
pub mod logging;

pub mod checksum;
pub mod dataset;
pub mod ledger;
pub mod report;
pub mod validate;
