//! Cashflow bookkeeping: entries, their stores, and the filter/sort/page/total
//! views served over HTTP.

pub mod aggregation;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
