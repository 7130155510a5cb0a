//! Database integration tests
//!
//! The DAL contract, run against each store adapter.

mod dal_test;
