//! Harness core: fixture store, process driver, expectation engine, reporter

pub mod driver;
pub mod expect;
pub mod fixture;
pub mod report;

pub use driver::{Driver, ScriptRunner};
pub use expect::{Expectations, Failure};
pub use fixture::Fixture;
pub use report::{Reporter, RunSummary};
