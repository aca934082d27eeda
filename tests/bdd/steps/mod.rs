//! Step definition modules for BDD scenarios.
//!
//! `pom` assembles the page object model and the test body; `run` executes
//! it and checks the resulting report.

#![expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd step signatures prioritise ergonomics"
)]

mod pom;
mod run;
