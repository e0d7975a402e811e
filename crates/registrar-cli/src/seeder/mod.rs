//! Store seeding.
//!
//! - [`bootstrap`]: The Admin and Head of Department accounts and the
//!   "Admin" department. Idempotent.
//! - [`demo`]: Fake departments, faculty, students, courses and exams for
//!   local development.

pub mod bootstrap;
pub mod demo;

pub use bootstrap::{BootstrapSummary, seed_bootstrap, seed_bootstrap_with_cost};
pub use demo::{DemoConfig, DemoSummary, seed_demo};
