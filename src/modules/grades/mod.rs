//! Exam grades. The percentage and letter grade are always derived from
//! the marks and the exam's total mark.

pub mod controller;
pub mod router;
pub mod service;
