//! Departments and their heads.
//!
//! A department always has exactly one head. The head's faculty role is
//! `HeadOfDepartment` for as long as they hold the post and is reset to
//! `Professor` when they are replaced or the department is removed.

pub mod controller;
pub mod router;
pub mod service;
