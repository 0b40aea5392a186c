//! Reports Module
//!
//! `GET /api/reports?range=daily|weekly|monthly|yearly` summarizes the
//! user's habits and logs. The aggregation itself is
//! [`crate::shared::report::summarize`].

pub mod handlers;

pub use handlers::get_report;
