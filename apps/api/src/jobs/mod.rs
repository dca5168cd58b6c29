//! Jobs API: postings with required skills, experience ranges, and AI
//! screening policies.

pub mod handlers;
