//! Applications API: submission (with scoring), listing, status
//! transitions, and HR notes.

pub mod handlers;
