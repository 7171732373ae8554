//! Integrations with external services
//!
//! The [`git`] module drives the version-control stage: work-branch
//! creation, commit, push, and the pull-request link. Everything here is
//! opaque to the detection core; a failure yields an error, never a
//! corrupted report.

pub mod git;
