//! models — user-facing distributions and their estimation routines.
//!
//! - [`student_t`]: [`StudentT`], the multivariate Student's t distribution
//!   with density, moments, and EM fitting.
//! - [`em`]: the initialization, E-step, and M-step equations used by
//!   `StudentT::fit`, plus the [`EMOutcome`] summary.

pub mod em;
pub mod student_t;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::em::EMOutcome;
pub use self::student_t::StudentT;
