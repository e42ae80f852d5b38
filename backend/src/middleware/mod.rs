//! Request middleware.
//!
//! [`Trace`] gives every request a trace identifier and echoes it in the
//! `trace-id` response header. [`UnitOfWork`] opens the store's change-tracking
//! scope so all repository calls made while serving one request share a single
//! identity map. [`CatchPanic`] turns handler panics into 500 problem
//! responses.

pub mod catch_panic;
pub mod trace;
pub mod unit_of_work;

pub use catch_panic::CatchPanic;
pub use trace::Trace;
pub use unit_of_work::UnitOfWork;
