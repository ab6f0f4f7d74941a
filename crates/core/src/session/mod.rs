//! Search session state.
//!
//! `SearchSession` owns the interactive state (filters, results, loading and
//! error flags, selection) and mirrors every change into the preference
//! store. It is a synchronous state machine: the frontend asks it for
//! `SearchTicket`s, runs the network call, and feeds the stamped outcome
//! back through `apply_result`.

mod controller;
mod debounce;

pub use controller::{SearchSession, SearchTicket, NO_RESULTS_MESSAGE, VALIDATION_MESSAGE};
pub use debounce::Debouncer;
