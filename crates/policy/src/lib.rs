//! Vitrine Navigation Policy
//!
//! Decides whether an embedded browser surface may follow an in-page
//! navigation attempt.

mod gate;

pub use gate::{decide, Decision, NavigationRequest};
