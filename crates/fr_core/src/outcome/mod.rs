//! Outcome algebra
//!
//! Every layer of the crate reports expected failures through three shapes:
//! - `Option<T>` for "may be absent" lookups, extended by [`OptionExt`]
//! - `Result<T, E>` for operations that can be refused, extended by [`ResultExt`]
//!   and [`Join`]
//! - [`GuardResult`] for the pass/fail records produced by [`crate::guard::Guard`]
//!
//! Panics are reserved for the `must_*` accessors, which state an invariant
//! the caller has already established.

mod guard_result;
mod option;
mod result;

pub use guard_result::GuardResult;
pub use option::OptionExt;
pub use result::{Join, ResultExt};
