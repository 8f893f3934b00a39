//! Step-by-step symbolic differentiation.
//!
//! The [`calculus`] module holds the two derivation engines, [`compute_chain_rule`] and
//! [`compute_quotient_rule`], which turn raw input text into a simplified derivative and the
//! numbered steps that produce it. They are built on the [`symbolic`] module, which provides the
//! algebraic expression type, the structural differentiator and the simplifier.
//!
//! ```
//! use dx_compute::compute_quotient_rule;
//!
//! let derivation = compute_quotient_rule("x", "x + 1", "x").unwrap();
//! assert_eq!(derivation.result.to_string(), "1/(x + 1)**2");
//! assert_eq!(derivation.numbered_steps()[0], "1. Let u(x) = x, v(x) = x + 1");
//! ```

pub mod calculus;
pub mod primitive;
pub mod symbolic;

pub use calculus::{compute_chain_rule, compute_quotient_rule, Derivation, RunningTotal, TotalUpdate};
