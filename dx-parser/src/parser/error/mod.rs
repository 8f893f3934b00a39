//! Errors produced while parsing. Every error is a [`dx_error::Error`] whose kind is one of the
//! structs in [`kind`].

pub mod kind;

pub use dx_error::Error;
