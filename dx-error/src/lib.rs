//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

// lets `#[derive(ErrorKind)]` refer to this crate by name from inside it
extern crate self as dx_error;

use ariadne::{Color, Report};
use std::{any::Any, fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur while parsing or deriving an expression.
pub trait ErrorKind: Debug + Send {
    /// Returns the error as an [`Any`], so that the concrete kind can be recovered with
    /// [`downcast_ref`](https://doc.rust-lang.org/std/any/trait.Any.html#method.downcast_ref).
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns the kind of this error as the concrete type `K`, if it is of that type.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<K>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

#[cfg(test)]
mod tests {
    use ariadne::{Fmt, Source};
    use dx_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("unknown function `{}`", name),
        labels = ["this function", "called here"],
        help = format!("did you mean `{}`?", "sin".fg(EXPR)),
    )]
    struct UnknownFunction {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "no labels")]
    struct Bare;

    /// Renders the report of the error to a string without color codes.
    fn render(error: &Error, src: &str) -> String {
        let mut buf = Vec::new();
        error.build_report("input")
            .write(("input", Source::from(src)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn report_contains_message_and_labels() {
        let error = Error::new(vec![0..3, 4..5], UnknownFunction { name: "sni".to_string() });
        let text = render(&error, "sni(x)");

        assert!(text.contains("unknown function `sni`"));
        assert!(text.contains("this function"));
        assert!(text.contains("did you mean `sin`?"));
    }

    #[test]
    fn report_without_labels() {
        let error = Error::new(vec![0..0], Bare);
        let text = render(&error, "");
        assert!(text.contains("no labels"));
    }

    #[test]
    fn downcast_kind() {
        let error = Error::new(vec![0..1], Bare);
        assert!(error.is::<Bare>());
        assert!(error.downcast_ref::<UnknownFunction>().is_none());
    }
}
