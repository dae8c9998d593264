// Re-export `miette`.
pub use miette;

use std::{
    error::Error,
    fmt::{Debug, Display},
};

use miette::{Diagnostic, Report};

/// An uninhabited type, used as the default non-fatal diagnostic type of [`Dr`].
/// No value of type `Void` can exist, so a `Dr<T, E, Void>` never allocates for warnings.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Void {}

impl Debug for Void {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {}
    }
}

impl Display for Void {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {}
    }
}

impl Error for Void {}

impl Diagnostic for Void {}

/// A diagnostic result: either a value or a fatal error, together with a list of non-fatal
/// diagnostics collected on the way.
///
/// Loading a stash from loosely-shaped input is the typical producer. Input of the wrong shape
/// is not fatal there; it yields an empty value and a warning explaining what was ignored.
///
/// Once a fatal error has been recorded, further non-fatal diagnostics are dropped.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Dr<T, E = Report, N = Void> {
    value: Result<T, E>,
    non_fatal: Vec<N>,
}

impl<T, E, N> Debug for Dr<T, E, N>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Ok(value) => write!(f, "{:?}", value),
            Err(_) => write!(f, "<fatal error>"),
        }
    }
}

impl<T, E, N> Dr<T, E, N> {
    /// A successful result with no diagnostics.
    pub fn new(value: T) -> Self {
        Dr {
            value: Ok(value),
            non_fatal: Vec::new(),
        }
    }

    /// A failed result with no non-fatal diagnostics.
    pub fn new_err(error: E) -> Self {
        Dr {
            value: Err(error),
            non_fatal: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.value.is_ok()
    }

    pub fn is_err(&self) -> bool {
        self.value.is_err()
    }

    /// The contained value, if this result did not fail.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref().ok()
    }

    /// The fatal error, if there was one.
    pub fn error(&self) -> Option<&E> {
        self.value.as_ref().err()
    }

    /// The non-fatal diagnostics collected so far, oldest first.
    pub fn non_fatal(&self) -> &[N] {
        &self.non_fatal
    }

    /// Discards every diagnostic and returns the value, if present.
    pub fn into_value(self) -> Option<T> {
        self.value.ok()
    }

    /// Attaches a non-fatal diagnostic.
    /// Does nothing if this result already failed.
    pub fn with(mut self, diag: N) -> Self {
        if self.is_ok() {
            self.non_fatal.push(diag);
        }
        self
    }

    /// Feeds the contained value into `f`, concatenating the diagnostics of both steps.
    /// A failed result short-circuits and `f` is never called.
    pub fn bind<U>(mut self, f: impl FnOnce(T) -> Dr<U, E, N>) -> Dr<U, E, N> {
        match self.value {
            Ok(value) => {
                let mut result = f(value);
                self.non_fatal.extend(result.non_fatal);
                result.non_fatal = self.non_fatal;
                result
            }
            Err(err) => Dr {
                value: Err(err),
                non_fatal: self.non_fatal,
            },
        }
    }

    /// Erases the error types into [`Report`]s so they can be rendered.
    pub fn to_reports(self) -> Dr<T, Report, Report>
    where
        E: Diagnostic + Send + Sync + 'static,
        N: Diagnostic + Send + Sync + 'static,
    {
        Dr {
            value: self.value.map_err(Report::new),
            non_fatal: self.non_fatal.into_iter().map(Report::new).collect(),
        }
    }
}

impl<T> Dr<T, Report, Report> {
    /// Renders every diagnostic to stderr, non-fatal ones first.
    /// Then returns the contained value, if present.
    pub fn print_reports(self) -> Option<T> {
        for diag in self.non_fatal {
            eprintln!("{:?}", diag);
        }

        match self.value {
            Ok(value) => Some(value),
            Err(err) => {
                eprintln!("{:?}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use miette::Diagnostic;
    use pretty_assertions::assert_eq;
    use thiserror::Error;

    use super::*;

    #[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
    #[error("{0}")]
    struct Note(&'static str);

    type TestDr<T> = Dr<T, Note, Note>;

    #[test]
    fn warnings_accumulate_across_bind() {
        let result = TestDr::new(1)
            .with(Note("first"))
            .bind(|x| TestDr::new(x + 1).with(Note("second")));
        assert_eq!(result.value(), Some(&2));
        assert_eq!(result.non_fatal(), &[Note("first"), Note("second")]);
    }

    #[test]
    fn failure_short_circuits() {
        let mut called = false;
        let result = TestDr::<i32>::new_err(Note("broken")).bind(|x| {
            called = true;
            TestDr::new(x)
        });
        assert!(!called);
        assert!(result.is_err());
        assert_eq!(result.error(), Some(&Note("broken")));
    }

    #[test]
    fn warnings_are_dropped_after_failure() {
        let result = TestDr::<()>::new_err(Note("broken")).with(Note("late"));
        assert!(result.non_fatal().is_empty());
    }

    #[test]
    fn reports_keep_the_value() {
        let result = TestDr::new("ok").with(Note("advice")).to_reports();
        assert_eq!(result.non_fatal().len(), 1);
        assert_eq!(result.print_reports(), Some("ok"));
    }
}
