//! Shared test-only helpers.

use std::fmt::Debug;

/// Asserts that an expression matches a pattern, with an optional
/// match guard, printing the value on failure.
macro_rules! assert_matches {
    ($left:expr, $($pattern:pat_param)|+ $(if $guard:expr)? $(,)?) => {
        match $left {
            $($pattern)|+ $(if $guard)? => {}
            ref left => crate::tests::assert_matches_failed(
                left,
                stringify!($($pattern)|+ $(if $guard)?),
            ),
        }
    };
}

pub(crate) use assert_matches;

#[track_caller]
pub(crate) fn assert_matches_failed(left: impl Debug, right: &str) -> ! {
    panic!(
        "{}",
        indoc::formatdoc! {"
            assertion `left matches right` failed
              left: {left:?}
             right: {right}
        "},
    )
}
