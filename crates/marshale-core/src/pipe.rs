//! Left-to-right composition of unary steps
//!
//! `pipe(x, [f, g, h])` evaluates `h(g(f(x)))`. [`try_pipe`] is the fallible
//! variant: the first step that returns `Err` stops the fold and its error is
//! handed back untouched.
//!
//! Copyright (c) 2025 Marshale Team
//! Licensed under the Apache-2.0 license

/// Fold `initial` through every step in order
///
/// An empty list of steps returns `initial` unchanged.
///
/// ```
/// use marshale_core::pipe;
///
/// fn divide_by(d: i64) -> impl Fn(i64) -> i64 {
///     move |n| n / d
/// }
///
/// assert_eq!(pipe(100, [divide_by(2), divide_by(5)]), 10);
/// ```
pub fn pipe<T, I>(initial: T, steps: I) -> T
where
    I: IntoIterator,
    I::Item: FnOnce(T) -> T,
{
    steps.into_iter().fold(initial, |value, step| step(value))
}

/// Fold `initial` through fallible steps, stopping at the first error
pub fn try_pipe<T, E, I>(initial: T, steps: I) -> Result<T, E>
where
    I: IntoIterator,
    I::Item: FnOnce(T) -> Result<T, E>,
{
    steps.into_iter().try_fold(initial, |value, step| step(value))
}
