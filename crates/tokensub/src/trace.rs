// Forwards to `tracing::trace!` when the `tracing` feature is enabled and
// expands to nothing otherwise, so the scanner stays dependency-free by
// default.

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "tokensub", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}
