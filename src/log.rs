//! Logging shim: forwards to `defmt` when the `defmt` feature is enabled and
//! compiles to nothing otherwise.
#![allow(unused_macros)]

#[cfg(feature = "defmt")]
macro_rules! warn {
    ($($arg:tt)+) => { defmt::warn!($($arg)+) };
}

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($arg:tt)+) => { defmt::debug!($($arg)+) };
}

#[cfg(feature = "defmt")]
macro_rules! trace {
    ($($arg:tt)+) => { defmt::trace!($($arg)+) };
}

#[cfg(not(feature = "defmt"))]
macro_rules! warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! trace {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
}
