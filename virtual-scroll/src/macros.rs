#[cfg(feature = "tracing")]
pub(crate) const LOG_TARGET: &str = "virtual_scroll";

#[cfg(feature = "tracing")]
macro_rules! log_at {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: crate::macros::LOG_TARGET, $($tt)*)
    };
}

// Arguments are dropped unexpanded when tracing is off.
#[cfg(not(feature = "tracing"))]
macro_rules! log_at {
    ($($tt:tt)*) => {};
}

macro_rules! vtrace {
    ($($tt:tt)*) => {
        log_at!(trace, $($tt)*)
    };
}

macro_rules! vdebug {
    ($($tt:tt)*) => {
        log_at!(debug, $($tt)*)
    };
}

macro_rules! vwarn {
    ($($tt:tt)*) => {
        log_at!(warn, $($tt)*)
    };
}
