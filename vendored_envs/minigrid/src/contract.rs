//! Fail-fast checks for conditions that only a malformed world or a broken
//! caller can violate. These never return an error value.

/// Abort with a diagnostic when `cond` does not hold.
///
/// The message is also emitted as a `tracing` error event before the panic.
macro_rules! contract {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::contract::violated(format!($($arg)+), stringify!($cond));
        }
    };
}

#[cold]
#[track_caller]
pub(crate) fn violated(msg: String, condition: &str) -> ! {
    tracing::error!(condition, "contract violated: {msg}");
    panic!("contract violated: {msg} ({condition})");
}
