//! Process termination after fatal errors

/// What happens once a fatal dialog has been dismissed
///
/// The application must never keep running in a state it has declared
/// broken, so implementations may not return.
pub trait Terminator: Send + Sync {
    fn terminate(&self) -> !;
}

/// Abort the process immediately (no unwinding, no exit handlers)
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortTerminator;

impl Terminator for AbortTerminator {
    fn terminate(&self) -> ! {
        std::process::abort()
    }
}
