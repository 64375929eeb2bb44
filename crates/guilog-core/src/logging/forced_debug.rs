//! Messages that are always demoted to debug
//!
//! Known-benign diagnostics from the GUI toolkit and the clipboard code that
//! would otherwise show up as warnings (or critical dialogs) on every run.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::types::Severity;

static FORCED_DEBUG_MESSAGES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "No functional TLS backend was found",
        "No TLS backend is available",
        "QSslSocket::connectToHostEncrypted: TLS initialization failed",
        "Retrying to obtain clipboard.",
        "Unable to obtain clipboard.",
    ])
});

/// Whether `message` is on the forced-debug list (exact match)
pub fn is_forced_debug(message: &str) -> bool {
    FORCED_DEBUG_MESSAGES.contains(message)
}

/// Severity after forced-debug demotion
pub fn resolve_severity(severity: Severity, message: &str) -> Severity {
    if is_forced_debug(message) {
        Severity::Debug
    } else {
        severity
    }
}

/// Iterate over the forced-debug list
pub fn forced_debug_messages() -> impl Iterator<Item = &'static str> {
    FORCED_DEBUG_MESSAGES.iter().copied()
}
