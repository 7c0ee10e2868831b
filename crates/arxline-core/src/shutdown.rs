//! Graceful shutdown on SIGINT/SIGTERM
//!
//! The harvest loop polls the flag between entries, so an interrupted run
//! still closes its database connection and logs a summary.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global shutdown flag, set by the signal handlers
pub fn shutdown_flag() -> &'static AtomicBool {
    static FLAG: AtomicBool = AtomicBool::new(false);
    &FLAG
}

/// Register SIGINT/SIGTERM handlers.
///
/// First signal sets the flag; a second one exits immediately with 130.
pub fn install_signal_handlers() -> std::io::Result<()> {
    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        // SAFETY: AtomicBool::swap and low_level::exit (_exit) are async-signal-safe
        unsafe {
            signal_hook::low_level::register(signal, || {
                if shutdown_flag().swap(true, Ordering::Relaxed) {
                    signal_hook::low_level::exit(130);
                }
            })?;
        }
    }
    Ok(())
}
