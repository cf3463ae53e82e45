//! Process wide Ctrl-C handling for the binaries. The library never installs a handler; solvers
//! observe the flag only if it is passed in via [`crate::exact::SearchLimits::with_cancel_flag`].

use std::sync::{
    Arc, Once, OnceLock,
    atomic::{AtomicBool, Ordering},
};

use log::{info, warn};

static CTRL_C: OnceLock<Arc<AtomicBool>> = OnceLock::new();
static HANDLER: Once = Once::new();

fn flag() -> &'static Arc<AtomicBool> {
    CTRL_C.get_or_init(|| Arc::new(AtomicBool::new(false)))
}

/// Installs the Ctrl-C handler. Subsequent calls have no effect.
pub fn initialize() {
    HANDLER.call_once(|| {
        let flag = flag().clone();
        if let Err(err) = ctrlc::set_handler(move || {
            info!("Received Ctrl-C; stop after the current step");
            flag.store(true, Ordering::SeqCst);
        }) {
            warn!("Cannot install Ctrl-C handler: {err}");
        }
    });
}

/// Returns true once Ctrl-C was pressed after [`initialize`]
pub fn received_ctrl_c() -> bool {
    flag().load(Ordering::SeqCst)
}

/// The flag raised by the handler, suitable as a cancel flag of a search
pub fn cancel_flag() -> Arc<AtomicBool> {
    flag().clone()
}
