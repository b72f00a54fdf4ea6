use parking_lot::Once;
use std::sync::atomic::{AtomicU8, Ordering};

const UNSET: u8 = 0;
const ON: u8 = 1;
const OFF: u8 = 2;

static ENV_SETTING: AtomicU8 = AtomicU8::new(UNSET);
static USER_SETTING: AtomicU8 = AtomicU8::new(UNSET);
static ENV_INIT: Once = Once::new();

fn env_setting() -> u8 {
    ENV_INIT.call_once(|| {
        let setting = match std::env::var("DESCENT_WARNINGS").as_deref() {
            Ok("0") => OFF,
            Ok("1") => ON,
            _ => UNSET,
        };
        ENV_SETTING.store(setting, Ordering::Relaxed);
    });
    ENV_SETTING.load(Ordering::Relaxed)
}

fn set_user_setting(setting: u8) {
    // Only the first call sticks.
    let _ = USER_SETTING.compare_exchange(UNSET, setting, Ordering::Relaxed, Ordering::Relaxed);
}

/// Force-enable warnings which may be disabled by dependencies.
///
/// Has no effect if `DESCENT_WARNINGS=0` is set in the environment.
pub fn enable_warnings() {
    set_user_setting(ON);
}

/// Force-disable warnings which may be enabled by dependencies.
///
/// Has no effect if `DESCENT_WARNINGS=1` is set in the environment.
pub fn disable_warnings() {
    set_user_setting(OFF);
}

/// Returns `true` if warnings are enabled.
///
/// Warnings are on by default. The environment variable `DESCENT_WARNINGS` (`0` or `1`) always
/// wins; otherwise the first call to [`enable_warnings`] or [`disable_warnings`] decides.
pub fn should_warn() -> bool {
    resolve(env_setting(), USER_SETTING.load(Ordering::Relaxed))
}

const fn resolve(env: u8, user: u8) -> bool {
    match env {
        ON => true,
        OFF => false,
        _ => user != OFF,
    }
}

/// Print a warning to stderr if warnings are enabled (see [`should_warn`]).
pub fn maybe_warn(msg: &str) {
    if should_warn() {
        eprintln!("Warning: {msg}");
    }
}
