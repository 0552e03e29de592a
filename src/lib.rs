#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod reminder;
pub mod store;
pub mod time_expr;
pub mod trace;

use env_logger::Env;
use log::debug;

pub const LOG_LEVEL_ENV: &str = "REMIND_LOG_LEVEL";

pub fn setup_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env = Env::default().filter_or(LOG_LEVEL_ENV, default_level);
    // tests set the logger up more than once per process
    if env_logger::try_init_from_env(env).is_ok() {
        debug!("logger start");
    }
}
