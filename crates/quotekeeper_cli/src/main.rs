//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `quotekeeper_core` linkage and
//!   storage bootstrap, independently of any UI shell.
//! - Keep output deterministic for quick local sanity checks.

use quotekeeper_core::{init_logging, AppSession, Config};

fn main() {
    println!("quotekeeper_core ping={}", quotekeeper_core::ping());
    println!(
        "quotekeeper_core version={}",
        quotekeeper_core::core_version()
    );

    let config = Config::from_env();
    if let Some(log_dir) = config.log_dir.as_deref().and_then(|dir| dir.to_str()) {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging init failed: {err}");
        }
    }

    // Schema setup runs on open; failure here aborts startup.
    match AppSession::open(&config) {
        Ok(_session) => println!("storage ready at {}", config.db_path.display()),
        Err(err) => {
            eprintln!("storage unavailable: {err}");
            std::process::exit(1);
        }
    }
}
