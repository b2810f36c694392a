//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    mathpane_app::diagnostics::log_platform();
    log::info!("Starting MathPane");

    if let Err(e) = mathpane_app::App::run(mathpane_app::AppConfig::default()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
