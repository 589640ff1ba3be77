//! Desktop entry point.

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting InkDeck");

    if let Err(err) = inkdeck_app::App::run() {
        log::error!("InkDeck exited with an error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
