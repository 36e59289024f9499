//! MOD to MP4 converter - main entry point.
//!
//! Handles application-level logging initialization, the fatal startup
//! check for the transcoder, and the application launch. Everything
//! else lives in the core crate.

use modconv_core::config::Settings;
use modconv_core::tools;

mod app;

use app::App;

fn main() -> iced::Result {
    modconv_core::logging::init_tracing();

    // Transcoder entirely unavailable is the one fatal startup
    // condition besides an invalid root; bail before opening a window.
    if let Err(e) = tools::verify_tools(&Settings::default().tools) {
        eprintln!("Fatal: {}", e);
        std::process::exit(2);
    }

    tracing::info!("MOD to MP4 converter starting");
    tracing::info!("Core version: {}", modconv_core::version());

    iced::application(App::title, App::update, App::view)
        .window_size((680.0, 520.0))
        .run_with(App::new)
}
