//! # Bio-Scales Application Entry Point
//!
//! Opens the explorer window. All setup, event handling and rendering lives
//! in the `app` module.

fn main() {
    if let Err(e) = bio_scales::app::run() {
        eprintln!("bio-scales: {e}");
        std::process::exit(1);
    }
}
