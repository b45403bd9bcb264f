//! Benchgate CLI entry point.

fn main() {
    if let Err(e) = benchgate_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
