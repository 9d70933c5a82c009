//! Replays a recorded pointer session and prints the resulting strokes.

mod session;

use session::{ReplayResult, Session};
use std::path::Path;

fn main() {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: inkslate-replay <session.json>");
        std::process::exit(2);
    };

    log::info!("Replaying session from {}", path);
    match run(Path::new(&path)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Replay failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(path: &Path) -> ReplayResult<String> {
    let session = Session::load(path)?;
    let canvas = session.replay()?;
    log::info!("Replay finished with {} stroke(s)", canvas.snapshot().len());
    Ok(serde_json::to_string_pretty(canvas.snapshot())?)
}
