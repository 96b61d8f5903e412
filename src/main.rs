//! Skyhop entry point
//!
//! Native builds run a headless autopilot session. The browser build is
//! driven through `skyhop::web::WebGame` instead.

#[cfg(not(target_arch = "wasm32"))]
use skyhop::{
    Game,
    audio::LogAudio,
    persistence::{FileStore, KeyValueStore, MemoryStore},
    platform::Command,
    sim::SessionStatus,
};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FRAMES: u64 = 20_000;

#[cfg(not(target_arch = "wasm32"))]
fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(v) => v.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring {}={:?}, using {}", name, v, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run<S: KeyValueStore>(mut game: Game<S, LogAudio>, max_frames: u64) {
    game.set_autopilot(true);
    game.command(Command::Start);

    while game.frames() < max_frames {
        game.frame();
        if game.state().status == SessionStatus::Ended {
            break;
        }
    }

    let state = game.state();
    log::info!(
        "Finished after {} frames: status {:?}, score {}, best {}, {} cues",
        game.frames(),
        state.status,
        state.score,
        state.best,
        game.audio().played.len()
    );
    println!("score {} best {}", state.score, state.best);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Skyhop (native) starting...");

    let seed = std::env::var("SKYHOP_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    let max_frames = env_u64("SKYHOP_FRAMES", DEFAULT_FRAMES);

    match std::env::var_os("SKYHOP_STORE") {
        Some(path) => {
            let store = FileStore::open(path);
            log::info!("Using store {}", store.path().display());
            run(Game::new(seed, store, LogAudio::default()), max_frames);
        }
        None => run(Game::new(seed, MemoryStore::new(), LogAudio::default()), max_frames),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is skyhop::web::start, this is just to satisfy the compiler
}
