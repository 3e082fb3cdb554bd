//! Retro Tetris window: frame loop, input dispatch and shutdown.

use std::path::Path;

use macroquad::logging::info;
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

use retro_tetris::config::{GameConfig, CONFIG_FILE};
use retro_tetris::game::{Game, Intent};
use retro_tetris::input;
use retro_tetris::render;
use retro_tetris::sound;
use retro_tetris::timestep::FixedTimestep;

fn window_conf() -> Conf {
    Conf {
        window_title: "Retro Tetris".to_owned(),
        window_width: 800,
        window_height: 600,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = GameConfig::load_or_default(Path::new(CONFIG_FILE));
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    // The audio handle lives inside the game; dropping the game on any exit
    // path (including unwinding) stops the audio thread.
    let audio = sound::start(&config.audio);
    let mut game = Game::new(config.rules.clone(), rng, audio);
    let mut clock = FixedTimestep::default();

    prevent_quit();
    'frames: loop {
        if is_quit_requested() {
            break;
        }
        for intent in input::pressed_intents() {
            if intent == Intent::Quit {
                break 'frames;
            }
            game.apply(intent);
        }
        for _ in 0..clock.advance(get_frame_time()) {
            game.tick(clock.step());
        }
        render::draw(&game.snapshot());
        next_frame().await;
    }

    info!("exiting with score {}", game.score());
    drop(game);
}
