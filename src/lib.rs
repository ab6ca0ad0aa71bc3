use std::sync::{Mutex, MutexGuard};

use log::info;
use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod types;

pub use board::Board;
pub use config::{Difficulty, GameConfig, PlayerKind};
pub use error::{BoardError, GameError};
pub use game::{GameInstance, MoveSelector, Turn};
pub use types::{Cell, Outcome, Position, Side};

static GAME: Lazy<Mutex<Option<GameInstance>>> = Lazy::new(|| Mutex::new(None));

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Starts a new game, replacing any game in progress.
/// `config` may be `undefined` for two humans on the hardest level.
#[wasm_bindgen]
pub fn new_game(config: JsValue) -> Result<JsValue, JsValue> {
    let config: GameConfig = if config.is_undefined() || config.is_null() {
        GameConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|err| to_js_error(GameError::Config(err.to_string())))?
    };

    info!(
        "new game: black {:?}, white {:?}, thinking depth {}",
        config.black,
        config.white,
        config.thinking_depth()
    );
    let game = GameInstance::new_with_default_selector(config);
    let state = game.to_game_state();
    *lock_game()? = Some(game);
    to_js(&state)
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    with_game(|game| Ok(game.to_game_state()))
}

#[wasm_bindgen]
pub fn get_legal_moves() -> Result<JsValue, JsValue> {
    with_game(|game| Ok(game.get_legal_moves()))
}

#[wasm_bindgen]
pub fn is_legal(row: u8, col: u8) -> Result<JsValue, JsValue> {
    with_game(|game| Ok(game.is_legal(Position::new(row, col))))
}

/// Human move; returns the new state.
#[wasm_bindgen]
pub fn place(row: u8, col: u8) -> Result<JsValue, JsValue> {
    with_game(|game| {
        game.place(row, col)?;
        Ok(game.to_game_state())
    })
}

/// Computer move; returns the new state.
#[wasm_bindgen]
pub fn ai_move() -> Result<JsValue, JsValue> {
    with_game(|game| {
        game.do_ai_move()?;
        Ok(game.to_game_state())
    })
}

#[wasm_bindgen]
pub fn pass_turn() -> Result<JsValue, JsValue> {
    with_game(|game| {
        game.pass()?;
        Ok(game.to_game_state())
    })
}

/// One step of the turn loop; returns the [`Turn`] taken.
#[wasm_bindgen]
pub fn advance() -> Result<JsValue, JsValue> {
    with_game(GameInstance::advance)
}

#[wasm_bindgen]
pub fn get_result() -> Result<JsValue, JsValue> {
    with_game(|game| Ok(game.to_game_result()))
}

fn lock_game() -> Result<MutexGuard<'static, Option<GameInstance>>, JsValue> {
    GAME.lock()
        .map_err(|_| JsValue::from_str("game state lock poisoned"))
}

fn with_game<T, F>(f: F) -> Result<JsValue, JsValue>
where
    T: Serialize,
    F: FnOnce(&mut GameInstance) -> Result<T, GameError>,
{
    let mut guard = lock_game()?;
    let game = guard
        .as_mut()
        .ok_or_else(|| to_js_error(GameError::NoActiveGame))?;
    let value = f(game).map_err(to_js_error)?;
    to_js(&value)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
