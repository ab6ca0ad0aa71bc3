//! Browser tests for the exported game API.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use reversi_engine::{advance, ai_move, get_legal_moves, get_result, get_state, is_legal, new_game, pass_turn, place};

wasm_bindgen_test_configure!(run_in_browser);

fn field(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).expect("field must be readable")
}

fn config(black: &str, white: &str, difficulty: &str) -> JsValue {
    let obj = Object::new();
    for (key, value) in [("black", black), ("white", white), ("difficulty", difficulty)] {
        Reflect::set(&obj, &JsValue::from_str(key), &JsValue::from_str(value))
            .expect("field must be writable");
    }
    obj.into()
}

#[wasm_bindgen_test]
fn new_game_returns_initial_state() {
    let state = new_game(JsValue::UNDEFINED).unwrap();

    assert_eq!(field(&state, "blackCount").as_f64(), Some(2.0));
    assert_eq!(field(&state, "whiteCount").as_f64(), Some(2.0));
    assert_eq!(field(&state, "currentPlayer").as_string().as_deref(), Some("Black"));
    assert_eq!(field(&state, "isGameOver").as_bool(), Some(false));

    let moves = js_sys::Array::from(&get_legal_moves().unwrap());
    assert_eq!(moves.length(), 4);
}

#[wasm_bindgen_test]
fn human_move_updates_state() {
    new_game(JsValue::UNDEFINED).unwrap();

    assert_eq!(is_legal(2, 3).unwrap().as_bool(), Some(true));
    let state = place(2, 3).unwrap();

    assert_eq!(field(&state, "blackCount").as_f64(), Some(4.0));
    assert_eq!(field(&state, "whiteCount").as_f64(), Some(1.0));
    assert_eq!(field(&state, "currentPlayer").as_string().as_deref(), Some("White"));
    assert_eq!(field(&get_state().unwrap(), "isPass").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn illegal_move_and_pass_are_rejected() {
    new_game(JsValue::UNDEFINED).unwrap();

    let err = place(0, 0).unwrap_err();
    assert!(err.as_string().unwrap().contains("illegal move"));

    let err = pass_turn().unwrap_err();
    assert!(err.as_string().unwrap().contains("cannot pass"));
}

#[wasm_bindgen_test]
fn computer_replies_to_human() {
    new_game(config("human", "ai", "easy")).unwrap();
    place(2, 3).unwrap();

    let state = ai_move().unwrap();

    assert_eq!(field(&state, "currentPlayer").as_string().as_deref(), Some("Black"));
    assert!(field(&state, "lastMove").is_object());
}

#[wasm_bindgen_test]
fn computer_game_finishes() {
    new_game(config("computer", "computer", "easy")).unwrap();

    let mut finished = false;
    for _ in 0..200 {
        let turn = advance().unwrap();
        if field(&turn, "kind").as_string().as_deref() == Some("finished") {
            finished = true;
            break;
        }
    }

    assert!(finished);
    assert_eq!(field(&get_state().unwrap(), "isGameOver").as_bool(), Some(true));

    let result = get_result().unwrap();
    let black = field(&result, "blackCount").as_f64().unwrap();
    let white = field(&result, "whiteCount").as_f64().unwrap();
    let expected = if black > white {
        Some("Black")
    } else if white > black {
        Some("White")
    } else {
        None
    };
    assert_eq!(field(&result, "winner").as_string().as_deref(), expected);
}

#[wasm_bindgen_test]
fn bad_config_is_reported() {
    let err = new_game(config("human", "human", "impossible")).unwrap_err();

    assert!(err.as_string().unwrap().contains("invalid game configuration"));
}
