#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use penstand::auth::storage;
use penstand::models::user::User;

wasm_bindgen_test_configure!(run_in_browser);

fn sample_user() -> User {
    serde_json::from_str(
        r#"{
            "id": 9,
            "name": "Grace",
            "email": "grace@example.com",
            "email_verified_at": "2024-03-01T09:30:00.000000Z",
            "created_at": "2024-02-01T09:30:00.000000Z",
            "updated_at": "2024-03-01T09:30:00.000000Z"
        }"#,
    )
    .expect("sample user parses")
}

#[wasm_bindgen_test]
fn durable_user_round_trip() {
    let user = sample_user();
    storage::save(&user);
    assert_eq!(storage::load(), Some(user));
}

#[wasm_bindgen_test]
fn clear_removes_durable_copy() {
    storage::save(&sample_user());
    storage::clear();
    assert_eq!(storage::load(), None);
}
