//! Durable copy of the signed-in user. The session cache owns it, but
//! page components may read it opportunistically; writes are idempotent
//! last-write-wins and must never throw.

use gloo_storage::{LocalStorage, Storage};

use crate::models::user::User;

const USER_KEY: &str = "penstand.user";

/// A missing key and a record that no longer parses both degrade to
/// `None`.
pub fn load() -> Option<User> {
    LocalStorage::get(USER_KEY).ok()
}

pub fn save(user: &User) {
    if let Err(e) = LocalStorage::set(USER_KEY, user) {
        log::warn!("failed to persist user record: {e}");
    }
}

pub fn clear() {
    LocalStorage::delete(USER_KEY);
}
