use gloo_storage::{LocalStorage, Storage};
use serde::{de::DeserializeOwned, Serialize};

pub fn save_to_storage<T: Serialize>(key: &str, value: &T) -> Result<(), String> {
    LocalStorage::set(key, value)
        .map_err(|e| format!("Erreur d'écriture localStorage ({}): {}", key, e))
}

pub fn load_from_storage<T: DeserializeOwned>(key: &str) -> Option<T> {
    LocalStorage::get(key).ok()
}
