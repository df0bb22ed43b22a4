//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The root URL of the task API, used by [`Client::from_config`](crate::client::Client::from_config).
/// The default one is how an Android emulator reaches a server running on the development machine.
/// Feel free to override it when initing this library.
pub static API_BASE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("http://10.0.2.2:8080".to_string())));

/// Name of the file that stores the session of an anonymous user, see [`crate::cache::SessionCache`].
/// Feel free to override it when initing this library.
pub static SESSION_FILE_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("session.json".to_string())));

/// Read the current value of one of the settings of this module
pub fn get(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Override one of the settings of this module
pub fn set<S: ToString>(setting: &Lazy<Arc<Mutex<String>>>, value: S) {
    match setting.lock() {
        Ok(mut current) => *current = value.to_string(),
        Err(poisoned) => *poisoned.into_inner() = value.to_string(),
    }
}
