//! This module provides a local storage for the session of a user
//!
//! It is a small key-value store (auth token, user profile, last selected day) backed by a JSON file.

use std::path::PathBuf;
use std::path::Path;
use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;


/// The session data of a signed-in user, stored in a local file
#[derive(Debug, PartialEq)]
pub struct SessionCache {
    backing_file: PathBuf,
    data: SessionData,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct SessionData {
    token: Option<String>,
    user: Option<serde_json::Value>,
    selected_date: Option<DateKey>,
}

impl SessionCache {
    /// Get the path to the session file of an account, in a given folder
    pub fn session_file(folder: &Path, account: &str) -> PathBuf {
        let file_name = format!("{}.json", sanitize_filename::sanitize(account));
        folder.join(file_name)
    }

    /// Get the path to the default session file, in a given folder
    pub fn default_session_file(folder: &Path) -> PathBuf {
        folder.join(crate::config::get(&crate::config::SESSION_FILE_NAME))
    }

    /// Initialize a session from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self{
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Initialize an empty session
    pub fn new(path: &Path) -> Self {
        Self{
            backing_file: PathBuf::from(path),
            data: SessionData::default(),
        }
    }

    /// Load the session stored in `path`, or start an empty one if there is none (or if it cannot be read)
    pub fn from_file_or_new(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(session) => session,
            Err(err) => {
                log::debug!("Starting a new session: {}", err);
                Self::new(path)
            },
        }
    }

    /// Store the current session to its backing file
    pub fn save_to_file(&self) -> Result<(), Box<dyn Error>> {
        let path = &self.backing_file;
        if let Some(folder) = path.parent() {
            std::fs::create_dir_all(folder)?;
        }
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(file, &self.data)?;
        Ok(())
    }

    /// Same as [`Self::save_to_file`], but only logs failures. A session that cannot be persisted is still usable in memory.
    fn save_or_warn(&self) {
        if let Err(err) = self.save_to_file() {
            log::warn!("Unable to save session file {:?}: {}", self.backing_file, err);
        }
    }

    pub fn backing_file(&self) -> &Path { &self.backing_file }
    pub fn token(&self) -> Option<&str>  { self.data.token.as_deref() }
    pub fn user(&self) -> Option<&serde_json::Value> { self.data.user.as_ref() }
    pub fn selected_date(&self) -> Option<DateKey>    { self.data.selected_date }

    /// Remember the credentials of a user who just signed in
    pub fn sign_in(&mut self, token: String, user: serde_json::Value) {
        self.data.token = Some(token);
        self.data.user = Some(user);
        self.save_or_warn();
    }

    /// Forget the token and the user, e.g. because the server does not accept the token anymore
    pub fn sign_out(&mut self) {
        self.data.token = None;
        self.data.user = None;
        self.save_or_warn();
    }

    /// Remember which day the user was looking at
    pub fn set_selected_date(&mut self, date: Option<DateKey>) {
        self.data.selected_date = date;
        self.save_or_warn();
    }
}
