use gloo_storage::{LocalStorage, Storage};

const USER_ID_KEY: &str = "userId";
const USER_NAME_KEY: &str = "userName";
const USER_EMAIL_KEY: &str = "userEmail";

/// Identity cached in local storage by the login flow. Plain strings, not a
/// credential: there is no expiry and no server-side session behind it. The
/// struct is loaded once by the app shell and passed down, so no view reads
/// storage keys ad hoc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub user_name: String,
    pub user_email: Option<String>,
}

impl Session {
    /// Reads the keys the login flow wrote. `userId` is required since every
    /// request is scoped by it; a missing display name falls back to "User".
    pub fn load() -> Option<Self> {
        let user_id: String = LocalStorage::get(USER_ID_KEY).ok()?;
        let user_name = LocalStorage::get(USER_NAME_KEY).unwrap_or_else(|_| "User".to_string());
        let user_email = LocalStorage::get(USER_EMAIL_KEY).ok();
        Some(Self {
            user_id,
            user_name,
            user_email,
        })
    }

    /// Logout teardown: removes every session key.
    pub fn clear() {
        LocalStorage::delete(USER_ID_KEY);
        LocalStorage::delete(USER_NAME_KEY);
        LocalStorage::delete(USER_EMAIL_KEY);
    }
}
