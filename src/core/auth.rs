//! Login check guarding content edits
//!
//! This is a placeholder, not access control: the app is single-user and the
//! credential pair is fixed in the binary. It only keeps the edit forms out
//! of the way while browsing.

/// Decides whether a username/password pair may edit content
pub trait Authenticator {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Fixed `user` / `pass` credentials
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAuthenticator;

impl PlaceholderAuthenticator {
    pub const USERNAME: &'static str = "user";
    pub const PASSWORD: &'static str = "pass";
}

impl Authenticator for PlaceholderAuthenticator {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == Self::USERNAME && password == Self::PASSWORD
    }
}
