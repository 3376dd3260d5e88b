use thiserror::Error;

/// Everything an auth operation can fail with. All of these are terminal for
/// the operation that raised them; nothing is retried internally.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration with an email that is already taken, compared
    /// case-insensitively.
    #[error("email already registered")]
    DuplicateEmail,

    /// No user matches the supplied email/password pair. One kind for both
    /// unknown email and wrong password, so callers cannot leak which part
    /// was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A profile operation needs an active session and there is none.
    #[error("not logged in")]
    NotLoggedIn,

    /// The backing store failed, returned corrupt state, or hashing failed.
    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}
