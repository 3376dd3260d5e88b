use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::auth::dto::{Credentials, NewUser, ProfileUpdate};
use crate::auth::error::AuthError;
use crate::auth::password;
use crate::auth::repo::User;
use crate::store::KeyValueStore;

/// The credential & session store. One handle per app, passed down
/// explicitly; clones share the backing and the session channel.
#[derive(Clone)]
pub struct AuthStore {
    store: Arc<dyn KeyValueStore>,
    session_tx: Arc<watch::Sender<Option<User>>>,
}

impl AuthStore {
    /// Open the store over a key-value backing, seeding the session channel
    /// with whatever session a previous run persisted.
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Result<Self, AuthError> {
        let session = User::load_session(store.as_ref()).await?;
        let (session_tx, _) = watch::channel(session);
        Ok(Self {
            store,
            session_tx: Arc::new(session_tx),
        })
    }

    /// Current session record, or `None` while logged out. Read-only.
    pub async fn session_user(&self) -> Result<Option<User>, AuthError> {
        Ok(User::load_session(self.store.as_ref()).await?)
    }

    /// Persist `user` as the current session, replacing any prior one in
    /// full. Registration does not log the user in; signup screens call this
    /// right after `register` when they want that.
    pub async fn set_session_user(&self, user: User) -> Result<(), AuthError> {
        User::save_session(self.store.as_ref(), &user).await?;
        self.session_tx.send_replace(Some(user));
        Ok(())
    }

    /// Watch session changes made through this store. The receiver always
    /// holds the latest session snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.session_tx.subscribe()
    }

    /// Create a user. Fails with `DuplicateEmail` when the email is already
    /// taken under case-insensitive comparison, persisting nothing. Does not
    /// touch the session.
    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    pub async fn register(&self, new_user: NewUser) -> Result<User, AuthError> {
        let users = User::load_all(self.store.as_ref()).await?;

        let wanted = new_user.email.to_lowercase();
        if users.iter().any(|u| u.email.to_lowercase() == wanted) {
            warn!("email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: now.unix_timestamp_nanos().to_string(),
            name: new_user.name,
            email: new_user.email,
            password_hash: password::hash(&new_user.password)?,
            created_at: now,
        };

        let mut updated = Vec::with_capacity(users.len() + 1);
        updated.push(user.clone());
        updated.extend(users);
        User::save_all(self.store.as_ref(), &updated).await?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Log in, setting the matched record as the current session. Unknown
    /// email and wrong password surface the same error.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: Credentials) -> Result<User, AuthError> {
        let users = User::load_all(self.store.as_ref()).await?;
        let wanted = credentials.email.to_lowercase();

        let mut found = None;
        for user in users {
            if user.email.to_lowercase() == wanted
                && password::verify(&credentials.password, &user.password_hash)?
            {
                found = Some(user);
                break;
            }
        }

        let user = match found {
            Some(user) => user,
            None => {
                warn!("login with invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
        };

        User::save_session(self.store.as_ref(), &user).await?;
        self.session_tx.send_replace(Some(user.clone()));

        info!(user_id = %user.id, "user logged in");
        Ok(user)
    }

    /// Rename the logged-in user, rewriting both the stored record and the
    /// session snapshot. Every other field stays as it was.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User, AuthError> {
        let session = match User::load_session(self.store.as_ref()).await? {
            Some(session) => session,
            None => {
                warn!("profile update without a session");
                return Err(AuthError::NotLoggedIn);
            }
        };

        let mut users = User::load_all(self.store.as_ref()).await?;
        for user in users.iter_mut() {
            if user.id == session.id {
                user.name = update.name.clone();
            }
        }
        User::save_all(self.store.as_ref(), &users).await?;

        let updated = User {
            name: update.name,
            ..session
        };
        User::save_session(self.store.as_ref(), &updated).await?;
        self.session_tx.send_replace(Some(updated.clone()));

        info!(user_id = %updated.id, "profile updated");
        Ok(updated)
    }

    /// Clear the session. Logging out while logged out is fine.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        User::clear_session(self.store.as_ref()).await?;
        self.session_tx.send_replace(None);
        info!("session cleared");
        Ok(())
    }
}
