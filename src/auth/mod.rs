mod dto;
mod error;
mod password;
mod repo;
mod services;
mod validate;

pub use dto::{Credentials, NewUser, ProfileUpdate, PublicUser};
pub use error::AuthError;
pub use repo::User;
pub use services::AuthStore;
pub use validate::{LoginErrors, LoginForm, SignupErrors, SignupForm};
