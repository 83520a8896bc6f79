use crate::models::error::AppError;
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::rc::Rc;

const SESSION_KEY: &str = "session";

/// The signed-in user, as far as the dashboard needs to know.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

/// Seam to the external auth provider.
pub trait AuthService {
    fn current_user(&self) -> Option<User>;

    fn sign_out(&self) -> Result<(), AppError>;
}

/// Shared handle passed down as a prop. Equal when it points at the same service.
#[derive(Clone)]
pub struct AuthHandle(Rc<dyn AuthService>);

impl AuthHandle {
    pub fn new(service: impl AuthService + 'static) -> Self {
        Self(Rc::new(service))
    }
}

impl Deref for AuthHandle {
    type Target = dyn AuthService;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for AuthHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Session persisted in browser local storage by the sign-in page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StoredSession;

impl AuthService for StoredSession {
    fn current_user(&self) -> Option<User> {
        LocalStorage::get(SESSION_KEY).ok()
    }

    fn sign_out(&self) -> Result<(), AppError> {
        LocalStorage::get::<User>(SESSION_KEY)
            .map_err(|e| AppError::AuthError(format!("No active session: {e}")))?;
        LocalStorage::delete(SESSION_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoSession;

    impl AuthService for NoSession {
        fn current_user(&self) -> Option<User> {
            None
        }

        fn sign_out(&self) -> Result<(), AppError> {
            Err(AppError::AuthError("No active session".to_string()))
        }
    }

    #[test]
    fn test_handle_equality_is_identity() {
        let handle = AuthHandle::new(NoSession);
        assert!(handle == handle.clone());
        assert!(handle != AuthHandle::new(NoSession));
    }

    #[test]
    fn test_handle_delegates_to_service() {
        let handle = AuthHandle::new(NoSession);
        assert_eq!(handle.current_user(), None);
        assert!(matches!(handle.sign_out(), Err(AppError::AuthError(_))));
    }
}
