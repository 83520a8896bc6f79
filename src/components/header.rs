use yew::prelude::*;

use crate::services::auth::{AuthHandle, AuthService, User};

/// Signs out through `auth`; `Err` carries the text for the alert.
pub fn sign_out(auth: &dyn AuthService) -> Result<(), String> {
    auth.sign_out().map_err(|e| format!("Error signing out: {e}"))
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub user: User,
    pub auth: AuthHandle,
    pub on_signed_out: Callback<()>,
}

/// Page header with the signed-in user and a sign-out button
#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_sign_out = {
        let auth = props.auth.clone();
        let on_signed_out = props.on_signed_out.clone();
        Callback::from(move |_: MouseEvent| match sign_out(&*auth) {
            Ok(()) => on_signed_out.emit(()),
            Err(message) => {
                gloo::console::error!(&message);
                gloo::dialogs::alert(&message);
            }
        })
    };

    html! {
        <header class="app-header">
            <h1>{"U.S. Energy Dashboard"}</h1>
            <div class="user-menu">
                <span class="user-email">{&props.user.email}</span>
                <button type="button" class="sign-out" onclick={on_sign_out}>
                    {"Sign out"}
                </button>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::AppError;
    use std::cell::Cell;

    struct FakeAuth {
        fail: bool,
        calls: Cell<usize>,
    }

    impl AuthService for FakeAuth {
        fn current_user(&self) -> Option<User> {
            Some(User {
                email: "analyst@example.com".to_string(),
            })
        }

        fn sign_out(&self) -> Result<(), AppError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(AppError::AuthError("provider unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_sign_out_success() {
        let auth = FakeAuth {
            fail: false,
            calls: Cell::new(0),
        };
        assert_eq!(sign_out(&auth), Ok(()));
        assert_eq!(auth.calls.get(), 1);
    }

    #[test]
    fn test_sign_out_failure_message() {
        let auth = FakeAuth {
            fail: true,
            calls: Cell::new(0),
        };
        assert_eq!(
            sign_out(&auth),
            Err("Error signing out: Authentication error: provider unavailable".to_string())
        );
    }
}
