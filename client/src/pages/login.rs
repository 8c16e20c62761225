//! Login page: email + password against the auth API.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::SessionStore;
use crate::state::guard::{DASHBOARD_PATH, REGISTER_PATH};

/// Trim the email and require both fields. Passwords are taken verbatim.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Fires on page load for a returning user and again after a successful submit.
    Effect::new(move || {
        let signed_in = auth.with(|store| !store.is_loading() && store.is_authenticated());
        if signed_in {
            navigate(DASHBOARD_PATH, NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::{AuthClient, HttpAuthClient};
            let outcome = HttpAuthClient::default().login(&email_value, &password_value).await;
            let ok = auth.try_update(|store| store.complete_login(outcome)).unwrap_or(false);
            busy.set(false);
            if ok {
                password.set(String::new());
                info.set(String::new());
            } else {
                info.set("Invalid email or password.".to_owned());
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (email_value, password_value);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Campus"</h1>
                <p class="login-card__subtitle">"Sign in"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@school.edu"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <a href=REGISTER_PATH class="login-link">"Create an account"</a>
            </div>
        </div>
    }
}
