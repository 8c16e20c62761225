//! Registration page. A successful sign-up signs the new user in directly.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::{RegisterRequest, Role};
use crate::state::auth::SessionStore;
use crate::state::guard::{DASHBOARD_PATH, LOGIN_PATH};

/// Shortest password the server accepts.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Roles a visitor may pick for themselves.
pub(crate) fn parse_role_choice(value: &str) -> Option<Role> {
    match value {
        "Student" => Some(Role::Student),
        "Faculty" => Some(Role::Faculty),
        _ => None,
    }
}

pub(crate) fn validate_register_input(
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<RegisterRequest, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Fill in name, email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    let role = parse_role_choice(role).ok_or("Choose Student or Faculty.")?;
    Ok(RegisterRequest {
        email: email.to_owned(),
        password: password.to_owned(),
        name: name.to_owned(),
        role: Some(role),
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new("Student".to_owned());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

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
        let request = match validate_register_input(&name.get(), &email.get(), &password.get(), &role.get()) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::{ApiError, AuthClient, HttpAuthClient};
            let client = HttpAuthClient::default();
            match client.register(&request).await {
                Ok(_) => {
                    let outcome = client.login(&request.email, &request.password).await;
                    let ok = auth.try_update(|store| store.complete_login(outcome)).unwrap_or(false);
                    if !ok {
                        info.set("Account created. Please sign in.".to_owned());
                    }
                }
                Err(ApiError::Rejected { message, .. }) => info.set(message),
                Err(e) => info.set(format!("Registration failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Campus"</h1>
                <p class="login-card__subtitle">"Create an account"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Full name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
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
                        placeholder="Password (8+ characters)"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <select
                        class="login-input"
                        prop:value=move || role.get()
                        on:change=move |ev| role.set(event_target_value(&ev))
                    >
                        <option value="Student">"Student"</option>
                        <option value="Faculty">"Faculty"</option>
                    </select>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Register"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <a href=LOGIN_PATH class="login-link">"Already registered? Sign in"</a>
            </div>
        </div>
    }
}
