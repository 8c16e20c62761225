//! Top navigation bar with identity badge and logout.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Role;
use crate::state::auth::SessionStore;
use crate::state::guard::DASHBOARD_PATH;

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();

    let identity = move || {
        auth.with(|store| {
            store
                .user()
                .map(|user| format!("{} · {}", user.name, user.role.label()))
                .unwrap_or_default()
        })
    };
    let is_admin = move || auth.with(|store| store.role() == Some(Role::Admin));

    let on_logout = move |_| {
        let token = auth.with_untracked(|store| store.token().map(str::to_owned));

        // Navigate after the update so no effect observes the store mid-write.
        let mut target = None;
        auth.update(|store| store.logout(|path| target = Some(path.to_owned())));
        if let Some(target) = target {
            navigate(&target, NavigateOptions::default());
        }

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::{AuthClient, HttpAuthClient};
            if let Err(e) = HttpAuthClient::default().logout(token.as_deref()).await {
                leptos::logging::warn!("logout notification failed: {e}");
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = token;
    };

    view! {
        <nav class="nav-bar">
            <a href=DASHBOARD_PATH class="nav-bar__brand">"Campus"</a>
            <Show when=is_admin>
                <a href="/admin" class="nav-bar__link">"Admin"</a>
            </Show>
            <span class="nav-bar__spacer"></span>
            <span class="nav-bar__identity">{identity}</span>
            <button class="btn nav-bar__logout" on:click=on_logout>
                "Log out"
            </button>
        </nav>
    }
}
