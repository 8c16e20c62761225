//! Dashboard page: the authenticated landing route.

use leptos::prelude::*;

use crate::components::nav_bar::NavBar;
use crate::state::auth::SessionStore;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<SessionStore>>();

    let greeting = move || {
        auth.with(|store| {
            store
                .user()
                .map(|user| format!("Welcome, {}", user.name))
                .unwrap_or_default()
        })
    };
    let details = move || {
        auth.with(|store| {
            store
                .user()
                .map(|user| format!("Signed in as {} ({})", user.email, user.role.label()))
                .unwrap_or_default()
        })
    };

    view! {
        <div class="dashboard-page">
            <NavBar/>
            <main class="dashboard-page__body">
                <h1>{greeting}</h1>
                <p class="dashboard-page__details">{details}</p>
            </main>
        </div>
    }
}
