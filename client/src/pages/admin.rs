//! Administration landing page. The route guard keeps non-admins out.

use leptos::prelude::*;

use crate::components::nav_bar::NavBar;
use crate::state::auth::SessionStore;

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<SessionStore>>();
    let email = move || auth.with(|store| store.user().map(|user| user.email.clone()).unwrap_or_default());

    view! {
        <div class="dashboard-page">
            <NavBar/>
            <main class="dashboard-page__body">
                <h1>"Administration"</h1>
                <p class="dashboard-page__details">"Administrator account: " {email}</p>
            </main>
        </div>
    }
}
