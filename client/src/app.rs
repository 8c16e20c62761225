//! Root application component with routing and the session context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_guard::RouteGuard;
use crate::pages::{admin::AdminPage, dashboard::DashboardPage, login::LoginPage, register::RegisterPage};
use crate::state::auth::SessionStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the single session store for the page's lifetime and hydrates it from
/// durable storage once the app has mounted in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth: RwSignal<SessionStore> = RwSignal::new(SessionStore::default());
    provide_context(auth);

    // Effects never run during SSR, so the server always renders the
    // pre-hydration state and the browser reads storage exactly once.
    Effect::new(move || auth.update(SessionStore::initialize));

    view! {
        <Stylesheet id="leptos" href="/pkg/campus.css"/>
        <Title text="Campus"/>

        <Router>
            <RouteGuard>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("admin") view=AdminPage/>
                    <Route path=StaticSegment("") view=DashboardPage/>
                </Routes>
            </RouteGuard>
        </Router>
    }
}
