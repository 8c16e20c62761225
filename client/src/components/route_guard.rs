//! Route guard wrapper applied around every page route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sits inside the `<Router>` so it sees every path change. The decision is
//! memoized, so children are only rebuilt when the verdict itself changes,
//! not on every navigation between protected pages.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::SessionStore;
use crate::state::guard::{GuardDecision, GuardInput, GuardPhase, decide};
use crate::util::auth::install_route_guard;

/// Render `children` only when the guard allows the current path.
#[component]
pub fn RouteGuard(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<SessionStore>>();
    let location = use_location();
    let navigate = use_navigate();

    // Effects only run in the browser, after hydration.
    let mounted = RwSignal::new(false);
    Effect::new(move || mounted.set(true));

    let path = location.pathname;
    let decision = Memo::new(move |_| {
        let input = auth.with(|store| GuardInput::from_store(store, mounted.get()));
        decide(&path.get(), input)
    });
    let phase = RwSignal::new(GuardPhase::default());
    install_route_guard(path, decision, phase, navigate);

    move || match decision.get() {
        GuardDecision::Loading => view! {
            <div class="route-guard route-guard--loading">"Loading..."</div>
        }
        .into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::Redirect(_) => ().into_any(),
    }
}
