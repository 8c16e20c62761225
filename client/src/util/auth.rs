//! Route-guard effect executor.
//!
//! SYSTEM CONTEXT
//! ==============
//! `state::guard` decides; this module performs the navigation that a
//! decision asks for. Keeping the two apart lets the decision logic run in
//! plain unit tests while only this thin layer needs a router.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::guard::{GuardDecision, GuardEffect, GuardPhase};

/// Advance `phase` for `decision`, running any redirect through `navigate`.
pub fn apply_decision<F>(phase: GuardPhase, decision: GuardDecision, navigate: F) -> GuardPhase
where
    F: FnOnce(&str),
{
    let (next, effect) = phase.transition(decision);
    match effect {
        Some(GuardEffect::Navigate(target)) => {
            navigate(target);
            next.settle()
        }
        None => next,
    }
}

/// Re-evaluate the guard on every route change and on every decision change.
///
/// Redirects replace the current history entry so the back button does not
/// bounce the user into the guard again.
pub fn install_route_guard<F>(path: Memo<String>, decision: Memo<GuardDecision>, phase: RwSignal<GuardPhase>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        path.track();
        let decision = decision.get();
        let navigate = navigate.clone();
        let next = apply_decision(phase.get_untracked(), decision, |target| {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        });
        phase.set(next);
    });
}
