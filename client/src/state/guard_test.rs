use futures::executor::block_on;

use super::*;
use crate::net::api::{ApiError, AuthClient};
use crate::net::types::{LoginResponse, RegisterRequest, User};
use crate::util::storage::MemoryStorage;

const HYDRATED_GUEST: GuardInput = GuardInput { role: None, loading: false, mounted: true };

fn signed_in(role: Role) -> GuardInput {
    GuardInput { role: Some(role), loading: false, mounted: true }
}

// =============================================================
// Path policy
// =============================================================

#[test]
fn normalize_path_strips_query_fragment_and_trailing_slash() {
    assert_eq!(normalize_path("/login/"), "/login");
    assert_eq!(normalize_path("/login?next=/dashboard"), "/login");
    assert_eq!(normalize_path("/dashboard#top"), "/dashboard");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("///"), "/");
}

#[test]
fn allow_list_covers_login_register_and_api() {
    for path in ["/login", "/login/", "/register", "/register?ref=x", "/api", "/api/", "/api/auth/login", "/api/x/y"] {
        assert!(is_public_path(path), "{path} should be public");
    }
}

#[test]
fn allow_list_does_not_match_lookalikes() {
    for path in ["/", "/dashboard", "/apis", "/api-docs", "/loginx", "/login/extra", "/registered", "/admin/api"] {
        assert!(!is_public_path(path), "{path} should be protected");
    }
}

#[test]
fn required_roles_matches_admin_subtree_only() {
    assert_eq!(required_roles("/admin"), Some(&[Role::Admin][..]));
    assert_eq!(required_roles("/admin/users/"), Some(&[Role::Admin][..]));
    assert_eq!(required_roles("/administrator"), None);
    assert_eq!(required_roles("/dashboard"), None);
}

// =============================================================
// decide
// =============================================================

#[test]
fn public_paths_render_regardless_of_session_state() {
    let inputs = [
        GuardInput { role: None, loading: true, mounted: false },
        GuardInput { role: None, loading: true, mounted: true },
        HYDRATED_GUEST,
        signed_in(Role::Student),
    ];
    for input in inputs {
        for path in ["/login", "/register", "/api/auth/me"] {
            assert_eq!(decide(path, input), GuardDecision::Render, "{path} with {input:?}");
        }
    }
}

#[test]
fn protected_path_waits_for_hydration() {
    let before_mount = GuardInput { role: None, loading: false, mounted: false };
    let before_read = GuardInput { role: None, loading: true, mounted: true };
    assert_eq!(decide("/dashboard", before_mount), GuardDecision::Loading);
    assert_eq!(decide("/dashboard", before_read), GuardDecision::Loading);
}

#[test]
fn protected_path_never_renders_for_hydrated_guest() {
    for path in ["/", "/dashboard", "/admin", "/channels/42", "/todo?filter=open"] {
        let decision = decide(path, HYDRATED_GUEST);
        assert_eq!(decision, GuardDecision::Redirect(LOGIN_PATH), "{path}");
        assert_ne!(decision, GuardDecision::Render);
    }
}

#[test]
fn protected_path_renders_for_any_signed_in_role() {
    for role in [Role::Admin, Role::Faculty, Role::Student] {
        assert_eq!(decide("/dashboard", signed_in(role)), GuardDecision::Render);
    }
}

#[test]
fn admin_area_redirects_other_roles_to_dashboard() {
    assert_eq!(decide("/admin", signed_in(Role::Admin)), GuardDecision::Render);
    assert_eq!(decide("/admin", signed_in(Role::Faculty)), GuardDecision::Redirect(DASHBOARD_PATH));
    assert_eq!(decide("/admin/", signed_in(Role::Student)), GuardDecision::Redirect(DASHBOARD_PATH));
}

#[test]
fn guard_input_reads_store_flags() {
    let mut store = SessionStore::new(MemoryStorage::new());
    assert_eq!(
        GuardInput::from_store(&store, false),
        GuardInput { role: None, loading: true, mounted: false }
    );
    store.initialize();
    let input = GuardInput::from_store(&store, true);
    assert_eq!(input, HYDRATED_GUEST);
    assert!(!input.is_authenticated());
}

// =============================================================
// GuardPhase
// =============================================================

#[test]
fn phase_default_is_uninitialized() {
    assert_eq!(GuardPhase::default(), GuardPhase::Uninitialized);
}

#[test]
fn phase_walks_checking_to_authorized() {
    let (phase, effect) = GuardPhase::Uninitialized.transition(GuardDecision::Loading);
    assert_eq!((phase, effect), (GuardPhase::Checking, None));
    let (phase, effect) = phase.transition(GuardDecision::Render);
    assert_eq!((phase, effect), (GuardPhase::Authorized, None));
}

#[test]
fn phase_walks_checking_to_unauthorized_through_redirecting() {
    let (phase, _) = GuardPhase::Uninitialized.transition(GuardDecision::Loading);
    let (phase, effect) = phase.transition(GuardDecision::Redirect(LOGIN_PATH));
    assert_eq!(phase, GuardPhase::Redirecting);
    assert_eq!(effect, Some(GuardEffect::Navigate(LOGIN_PATH)));
    let phase = phase.settle();
    assert_eq!(phase, GuardPhase::Unauthorized);
}

#[test]
fn settle_leaves_non_redirect_phases_alone() {
    for phase in [GuardPhase::Uninitialized, GuardPhase::Checking, GuardPhase::Authorized, GuardPhase::Unauthorized] {
        assert_eq!(phase.settle(), phase);
    }
}

#[test]
fn route_change_re_enters_from_any_phase() {
    for phase in [GuardPhase::Authorized, GuardPhase::Unauthorized, GuardPhase::Redirecting] {
        assert_eq!(phase.transition(GuardDecision::Loading).0, GuardPhase::Checking);
        assert_eq!(phase.transition(GuardDecision::Render).0, GuardPhase::Authorized);
    }
}

// =============================================================
// End-to-end scenario against the session store
// =============================================================

struct StudentCollaborator;

impl AuthClient for StudentCollaborator {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        if email == "a@b.com" && password == "password" {
            return Ok(LoginResponse {
                user: User { email: "a@b.com".to_owned(), role: Role::Student, name: "A".to_owned() },
                token: "t1".to_owned(),
            });
        }
        Err(ApiError::Rejected { status: 401, message: "invalid email or password".to_owned() })
    }

    async fn logout(&self, _token: Option<&str>) -> Result<(), ApiError> {
        Ok(())
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<User, ApiError> {
        Err(ApiError::Unavailable)
    }
}

#[test]
fn visit_login_then_dashboard_scenario() {
    let mut store = SessionStore::new(MemoryStorage::new());

    // Before hydration the dashboard shows the neutral loading state.
    assert_eq!(decide("/dashboard", GuardInput::from_store(&store, true)), GuardDecision::Loading);

    store.initialize();
    assert_eq!(
        decide("/dashboard", GuardInput::from_store(&store, true)),
        GuardDecision::Redirect("/login")
    );
    assert_eq!(decide("/login", GuardInput::from_store(&store, true)), GuardDecision::Render);

    assert!(!block_on(store.login(&StudentCollaborator, "a@b.com", "wrong")));
    assert!(!store.is_authenticated());

    assert!(block_on(store.login(&StudentCollaborator, "a@b.com", "password")));
    assert!(store.is_authenticated());
    assert_eq!(decide("/dashboard", GuardInput::from_store(&store, true)), GuardDecision::Render);
    assert_eq!(
        decide("/admin", GuardInput::from_store(&store, true)),
        GuardDecision::Redirect(DASHBOARD_PATH)
    );

    let mut navigated = Vec::new();
    store.logout(|p| navigated.push(p.to_owned()));
    assert_eq!(navigated, vec!["/login".to_owned()]);
    assert_eq!(
        decide("/dashboard", GuardInput::from_store(&store, true)),
        GuardDecision::Redirect("/login")
    );
}

#[test]
fn reload_with_persisted_session_skips_redirect() {
    let mut first = SessionStore::new(MemoryStorage::new());
    first.initialize();
    assert!(block_on(first.login(&StudentCollaborator, "a@b.com", "password")));

    let mut reloaded = SessionStore::new(first.storage().clone());
    assert_eq!(decide("/dashboard", GuardInput::from_store(&reloaded, true)), GuardDecision::Loading);
    reloaded.initialize();
    assert_eq!(decide("/dashboard", GuardInput::from_store(&reloaded, true)), GuardDecision::Render);
}
