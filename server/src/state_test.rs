use super::*;

#[tokio::test]
async fn test_state_seeds_one_account_per_role() {
    let state = test_helpers::test_app_state();
    let users = state.users.read().await;
    assert_eq!(users.len(), 3);
    assert!(users.verify(test_helpers::ADMIN_EMAIL, test_helpers::PASSWORD).is_some());
}

#[tokio::test]
async fn new_state_has_no_sessions() {
    let state = AppState::new(UserDirectory::new(), ServerConfig::default());
    assert!(state.sessions.read().await.is_empty());
    assert!(state.users.read().await.is_empty());
}

#[tokio::test]
async fn clones_share_session_table() {
    let state = test_helpers::test_app_state();
    let other = state.clone();
    let token = test_helpers::issue_token(&state, test_helpers::STUDENT_EMAIL).await;
    assert_eq!(other.sessions.read().await.validate(&token), Some(test_helpers::STUDENT_EMAIL));
}

#[tokio::test]
async fn session_ttl_comes_from_config() {
    let config = ServerConfig { token_ttl: time::Duration::seconds(1), ..ServerConfig::default() };
    let state = AppState::new(UserDirectory::new(), config);
    let mut sessions = state.sessions.write().await;
    let now = time::OffsetDateTime::now_utc();
    let token = sessions.issue_at("a@b.com", now);
    assert!(sessions.validate_at(&token, now + time::Duration::seconds(2)).is_none());
}
