use super::*;

#[test]
fn role_serializes_by_variant_name() {
    assert_eq!(serde_json::to_value(Role::Admin).unwrap(), serde_json::json!("Admin"));
    assert_eq!(serde_json::to_value(Role::Faculty).unwrap(), serde_json::json!("Faculty"));
    assert_eq!(serde_json::to_value(Role::Student).unwrap(), serde_json::json!("Student"));
}

#[test]
fn role_rejects_unknown_variant() {
    assert!(serde_json::from_value::<Role>(serde_json::json!("Janitor")).is_err());
    assert!(serde_json::from_value::<Role>(serde_json::json!("student")).is_err());
}

#[test]
fn role_default_is_student() {
    assert_eq!(Role::default(), Role::Student);
}

#[test]
fn login_response_parses_collaborator_payload() {
    let raw = r#"{"user":{"email":"a@b.com","role":"Student","name":"A"},"token":"t1"}"#;
    let resp: LoginResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(resp.token, "t1");
    assert_eq!(resp.user.email, "a@b.com");
    assert_eq!(resp.user.role, Role::Student);
    assert_eq!(resp.user.name, "A");
}

#[test]
fn login_response_missing_token_fails() {
    let raw = r#"{"user":{"email":"a@b.com","role":"Student","name":"A"}}"#;
    assert!(serde_json::from_str::<LoginResponse>(raw).is_err());
}

#[test]
fn user_is_complete_requires_email_and_name() {
    let mut user = User { email: "a@b.com".to_owned(), role: Role::Faculty, name: "A".to_owned() };
    assert!(user.is_complete());
    user.name = "  ".to_owned();
    assert!(!user.is_complete());
    user.name = "A".to_owned();
    user.email = String::new();
    assert!(!user.is_complete());
}

#[test]
fn register_request_omits_absent_role() {
    let req = RegisterRequest {
        email: "a@b.com".to_owned(),
        password: "password".to_owned(),
        name: "A".to_owned(),
        role: None,
    };
    let value = serde_json::to_value(&req).unwrap();
    assert!(value.get("role").is_none());
}

#[test]
fn register_request_accepts_missing_role() {
    let raw = r#"{"email":"a@b.com","password":"password","name":"A"}"#;
    let req: RegisterRequest = serde_json::from_str(raw).unwrap();
    assert_eq!(req.role, None);
}

#[test]
fn error_response_parses_error_field() {
    let resp: ErrorResponse = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
    assert_eq!(resp.error, "nope");
}
