use super::*;

#[test]
fn parse_role_choice_accepts_self_service_roles_only() {
    assert_eq!(parse_role_choice("Student"), Some(Role::Student));
    assert_eq!(parse_role_choice("Faculty"), Some(Role::Faculty));
    assert_eq!(parse_role_choice("Admin"), None);
    assert_eq!(parse_role_choice("student"), None);
}

#[test]
fn validate_register_input_builds_trimmed_request() {
    let request = validate_register_input("  Ada  ", " ada@school.edu ", "password1", "Faculty").unwrap();
    assert_eq!(request.name, "Ada");
    assert_eq!(request.email, "ada@school.edu");
    assert_eq!(request.password, "password1");
    assert_eq!(request.role, Some(Role::Faculty));
}

#[test]
fn validate_register_input_requires_all_fields() {
    assert_eq!(
        validate_register_input("", "a@b.com", "password", "Student"),
        Err("Fill in name, email and password.")
    );
    assert_eq!(
        validate_register_input("A", "  ", "password", "Student"),
        Err("Fill in name, email and password.")
    );
    assert_eq!(
        validate_register_input("A", "a@b.com", "", "Student"),
        Err("Fill in name, email and password.")
    );
}

#[test]
fn validate_register_input_checks_email_and_password_length() {
    assert_eq!(
        validate_register_input("A", "not-an-email", "password", "Student"),
        Err("Enter a valid email address.")
    );
    assert_eq!(
        validate_register_input("A", "a@b.com", "short", "Student"),
        Err("Password must be at least 8 characters.")
    );
}

#[test]
fn validate_register_input_rejects_admin_role() {
    assert_eq!(
        validate_register_input("A", "a@b.com", "password", "Admin"),
        Err("Choose Student or Faculty.")
    );
}
