use buildsync::auth::AuthenticatedUser;
use buildsync::domain::project::NewProject;
use buildsync::domain::user::UserRole;
use buildsync::forms::auth::{RegisterForm, ResetPasswordForm, SignInForm};
use buildsync::repository::{DieselRepository, ProjectWriter, UserReader};
use buildsync::services::auth as auth_service;
use buildsync::services::main as main_service;
use buildsync::services::{ServiceError, ServiceResult};

mod common;

const SECRET: &str = "integration-test-secret";

fn setup(name: &str) -> (common::TestDb, DieselRepository) {
    let test_db = common::TestDb::new(name);
    let repo = DieselRepository::new(test_db.pool().clone());
    (test_db, repo)
}

fn register_form() -> RegisterForm {
    RegisterForm {
        name: "Jo".into(),
        email: "Jo@Example.com".into(),
        password: "password123".into(),
        password_confirm: "password123".into(),
    }
}

fn signin_form(email: &str, password: &str) -> SignInForm {
    SignInForm {
        email: email.into(),
        password: password.into(),
    }
}

fn form_error<T>(result: ServiceResult<T>) -> String {
    match result {
        Err(ServiceError::Form(message)) => message,
        Err(other) => panic!("expected form error, got {other}"),
        Ok(_) => panic!("expected form error, got success"),
    }
}

#[test]
fn test_registration_and_login_flow() {
    let (_db, repo) = setup("test_registration_and_login_flow.db");

    let (user, token) = auth_service::register(&repo, &register_form(), SECRET).unwrap();
    assert_eq!(user.email, "jo@example.com");
    assert_eq!(user.role, UserRole::Client);
    assert!(!user.email_verified);

    // Duplicate registration is rejected.
    let message = form_error(auth_service::register(&repo, &register_form(), SECRET));
    assert!(message.contains("already exists"));

    // Login is refused until the email is confirmed.
    let message = form_error(auth_service::login(
        &repo,
        &signin_form("jo@example.com", "password123"),
    ));
    assert_eq!(message, "Email not confirmed");

    auth_service::verify_email(&repo, &token, SECRET).unwrap();

    let signed_in = auth_service::login(&repo, &signin_form("Jo@example.com ", "password123"))
        .unwrap();
    assert_eq!(signed_in.id, user.id);

    // Wrong password and unknown email produce the same message.
    let message = form_error(auth_service::login(
        &repo,
        &signin_form("jo@example.com", "wrong-password"),
    ));
    assert_eq!(message, "Invalid email or password");
    let message = form_error(auth_service::login(
        &repo,
        &signin_form("nobody@example.com", "password123"),
    ));
    assert_eq!(message, "Invalid email or password");
}

#[test]
fn test_registration_reports_first_invalid_field() {
    let (_db, repo) = setup("test_registration_first_error.db");

    let mut form = register_form();
    form.name = "".into();
    assert_eq!(
        form_error(auth_service::register(&repo, &form, SECRET)),
        "Name is required"
    );

    let mut form = register_form();
    form.email = "bad-email".into();
    assert_eq!(
        form_error(auth_service::register(&repo, &form, SECRET)),
        "Please enter a valid email address"
    );

    let mut form = register_form();
    form.password = "short".into();
    form.password_confirm = "short".into();
    assert_eq!(
        form_error(auth_service::register(&repo, &form, SECRET)),
        "Password must be at least 8 characters"
    );

    let mut form = register_form();
    form.password_confirm = "different".into();
    assert_eq!(
        form_error(auth_service::register(&repo, &form, SECRET)),
        "Passwords do not match"
    );
}

#[test]
fn test_password_reset_flow() {
    let (_db, repo) = setup("test_password_reset_flow.db");

    let (user, verification) = auth_service::register(&repo, &register_form(), SECRET).unwrap();
    auth_service::verify_email(&repo, &verification, SECRET).unwrap();

    // Unknown accounts get no token.
    assert!(
        auth_service::request_password_reset(&repo, "nobody@example.com", SECRET)
            .unwrap()
            .is_none()
    );

    let token = auth_service::request_password_reset(&repo, "jo@example.com", SECRET)
        .unwrap()
        .expect("reset token for existing account");

    // A verification token cannot be replayed as a reset token.
    let replay = ResetPasswordForm {
        token: verification,
        password: "newpassword1".into(),
        password_confirm: "newpassword1".into(),
    };
    assert!(auth_service::reset_password(&repo, &replay, SECRET).is_err());

    let reset = ResetPasswordForm {
        token,
        password: "newpassword1".into(),
        password_confirm: "newpassword1".into(),
    };
    auth_service::reset_password(&repo, &reset, SECRET).unwrap();

    assert!(
        auth_service::login(&repo, &signin_form("jo@example.com", "password123")).is_err()
    );
    let signed_in =
        auth_service::login(&repo, &signin_form("jo@example.com", "newpassword1")).unwrap();
    assert_eq!(signed_in.id, user.id);
}

#[test]
fn test_resend_verification_only_for_unverified() {
    let (_db, repo) = setup("test_resend_verification.db");

    let (_, token) = auth_service::register(&repo, &register_form(), SECRET).unwrap();

    assert!(
        auth_service::resend_verification(&repo, "jo@example.com", SECRET)
            .unwrap()
            .is_some()
    );

    auth_service::verify_email(&repo, &token, SECRET).unwrap();
    assert!(
        auth_service::resend_verification(&repo, "jo@example.com", SECRET)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_membership_scoping() {
    let (_db, repo) = setup("test_membership_scoping.db");

    let (member, token) = auth_service::register(&repo, &register_form(), SECRET).unwrap();
    auth_service::verify_email(&repo, &token, SECRET).unwrap();
    let member = repo.get_user_by_id(member.id).unwrap().unwrap();

    let project = repo
        .create_project(&NewProject::new("Maple St".into(), "12 Maple St".into(), None))
        .unwrap();
    repo.add_project_member(project.id, member.id).unwrap();

    let claims = AuthenticatedUser::from_user(&member);
    assert!(main_service::ensure_member(&repo, &claims, project.id).is_ok());

    let other_project = repo
        .create_project(&NewProject::new("Oak Ave".into(), "3 Oak Ave".into(), None))
        .unwrap();
    assert!(matches!(
        main_service::ensure_member(&repo, &claims, other_project.id),
        Err(ServiceError::Unauthorized)
    ));

    // Admins see everything.
    let admin_claims = AuthenticatedUser {
        role: UserRole::Admin,
        ..claims
    };
    assert!(main_service::ensure_member(&repo, &admin_claims, other_project.id).is_ok());

    // Selection resolves membership the same way.
    assert!(main_service::select_project(&repo, &admin_claims, project.id).is_ok());
    assert!(matches!(
        main_service::select_project(&repo, &admin_claims, 999),
        Err(ServiceError::NotFound)
    ));
}
