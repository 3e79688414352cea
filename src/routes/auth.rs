use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::auth::{
    ForgotPasswordForm, RegisterForm, ResendVerificationForm, ResetPasswordForm, SignInForm,
};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{anonymous_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth as auth_service;

#[get("/auth/signin")]
pub async fn show_signin(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = anonymous_context(&flash_messages);
    render_template(&tera, "auth/signin.html", &context)
}

#[post("/auth/signin")]
pub async fn signin(
    request: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<SignInForm>,
) -> impl Responder {
    let user = match auth_service::login(repo.get_ref(), &form) {
        Ok(user) => user,
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect("/auth/signin");
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            FlashMessage::error("Failed to sign in").send();
            return redirect("/auth/signin");
        }
    };

    let claims = AuthenticatedUser::from_user(&user);
    let token = match claims.to_jwt(&server_config.secret) {
        Ok(token) => token,
        Err(err) => {
            log::error!("Failed to issue session token: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(err) = Identity::login(&request.extensions(), token) {
        log::error!("Failed to attach identity: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    redirect("/")
}

#[get("/auth/signup")]
pub async fn show_signup(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = anonymous_context(&flash_messages);
    render_template(&tera, "auth/signup.html", &context)
}

#[post("/auth/signup")]
pub async fn signup(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    match auth_service::register(repo.get_ref(), &form, &server_config.secret) {
        Ok((user, token)) => {
            // Delivery is out of scope; surface the link in the server log.
            log::info!(
                "Verification link for {}: https://{}/auth/verify?token={token}",
                user.email,
                server_config.domain
            );
            FlashMessage::success("Account created. Check your email to confirm it.").send();
            redirect("/auth/signin")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/auth/signup")
        }
        Err(err) => {
            log::error!("Failed to register: {err}");
            FlashMessage::error("Failed to create the account").send();
            redirect("/auth/signup")
        }
    }
}

#[derive(Deserialize)]
pub struct VerifyQuery {
    pub token: String,
}

#[get("/auth/verify")]
pub async fn verify_email(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    query: web::Query<VerifyQuery>,
) -> impl Responder {
    match auth_service::verify_email(repo.get_ref(), &query.token, &server_config.secret) {
        Ok(()) => {
            FlashMessage::success("Email confirmed. You can sign in now.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to verify email: {err}");
            FlashMessage::error("Failed to confirm the email").send();
        }
    }
    redirect("/auth/signin")
}

#[post("/auth/resend")]
pub async fn resend_verification(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<ResendVerificationForm>,
) -> impl Responder {
    match auth_service::resend_verification(repo.get_ref(), &form.email, &server_config.secret) {
        Ok(Some(token)) => {
            log::info!(
                "Verification link for {}: https://{}/auth/verify?token={token}",
                form.email.trim().to_lowercase(),
                server_config.domain
            );
        }
        Ok(None) => {}
        Err(err) => {
            log::error!("Failed to resend verification: {err}");
        }
    }
    // Same message whether or not the account exists.
    FlashMessage::success("If the account needs confirmation, a new link was sent.").send();
    redirect("/auth/signin")
}

#[get("/auth/reset")]
pub async fn show_reset_request(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = anonymous_context(&flash_messages);
    render_template(&tera, "auth/reset_request.html", &context)
}

#[post("/auth/reset")]
pub async fn request_reset(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<ForgotPasswordForm>,
) -> impl Responder {
    match auth_service::request_password_reset(repo.get_ref(), &form.email, &server_config.secret)
    {
        Ok(Some(token)) => {
            log::info!(
                "Password reset link for {}: https://{}/auth/reset/confirm?token={token}",
                form.email.trim().to_lowercase(),
                server_config.domain
            );
        }
        Ok(None) => {}
        Err(err) => {
            log::error!("Failed to issue password reset: {err}");
        }
    }
    FlashMessage::success("If the account exists, a reset link was sent.").send();
    redirect("/auth/signin")
}

#[derive(Deserialize)]
pub struct ResetQuery {
    pub token: String,
}

#[get("/auth/reset/confirm")]
pub async fn show_reset_confirm(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<ResetQuery>,
) -> impl Responder {
    let mut context = anonymous_context(&flash_messages);
    context.insert("token", &query.token);
    render_template(&tera, "auth/reset_confirm.html", &context)
}

#[post("/auth/reset/confirm")]
pub async fn reset_password(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<ResetPasswordForm>,
) -> impl Responder {
    match auth_service::reset_password(repo.get_ref(), &form, &server_config.secret) {
        Ok(()) => {
            FlashMessage::success("Password updated. Sign in with the new password.").send();
            redirect("/auth/signin")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/auth/reset/confirm?token={}", form.token))
        }
        Err(err) => {
            log::error!("Failed to reset password: {err}");
            FlashMessage::error("Failed to update the password").send();
            redirect("/auth/signin")
        }
    }
}

#[get("/auth/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    redirect("/auth/signin")
}
