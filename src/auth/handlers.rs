use actix_web::{web, HttpRequest, HttpResponse, Responder};
use bcrypt::{hash, verify, DEFAULT_COST};

use super::jwt::{
    generate_access_token, generate_refresh_token, get_access_token_expiry, validate_token,
};
use super::middleware::validate_request_token;
use super::model::{
    AuthStatusResponse, LoginRequest, RefreshRequest, RegisterRequest, Role, TokenResponse,
    UserInfo,
};
use crate::AppState;

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::UniqueViolation)
}

/// Check if setup is required (no admins exist)
#[utoipa::path(
    get,
    path = "/api/auth/status",
    tag = "Authentication",
    responses(
        (status = 200, description = "Auth status", body = AuthStatusResponse)
    )
)]
pub async fn get_auth_status(state: web::Data<AppState>) -> impl Responder {
    let count = state.count_admins().await.unwrap_or(0);
    HttpResponse::Ok().json(AuthStatusResponse {
        has_admins: count > 0,
        setup_required: count == 0,
    })
}

/// Register a new user account.
///
/// The admin role may be requested without credentials only while no admin
/// exists yet; afterwards an admin access token is required.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserInfo),
        (status = 400, description = "Missing fields or password mismatch"),
        (status = 403, description = "Admin role requested without admin credentials"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn register(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> impl Responder {
    if body.username.trim().is_empty()
        || body.email.trim().is_empty()
        || body.password.is_empty()
    {
        return HttpResponse::BadRequest()
            .json(crate::ErrorResponse::bad_request("All fields are required"));
    }

    if body.password != body.confirm_password {
        return HttpResponse::BadRequest()
            .json(crate::ErrorResponse::bad_request("Passwords do not match"));
    }

    let role = body.role.unwrap_or_default();

    // The first admin can register without credentials; after that, only an
    // authenticated admin may hand out the admin role.
    if role == Role::Admin {
        let admin_count = state.count_admins().await.unwrap_or(0);
        if admin_count > 0 {
            let claims = match validate_request_token(&req) {
                Ok(c) => c,
                Err(e) => return e.error_response(),
            };
            if claims.role != Role::Admin.as_str() {
                return HttpResponse::Forbidden().json(crate::ErrorResponse::new(
                    "Forbidden",
                    "Only admins can register new admin users",
                ));
            }
        }
    }

    if let Ok(Some(_)) = state.get_user_by_username(&body.username).await {
        return HttpResponse::Conflict().json(crate::ErrorResponse::new(
            "Conflict",
            "Username or email already exists",
        ));
    }

    let password_hash = match hash(&body.password, DEFAULT_COST) {
        Ok(h) => h,
        Err(e) => {
            log::error!("Failed to hash password: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to register user"));
        }
    };

    match state
        .create_user(&body.username, &body.email, &password_hash, role.as_str())
        .await
    {
        Ok(user) => HttpResponse::Created().json(UserInfo::from(user)),
        Err(e) if is_unique_violation(&e) => HttpResponse::Conflict().json(
            crate::ErrorResponse::new("Conflict", "Username or email already exists"),
        ),
        Err(e) => {
            log::error!("Failed to create user: {:?}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to register user"))
        }
    }
}

/// Login endpoint
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> impl Responder {
    let user = match state.get_user_by_username(&body.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Invalid username or password",
            ));
        }
        Err(e) => {
            log::error!("Database error during login: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Login failed"));
        }
    };

    // Verify password
    let password_valid = verify(&body.password, &user.password_hash).unwrap_or(false);
    if !password_valid {
        return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
            "Unauthorized",
            "Invalid username or password",
        ));
    }

    // Generate tokens
    let user_id = user.id.to_string();
    let access_token = match generate_access_token(&user_id, &user.username, &user.role) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to generate access token: {:?}", e);
            return HttpResponse::InternalServerError().json(crate::ErrorResponse::internal_error(
                "Failed to generate token",
            ));
        }
    };

    let refresh_token = match generate_refresh_token(&user_id, &user.username, &user.role) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to generate refresh token: {:?}", e);
            return HttpResponse::InternalServerError().json(crate::ErrorResponse::internal_error(
                "Failed to generate token",
            ));
        }
    };

    // Store refresh token in database (invalidates any previous session)
    if let Err(e) = state
        .update_user_refresh_token(&user.id, &refresh_token)
        .await
    {
        log::error!("Failed to store refresh token: {:?}", e);
        // Continue anyway, token is still valid
    }

    HttpResponse::Ok().json(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: get_access_token_expiry(),
    })
}

/// Refresh access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "Authentication",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token refreshed", body = TokenResponse),
        (status = 401, description = "Invalid refresh token")
    )
)]
pub async fn refresh_token(
    state: web::Data<AppState>,
    body: web::Json<RefreshRequest>,
) -> impl Responder {
    // Validate refresh token
    let claims = match validate_token(&body.refresh_token) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Invalid refresh token: {:?}", e);
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Invalid or expired refresh token",
            ));
        }
    };

    if claims.token_type != "refresh" {
        return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
            "Unauthorized",
            "Invalid token type",
        ));
    }

    // Check if this refresh token matches what's in database (single device session)
    let user = match state.get_user_by_refresh_token(&body.refresh_token).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Session expired. Please login again.",
            ));
        }
        Err(e) => {
            log::error!("Database error during refresh: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Refresh failed"));
        }
    };

    // Generate new access token only (keep same refresh token)
    let user_id = user.id.to_string();
    let access_token = match generate_access_token(&user_id, &user.username, &user.role) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to generate access token: {:?}", e);
            return HttpResponse::InternalServerError().json(crate::ErrorResponse::internal_error(
                "Failed to generate token",
            ));
        }
    };

    HttpResponse::Ok().json(TokenResponse {
        access_token,
        refresh_token: body.refresh_token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: get_access_token_expiry(),
    })
}

/// Configure auth routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/status", web::get().to(get_auth_status))
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh_token)),
    );
}
