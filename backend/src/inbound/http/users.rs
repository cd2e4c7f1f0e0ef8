//! User account API handlers.
//!
//! ```text
//! POST  /api/user/create {"email":"cook@example.com","password":"secret","name":"Cook"}
//! POST  /api/user/token  {"email":"cook@example.com","password":"secret"}
//! GET   /api/user/me     Authorization: Token <key>
//! PATCH /api/user/me     {"name":"Head Cook"}
//! ```

use actix_web::{HttpResponse, Scope, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::{RegisterUserRequest, UpdateProfileRequest};
use crate::domain::{Error, IdentityError, LoginCredentials, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::error::{json_error_handler, method_not_allowed};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/user/create`.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "cook@example.com")]
    pub email: String,
    #[schema(example = "testpass123", min_length = 5)]
    pub password: String,
    #[schema(example = "Cook")]
    pub name: String,
}

impl From<CreateUserRequest> for RegisterUserRequest {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            email: value.email,
            password: Zeroizing::new(value.password),
            name: value.name,
        }
    }
}

/// Credentials body for `POST /api/user/token`.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct TokenRequest {
    #[schema(example = "cook@example.com")]
    pub email: String,
    #[schema(example = "testpass123")]
    pub password: String,
}

/// Token issued by `POST /api/user/token`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    pub token: String,
}

/// Public projection of the caller's account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(example = "Cook")]
    pub name: String,
    #[schema(example = "cook@example.com")]
    pub email: String,
}

impl From<UserProfile> for ProfileResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            name: value.name,
            email: value.email,
        }
    }
}

/// Partial update body for `PATCH /api/user/me`. Omitted fields are kept.
#[derive(Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateProfileBody {
    #[schema(example = "Head Cook")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateProfileBody> for UpdateProfileRequest {
    fn from(value: UpdateProfileBody) -> Self {
        Self {
            name: value.name,
            email: value.email,
            password: value.password.map(Zeroizing::new),
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/user/create",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = ProfileResponse),
        (status = 400, description = "Invalid or duplicate identity", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let profile = state
        .registration
        .register(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ProfileResponse::from(profile)))
}

/// Exchange credentials for the account's token.
///
/// Repeated calls return the same token. Unknown emails, wrong passwords and
/// inactive accounts share one `400` response.
#[utoipa::path(
    post,
    path = "/api/user/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Unable to authenticate", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createToken",
    security([])
)]
pub async fn create_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let TokenRequest { email, password } = payload.into_inner();
    let password = Zeroizing::new(password);
    let credentials = LoginCredentials::try_from_parts(&email, &password)
        .map_err(|err| Error::from(IdentityError::from(err)))?;
    let token = state.login.authenticate(&credentials).await?;
    Ok(web::Json(TokenResponse {
        token: token.as_str().to_owned(),
    }))
}

/// Return the authenticated caller's profile.
#[utoipa::path(
    get,
    path = "/api/user/me",
    responses(
        (status = 200, description = "Current profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 405, description = "Method not allowed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getProfile"
)]
pub async fn get_profile(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let profile = state.profile.fetch_profile(user.id()).await?;
    Ok(web::Json(profile.into()))
}

/// Apply a partial update to the authenticated caller's profile.
#[utoipa::path(
    patch,
    path = "/api/user/me",
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
pub async fn update_profile(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<UpdateProfileBody>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let profile = state
        .profile_command
        .update_profile(user.id(), payload.into_inner().into())
        .await?;
    Ok(web::Json(profile.into()))
}

/// Build the `/api/user` scope with JSON error mapping and a `405`
/// fallback on every resource.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use recipe_backend::inbound::http::users::user_scope;
///
/// let app = App::new().service(user_scope());
/// ```
pub fn user_scope() -> Scope {
    web::scope("/api/user")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::resource("/create")
                .route(web::post().to(create_user))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/token")
                .route(web::post().to(create_token))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/me")
                .route(web::get().to(get_profile))
                .route(web::patch().to(update_profile))
                .default_service(web::to(method_not_allowed)),
        )
}
