//! Token authentication for HTTP handlers.
//!
//! Clients present the opaque key from `POST /api/user/token` in the
//! `Authorization` header using either the `Token` or `Bearer` scheme. The
//! [`AuthenticatedUser`] extractor resolves it through the
//! [`TokenAuthenticator`](crate::domain::ports::TokenAuthenticator) port so
//! handlers receive an identity or the request short-circuits with `401`.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{AuthToken, Error, UserId};

use super::state::HttpState;

const TOKEN_SCHEMES: [&str; 2] = ["Token", "Bearer"];

/// Identity resolved from the request's `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// Identifier of the authenticated user.
    pub fn id(&self) -> &UserId {
        &self.0
    }
}

/// Extract the token key from an `Authorization` header value.
///
/// The scheme match is case-insensitive; surrounding whitespace is ignored.
pub(crate) fn parse_authorization(value: &str) -> Result<AuthToken, Error> {
    let (scheme, key) = value
        .trim()
        .split_once(char::is_whitespace)
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    if !TOKEN_SCHEMES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(scheme))
    {
        return Err(Error::unauthorized("unsupported authorization scheme"));
    }
    AuthToken::parse(key.trim()).map_err(|err| {
        debug!(error = %err, "rejected malformed token");
        Error::unauthorized("invalid token")
    })
}

fn bearer_token(req: &HttpRequest) -> Result<AuthToken, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("authentication credentials were not provided"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    parse_authorization(value)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered with the app"))?;
            let user_id = state.tokens.resolve(&token).await?;
            Ok(AuthenticatedUser(user_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        MockLoginService, MockTokenAuthenticator, MockUserProfileCommand, MockUserProfileQuery,
        MockUserRegistration,
    };
    use crate::inbound::http::state::HttpStatePorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;

    const KEY: &str = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b";

    #[rstest]
    #[case("Token 9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    #[case("Bearer 9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    #[case("token   9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b  ")]
    fn accepts_known_schemes(#[case] header: &str) {
        let token = parse_authorization(header).expect("header parses");
        assert_eq!(token.as_str(), KEY);
    }

    #[rstest]
    #[case("9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    #[case("Basic 9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    #[case("Token not-a-token")]
    #[case("Token ")]
    fn rejects_bad_headers(#[case] header: &str) {
        let err = parse_authorization(header).expect_err("header rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    fn state_with(tokens: MockTokenAuthenticator) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            registration: Arc::new(MockUserRegistration::new()),
            login: Arc::new(MockLoginService::new()),
            tokens: Arc::new(tokens),
            profile: Arc::new(MockUserProfileQuery::new()),
            profile_command: Arc::new(MockUserProfileCommand::new()),
        }))
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.id().to_string())
    }

    #[actix_web::test]
    async fn extractor_resolves_identity() {
        let user_id = UserId::random();
        let mut tokens = MockTokenAuthenticator::new();
        tokens
            .expect_resolve()
            .withf(|token| token.as_str() == KEY)
            .times(1)
            .return_once(move |_| Ok(user_id));
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(tokens))
                .route("/", web::get().to(whoami)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((AUTHORIZATION, format!("Token {KEY}")))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = actix_test::read_body(res).await;
        assert_eq!(body, user_id.to_string());
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorised_without_lookup() {
        let mut tokens = MockTokenAuthenticator::new();
        tokens.expect_resolve().never();
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(tokens))
                .route("/", web::get().to(whoami)),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unknown_token_is_unauthorised() {
        let mut tokens = MockTokenAuthenticator::new();
        tokens
            .expect_resolve()
            .return_once(|_| Err(Error::unauthorized("invalid token")));
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(tokens))
                .route("/", web::get().to(whoami)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((AUTHORIZATION, format!("Bearer {KEY}")))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::Unauthorized);
    }
}
