//! Session authentication middleware.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use storefront_app::auth::AuthServiceError;

use crate::{extensions::*, state::State};

/// Resolves the bearer session token to a user and stores it in the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    };

    let user = match state.app.auth.authenticate_session(token, Timestamp::now()).await {
        Ok(user) => user,
        Err(AuthServiceError::Unauthenticated | AuthServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Invalid or expired session"));
            ctrl.skip_rest();

            return;
        }
        Err(source @ (AuthServiceError::InvalidReference | AuthServiceError::Sql(_))) => {
            error!("failed to authenticate session: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_user_uuid(user);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::{auth::MockAuthService, domain::accounts::records::UserUuid};

    use crate::test_helpers::{TestApp, storage_error};

    use super::*;

    const TOKEN: &str = "st_v1_0190a0b1c2d34e5f8a9b0c1d2e3f4a5b.00112233445566778899aabbccddeeff";

    #[salvo::handler]
    async fn echo_user(depot: &mut Depot, res: &mut Response) {
        let user = depot
            .user_uuid_or_401()
            .ok()
            .map_or_else(|| "missing".to_string(), |uuid: UserUuid| uuid.to_string());

        res.render(user);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let app = TestApp {
            auth,
            ..TestApp::default()
        };

        let router = Router::new()
            .hoop(inject(app.into_state()))
            .hoop(handler)
            .push(Router::new().get(echo_user));

        Service::new(router)
    }

    #[tokio::test]
    async fn missing_authorization_header_returns_401() {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_session().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn non_bearer_scheme_returns_401() {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_session().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic YWxpY2U6c2VjcmV0", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn rejected_session_returns_401() {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_session()
            .once()
            .withf(|token, _| token == TOKEN)
            .return_once(|_, _| Err(AuthServiceError::Unauthenticated));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, format!("Bearer {TOKEN}"), true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn storage_failure_returns_500() {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_session()
            .once()
            .return_once(|_, _| Err(AuthServiceError::Sql(storage_error())));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, format!("Bearer {TOKEN}"), true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn valid_session_injects_user_uuid() -> TestResult {
        let user = UserUuid::from_uuid(Uuid::now_v7());

        let mut auth = MockAuthService::new();

        auth.expect_authenticate_session()
            .once()
            .withf(|token, _| token == TOKEN)
            .return_once(move |_, _| Ok(user));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, format!("Bearer {TOKEN}"), true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, user.to_string());

        Ok(())
    }
}
