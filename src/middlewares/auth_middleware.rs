//! 세션 라우트 가드
//!
//! 애플리케이션 전체를 감싸고 경로별로 인증 모드를 정합니다.
//!
//! - 공개 경로: 유효한 세션이 있으면 `AuthenticatedUser`를 붙이고, 없어도 통과
//! - 그 외 경로: 유효한 세션이 없으면 `302 /login?callbackUrl=<원래 경로>`로 보내고 세션 쿠키를 지움
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(SessionGuard::new(state.session_service.clone()))
//!     .configure(configure_all_routes)
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::domain::auth::authentication_request::PublicPaths;
use crate::middlewares::auth_inner::SessionGuardService;
use crate::services::auth::SessionService;

pub struct SessionGuard {
    sessions: Arc<SessionService>,
    public_paths: Rc<PublicPaths>,
}

impl SessionGuard {
    /// 기본 공개 경로 목록을 사용하는 가드
    pub fn new(sessions: Arc<SessionService>) -> Self {
        Self::with_public_paths(sessions, PublicPaths::default())
    }

    pub fn with_public_paths(sessions: Arc<SessionService>, public_paths: PublicPaths) -> Self {
        Self {
            sessions,
            public_paths: Rc::new(public_paths),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardService {
            service: Rc::new(service),
            sessions: self.sessions.clone(),
            public_paths: self.public_paths.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::header, http::StatusCode, test, web, App, HttpResponse};
    use crate::config::{AuthProvider, SessionSettings, SESSION_COOKIE_NAME};
    use crate::domain::auth::authenticated_user::{AuthenticatedUser, OptionalUser};
    use crate::domain::auth::sign_in::SignInRequest;
    use crate::domain::dto::users::request::CredentialsRequest;
    use crate::repositories::users::InMemoryUserRepository;
    use crate::services::users::UserService;

    fn sessions(max_age: chrono::Duration, update_age: chrono::Duration) -> Arc<SessionService> {
        let store = Arc::new(InMemoryUserRepository::new());
        let users = Arc::new(UserService::new(store, 4));
        Arc::new(SessionService::new(users, SessionSettings {
            secret: "guard-secret".to_string(),
            max_age,
            update_age,
            cookie_secure: false,
        }))
    }

    async fn signed_in_token(sessions: &SessionService) -> String {
        // 세션 서비스와 같은 UserService를 쓰기 위해 sign_in 경로로 사용자를 만든다
        let identity = crate::domain::oauth::external_identity::ExternalIdentity::new(
            AuthProvider::Google, "guard@example.com", "g-guard",
        );
        let session = sessions.sign_in(SignInRequest::External(identity)).await.unwrap();
        session.token.token
    }

    async fn protected(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.email)
    }

    async fn public(user: OptionalUser) -> HttpResponse {
        HttpResponse::Ok().body(if user.0.is_some() { "signed-in" } else { "anonymous" })
    }

    macro_rules! guarded_app {
        ($sessions:expr) => {
            test::init_service(
                App::new()
                    .wrap(SessionGuard::new($sessions.clone()))
                    .route("/videos/upload", web::get().to(protected))
                    .route("/health", web::get().to(public)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_anonymous_request_redirects_to_login() {
        let sessions = sessions(chrono::Duration::days(30), chrono::Duration::hours(24));
        let app = guarded_app!(sessions);

        let req = test::TestRequest::get().uri("/videos/upload?draft=1").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            "/login?callbackUrl=%2Fvideos%2Fupload%3Fdraft%3D1"
        );
    }

    #[actix_web::test]
    async fn test_expired_token_redirects_and_clears_cookie() {
        // max_age가 음수면 발급 즉시 만료된 토큰이 된다
        let sessions = sessions(chrono::Duration::seconds(-5), chrono::Duration::hours(24));
        let token = signed_in_token(&sessions).await;
        let app = guarded_app!(sessions);

        let req = test::TestRequest::get()
            .uri("/videos/upload")
            .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE_NAME, token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        let cleared = res.response().cookies().find(|c| c.name() == SESSION_COOKIE_NAME).unwrap();
        assert_eq!(cleared.value(), "");
    }

    #[actix_web::test]
    async fn test_valid_cookie_reaches_handler() {
        let sessions = sessions(chrono::Duration::days(30), chrono::Duration::hours(24));
        let token = signed_in_token(&sessions).await;
        let app = guarded_app!(sessions);

        let req = test::TestRequest::get()
            .uri("/videos/upload")
            .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE_NAME, token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.response().cookies().next().is_none());
        let body = test::read_body(res).await;
        assert_eq!(body, "guard@example.com");
    }

    #[actix_web::test]
    async fn test_bearer_header_is_accepted() {
        let sessions = sessions(chrono::Duration::days(30), chrono::Duration::hours(24));
        let token = signed_in_token(&sessions).await;
        let app = guarded_app!(sessions);

        let req = test::TestRequest::get()
            .uri("/videos/upload")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_old_session_is_renewed() {
        let sessions = sessions(chrono::Duration::days(30), chrono::Duration::zero());
        let token = signed_in_token(&sessions).await;
        let app = guarded_app!(sessions);

        let req = test::TestRequest::get()
            .uri("/videos/upload")
            .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE_NAME, token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let renewed = res.response().cookies().find(|c| c.name() == SESSION_COOKIE_NAME).unwrap();
        assert!(!renewed.value().is_empty());
        assert!(sessions.verify_token(renewed.value()).is_ok());
    }

    #[actix_web::test]
    async fn test_public_path_is_reachable_anonymously() {
        let sessions = sessions(chrono::Duration::days(30), chrono::Duration::hours(24));
        let app = guarded_app!(sessions);

        let req = test::TestRequest::get()
            .uri("/health")
            .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE_NAME, "garbage"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "anonymous");
    }

    #[actix_web::test]
    async fn test_public_path_sees_valid_session() {
        let sessions = sessions(chrono::Duration::days(30), chrono::Duration::hours(24));
        let users = UserService::new(Arc::new(InMemoryUserRepository::new()), 4);
        // 다른 저장소의 사용자라도 토큰만 유효하면 세션으로 인정된다
        let registered = users.register(CredentialsRequest::new("p@example.com", "secret123")).await.unwrap();
        let user = users.find_by_id(&registered.id).await.unwrap();
        let token = sessions.issue(&user, AuthProvider::Credentials).unwrap();
        let app = guarded_app!(sessions);

        let req = test::TestRequest::get()
            .uri("/health")
            .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE_NAME, token.token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(test::read_body(res).await, "signed-in");
    }
}
