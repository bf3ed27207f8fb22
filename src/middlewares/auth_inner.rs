//! SessionGuard 요청 처리 로직
use std::rc::Rc;
use std::sync::Arc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use crate::config::{SESSION_COOKIE_NAME, SIGN_IN_PATH};
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::auth::authentication_request::{AuthMode, PublicPaths};
use crate::services::auth::{extract_bearer_token, SessionService};

pub struct SessionGuardService<S> {
    pub service: Rc<S>,
    pub sessions: Arc<SessionService>,
    pub public_paths: Rc<PublicPaths>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let sessions = self.sessions.clone();
        let mode = self.public_paths.mode_for(req.path());

        Box::pin(async move {
            let token = extract_token(&req);
            let had_token = token.is_some();
            let claims = token.and_then(|t| match sessions.verify_token(&t) {
                Ok(claims) => Some(claims),
                Err(err) => {
                    log::debug!("세션 토큰 거부: {}", err);
                    None
                }
            });

            match (mode, claims) {
                // 공개 경로는 인증 여부와 무관하게 통과. 쿠키 갱신/삭제는 하지 않는다
                (AuthMode::Optional, claims) => {
                    if let Some(claims) = claims {
                        req.extensions_mut().insert(AuthenticatedUser::from(&claims));
                    }
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                (AuthMode::Required, Some(claims)) => {
                    let renewed = sessions.renew(&claims).unwrap_or_else(|err| {
                        log::warn!("세션 갱신 실패: {}", err);
                        None
                    });

                    let mut user = AuthenticatedUser::from(&claims);
                    if let Some(ref token) = renewed {
                        user.expires_at = token.expires_at;
                    }
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);

                    let mut res = service.call(req).await?;
                    if let Some(token) = renewed {
                        let cookie = sessions.session_cookie(&token);
                        if let Err(err) = res.response_mut().add_cookie(&cookie) {
                            log::warn!("갱신된 세션 쿠키 설정 실패: {}", err);
                        }
                    }
                    Ok(res.map_into_left_body())
                }
                (AuthMode::Required, None) => {
                    let original = req
                        .uri()
                        .path_and_query()
                        .map(|pq| pq.as_str().to_string())
                        .unwrap_or_else(|| "/".to_string());
                    log::debug!("미인증 요청 리디렉션: {}", original);

                    let location = format!("{}?callbackUrl={}", SIGN_IN_PATH, urlencoding::encode(&original));
                    let mut response = HttpResponse::Found();
                    response.insert_header((header::LOCATION, location));
                    if had_token {
                        response.cookie(sessions.clear_session_cookie());
                    }

                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response.finish())
                        .map_into_right_body();
                    Ok(res)
                }
            }
        })
    }
}

/// 세션 쿠키 우선, 없으면 `Authorization: Bearer`
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE_NAME) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .map(str::to_string)
}
