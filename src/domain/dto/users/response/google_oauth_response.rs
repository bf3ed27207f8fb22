//! Google OAuth 관련 응답 DTO

use serde::{Deserialize, Serialize};

/// Google 토큰 엔드포인트 응답 (필요한 필드만)
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Google 로그인 시작 결과
#[derive(Debug, Serialize)]
pub struct OAuthLoginUrlResponse {
    pub login_url: String,

    pub state: String,
}

/// `/api/auth/providers` 항목
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub signin_url: String,
}
