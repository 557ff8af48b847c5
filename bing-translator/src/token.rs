//! OAuth2 client-credentials token管理
//!
//! token只在下一次请求需要的时候才去刷新(lazy)，没有后台刷新。
//! 缓存的token和过期检查都在同一个锁里，同一个`Client`并发调用时只会有一次token请求。

use crate::Error;
use bing_translator_common::helper::parse_json_str;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use url::form_urlencoded;

/// 当前使用的bearer token
#[derive(Clone, Debug)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: u64,
    /// 到这个时间点(含)之后token不能再使用
    pub expires_at: OffsetDateTime,
}

impl AccessToken {
    pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
        now < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(OffsetDateTime::now_utc())
    }
}

/// token接口的响应，成功时有`access_token`和`expires_in`，失败时有`error`
#[serde_as]
#[derive(Deserialize, Debug)]
pub(crate) struct TokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    scope: Option<String>,
    // 服务端有时候返回数字，有时候返回字符串
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    expires_in: Option<u64>,
    error: Option<String>,
}

impl TokenResponse {
    pub(crate) fn into_access_token(self, now: OffsetDateTime) -> Result<AccessToken, Error> {
        if let Some(error) = self.error {
            return Err(Error::Authentication(error));
        }
        let access_token = self
            .access_token
            .ok_or_else(|| Error::Common("token response missing `access_token`".to_owned()))?;
        let expires_in = self
            .expires_in
            .ok_or_else(|| Error::Common("token response missing `expires_in`".to_owned()))?;
        let expires_at = i64::try_from(expires_in)
            .ok()
            .and_then(|secs| now.checked_add(Duration::seconds(secs)))
            .ok_or_else(|| Error::Common(format!("`expires_in` out of range: {expires_in}")))?;

        Ok(AccessToken {
            access_token,
            token_type: self.token_type,
            scope: self.scope,
            expires_in,
            expires_at,
        })
    }
}

pub(crate) struct TokenManager {
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenManager {
    pub(crate) fn new(
        token_url: String,
        client_id: String,
        client_secret: String,
        scope: String,
    ) -> Self {
        Self {
            token_url,
            client_id,
            client_secret,
            scope,
            cached: Mutex::new(None),
        }
    }

    /// 缓存的token还没过期就直接返回，否则请求一个新的token并替换掉旧的
    ///
    /// 请求失败时缓存保持不变，过期的token不会被返回，下一次调用会重新请求。
    pub(crate) async fn ensure_valid_token(
        &self,
        http_client: &reqwest::Client,
    ) -> Result<AccessToken, Error> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_valid()) {
            tracing::trace!("reusing cached access token");
            return Ok(token.clone());
        }

        let token = self.fetch(http_client).await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    fn form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", &self.client_secret)
            .append_pair("scope", &self.scope)
            .append_pair("grant_type", "client_credentials")
            .finish()
    }

    async fn fetch(&self, http_client: &reqwest::Client) -> Result<AccessToken, Error> {
        tracing::debug!(token_url = %self.token_url, "fetching access token");
        let resp = http_client
            .post(&self.token_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(self.form_body())
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        let parsed = match parse_json_str::<TokenResponse>(&text) {
            Ok(parsed) => parsed,
            // 不是json的错误响应(比如网关返回的html)
            Err(_) if !status.is_success() => {
                return Err(Error::RequestAPIFailed {
                    status: status.to_string(),
                    message: text,
                });
            }
            Err(e) => return Err(e.into()),
        };

        match parsed.into_access_token(OffsetDateTime::now_utc()) {
            Ok(token) => {
                tracing::debug!(expires_in = token.expires_in, "access token refreshed");
                Ok(token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to obtain access token");
                Err(e)
            }
        }
    }

    #[cfg(test)]
    pub(crate) async fn set_cached(&self, token: Option<AccessToken>) {
        *self.cached.lock().await = token;
    }

    #[cfg(test)]
    pub(crate) async fn cached(&self) -> Option<AccessToken> {
        self.cached.lock().await.clone()
    }
}
