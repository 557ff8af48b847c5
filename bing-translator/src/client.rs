use crate::Error;
use crate::request::{QueryParams, RequestKind};
use crate::token::{AccessToken, TokenManager};
use bing_translator_common::helper::ensure_ok;
use bon::bon;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.microsofttranslator.com/V2/Http.svc";
pub const DEFAULT_TOKEN_URL: &str = "https://datamarket.accesscontrol.windows.net/v2/OAuth2-13";
pub const DEFAULT_SCOPE: &str = "http://api.microsofttranslator.com";

pub(crate) enum Payload {
    /// GET，参数拼到url后面
    Query(QueryParams),
    /// POST，`text/xml`请求体
    Xml(String),
}

pub struct Client {
    http_client: reqwest::Client,
    api_base: String,
    tokens: TokenManager,
}

#[bon]
impl Client {
    #[builder]
    pub fn new(
        #[builder(into)] client_id: String,
        #[builder(into)] client_secret: String,
        /// 跳过TLS证书校验，只在测试环境使用
        #[builder(default)]
        skip_tls_verify: bool,
        /// 单个请求的超时时间，默认不超时
        timeout: Option<Duration>,
        #[builder(into)] api_base: Option<String>,
        #[builder(into)] token_url: Option<String>,
        #[builder(into)] scope: Option<String>,
    ) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(skip_tls_verify);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let api_base = api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let tokens = TokenManager::new(
            token_url.unwrap_or_else(|| DEFAULT_TOKEN_URL.to_owned()),
            client_id,
            client_secret,
            scope.unwrap_or_else(|| DEFAULT_SCOPE.to_owned()),
        );

        Ok(Self {
            http_client,
            api_base,
            tokens,
        })
    }

    /// 请求对应的完整url(不含query)
    pub fn endpoint_url(&self, kind: RequestKind) -> String {
        format!("{}{}", self.api_base, kind.spec().path)
    }

    /// 返回当前有效的access token，缓存的token过期或不存在时会重新获取
    pub async fn access_token(&self) -> Result<AccessToken, Error> {
        self.tokens.ensure_valid_token(&self.http_client).await
    }

    pub(crate) async fn dispatch(
        &self,
        kind: RequestKind,
        payload: Payload,
    ) -> Result<reqwest::Response, Error> {
        self.dispatch_with_headers(kind, payload, HeaderMap::new())
            .await
    }

    /// 先保证token有效，再发送请求；非200的响应会转换为`Error::RequestAPIFailed`
    pub(crate) async fn dispatch_with_headers(
        &self,
        kind: RequestKind,
        payload: Payload,
        headers: HeaderMap,
    ) -> Result<reqwest::Response, Error> {
        let token = self.access_token().await?;

        let spec = kind.spec();
        let url = self.endpoint_url(kind);
        tracing::debug!(kind = kind.as_str(), method = %spec.method, %url, "dispatching request");

        let req = match payload {
            Payload::Query(params) => {
                let query = params.to_query_string();
                let url = if query.is_empty() {
                    url
                } else {
                    format!("{url}?{query}")
                };
                self.http_client.request(spec.method, url)
            }
            Payload::Xml(body) => self
                .http_client
                .request(spec.method, url)
                .header(CONTENT_TYPE, "text/xml")
                .body(body),
        };

        let resp = req
            .headers(headers)
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        Ok(ensure_ok(resp).await?)
    }
}
