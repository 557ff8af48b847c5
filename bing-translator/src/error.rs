#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// 缺少必填参数，在发送任何请求之前返回
    #[error("usage error: {0}")]
    Usage(String),
    /// token接口返回了`error`字段
    #[error("authentication failed: {0}")]
    Authentication(String),
    /// 翻译接口返回了非200的状态码，message为错误页面中的可见文本
    #[error("request api failed: {status}, message: {message}")]
    RequestAPIFailed { status: String, message: String },
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("error: {0}")]
    Common(String),
}

impl From<bing_translator_common::Error> for Error {
    fn from(e: bing_translator_common::Error) -> Self {
        match e {
            bing_translator_common::Error::Common(msg) => Error::Common(msg),
            bing_translator_common::Error::RequestAPIFailed { status, message } => {
                Error::RequestAPIFailed { status, message }
            }
            bing_translator_common::Error::Reqwest(e) => Error::Reqwest(e),
        }
    }
}
