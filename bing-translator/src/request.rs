use bing_translator_common::helper::escape_component;
use reqwest::Method;

/// 翻译服务的五种请求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Translate,
    TranslateArray,
    Detect,
    ListCodes,
    Speak,
}

/// 请求方法和相对于`api_base`的路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: Method,
    pub path: &'static str,
}

impl RequestKind {
    pub fn spec(self) -> RequestSpec {
        let (method, path) = match self {
            RequestKind::Translate => (Method::GET, "/Translate"),
            RequestKind::TranslateArray => (Method::POST, "/TranslateArray"),
            RequestKind::Detect => (Method::GET, "/Detect"),
            RequestKind::ListCodes => (Method::GET, "/GetLanguagesForTranslate"),
            RequestKind::Speak => (Method::GET, "/Speak"),
        };
        RequestSpec { method, path }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Translate => "translate",
            RequestKind::TranslateArray => "translate_array",
            RequestKind::Detect => "detect",
            RequestKind::ListCodes => "list_codes",
            RequestKind::Speak => "speak",
        }
    }
}

/// 有序的query参数，value在插入的时候就已经percent-encode过了
#[derive(Debug, Default, Clone)]
pub(crate) struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: &'static str, value: &str) -> &mut Self {
        self.pairs.push((key, escape_component(value)));
        self
    }

    /// `None`或者空字符串时不添加这个参数
    pub(crate) fn push_non_empty(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.push(key, v);
        }
        self
    }

    pub(crate) fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// 待翻译文本的格式
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    #[default]
    Plain,
    Html,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Plain => "text/plain",
            ContentType::Html => "text/html",
        }
    }
}

/// speak返回的音频格式
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
}

impl AudioFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mp3",
        }
    }
}

/// speak的音质选项，不传的时候服务端使用`MinSize`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOptions {
    MinSize,
    MaxQuality,
}

impl SpeakOptions {
    pub fn as_str(self) -> &'static str {
        match self {
            SpeakOptions::MinSize => "MinSize",
            SpeakOptions::MaxQuality => "MaxQuality",
        }
    }
}
