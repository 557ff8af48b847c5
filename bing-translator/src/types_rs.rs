use crate::Client;
use crate::request::{AudioFormat, ContentType, SpeakOptions};
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) const DATA_CONTRACT_NS: &str =
    "http://schemas.datacontract.org/2004/07/Microsoft.MT.Web.Service.V2";
pub(crate) const ARRAYS_NS: &str = "http://schemas.microsoft.com/2003/10/Serialization/Arrays";

// region    --- translate
#[derive(Builder)]
pub struct Translate<'a> {
    #[builder(start_fn)]
    pub(crate) client: &'a Client,
    pub(crate) text: &'a str,
    /// 目标语言，必填
    pub(crate) to: &'a str,
    /// 源语言，不传或为空时由服务端自动检测
    pub(crate) from: Option<&'a str>,
    #[builder(default = "general")]
    pub(crate) category: &'a str,
    #[builder(default)]
    pub(crate) content_type: ContentType,
}
// endregion --- translate

// region    --- translate array
#[derive(Builder)]
pub struct TranslateArray<'a> {
    #[builder(start_fn)]
    pub(crate) client: &'a Client,
    pub(crate) texts: &'a [&'a str],
    pub(crate) to: &'a str,
    pub(crate) from: Option<&'a str>,
    #[builder(default = "general")]
    pub(crate) category: &'a str,
    #[builder(default)]
    pub(crate) content_type: ContentType,
}

/// TranslateArray的请求体，序列化后的根节点为`TranslateArrayRequest`
#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TranslateArrayRequest<'a> {
    pub(crate) app_id: (),
    pub(crate) from: &'a str,
    pub(crate) options: TranslateArrayOptions<'a>,
    pub(crate) texts: Texts<'a>,
    pub(crate) to: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TranslateArrayOptions<'a> {
    pub(crate) category: NsElement<'a>,
    pub(crate) content_type: NsElement<'a>,
    pub(crate) reserved_flags: NsElement<'a>,
    pub(crate) state: NsElement<'a>,
    pub(crate) uri: NsElement<'a>,
    pub(crate) user: NsElement<'a>,
}

#[derive(Serialize, Debug)]
pub(crate) struct Texts<'a> {
    #[serde(rename = "string")]
    pub(crate) items: Vec<NsElement<'a>>,
}

/// 带`xmlns`属性的元素，没有内容时序列化为空元素
#[derive(Serialize, Debug)]
pub(crate) struct NsElement<'a> {
    #[serde(rename = "@xmlns")]
    pub(crate) xmlns: &'static str,
    #[serde(rename = "$text", skip_serializing_if = "Option::is_none")]
    pub(crate) value: Option<&'a str>,
}

impl<'a> NsElement<'a> {
    pub(crate) fn new(xmlns: &'static str, value: &'a str) -> Self {
        Self {
            xmlns,
            value: Some(value),
        }
    }

    pub(crate) fn empty(xmlns: &'static str) -> Self {
        Self { xmlns, value: None }
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct ArrayOfTranslateArrayResponse {
    #[serde(rename = "TranslateArrayResponse", default)]
    pub(crate) items: Vec<TranslateArrayResponse>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TranslateArrayResponse {
    #[serde(default)]
    pub(crate) translated_text: String,
}
// endregion --- translate array

// region    --- detect
#[derive(Builder)]
pub struct Detect<'a> {
    #[builder(start_fn)]
    pub(crate) client: &'a Client,
    pub(crate) text: &'a str,
}

/// 语言代码，比如`en`、`zh-CHS`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LanguageCode {
    fn from(s: String) -> Self {
        LanguageCode(s)
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
// endregion --- detect

// region    --- speak
#[derive(Builder)]
pub struct Speak<'a> {
    #[builder(start_fn)]
    pub(crate) client: &'a Client,
    pub(crate) text: &'a str,
    /// 朗读使用的语言，必填
    pub(crate) language: &'a str,
    #[builder(default)]
    pub(crate) format: AudioFormat,
    pub(crate) options: Option<SpeakOptions>,
}
// endregion --- speak

/// `<string xmlns="http://schemas.microsoft.com/2003/10/Serialization/">...</string>`
#[derive(Deserialize, Debug)]
pub(crate) struct XmlString {
    #[serde(rename = "$text", default)]
    pub(crate) value: String,
}

/// `<ArrayOfstring><string>..</string>...</ArrayOfstring>`
#[derive(Deserialize, Debug)]
pub(crate) struct ArrayOfString {
    #[serde(rename = "string", default)]
    pub(crate) items: Vec<String>,
}
