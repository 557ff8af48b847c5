use crate::Client;
use crate::Error;
use crate::client::Payload;
use crate::request::{QueryParams, RequestKind};
use crate::types_rs::*;
use crate::utils::check_required;
use bing_translator_common::helper::parse_xml_response;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

impl Client {
    /// 翻译单条文本
    ///
    /// `to`为空时直接返回`Error::Usage`，不会发送任何请求。
    pub fn translate(&self) -> TranslateBuilder<'_> {
        Translate::builder(self)
    }

    /// 批量翻译，返回结果的顺序和长度与输入一致
    pub fn translate_array(&self) -> TranslateArrayBuilder<'_> {
        TranslateArray::builder(self)
    }

    /// 检测文本的语言
    pub fn detect(&self) -> DetectBuilder<'_> {
        Detect::builder(self)
    }

    /// 文本转语音，返回原始的音频数据
    ///
    /// `language`为空时直接返回`Error::Usage`。
    pub fn speak(&self) -> SpeakBuilder<'_> {
        Speak::builder(self)
    }

    /// 获取所有支持翻译的语言代码
    pub async fn supported_language_codes(&self) -> Result<Vec<String>, Error> {
        let resp = self
            .dispatch(RequestKind::ListCodes, Payload::Query(QueryParams::new()))
            .await?;
        let res: ArrayOfString = parse_xml_response(resp).await?;
        Ok(res.items)
    }
}

impl Translate<'_> {
    pub async fn send(&self) -> Result<String, Error> {
        check_required("to", self.to)?;

        let mut params = QueryParams::new();
        params
            .push("to", self.to)
            .push("text", self.text)
            .push("category", self.category)
            .push("contentType", self.content_type.as_str())
            .push_non_empty("from", self.from);

        let resp = self
            .client
            .dispatch(RequestKind::Translate, Payload::Query(params))
            .await?;
        let res: XmlString = parse_xml_response(resp).await?;
        Ok(res.value)
    }
}

impl TranslateArray<'_> {
    pub(crate) fn request_body(&self) -> Result<String, Error> {
        let req = TranslateArrayRequest {
            app_id: (),
            from: self.from.unwrap_or_default(),
            options: TranslateArrayOptions {
                category: NsElement::new(DATA_CONTRACT_NS, self.category),
                content_type: NsElement::new(DATA_CONTRACT_NS, self.content_type.as_str()),
                reserved_flags: NsElement::empty(DATA_CONTRACT_NS),
                state: NsElement::empty(DATA_CONTRACT_NS),
                uri: NsElement::empty(DATA_CONTRACT_NS),
                user: NsElement::empty(DATA_CONTRACT_NS),
            },
            texts: Texts {
                items: self
                    .texts
                    .iter()
                    .map(|text| NsElement::new(ARRAYS_NS, text))
                    .collect(),
            },
            to: self.to,
        };
        quick_xml::se::to_string_with_root("TranslateArrayRequest", &req)
            .map_err(|e| Error::Common(format!("serialize TranslateArrayRequest error: {}", e)))
    }

    pub async fn send(&self) -> Result<Vec<String>, Error> {
        check_required("to", self.to)?;

        let body = self.request_body()?;
        let resp = self
            .client
            .dispatch(RequestKind::TranslateArray, Payload::Xml(body))
            .await?;
        let res: ArrayOfTranslateArrayResponse = parse_xml_response(resp).await?;
        Ok(res
            .items
            .into_iter()
            .map(|item| item.translated_text)
            .collect())
    }
}

impl Detect<'_> {
    pub async fn send(&self) -> Result<LanguageCode, Error> {
        let mut params = QueryParams::new();
        params
            .push("text", self.text)
            .push("category", "general")
            .push("contentType", "text/plain");

        let resp = self
            .client
            .dispatch(RequestKind::Detect, Payload::Query(params))
            .await?;
        let res: XmlString = parse_xml_response(resp).await?;
        Ok(LanguageCode::from(res.value))
    }
}

impl Speak<'_> {
    pub async fn send(&self) -> Result<Bytes, Error> {
        check_required("language", self.language)?;

        let mut params = QueryParams::new();
        params
            .push("format", self.format.as_str())
            .push("text", self.text)
            .push("language", self.language)
            .push_non_empty("options", self.options.map(|o| o.as_str()));

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(self.format.as_str()));

        let resp = self
            .client
            .dispatch_with_headers(RequestKind::Speak, Payload::Query(params), headers)
            .await?;
        Ok(resp.bytes().await?)
    }
}
