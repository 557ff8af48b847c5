use crate::Error;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;

// RFC 3986 unreserved: ALPHA / DIGIT / "-" / "." / "_" / "~"
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// 对query中的单个值做percent-encode
///
/// eg: `a b&c` -> `a%20b%26c`
pub fn escape_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// 提取(可能是HTML的)错误响应中所有可见的文本节点，用空格拼接
///
/// `<script>`和`<style>`的内容会被跳过，纯空白的文本节点也会被忽略。
pub fn visible_text(body: &str) -> String {
    let dom = parse_document(RcDom::default(), Default::default()).one(body);
    let mut parts = Vec::new();
    collect_text(&dom.document, &mut parts);
    parts.join(" ")
}

fn collect_text(node: &Handle, out: &mut Vec<String>) {
    match &node.data {
        NodeData::Text { contents } => {
            let contents = contents.borrow();
            let text = contents.trim();
            if !text.is_empty() {
                out.push(text.to_owned());
            }
        }
        NodeData::Element { name, .. } if matches!(&*name.local, "script" | "style") => return,
        _ => {}
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

pub async fn into_request_failed_error(resp: reqwest::Response) -> Error {
    let status = resp.status();
    let body = resp.text().await;
    match body {
        Ok(body) => {
            let text = visible_text(&body);
            // 没有可见文本时(比如纯文本或空响应)直接使用原始内容
            let message = if text.is_empty() {
                body.trim().to_owned()
            } else {
                text
            };
            tracing::warn!(%status, %message, "translator api request failed");
            Error::RequestAPIFailed {
                status: status.to_string(),
                message,
            }
        }
        Err(e) => Error::Reqwest(e),
    }
}

/// 只有200才算成功，其它状态码(包括其它2xx)都转换为`RequestAPIFailed`
pub async fn ensure_ok(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    if resp.status() != StatusCode::OK {
        return Err(into_request_failed_error(resp).await);
    }
    Ok(resp)
}

pub fn parse_xml_str<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, Error> {
    quick_xml::de::from_str(text).map_err(|e| Error::Common(format!("XML parse error: {}", e)))
}

pub fn parse_json_str<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, Error> {
    serde_json::from_str(text).map_err(|e| Error::Common(format!("JSON parse error: {}", e)))
}

pub async fn parse_xml_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let resp = ensure_ok(resp).await?;
    let text = resp.text().await?;
    parse_xml_str(&text)
}
