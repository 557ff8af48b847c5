//! 一个只用于测试的最小HTTP服务，记录收到的每个请求，按路径返回固定的响应

use bing_translator::Client;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const API_PATH: &str = "/V2/Http.svc";
pub const TOKEN_PATH: &str = "/token";

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, q)| q)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct StubResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl StubResponse {
    pub fn new(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.to_owned(),
            body: body.into(),
        }
    }

    pub fn xml(body: &str) -> Self {
        Self::new(200, "application/xml; charset=utf-8", body)
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self::new(status, "application/json; charset=utf-8", body)
    }
}

pub fn token_json(access_token: &str, expires_in: &str) -> String {
    format!(
        r#"{{"token_type":"http://schemas.xmlsoap.org/ws/2009/11/swt-token-profile-1.0","access_token":"{access_token}","expires_in":"{expires_in}","scope":"http://api.microsofttranslator.com"}}"#
    )
}

/// 默认的路由，模拟翻译服务的正常响应
pub fn default_routes(req: &RecordedRequest) -> StubResponse {
    let path = req.path();
    match path.strip_prefix(API_PATH) {
        _ if path == TOKEN_PATH => StubResponse::json(200, &token_json("token-1", "600")),
        Some("/Translate") => StubResponse::xml(
            r#"<string xmlns="http://schemas.microsoft.com/2003/10/Serialization/">bonjour</string>"#,
        ),
        Some("/TranslateArray") => StubResponse::xml(&echo_translate_array(&req.body)),
        Some("/Detect") => StubResponse::xml(
            r#"<string xmlns="http://schemas.microsoft.com/2003/10/Serialization/">en</string>"#,
        ),
        Some("/GetLanguagesForTranslate") => StubResponse::xml(
            r#"<ArrayOfstring xmlns="http://schemas.microsoft.com/2003/10/Serialization/Arrays" xmlns:i="http://www.w3.org/2001/XMLSchema-instance"><string>de</string><string>en</string><string>fr</string></ArrayOfstring>"#,
        ),
        Some("/Speak") => {
            let content_type = req.header("content-type").unwrap_or("audio/wav");
            StubResponse::new(200, content_type, b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec())
        }
        _ => StubResponse::new(404, "text/html", "<html><body><h1>Not Found</h1></body></html>"),
    }
}

/// 把请求中的每个`<string>`翻译成`[to] text`，保持顺序
fn echo_translate_array(body: &str) -> String {
    let to = body
        .split_once("<To>")
        .and_then(|(_, rest)| rest.split_once("</To>"))
        .map(|(to, _)| to)
        .unwrap_or_default();

    let mut xml = String::from(
        r#"<ArrayOfTranslateArrayResponse xmlns="http://schemas.datacontract.org/2004/07/Microsoft.MT.Web.Service.V2" xmlns:i="http://www.w3.org/2001/XMLSchema-instance">"#,
    );
    for chunk in body.split("<string ").skip(1) {
        let text = chunk
            .split_once('>')
            .and_then(|(_, rest)| rest.split_once("</string>"))
            .map(|(text, _)| text)
            .unwrap_or_default();
        xml.push_str(&format!(
            "<TranslateArrayResponse><From>en</From><State/><TranslatedText>[{to}] {text}</TranslatedText></TranslateArrayResponse>"
        ));
    }
    xml.push_str("</ArrayOfTranslateArrayResponse>");
    xml
}

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> StubResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler = Arc::new(handler);

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let handler = handler.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    if let Some(req) = read_request(&mut stream).await {
                        let resp = handler(&req);
                        recorded.lock().unwrap().push(req);
                        write_response(&mut stream, resp).await;
                    }
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn client(&self) -> Client {
        Client::builder()
            .client_id("test id")
            .client_secret("test&secret")
            .api_base(format!("{}{}", self.base_url, API_PATH))
            .token_url(format!("{}{}", self.base_url, TOKEN_PATH))
            .build()
            .unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path() == path).count()
    }

    pub fn last(&self, path: &str) -> RecordedRequest {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.path() == path)
            .unwrap_or_else(|| panic!("no request to {path}"))
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    let head_end = loop {
        let n = stream.read(&mut buf).await.ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&data[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_owned();
    let target = request_line.next()?.to_owned();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = head_end + 4;
    while data.len() < body_start + content_length {
        let n = stream.read(&mut buf).await.ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    let body_end = data.len().min(body_start + content_length);
    let body = String::from_utf8_lossy(&data[body_start..body_end]).to_string();

    Some(RecordedRequest {
        method,
        target,
        headers,
        body,
    })
}

async fn write_response(stream: &mut TcpStream, resp: StubResponse) {
    let reason = if resp.status == 200 { "OK" } else { "Error" };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        resp.status,
        reason,
        resp.content_type,
        resp.body.len()
    );
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(&resp.body).await;
    let _ = stream.shutdown().await;
}
