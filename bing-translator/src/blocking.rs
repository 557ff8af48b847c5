//! 对异步`Client`的同步包装，每个方法都会阻塞到请求完成
//!
//! 内部持有一个current-thread的tokio runtime，不能在异步上下文(另一个runtime)里调用，否则会panic。
//!
//! ```no_run
//! use bing_translator::blocking;
//!
//! let client = blocking::Client::new(
//!     bing_translator::Client::builder()
//!         .client_id("my-client-id")
//!         .client_secret("my-client-secret")
//!         .build()?,
//! )?;
//! let text = client.translate("hello", None, "fr")?;
//! println!("{text}");
//! # Ok::<(), bing_translator::Error>(())
//! ```

use crate::{AccessToken, AudioFormat, Error, LanguageCode};
use bytes::Bytes;
use tokio::runtime::{Builder, Runtime};

pub struct Client {
    inner: crate::Client,
    runtime: Runtime,
}

impl Client {
    pub fn new(inner: crate::Client) -> Result<Self, Error> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Common(format!("build tokio runtime error: {}", e)))?;
        Ok(Self { inner, runtime })
    }

    pub fn translate(&self, text: &str, from: Option<&str>, to: &str) -> Result<String, Error> {
        self.runtime.block_on(
            self.inner
                .translate()
                .text(text)
                .maybe_from(from)
                .to(to)
                .build()
                .send(),
        )
    }

    pub fn translate_array(
        &self,
        texts: &[&str],
        from: Option<&str>,
        to: &str,
    ) -> Result<Vec<String>, Error> {
        self.runtime.block_on(
            self.inner
                .translate_array()
                .texts(texts)
                .maybe_from(from)
                .to(to)
                .build()
                .send(),
        )
    }

    pub fn detect(&self, text: &str) -> Result<LanguageCode, Error> {
        self.runtime
            .block_on(self.inner.detect().text(text).build().send())
    }

    pub fn speak(&self, text: &str, language: &str, format: AudioFormat) -> Result<Bytes, Error> {
        self.runtime.block_on(
            self.inner
                .speak()
                .text(text)
                .language(language)
                .format(format)
                .build()
                .send(),
        )
    }

    pub fn supported_language_codes(&self) -> Result<Vec<String>, Error> {
        self.runtime
            .block_on(self.inner.supported_language_codes())
    }

    pub fn access_token(&self) -> Result<AccessToken, Error> {
        self.runtime.block_on(self.inner.access_token())
    }
}
