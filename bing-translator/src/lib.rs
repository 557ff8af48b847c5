#![doc = include_str!("../README.md")]

mod client;
mod error;
mod request;
mod token;
mod trans;
mod types_rs;
mod utils;

pub use client::{Client, DEFAULT_API_BASE, DEFAULT_SCOPE, DEFAULT_TOKEN_URL};
pub use error::Error;
pub use request::{AudioFormat, ContentType, RequestKind, RequestSpec, SpeakOptions};
pub use token::AccessToken;
pub use types_rs::{
    Detect, DetectBuilder, LanguageCode, Speak, SpeakBuilder, Translate, TranslateArray,
    TranslateArrayBuilder, TranslateBuilder,
};

/// 同步阻塞的客户端
#[cfg(feature = "blocking")]
pub mod blocking;
