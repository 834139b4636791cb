use chrono::{SecondsFormat, Utc};
use encoding_rs::Encoding;
use markup5ever_rcdom::RcDom;
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::path::Path;
use url::Url;

use crate::env::{security, translation, EnvVar};
use crate::network::session::Session;
use crate::parsers::html::{get_charset, get_title, html_to_dom, serialize_document, set_charset};
use crate::translation::config::{
    constants, load_translator_config, ConfigManager, MemorySettingsStore, SettingsStore,
    TranslatorConfig,
};
use crate::translation::{translate_dom, RunOutcome, TraversalMode};
use crate::utils::url::parse_data_url;

/// Represents errors that can occur while loading, translating or writing a document
#[derive(Debug)]
pub struct HinglishError {
    details: String,
}

impl HinglishError {
    /// Creates a new HinglishError with the given message
    pub fn new(msg: &str) -> HinglishError {
        HinglishError {
            details: msg.to_string(),
        }
    }
}

impl fmt::Display for HinglishError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl Error for HinglishError {}

/// Configuration options for translating a document
///
/// Fields left as `None` fall back to the settings file, then to the environment.
#[derive(Default, Clone, Debug)]
pub struct HinglishOptions {
    /// Groq API key; stored as `groqApiKey` in the settings store
    pub api_key: Option<String>,
    /// Translator config file (TOML or JSON)
    pub config_path: Option<String>,
    /// Charset to re-encode the output document with
    pub encoding: Option<String>,
    /// Traversal mode; stored as `translationMode` in the settings store
    pub mode: Option<TraversalMode>,
    /// JSON file with persisted settings
    pub settings_path: Option<String>,
    pub silent: bool,
    /// Timeout for fetching remote pages, in seconds (0 disables it)
    pub timeout: u64,
    pub user_agent: Option<String>,
}

/// A translated document and the outcome of its translation run
#[derive(Debug)]
pub struct TranslatedDocument {
    pub data: Vec<u8>,
    pub title: Option<String>,
    pub outcome: RunOutcome,
}

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";
// All known non-"text/..." plaintext media types
const PLAINTEXT_MEDIA_TYPES: &[&str] = &[
    "application/xhtml+xml", // .xhtml
    "application/xml",       // .xml
    "image/svg+xml",         // .svg
];

/// Translates a document from raw HTML data
///
/// # Arguments
///
/// * `input_data` - Raw HTML data as bytes
/// * `input_encoding` - Optional character encoding (defaults to UTF-8)
/// * `options` - Output options (`encoding`)
/// * `settings` - Settings store providing `translationMode` and `groqApiKey`
/// * `config` - Translator configuration
///
/// # Returns
///
/// The serialized document, its title and the run outcome. A run that ends
/// `FailedFatal` still returns the (partially translated) document.
pub async fn translate_document_from_data<S: SettingsStore>(
    input_data: Vec<u8>,
    input_encoding: Option<String>,
    options: &HinglishOptions,
    settings: S,
    config: TranslatorConfig,
) -> Result<TranslatedDocument, HinglishError> {
    // 1. 解析文档并确定编码
    let (dom, document_encoding) = parse_document(&input_data, input_encoding)?;

    // 2. 翻译
    let outcome = translate_dom(&dom, settings, config).await?;

    // 3. 处理自定义编码
    let (dom, final_encoding) = match options.encoding.as_deref() {
        Some(custom_encoding) => (set_charset(dom, custom_encoding), custom_encoding.to_string()),
        None => (dom, document_encoding),
    };

    // 4. 序列化
    let title = get_title(&dom.document);
    let data = serialize_document(&dom, &final_encoding)?;

    Ok(TranslatedDocument {
        data,
        title,
        outcome,
    })
}

/// Translates a document from a URL, data URL or file path
pub async fn translate_document(
    options: &HinglishOptions,
    target: &str,
) -> Result<TranslatedDocument, HinglishError> {
    let (input_data, input_encoding) = load_target(options, target).await?;
    let settings = load_settings(options).await?;
    let config = load_config(options)?;

    translate_document_from_data(input_data, input_encoding, options, settings, config).await
}

/// Loads the raw bytes of a target and the charset it declared, if any
pub async fn load_target(
    options: &HinglishOptions,
    target: &str,
) -> Result<(Vec<u8>, Option<String>), HinglishError> {
    if target.starts_with("data:") {
        let parsed_url = Url::parse(target).map_err(|_| HinglishError::new("Invalid data URL"))?;
        let (media_type, charset, data) = parse_data_url(&parsed_url);
        if media_type != "text/html" {
            return Err(HinglishError::new(
                "Can only process HTML documents from data URLs",
            ));
        }
        Ok((data, non_empty(charset)))
    } else if target.starts_with("http://") || target.starts_with("https://") {
        let parsed_url = Url::parse(target).map_err(|_| HinglishError::new("Invalid URL"))?;
        let session = Session::new(options)?;
        let document = session.retrieve_document(&parsed_url).await?;
        if !is_plaintext_media_type(&document.media_type) {
            return Err(HinglishError::new(&format!(
                "Unsupported media type: {}",
                document.media_type
            )));
        }
        Ok((document.data, non_empty(document.charset)))
    } else {
        let path = Path::new(target);
        if !path.exists() {
            return Err(HinglishError::new(&format!("File not found: {target}")));
        }

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| HinglishError::new(&format!("Failed to read file: {e}")))?;
        Ok((data, None))
    }
}

/// Builds the settings store: settings file first, then explicit options, then the environment
pub async fn load_settings(options: &HinglishOptions) -> Result<MemorySettingsStore, HinglishError> {
    let settings = match options.settings_path.as_deref() {
        Some(path) => {
            let expanded = shellexpand::tilde(path);
            MemorySettingsStore::from_json_file(Path::new(expanded.as_ref())).await?
        }
        None => MemorySettingsStore::new(),
    };

    if let Some(api_key) = &options.api_key {
        settings
            .set(constants::SETTING_API_KEY, Value::String(api_key.clone()))
            .await?;
    } else if settings.get(constants::SETTING_API_KEY).await?.is_none() {
        if let Ok(api_key) = security::ApiKey::get() {
            settings
                .set(constants::SETTING_API_KEY, Value::String(api_key))
                .await?;
        }
    }

    if let Some(mode) = options.mode {
        settings
            .set(
                constants::SETTING_TRANSLATION_MODE,
                Value::String(mode.as_setting().to_string()),
            )
            .await?;
    } else if settings
        .get(constants::SETTING_TRANSLATION_MODE)
        .await?
        .is_none()
    {
        if let Ok(mode) = translation::TranslationMode::get() {
            settings
                .set(constants::SETTING_TRANSLATION_MODE, Value::String(mode))
                .await?;
        }
    }

    Ok(settings)
}

/// Loads the translator configuration from an explicit file or the default search paths
pub fn load_config(options: &HinglishOptions) -> Result<TranslatorConfig, HinglishError> {
    match options.config_path.as_deref() {
        Some(path) => {
            let expanded = shellexpand::tilde(path);
            Ok(ConfigManager::from_file(expanded.as_ref())?.into_config())
        }
        None => Ok(load_translator_config()),
    }
}

/// Parses HTML, re-parsing with the charset the document itself declares when it is valid
pub fn parse_document(
    input_data: &[u8],
    input_encoding: Option<String>,
) -> Result<(RcDom, String), HinglishError> {
    let mut document_encoding = input_encoding.unwrap_or_else(|| "utf-8".to_string());

    // 初始解析
    let mut dom = html_to_dom(input_data, &document_encoding)?;

    // 尝试确定文档的编码
    if let Some(html_charset) = get_charset(&dom.document) {
        if !html_charset.is_empty() {
            // 检查HTML内部指定的字符集是否有效
            if let Some(document_charset) =
                Encoding::for_label_no_replacement(html_charset.as_bytes())
            {
                document_encoding = html_charset;
                dom = html_to_dom(input_data, document_charset.name())?;
            }
        }
    }

    Ok((dom, document_encoding))
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Parses Content-Type header value
pub fn parse_content_type(content_type: &str) -> (String, String, bool) {
    let mut media_type = String::new();
    let mut charset = String::new();
    let mut is_base64 = false;

    let parts: Vec<&str> = content_type.split(';').collect();

    if !parts.is_empty() {
        media_type = parts[0].trim().to_lowercase();
    }

    for part in parts.iter().skip(1) {
        let part = part.trim();
        if let Some(value) = part.strip_prefix("charset=") {
            charset = value.trim_matches('"').to_string();
        } else if part == "base64" {
            is_base64 = true;
        }
    }

    (media_type, charset, is_base64)
}

/// Checks if the given media type represents plaintext content
pub fn is_plaintext_media_type(media_type: &str) -> bool {
    media_type.starts_with("text/") || PLAINTEXT_MEDIA_TYPES.contains(&media_type)
}

/// Formats output path with title and timestamp substitution
pub fn format_output_path(path: &str, document_title: Option<&str>) -> String {
    let datetime: &str = &Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let title = document_title.unwrap_or("");

    path.replace("%timestamp%", &datetime.replace(':', "_"))
        .replace(
            "%title%",
            title
                .replace(['/', '\\'], "_")
                .replace('<', "[")
                .replace('>', "]")
                .replace(':', " - ")
                .replace('\"', "")
                .replace('|', "-")
                .replace('?', "")
                .trim_start_matches('.'),
        )
        .replace("%extension%", "html")
        .replace("%ext%", "htm")
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    if crate::env::core::NoColor::get_or_default(false) {
        eprintln!("{msg}");
    } else {
        eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
    }
}

/// Prints an info message to stderr
pub fn print_info_message(msg: &str) {
    eprintln!("{msg}");
}
