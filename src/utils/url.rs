use base64::{prelude::BASE64_STANDARD, Engine};
use percent_encoding::percent_decode_str;
pub use url::Url;

use crate::core::parse_content_type;

/// 判断字符串是否是带协议的 URL
pub fn is_url_and_has_protocol(input: &str) -> bool {
    match Url::parse(input) {
        Ok(parsed_url) => !parsed_url.scheme().is_empty(),
        Err(_) => false,
    }
}

/// 解析 data URL，返回 (媒体类型, 字符集, 数据)
pub fn parse_data_url(url: &Url) -> (String, String, Vec<u8>) {
    let path: String = url.path().to_string();
    let comma_loc: usize = path.find(',').unwrap_or(path.len());

    // Parse data URL media type
    let (media_type, charset, is_base64) = parse_content_type(&path[..comma_loc]);

    // Parse raw data into vector of bytes
    let text: String = if comma_loc < path.len() {
        percent_decode_str(&path[comma_loc + 1..])
            .decode_utf8_lossy()
            .to_string()
    } else {
        String::new()
    };

    let blob: Vec<u8> = if is_base64 {
        BASE64_STANDARD.decode(&text).unwrap_or_default()
    } else {
        text.as_bytes().to_vec()
    };

    (media_type, charset, blob)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_data_url() {
        let url = Url::parse("data:text/html;charset=utf-8,%3Cp%3EHello%3C%2Fp%3E").unwrap();
        let (media_type, charset, data) = parse_data_url(&url);
        assert_eq!(media_type, "text/html");
        assert_eq!(charset, "utf-8");
        assert_eq!(data, b"<p>Hello</p>");
    }

    #[test]
    fn test_parse_base64_data_url() {
        let url = Url::parse("data:text/html;base64,PHA+SGVsbG88L3A+").unwrap();
        let (media_type, _, data) = parse_data_url(&url);
        assert_eq!(media_type, "text/html");
        assert_eq!(data, b"<p>Hello</p>");
    }

    #[test]
    fn test_is_url_and_has_protocol() {
        assert!(is_url_and_has_protocol("https://example.com/page"));
        assert!(is_url_and_has_protocol("data:text/html,hi"));
        assert!(!is_url_and_has_protocol("page.html"));
        assert!(!is_url_and_has_protocol("./docs/page.html"));
    }
}
