use encoding_rs::Encoding;
use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever_rcdom::{RcDom, SerializableHandle};

use crate::core::HinglishError;

/// 序列化文档
///
/// `document_encoding` 为空时输出 UTF-8，否则按该编码重新编码。
pub fn serialize_document(dom: &RcDom, document_encoding: &str) -> Result<Vec<u8>, HinglishError> {
    let mut buf: Vec<u8> = Vec::new();

    let serializable: SerializableHandle = dom.document.clone().into();
    serialize(&mut buf, &serializable, SerializeOpts::default())
        .map_err(|e| HinglishError::new(&format!("Unable to serialize DOM into buffer: {e}")))?;

    if !document_encoding.is_empty() {
        if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
            let s: &str = &String::from_utf8_lossy(&buf);
            let (data, _, _) = encoding.encode(s);
            buf = data.to_vec();
        }
    }

    Ok(buf)
}
