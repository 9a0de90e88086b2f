//! HTML document rendering for promo banners.
//!
//! Three fixed templates sharing one banner style: an embed variant whose
//! image element carries the bytes as a base64 data URI, a link variant
//! sourcing a presigned URL, and a preview variant for interactive viewing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const BANNER_STYLE: &str = "\
            .promo-banner {
                max-width: 100%;
                height: auto;
                border-radius: 8px;
                box-shadow: 0 4px 8px rgba(0,0,0,0.1);
            }";

/// Document embedding the image bytes as an inline data URI.
pub(crate) fn embed_document(content_type: &str, image: &[u8]) -> String {
    let payload = STANDARD.encode(image);
    format!(
        "<!DOCTYPE html>
<html>
<head>
    <meta charset=\"UTF-8\">
    <title>Promo banner</title>
    <style>
{BANNER_STYLE}
    </style>
</head>
<body>
    <img src=\"data:{content_type};base64,{payload}\" class=\"promo-banner\" alt=\"Promo banner\"/>
</body>
</html>"
    )
}

/// Document whose image element sources a presigned URL.
pub(crate) fn link_document(image_url: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html>
<head>
    <meta charset=\"UTF-8\">
    <title>Promo banner</title>
    <style>
{BANNER_STYLE}
    </style>
</head>
<body>
    <img src=\"{image_url}\" class=\"promo-banner\" alt=\"Promo banner\"/>
</body>
</html>"
    )
}

/// Preview page with a heading and the image identifier as a caption.
pub(crate) fn preview_document(image_url: &str, image_id: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html>
<head>
    <meta charset=\"UTF-8\">
    <title>Promo banner - Preview</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; }}
{BANNER_STYLE}
    </style>
</head>
<body>
    <h1>Banner preview</h1>
    <img src=\"{image_url}\" class=\"promo-banner\" alt=\"Promo banner\"/>
    <p>Image ID: {image_id}</p>
</body>
</html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_document_data_uri_round_trips() {
        let original = b"\x89PNG\r\n\x1a\nfake image bytes";
        let document = embed_document("image/png", original);

        let start = document
            .find("base64,")
            .expect("data URI present")
            + "base64,".len();
        let end = document[start..].find('"').expect("attribute closes") + start;
        let decoded = STANDARD
            .decode(&document[start..end])
            .expect("payload is valid base64");

        assert_eq!(decoded, original);
        assert!(document.contains("data:image/png;base64,"));
    }

    #[test]
    fn test_link_document_sources_url() {
        let document = link_document("https://images.example.com/a.png?sig=xyz");
        assert!(document.contains("<img src=\"https://images.example.com/a.png?sig=xyz\""));
        assert!(document.contains("promo-banner"));
        assert!(document.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_preview_document_carries_identifier() {
        let document = preview_document("https://images.example.com/a.png", "img-42");
        assert!(document.contains("Image ID: img-42"));
        assert!(document.contains("<h1>Banner preview</h1>"));
        assert!(document.contains("<img src=\"https://images.example.com/a.png\""));
    }
}
