//! Decoding of OCS XML replies.
//!
//! Replies are untrusted. Documents carrying a DOCTYPE are refused outright,
//! and the underlying xml-rs reader never fetches external resources, so a
//! reply cannot trigger file or network access through entity expansion.

use xmltree::{Element, XMLNode};

use crate::api::client::ClientError;
use crate::api::models::{child_text, OcsMeta, ShareResponse};

/// Stand-in for replies without a body.
const EMPTY_DOCUMENT: &str = "<root/>";

/// Parses an OCS reply body. An empty body yields a response whose fields
/// are all empty; a body that is not XML is a `ResponseParse` error.
pub fn parse_ocs_response(body: &str) -> Result<ShareResponse, ClientError> {
    let source = if body.trim().is_empty() {
        EMPTY_DOCUMENT
    } else {
        body
    };

    let document = parse_document(source)?;

    let (url, token, id) = match document.get_child("data") {
        Some(data) => (
            child_text(data, "url"),
            child_text(data, "token"),
            child_text(data, "id"),
        ),
        None => Default::default(),
    };

    Ok(ShareResponse {
        meta: parse_meta(&document),
        url,
        token,
        id,
        http_status: None,
        document,
    })
}

/// Parses an XML document, refusing DTDs. The body must hold exactly one
/// root element; comments and processing instructions around it are fine.
pub(crate) fn parse_document(source: &str) -> Result<Element, ClientError> {
    if declares_doctype(source) {
        return Err(parse_error("DOCTYPE declarations are not accepted"));
    }

    let nodes = Element::parse_all(source.as_bytes()).map_err(parse_error)?;

    let mut root = None;
    for node in nodes {
        match node {
            XMLNode::Element(element) if root.is_none() => root = Some(element),
            XMLNode::Element(_) => {
                return Err(parse_error("Extra content at the end of the document"))
            }
            XMLNode::Text(text) if !text.trim().is_empty() => {
                return Err(parse_error("Unexpected text outside the root element"))
            }
            _ => {}
        }
    }

    root.ok_or_else(|| parse_error("Document has no root element"))
}

/// Looks for a DOCTYPE in the prolog only, skipping the XML declaration,
/// processing instructions and comments that may precede it.
fn declares_doctype(source: &str) -> bool {
    let mut rest = source.trim_start_matches('\u{feff}');

    loop {
        rest = rest.trim_start();
        if rest.starts_with("<!DOCTYPE") {
            return true;
        }

        let (tail, terminator) = if let Some(tail) = rest.strip_prefix("<?") {
            (tail, "?>")
        } else if let Some(tail) = rest.strip_prefix("<!--") {
            (tail, "-->")
        } else {
            return false;
        };

        match tail.find(terminator) {
            Some(end) => rest = &tail[end + terminator.len()..],
            None => return false,
        }
    }
}

fn parse_error(reason: impl std::fmt::Display) -> ClientError {
    ClientError::ResponseParse(format!("Unable to parse response body into XML: {}", reason))
}

fn parse_meta(document: &Element) -> OcsMeta {
    let Some(meta) = document.get_child("meta") else {
        return OcsMeta::default();
    };

    OcsMeta {
        status: child_text(meta, "status"),
        status_code: child_text(meta, "statuscode").parse().ok(),
        message: child_text(meta, "message"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATED: &str = "<ocs><data><url>https://cloud.example/s/abc123</url>\
        <token>abc123</token><id>42</id></data></ocs>";

    #[test]
    fn extracts_share_fields() {
        let response = parse_ocs_response(CREATED).unwrap();
        assert_eq!(response.url, "https://cloud.example/s/abc123");
        assert_eq!(response.token, "abc123");
        assert_eq!(response.id, "42");
        assert_eq!(response.document.name, "ocs");
    }

    #[test]
    fn missing_url_is_empty() {
        let response = parse_ocs_response("<ocs><data><id>7</id></data></ocs>").unwrap();
        assert!(response.url.is_empty());
        assert!(response.token.is_empty());
        assert_eq!(response.id, "7");
    }

    #[test]
    fn missing_data_is_empty() {
        let response = parse_ocs_response("<ocs><meta><status>ok</status></meta></ocs>").unwrap();
        assert!(response.url.is_empty());
        assert!(response.id.is_empty());
        assert!(response.shares().is_empty());
    }

    #[test]
    fn empty_body_yields_root_document() {
        for body in ["", "  \n"] {
            let response = parse_ocs_response(body).unwrap();
            assert_eq!(response.document.name, "root");
            assert!(response.url.is_empty());
            assert!(response.token.is_empty());
            assert!(response.id.is_empty());
            assert_eq!(response.meta, OcsMeta::default());
        }
    }

    #[test]
    fn malformed_body_is_parse_failure() {
        for body in ["not xml at all", "<ocs><data><url>x</data></ocs>", "{\"ocs\":{}}"] {
            match parse_ocs_response(body) {
                Err(ClientError::ResponseParse(message)) => {
                    assert!(message.starts_with("Unable to parse response body into XML"))
                }
                other => panic!("expected parse failure for {:?}, got {:?}", body, other),
            }
        }
    }

    #[test]
    fn doctype_is_refused() {
        let body = "<?xml version=\"1.0\"?>\
            <!DOCTYPE ocs [<!ENTITY xxe SYSTEM \"file:///etc/passwd\">]>\
            <ocs><data><url>&xxe;</url></data></ocs>";
        assert!(matches!(
            parse_ocs_response(body),
            Err(ClientError::ResponseParse(_))
        ));
    }

    #[test]
    fn two_root_elements_are_refused() {
        let body = "<ocs><data><id>1</id></data></ocs><ocs><data><id>2</id></data></ocs>";
        assert!(matches!(
            parse_ocs_response(body),
            Err(ClientError::ResponseParse(_))
        ));
    }

    #[test]
    fn comments_around_root_are_accepted() {
        let body = "<?xml version=\"1.0\"?>\n<!-- generated -->\n\
            <ocs><data><id>9</id></data></ocs>\n<!-- end -->\n";
        let response = parse_ocs_response(body).unwrap();
        assert_eq!(response.id, "9");
        assert_eq!(response.document.name, "ocs");
    }

    #[test]
    fn doctype_text_inside_cdata_is_accepted() {
        let body = "<ocs><meta><message><![CDATA[<!DOCTYPE html> page]]></message></meta>\
            <data><id>3</id></data></ocs>";
        let response = parse_ocs_response(body).unwrap();
        assert_eq!(response.id, "3");
    }

    #[test]
    fn doctype_after_comment_is_refused() {
        let body = "<?xml version=\"1.0\"?><!-- x --><!DOCTYPE ocs><ocs/>";
        assert!(matches!(
            parse_ocs_response(body),
            Err(ClientError::ResponseParse(_))
        ));
    }

    #[test]
    fn reads_meta_block() {
        let body = "<ocs><meta><status>failure</status><statuscode>404</statuscode>\
            <message>Wrong share ID, share doesn't exist</message></meta><data/></ocs>";
        let response = parse_ocs_response(body).unwrap();
        assert_eq!(response.meta.status, "failure");
        assert_eq!(response.meta.status_code, Some(404));
        assert!(!response.is_ok());

        let ok = parse_ocs_response("<ocs><meta><statuscode>100</statuscode></meta></ocs>").unwrap();
        assert!(ok.is_ok());
    }

    #[test]
    fn lists_repeated_elements() {
        let body = "<ocs><data>\
            <element><id>1</id><share_type>3</share_type><path>/a.txt</path>\
            <token>t1</token><url>https://cloud.example/s/t1</url><permissions>1</permissions></element>\
            <element><id>2</id><share_type>3</share_type><path>/b.txt</path>\
            <token>t2</token><expiration>2026-01-01 00:00:00</expiration></element>\
            </data></ocs>";
        let response = parse_ocs_response(body).unwrap();
        let shares = response.shares();
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].id, "1");
        assert_eq!(shares[0].permissions, Some(1));
        assert_eq!(shares[0].share_type, Some(3));
        assert_eq!(shares[1].path, "/b.txt");
        assert_eq!(shares[1].url, "");
        assert_eq!(shares[1].expiration.as_deref(), Some("2026-01-01 00:00:00"));
        // top-level fields stay empty for list replies
        assert!(response.id.is_empty());
    }

    #[test]
    fn single_share_lists_as_one_entry() {
        let shares = parse_ocs_response(CREATED).unwrap().shares();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].token, "abc123");
    }
}
