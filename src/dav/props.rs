use xmltree::Element;

use crate::api::client::ClientError;
use crate::api::models::child_text;
use crate::api::xml::parse_document;
use crate::dav::DavEntry;

pub const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<d:propfind xmlns:d="DAV:">
  <d:prop>
    <d:resourcetype/>
    <d:getcontentlength/>
    <d:getcontenttype/>
    <d:getlastmodified/>
    <d:getetag/>
  </d:prop>
</d:propfind>"#;

/// Parses a `207 Multi-Status` body. `href`s are returned as sent by the
/// server; `path` is filled in by the caller.
pub fn parse_multistatus(body: &str) -> Result<Vec<(String, DavEntry)>, ClientError> {
    let document = parse_document(body)?;

    let entries = child_elements(&document, "response")
        .map(|response| {
            let href = child_text(response, "href");
            let mut entry = DavEntry::default();

            // only propstats reporting 200 carry values
            for propstat in child_elements(response, "propstat") {
                let status = child_text(propstat, "status");
                if !status.is_empty() && !status.contains(" 200") {
                    continue;
                }
                if let Some(prop) = propstat.get_child("prop") {
                    read_props(prop, &mut entry);
                }
            }

            (href, entry)
        })
        .collect();

    Ok(entries)
}

fn read_props(prop: &Element, entry: &mut DavEntry) {
    let optional = |name: &str| {
        let text = child_text(prop, name);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    };

    if let Some(resource_type) = prop.get_child("resourcetype") {
        entry.is_collection = resource_type.get_child("collection").is_some();
    }
    if let Some(length) = optional("getcontentlength") {
        entry.content_length = length.parse().ok();
    }
    if let Some(content_type) = optional("getcontenttype") {
        entry.content_type = Some(content_type);
    }
    if let Some(modified) = optional("getlastmodified") {
        entry.last_modified = Some(modified);
    }
    if let Some(etag) = optional("getetag") {
        entry.etag = Some(etag.trim_matches('"').to_string());
    }
}

fn child_elements<'a>(parent: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    parent
        .children
        .iter()
        .filter_map(|node| node.as_element())
        .filter(move |element| element.name == name)
}
