use serde::Serialize;
use xmltree::Element;

/// Share type codes used by the share API. Only public links are created
/// here.
pub struct ShareType;

impl ShareType {
    pub const PUBLIC_LINK: u8 = 3;
}

/// Permission bits understood by the share API.
pub struct SharePermissions;

impl SharePermissions {
    pub const READ: u32 = 1;
}

/// Share fields that may be changed after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareParam {
    Permissions,
    Password,
    PublicUpload,
    ExpireDate,
}

impl ShareParam {
    pub const ALL: [ShareParam; 4] = [
        ShareParam::Permissions,
        ShareParam::Password,
        ShareParam::PublicUpload,
        ShareParam::ExpireDate,
    ];

    /// Form field name sent to the server.
    pub const fn key(&self) -> &'static str {
        match self {
            ShareParam::Permissions => "permissions",
            ShareParam::Password => "password",
            ShareParam::PublicUpload => "publicUpload",
            ShareParam::ExpireDate => "expireDate",
        }
    }

    /// The only place update keys are checked against.
    pub fn from_key(key: &str) -> Option<ShareParam> {
        ShareParam::ALL.into_iter().find(|param| param.key() == key)
    }
}

/// Formats a date the way `expireDate` expects it.
pub fn expire_date_value(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Body of a share creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub path: String,
    pub share_type: u8,
    pub permissions: u32,
}

impl ShareRequest {
    /// Read-only public link for `path`.
    pub fn public_link(path: &str) -> Self {
        ShareRequest {
            path: path.to_string(),
            share_type: ShareType::PUBLIC_LINK,
            permissions: SharePermissions::READ,
        }
    }

    pub fn form_params(&self) -> Vec<(String, String)> {
        vec![
            ("path".to_string(), self.path.clone()),
            ("shareType".to_string(), self.share_type.to_string()),
            ("permissions".to_string(), self.permissions.to_string()),
        ]
    }
}

/// The `<meta>` block of an OCS reply. Fields are empty when the server
/// sent no meta block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OcsMeta {
    pub status: String,
    pub status_code: Option<u32>,
    pub message: String,
}

/// Parsed result of any OCS call.
///
/// `url`, `token` and `id` are empty strings when the reply did not carry
/// them; check for emptiness rather than presence.
#[derive(Debug, Clone)]
pub struct ShareResponse {
    pub meta: OcsMeta,
    pub url: String,
    pub token: String,
    pub id: String,
    /// HTTP status of the reply. `None` when the body was parsed without
    /// going through a request.
    pub http_status: Option<u16>,
    /// Whole parsed document, for fields not modelled above.
    pub document: Element,
}

impl ShareResponse {
    /// True when the OCS meta block reports success. OCS v1 answers 100,
    /// v2 answers 200.
    pub fn is_ok(&self) -> bool {
        self.meta.status.eq_ignore_ascii_case("ok") || matches!(self.meta.status_code, Some(100 | 200))
    }

    /// Shares carried by the reply. A listing has one `<element>` per share
    /// under `<data>`; a single share has its fields directly in `<data>`.
    pub fn shares(&self) -> Vec<ShareEntry> {
        let Some(data) = self.document.get_child("data") else {
            return Vec::new();
        };

        let elements: Vec<ShareEntry> = data
            .children
            .iter()
            .filter_map(|node| node.as_element())
            .filter(|element| element.name == "element")
            .map(ShareEntry::from_element)
            .collect();

        if !elements.is_empty() {
            return elements;
        }

        if data.get_child("id").is_some() {
            vec![ShareEntry::from_element(data)]
        } else {
            Vec::new()
        }
    }
}

/// One share as listed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShareEntry {
    pub id: String,
    pub token: String,
    pub url: String,
    pub path: String,
    #[serde(rename = "shareType")]
    pub share_type: Option<u8>,
    pub permissions: Option<u32>,
    pub expiration: Option<String>,
}

impl ShareEntry {
    pub fn from_element(element: &Element) -> Self {
        let text = |name: &str| child_text(element, name);
        let expiration = text("expiration");

        ShareEntry {
            id: text("id"),
            token: text("token"),
            url: text("url"),
            path: text("path"),
            share_type: text("share_type").parse().ok(),
            permissions: text("permissions").parse().ok(),
            expiration: if expiration.is_empty() { None } else { Some(expiration) },
        }
    }
}

/// Trimmed text of the named child, or an empty string.
pub(crate) fn child_text(element: &Element, name: &str) -> String {
    element
        .get_child(name)
        .and_then(|child| child.get_text())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}
