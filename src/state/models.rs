//! Backend resources as the client sees them.
//!
//! Every resource keeps the fields the reducers need as typed members and
//! carries everything else in a flattened map, so entries round-trip
//! exactly as the backend returned them.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields the client does not interpret.
pub type Extra = Map<String, Value>;

/// Opaque pagination token returned by list endpoints.
///
/// The client never computes offsets itself; it only passes through what
/// the backend returned, or the initial default of zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Offset {
    Number(u64),
    Token(String),
}

impl Default for Offset {
    fn default() -> Self {
        Offset::Number(0)
    }
}

impl From<u64> for Offset {
    fn from(value: u64) -> Self {
        Offset::Number(value)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Number(n) => write!(f, "{}", n),
            Offset::Token(t) => write!(f, "{}", t),
        }
    }
}

/// Previous/next page tokens. `None` means there is no such page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    #[serde(default)]
    pub previous_offset: Option<Offset>,
    #[serde(default)]
    pub next_offset: Option<Offset>,
}

impl PageCursor {
    pub fn new(previous_offset: Option<Offset>, next_offset: Option<Offset>) -> Self {
        Self {
            previous_offset,
            next_offset,
        }
    }
}

/// Account details returned by the identity dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub available_credit: Option<f64>,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub video_id: Option<u64>,
    #[serde(default)]
    pub video_name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub uuid: String,
    #[serde(rename = "vehicleLocation", default)]
    pub vehicle_location: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mechanic {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A file sent as the `file` part of a multipart upload.
#[derive(Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, naming the part after the file.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
