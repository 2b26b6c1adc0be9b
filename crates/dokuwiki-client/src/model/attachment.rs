// Attachment model types

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::decode::FieldReader;
use crate::error::ParseError;

/// File uploaded to the wiki as attachment, as listed by `getAttachments`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentInfo {
    /// Media id (namespace + name)
    pub id: String,
    /// Name of the file
    pub file: String,
    /// Size in bytes
    pub size: i64,
    /// Upload date as a timestamp
    pub mtime: i64,
    pub last_modified: NaiveDateTime,
    #[serde(rename = "isimg")]
    pub is_img: bool,
    pub writable: bool,
    pub perms: i64,
}

impl AttachmentInfo {
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        let mut reader = FieldReader::new("AttachmentInfo", value)?;
        let info = Self {
            id: reader.string("id"),
            file: reader.string("file"),
            size: reader.int("size"),
            mtime: reader.int("mtime"),
            last_modified: reader.datetime("lastModified"),
            is_img: reader.bool("isimg"),
            writable: reader.bool("writable"),
            perms: reader.int("perms"),
        };
        reader.finish(info)
    }
}
