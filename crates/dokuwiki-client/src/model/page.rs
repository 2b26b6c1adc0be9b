// Page model types

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::decode::FieldReader;
use crate::error::ParseError;
use crate::page_id;

/// Item of a `getPagelist` listing
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PageSummary {
    /// Page id (namespace + name)
    pub id: String,
    /// Page revision
    pub rev: i64,
    /// Page size in bytes
    pub size: i64,
    /// Last change timestamp
    pub mtime: i64,
}

impl PageSummary {
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        let mut reader = FieldReader::new("PageSummary", value)?;
        let summary = Self::read(&mut reader);
        reader.finish(summary)
    }

    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            id: reader.string("id"),
            rev: reader.int("rev"),
            size: reader.int("size"),
            mtime: reader.int("mtime"),
        }
    }

    pub fn name(&self) -> &str {
        page_id::name_of(&self.id)
    }

    pub fn namespace(&self) -> &str {
        page_id::namespace_of(&self.id)
    }
}

/// Full-text search hit: the listed page plus ranking data
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub page: PageSummary,
    /// Score achieved in fulltext search
    pub score: i64,
    /// Text snippet with hit highlighting
    pub snippet: String,
    pub title: String,
}

impl SearchHit {
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        let mut reader = FieldReader::new("SearchHit", value)?;
        let hit = Self {
            page: PageSummary::read(&mut reader),
            score: reader.int("score"),
            snippet: reader.string("snippet"),
            title: reader.string("title"),
        };
        reader.finish(hit)
    }

    pub fn id(&self) -> &str {
        &self.page.id
    }
}

/// Item of a `getAllPages` listing
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub id: String,
    /// ACL permission level on the page
    pub perms: i64,
    pub size: i64,
    pub last_modified: NaiveDateTime,
}

impl PageRecord {
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        let mut reader = FieldReader::new("PageRecord", value)?;
        let record = Self {
            id: reader.string("id"),
            perms: reader.int("perms"),
            size: reader.int("size"),
            last_modified: reader.datetime("lastModified"),
        };
        reader.finish(record)
    }
}
