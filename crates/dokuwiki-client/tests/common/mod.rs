//! In-memory DokuWiki used by the integration tests.
//!
//! Implements the subset of the remote API the client calls, with the same
//! depth rules, fault messages and "empty page is no page" behavior as the
//! real wiki. Every call is recorded so tests can check ordering and the exact
//! parameters sent.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dokuwiki_client::{Result, Transport, WikiClient, WikiError};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};

pub const VERSION: &str = "Release 2024-02-06b \"Kaos\"";
pub const MISSING_FILE: &str = "The requested file does not exist";
pub const FILE_EXISTS: &str = "File already exists. Nothing done.";
pub const DELETE_FAILED: &str = "Could not delete file";
pub const FILE_REFERENCED: &str = "File is still referenced";
pub const EDIT_DENIED: &str = "You are not allowed to edit this page";

const START_TIME: i64 = 1_700_000_000;

#[derive(Clone, Debug)]
struct StoredPage {
    content: String,
    mtime: i64,
}

#[derive(Clone, Debug)]
struct StoredFile {
    content: Vec<u8>,
    mtime: i64,
}

#[derive(Default)]
struct WikiState {
    pages: BTreeMap<String, StoredPage>,
    files: BTreeMap<String, StoredFile>,
    clock: i64,
    calls: Vec<(String, Vec<Value>)>,
    locked_pages: HashSet<String>,
}

impl WikiState {
    fn tick(&mut self) -> i64 {
        self.clock += 1;
        START_TIME + self.clock
    }
}

/// Shared handle; clones see the same wiki
#[derive(Clone, Default)]
pub struct InMemoryWiki {
    state: Arc<Mutex<WikiState>>,
}

impl InMemoryWiki {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> WikiClient<InMemoryWiki> {
        WikiClient::with_transport(self.clone())
    }

    /// Make every `putPage` on `id` fail, as an ACL would
    pub fn lock_page(&self, id: &str) {
        self.state.lock().locked_pages.insert(id.to_string());
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.state.lock().calls.clone()
    }

    pub fn method_calls(&self) -> Vec<String> {
        self.state
            .lock()
            .calls
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn page_ids(&self) -> Vec<String> {
        self.state.lock().pages.keys().cloned().collect()
    }

    pub fn file_ids(&self) -> Vec<String> {
        self.state.lock().files.keys().cloned().collect()
    }

    fn dispatch(&self, method: &str, params: &[Value]) -> Result<Value> {
        let mut state = self.state.lock();
        match method {
            "dokuwiki.getVersion" => Ok(json!(VERSION)),
            "dokuwiki.getPagelist" => {
                let (namespace, depth) = listing_args(params)?;
                let items = state
                    .pages
                    .iter()
                    .filter(|(id, _)| in_listing(id, namespace, depth))
                    .map(|(id, page)| {
                        json!({
                            "id": id,
                            "rev": page.mtime,
                            "mtime": page.mtime,
                            "size": page.content.len(),
                            "hash": format!("{:x}", page.content.len()),
                        })
                    })
                    .collect();
                Ok(Value::Array(items))
            }
            "dokuwiki.search" => {
                let query = str_arg(params, 0)?.to_lowercase();
                let terms: Vec<&str> = query.split_whitespace().collect();
                let items = state
                    .pages
                    .iter()
                    .filter(|(id, page)| {
                        let haystack = format!("{} {}", id, page.content).to_lowercase();
                        !terms.is_empty() && terms.iter().all(|t| haystack.contains(t))
                    })
                    .map(|(id, page)| {
                        json!({
                            "id": id,
                            "score": terms.len(),
                            "rev": page.mtime,
                            "mtime": page.mtime,
                            "size": page.content.len(),
                            "snippet": page.content,
                            "title": id.rsplit(':').next().unwrap_or_default(),
                        })
                    })
                    .collect();
                Ok(Value::Array(items))
            }
            "wiki.getAllPages" => Ok(Value::Array(
                state
                    .pages
                    .iter()
                    .map(|(id, page)| {
                        json!({
                            "id": id,
                            "perms": 8,
                            "size": page.content.len(),
                            "lastModified": page.mtime,
                        })
                    })
                    .collect(),
            )),
            "wiki.getPage" => {
                let id = str_arg(params, 0)?;
                Ok(json!(
                    state
                        .pages
                        .get(id)
                        .map(|p| p.content.clone())
                        .unwrap_or_default()
                ))
            }
            "wiki.putPage" => {
                let id = str_arg(params, 0)?.to_string();
                let text = str_arg(params, 1)?.to_string();
                if state.locked_pages.contains(&id) {
                    return Err(WikiError::fault(112, EDIT_DENIED));
                }
                if text.is_empty() {
                    state.pages.remove(&id);
                } else {
                    let mtime = state.tick();
                    state.pages.insert(
                        id,
                        StoredPage {
                            content: text,
                            mtime,
                        },
                    );
                }
                Ok(json!(true))
            }
            "wiki.getAttachments" => {
                let (namespace, depth) = listing_args(params)?;
                let items = state
                    .files
                    .iter()
                    .filter(|(id, _)| in_listing(id, namespace, depth))
                    .map(|(id, file)| {
                        let name = id.rsplit(':').next().unwrap_or_default();
                        json!({
                            "id": id,
                            "file": name,
                            "size": file.content.len(),
                            "mtime": file.mtime,
                            "lastModified": file.mtime,
                            "isimg": name.ends_with(".png") || name.ends_with(".svg"),
                            "writable": true,
                            "perms": 16,
                        })
                    })
                    .collect();
                Ok(Value::Array(items))
            }
            "wiki.getAttachment" => {
                let id = str_arg(params, 0)?;
                match state.files.get(id) {
                    Some(file) => Ok(json!(STANDARD.encode(&file.content))),
                    None => Err(WikiError::fault(221, MISSING_FILE)),
                }
            }
            "wiki.putAttachment" => {
                let id = str_arg(params, 0)?.to_string();
                let content = STANDARD
                    .decode(str_arg(params, 1)?)
                    .map_err(WikiError::from)?;
                let attrs = map_arg(params, 2)?;
                let overwrite = attrs.get("ow").and_then(Value::as_bool).unwrap_or(false);
                if state.files.contains_key(&id) && !overwrite {
                    return Err(WikiError::fault(232, FILE_EXISTS));
                }
                let mtime = match attrs.get("mtime").and_then(Value::as_i64) {
                    Some(mtime) => mtime,
                    None => state.tick(),
                };
                state.files.insert(id.clone(), StoredFile { content, mtime });
                Ok(json!(id))
            }
            "wiki.deleteAttachment" => {
                let id = str_arg(params, 0)?;
                if !state.files.contains_key(id) {
                    return Err(WikiError::fault(221, DELETE_FAILED));
                }
                let reference = format!("{{{{{}", id);
                if state.pages.values().any(|p| p.content.contains(&reference)) {
                    return Err(WikiError::fault(230, FILE_REFERENCED));
                }
                state.files.remove(id);
                Ok(json!(0))
            }
            other => Err(WikiError::fault(
                -32601,
                format!("Method does not exist: {}", other),
            )),
        }
    }
}

#[async_trait]
impl Transport for InMemoryWiki {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.state
            .lock()
            .calls
            .push((method.to_string(), params.clone()));
        self.dispatch(method, &params)
    }
}

fn str_arg(params: &[Value], index: usize) -> Result<&str> {
    params
        .get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| WikiError::fault(-32602, format!("Parameter {} must be a string", index)))
}

fn map_arg(params: &[Value], index: usize) -> Result<&Map<String, Value>> {
    params
        .get(index)
        .and_then(Value::as_object)
        .ok_or_else(|| WikiError::fault(-32602, format!("Parameter {} must be a struct", index)))
}

fn listing_args(params: &[Value]) -> Result<(&str, u64)> {
    let namespace = str_arg(params, 0)?;
    let depth = map_arg(params, 1)?
        .get("depth")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    Ok((namespace, depth))
}

/// Same rule as the wiki's search: the id must be inside the namespace and,
/// unless depth is 0, have at most `depth` segments.
fn in_listing(id: &str, namespace: &str, depth: u64) -> bool {
    let inside = namespace.is_empty() || id.starts_with(&format!("{}:", namespace));
    let segments = id.split(':').count() as u64;
    inside && (depth == 0 || segments <= depth)
}
