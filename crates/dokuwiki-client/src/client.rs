// WikiClient - typed facade over the DokuWiki remote API

use std::collections::HashSet;

use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::{
    config::WikiClientConfig,
    constants::{UNLIMITED_DEPTH, param, rpc_method},
    decode::{decode_binary, decode_ids, decode_list, encode_binary, expect_string},
    error::Result,
    model::{AttachmentInfo, PageRecord, PageSummary, SearchHit},
    page_id,
    transport::{JsonRpcTransport, Transport},
};

fn depth_option(depth: u32) -> Value {
    let mut options = Map::new();
    options.insert(param::DEPTH.to_string(), json!(depth));
    Value::Object(options)
}

/// Optional attributes of a page update
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PutPageOptions {
    /// Change summary stored in the page history
    pub summary: Option<String>,
    /// Mark the change as minor
    pub minor: Option<bool>,
}

impl PutPageOptions {
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn with_minor(mut self, minor: bool) -> Self {
        self.minor = Some(minor);
        self
    }

    fn to_attrs(&self) -> Value {
        let mut attrs = Map::new();
        if let Some(summary) = &self.summary {
            attrs.insert(param::SUMMARY.to_string(), json!(summary));
        }
        if let Some(minor) = self.minor {
            attrs.insert(param::MINOR.to_string(), json!(minor));
        }
        Value::Object(attrs)
    }
}

/// Optional attributes of an attachment upload
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PutAttachmentOptions {
    /// Replace an existing file instead of failing
    pub overwrite: bool,
    /// Modification time to record instead of the upload time (Unix seconds)
    pub mtime: Option<i64>,
}

impl PutAttachmentOptions {
    pub fn overwrite(overwrite: bool) -> Self {
        Self {
            overwrite,
            mtime: None,
        }
    }

    pub fn with_mtime(mut self, mtime: i64) -> Self {
        self.mtime = Some(mtime);
        self
    }

    fn to_attrs(&self) -> Value {
        let mut attrs = Map::new();
        attrs.insert(param::OVERWRITE.to_string(), json!(self.overwrite));
        if let Some(mtime) = self.mtime {
            attrs.insert(param::MTIME.to_string(), json!(mtime));
        }
        Value::Object(attrs)
    }
}

/// Client for one wiki. Every method is a fresh round trip; nothing is cached.
///
/// Composite operations (`delete_pages`, `delete_attachments`,
/// `delete_namespace`) issue their calls one after another and stop at the
/// first failure. Items deleted before the failure stay deleted.
pub struct WikiClient<T = JsonRpcTransport> {
    transport: T,
}

impl WikiClient<JsonRpcTransport> {
    /// Create a new WikiClient talking JSON-RPC to the configured endpoint
    pub fn new(config: WikiClientConfig) -> Result<Self> {
        Ok(Self::with_transport(JsonRpcTransport::new(config)?))
    }

    /// Create a new WikiClient from an endpoint URL and credentials
    pub fn from_url(url: &str, username: &str, password: &str) -> Result<Self> {
        Self::new(WikiClientConfig::new(url).with_auth(username, password))
    }
}

impl<T: Transport> WikiClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        debug!("Invoking {}", method);
        self.transport.call(method, params).await
    }

    /// Version string of the wiki
    pub async fn get_version(&self) -> Result<String> {
        let value = self.call(rpc_method::GET_VERSION, vec![]).await?;
        expect_string(rpc_method::GET_VERSION, value)
    }

    // ============================================================================
    // Namespace / Page listing APIs
    // ============================================================================

    async fn page_list(&self, namespace: &str, depth: u32) -> Result<Value> {
        self.call(
            rpc_method::GET_PAGELIST,
            vec![json!(namespace), depth_option(depth)],
        )
        .await
    }

    /// Names of the namespaces directly below `namespace`.
    ///
    /// The wiki has no directory listing, so child namespaces are inferred
    /// from the pages one level deeper. A child namespace holding only nested
    /// namespaces and no pages of its own is not reported.
    pub async fn get_namespace_names(&self, namespace: &str) -> Result<Vec<String>> {
        let listing = self
            .page_list(namespace, page_id::depth_of(namespace) + 1)
            .await?;
        let ids = decode_ids(rpc_method::GET_PAGELIST, &listing)?;

        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .map(|id| page_id::namespace_of(id))
            .filter(|ns| *ns != namespace)
            .map(page_id::name_of)
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect())
    }

    /// Pages in `namespace` down to the absolute `depth`; 0 means unlimited
    pub async fn get_pages(&self, namespace: &str, depth: u32) -> Result<Vec<PageSummary>> {
        let listing = self.page_list(namespace, depth).await?;
        decode_list(rpc_method::GET_PAGELIST, &listing, PageSummary::parse)
    }

    /// Names of pages directly in `namespace`, without sub-namespaces
    pub async fn get_page_names(&self, namespace: &str) -> Result<Vec<String>> {
        let listing = self
            .page_list(namespace, page_id::depth_of(namespace))
            .await?;
        Ok(decode_ids(rpc_method::GET_PAGELIST, &listing)?
            .iter()
            .map(|id| page_id::name_of(id).to_string())
            .collect())
    }

    pub async fn get_all_pages(&self) -> Result<Vec<PageRecord>> {
        let listing = self.call(rpc_method::GET_ALL_PAGES, vec![]).await?;
        decode_list(rpc_method::GET_ALL_PAGES, &listing, PageRecord::parse)
    }

    // ============================================================================
    // Search APIs
    // ============================================================================

    async fn search(&self, query: &str) -> Result<Value> {
        self.call(rpc_method::SEARCH, vec![json!(query)]).await
    }

    /// Full-text search using the wiki's query syntax
    pub async fn search_pages(&self, query: &str) -> Result<Vec<SearchHit>> {
        let hits = self.search(query).await?;
        decode_list(rpc_method::SEARCH, &hits, SearchHit::parse)
    }

    /// Ids of pages matching `query`
    pub async fn search_page_ids(&self, query: &str) -> Result<Vec<String>> {
        let hits = self.search(query).await?;
        decode_ids(rpc_method::SEARCH, &hits)
    }

    // ============================================================================
    // Page content APIs
    // ============================================================================

    /// Raw content of a page; a page that does not exist reads as ""
    pub async fn get_page(&self, id: &str) -> Result<String> {
        let value = self.call(rpc_method::GET_PAGE, vec![json!(id)]).await?;
        expect_string(rpc_method::GET_PAGE, value)
    }

    /// Create or replace a page
    pub async fn put_page(&self, id: &str, text: &str) -> Result<()> {
        self.put_page_with(id, text, &PutPageOptions::default()).await
    }

    pub async fn put_page_with(
        &self,
        id: &str,
        text: &str,
        options: &PutPageOptions,
    ) -> Result<()> {
        self.call(
            rpc_method::PUT_PAGE,
            vec![json!(id), json!(text), options.to_attrs()],
        )
        .await?;
        Ok(())
    }

    /// The wiki has no page delete; saving empty content removes the page
    pub async fn delete_page(&self, id: &str) -> Result<()> {
        self.put_page(id, "").await
    }

    /// Delete every page in `namespace` and all of its sub-namespaces
    pub async fn delete_pages(&self, namespace: &str) -> Result<()> {
        let listing = self.page_list(namespace, UNLIMITED_DEPTH).await?;
        let ids = decode_ids(rpc_method::GET_PAGELIST, &listing)?;
        info!("Deleting {} pages under '{}'", ids.len(), namespace);

        for id in &ids {
            self.delete_page(id).await?;
            debug!("Deleted page {}", id);
        }
        Ok(())
    }

    // ============================================================================
    // Attachment APIs
    // ============================================================================

    async fn attachment_list(&self, namespace: &str, depth: u32) -> Result<Vec<AttachmentInfo>> {
        let listing = self
            .call(
                rpc_method::GET_ATTACHMENTS,
                vec![json!(namespace), depth_option(depth)],
            )
            .await?;
        decode_list(rpc_method::GET_ATTACHMENTS, &listing, AttachmentInfo::parse)
    }

    /// Attachments directly in `namespace`
    pub async fn get_attachments(&self, namespace: &str) -> Result<Vec<AttachmentInfo>> {
        self.attachment_list(namespace, page_id::depth_of(namespace)).await
    }

    /// Attachments in `namespace` down to the absolute `depth`; 0 means unlimited
    pub async fn get_attachments_at(
        &self,
        namespace: &str,
        depth: u32,
    ) -> Result<Vec<AttachmentInfo>> {
        self.attachment_list(namespace, depth).await
    }

    /// Plain file names of attachments directly in `namespace`
    pub async fn get_attachment_file_names(&self, namespace: &str) -> Result<Vec<String>> {
        Ok(self
            .get_attachments(namespace)
            .await?
            .into_iter()
            .map(|info| info.file)
            .collect())
    }

    /// Content of an attachment; faults if the file does not exist
    pub async fn get_attachment(&self, id: &str) -> Result<Vec<u8>> {
        let value = self.call(rpc_method::GET_ATTACHMENT, vec![json!(id)]).await?;
        decode_binary(rpc_method::GET_ATTACHMENT, value)
    }

    pub async fn put_attachment(&self, id: &str, content: &[u8], overwrite: bool) -> Result<()> {
        self.put_attachment_with(id, content, &PutAttachmentOptions::overwrite(overwrite))
            .await
    }

    pub async fn put_attachment_with(
        &self,
        id: &str,
        content: &[u8],
        options: &PutAttachmentOptions,
    ) -> Result<()> {
        self.call(
            rpc_method::PUT_ATTACHMENT,
            vec![json!(id), encode_binary(content), options.to_attrs()],
        )
        .await?;
        Ok(())
    }

    /// Faults if the file does not exist or is still referenced by a page
    pub async fn delete_attachment(&self, id: &str) -> Result<()> {
        self.call(rpc_method::DELETE_ATTACHMENT, vec![json!(id)]).await?;
        Ok(())
    }

    /// Delete every attachment in `namespace` and all of its sub-namespaces
    pub async fn delete_attachments(&self, namespace: &str) -> Result<()> {
        let attachments = self.attachment_list(namespace, UNLIMITED_DEPTH).await?;
        info!(
            "Deleting {} attachments under '{}'",
            attachments.len(),
            namespace
        );

        for attachment in &attachments {
            self.delete_attachment(&attachment.id).await?;
            debug!("Deleted attachment {}", attachment.id);
        }
        Ok(())
    }

    /// Remove all pages, then all attachments, under `namespace`.
    ///
    /// Pages go first so that attachments they reference become deletable.
    /// An attachment still referenced from outside the namespace makes this
    /// fail after the pages are already gone.
    pub async fn delete_namespace(&self, namespace: &str) -> Result<()> {
        info!("Deleting namespace '{}'", namespace);
        self.delete_pages(namespace).await?;
        self.delete_attachments(namespace).await
    }
}
