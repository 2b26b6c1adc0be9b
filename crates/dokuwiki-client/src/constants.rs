// Remote method names and parameter keys of the DokuWiki API

pub mod rpc_method {
    // Wiki
    pub const GET_VERSION: &str = "dokuwiki.getVersion";
    pub const SEARCH: &str = "dokuwiki.search";

    // Pages
    pub const GET_PAGELIST: &str = "dokuwiki.getPagelist";
    pub const GET_ALL_PAGES: &str = "wiki.getAllPages";
    pub const GET_PAGE: &str = "wiki.getPage";
    pub const PUT_PAGE: &str = "wiki.putPage";

    // Attachments
    pub const GET_ATTACHMENTS: &str = "wiki.getAttachments";
    pub const GET_ATTACHMENT: &str = "wiki.getAttachment";
    pub const PUT_ATTACHMENT: &str = "wiki.putAttachment";
    pub const DELETE_ATTACHMENT: &str = "wiki.deleteAttachment";
}

pub mod param {
    /// Listing depth, absolute from the root; 0 means unlimited
    pub const DEPTH: &str = "depth";
    /// Change summary of `putPage`
    pub const SUMMARY: &str = "sum";
    /// Minor change flag of `putPage`
    pub const MINOR: &str = "minor";
    /// Overwrite flag of `putAttachment`
    pub const OVERWRITE: &str = "ow";
    /// Modification time override of `putAttachment`
    pub const MTIME: &str = "mtime";
}

/// Depth value requesting the whole subtree
pub const UNLIMITED_DEPTH: u32 = 0;

/// Default JSON-RPC endpoint path below the wiki base URL
pub const JSONRPC_PATH: &str = "/lib/exe/jsonrpc.php";
