/// Application name
pub const APP_NAME: &str = "Livredor";

/// Maximum note content length, counted in `char`s
pub const MAX_CONTENT_CHARS: usize = 500;

/// Field label preceding the author line in a blob block
pub const AUTHOR_LABEL: &str = "author:";

/// Field label preceding the timestamp line in a blob block
pub const TIME_LABEL: &str = "time:";

/// Field label preceding the first content line in a blob block
pub const CONTENT_LABEL: &str = "content:";

/// Timestamp format used for every note time string
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Name of the local-cache slot holding the visitor's own notes
pub const NOTES_CACHE_SLOT: &str = "livredor_notes";

/// Default HTTP API port (server)
pub const DEFAULT_HTTP_PORT: u16 = 8080;
