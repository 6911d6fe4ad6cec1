//! Configuration options for stream writers.
//!
//! - [`WriterOptions`]: flags word, version word and array layout
//! - [`Layout`]: how the value tokens sit relative to the trailer
//!
//! ## Examples
//!
//! ```rust
//! use serde_rpcjson::{Layout, WriterOptions, FLAG_ELIDE_TYPE_NAMES};
//!
//! let options = WriterOptions::new()
//!     .with_flags(FLAG_ELIDE_TYPE_NAMES)
//!     .with_layout(Layout::Flat);
//! assert_eq!(options.version, 7);
//! ```

/// Stream version written by default.
pub const SERIALIZATION_STREAM_VERSION: i32 = 7;

/// Type signatures are numeric ids instead of type names.
pub const FLAG_ELIDE_TYPE_NAMES: i32 = 0x1;

/// The stream starts with an anti-forgery token.
pub const FLAG_RPC_TOKEN_INCLUDED: i32 = 0x2;

/// Arrangement of the finished text.
///
/// - **Nested**: `[tokens],[strings],flags,version]`
/// - **Flat**: `[tokens,[strings],flags,version]`, one array that readers
///   index from the end
///
/// # Examples
///
/// ```rust
/// use serde_rpcjson::Layout;
///
/// assert_eq!(Layout::default(), Layout::Nested);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Nested,
    Flat,
}

/// Configuration for a [`StreamWriter`](crate::StreamWriter).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriterOptions {
    pub flags: i32,
    pub version: i32,
    pub layout: Layout,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            flags: 0,
            version: SERIALIZATION_STREAM_VERSION,
            layout: Layout::default(),
        }
    }
}

impl WriterOptions {
    /// Creates default options (no flags, version 7, nested layout).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_rpcjson::WriterOptions;
    ///
    /// let options = WriterOptions::new();
    /// assert_eq!(options.flags, 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flags word.
    #[must_use]
    pub fn with_flags(mut self, flags: i32) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the version word.
    #[must_use]
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Sets the layout of the finished text.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}
