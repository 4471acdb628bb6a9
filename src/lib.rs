//! Static asset resolution with cache-busting URLs.
//!
//! Logical references such as `"images/logo"` or `"cdn:app.js"` are resolved
//! through a [`Registry`] of scoped [`Mapper`]s into [`Asset`]s carrying a
//! public URL (`/assets/images/logo.svg?v=1700000000`). File-backed assets
//! also expose image dimensions and MP3 duration, probed lazily.
//!
//! # Modules
//!
//! - [`asset`]: asset trait, file assets, mtime versioning
//! - [`mapper`]: backend trait and the filesystem mapper
//! - [`registry`]: scope dispatch and the resolution cache
//! - [`config`]: TOML description of scopes
//! - [`utils`]: option validation, MP3 duration
//!
//! # Example
//!
//! ```ignore
//! use static_assets::{AssetOptions, FilesystemMapper, Registry};
//!
//! let mut registry = Registry::new();
//! registry.add_mapper("", FilesystemMapper::new("/assets", "www/assets", ["svg", "png"]))?;
//!
//! if let Some(logo) = registry.get_asset("images/logo", &AssetOptions::new())? {
//!     println!("<img src=\"{logo}\">");
//! }
//! ```

pub mod asset;
pub mod config;
pub mod error;
pub mod logger;
pub mod mapper;
pub mod registry;
pub mod utils;

pub use asset::{Asset, FileAsset};
pub use config::{AssetsConfig, ConfigError};
pub use error::{AssetError, Result};
pub use mapper::{FilesystemMapper, Mapper};
pub use registry::{DEFAULT_SCOPE, MAX_CACHE_SIZE, QualifiedRef, Registry};
pub use utils::options::{AssetOptions, OptionValue, check_options};
