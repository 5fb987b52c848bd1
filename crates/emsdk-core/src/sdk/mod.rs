//! Knowledge about the external SDK checkout: file layout and version tags.

pub mod layout;
mod version;

pub use version::{
    DEFAULT_VERSION, ReleaseTags, SdkVersionTag, Variant, VersionLookupError, installed_hash,
    is_installed, resolve_hash,
};
