//! Deep-link layer of the docklink bridge: allow-listed parameter
//! validation, deterministic long-link construction, and the trait seam to
//! the native shortening service.

pub mod builder;
pub mod params;
pub mod service;

pub use builder::build_long_link;
pub use params::{
    AndroidParams, IosParams, LinkParams, LinkParamsError, SocialParams, Suffix,
};
pub use service::{
    create_dynamic_link, create_short_dynamic_link, LinkError, LinkServiceError, ShortLinkService,
};
