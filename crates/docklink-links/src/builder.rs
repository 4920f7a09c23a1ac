//! Long dynamic-link construction.
//!
//! A long link is the link domain plus the standard abbreviated query
//! keys; no network is involved. Key order is fixed (link, android, ios,
//! social) so construction is deterministic.

use crate::params::LinkParams;

pub fn build_long_link(params: &LinkParams) -> String {
    let mut pairs: Vec<(&'static str, &str)> = vec![("link", params.link.as_str())];

    if let Some(android) = &params.android {
        pairs.push(("apn", &android.package_name));
        if let Some(v) = &android.fallback_link {
            pairs.push(("afl", v));
        }
        if let Some(v) = &android.min_package_version_code {
            pairs.push(("amv", v));
        }
    }

    if let Some(ios) = &params.ios {
        pairs.push(("ibi", &ios.bundle_id));
        if let Some(v) = &ios.app_store_id {
            pairs.push(("isi", v));
        }
        if let Some(v) = &ios.custom_scheme {
            pairs.push(("ius", v));
        }
        if let Some(v) = &ios.fallback_link {
            pairs.push(("ifl", v));
        }
        if let Some(v) = &ios.ipad_bundle_id {
            pairs.push(("ipbi", v));
        }
        if let Some(v) = &ios.ipad_fallback_link {
            pairs.push(("ipfl", v));
        }
        if let Some(v) = &ios.min_package_version_code {
            pairs.push(("imv", v));
        }
    }

    if let Some(social) = &params.social {
        if let Some(v) = &social.title {
            pairs.push(("st", v));
        }
        if let Some(v) = &social.description {
            pairs.push(("sd", v));
        }
        if let Some(v) = &social.image_link {
            pairs.push(("si", v));
        }
    }

    let query: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect();
    format!("https://{}/?{}", params.domain, query.join("&"))
}
