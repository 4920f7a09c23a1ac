//! Typed extraction of the host's dynamic-link parameter object.
//!
//! Each section is checked against an allow-list before extraction; keys
//! outside the list reject the whole call. The input is never mutated —
//! the unknown-key set is computed as the complement of the allow-list.

use serde_json::{Map, Value};
use thiserror::Error;

const TOP_KEYS: &[&str] = &["dynamicLinkInfo", "suffix"];
const INFO_KEYS: &[&str] = &[
    "link",
    "dynamicLinkDomain",
    "androidInfo",
    "iosInfo",
    "socialMetaTagInfo",
];
const ANDROID_KEYS: &[&str] = &[
    "androidPackageName",
    "androidFallbackLink",
    "androidMinPackageVersionCode",
];
const IOS_KEYS: &[&str] = &[
    "iosBundleId",
    "iosAppStoreId",
    "iosCustomScheme",
    "iosFallbackLink",
    "iosIpadBundleId",
    "iosIpadFallbackLink",
    "iosMinPackageVersionCode",
];
const SOCIAL_KEYS: &[&str] = &["socialTitle", "socialDescription", "socialImageLink"];
const SUFFIX_KEYS: &[&str] = &["option"];

/// Malformed-parameter taxonomy. Any of these rejects the host call before
/// anything else runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkParamsError {
    #[error("{0} must be an object")]
    NotAnObject(&'static str),
    #[error("missing required section: {0}")]
    MissingSection(&'static str),
    #[error("{section} is missing required key {key}")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },
    #[error("{section} contains unrecognized keys: {keys:?}")]
    UnknownKeys {
        section: &'static str,
        keys: Vec<String>,
    },
    #[error("{section}.{key} must be a {expected}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        expected: &'static str,
    },
    #[error("unknown suffix option: {0}")]
    InvalidSuffixOption(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidParams {
    pub package_name: String,
    pub fallback_link: Option<String>,
    pub min_package_version_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IosParams {
    pub bundle_id: String,
    pub app_store_id: Option<String>,
    pub custom_scheme: Option<String>,
    pub fallback_link: Option<String>,
    pub ipad_bundle_id: Option<String>,
    pub ipad_fallback_link: Option<String>,
    pub min_package_version_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_link: Option<String>,
}

/// Requested short-link suffix strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    Short,
    Unguessable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParams {
    pub link: String,
    pub domain: String,
    pub android: Option<AndroidParams>,
    pub ios: Option<IosParams>,
    pub social: Option<SocialParams>,
    pub suffix: Option<Suffix>,
}

impl LinkParams {
    pub fn from_json(params: &Value) -> Result<LinkParams, LinkParamsError> {
        let top = Section::root("parameters", params)?;
        top.check_allowed(TOP_KEYS)?;

        let info = top
            .child("dynamicLinkInfo")?
            .ok_or(LinkParamsError::MissingSection("dynamicLinkInfo"))?;
        info.check_allowed(INFO_KEYS)?;
        let link = info.required_str("link")?;
        let domain = info.required_str("dynamicLinkDomain")?;

        let android = match info.child("androidInfo")? {
            Some(section) => {
                section.check_allowed(ANDROID_KEYS)?;
                Some(AndroidParams {
                    package_name: section.required_str("androidPackageName")?,
                    fallback_link: section.optional_str("androidFallbackLink")?,
                    min_package_version_code: section
                        .optional_str("androidMinPackageVersionCode")?,
                })
            }
            None => None,
        };

        let ios = match info.child("iosInfo")? {
            Some(section) => {
                section.check_allowed(IOS_KEYS)?;
                Some(IosParams {
                    bundle_id: section.required_str("iosBundleId")?,
                    app_store_id: section.optional_str("iosAppStoreId")?,
                    custom_scheme: section.optional_str("iosCustomScheme")?,
                    fallback_link: section.optional_str("iosFallbackLink")?,
                    ipad_bundle_id: section.optional_str("iosIpadBundleId")?,
                    ipad_fallback_link: section.optional_str("iosIpadFallbackLink")?,
                    min_package_version_code: section.optional_str("iosMinPackageVersionCode")?,
                })
            }
            None => None,
        };

        let social = match info.child("socialMetaTagInfo")? {
            Some(section) => {
                section.check_allowed(SOCIAL_KEYS)?;
                Some(SocialParams {
                    title: section.optional_str("socialTitle")?,
                    description: section.optional_str("socialDescription")?,
                    image_link: section.optional_str("socialImageLink")?,
                })
            }
            None => None,
        };

        let suffix = match top.child("suffix")? {
            Some(section) => {
                section.check_allowed(SUFFIX_KEYS)?;
                let option = section.required_str("option")?;
                Some(match option.as_str() {
                    "SHORT" => Suffix::Short,
                    "UNGUESSABLE" => Suffix::Unguessable,
                    other => return Err(LinkParamsError::InvalidSuffixOption(other.to_string())),
                })
            }
            None => None,
        };

        Ok(LinkParams {
            link,
            domain,
            android,
            ios,
            social,
            suffix,
        })
    }
}

/// One named object section of the parameter tree.
struct Section<'a> {
    name: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Section<'a> {
    fn root(name: &'static str, value: &'a Value) -> Result<Section<'a>, LinkParamsError> {
        value
            .as_object()
            .map(|map| Section { name, map })
            .ok_or(LinkParamsError::NotAnObject(name))
    }

    fn child(&self, key: &'static str) -> Result<Option<Section<'a>>, LinkParamsError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_object()
                .map(|map| Some(Section { name: key, map }))
                .ok_or(LinkParamsError::NotAnObject(key)),
        }
    }

    fn check_allowed(&self, allowed: &[&str]) -> Result<(), LinkParamsError> {
        let mut unknown: Vec<String> = self
            .map
            .keys()
            .filter(|k| !allowed.contains(&k.as_str()))
            .cloned()
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort();
        Err(LinkParamsError::UnknownKeys {
            section: self.name,
            keys: unknown,
        })
    }

    fn required_str(&self, key: &'static str) -> Result<String, LinkParamsError> {
        match self.map.get(key) {
            None => Err(LinkParamsError::MissingKey {
                section: self.name,
                key,
            }),
            Some(value) => value.as_str().map(str::to_string).ok_or(
                LinkParamsError::InvalidValue {
                    section: self.name,
                    key,
                    expected: "string",
                },
            ),
        }
    }

    fn optional_str(&self, key: &'static str) -> Result<Option<String>, LinkParamsError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => value.as_str().map(|s| Some(s.to_string())).ok_or(
                LinkParamsError::InvalidValue {
                    section: self.name,
                    key,
                    expected: "string",
                },
            ),
        }
    }
}
