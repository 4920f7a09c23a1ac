use docklink_links::{
    create_dynamic_link, create_short_dynamic_link, LinkError, LinkParamsError, LinkServiceError,
    ShortLinkService, Suffix,
};
use serde_json::json;

struct EchoService;

impl ShortLinkService for EchoService {
    fn shorten(&self, long_link: &str, suffix: Option<Suffix>) -> Result<String, LinkServiceError> {
        let tag = match suffix {
            Some(Suffix::Short) => "s",
            Some(Suffix::Unguessable) => "u",
            None => "d",
        };
        Ok(format!("https://short.test/{tag}?src={long_link}"))
    }
}

#[test]
fn fully_populated_parameters_build_a_complete_long_link() {
    let input = json!({
        "dynamicLinkInfo": {
            "link": "https://example.com/campaign?c=7",
            "dynamicLinkDomain": "example.page.link",
            "androidInfo": {
                "androidPackageName": "com.example.app",
                "androidFallbackLink": "https://example.com/android",
                "androidMinPackageVersionCode": "42",
            },
            "iosInfo": {
                "iosBundleId": "com.example.app.ios",
                "iosAppStoreId": "987654321",
                "iosCustomScheme": "exampleapp",
                "iosFallbackLink": "https://example.com/ios",
                "iosIpadBundleId": "com.example.app.ipad",
                "iosIpadFallbackLink": "https://example.com/ipad",
                "iosMinPackageVersionCode": "3.0.1",
            },
            "socialMetaTagInfo": {
                "socialTitle": "Campaign seven",
                "socialDescription": "The seventh campaign",
                "socialImageLink": "https://example.com/banner.png",
            },
        },
    });

    let long = create_dynamic_link(&input).expect("valid params");
    assert!(long.starts_with("https://example.page.link/?link=https%3A%2F%2Fexample.com"));
    for key in [
        "apn=", "afl=", "amv=", "ibi=", "isi=", "ius=", "ifl=", "ipbi=", "ipfl=", "imv=", "st=",
        "sd=", "si=",
    ] {
        assert!(long.contains(key), "missing {key} in {long}");
    }
}

#[test]
fn suffix_option_reaches_the_shortening_service() {
    let input = json!({
        "dynamicLinkInfo": {
            "link": "https://example.com/a",
            "dynamicLinkDomain": "example.page.link",
        },
        "suffix": {"option": "UNGUESSABLE"},
    });

    let short = create_short_dynamic_link(&input, &EchoService).expect("valid params");
    assert!(short.starts_with("https://short.test/u?"));
}

#[test]
fn unknown_suffix_key_rejects_the_call() {
    let input = json!({
        "dynamicLinkInfo": {
            "link": "https://example.com/a",
            "dynamicLinkDomain": "example.page.link",
        },
        "suffix": {"option": "SHORT", "length": 4},
    });

    let err = create_short_dynamic_link(&input, &EchoService).expect_err("unknown suffix key");
    match err {
        LinkError::MalformedParameters(LinkParamsError::UnknownKeys { section, keys }) => {
            assert_eq!(section, "suffix");
            assert_eq!(keys, vec!["length".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
