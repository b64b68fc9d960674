//! Token metadata composition.
//!
//! Builds the off-chain metadata document that gets pinned to IPFS and
//! referenced by the on-chain metadata account. Composition is a pure
//! function of the request and the image's content address: same inputs,
//! same document.
//!
//! Social links live under `extensions`. Empty links are omitted
//! field-by-field, and the whole `extensions` object is omitted when every
//! link is empty - no empty-string placeholders are ever persisted.

use serde::{Deserialize, Serialize};

use crate::types::TokenRequest;

/// The pinned metadata document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    /// Gateway URL of the uploaded logo, or empty when none was provided.
    pub image: String,
    pub seller_fee_basis_points: u16,
    pub external_url: String,
    pub attributes: Vec<Attribute>,
    pub properties: Properties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
}

/// Trait-style attribute. Unused for fungible tokens but kept in the
/// document shape wallets expect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub files: Vec<FileSpec>,
    pub category: String,
    pub creators: Vec<MetadataCreator>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileSpec {
    pub uri: String,
    #[serde(rename = "type")]
    pub mime: String,
}

/// Creator entry in the document. The display-only override is written
/// unverified; wallets show it but the chain never vouches for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataCreator {
    pub address: String,
    pub verified: bool,
    pub share: u8,
}

/// Social link extensions. Fields are omitted when absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
}

/// Compose the metadata document for a request.
///
/// `image_url` is the gateway URL of the already-pinned logo, when one was
/// uploaded.
pub fn compose(request: &TokenRequest, image_url: Option<&str>) -> TokenMetadata {
    let image = image_url.unwrap_or_default().to_string();

    let description = if request.description.is_empty() {
        format!("Token {} ({})", request.name, request.symbol)
    } else {
        request.description.clone()
    };

    let files = if image.is_empty() {
        Vec::new()
    } else {
        vec![FileSpec {
            uri: image.clone(),
            mime: request
                .image
                .as_ref()
                .map(|i| i.mime.clone())
                .unwrap_or_else(|| "image/png".to_string()),
        }]
    };

    let creators = match &request.creator_override {
        Some(creator) if creator.is_complete() => vec![MetadataCreator {
            address: creator.address.clone(),
            verified: false,
            share: 100,
        }],
        _ => Vec::new(),
    };

    TokenMetadata {
        name: request.name.clone(),
        symbol: request.symbol.clone(),
        description,
        image,
        seller_fee_basis_points: 0,
        external_url: request.links.website.clone(),
        attributes: Vec::new(),
        properties: Properties {
            files,
            category: "image".to_string(),
            creators,
        },
        extensions: compose_extensions(request),
    }
}

fn compose_extensions(request: &TokenRequest) -> Option<Extensions> {
    if request.links.is_empty() {
        return None;
    }

    Some(Extensions {
        website: non_empty(&request.links.website),
        twitter: non_empty(&request.links.twitter).map(expand_twitter_handle),
        telegram: non_empty(&request.links.telegram),
        discord: non_empty(&request.links.discord),
    })
}

/// `@handle` becomes a full profile URL; anything else passes through.
fn expand_twitter_handle(value: String) -> String {
    match value.strip_prefix('@') {
        Some(handle) => format!("https://twitter.com/{}", handle),
        None => value,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CreatorOverride, SocialLinks};

    fn request() -> TokenRequest {
        TokenRequest {
            name: "Foo".into(),
            symbol: "FOO".into(),
            supply: "1000".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_links_means_no_extensions_key() {
        let doc = compose(&request(), None);
        assert!(doc.extensions.is_none());

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("extensions").is_none());
    }

    #[test]
    fn test_empty_link_fields_are_omitted() {
        let mut req = request();
        req.links = SocialLinks {
            website: "https://foo.example".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(compose(&req, None)).unwrap();
        let extensions = json.get("extensions").unwrap();
        assert_eq!(extensions["website"], "https://foo.example");
        assert!(extensions.get("twitter").is_none());
        assert!(extensions.get("telegram").is_none());
        assert!(extensions.get("discord").is_none());
    }

    #[test]
    fn test_default_description_synthesized() {
        let doc = compose(&request(), None);
        assert_eq!(doc.description, "Token Foo (FOO)");

        let mut req = request();
        req.description = "Custom".into();
        assert_eq!(compose(&req, None).description, "Custom");
    }

    #[test]
    fn test_twitter_handle_expansion() {
        let mut req = request();
        req.links.twitter = "@foo_token".into();
        let doc = compose(&req, None);
        assert_eq!(
            doc.extensions.unwrap().twitter.unwrap(),
            "https://twitter.com/foo_token"
        );

        req.links.twitter = "https://twitter.com/foo_token".into();
        let doc = compose(&req, None);
        assert_eq!(
            doc.extensions.unwrap().twitter.unwrap(),
            "https://twitter.com/foo_token"
        );
    }

    #[test]
    fn test_image_url_threaded_into_files() {
        let url = "https://gateway.pinata.cloud/ipfs/QmLogo";
        let doc = compose(&request(), Some(url));
        assert_eq!(doc.image, url);
        assert_eq!(doc.properties.files.len(), 1);
        assert_eq!(doc.properties.files[0].uri, url);

        let doc = compose(&request(), None);
        assert_eq!(doc.image, "");
        assert!(doc.properties.files.is_empty());
    }

    #[test]
    fn test_creator_override() {
        let mut req = request();
        req.creator_override = Some(CreatorOverride {
            name: "Satoshi".into(),
            address: "1BitcoinEaterAddressDontSendf59kuE".into(),
        });

        let doc = compose(&req, None);
        assert_eq!(doc.properties.creators.len(), 1);
        assert!(!doc.properties.creators[0].verified);
        assert_eq!(doc.properties.creators[0].share, 100);

        // Incomplete override is dropped, not half-written.
        req.creator_override = Some(CreatorOverride {
            name: "Satoshi".into(),
            address: String::new(),
        });
        assert!(compose(&req, None).properties.creators.is_empty());
    }

    #[test]
    fn test_compose_is_deterministic() {
        let req = request();
        assert_eq!(compose(&req, Some("u")), compose(&req, Some("u")));
    }
}
