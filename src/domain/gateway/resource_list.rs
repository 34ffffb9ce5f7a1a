//! Normalised list envelope.
//!
//! The provider has answered list requests with a bare array, a paged
//! `{data, total_count}` object, and resource-named wrappers. The gateway
//! decodes all of them once, here, and always hands callers `{data, total_count?}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A list of upstream resources, items passed through verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceList {
    pub data: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

/// Shapes the provider uses for list bodies.
#[derive(Deserialize)]
#[serde(untagged)]
enum UpstreamListing {
    Bare(Vec<Value>),
    Paged {
        data: Vec<Value>,
        #[serde(default)]
        total_count: Option<u64>,
    },
    Conversations {
        conversations: Vec<Value>,
    },
    Videos {
        videos: Vec<Value>,
    },
}

impl ResourceList {
    /// Decodes any known upstream list shape.
    pub fn from_upstream(body: Value) -> Result<Self, serde_json::Error> {
        let listing = match serde_json::from_value(body)? {
            UpstreamListing::Bare(data) => Self {
                data,
                total_count: None,
            },
            UpstreamListing::Paged { data, total_count } => Self { data, total_count },
            UpstreamListing::Conversations { conversations } => Self {
                data: conversations,
                total_count: None,
            },
            UpstreamListing::Videos { videos } => Self {
                data: videos,
                total_count: None,
            },
        };
        Ok(listing)
    }

    /// Like [`ResourceList::from_upstream`], but an unknown shape becomes an
    /// empty list and is logged at warn.
    pub fn from_upstream_or_empty(body: Value) -> Self {
        Self::from_upstream(body).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Upstream list body has an unknown shape, returning an empty list");
            Self::default()
        })
    }

    /// Decodes items into typed records, skipping any that do not fit.
    pub fn decode_items<T: DeserializeOwned>(&self) -> Vec<T> {
        self.data
            .iter()
            .filter_map(|item| match serde_json::from_value(item.clone()) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping list item that failed to decode");
                    None
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
