use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer: the API sends `null` for text it has no value for
fn deserialize_nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One artwork entry. Identity is `id`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Artwork {
    pub id: u64,
    #[serde(deserialize_with = "deserialize_nullable_text", default)]
    pub title: String,
    #[serde(deserialize_with = "deserialize_nullable_text", default)]
    pub place_of_origin: String,
    #[serde(deserialize_with = "deserialize_nullable_text", default)]
    pub artist_display: String,
    #[serde(deserialize_with = "deserialize_nullable_text", default)]
    pub inscriptions: String,
    #[serde(default)]
    pub date_start: Option<i64>,
    #[serde(default)]
    pub date_end: Option<i64>,
}

// Response envelope of GET /artworks
#[derive(Debug, Deserialize, Clone)]
pub struct ArtworksResponse {
    pub data: Vec<Artwork>,
    pub pagination: PaginationBlock,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaginationBlock {
    pub total: u64,
}

/// One fetched batch of artworks plus the total the source reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub records: Vec<Artwork>,
    pub total_records: u64,
}

impl Page {
    pub fn new(records: Vec<Artwork>, total_records: u64) -> Self {
        Self {
            records,
            total_records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl From<ArtworksResponse> for Page {
    fn from(response: ArtworksResponse) -> Self {
        Page {
            records: response.data,
            total_records: response.pagination.total,
        }
    }
}
