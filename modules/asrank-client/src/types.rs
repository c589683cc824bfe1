use serde::{Deserialize, Serialize};

/// A ranked autonomous system as reported by ASRank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsnRecord {
    pub asn: String,
    pub name: Option<String>,
    pub rank: u32,
}

// --- GraphQL wire types ---

#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlErrorMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlErrorMessage {
    pub message: String,
}

/// `data` payload of the single-ASN query. `asn` is null for unknown ASNs.
#[derive(Debug, Clone, Deserialize)]
pub struct AsnData {
    pub asn: Option<AsnNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AsnNode {
    pub asn: String,
    #[serde(rename = "asnName")]
    pub asn_name: Option<String>,
    pub rank: Option<u64>,
}
