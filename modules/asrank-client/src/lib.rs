pub mod error;
pub mod types;

pub use error::{AsRankError, Result};
pub use types::AsnRecord;

use std::time::Duration;

use types::{AsnData, GraphqlRequest, GraphqlResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.asrank.caida.org/v2/graphql";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct AsRankClient {
    client: reqwest::Client,
    base_url: String,
}

impl AsRankClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up the rank and organisation name of a single ASN.
    pub async fn asn(&self, asn: &str) -> Result<AsnRecord> {
        let asn = asn.trim();
        if asn.is_empty() || !asn.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AsRankError::InvalidAsn(asn.to_string()));
        }

        let request = GraphqlRequest {
            query: asn_query(asn),
        };

        tracing::debug!(asn, "Querying ASRank");

        let resp = self
            .client
            .post(&self.base_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AsRankError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let parsed: GraphqlResponse<AsnData> = serde_json::from_str(&body)?;
        decode_asn(asn, parsed)
    }
}

fn asn_query(asn: &str) -> String {
    format!(r#"{{ asn(asn:"{asn}") {{ asn asnName rank }} }}"#)
}

/// Turn a GraphQL envelope into a record, mapping every "no usable data" shape to an error.
pub fn decode_asn(asn: &str, response: GraphqlResponse<AsnData>) -> Result<AsnRecord> {
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(AsRankError::Graphql(messages.join("; ")));
    }

    let node = response
        .data
        .and_then(|d| d.asn)
        .ok_or_else(|| AsRankError::NotFound(asn.to_string()))?;

    let rank = node
        .rank
        .ok_or_else(|| AsRankError::NotFound(asn.to_string()))?;
    let rank = u32::try_from(rank)
        .map_err(|_| AsRankError::Parse(format!("rank {rank} out of range for AS{asn}")))?;

    Ok(AsnRecord {
        asn: node.asn,
        name: node.asn_name.filter(|n| !n.trim().is_empty()),
        rank,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GraphqlResponse<AsnData> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn decodes_ranked_asn() {
        let resp = parse(r#"{"data":{"asn":{"asn":"13335","asnName":"CLOUDFLARENET","rank":30}}}"#);

        let record = decode_asn("13335", resp).unwrap();

        assert_eq!(
            record,
            AsnRecord {
                asn: "13335".into(),
                name: Some("CLOUDFLARENET".into()),
                rank: 30,
            }
        );
    }

    #[test]
    fn null_asn_is_not_found() {
        let resp = parse(r#"{"data":{"asn":null}}"#);

        let err = decode_asn("4294967295", resp).unwrap_err();

        assert!(matches!(err, AsRankError::NotFound(ref a) if a == "4294967295"));
    }

    #[test]
    fn missing_rank_is_not_found() {
        let resp = parse(r#"{"data":{"asn":{"asn":"64512","asnName":null,"rank":null}}}"#);

        assert!(matches!(
            decode_asn("64512", resp),
            Err(AsRankError::NotFound(_))
        ));
    }

    #[test]
    fn graphql_errors_take_precedence() {
        let resp = parse(
            r#"{"data":null,"errors":[{"message":"rate limited"},{"message":"try later"}]}"#,
        );

        let err = decode_asn("1", resp).unwrap_err();

        assert!(matches!(err, AsRankError::Graphql(ref m) if m == "rate limited; try later"));
    }

    #[test]
    fn blank_name_becomes_none() {
        let resp = parse(r#"{"data":{"asn":{"asn":"7","asnName":"  ","rank":9}}}"#);

        assert_eq!(decode_asn("7", resp).unwrap().name, None);
    }

    #[test]
    fn query_embeds_asn() {
        assert_eq!(asn_query("15169"), r#"{ asn(asn:"15169") { asn asnName rank } }"#);
    }

    #[tokio::test]
    async fn rejects_non_numeric_asn_without_request() {
        // Unroutable base URL: any request attempt would surface as Network, not InvalidAsn.
        let client = AsRankClient::new("http://127.0.0.1:9/graphql/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9/graphql");

        let err = client.asn("AS13335").await.unwrap_err();

        assert!(matches!(err, AsRankError::InvalidAsn(ref a) if a == "AS13335"));
    }
}
