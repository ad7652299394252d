use crate::error::GatewayError;
use serde::Deserialize;

// POST /vote body
#[derive(Deserialize, Debug, Default)]
pub struct VoteRequest {
    #[serde(default)]
    pub id: Option<String>,
}

// GET /vote?id=...
#[derive(Deserialize, Debug, Default)]
pub struct VoteQuery {
    #[serde(default)]
    pub id: Option<String>,
}

/// Parse a raw vote identifier; upstream ids are unsigned decimal numbers.
pub fn parse_vote_id(raw: Option<&str>) -> Result<u64, GatewayError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(GatewayError::BadInput("missing vote id".to_string()));
    }
    raw.parse()
        .map_err(|_| GatewayError::BadInput(format!("invalid vote id {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_ids() {
        assert_eq!(parse_vote_id(Some("48180")).unwrap(), 48180);
        assert_eq!(parse_vote_id(Some("  42 ")).unwrap(), 42);
    }

    #[test]
    fn rejects_missing_and_malformed_ids() {
        for raw in [None, Some(""), Some("   "), Some("abc"), Some("-1"), Some("1&sid=x")] {
            assert!(
                matches!(parse_vote_id(raw), Err(GatewayError::BadInput(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn body_id_is_optional() {
        let req: VoteRequest = serde_json::from_str("{}").unwrap();
        assert!(req.id.is_none());
        let req: VoteRequest = serde_json::from_str(r#"{"id": "48180"}"#).unwrap();
        assert_eq!(req.id.as_deref(), Some("48180"));
    }
}
