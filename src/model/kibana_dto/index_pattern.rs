use crate::common::*;

#[doc = "One index-pattern document as scanned from the metadata index"]
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
#[getset(get = "pub")]
pub struct IndexPatternSource {
    id: String,
    time_field_name: Option<String>,
}

#[doc = "Body of the refresh POST sent to the dashboard"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshPayload {
    pub title: String,
    #[serde(rename = "notExpandable")]
    pub not_expandable: bool,
    #[serde(rename = "timeFieldName", skip_serializing_if = "Option::is_none")]
    pub time_field_name: Option<String>,
}

impl RefreshPayload {
    pub fn new(title: &str, time_field_name: Option<&str>) -> Self {
        RefreshPayload {
            title: title.to_string(),
            not_expandable: true,
            time_field_name: time_field_name.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_with_time_field() {
        let payload = RefreshPayload::new("sample", Some("@timestamp"));
        let body: Value = serde_json::to_value(&payload).expect("serialize");

        assert_eq!(body["title"], "sample");
        assert_eq!(body["notExpandable"], true);
        assert_eq!(body["timeFieldName"], "@timestamp");
    }

    #[test]
    fn test_payload_without_time_field_omits_the_key() {
        let payload = RefreshPayload::new("plain", None);
        let body: Value = serde_json::to_value(&payload).expect("serialize");

        assert_eq!(body["title"], "plain");
        assert!(body.get("timeFieldName").is_none());
    }
}
