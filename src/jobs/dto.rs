use serde::{Deserialize, Serialize};

/// Body for creating or editing a posting; every field is required.
#[derive(Debug, Deserialize)]
pub struct JobRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedJobResponse {
    pub message: String,
    #[serde(rename = "jobId")]
    pub job_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_job_response_uses_camel_case_job_id() {
        let resp = CreatedJobResponse {
            message: "Job posted successfully".into(),
            job_id: 3,
        };
        let json = serde_json::to_string(&resp).expect("serialize");
        assert!(json.contains("\"jobId\":3"));
    }

    #[test]
    fn job_request_tolerates_missing_fields() {
        let req: JobRequest = serde_json::from_str("{}").expect("parse");
        assert!(req.title.is_empty());
        assert!(req.location.is_empty());
        assert!(req.description.is_empty());
    }
}
