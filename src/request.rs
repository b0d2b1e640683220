use std::collections::BTreeMap;

use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::Serialize;

use crate::error::{ClientError, ClientResult};
use crate::file::UploadFile;

/// Body of an outbound request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestType {
    /// A plain request with no body.
    Plain,

    /// A JSON request with a JSON body and the content type set to application/json.
    JSON { body: String },

    /// A multipart request with text fields and files.
    Multipart {
        bodies: BTreeMap<String, String>,
        files: BTreeMap<String, UploadFile>,
    },
}

impl RequestType {
    /// Serializes `body` into a JSON request body
    pub fn json<T: Serialize + ?Sized>(body: &T) -> ClientResult<Self> {
        let body = serde_json::to_string(body).map_err(|err| {
            ClientError::validation(format!("Request body could not be serialized: {err}"))
        })?;
        Ok(RequestType::JSON { body })
    }

    /// Returns the JSON body, if any
    pub fn json_body(&self) -> Option<&str> {
        match self {
            RequestType::JSON { body } => Some(body),
            _ => None,
        }
    }

    /// Convert the request type to a request builder.
    pub fn to_request(self, request: RequestBuilder) -> Result<RequestBuilder, reqwest::Error> {
        match self {
            RequestType::Plain => Ok(request),
            RequestType::JSON { body } => Ok(request
                .header("Content-Type", "application/json")
                .body(body)),
            RequestType::Multipart { bodies, files } => {
                Ok(request.multipart(Self::build_form(bodies, files)?))
            }
        }
    }

    fn build_form(
        bodies: BTreeMap<String, String>,
        files: BTreeMap<String, UploadFile>,
    ) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();

        for (key, value) in bodies {
            form = form.text(key, value);
        }

        for (key, file) in files {
            let part = Part::bytes(file.content)
                .file_name(file.name)
                .mime_str("application/octet-stream")?;
            form = form.part(key, part);
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Client;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_plain_request_has_no_body() {
        let request = RequestType::Plain
            .to_request(Client::new().get("http://localhost/"))
            .unwrap()
            .build()
            .unwrap();

        assert!(request.body().is_none());
    }

    #[test]
    fn test_json_request_sets_content_type() {
        let context = RequestType::json(&json!({"id": "10001"})).unwrap();
        assert_eq!(context.json_body(), Some(r#"{"id":"10001"}"#));

        let request = context
            .to_request(Client::new().post("http://localhost/"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.headers()["Content-Type"], "application/json");
        assert_eq!(
            request.body().and_then(|b| b.as_bytes()),
            Some(br#"{"id":"10001"}"#.as_slice())
        );
    }

    #[test]
    fn test_multipart_request_sets_boundary() {
        let context = RequestType::Multipart {
            bodies: BTreeMap::new(),
            files: BTreeMap::from([(
                "items".to_string(),
                UploadFile::new("items.csv", b"id,item_name\n1,drill".to_vec()),
            )]),
        };

        let request = context
            .to_request(Client::new().put("http://localhost/"))
            .unwrap()
            .build()
            .unwrap();

        let content_type = request.headers()["Content-Type"].to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
    }
}
