// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

/// Nested metadata object carried by every log record.
///
/// Field casing is part of the intake contract: `requestId` is camelCase
/// while `latency_ms` is snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordMetadata {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub region: String,
    pub latency_ms: u64,
    pub version: String,
}

/// One synthetic log record, shaped exactly as the batch intake expects it.
///
/// The timestamp is formatted at construction time and the record is never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub timestamp: String,
    #[serde(rename = "serviceId")]
    pub service_id: String,
    pub level: String,
    pub message: String,
    #[serde(rename = "traceId")]
    pub trace_id: String,
    pub metadata: RecordMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> LogRecord {
        LogRecord {
            timestamp: "2025-12-23T10:30:45.123Z".to_string(),
            service_id: "auth-service".to_string(),
            level: "INFO".to_string(),
            message: "User logged in successfully - 3f8a1c2d".to_string(),
            trace_id: "trace-6fa459ea-ee8a-3ca4-894e-db77e160355e".to_string(),
            metadata: RecordMetadata {
                request_id: "req-4821".to_string(),
                region: "us-east-1".to_string(),
                latency_ms: 250,
                version: "v1.0.2".to_string(),
            },
        }
    }

    #[test]
    fn test_serializes_with_intake_field_names() {
        let value = serde_json::to_value(sample_record()).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["level", "message", "metadata", "serviceId", "timestamp", "traceId"]
        );

        let metadata = object["metadata"].as_object().unwrap();
        let mut metadata_keys: Vec<&str> = metadata.keys().map(String::as_str).collect();
        metadata_keys.sort_unstable();
        assert_eq!(metadata_keys, vec!["latency_ms", "region", "requestId", "version"]);
    }

    #[test]
    fn test_serializes_metadata_values() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(value["serviceId"], "auth-service");
        assert_eq!(value["traceId"], "trace-6fa459ea-ee8a-3ca4-894e-db77e160355e");
        assert_eq!(value["metadata"]["requestId"], "req-4821");
        assert_eq!(value["metadata"]["latency_ms"], 250);
    }
}
