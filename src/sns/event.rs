use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A batch of SNS notifications delivered to a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records")]
    pub records: Vec<SnsEventRecord>,
}

impl SnsEvent {
    /// Decodes an event from its JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsEventRecord {
    pub event_version: String,
    pub event_subscription_arn: String,
    pub event_source: String,
    pub sns: SnsMessage,
}

/// The notification itself, with its signature metadata.
///
/// Lambda delivers the certificate and unsubscribe links as `SigningCertUrl`
/// and `UnsubscribeUrl`, which is what serialization writes. The
/// `SigningCertURL` and `UnsubscribeURL` spellings of the typed bindings are
/// accepted when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsMessage {
    pub signature_version: String,
    pub timestamp: String,
    pub signature: String,
    #[serde(alias = "SigningCertURL")]
    pub signing_cert_url: String,
    pub message_id: String,
    pub message: String,
    #[serde(default)]
    pub message_attributes: HashMap<String, SnsMessageAttribute>,
    #[serde(rename = "Type")]
    pub sns_type: String,
    #[serde(alias = "UnsubscribeURL")]
    pub unsubscribe_url: String,
    pub topic_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsMessageAttribute {
    #[serde(rename = "Type")]
    pub data_type: String,
    pub value: String,
}

/// Typed view of a [`SnsMessageAttribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnsAttributeValue<'a> {
    String(&'a str),
    /// Base64 encoded bytes, as delivered.
    Binary(&'a str),
    Other { data_type: &'a str, value: &'a str },
}

impl SnsMessageAttribute {
    pub fn typed(&self) -> SnsAttributeValue<'_> {
        match self.data_type.as_str() {
            "String" => SnsAttributeValue::String(&self.value),
            "Binary" => SnsAttributeValue::Binary(&self.value),
            other => SnsAttributeValue::Other {
                data_type: other,
                value: &self.value,
            },
        }
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_EVENT: &str = r#"{
    "Records": [
        {
            "EventVersion": "1.0",
            "EventSubscriptionArn": "arn:aws:sns:us-east-1:123456789012:orders:2bcfbf39",
            "EventSource": "aws:sns",
            "Sns": {
                "SignatureVersion": "1",
                "Timestamp": "2019-01-02T12:45:07.000Z",
                "Signature": "tcc6faL2yUC6dgZdmrwh1Y4cGa/ebXEkAi6RibDsvpi+tE/1+82j",
                "SigningCertUrl": "https://sns.us-east-1.amazonaws.com/SimpleNotificationService.pem",
                "MessageId": "95df01b4-ee98-5cb9-9903-4c221d41eb5e",
                "Message": "Hello from SNS!",
                "MessageAttributes": {
                    "Test": { "Type": "String", "Value": "TestString" },
                    "TestBinary": { "Type": "Binary", "Value": "VGVzdEJpbmFyeQ==" }
                },
                "Type": "Notification",
                "UnsubscribeUrl": "https://sns.us-east-1.amazonaws.com/?Action=Unsubscribe",
                "TopicArn": "arn:aws:sns:us-east-1:123456789012:orders",
                "Subject": "TestInvoke"
            }
        }
    ]
}"#;
