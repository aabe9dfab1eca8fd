use layered_env::sns::{self, SnsEvent};
use layered_env::Config;

const PAYLOAD: &str = r#"{
    "Records": [{
        "EventVersion": "1.0",
        "EventSubscriptionArn": "arn:aws:sns:us-east-1:123456789012:orders:2bcfbf39",
        "EventSource": "aws:sns",
        "Sns": {
            "SignatureVersion": "1",
            "Timestamp": "2019-01-02T12:45:07.000Z",
            "Signature": "EXAMPLE",
            "SigningCertUrl": "https://sns.us-east-1.amazonaws.com/SimpleNotificationService.pem",
            "MessageId": "95df01b4-ee98-5cb9-9903-4c221d41eb5e",
            "Message": "order created",
            "MessageAttributes": {},
            "Type": "Notification",
            "UnsubscribeUrl": "https://sns.us-east-1.amazonaws.com/?Action=Unsubscribe",
            "TopicArn": "arn:aws:sns:us-east-1:123456789012:orders"
        }
    }]
}"#;

fn main() -> Result<(), layered_env::Error> {
    // Layer .env, .env.local, .env.<APP_ENV> and .env.<APP_ENV>.local
    let parsed = Config::builder()
        .with_path("demos/env")
        .with_default_environment("development")
        .load()?;

    for (key, value) in &parsed {
        println!("{key}={value}");
    }

    let mut handler = |event: SnsEvent| -> Result<(), std::io::Error> {
        for record in event.records {
            println!("{}: {}", record.sns.topic_arn, record.sns.message);
        }
        Ok(())
    };
    sns::dispatch(&mut handler, PAYLOAD)?;

    Ok(())
}
