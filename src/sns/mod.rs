//! Typed SNS notification events and the handler contract for consuming them.

mod event;
mod handler;

pub use event::{SnsAttributeValue, SnsEvent, SnsEventRecord, SnsMessage, SnsMessageAttribute};
pub use handler::{dispatch, SnsHandler};
