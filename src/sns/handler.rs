use tracing::debug;

use super::event::SnsEvent;
use crate::Error;

/// Consumer of SNS events.
///
/// Returning `Ok(())` acknowledges the whole batch; an error fails it.
/// Implemented for any `FnMut(SnsEvent) -> Result<(), E>` closure.
pub trait SnsHandler {
    type Error: std::error::Error + Send + Sync + 'static;

    fn handle(&mut self, event: SnsEvent) -> Result<(), Self::Error>;
}

impl<F, E> SnsHandler for F
where
    F: FnMut(SnsEvent) -> Result<(), E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn handle(&mut self, event: SnsEvent) -> Result<(), E> {
        self(event)
    }
}

/// Decodes a JSON payload and passes the event to `handler`.
pub fn dispatch<H: SnsHandler + ?Sized>(handler: &mut H, payload: &str) -> Result<(), Error> {
    let event = SnsEvent::from_json(payload)?;
    debug!(records = event.records.len(), "dispatching sns event");
    handler
        .handle(event)
        .map_err(|e| Error::Handler(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sns::event::SAMPLE_EVENT;
    use std::io;

    struct Collector {
        messages: Vec<String>,
    }

    impl SnsHandler for Collector {
        type Error = io::Error;

        fn handle(&mut self, event: SnsEvent) -> Result<(), io::Error> {
            self.messages
                .extend(event.records.into_iter().map(|r| r.sns.message));
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_to_handler() {
        let mut collector = Collector { messages: vec![] };
        dispatch(&mut collector, SAMPLE_EVENT).unwrap();
        assert_eq!(collector.messages, ["Hello from SNS!"]);
    }

    #[test]
    fn test_closure_handler_error() {
        let mut failing = |_event: SnsEvent| -> Result<(), io::Error> {
            Err(io::Error::new(io::ErrorKind::Other, "rejected"))
        };

        let err = dispatch(&mut failing, SAMPLE_EVENT).unwrap_err();
        assert!(matches!(err, Error::Handler(_)));
        assert!(err.to_string().contains("rejected"));
    }

    #[test]
    fn test_invalid_payload() {
        let mut calls = 0;
        let mut counting = |_event: SnsEvent| -> Result<(), io::Error> {
            calls += 1;
            Ok(())
        };

        let err = dispatch(&mut counting, "{\"Records\": 3}").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(calls, 0);
    }
}
