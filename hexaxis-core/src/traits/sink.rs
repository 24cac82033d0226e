//! Outbound message sink

use hexaxis_protocol::Response;

/// Receiver for responses produced by the dispatcher
///
/// The sink decides where a response goes based on
/// [`Response::route`]. Closures taking a [`Response`] implement this
/// trait directly.
pub trait ResponseSink {
    /// Emit one response
    fn emit(&mut self, response: Response);
}

impl<F: FnMut(Response)> ResponseSink for F {
    fn emit(&mut self, response: Response) {
        self(response)
    }
}
