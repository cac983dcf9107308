/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Binding or accepting connections failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// A request line or header exceeded the line limit.
    #[error("request line longer than {0} bytes")]
    RequestTooLarge(usize),

    /// The peer didn't finish its request in time.
    #[error("request read timed out")]
    Timeout,
}
