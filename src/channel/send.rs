use std::future::Future;

/// Failure reported by a transport's send function.
pub type SendError = Box<dyn std::error::Error + Send + Sync>;

/// The outbound half of a transport: hands one encoded packet to the peer.
///
/// Any async closure `Fn(String) -> impl Future<Output = Result<(), SendError>>`
/// implements this trait. Wrap synchronous functions in [`SyncSend`].
#[async_trait::async_trait]
pub trait CepcSend: Send + Sync {
    async fn send(&self, text: String) -> Result<(), SendError>;
}

#[async_trait::async_trait]
impl<F, Fut> CepcSend for F
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SendError>> + Send + 'static,
{
    async fn send(&self, text: String) -> Result<(), SendError> {
        (self)(text).await
    }
}

/// Adapts a synchronous send function, such as a `postMessage` binding.
pub struct SyncSend<F>(pub F);

#[async_trait::async_trait]
impl<F, E> CepcSend for SyncSend<F>
where
    F: Fn(String) -> Result<(), E> + Send + Sync,
    E: Into<SendError> + 'static,
{
    async fn send(&self, text: String) -> Result<(), SendError> {
        (self.0)(text).map_err(Into::into)
    }
}
