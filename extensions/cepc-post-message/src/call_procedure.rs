use crate::PostMessageTarget;
use cepc::constants::CEPC_LOG_NAME;
use cepc::{CallOptions, CepcChannel, CepcError, SyncSend};
use serde_json::Value;

/// Calls `name` on the peer behind `target`.
///
/// Fails with `CEPC_UNINITIALIZED` without sending anything when `target` is
/// `None`.
pub async fn call_procedure<T>(
    channel: &CepcChannel,
    target: Option<&T>,
    name: &str,
    request_data: Value,
    options: CallOptions,
) -> Result<Value, CepcError>
where
    T: PostMessageTarget + ?Sized,
{
    let Some(target) = target else {
        tracing::error!(
            procedure = name,
            "[{CEPC_LOG_NAME}] cannot send the request of procedure `{name}` because the target is not initialized"
        );
        return Err(CepcError::uninitialized());
    };

    let post = SyncSend(|message: String| target.post_message(message));
    channel.call(name, request_data, &post, options).await
}
