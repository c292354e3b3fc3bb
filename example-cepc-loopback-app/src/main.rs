use cepc::{CallOptions, CepcChannel, CepcError, ProcedureFailure};
use cepc_tokio_channel::ChannelTransport;
use example_cepc_service_definition::{Add, Fail, FailRequest, Ping};
use serde_json::json;
use std::time::Duration;
use tokio::join;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,cepc=debug")),
        )
        .init();

    let host = CepcChannel::new();
    let guest = CepcChannel::new();

    // Register guest procedures
    // Note: Registering a name twice is rejected, so results are checked once here.
    let registrations = [
        guest.register_typed::<Ping, _, _>(|ping: String| async move {
            Ok(if ping == "ping" { "pong".to_string() } else { ping })
        }),
        guest.register_typed::<Add, _, _>(|numbers: Vec<f64>| async move {
            Ok(numbers.iter().sum::<f64>())
        }),
        guest.register_typed::<Fail, _, _>(|request: FailRequest| async move {
            Err::<(), _>(ProcedureFailure::from(CepcError::new(
                request.code,
                request.message,
            )))
        }),
        guest.register_procedure("sleep", |millis| async move {
            let millis = millis.as_u64().unwrap_or_default();
            tokio::time::sleep(Duration::from_millis(millis)).await;
            Ok(json!(millis))
        }),
    ];
    for registration in registrations {
        if let Err(err) = registration {
            tracing::error!("failed to register a procedure: {err}");
            return;
        }
    }

    let (host_end, _guest_end) = ChannelTransport::pair(host, guest);

    // `join!` will await all responses before proceeding
    let (res1, res2, res3) = join!(
        host_end.call_typed::<Ping>("ping".to_string(), CallOptions::default()),
        host_end.call_typed::<Add>(vec![1.0, 2.0, 3.0], CallOptions::default()),
        host_end.call_typed::<Add>(vec![8.0, 3.0, 7.0], CallOptions::default()),
    );

    println!("Result from ping(): {:?}", res1);
    println!("Result from first add(): {:?}", res2);
    println!("Result from second add(): {:?}", res3);

    let visible = host_end
        .call_typed::<Fail>(
            FailRequest {
                code: "E_DEMO".to_string(),
                message: "shown to the caller".to_string(),
            },
            CallOptions::default(),
        )
        .await;
    println!("Result from fail() with a code: {:?}", visible);

    let hidden = host_end
        .call_typed::<Fail>(
            FailRequest {
                code: String::new(),
                message: "only in the guest's log".to_string(),
            },
            CallOptions::default(),
        )
        .await;
    println!("Result from fail() without a code: {:?}", hidden);

    let timed_out = host_end
        .call("sleep", json!(500), CallOptions::from_millis(100))
        .await;
    println!("Result from sleep() with a 100ms timeout: {:?}", timed_out);

    let unknown = host_end
        .call("missing", json!(null), CallOptions::default())
        .await;
    println!("Result from missing(): {:?}", unknown);
}
