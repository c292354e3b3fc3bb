mod common;

use cepc::packet::PacketCodec;
use cepc::{CallOptions, CepcChannel, CepcError, CepcErrorKind, SendError};
use common::{Recorder, discard};
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;
use tracing_test::traced_test;

#[tokio::test(start_paused = true)]
#[traced_test]
async fn test_timeout_then_late_response() {
    let channel = CepcChannel::new();
    let recorder = Recorder::default();

    let started = Instant::now();
    let result = channel
        .call(
            "slow",
            json!(null),
            &recorder.send_fn(),
            CallOptions::new().with_timeout(Duration::from_millis(100)),
        )
        .await;

    assert_eq!(result, Err(CepcError::timeout()));
    assert!(started.elapsed() >= Duration::from_millis(100));
    assert!(channel.pending_calls().is_empty());

    // The response shows up after the caller gave up.
    let sent = recorder.take();
    assert_eq!(sent.len(), 1);
    let call = PacketCodec::decode(&sent[0]).unwrap();
    let late = PacketCodec::encode(&call.to_result(json!("late"))).unwrap();
    channel.handle(&late, &discard).await;

    assert!(logs_contain(&format!(
        "cannot receive the response because request `slow:{}` has no callback",
        call.key
    )));
}

#[tokio::test(start_paused = true)]
async fn test_response_before_timeout_wins() {
    let channel = CepcChannel::new();
    let recorder = Recorder::default();

    let send = recorder.send_fn();

    let call = channel.call("quick", json!(1), &send, CallOptions::from_millis(1_000));
    let respond = async {
        while recorder.len() == 0 {
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
        let request = PacketCodec::decode(&recorder.take()[0]).unwrap();
        let reply = PacketCodec::encode(&request.to_result(json!(2))).unwrap();
        channel.handle(&reply, &discard).await;
    };

    let (result, ()) = tokio::join!(call, respond);
    assert_eq!(result, Ok(json!(2)));

    // The disarmed timer must not fire later.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(channel.pending_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_reset_abandons_pending_calls() {
    let channel = CepcChannel::new();
    let recorder = Recorder::default();

    let send = recorder.send_fn();

    let call = channel.call("abandoned", json!(null), &send, CallOptions::from_millis(100));
    let reset = async {
        while recorder.len() == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(channel.pending_calls().len(), 1);
        channel.reset();
        assert!(channel.pending_calls().is_empty());
    };

    // Neither a result nor the timeout ever arrives.
    let outcome = tokio::time::timeout(Duration::from_secs(5), async {
        tokio::join!(call, reset)
    })
    .await;
    assert!(outcome.is_err());
}

#[tokio::test]
#[traced_test]
async fn test_send_failure_settles_immediately() {
    let channel = CepcChannel::new();
    let failing = |_text: String| async { Err::<(), SendError>("peer closed".into()) };

    for options in [CallOptions::new(), CallOptions::from_millis(60_000)] {
        let err = channel
            .call("ping", json!("ping"), &failing, options)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), CepcErrorKind::SendFailure);
        assert_eq!(err.message, "peer closed");
        assert!(channel.pending_calls().is_empty());
    }

    assert!(logs_contain("failed to send the request of `ping`: peer closed"));
}

#[tokio::test]
#[traced_test]
async fn test_response_delivered_before_send_error_wins() {
    let channel = CepcChannel::new();
    channel
        .register_procedure("ping", |_| async { Ok(json!("pong")) })
        .unwrap();

    // Delivers the packet, then reports a failure anyway.
    let flaky = {
        let channel = channel.clone();
        move |text: String| {
            let channel = channel.clone();
            async move {
                let reply = {
                    let channel = channel.clone();
                    move |reply_text: String| {
                        let channel = channel.clone();
                        async move {
                            channel.handle(&reply_text, &discard).await;
                            Ok::<(), SendError>(())
                        }
                    }
                };
                channel.handle(&text, &reply).await;
                Err::<(), SendError>("late ack failure".into())
            }
        }
    };

    let pong = channel
        .call("ping", json!("ping"), &flaky, CallOptions::from_millis(60_000))
        .await;

    assert_eq!(pong, Ok(json!("pong")));
    assert!(channel.pending_calls().is_empty());
    assert!(!logs_contain("late ack failure"));
}

#[tokio::test]
async fn test_dropped_call_removes_pending_entry() {
    let channel = CepcChannel::new();
    let recorder = Recorder::default();

    let outcome = tokio::time::timeout(
        Duration::from_millis(10),
        channel.call("never", json!(null), &recorder.send_fn(), CallOptions::new()),
    )
    .await;

    assert!(outcome.is_err());
    assert_eq!(recorder.len(), 1);
    assert!(channel.pending_calls().is_empty());
}

#[tokio::test]
async fn test_out_of_order_responses_reach_their_callers() {
    let channel = CepcChannel::new();
    let recorder = Recorder::default();
    let send = recorder.send_fn();

    let respond = async {
        while recorder.len() < 3 {
            tokio::task::yield_now().await;
        }
        let mut requests = recorder.take();
        requests.reverse();
        for text in requests {
            let request = PacketCodec::decode(&text).unwrap();
            let reply = match request.name.as_str() {
                "fail" => request.to_error("E_FAIL".to_string(), Some("failed".to_string())),
                name => request.to_result(json!(format!("{name} done"))),
            };
            channel
                .handle(&PacketCodec::encode(&reply).unwrap(), &discard)
                .await;
        }
    };

    let (first, second, third, ()) = tokio::join!(
        channel.call("first", json!(1), &send, CallOptions::new()),
        channel.call("second", json!(2), &send, CallOptions::new()),
        channel.call("fail", json!(3), &send, CallOptions::new()),
        respond,
    );

    assert_eq!(first, Ok(json!("first done")));
    assert_eq!(second, Ok(json!("second done")));
    assert_eq!(third, Err(CepcError::new("E_FAIL", "failed")));
    assert!(channel.pending_calls().is_empty());
}

#[tokio::test]
async fn test_calls_with_same_name_get_distinct_keys() {
    let channel = CepcChannel::new();
    let recorder = Recorder::default();
    let send = recorder.send_fn();

    let respond = async {
        while recorder.len() < 2 {
            tokio::task::yield_now().await;
        }
        let requests: Vec<_> = recorder
            .take()
            .iter()
            .map(|text| PacketCodec::decode(text).unwrap())
            .collect();
        assert_ne!(requests[0].key, requests[1].key);
        assert!(requests[0].index < requests[1].index);

        for request in requests.iter().rev() {
            let reply = request.to_result(request_data_of(request));
            channel
                .handle(&PacketCodec::encode(&reply).unwrap(), &discard)
                .await;
        }
    };

    let (a, b, ()) = tokio::join!(
        channel.call("echo", json!("a"), &send, CallOptions::new()),
        channel.call("echo", json!("b"), &send, CallOptions::new()),
        respond,
    );

    assert_eq!(a, Ok(json!("a")));
    assert_eq!(b, Ok(json!("b")));
}

fn request_data_of(packet: &cepc::packet::Packet) -> serde_json::Value {
    match &packet.body {
        cepc::packet::PacketBody::Call { request_data } => request_data.clone(),
        other => panic!("expected a call, got {other:?}"),
    }
}
