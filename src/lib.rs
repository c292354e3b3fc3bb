//! Procedure calls between two execution contexts that can only exchange
//! text.
//!
//! A [`CepcChannel`] issues calls with [`CepcChannel::call`] and answers the
//! peer's calls from its procedure registry in [`CepcChannel::handle`].
//! The transport is supplied by the embedder: a send function (see
//! [`CepcSend`]) for the outbound half and a receive loop forwarding every
//! inbound text to `handle`.
//!
//! ```rust,no_run
//! use cepc::{CallOptions, CepcChannel, SendError};
//! use serde_json::json;
//!
//! # async fn run() {
//! let channel = CepcChannel::new();
//!
//! channel
//!     .register_procedure("ping", |_| async { Ok(json!("pong")) })
//!     .unwrap();
//!
//! // Loopback transport: every packet is handled by the same channel.
//! let loopback = {
//!     let channel = channel.clone();
//!     move |text: String| {
//!         let channel = channel.clone();
//!         async move {
//!             let reply = {
//!                 let channel = channel.clone();
//!                 move |text: String| {
//!                     let channel = channel.clone();
//!                     async move {
//!                         channel.handle(&text, &|_: String| async { Ok::<(), SendError>(()) }).await;
//!                         Ok::<(), SendError>(())
//!                     }
//!                 }
//!             };
//!             channel.handle(&text, &reply).await;
//!             Ok::<(), SendError>(())
//!         }
//!     }
//! };
//!
//! let pong = channel
//!     .call("ping", json!(null), &loopback, CallOptions::default())
//!     .await;
//! assert_eq!(pong.unwrap(), json!("pong"));
//! # }
//! ```

pub mod channel;
pub mod constants;
pub mod error;
pub mod packet;
pub mod pending;
pub mod procedure;
pub mod utils;

pub use channel::{CallOptions, CepcChannel, CepcSend, SendError, SyncSend};
pub use error::{CepcError, CepcErrorKind, ProcedureFailure};
pub use procedure::CepcProcedure;
