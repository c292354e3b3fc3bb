#![allow(dead_code)] // Each test binary uses a different subset.

use cepc::{CepcChannel, CepcSend, SendError};
use std::sync::{Arc, Mutex};

/// Send function that drops every packet.
pub async fn discard(_text: String) -> Result<(), SendError> {
    Ok(())
}

/// Send function that feeds every packet straight back into `channel`,
/// and feeds the replies back in as well.
pub fn loopback(channel: CepcChannel) -> impl CepcSend {
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
            Ok::<(), SendError>(())
        }
    }
}

/// Send function that records packets without delivering them.
#[derive(Clone, Default)]
pub struct Recorder {
    pub sent: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn send_fn(&self) -> impl CepcSend + use<> {
        let sent = self.sent.clone();
        move |text: String| {
            sent.lock().unwrap().push(text);
            async { Ok::<(), SendError>(()) }
        }
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    pub fn len(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}
