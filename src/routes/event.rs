use crate::{app::AppState, domain::events::AppEvent};
use async_stream::try_stream;
use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive},
        Sse,
    },
};
use futures::Stream;
use std::{convert::Infallible, sync::Arc};
use tokio::sync::broadcast::{self, error::RecvError};

/// Notification feed consumed by the bot transport: new referrals and
/// claimed rewards show up here as they happen.
pub async fn stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!("new connection to notification stream >>>");

    let rx = state.get_sender().subscribe();

    Sse::new(event_stream(rx)).keep_alive(KeepAlive::default())
}

fn event_stream(
    mut rx: broadcast::Receiver<AppEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    try_stream! {
        loop {
            match rx.recv().await {
                Ok(app_event) => {
                    if let Ok(data) = serde_json::to_string(&app_event) {
                        yield Event::default().data(data);
                    }
                }

                // all senders gone, nothing more will arrive
                Err(RecvError::Closed) => break,

                Err(e @ RecvError::Lagged(_)) => {
                    tracing::error!(error = ?e, "notification stream lagged");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{events::NewReferralEvent, fields::UserId};
    use futures::StreamExt;

    #[tokio::test]
    async fn stream_yields_events_then_ends_when_sender_drops() {
        let (tx, rx) = broadcast::channel(16);
        let stream = event_stream(rx);
        futures::pin_mut!(stream);

        tx.send(AppEvent::NewReferral(NewReferralEvent {
            referrer: UserId::from("100"),
            referred_user: UserId::from("200"),
        }))
        .unwrap();
        drop(tx);

        assert!(stream.next().await.is_some());
        assert!(stream.next().await.is_none());
    }
}
