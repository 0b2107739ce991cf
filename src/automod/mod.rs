//! Answers auto-moderation keyword triggers.
//!
//! When an automod rule fires, the matched keyword is looked up in a
//! [MessageCatalog] and the template found there is posted in the channel
//! the message was sent in. Nothing is cached between triggers and nothing
//! here ever fails loudly: a missing catalog, an unknown keyword or a failed
//! send all end with at most a log line.

mod catalog;
mod format;

use std::path::PathBuf;

use async_trait::async_trait;
use serenity::ChannelId;
use serenity::CreateAllowedMentions;
use serenity::CreateMessage;
use serenity::UserId;
use tracing::debug;
use tracing::error;
use tracing::instrument;

use crate::serenity;
use crate::BeaconError;
pub use catalog::normalize;
pub use catalog::MessageCatalog;
pub use format::format;

/// The parts of an automod action execution this module cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationEvent {
    /// Who tripped the rule.
    pub user_id: UserId,
    /// Where the offending message was sent, if anywhere.
    pub channel_id: Option<ChannelId>,
    /// The keyword from the rule that matched.
    pub matched_keyword: Option<String>,
    /// The part of the message that matched the keyword.
    pub matched_content: Option<String>,
    /// The whole offending message.
    pub content: Option<String>,
}

impl From<&serenity::ActionExecution> for ModerationEvent {
    fn from(execution: &serenity::ActionExecution) -> Self {
        // Without the message content intent discord sends an empty string.
        let content = Some(execution.content.clone()).filter(|c| !c.is_empty());

        Self {
            user_id: execution.user_id,
            channel_id: execution.channel_id,
            matched_keyword: execution.matched_keyword.clone(),
            matched_content: execution.matched_content.clone(),
            content,
        }
    }
}

/// A message ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePayload {
    /// Message text.
    pub content: String,
    /// The only users the message is allowed to ping.
    pub allowed_users: Vec<UserId>,
}

impl ResponsePayload {
    /// A message that may only ping `user`.
    pub fn mentioning(content: String, user: UserId) -> Self {
        Self {
            content,
            allowed_users: vec![user],
        }
    }

    /// A message that pings nobody.
    pub fn silent(content: String) -> Self {
        Self {
            content,
            allowed_users: vec![],
        }
    }

    /// Convert into a discord message.
    pub fn to_message(&self) -> CreateMessage {
        let mentions = CreateAllowedMentions::new().users(self.allowed_users.iter().copied());
        CreateMessage::new()
            .content(&self.content)
            .allowed_mentions(mentions)
    }
}

/// Something that can post messages into a channel.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Post `payload` into `channel_id`.
    async fn create_message(
        &self,
        channel_id: ChannelId,
        payload: &ResponsePayload,
    ) -> Result<(), BeaconError>;
}

#[async_trait]
impl MessageTransport for serenity::Http {
    async fn create_message(
        &self,
        channel_id: ChannelId,
        payload: &ResponsePayload,
    ) -> Result<(), BeaconError> {
        channel_id.send_message(self, payload.to_message()).await?;
        Ok(())
    }
}

/// Responds to automod triggers using the catalog at a fixed path.
#[derive(Debug, Clone)]
pub struct AutomodResponder {
    /// Where the [MessageCatalog] is read from, on every trigger.
    catalog_path: PathBuf,
}

impl AutomodResponder {
    /// Constructor for [AutomodResponder]
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
        }
    }

    /// Post the templated response for `event`, if there is one.
    #[instrument(skip_all, fields(user = %event.user_id, channel = ?event.channel_id, keyword = ?event.matched_keyword))]
    pub async fn handle<T>(&self, event: &ModerationEvent, transport: &T)
    where
        T: MessageTransport + ?Sized,
    {
        let (Some(channel_id), Some(matched_keyword)) = (
            event.channel_id,
            event.matched_keyword.as_deref().filter(|k| !k.is_empty()),
        ) else {
            debug!("Automod trigger without channel or keyword, skipping.");
            return;
        };

        let catalog = MessageCatalog::load(&self.catalog_path).await;
        if catalog.is_empty() {
            debug!("No automod messages configured.");
            return;
        }
        debug!("Loaded {} automod messages.", catalog.len());

        let lookup = catalog.into_lookup();
        let template = match lookup.get(&normalize(matched_keyword)) {
            Some(template) if !template.is_empty() => template,
            _ => {
                debug!("No automod message for this keyword.");
                return;
            }
        };

        let content = format(template, event);
        let payload = ResponsePayload::mentioning(content, event.user_id);

        match transport.create_message(channel_id, &payload).await {
            Ok(()) => debug!("Sent automod response."),
            Err(e) => error!("Failed to send automod response: {e}"),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use tempfile::NamedTempFile;

    use super::*;

    /// Keeps every message instead of sending it.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingTransport {
        pub sent: Mutex<Vec<(ChannelId, ResponsePayload)>>,
        pub fail: bool,
    }

    impl RecordingTransport {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn sent(&self) -> Vec<(ChannelId, ResponsePayload)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessageTransport for RecordingTransport {
        async fn create_message(
            &self,
            channel_id: ChannelId,
            payload: &ResponsePayload,
        ) -> Result<(), BeaconError> {
            self.sent.lock().unwrap().push((channel_id, payload.clone()));
            if self.fail {
                Err(serenity::Error::Other("transport is down").into())
            } else {
                Ok(())
            }
        }
    }

    fn catalog_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn spam_catalog() -> NamedTempFile {
        catalog_file(r#"{"spam": "Hi {user}, no {keyword} here: {content}"}"#)
    }

    fn event() -> ModerationEvent {
        ModerationEvent {
            user_id: UserId::new(42),
            channel_id: Some(ChannelId::new(7)),
            matched_keyword: Some("SPAM".to_string()),
            matched_content: Some("buy now".to_string()),
            content: None,
        }
    }

    #[tokio::test]
    async fn responds_with_rendered_template() {
        let file = spam_catalog();
        let transport = RecordingTransport::default();

        AutomodResponder::new(file.path())
            .handle(&event(), &transport)
            .await;

        let expected = ResponsePayload {
            content: "Hi <@42>, no SPAM here: buy now".to_string(),
            allowed_users: vec![UserId::new(42)],
        };
        assert_eq!(transport.sent(), vec![(ChannelId::new(7), expected)]);
    }

    #[tokio::test]
    async fn catalog_keys_are_normalized_too() {
        let file = catalog_file(r#"{"  Spam ": "caught {keyword}"}"#);
        let transport = RecordingTransport::default();
        let event = ModerationEvent {
            matched_keyword: Some(" sPaM".to_string()),
            ..event()
        };

        AutomodResponder::new(file.path())
            .handle(&event, &transport)
            .await;

        assert_eq!(transport.sent()[0].1.content, "caught  sPaM");
    }

    #[tokio::test]
    async fn later_catalog_entry_wins_collision() {
        let file = catalog_file(r#"{"SPAM": "old", "spam": "new"}"#);
        let transport = RecordingTransport::default();
        let event = ModerationEvent {
            matched_keyword: Some("spam".to_string()),
            ..event()
        };

        AutomodResponder::new(file.path())
            .handle(&event, &transport)
            .await;

        assert_eq!(transport.sent()[0].1.content, "new");
    }

    #[tokio::test]
    async fn missing_channel_sends_nothing() {
        let file = spam_catalog();
        let transport = RecordingTransport::default();
        let event = ModerationEvent {
            channel_id: None,
            ..event()
        };

        AutomodResponder::new(file.path())
            .handle(&event, &transport)
            .await;

        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn missing_keyword_sends_nothing() {
        let file = spam_catalog();
        let transport = RecordingTransport::default();

        for matched_keyword in [None, Some(String::new())] {
            let event = ModerationEvent {
                matched_keyword,
                ..event()
            };
            AutomodResponder::new(file.path())
                .handle(&event, &transport)
                .await;
        }

        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn unknown_keyword_sends_nothing() {
        let file = spam_catalog();
        let transport = RecordingTransport::default();
        let event = ModerationEvent {
            matched_keyword: Some("scam".to_string()),
            ..event()
        };

        AutomodResponder::new(file.path())
            .handle(&event, &transport)
            .await;

        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn empty_template_sends_nothing() {
        let file = catalog_file(r#"{"spam": ""}"#);
        let transport = RecordingTransport::default();

        AutomodResponder::new(file.path())
            .handle(&event(), &transport)
            .await;

        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn broken_catalog_sends_nothing() {
        let malformed = catalog_file("{ not json");
        let dir = tempfile::tempdir().unwrap();
        let transport = RecordingTransport::default();

        AutomodResponder::new(malformed.path())
            .handle(&event(), &transport)
            .await;
        AutomodResponder::new(dir.path().join("missing.json"))
            .handle(&event(), &transport)
            .await;

        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn failed_send_is_swallowed() {
        let file = spam_catalog();
        let transport = RecordingTransport::failing();

        AutomodResponder::new(file.path())
            .handle(&event(), &transport)
            .await;

        // Attempted exactly once, no retries.
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let file = spam_catalog();
        let transport = RecordingTransport::default();
        let dyn_transport: &dyn MessageTransport = &transport;

        AutomodResponder::new(file.path())
            .handle(&event(), dyn_transport)
            .await;

        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn silent_payload_allows_no_mentions() {
        let payload = ResponsePayload::silent("hello".to_string());
        assert!(payload.allowed_users.is_empty());
    }
}
