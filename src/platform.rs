use crate::error::PlatformError;
use async_trait::async_trait;

/// The parts of an inbound chat message the bot cares about.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub author_is_bot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceChannel {
    pub guild_id: u64,
    pub channel_id: u64,
    pub name: String,
}

/// What the dispatcher may do in response to one message.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    async fn reply(&self, content: &str) -> Result<(), PlatformError>;

    async fn send_typing(&self) -> Result<(), PlatformError>;

    /// The voice channel the author currently sits in, if any.
    fn author_voice_channel(&self) -> Option<VoiceChannel>;

    /// Joins the channel and starts listening.
    async fn join_voice(&self, channel: &VoiceChannel) -> Result<(), PlatformError>;
}
