use crate::error::PlatformError;
use crate::platform::{ChatPlatform, IncomingMessage, VoiceChannel};
use crate::service::ReplyService;
use crate::voice;
use async_trait::async_trait;
use serenity::all::{
    ChannelId, Client, Context, EventHandler, GatewayIntents, GuildId, Message, Ready,
};
use songbird::SerenityInit;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Handler {
    service: Arc<ReplyService>,
}

impl Handler {
    pub fn new(service: Arc<ReplyService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Bot is online as {}", ready.user.tag());
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let incoming = IncomingMessage {
            author_id: msg.author.id.to_string(),
            author_name: msg.author.name.clone(),
            content: msg.content.clone(),
            author_is_bot: msg.author.bot,
        };
        let target = DiscordReplyTarget { ctx: &ctx, msg: &msg };

        let outcome = self.service.handle(&incoming, &target).await;
        debug!("Message {} from {}: {:?}", msg.id, incoming.author_name, outcome);
    }
}

/// Replies into the channel a message came from.
struct DiscordReplyTarget<'a> {
    ctx: &'a Context,
    msg: &'a Message,
}

#[async_trait]
impl ChatPlatform for DiscordReplyTarget<'_> {
    async fn reply(&self, content: &str) -> Result<(), PlatformError> {
        self.msg.reply(self.ctx, content).await?;
        Ok(())
    }

    async fn send_typing(&self) -> Result<(), PlatformError> {
        self.msg.channel_id.broadcast_typing(&self.ctx.http).await?;
        Ok(())
    }

    fn author_voice_channel(&self) -> Option<VoiceChannel> {
        let guild_id = self.msg.guild_id?;
        let guild = self.ctx.cache.guild(guild_id)?;
        let channel_id = guild.voice_states.get(&self.msg.author.id)?.channel_id?;
        let name = guild
            .channels
            .get(&channel_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| channel_id.to_string());

        Some(VoiceChannel {
            guild_id: guild_id.get(),
            channel_id: channel_id.get(),
            name,
        })
    }

    async fn join_voice(&self, channel: &VoiceChannel) -> Result<(), PlatformError> {
        let manager = songbird::get(self.ctx)
            .await
            .ok_or(PlatformError::VoiceUnavailable)?;

        let call = manager
            .join(
                GuildId::new(channel.guild_id),
                ChannelId::new(channel.channel_id),
            )
            .await?;

        let mut call = call.lock().await;
        voice::attach_listener(&mut call);
        Ok(())
    }
}

/// Connects to the gateway and blocks until the client shuts down.
pub async fn run(token: &str, service: Arc<ReplyService>) -> Result<(), serenity::Error> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_VOICE_STATES;

    let mut client = Client::builder(token, intents)
        .event_handler(Handler::new(service))
        .register_songbird_from_config(voice::songbird_config())
        .await?;

    client.start().await
}
