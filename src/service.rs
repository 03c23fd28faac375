use crate::commands::Command;
use crate::emoticons;
use crate::error::{CompletionError, PlatformError};
use crate::groq::GroqClient;
use crate::models::ChatMessage;
use crate::persona;
use crate::platform::{ChatPlatform, IncomingMessage};
use crate::relations::RelationStore;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Which branch a message went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    FromBot,
    Usage,
    RelationSet,
    RelationShown,
    RelationUpdated,
    Joined,
    NotInVoice,
    JoinFailed,
    Answered,
    DidNotGetThat,
    Trouble,
    Ignored,
}

pub struct ReplyService {
    groq: Arc<GroqClient>,
    relations: Arc<RelationStore>,
    timeout: Duration,
}

impl ReplyService {
    pub fn new(groq: Arc<GroqClient>, relations: Arc<RelationStore>, timeout: Duration) -> Self {
        Self {
            groq,
            relations,
            timeout,
        }
    }

    /// Runs one message start to finish. Anything still in flight when this
    /// returns (or is dropped) is cancelled.
    pub async fn handle(&self, msg: &IncomingMessage, platform: &dyn ChatPlatform) -> Dispatch {
        if msg.author_is_bot {
            return Dispatch::FromBot;
        }

        let cancel = CancellationToken::new();
        let _guard = cancel.clone().drop_guard();

        match Command::parse(&msg.content) {
            Command::SetRelation(None) => {
                debug!("!setrelation without argument from {}", msg.author_id);
                send(platform, persona::SETRELATION_USAGE).await;
                Dispatch::Usage
            }
            Command::SetRelation(Some(relation)) => {
                self.relations
                    .set_relation(&msg.author_id, &msg.author_name, &relation);
                info!("{} is now '{}'", msg.author_name, relation);
                send(platform, &persona::relation_set(&relation)).await;
                Dispatch::RelationSet
            }
            Command::Relation(None) => {
                let current = self.relations.get(&msg.author_id);
                send(platform, &persona::relation_current(&current)).await;
                Dispatch::RelationShown
            }
            Command::Relation(Some(relation)) => {
                self.relations
                    .update_relation(&msg.author_id, &msg.author_name, &relation);
                info!("{} is now '{}'", msg.author_name, relation);
                send(platform, &persona::relation_updated(&relation)).await;
                Dispatch::RelationUpdated
            }
            Command::Join => self.join_voice(platform, &cancel).await,
            Command::Chat => self.chat(msg, platform, &cancel).await,
            Command::Ignore => Dispatch::Ignored,
        }
    }

    async fn join_voice(&self, platform: &dyn ChatPlatform, cancel: &CancellationToken) -> Dispatch {
        let Some(channel) = platform.author_voice_channel() else {
            send(platform, persona::JOIN_FIRST).await;
            return Dispatch::NotInVoice;
        };

        let joined = match guarded(self.timeout, cancel, platform.join_voice(&channel)).await {
            Ok(res) => res,
            Err(Interrupted::TimedOut) => Err(PlatformError::Timeout(self.timeout)),
            Err(Interrupted::Cancelled) => Err(PlatformError::Cancelled),
        };

        match joined {
            Ok(()) => {
                info!("Joined voice channel: {}", channel.name);
                send(platform, &persona::joining(&channel.name)).await;
                Dispatch::Joined
            }
            Err(e) => {
                error!("Could not join voice channel {}: {}", channel.name, e);
                send(platform, persona::JOIN_FAILED).await;
                Dispatch::JoinFailed
            }
        }
    }

    async fn chat(
        &self,
        msg: &IncomingMessage,
        platform: &dyn ChatPlatform,
        cancel: &CancellationToken,
    ) -> Dispatch {
        if let Err(e) = platform.send_typing().await {
            warn!("Typing indicator failed: {}", e);
        }

        let relation = self.relations.get(&msg.author_id);
        let messages = vec![
            ChatMessage::system(persona::build_system_prompt(&relation)),
            ChatMessage::user(msg.content.clone()),
        ];

        match self.request_completion(messages, cancel).await {
            Ok(text) => {
                let reply = format!("{} {}", emoticons::random_emoticon(), text);
                send(platform, &reply).await;
                Dispatch::Answered
            }
            Err(e) if e.is_empty_reply() => {
                warn!("Model returned an empty reply for {}", msg.author_name);
                send(platform, &persona::did_not_get_that(&relation, &msg.author_name)).await;
                Dispatch::DidNotGetThat
            }
            Err(e) => {
                error!("Completion failed for {}: {}", msg.author_name, e);
                send(platform, &persona::having_trouble(&relation, &msg.author_name)).await;
                Dispatch::Trouble
            }
        }
    }

    /// Runs the completion as its own task so a handler that goes away takes
    /// the request down with it.
    async fn request_completion(
        &self,
        messages: Vec<ChatMessage>,
        cancel: &CancellationToken,
    ) -> Result<String, CompletionError> {
        let groq = Arc::clone(&self.groq);
        let token = cancel.child_token();
        let timeout = self.timeout;

        let task = tokio::spawn(async move {
            match guarded(timeout, &token, groq.complete(&messages)).await {
                Ok(res) => res,
                Err(Interrupted::TimedOut) => Err(CompletionError::Timeout(timeout)),
                Err(Interrupted::Cancelled) => Err(CompletionError::Cancelled),
            }
        });

        match task.await {
            Ok(res) => res,
            Err(e) => {
                error!("Completion task aborted: {}", e);
                Err(CompletionError::Cancelled)
            }
        }
    }
}

enum Interrupted {
    TimedOut,
    Cancelled,
}

async fn guarded<F: Future>(
    timeout: Duration,
    cancel: &CancellationToken,
    fut: F,
) -> Result<F::Output, Interrupted> {
    tokio::select! {
        _ = cancel.cancelled() => Err(Interrupted::Cancelled),
        res = tokio::time::timeout(timeout, fut) => res.map_err(|_| Interrupted::TimedOut),
    }
}

async fn send(platform: &dyn ChatPlatform, content: &str) {
    if let Err(e) = platform.reply(content).await {
        error!("Failed to send reply: {}", e);
    }
}
