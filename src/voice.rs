//! Voice listening. Packets are only measured and logged, never decoded.

use async_trait::async_trait;
use songbird::driver::DecodeMode;
use songbird::{Call, CoreEvent, Event, EventContext, EventHandler as VoiceEventHandler};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A stream counts as ended after this much silence.
pub const SILENCE_END: Duration = Duration::from_millis(1000);

pub fn songbird_config() -> songbird::Config {
    songbird::Config::default().decode_mode(DecodeMode::Decrypt)
}

/// Per-SSRC bookkeeping of who is talking and when we last heard them.
#[derive(Default)]
pub struct SpeakerTracker {
    users: HashMap<u32, u64>,
    last_heard: HashMap<u32, Instant>,
}

impl SpeakerTracker {
    fn label(&self, ssrc: u32) -> String {
        match self.users.get(&ssrc) {
            Some(user) => user.to_string(),
            None => format!("ssrc {}", ssrc),
        }
    }

    pub fn speaking_update(&mut self, ssrc: u32, user_id: Option<u64>) {
        if let Some(user) = user_id {
            self.users.insert(ssrc, user);
        }
        debug!("ssrc {} belongs to {}", ssrc, self.label(ssrc));
    }

    /// Returns true when this packet opens a new stream.
    pub fn packet(&mut self, ssrc: u32, size: usize, now: Instant) -> bool {
        let started = self.last_heard.insert(ssrc, now).is_none();
        if started {
            info!("User with ID {} started speaking.", self.label(ssrc));
        }
        debug!("Received audio chunk from {}, size: {}", self.label(ssrc), size);
        started
    }

    /// Closes streams that have been quiet for at least `SILENCE_END`.
    pub fn sweep(&mut self, now: Instant) -> Vec<u32> {
        let ended: Vec<u32> = self
            .last_heard
            .iter()
            .filter(|(_, heard)| now.saturating_duration_since(**heard) >= SILENCE_END)
            .map(|(ssrc, _)| *ssrc)
            .collect();
        for ssrc in &ended {
            self.last_heard.remove(ssrc);
            info!("Audio stream from user {} ended", self.label(*ssrc));
        }
        ended
    }

    pub fn disconnect(&mut self, user_id: u64) {
        let gone: Vec<u32> = self
            .users
            .iter()
            .filter(|(_, user)| **user == user_id)
            .map(|(ssrc, _)| *ssrc)
            .collect();
        for ssrc in gone {
            self.users.remove(&ssrc);
            self.last_heard.remove(&ssrc);
        }
        info!("User {} left the voice channel", user_id);
    }

    #[cfg(test)]
    pub fn is_active(&self, ssrc: u32) -> bool {
        self.last_heard.contains_key(&ssrc)
    }
}

#[derive(Clone, Default)]
pub struct Receiver {
    tracker: Arc<Mutex<SpeakerTracker>>,
}

impl Receiver {
    pub fn new() -> Self {
        Self::default()
    }

    fn tracker(&self) -> MutexGuard<'_, SpeakerTracker> {
        self.tracker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl VoiceEventHandler for Receiver {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        let mut tracker = self.tracker();

        match ctx {
            EventContext::SpeakingStateUpdate(speaking) => {
                tracker.speaking_update(speaking.ssrc, speaking.user_id.map(|u| u.0));
            }
            EventContext::VoiceTick(tick) => {
                let now = Instant::now();
                for (ssrc, data) in &tick.speaking {
                    if let Some(rtp) = &data.packet {
                        tracker.packet(*ssrc, rtp.packet.len(), now);
                    }
                }
                tracker.sweep(now);
            }
            EventContext::ClientDisconnect(disconnect) => {
                tracker.disconnect(disconnect.user_id.0);
            }
            _ => {}
        }

        None
    }
}

/// Replaces any listener left over from an earlier join.
pub fn attach_listener(call: &mut Call) {
    call.remove_all_global_events();

    let receiver = Receiver::new();
    call.add_global_event(CoreEvent::SpeakingStateUpdate.into(), receiver.clone());
    call.add_global_event(CoreEvent::VoiceTick.into(), receiver.clone());
    call.add_global_event(CoreEvent::ClientDisconnect.into(), receiver);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_starts_once_and_ends_after_silence() {
        let mut tracker = SpeakerTracker::default();
        let t0 = Instant::now();
        tracker.speaking_update(7, Some(1001));

        assert!(tracker.packet(7, 120, t0));
        assert!(!tracker.packet(7, 118, t0 + Duration::from_millis(20)));

        assert!(tracker.sweep(t0 + Duration::from_millis(500)).is_empty());
        assert!(tracker.is_active(7));

        let ended = tracker.sweep(t0 + Duration::from_millis(1020));
        assert_eq!(ended, vec![7]);
        assert!(!tracker.is_active(7));

        assert!(tracker.packet(7, 90, t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn test_disconnect_forgets_user() {
        let mut tracker = SpeakerTracker::default();
        let now = Instant::now();
        tracker.speaking_update(3, Some(55));
        tracker.packet(3, 64, now);

        tracker.disconnect(55);
        assert!(!tracker.is_active(3));
        assert_eq!(tracker.label(3), "ssrc 3");
    }

    #[test]
    fn test_speaker_mapping_does_not_open_stream() {
        let mut tracker = SpeakerTracker::default();
        tracker.speaking_update(9, Some(77));
        assert!(!tracker.is_active(9));

        assert!(tracker.packet(9, 100, Instant::now()));
        assert!(tracker.is_active(9));
    }

    #[test]
    fn test_receiver_survives_poisoned_lock() {
        let receiver = Receiver::new();
        let poisoner = receiver.clone();
        let _ = std::thread::spawn(move || {
            let _held = poisoner.tracker.lock().unwrap();
            panic!("listener thread died");
        })
        .join();
        assert!(receiver.tracker.is_poisoned());

        let now = Instant::now();
        assert!(receiver.tracker().packet(4, 80, now));
        assert!(receiver.tracker().is_active(4));
    }
}
