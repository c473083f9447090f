use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};

const MIN_RATE: u32 = 50;
const MAX_RATE: u32 = 300;

/// Offline text-to-speech over the platform voice command (`say` on macOS,
/// `espeak` elsewhere).
///
/// `speak` never blocks the caller: the voice process runs under a
/// background task, and `is_speaking` exposes its state. `stop` is
/// best-effort; in-flight audio may not halt instantly. A missing voice
/// binary degrades to a warning, never an error.
pub struct SpeechEngine {
    rate: u32,
    volume: f32,
    voice: Option<String>,
    speaking: Arc<AtomicBool>,
    current: Arc<Mutex<Option<Child>>>,
}

impl Default for SpeechEngine {
    fn default() -> Self {
        Self {
            rate: 150,
            volume: 1.0,
            voice: None,
            speaking: Arc::new(AtomicBool::new(false)),
            current: Arc::new(Mutex::new(None)),
        }
    }
}

impl SpeechEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Speech rate in words per minute, clamped to 50..=300.
    pub fn set_rate(&mut self, rate: u32) {
        self.rate = rate.clamp(MIN_RATE, MAX_RATE);
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Volume in 0.0..=1.0.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_voice(&mut self, voice: Option<String>) {
        self.voice = voice;
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Start speaking on a background task and return immediately.
    pub fn speak(&self, text: &str) {
        let mut command = self.build_command(text);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(error = %e, "speech engine unavailable");
                return;
            }
        };

        self.speaking.store(true, Ordering::SeqCst);

        let speaking = Arc::clone(&self.speaking);
        let current = Arc::clone(&self.current);
        tokio::spawn(async move {
            *current.lock().await = Some(child);

            loop {
                sleep(Duration::from_millis(100)).await;
                let mut slot = current.lock().await;
                match slot.as_mut() {
                    Some(child) => match child.try_wait() {
                        Ok(Some(status)) => {
                            debug!(?status, "speech finished");
                            *slot = None;
                            break;
                        }
                        Ok(None) => {}
                        Err(e) => {
                            warn!(error = %e, "speech process failed");
                            *slot = None;
                            break;
                        }
                    },
                    // Cleared by stop().
                    None => break,
                }
            }

            speaking.store(false, Ordering::SeqCst);
        });
    }

    /// Speak and wait for the voice process to finish.
    pub async fn speak_blocking(&self, text: &str) {
        let mut command = self.build_command(text);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(error = %e, "speech engine unavailable");
                return;
            }
        };

        self.speaking.store(true, Ordering::SeqCst);
        if let Err(e) = child.wait().await {
            warn!(error = %e, "speech process failed");
        }
        self.speaking.store(false, Ordering::SeqCst);
    }

    /// Best-effort stop of the current utterance.
    pub async fn stop(&self) {
        let mut slot = self.current.lock().await;
        if let Some(child) = slot.as_mut() {
            if let Err(e) = child.start_kill() {
                warn!(error = %e, "failed to stop speech");
            }
            *slot = None;
        }
        self.speaking.store(false, Ordering::SeqCst);
    }

    fn build_command(&self, text: &str) -> Command {
        let mut command = if cfg!(target_os = "macos") {
            let mut command = Command::new("say");
            command.arg("-r").arg(self.rate.to_string());
            if let Some(voice) = &self.voice {
                command.arg("-v").arg(voice);
            }
            command.arg(text);
            command
        } else {
            let mut command = Command::new("espeak");
            command.arg("-s").arg(self.rate.to_string());
            // espeak amplitude runs 0..=200.
            command.arg("-a").arg(((self.volume * 200.0) as u32).to_string());
            if let Some(voice) = &self.voice {
                command.arg("-v").arg(voice);
            }
            command.arg(text);
            command
        };

        command
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        command
    }
}
