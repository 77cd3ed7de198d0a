//! Progress spinner shown while a request is in flight.

use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{cursor, execute};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// A spinner animating on its own task until [`Spinner::finish`].
pub struct Spinner<W> {
    label: String,
    stop: oneshot::Sender<()>,
    task: JoinHandle<W>,
}

impl<W: Write + Send + 'static> Spinner<W> {
    /// Spin on `out` until finished. The writer is handed back by [`Spinner::finish`].
    pub fn start(label: impl Into<String>, mut out: W) -> Self {
        let label = label.into();
        let (stop, mut stopped) = oneshot::channel();
        let frame_label = label.clone();

        let task = tokio::spawn(async move {
            let _ = execute!(out, cursor::Hide);

            let mut ticker = tokio::time::interval(FRAME_INTERVAL);
            for frame in FRAMES.iter().cycle() {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        let _ = write!(out, "\r[{}] {}", frame, frame_label);
                        let _ = out.flush();
                    }
                }
            }
            out
        });

        Self { label, stop, task }
    }

    /// Stop the animation and leave a final `[OK]` or `[X]` line.
    pub async fn finish(self, ok: bool) -> io::Result<W> {
        let _ = self.stop.send(());
        let mut out = self.task.await.map_err(io::Error::other)?;

        let mark = if ok { "OK" } else { "X" };
        writeln!(out, "\r[{}] {}", mark, self.label)?;
        execute!(out, cursor::Show)?;
        Ok(out)
    }
}

/// Await `work`, spinning `label` on stdout meanwhile when `enabled`.
pub async fn track<F, T, E>(label: String, enabled: bool, work: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    track_on(label, enabled.then(io::stdout), work).await
}

/// Await `work`, spinning `label` on `out` when one is given.
pub async fn track_on<W, F, T, E>(label: String, out: Option<W>, work: F) -> Result<T, E>
where
    W: Write + Send + 'static,
    F: Future<Output = Result<T, E>>,
{
    let Some(out) = out else {
        return work.await;
    };

    let spinner = Spinner::start(label, out);
    let result = work.await;
    if let Err(e) = spinner.finish(result.is_ok()).await {
        debug!("Spinner output failed: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_track_passes_results_through_when_disabled() {
        let value = assert_ok!(track("quiet".into(), false, async { Ok::<_, ()>(7) }).await);
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_track_with_spinner_returns_error() {
        let err = assert_err!(
            track_on("failing".into(), Some(io::sink()), async {
                tokio::time::sleep(Duration::from_millis(250)).await;
                Err::<(), _>("boom")
            })
            .await
        );
        assert_eq!(err, "boom");
    }

    #[tokio::test]
    async fn test_spinner_draws_frames_then_final_mark() {
        let spinner = Spinner::start("Syncing", Vec::new());
        tokio::time::sleep(Duration::from_millis(250)).await;
        let out = spinner.finish(true).await.unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("\r[|] Syncing"));
        assert!(text.ends_with("\r[OK] Syncing\n\x1b[?25h"));
    }
}
