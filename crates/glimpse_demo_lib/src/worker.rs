use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use glimpse_core::Frame;
use glimpse_core::detect::{FaceBox, FaceDetector};

/// A finished detection round.
pub struct Detection {
    pub frame_index: usize,
    pub result: Result<Vec<FaceBox>, String>,
}

/// Handle to a background detection thread.
///
/// Requests are latest-wins: the worker drains its queue and runs the
/// detector only on the newest frame, so fast scrubbing never builds a
/// backlog. The UI thread polls [`Self::try_recv`] once per repaint and
/// never blocks on inference.
pub struct DetectWorker {
    request_tx: Sender<Frame>,
    response_rx: Receiver<Detection>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    backend: &'static str,
}

impl DetectWorker {
    /// Spawn a worker thread owning `detector`.
    pub fn spawn(detector: Box<dyn FaceDetector>) -> std::io::Result<Self> {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<Frame>();
        let (response_tx, response_rx) = crossbeam_channel::unbounded();
        let stop = Arc::new(AtomicBool::new(false));
        let backend = detector.name();

        let handle = std::thread::Builder::new().name("detect".to_owned()).spawn({
            let stop = Arc::clone(&stop);
            move || run(detector, &request_rx, &response_tx, &stop)
        })?;

        Ok(Self {
            request_tx,
            response_rx,
            stop,
            handle: Some(handle),
            backend,
        })
    }

    /// Short name of the backend running on the worker.
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// Queue `frame` for detection, superseding anything still queued.
    pub fn request(&self, frame: Frame) {
        if self.request_tx.send(frame).is_err() {
            log::warn!("detection worker is gone");
        }
    }

    /// Newest completed detection since the last poll, if any.
    pub fn try_recv(&self) -> Option<Detection> {
        let mut latest = None;
        while let Ok(detection) = self.response_rx.try_recv() {
            latest = Some(detection);
        }
        latest
    }
}

impl Drop for DetectWorker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run(
    mut detector: Box<dyn FaceDetector>,
    request_rx: &Receiver<Frame>,
    response_tx: &Sender<Detection>,
    stop: &AtomicBool,
) {
    while !stop.load(Ordering::Relaxed) {
        let mut frame = match request_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(frame) => frame,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return,
        };
        // Latest wins: skip anything that queued up while we were busy.
        while let Ok(newer) = request_rx.try_recv() {
            frame = newer;
        }

        profiling::scope!("detect_frame");
        let frame_index = frame.index();
        let result = detector.detect(&frame).map_err(|err| err.to_string());
        if let Err(err) = &result {
            log::warn!("detection failed on frame {frame_index}: {err}");
        }
        let detection = Detection {
            frame_index,
            result,
        };
        if response_tx.send(detection).is_err() {
            return;
        }
    }
}
