//! Platform abstraction layer
//!
//! The game loop is "run one frame, then ask the host for the next one". On the
//! web the host is `requestAnimationFrame`; natively it is a sleep-paced queue.
//! Either way the frame callback receives a monotonic timestamp in
//! milliseconds, which is what the spawn timer runs on.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameScheduler;

#[cfg(not(target_arch = "wasm32"))]
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
    time::{Duration, Instant},
};

/// One scheduled frame; receives the host timestamp in ms
pub type TickCallback = Box<dyn FnOnce(f64)>;

/// Host-provided "call me again next frame"
pub trait Scheduler {
    fn schedule_next_tick(&self, callback: TickCallback);
}

/// Run `frame` on every host tick until it returns false
pub fn drive<S, F>(scheduler: S, mut frame: F)
where
    S: Scheduler + Clone + 'static,
    F: FnMut(f64) -> bool + 'static,
{
    let next = scheduler.clone();
    scheduler.schedule_next_tick(Box::new(move |now_ms| {
        if frame(now_ms) {
            drive(next, frame);
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
struct SleepInner {
    frame: Duration,
    /// Sleep between frames; otherwise time is simulated
    paced: bool,
    origin: Instant,
    frames_run: Cell<u64>,
    queue: RefCell<VecDeque<TickCallback>>,
}

/// Native scheduler: a single-threaded callback queue
///
/// Cloning shares the queue. Nothing runs until [`SleepScheduler::run`].
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone)]
pub struct SleepScheduler {
    inner: Rc<SleepInner>,
}

#[cfg(not(target_arch = "wasm32"))]
impl SleepScheduler {
    /// Real-time pacing at `fps`
    pub fn new(fps: u32) -> Self {
        Self::build(fps, true)
    }

    /// As fast as possible with a simulated clock advancing one frame per tick
    pub fn unpaced(fps: u32) -> Self {
        Self::build(fps, false)
    }

    fn build(fps: u32, paced: bool) -> Self {
        Self {
            inner: Rc::new(SleepInner {
                frame: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
                paced,
                origin: Instant::now(),
                frames_run: Cell::new(0),
                queue: RefCell::new(VecDeque::new()),
            }),
        }
    }

    /// Frames executed so far
    pub fn frames_run(&self) -> u64 {
        self.inner.frames_run.get()
    }

    /// Run queued callbacks until the queue drains
    pub fn run(&self) {
        loop {
            let next = self.inner.queue.borrow_mut().pop_front();
            let Some(callback) = next else { break };

            let now_ms = if self.inner.paced {
                std::thread::sleep(self.inner.frame);
                self.inner.origin.elapsed().as_secs_f64() * 1000.0
            } else {
                (self.frames_run() + 1) as f64 * self.inner.frame.as_secs_f64() * 1000.0
            };

            self.inner.frames_run.set(self.frames_run() + 1);
            callback(now_ms);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Scheduler for SleepScheduler {
    fn schedule_next_tick(&self, callback: TickCallback) {
        self.inner.queue.borrow_mut().push_back(callback);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_drive_stops_when_frame_says_so() {
        let scheduler = SleepScheduler::unpaced(60);
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        drive(scheduler.clone(), move |_| {
            seen.set(seen.get() + 1);
            seen.get() < 5
        });

        assert_eq!(count.get(), 0);
        scheduler.run();
        assert_eq!(count.get(), 5);
        assert_eq!(scheduler.frames_run(), 5);
    }

    #[test]
    fn test_unpaced_clock_is_monotonic() {
        let scheduler = SleepScheduler::unpaced(50);
        let stamps = Rc::new(RefCell::new(Vec::new()));
        let sink = stamps.clone();
        drive(scheduler.clone(), move |now| {
            sink.borrow_mut().push(now);
            sink.borrow().len() < 3
        });
        scheduler.run();

        let stamps = stamps.borrow();
        assert_eq!(stamps.len(), 3);
        assert!((stamps[0] - 20.0).abs() < 1e-9);
        assert!((stamps[2] - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_paced_clock_follows_wall_time() {
        let scheduler = SleepScheduler::new(200);
        let stamps = Rc::new(RefCell::new(Vec::new()));
        let sink = stamps.clone();
        drive(scheduler.clone(), move |now| {
            sink.borrow_mut().push(now);
            sink.borrow().len() < 3
        });
        scheduler.run();

        let stamps = stamps.borrow();
        assert_eq!(stamps.len(), 3);
        // Each frame sleeps at least 5ms before running
        assert!(stamps[0] >= 5.0);
        assert!(stamps[2] >= 15.0);
        assert!(stamps.windows(2).all(|pair| pair[1] > pair[0]));
    }
}
