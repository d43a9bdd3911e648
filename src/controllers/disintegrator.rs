// src/controllers/disintegrator.rs
//
// Runs disintegration requests against one surface.
//
// The Disintegrator owns the surface and lives on the context that draws
// it (the thread calling `poll`). Triangulation runs on rayon's pool and
// reports back over a channel; snapshotting, scheduling, cropping and
// handing particles to the renderer only ever happen inside `poll`, so
// the surface is never touched from another thread.
//
// One request runs at a time. Requests made while busy are queued.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use crate::animation::{ScheduleConfig, Scheduler};
use crate::config::Config;
use crate::error::DisintegrateError;
use crate::models::{Direction, Rect, Triangle};
use crate::render::{Completion, Particle, Surface};
use crate::services::Triangulator;

pub const DEFAULT_TRIANGLE_COUNT: usize = 66;

pub type RequestId = u64;

pub struct DisintegrationRequest {
    // None picks one of the eight directions at random
    pub direction: Option<Direction>,
    pub estimated_triangle_count: usize,
    pub on_complete: Option<Completion>,
}

impl Default for DisintegrationRequest {
    fn default() -> Self {
        Self {
            direction: None,
            estimated_triangle_count: DEFAULT_TRIANGLE_COUNT,
            on_complete: None,
        }
    }
}

impl DisintegrationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn estimated_triangle_count(mut self, count: usize) -> Self {
        self.estimated_triangle_count = count;
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for DisintegrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisintegrationRequest")
            .field("direction", &self.direction)
            .field("estimated_triangle_count", &self.estimated_triangle_count)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Triangulating,
    Scheduling,
    Dispatched,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    // Bounds were empty; completed without touching the renderer.
    Skipped {
        request: RequestId,
    },
    Dispatched {
        request: RequestId,
        direction: Direction,
        particles: usize,
    },
    // Gave up before the surface was modified; on_complete is not run.
    Aborted {
        request: RequestId,
        error: DisintegrateError,
    },
    Finished {
        request: RequestId,
    },
}

enum Message {
    Triangulated {
        request: RequestId,
        triangles: Vec<Triangle>,
    },
    Finished {
        request: RequestId,
    },
}

struct ActiveRequest {
    id: RequestId,
    direction: Direction,
    bounds: Rect,
    on_complete: Option<Completion>,
}

// Everything the background side needs; owns no part of the surface.
struct TriangulationJob {
    id: RequestId,
    bounds: Rect,
    estimated_count: usize,
    direction: Direction,
    triangulator: Triangulator,
    rng: StdRng,
    sender: Sender<Message>,
    alive: Arc<AtomicBool>,
}

impl TriangulationJob {
    // Returns whether a result was handed back.
    fn run(mut self) -> bool {
        if !self.alive.load(Ordering::Acquire) {
            debug!("request {}: surface gone, skipping triangulation", self.id);
            return false;
        }
        let triangles = self.triangulator.triangulate(
            self.bounds,
            self.estimated_count,
            self.direction,
            &mut self.rng,
        );
        if !self.alive.load(Ordering::Acquire) {
            debug!("request {}: surface gone, dropping triangulation", self.id);
            return false;
        }
        let sent = self
            .sender
            .send(Message::Triangulated {
                request: self.id,
                triangles,
            })
            .is_ok();
        if !sent {
            debug!("request {}: nobody left to receive triangulation", self.id);
        }
        sent
    }
}

pub struct Disintegrator<S: Surface> {
    surface: S,
    triangulator: Triangulator,
    config: ScheduleConfig,
    rng: StdRng,
    state: PipelineState,
    active: Option<ActiveRequest>,
    queue: VecDeque<(RequestId, DisintegrationRequest)>,
    next_id: RequestId,
    sender: Sender<Message>,
    receiver: Receiver<Message>,
    // cleared on drop so background jobs stop early
    alive: Arc<AtomicBool>,
    events: Vec<PipelineEvent>,
}

impl<S: Surface> Disintegrator<S> {
    pub fn new(surface: S, triangulator: Triangulator, config: ScheduleConfig, rng: StdRng) -> Self {
        let (sender, receiver) = channel();
        Self {
            surface,
            triangulator,
            config,
            rng,
            state: PipelineState::Idle,
            active: None,
            queue: VecDeque::new(),
            next_id: 1,
            sender,
            receiver,
            alive: Arc::new(AtomicBool::new(true)),
            events: Vec::new(),
        }
    }

    pub fn from_config(surface: S, config: &Config) -> Self {
        Self::new(
            surface,
            config.triangulator(),
            config.animation.clone(),
            config.rng(),
        )
    }

    pub fn with_seed(surface: S, seed: u64) -> Self {
        Self::new(
            surface,
            Triangulator::default(),
            ScheduleConfig::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == PipelineState::Idle
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Queues a request and starts it right away if nothing else is running.
    pub fn disintegrate(&mut self, request: DisintegrationRequest) -> RequestId {
        let id = self.next_id;
        self.next_id += 1;
        debug!("request {} queued: {:?}", id, request);

        self.queue.push_back((id, request));
        if self.is_idle() {
            self.start_next();
        }
        id
    }

    /// Handles everything the background jobs and the renderer have
    /// reported since the last call. Call from the surface's own context.
    pub fn poll(&mut self) -> Vec<PipelineEvent> {
        // Only what has already arrived; jobs started while handling these
        // report on a later poll.
        let pending: Vec<Message> = self.receiver.try_iter().collect();
        for message in pending {
            self.handle(message);
        }
        std::mem::take(&mut self.events)
    }

    // Blocks up to `timeout` for the next report, then polls.
    pub fn wait(&mut self, timeout: Duration) -> Vec<PipelineEvent> {
        if let Ok(message) = self.receiver.recv_timeout(timeout) {
            self.handle(message);
        }
        self.poll()
    }

    fn start_next(&mut self) {
        while let Some((id, request)) = self.queue.pop_front() {
            let bounds = self.surface.bounds();
            let direction = request
                .direction
                .unwrap_or_else(|| Direction::random(&mut self.rng));

            if bounds.is_empty() {
                debug!("request {}: nothing to disintegrate in {:?}", id, bounds);
                self.events.push(PipelineEvent::Skipped { request: id });
                if let Some(on_complete) = request.on_complete {
                    on_complete();
                }
                continue;
            }

            self.active = Some(ActiveRequest {
                id,
                direction,
                bounds,
                on_complete: request.on_complete,
            });
            self.state = PipelineState::Triangulating;
            self.spawn_triangulation(id, bounds, request.estimated_triangle_count, direction);
            return;
        }

        self.active = None;
        self.state = PipelineState::Idle;
    }

    fn spawn_triangulation(
        &mut self,
        id: RequestId,
        bounds: Rect,
        estimated_count: usize,
        direction: Direction,
    ) {
        let job = TriangulationJob {
            id,
            bounds,
            estimated_count,
            direction,
            triangulator: self.triangulator,
            rng: StdRng::seed_from_u64(self.rng.gen()),
            sender: self.sender.clone(),
            alive: Arc::clone(&self.alive),
        };

        debug!("request {}: triangulating towards {}", id, direction);
        rayon::spawn(move || {
            job.run();
        });
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::Triangulated { request, triangles } => {
                if self.state != PipelineState::Triangulating || !self.is_active(request) {
                    debug!("ignoring stale triangulation for request {}", request);
                    return;
                }
                if let Some(active) = self.active.take() {
                    self.dispatch(active, triangles);
                }
            }
            Message::Finished { request } => {
                if self.state != PipelineState::Dispatched || !self.is_active(request) {
                    debug!("ignoring stale completion for request {}", request);
                    return;
                }
                if let Some(active) = self.active.take() {
                    debug!("request {} finished", active.id);
                    if let Some(on_complete) = active.on_complete {
                        on_complete();
                    }
                    self.events.push(PipelineEvent::Finished { request: active.id });
                    self.start_next();
                }
            }
        }
    }

    fn is_active(&self, request: RequestId) -> bool {
        self.active.as_ref().map(|a| a.id) == Some(request)
    }

    fn dispatch(&mut self, active: ActiveRequest, triangles: Vec<Triangle>) {
        self.state = PipelineState::Scheduling;

        if triangles.is_empty() {
            self.events.push(PipelineEvent::Skipped { request: active.id });
            if let Some(on_complete) = active.on_complete {
                on_complete();
            }
            self.start_next();
            return;
        }

        // Everything that can fail happens before the surface is modified.
        let Some(snapshot) = self.surface.capture() else {
            self.abort(active, DisintegrateError::SnapshotUnavailable);
            return;
        };

        let descriptors = Scheduler::new(self.config.clone()).schedule(
            &triangles,
            active.direction,
            &active.bounds,
            &mut self.rng,
        );

        let scale = self.surface.scale_factor();
        let mut particles = Vec::with_capacity(triangles.len());
        for (index, (triangle, animation)) in triangles.into_iter().zip(descriptors).enumerate() {
            let pixel_rect = triangle.frame().scaled(scale);
            let Some(content) = self.surface.crop(&snapshot, pixel_rect) else {
                self.abort(active, DisintegrateError::CropFailed { index });
                return;
            };
            particles.push(Particle::new(triangle, content, animation));
        }

        let count = particles.len();
        let sender = self.sender.clone();
        let id = active.id;
        let on_finished: Completion = Box::new(move || {
            // the coordinator may already be gone; nothing left to notify then
            let _ = sender.send(Message::Finished { request: id });
        });

        self.surface.hide_content();
        self.surface
            .present(particles, self.config.completion_delay(), on_finished);

        debug!("request {}: dispatched {} particles", id, count);
        self.events.push(PipelineEvent::Dispatched {
            request: id,
            direction: active.direction,
            particles: count,
        });
        self.active = Some(active);
        self.state = PipelineState::Dispatched;
    }

    fn abort(&mut self, active: ActiveRequest, error: DisintegrateError) {
        warn!("request {} aborted: {}", active.id, error);
        self.events.push(PipelineEvent::Aborted {
            request: active.id,
            error,
        });
        self.start_next();
    }
}

impl<S: Surface> Drop for Disintegrator<S> {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }
}
