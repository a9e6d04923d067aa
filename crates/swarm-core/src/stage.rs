//! Single-threaded host loop glue.
//!
//! Transport callbacks may fire at any time relative to the frame loop, so
//! they only enqueue. Each frame drains the queue completely, then runs one
//! swarm tick and one draw pass.

use crate::config::SwarmConfig;
use crate::events::{Applied, Drawing, ShapeEvent};
use crate::projection::Viewport;
use crate::render::Surface;
use crate::swarm::Swarm;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;

pub struct Stage<R: Rng = StdRng> {
    drawing: Drawing,
    swarm: Swarm<R>,
    queue: VecDeque<ShapeEvent>,
    reload_requested: bool,
}

impl Stage<StdRng> {
    pub fn new(config: SwarmConfig, seed: u64) -> Self {
        Self::with_swarm(Swarm::new(config, seed))
    }
}

impl<R: Rng> Stage<R> {
    pub fn with_swarm(swarm: Swarm<R>) -> Self {
        Self {
            drawing: Drawing::new(swarm.config().radius_duration_floor),
            swarm,
            queue: VecDeque::new(),
            reload_requested: false,
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn swarm(&self) -> &Swarm<R> {
        &self.swarm
    }

    /// Queue an event for the next frame.
    pub fn enqueue(&mut self, event: ShapeEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply every queued event in order. Targets are recomputed once, after
    /// the last shape change. Returns the number of events that changed the
    /// shapes.
    pub fn process_events(&mut self) -> usize {
        let mut changed = 0;
        while let Some(event) = self.queue.pop_front() {
            match self.drawing.apply(&event) {
                Applied::ShapesChanged => changed += 1,
                Applied::ReloadRequested => {
                    log::info!("reload requested by peer");
                    self.reload_requested = true;
                }
                Applied::Ignored => {}
            }
        }
        if changed > 0 {
            self.swarm.on_shapes_changed(self.drawing.shapes());
        }
        changed
    }

    /// Drain events, advance the swarm one tick and draw it.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: Viewport) {
        self.process_events();
        self.swarm.tick();
        self.swarm.draw(surface, viewport);
    }

    /// True once after a `refresh` event was seen.
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }
}
