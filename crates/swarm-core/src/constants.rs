// Default swarm tuning constants. `SwarmConfig::default()` is built from these.

// Population bounds
pub const INITIAL_COUNT: usize = 300; // swarm size while nothing is drawn
pub const MIN_COUNT: usize = 40; // floor for any drawn path, also the cluster size for a dot
pub const MAX_COUNT: usize = 1000; // hard cap on live particles
pub const DENSITY: f32 = 150.0; // particles per unit of arc length

// Path handling
pub const SHORT_PATH_EPSILON: f32 = 1e-3; // below this total distance a path is a single point
pub const CLUSTER_RADIUS: f32 = 0.08; // disc radius used to gather particles on a point
pub const MIN_STROKE_DURATION: f32 = 1.0; // every stroke weighs at least this much
pub const RADIUS_DURATION_FLOOR: f32 = 10.0; // floor for radius-derived `addpoint` durations

// Simulation space
pub const BOUNDARY_MARGIN: f32 = 0.05; // allowed overshoot past [-1, 1] before reflecting

// Wander
pub const WANDER_TURN_MAX: f32 = std::f32::consts::FRAC_PI_4; // max heading change per segment
pub const WANDER_FRAMES_MIN: u32 = 60; // segment length, 1s at 60 Hz
pub const WANDER_FRAMES_MAX: u32 = 240; // segment length, 4s at 60 Hz
pub const WANDER_SPEED_MIN: f32 = 0.0005;
pub const WANDER_SPEED_MAX: f32 = 0.002;
pub const SPAWN_SPEED_MIN: f32 = 0.001;
pub const SPAWN_SPEED_MAX: f32 = 0.002;

// Align
pub const ALIGN_FRAMES: u32 = 30; // ticks to close in on a target
pub const HOVER_RADIUS_MIN: f32 = 0.01;
pub const HOVER_RADIUS_MAX: f32 = 0.02;
pub const HOVER_SPEED_MIN: f32 = 0.01;
pub const HOVER_SPEED_MAX: f32 = 0.04;
pub const HOVER_PHASE_Y_RATIO: f32 = 0.7; // y drift phase offset relative to x

// Size pulse
pub const MAX_PULSE: usize = 5; // particles allowed to pulse at once
pub const PULSE_PROBABILITY: f32 = 0.002; // per idle tick
pub const PULSE_ANIM_FRAMES: u32 = 30; // grow and shrink duration
pub const PULSE_HOLD_FRAMES: u32 = 300; // ~5s held large
pub const PULSE_SIZE_MULTIPLIER: f32 = 5.0; // large size relative to the size unit

// Visuals
pub const SIZE_UNIT_PX: f32 = 50.0; // sizes are drawn as a fraction of this
pub const BASE_SIZE_MIN: f32 = 0.1; // fraction of SIZE_UNIT_PX
pub const BASE_SIZE_MAX: f32 = 1.0;
pub const PARTICLE_OPACITY: f32 = 0.9;
pub const VARIANT_COUNT: usize = 6; // number of sprite variants the renderer offers

// Life
pub const LIFE_FRAMES: u32 = 30; // fade in / fade out duration

// View blend
pub const VIEW_BLEND_RATE: f32 = 0.1; // fraction of the remaining gap closed per tick
pub const VIEW_BLEND_SNAP: f32 = 0.001;
pub const ALIGN_ASPECT: f32 = 1.0; // width / height of the align framing region
