/// Cubic ease-out: fast start, slow settle. Input is clamped to `[0, 1]`.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Progress of an integer frame counter through `frames` ticks, in `[0, 1]`.
#[inline]
pub fn frame_phase(frame: u32, frames: u32) -> f32 {
    if frames == 0 {
        1.0
    } else {
        (frame.min(frames) as f32) / frames as f32
    }
}
