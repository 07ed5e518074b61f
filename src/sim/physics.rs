//! Fixed-step velocity decay and motion
//!
//! Speeds are in pixels per tick. Decay runs on a decimated cadence, so motion
//! is tied to tick count rather than wall-clock time.

use super::cricket::Cricket;

/// Fastest fall, in pixels per tick (negative is down)
pub const TERMINAL_FALL: i32 = -5;

/// Advance a decimation counter, returning true on the tick it wraps to 0
#[inline]
pub fn step_counter(counter: &mut u32, period: u32) -> bool {
    *counter = (*counter + 1) % period.max(1);
    *counter == 0
}

/// One decay step: gravity toward `TERMINAL_FALL`, friction toward zero
pub fn decay(cricket: &mut Cricket) {
    let vel = &mut cricket.velocity;
    if vel.y > TERMINAL_FALL {
        vel.y -= 1;
    }
    vel.x -= vel.x.signum();
}

/// Move an airborne cricket by its velocity and keep it inside the level
pub fn integrate(cricket: &mut Cricket, level_width: i32) {
    if !cricket.airborne {
        return;
    }
    cricket.position.x -= cricket.velocity.x;
    cricket.clamp_x(level_width);
    cricket.position.y -= cricket.velocity.y;
}
