use bevy::math::DVec3;
use bevy::prelude::*;

use crate::catalog::BodyCatalog;
use crate::catalog::BodyDescriptor;
use crate::catalog::BodyId;
use crate::ease::damp64;
use crate::schedule::FrameSet;
use crate::settings::ViewerSettings;

/// Cap on a single frame's contribution so a stall (tab hidden, debugger,
/// window drag) never teleports the planets.
const MAX_FRAME_DELTA: f64 = 0.1;
/// How hard the effective speed chases the requested speed.
const SPEED_DAMP_RATE: f64 = 5.2;
/// Below this magnitude the effective speed snaps to exactly zero, so a
/// paused scene is perfectly still instead of creeping forever.
const SPEED_SNAP_EPSILON: f64 = 5e-4;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationClock::starting_at(f64::from(
            ViewerSettings::default().speed,
        )))
        .init_resource::<WorldPositions>()
        .add_systems(
            Update,
            (advance_clock, refresh_positions)
                .chain()
                .in_set(FrameSet::Simulation),
        );
    }
}

/// Elapsed simulation time plus the smoothed speed actually applied to it.
///
/// The smoothing means pause/resume and speed scrubbing ease in rather than
/// snapping body positions.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimulationClock {
    pub elapsed:         f64,
    pub effective_speed: f64,
}

impl SimulationClock {
    pub const fn starting_at(speed: f64) -> Self {
        Self {
            elapsed:         0.0,
            effective_speed: speed,
        }
    }

    /// Advance one frame. `target_speed` is the requested speed, or zero
    /// while paused; `dt` is the raw frame duration in seconds.
    pub fn advance(&mut self, target_speed: f64, dt: f64) {
        let dt = dt.min(MAX_FRAME_DELTA);
        self.effective_speed = damp64(self.effective_speed, target_speed, SPEED_DAMP_RATE, dt);
        if self.effective_speed.abs() < SPEED_SNAP_EPSILON {
            self.effective_speed = 0.0;
        }
        self.elapsed += dt * self.effective_speed;
    }
}

impl Default for SimulationClock {
    fn default() -> Self { Self::starting_at(0.0) }
}

/// World-space position per body, recomputed every frame from the clock.
/// Purely derived state - never persisted, never mutated in place.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldPositions {
    points: [DVec3; BodyId::COUNT],
}

impl Default for WorldPositions {
    fn default() -> Self {
        Self {
            points: [DVec3::ZERO; BodyId::COUNT],
        }
    }
}

impl WorldPositions {
    pub fn get(&self, id: BodyId) -> DVec3 { self.points[id.index()] }

    /// f32 view for transforms; f64 everywhere upstream.
    pub fn get_render(&self, id: BodyId) -> Vec3 { self.points[id.index()].as_vec3() }
}

/// Current orbital angle of a body, radians. Signed speed, so retrograde
/// orbits run backward through time exactly as the data says.
pub fn orbit_angle(body: &BodyDescriptor, t: f64) -> f64 {
    body.orbit_phase + t * body.orbit_speed
}

/// Current spin angle of a body's surface, radians.
pub fn spin_angle(body: &BodyDescriptor, t: f64) -> f64 {
    t * body.spin_speed + body.spin_phase()
}

/// Map simulation time to a position for every body.
///
/// Circular, coplanar orbits: each body sits on a flat ring around its
/// parent. The catalog guarantees parents precede children, so one pass
/// resolves everything. Pure function of `(t, catalog)` - same inputs,
/// bit-identical output.
pub fn compute_body_positions(t: f64, catalog: &BodyCatalog) -> WorldPositions {
    let mut points = [DVec3::ZERO; BodyId::COUNT];

    for body in catalog.bodies() {
        if body.distance == 0.0 {
            points[body.id.index()] = DVec3::ZERO;
            continue;
        }

        let angle = orbit_angle(body, t);
        let local = DVec3::new(angle.cos() * body.distance, 0.0, angle.sin() * body.distance);
        let parent = body
            .parent
            .map_or(DVec3::ZERO, |parent| points[parent.index()]);
        points[body.id.index()] = parent + local;
    }

    WorldPositions { points }
}

fn advance_clock(
    time: Res<Time>,
    settings: Res<ViewerSettings>,
    mut clock: ResMut<SimulationClock>,
) {
    let target = if settings.is_playing {
        f64::from(settings.speed)
    } else {
        0.0
    };
    clock.advance(target, f64::from(time.delta_secs()));
}

fn refresh_positions(
    catalog: Res<BodyCatalog>,
    clock: Res<SimulationClock>,
    mut positions: ResMut<WorldPositions>,
) {
    *positions = compute_body_positions(clock.elapsed, &catalog);
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::*;
    use crate::catalog::BodyCatalog;

    const DT: f64 = 1.0 / 60.0;

    fn catalog() -> BodyCatalog { BodyCatalog::new().expect("shipped catalog is valid") }

    #[test]
    fn anchor_sits_at_origin_for_any_time() {
        let catalog = catalog();
        for t in [0.0, 1.0, -3.0, 1234.5] {
            assert_eq!(compute_body_positions(t, &catalog).get(BodyId::Sun), DVec3::ZERO);
        }
    }

    #[test]
    fn earth_lands_on_positive_x_when_angle_wraps_to_zero() {
        // phase 3.2, speed 1 => angle hits 2π (≡ 0) at t = 2π − 3.2
        let catalog = catalog();
        let t = TAU - 3.2;
        let earth = compute_body_positions(t, &catalog).get(BodyId::Earth);
        assert!((earth.x - 16.0).abs() < 1e-9, "x = {}", earth.x);
        assert!(earth.y.abs() < 1e-9);
        assert!(earth.z.abs() < 1e-9, "z = {}", earth.z);
    }

    #[test]
    fn moon_reconstructs_as_parent_plus_local_offset() {
        let catalog = catalog();
        let t = 0.73;
        let positions = compute_body_positions(t, &catalog);
        let moon = catalog.get(BodyId::Moon);

        let angle = orbit_angle(moon, t);
        let local = DVec3::new(angle.cos() * moon.distance, 0.0, angle.sin() * moon.distance);
        let rebuilt = positions.get(BodyId::Earth) + local;

        assert!((positions.get(BodyId::Moon) - rebuilt).length() < 1e-9);
    }

    #[test]
    fn moon_tracks_parent_motion() {
        // same moon angle at both times (period 2π/5), so any displacement
        // is entirely inherited from Earth's motion
        let catalog = catalog();
        let t0 = 0.0;
        let t1 = TAU / 5.0;
        let p0 = compute_body_positions(t0, &catalog);
        let p1 = compute_body_positions(t1, &catalog);

        let moon_delta = p1.get(BodyId::Moon) - p0.get(BodyId::Moon);
        let earth_delta = p1.get(BodyId::Earth) - p0.get(BodyId::Earth);
        assert!((moon_delta - earth_delta).length() < 1e-9);
        assert!(earth_delta.length() > 1.0, "earth must actually have moved");
    }

    #[test]
    fn positions_are_bit_identical_across_calls() {
        let catalog = catalog();
        let a = compute_body_positions(17.125, &catalog);
        let b = compute_body_positions(17.125, &catalog);
        for id in BodyId::ALL {
            assert_eq!(a.get(id).x.to_bits(), b.get(id).x.to_bits());
            assert_eq!(a.get(id).y.to_bits(), b.get(id).y.to_bits());
            assert_eq!(a.get(id).z.to_bits(), b.get(id).z.to_bits());
        }
    }

    #[test]
    fn orbit_angle_is_monotonic_in_time() {
        let catalog = catalog();
        let earth = catalog.get(BodyId::Earth);
        assert!(earth.orbit_speed > 0.0);
        assert!(orbit_angle(earth, 1.0) < orbit_angle(earth, 2.0));

        let mut retro = catalog.get(BodyId::Mercury).clone();
        retro.orbit_speed = -1.6;
        assert!(orbit_angle(&retro, 1.0) > orbit_angle(&retro, 2.0));
    }

    #[test]
    fn negative_time_is_well_defined() {
        let catalog = catalog();
        let positions = compute_body_positions(-42.0, &catalog);
        for id in BodyId::ALL {
            assert!(positions.get(id).is_finite());
        }
    }

    #[test]
    fn effective_speed_converges_onto_requested_speed() {
        let mut clock = SimulationClock::starting_at(0.0);
        for _ in 0..120 {
            clock.advance(2.0, DT);
        }
        assert!(
            (clock.effective_speed - 2.0).abs() / 2.0 < 0.01,
            "effective speed {} never reached 2.0",
            clock.effective_speed
        );
    }

    #[test]
    fn pausing_settles_to_exact_zero_and_stays() {
        let mut clock = SimulationClock::starting_at(1.4);
        for _ in 0..300 {
            clock.advance(0.0, DT);
        }
        assert_eq!(clock.effective_speed, 0.0);

        let frozen = clock.elapsed;
        for _ in 0..60 {
            clock.advance(0.0, DT);
        }
        assert_eq!(clock.effective_speed, 0.0, "no oscillation below the epsilon");
        assert_eq!(clock.elapsed, frozen, "paused clock must not drift");
    }

    #[test]
    fn stalled_frame_is_clamped() {
        let mut clock = SimulationClock::starting_at(1.0);
        clock.advance(1.0, 5.0);
        // a five second stall contributes at most 0.1s of simulation time
        assert!(clock.elapsed <= 0.1 + 1e-12, "elapsed = {}", clock.elapsed);
        assert!(clock.elapsed > 0.09);
    }

    #[test]
    fn speed_scrub_never_jumps() {
        let mut clock = SimulationClock::starting_at(1.0);
        let mut previous = clock.effective_speed;
        for _ in 0..60 {
            clock.advance(4.2, DT);
            let step = clock.effective_speed - previous;
            assert!(step >= 0.0 && step < 0.5, "speed moved {step} in one frame");
            previous = clock.effective_speed;
        }
    }
}
