//! Melee resolver: periodic arc-sweep hit detection.
//!
//! Each wielder's timer counts down by frame time. When it reaches zero the
//! weapon swings once and the timer resets to the swing interval. A swing
//! damages every eligible health ledger inside range and arc directly,
//! without going through a damage source cooldown.

use glam::DVec2;
use hecs::{Entity, World};
use log::debug;

use slashfall_core::components::{Collider, MeleeWeapon, MoveInput, Parent};
use slashfall_core::constants::{AIM_INPUT_EPSILON_SQ, AIM_VELOCITY_EPSILON_SQ, ARC_TOLERANCE_DEG};
use slashfall_core::enums::Layer;
use slashfall_core::events::GameEvent;
use slashfall_core::geometry::{angle_between_deg, perpendicular, rotate_deg, snap_to_cardinal};
use slashfall_core::health::Health;
use slashfall_core::types::{LayerMask, Position, Velocity};

use crate::entity_from_id;
use crate::systems::health::{apply_damage, Death};

/// Depth limit when walking parent links (guards against cycles).
const MAX_PARENT_DEPTH: usize = 32;

/// Geometry of one swing, fixed at the moment it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swing {
    /// Facing before cardinal snapping; used to place the slash VFX.
    pub aim: DVec2,
    /// Facing after optional snapping; used to place the hit center.
    pub forward: DVec2,
    /// Direction the arc is measured from.
    pub direction: DVec2,
    pub center: DVec2,
    pub hit_range: f64,
    pub hit_arc_deg: f64,
    pub hit_layers: LayerMask,
    pub damage: f64,
}

impl Swing {
    /// Whether a body at `point` with `radius` lies inside range and arc.
    /// The arc boundary is inclusive.
    pub fn reaches(&self, point: DVec2, radius: f64) -> bool {
        let to = point - self.center;
        if to.length() > self.hit_range + radius {
            return false;
        }
        angle_between_deg(self.direction, to) <= self.hit_arc_deg * 0.5 + ARC_TOLERANCE_DEG
    }
}

/// Pick the facing for this swing and remember it on the weapon.
///
/// Priority: non-zero input, then movement direction, then the previous aim.
pub fn resolve_aim(weapon: &mut MeleeWeapon, input: Option<DVec2>, velocity: Option<DVec2>) -> DVec2 {
    if let Some(dir) = input.filter(|d| d.length_squared() > AIM_INPUT_EPSILON_SQ) {
        weapon.last_aim = dir.normalize();
    } else if let Some(vel) = velocity.filter(|v| v.length_squared() > AIM_VELOCITY_EPSILON_SQ) {
        weapon.last_aim = vel.normalize();
    }
    weapon.last_aim
}

/// Build the swing geometry for a wielder at `origin` facing `aim`.
pub fn plan_swing(weapon: &MeleeWeapon, origin: DVec2, aim: DVec2) -> Swing {
    let forward = if weapon.snap_to_cardinal {
        snap_to_cardinal(aim)
    } else {
        aim
    };
    let direction = if weapon.swing_orthogonal {
        perpendicular(forward)
    } else {
        forward
    };

    Swing {
        aim,
        forward,
        direction,
        center: origin + forward * weapon.forward_offset,
        hit_range: weapon.range + weapon.extra_range.max(0.0),
        hit_arc_deg: weapon.arc_degrees + weapon.extra_arc_degrees.max(0.0),
        hit_layers: weapon.hit_layers,
        damage: weapon.damage,
    }
}

/// Cosmetic slashes fanned across ±`angle_spread_deg` around the swing.
pub fn slash_events(weapon: &MeleeWeapon, origin: DVec2, swing: &Swing) -> Vec<GameEvent> {
    let vfx = &weapon.vfx;
    let length = swing.hit_range * vfx.length_multiplier.max(0.5);
    let thickness = vfx.thickness * vfx.thickness_multiplier.max(0.5);
    let center = origin + swing.aim * (weapon.forward_offset + swing.hit_range * 0.5);

    let count = vfx.count.max(1);
    let spread = vfx.angle_spread_deg.max(0.0);
    (0..count)
        .map(|i| {
            let offset = if count == 1 {
                0.0
            } else {
                -spread + 2.0 * spread * (i as f64 / (count - 1) as f64)
            };
            GameEvent::Slash {
                center,
                direction: rotate_deg(swing.direction, offset),
                length,
                thickness,
                duration_secs: vfx.duration_secs,
                color: vfx.color,
            }
        })
        .collect()
}

/// Whether `entity` is `ancestor` or hangs below it through parent links.
pub fn is_part_of(world: &World, entity: Entity, ancestor: Entity) -> bool {
    let mut current = entity;
    for _ in 0..MAX_PARENT_DEPTH {
        if current == ancestor {
            return true;
        }
        let parent = match world.get::<&Parent>(current) {
            Ok(p) => p.0,
            Err(_) => return false,
        };
        match entity_from_id(parent) {
            Some(next) => current = next,
            None => return false,
        }
    }
    false
}

/// Advance every melee weapon by `dt` and resolve the swings that fire.
pub fn run(world: &mut World, dt: f64, events: &mut Vec<GameEvent>, deaths: &mut Vec<Death>) {
    let mut swings: Vec<(Entity, Swing)> = Vec::new();

    for (entity, (weapon, pos, input, vel)) in world.query_mut::<(
        &mut MeleeWeapon,
        &Position,
        Option<&MoveInput>,
        Option<&Velocity>,
    )>() {
        weapon.timer_secs -= dt;
        if weapon.timer_secs > 0.0 {
            continue;
        }
        weapon.timer_secs = weapon.swing_interval_secs;

        let aim = resolve_aim(weapon, input.map(|i| i.direction), vel.map(|v| v.0));
        let swing = plan_swing(weapon, pos.0, aim);
        events.extend(slash_events(weapon, pos.0, &swing));
        swings.push((entity, swing));
    }

    for (wielder, swing) in swings {
        let hits = gather_hits(world, wielder, &swing);
        if !hits.is_empty() {
            debug!("swing by {wielder:?} hit {} target(s)", hits.len());
        }
        for target in hits {
            apply_damage(world, target, swing.damage, events, deaths);
        }
    }
}

/// Candidates a swing connects with, excluding the wielder and its parts.
pub fn gather_hits(world: &World, wielder: Entity, swing: &Swing) -> Vec<Entity> {
    let mut query = world.query::<(&Health, &Position, Option<&Collider>, Option<&Layer>)>();
    let candidates: Vec<(Entity, DVec2, f64)> = query
        .iter()
        .filter(|(_, (_, _, _, layer))| {
            swing
                .hit_layers
                .contains(layer.copied().unwrap_or_default())
        })
        .map(|(e, (_, pos, collider, _))| (e, pos.0, collider.map_or(0.0, |c| c.radius)))
        .collect();
    drop(query);

    candidates
        .into_iter()
        .filter(|&(e, pos, radius)| swing.reaches(pos, radius) && !is_part_of(world, e, wielder))
        .map(|(e, _, _)| e)
        .collect()
}
