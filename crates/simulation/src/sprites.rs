//! Moving entities: trains, aircraft, ships, the monster, tornadoes,
//! explosions, buses.
//!
//! Sprites hold minimal state — position in 1/16-tile units, a destination,
//! a time-to-live — and are stored in a contiguous list. A sprite with
//! `frame == 0` is dead; dead sprites are swap-removed at the end of each
//! tick. Only the tornado and monster touch the map: they chew through
//! bulldozable cells they pass over.

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::config::{WORLD_H, WORLD_W};
use crate::sim_rng::SimRng;
use crate::tile_map::TileMap;
use crate::tiles::{Tile, ANIMBIT, BULLBIT, FIREBASE, RUBBLE};

/// Position units per tile.
pub const SPRITE_SCALE: i32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum SpriteKind {
    Train,
    Helicopter,
    Airplane,
    Ship,
    Monster,
    Tornado,
    Explosion,
    Bus,
}

#[derive(Debug, Clone, Encode, Decode)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Animation frame; 0 hides the sprite and marks it dead.
    pub frame: u8,
    /// Position in 1/16-tile units.
    pub x: i32,
    pub y: i32,
    pub dest_x: i32,
    pub dest_y: i32,
    /// Remaining lifetime in ticks; sprites expire at zero.
    pub count: i32,
    pub dir: u8,
    pub speed: i32,
    pub flag: u8,
}

impl Sprite {
    pub fn new(kind: SpriteKind, tile_x: i32, tile_y: i32) -> Self {
        let (speed, count) = match kind {
            SpriteKind::Train => (4, 120),
            SpriteKind::Helicopter => (6, 300),
            SpriteKind::Airplane => (12, 200),
            SpriteKind::Ship => (2, 400),
            SpriteKind::Monster => (6, 500),
            SpriteKind::Tornado => (8, 200),
            SpriteKind::Explosion => (0, 12),
            SpriteKind::Bus => (6, 150),
        };
        Self {
            kind,
            frame: 1,
            x: tile_x * SPRITE_SCALE,
            y: tile_y * SPRITE_SCALE,
            dest_x: tile_x * SPRITE_SCALE,
            dest_y: tile_y * SPRITE_SCALE,
            count,
            dir: 0,
            speed,
            flag: 0,
        }
    }

    pub fn with_dest(mut self, tile_x: i32, tile_y: i32) -> Self {
        self.dest_x = tile_x * SPRITE_SCALE;
        self.dest_y = tile_y * SPRITE_SCALE;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.frame == 0
    }

    pub fn tile_pos(&self) -> (i32, i32) {
        (self.x / SPRITE_SCALE, self.y / SPRITE_SCALE)
    }

    fn at_destination(&self) -> bool {
        (self.x - self.dest_x).abs() < SPRITE_SCALE && (self.y - self.dest_y).abs() < SPRITE_SCALE
    }
}

#[derive(Resource, Default, Clone)]
pub struct SpriteList {
    sprites: Vec<Sprite>,
}

impl SpriteList {
    pub fn spawn(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    pub fn count_of(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }

    pub fn find(&self, kind: SpriteKind) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.kind == kind)
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn sprites_mut(&mut self) -> &mut [Sprite] {
        &mut self.sprites
    }

    pub fn restore(&mut self, sprites: Vec<Sprite>) {
        self.sprites = sprites;
    }
}

/// Advance every sprite one tick, then swap-remove the dead.
pub fn tick_sprites(sprites: &mut SpriteList, map: &mut TileMap, rng: &mut SimRng) {
    let mut dirtied = false;
    for sprite in &mut sprites.sprites {
        if sprite.is_dead() {
            continue;
        }

        step_toward_dest(sprite);
        sprite.frame = sprite.frame % 8 + 1;

        match sprite.kind {
            SpriteKind::Tornado => {
                dirtied |= chew(map, rng, sprite, false);
                if sprite.at_destination() {
                    retarget_random(sprite, rng);
                }
            }
            SpriteKind::Monster => {
                dirtied |= chew(map, rng, sprite, true);
                if sprite.at_destination() {
                    retarget_random(sprite, rng);
                }
            }
            _ => {}
        }

        sprite.count -= 1;
        if sprite.count <= 0 {
            sprite.frame = 0;
        }
    }

    let mut i = 0;
    while i < sprites.sprites.len() {
        if sprites.sprites[i].is_dead() {
            sprites.sprites.swap_remove(i);
        } else {
            i += 1;
        }
    }

    if dirtied {
        map.bump_serial();
    }
}

fn step_toward_dest(sprite: &mut Sprite) {
    let dx = (sprite.dest_x - sprite.x).signum();
    let dy = (sprite.dest_y - sprite.y).signum();
    sprite.x += dx * sprite.speed;
    sprite.y += dy * sprite.speed;
}

fn retarget_random(sprite: &mut Sprite, rng: &mut SimRng) {
    sprite.dest_x = rng.range(WORLD_W as u16 - 1) as i32 * SPRITE_SCALE;
    sprite.dest_y = rng.range(WORLD_H as u16 - 1) as i32 * SPRITE_SCALE;
}

/// Wreck the cell under the sprite. Zone centers are spared so a pass never
/// leaves a headless zone footprint; the monster sets fires a third of the
/// time.
fn chew(map: &mut TileMap, rng: &mut SimRng, sprite: &Sprite, fiery: bool) -> bool {
    let (tx, ty) = sprite.tile_pos();
    let tile = map.get(tx, ty);
    if !tile.bulldozable() || tile.zone_center() {
        return false;
    }
    let wreck = if fiery && rng.one_in(2) {
        Tile::new(FIREBASE + rng.range(7), ANIMBIT)
    } else {
        Tile::new(RUBBLE + rng.range(3), BULLBIT)
    };
    map.set(tx, ty, wreck);
    true
}
