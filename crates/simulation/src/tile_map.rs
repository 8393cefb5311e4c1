//! The 120×100 cell grid.
//!
//! Cells are stored column-major (`x * H + y`). Out-of-bounds reads return
//! the zero tile and out-of-bounds writes are dropped; the smoothing kernels
//! and neighbor probes rely on both.

use bevy::prelude::*;

use crate::config::{WORLD_H, WORLD_W};
use crate::tiles::Tile;

#[derive(Resource, Clone)]
pub struct TileMap {
    cells: Vec<Tile>,
    /// Bumped on every externally visible mutation; the renderer polls it to
    /// know when to repaint.
    serial: u64,
}

impl Default for TileMap {
    fn default() -> Self {
        Self {
            cells: vec![Tile::default(); WORLD_W * WORLD_H],
            serial: 0,
        }
    }
}

impl TileMap {
    #[inline]
    pub fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < WORLD_W && y >= 0 && (y as usize) < WORLD_H
    }

    #[inline]
    fn index(x: i32, y: i32) -> usize {
        x as usize * WORLD_H + y as usize
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Tile {
        if Self::in_bounds(x, y) {
            self.cells[Self::index(x, y)]
        } else {
            Tile::default()
        }
    }

    /// Raw cell word, for the renderer.
    #[inline]
    pub fn get_tile(&self, x: i32, y: i32) -> u16 {
        self.get(x, y).raw()
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if Self::in_bounds(x, y) {
            self.cells[Self::index(x, y)] = tile;
        }
    }

    /// Rectangular read in row-major order. Out-of-bounds cells read as zero.
    pub fn get_region(&self, x: i32, y: i32, w: u32, h: u32) -> Vec<u16> {
        let mut out = Vec::with_capacity((w * h) as usize);
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                out.push(self.get_tile(x + dx, y + dy));
            }
        }
        out
    }

    pub fn fill(&mut self, tile: Tile) {
        self.cells.fill(tile);
    }

    pub fn clear(&mut self) {
        self.fill(Tile::default());
    }

    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Tile] {
        &mut self.cells
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Record an externally visible mutation.
    pub fn bump_serial(&mut self) {
        self.serial += 1;
    }

    pub fn restore(&mut self, cells: Vec<Tile>, serial: u64) {
        debug_assert_eq!(cells.len(), WORLD_W * WORLD_H);
        self.cells = cells;
        self.serial = serial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{Tile, BLBN, ROADS};

    #[test]
    fn test_column_major_storage() {
        let mut map = TileMap::default();
        map.set(3, 7, Tile::new(ROADS, BLBN));
        assert_eq!(map.cells()[3 * WORLD_H + 7].character(), ROADS);
    }

    #[test]
    fn test_oob_reads_zero() {
        let map = TileMap::default();
        assert_eq!(map.get_tile(-1, 0), 0);
        assert_eq!(map.get_tile(0, -1), 0);
        assert_eq!(map.get_tile(WORLD_W as i32, 0), 0);
        assert_eq!(map.get_tile(0, WORLD_H as i32), 0);
    }

    #[test]
    fn test_oob_writes_ignored() {
        let mut map = TileMap::default();
        map.set(-1, 5, Tile::new(ROADS, 0));
        map.set(WORLD_W as i32, 5, Tile::new(ROADS, 0));
        assert!(map.cells().iter().all(|t| t.raw() == 0));
    }

    #[test]
    fn test_get_region_row_major() {
        let mut map = TileMap::default();
        map.set(10, 10, Tile(1));
        map.set(11, 10, Tile(2));
        map.set(10, 11, Tile(3));
        let region = map.get_region(10, 10, 2, 2);
        assert_eq!(region, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_region_clips_at_edge() {
        let map = TileMap::default();
        let region = map.get_region(WORLD_W as i32 - 1, 0, 3, 1);
        assert_eq!(region.len(), 3);
        assert_eq!(region[1], 0);
        assert_eq!(region[2], 0);
    }

    #[test]
    fn test_serial_only_moves_forward() {
        let mut map = TileMap::default();
        let s0 = map.serial();
        map.bump_serial();
        map.bump_serial();
        assert_eq!(map.serial(), s0 + 2);
    }
}
