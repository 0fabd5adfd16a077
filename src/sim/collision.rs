//! Player/tile contact detection
//!
//! Tiles are trigger volumes: a contact is reported once when the player
//! starts overlapping an active tile, never again while it stays inside.
//! Contacts come back as plain values for the tick loop to resolve.

use glam::Vec2;

use super::state::{Tile, TileId};

/// Axis-aligned box given by center and full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = (self.size + other.size) * 0.5;
        d.x < reach.x && d.y < reach.y
    }
}

/// Update touch state and return tiles the player just entered
///
/// Inactive tiles never report and are not tracked as touching. Correct
/// tiles come first so a player straddling two tiles of one row is granted
/// the clearance before the wrong tile is looked at.
pub fn detect_contacts(player: Aabb, tiles: &mut [Tile], tile_size: Vec2) -> Vec<TileId> {
    let mut entered: Vec<(bool, TileId)> = Vec::new();
    for tile in tiles.iter_mut() {
        if !tile.active {
            tile.touching = false;
            continue;
        }
        let overlapping = player.overlaps(&Aabb::new(tile.pos, tile_size));
        if overlapping && !tile.touching {
            entered.push((tile.is_correct, tile.id));
        }
        tile.touching = overlapping;
    }
    entered.sort_by_key(|&(correct, id)| (!correct, id));
    entered.into_iter().map(|(_, id)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: TileId, x: f32, y: f32, is_correct: bool) -> Tile {
        Tile {
            id,
            row_id: 0,
            lane: 0,
            pos: Vec2::new(x, y),
            is_correct,
            label: String::new(),
            active: true,
            passed: false,
            touching: false,
        }
    }

    const TILE: Vec2 = Vec2::new(2.4, 1.2);
    const PLAYER: Vec2 = Vec2::new(0.9, 1.2);

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(2.0));
        assert!(a.overlaps(&Aabb::new(Vec2::new(1.5, 0.0), Vec2::splat(2.0))));
        assert!(!a.overlaps(&Aabb::new(Vec2::new(2.0, 0.0), Vec2::splat(2.0))));
        assert!(!a.overlaps(&Aabb::new(Vec2::new(0.0, 3.0), Vec2::splat(2.0))));
    }

    #[test]
    fn test_contact_fires_on_enter_only() {
        let mut tiles = vec![tile(1, 0.0, 8.0, true)];
        let far = Aabb::new(Vec2::new(0.0, 6.0), PLAYER);
        assert!(detect_contacts(far, &mut tiles, TILE).is_empty());

        let inside = Aabb::new(Vec2::new(0.0, 7.5), PLAYER);
        assert_eq!(detect_contacts(inside, &mut tiles, TILE), vec![1]);
        assert!(detect_contacts(inside, &mut tiles, TILE).is_empty());

        let past = Aabb::new(Vec2::new(0.0, 10.0), PLAYER);
        assert!(detect_contacts(past, &mut tiles, TILE).is_empty());
        assert!(!tiles[0].touching);
    }

    #[test]
    fn test_inactive_tiles_ignored() {
        let mut tiles = vec![tile(1, 0.0, 8.0, false)];
        tiles[0].active = false;
        let inside = Aabb::new(Vec2::new(0.0, 8.0), PLAYER);
        assert!(detect_contacts(inside, &mut tiles, TILE).is_empty());
        assert!(!tiles[0].touching);
    }

    #[test]
    fn test_correct_contacts_first() {
        // Lane spacing 2.0 with 2.4 wide tiles: the gap between lanes overlaps both
        let mut tiles = vec![tile(1, 0.0, 8.0, false), tile(2, 2.0, 8.0, true)];
        let between = Aabb::new(Vec2::new(1.0, 8.0), PLAYER);
        assert_eq!(detect_contacts(between, &mut tiles, TILE), vec![2, 1]);
    }
}
