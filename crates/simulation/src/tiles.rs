//! The 16-bit map cell: tile character in the low 10 bits, status flags in
//! the high 6. Character ranges are fixed; predicates over them live here so
//! the scan and tool code read as range tests, not magic numbers.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Bit layout
// ---------------------------------------------------------------------------

/// Low 10 bits: tile character.
pub const LOMASK: u16 = 0x03ff;
/// High 6 bits: status flags.
pub const ALLBITS: u16 = 0xfc00;

pub const PWRBIT: u16 = 0x8000;
pub const CONDBIT: u16 = 0x4000;
pub const BURNBIT: u16 = 0x2000;
pub const BULLBIT: u16 = 0x1000;
pub const ANIMBIT: u16 = 0x0800;
pub const ZONEBIT: u16 = 0x0400;

/// Bulldozable and burnable: the default for player-built surface tiles.
pub const BLBN: u16 = BULLBIT | BURNBIT;
/// `BLBN` plus conductive: wires and zone skeletons.
pub const BLBNCN: u16 = BLBN | CONDBIT;

/// Valid characters are `0..TILE_COUNT`.
pub const TILE_COUNT: u16 = 1024;

// ---------------------------------------------------------------------------
// Tile characters
// ---------------------------------------------------------------------------

pub const DIRT: u16 = 0;

// Water occupies 2..=20: open river, channel, and 16 shoreline variants.
pub const RIVER: u16 = 2;
pub const CHANNEL: u16 = 4;
pub const RIVER_EDGE: u16 = 5;
pub const LAST_RIVER_EDGE: u16 = 20;

// Trees occupy 21..=43: 16 edge variants then solid woods.
pub const TREE_BASE: u16 = 21;
pub const WOODS: u16 = 37;
pub const LAST_TREE: u16 = 43;

pub const RUBBLE: u16 = 44;
pub const LAST_RUBBLE: u16 = 47;

pub const FLOOD: u16 = 48;
pub const LAST_FLOOD: u16 = 51;

pub const RADTILE: u16 = 52;

pub const FIREBASE: u16 = 56;
pub const LAST_FIRE: u16 = 63;

// Roads 64..=206. 64/65 are bridges, 66..=76 the canonical connection
// variants, 144..=206 the heavy-traffic bank.
pub const HBRIDGE: u16 = 64;
pub const VBRIDGE: u16 = 65;
pub const ROADS: u16 = 66;
pub const LAST_ROAD: u16 = 206;
pub const HTRFBASE: u16 = 144;

// Wires 208..=222; 210..=220 are the canonical connection variants.
pub const POWERBASE: u16 = 208;
pub const LHPOWER: u16 = 210;
pub const LAST_POWER: u16 = 222;

// Rails 224..=238; 226..=236 are the canonical connection variants.
pub const RAILBASE: u16 = 224;
pub const LHRAIL: u16 = 226;
pub const LAST_RAIL: u16 = 238;

// Residential zones 240..=404.
pub const RESBASE: u16 = 240;
/// Empty residential zone center.
pub const FREEZ: u16 = 244;
pub const HOUSE: u16 = 249;
/// First dense residential center; denser banks step by 9 from here.
pub const RZB: u16 = 265;
pub const LAST_RES: u16 = 404;

pub const HOSPITAL: u16 = 409;
pub const CHURCH: u16 = 418;

// Commercial zones 423..=609.
pub const COMBASE: u16 = 423;
pub const COMCLR: u16 = 427;
pub const CZB: u16 = 436;
pub const LAST_COM: u16 = 609;

// Industrial zones 612..=692.
pub const INDBASE: u16 = 612;
pub const INDCLR: u16 = 616;
pub const IZB: u16 = 625;
pub const LAST_IND: u16 = 692;

// Big buildings. Each N×N footprint is written row-major from its base, so
// the named center sentinel sits at `base + N + 1`.
pub const PORTBASE: u16 = 693;
pub const PORT: u16 = 698;
pub const AIRPORTBASE: u16 = 709;
pub const AIRPORT: u16 = 716;
pub const COALBASE: u16 = 745;
pub const POWERPLANT: u16 = 750;
pub const FIRESTBASE: u16 = 761;
pub const FIRESTATION: u16 = 765;
pub const POLICESTBASE: u16 = 770;
pub const POLICESTATION: u16 = 774;
pub const STADIUMBASE: u16 = 779;
pub const STADIUM: u16 = 784;
pub const FULLSTADIUM: u16 = 800;
pub const NUCLEARBASE: u16 = 811;
pub const NUCLEAR: u16 = 816;

// High-bank decorations used by the park tool.
pub const FOUNTAIN: u16 = 840;
pub const WOODS2: u16 = 869;

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// The six status flags carried in a cell's high bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileFlag {
    Powered,
    Conductive,
    Burnable,
    Bulldozable,
    Animated,
    ZoneCenter,
}

impl TileFlag {
    pub const fn mask(self) -> u16 {
        match self {
            TileFlag::Powered => PWRBIT,
            TileFlag::Conductive => CONDBIT,
            TileFlag::Burnable => BURNBIT,
            TileFlag::Bulldozable => BULLBIT,
            TileFlag::Animated => ANIMBIT,
            TileFlag::ZoneCenter => ZONEBIT,
        }
    }
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// One map cell: a 16-bit word combining character and flags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode,
)]
pub struct Tile(pub u16);

impl Tile {
    pub const fn new(character: u16, flags: u16) -> Self {
        Tile((character & LOMASK) | (flags & ALLBITS))
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Tile character with flags stripped.
    pub const fn character(self) -> u16 {
        self.0 & LOMASK
    }

    pub const fn flag(self, flag: TileFlag) -> bool {
        self.0 & flag.mask() != 0
    }

    #[must_use]
    pub const fn with_flag(self, flag: TileFlag) -> Self {
        Tile(self.0 | flag.mask())
    }

    pub fn set_flag(&mut self, flag: TileFlag, on: bool) {
        if on {
            self.0 |= flag.mask();
        } else {
            self.0 &= !flag.mask();
        }
    }

    pub const fn powered(self) -> bool {
        self.0 & PWRBIT != 0
    }

    pub const fn conductive(self) -> bool {
        self.0 & CONDBIT != 0
    }

    pub const fn burnable(self) -> bool {
        self.0 & BURNBIT != 0
    }

    pub const fn bulldozable(self) -> bool {
        self.0 & BULLBIT != 0
    }

    pub const fn animated(self) -> bool {
        self.0 & ANIMBIT != 0
    }

    pub const fn zone_center(self) -> bool {
        self.0 & ZONEBIT != 0
    }

    // -- Character range predicates ----------------------------------------

    pub const fn is_dirt(self) -> bool {
        self.character() == DIRT
    }

    pub const fn is_water(self) -> bool {
        let c = self.character();
        c >= RIVER && c <= LAST_RIVER_EDGE
    }

    pub const fn is_tree(self) -> bool {
        let c = self.character();
        c >= TREE_BASE && c <= LAST_TREE
    }

    pub const fn is_rubble(self) -> bool {
        let c = self.character();
        c >= RUBBLE && c <= LAST_RUBBLE
    }

    pub const fn is_flood(self) -> bool {
        let c = self.character();
        c >= FLOOD && c <= LAST_FLOOD
    }

    pub const fn is_fire(self) -> bool {
        let c = self.character();
        c >= FIREBASE && c <= LAST_FIRE
    }

    pub const fn is_road(self) -> bool {
        let c = self.character();
        c >= HBRIDGE && c <= LAST_ROAD
    }

    pub const fn is_bridge(self) -> bool {
        let c = self.character();
        c == HBRIDGE || c == VBRIDGE
    }

    pub const fn is_heavy_traffic_road(self) -> bool {
        let c = self.character();
        c >= HTRFBASE && c <= LAST_ROAD
    }

    pub const fn is_wire(self) -> bool {
        let c = self.character();
        c >= POWERBASE && c <= LAST_POWER
    }

    pub const fn is_rail(self) -> bool {
        let c = self.character();
        c >= RAILBASE && c <= LAST_RAIL
    }

    pub const fn is_residential(self) -> bool {
        let c = self.character();
        c >= RESBASE && c <= LAST_RES
    }

    pub const fn is_commercial(self) -> bool {
        let c = self.character();
        c >= COMBASE && c <= LAST_COM
    }

    pub const fn is_industrial(self) -> bool {
        let c = self.character();
        c >= INDBASE && c <= LAST_IND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_partition_the_word() {
        assert_eq!(LOMASK | ALLBITS, 0xffff);
        assert_eq!(LOMASK & ALLBITS, 0);
        assert_eq!(
            PWRBIT | CONDBIT | BURNBIT | BULLBIT | ANIMBIT | ZONEBIT,
            ALLBITS
        );
    }

    #[test]
    fn test_center_sentinels_sit_inside_footprints() {
        // Row-major N×N from base puts the center at base + N + 1.
        assert_eq!(POWERPLANT, COALBASE + 5);
        assert_eq!(NUCLEAR, NUCLEARBASE + 5);
        assert_eq!(PORT, PORTBASE + 5);
        assert_eq!(STADIUM, STADIUMBASE + 5);
        assert_eq!(AIRPORT, AIRPORTBASE + 7);
        // 3×3 zone plops put the named center at base + 4.
        assert_eq!(FREEZ, RESBASE + 4);
        assert_eq!(COMCLR, COMBASE + 4);
        assert_eq!(INDCLR, INDBASE + 4);
        assert_eq!(FIRESTATION, FIRESTBASE + 4);
        assert_eq!(POLICESTATION, POLICESTBASE + 4);
    }

    #[test]
    fn test_flag_roundtrip() {
        let mut t = Tile::new(ROADS, BLBN);
        assert!(t.burnable());
        assert!(t.bulldozable());
        assert!(!t.conductive());
        t.set_flag(TileFlag::Conductive, true);
        assert!(t.conductive());
        t.set_flag(TileFlag::Conductive, false);
        assert!(!t.conductive());
        assert_eq!(t.character(), ROADS);
    }

    #[test]
    fn test_range_predicates() {
        assert!(Tile(RIVER).is_water());
        assert!(Tile(LAST_RIVER_EDGE).is_water());
        assert!(!Tile(TREE_BASE).is_water());
        assert!(Tile(WOODS).is_tree());
        assert!(Tile(ROADS).is_road());
        assert!(Tile(HBRIDGE).is_bridge());
        assert!(Tile(LHPOWER).is_wire());
        assert!(Tile(LHRAIL).is_rail());
        assert!(Tile(FREEZ).is_residential());
        assert!(Tile(COMCLR).is_commercial());
        assert!(Tile(INDCLR).is_industrial());
        assert!(!Tile(DIRT).is_road());
    }

    #[test]
    fn test_characters_below_tile_count() {
        for c in [
            DIRT, RIVER, WOODS, RUBBLE, FLOOD, RADTILE, FIREBASE, ROADS, LHPOWER, LHRAIL,
            FREEZ, HOUSE, RZB, HOSPITAL, CHURCH, COMCLR, CZB, INDCLR, IZB, PORT, AIRPORT,
            POWERPLANT, FIRESTATION, POLICESTATION, STADIUM, FULLSTADIUM, NUCLEAR, FOUNTAIN,
            WOODS2,
        ] {
            assert!(c < TILE_COUNT);
        }
    }
}
