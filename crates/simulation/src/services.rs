//! Station reach maps and the commercial-rate map.
//!
//! Fire and police stations deposit their funded effect into the station
//! maps during the zone scan; phase 15 smooths those deposits into the
//! public reach maps. The commercial-rate map is pure geometry: access to
//! the city center.

use bevy::prelude::*;

use crate::density::CityCenter;
use crate::overlay::{smooth, OverlayMap};

/// Raw station deposits, cleared at the top of each cycle.
#[derive(Resource, Default, Clone)]
pub struct FireStationMap(pub OverlayMap<i16, 8>);

/// Smoothed fire reach, read by the fire spread roll.
#[derive(Resource, Default, Clone)]
pub struct FireStationEffect(pub OverlayMap<i16, 8>);

#[derive(Resource, Default, Clone)]
pub struct PoliceStationMap(pub OverlayMap<i16, 8>);

/// Smoothed police reach, read by the crime scan.
#[derive(Resource, Default, Clone)]
pub struct PoliceStationEffect(pub OverlayMap<i16, 8>);

/// Commercial desirability per 8-block, highest at the city center.
#[derive(Resource, Default, Clone)]
pub struct ComRate(pub OverlayMap<i16, 8>);

/// Three alternating smoothing passes, ending in the effect map.
pub fn smooth_station_reach(station: &mut OverlayMap<i16, 8>, effect: &mut OverlayMap<i16, 8>) {
    smooth(station, effect);
    smooth(effect, station);
    smooth(station, effect);
}

pub fn fire_analysis(station: &mut FireStationMap, effect: &mut FireStationEffect) {
    smooth_station_reach(&mut station.0, &mut effect.0);
}

pub fn police_analysis(station: &mut PoliceStationMap, effect: &mut PoliceStationEffect) {
    smooth_station_reach(&mut station.0, &mut effect.0);
}

pub fn compute_com_rate(com_rate: &mut ComRate, center: &CityCenter) {
    for x in 0..OverlayMap::<i16, 8>::WIDTH as i32 {
        for y in 0..OverlayMap::<i16, 8>::HEIGHT as i32 {
            let dist = center.manhattan_to(x * 8 + 4, y * 8 + 4);
            com_rate.0.set(x, y, (64 - dist as i16 / 4).max(0));
        }
    }
}
