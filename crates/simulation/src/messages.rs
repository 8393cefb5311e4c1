//! Player-facing messages.
//!
//! Simulation code pushes into the bounded [`MessageLog`]; a PostSim system
//! pumps new entries out as [`SimMessage`] events so a UI can subscribe
//! without polling. Important messages carry map coordinates the UI may
//! center on.

use std::collections::VecDeque;

use bevy::prelude::*;

/// One message, as delivered to the UI.
#[derive(Event, Clone, Debug, PartialEq)]
pub struct SimMessage {
    pub text: String,
    pub location: Option<(i32, i32)>,
    pub important: bool,
    pub city_time: u64,
}

const LOG_CAPACITY: usize = 64;

/// Rolling log of recent messages, newest last.
#[derive(Resource, Default)]
pub struct MessageLog {
    entries: VecDeque<SimMessage>,
    pumped: u64,
    pushed: u64,
}

impl MessageLog {
    pub fn push(&mut self, text: impl Into<String>, city_time: u64) {
        self.push_at(text, None, false, city_time);
    }

    pub fn push_important(
        &mut self,
        text: impl Into<String>,
        location: (i32, i32),
        city_time: u64,
    ) {
        self.push_at(text, Some(location), true, city_time);
    }

    pub fn push_at(
        &mut self,
        text: impl Into<String>,
        location: Option<(i32, i32)>,
        important: bool,
        city_time: u64,
    ) {
        if self.entries.len() == LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(SimMessage {
            text: text.into(),
            location,
            important,
            city_time,
        });
        self.pushed += 1;
    }

    pub fn entries(&self) -> impl Iterator<Item = &SimMessage> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&SimMessage> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.pumped = self.pushed;
    }

    /// Messages pushed since the last pump, oldest first.
    fn unpumped(&mut self) -> Vec<SimMessage> {
        let fresh = (self.pushed - self.pumped) as usize;
        self.pumped = self.pushed;
        let len = self.entries.len();
        self.entries
            .iter()
            .skip(len.saturating_sub(fresh))
            .cloned()
            .collect()
    }
}

/// PostSim: forward newly logged messages as events.
pub fn pump_messages(mut log: ResMut<MessageLog>, mut events: EventWriter<SimMessage>) {
    for msg in log.unpumped() {
        events.send(msg);
    }
}

/// Phase-10 advisor: surface the first standing problem that wasn't already
/// the last thing said, so the log doesn't fill with one repeated complaint.
#[allow(clippy::too_many_arguments)]
pub fn send_periodic_messages(
    log: &mut MessageLog,
    census: &crate::census::CensusCounts,
    valves: &crate::zones::Valves,
    budget: &crate::budget::Budget,
    effects: &crate::budget::FundEffects,
    pollution_average: u8,
    crime_average: u8,
    city_time: u64,
) {
    if city_time % 4 != 0 {
        return;
    }

    let has_plant = census.coal_pop + census.nuclear_pop > 0;
    let candidates: [(bool, &str); 10] = [
        (budget.total_funds < 0, "The city treasury is empty!"),
        (
            census.total_zones() > 0 && !has_plant,
            "Citizens demand a power plant!",
        ),
        (
            census.unpowered_zones > census.powered_zones && census.unpowered_zones > 0,
            "Brownouts! Power lines may be down, or you need another plant.",
        ),
        (
            effects.road < 20,
            "Roads are deteriorating due to lack of funds!",
        ),
        (effects.fire < 700, "Fire departments need funding!"),
        (effects.police < 700, "Police departments need funding!"),
        (
            budget.city_tax > 12,
            "Citizens are upset: the tax rate is too high!",
        ),
        (pollution_average > 60, "Pollution is very high!"),
        (crime_average > 100, "Crime is very high!"),
        (
            valves.res > 1000 && census.res_zones == 0,
            "More residential zones needed.",
        ),
    ];

    for (standing, text) in candidates {
        if !standing {
            continue;
        }
        if log.latest().map(|m| m.text == text).unwrap_or(false) {
            continue;
        }
        log.push(text, city_time);
        return;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = MessageLog::default();
        for i in 0..100 {
            log.push(format!("m{i}"), i);
        }
        assert_eq!(log.entries().count(), LOG_CAPACITY);
        assert_eq!(log.latest().unwrap().text, "m99");
    }

    #[test]
    fn test_unpumped_returns_only_new() {
        let mut log = MessageLog::default();
        log.push("a", 0);
        log.push("b", 0);
        assert_eq!(log.unpumped().len(), 2);
        log.push("c", 1);
        let fresh = log.unpumped();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].text, "c");
        assert!(log.unpumped().is_empty());
    }

    #[test]
    fn test_important_carries_location() {
        let mut log = MessageLog::default();
        log.push_important("Nuclear meltdown!", (12, 34), 7);
        let msg = log.latest().unwrap();
        assert!(msg.important);
        assert_eq!(msg.location, Some((12, 34)));
    }
}
