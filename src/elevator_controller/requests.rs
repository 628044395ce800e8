use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::time::Instant;

use crossbeam_channel as cbc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Inside,
    Outside,
}

/// A single validated button press, stamped when it was made.
#[derive(Debug, Clone, Copy)]
pub struct ButtonPress {
    pub floor: u8,
    pub pressed_at: Instant,
    pub origin: Origin,
}

impl ButtonPress {
    pub fn inside(floor: u8) -> Self {
        ButtonPress {
            floor,
            pressed_at: Instant::now(),
            origin: Origin::Inside,
        }
    }

    pub fn outside(floor: u8) -> Self {
        ButtonPress {
            floor,
            pressed_at: Instant::now(),
            origin: Origin::Outside,
        }
    }
}

/// Rejected floor number, reported to the caller of the intake API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidFloor {
    pub floor: u8,
    pub floors_count: u8,
}

impl fmt::Display for InvalidFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The floor number should be from 1 to {}, input {}",
            self.floors_count, self.floor
        )
    }
}

impl Error for InvalidFloor {}

/// Elevator controls exposed to a user. Cheap to clone; every clone feeds
/// the same controller queue and may be used from its own thread.
#[derive(Debug, Clone)]
pub struct ElevatorControls {
    request_tx: cbc::Sender<ButtonPress>,
    floors_count: u8,
}

impl ElevatorControls {
    pub(crate) fn new(request_tx: cbc::Sender<ButtonPress>, floors_count: u8) -> Self {
        ElevatorControls {
            request_tx,
            floors_count,
        }
    }

    /// Button inside the elevator car. A press after the controller has
    /// shut down is dropped.
    pub fn press_inside(&self, floor: u8) -> Result<(), InvalidFloor> {
        self.assert_valid(floor)?;
        let _ = self.request_tx.send(ButtonPress::inside(floor));
        Ok(())
    }

    /// Call button on a floor outside the car.
    pub fn press_outside(&self, floor: u8) -> Result<(), InvalidFloor> {
        self.assert_valid(floor)?;
        let _ = self.request_tx.send(ButtonPress::outside(floor));
        Ok(())
    }

    pub fn floors_count(&self) -> u8 {
        self.floors_count
    }

    fn assert_valid(&self, floor: u8) -> Result<(), InvalidFloor> {
        if floor < 1 || floor > self.floors_count {
            return Err(InvalidFloor {
                floor,
                floors_count: self.floors_count,
            });
        }
        Ok(())
    }
}

/// Unserved requests, one floor -> earliest-press map per origin. Owned by
/// the controller worker alone; producers only ever reach it through the
/// request queue.
#[derive(Debug, Default)]
pub struct PendingRequests {
    inside: HashMap<u8, ButtonPress>,
    outside: HashMap<u8, ButtonPress>,
}

impl PendingRequests {
    pub fn new() -> Self {
        PendingRequests::default()
    }

    /// Merges a drained press into its origin's map. Duplicate presses for
    /// the same floor coalesce, first timestamp wins.
    pub fn collect(&mut self, press: ButtonPress) {
        let set = match press.origin {
            Origin::Inside => &mut self.inside,
            Origin::Outside => &mut self.outside,
        };
        set.entry(press.floor).or_insert(press);
    }

    pub fn has(&self, origin: Origin) -> bool {
        !self.set(origin).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.inside.is_empty() && self.outside.is_empty()
    }

    pub fn contains(&self, floor: u8) -> bool {
        self.inside.contains_key(&floor) || self.outside.contains_key(&floor)
    }

    /// The car has serviced this floor; both origins are done with it.
    pub fn clear_floor(&mut self, floor: u8) {
        self.inside.remove(&floor);
        self.outside.remove(&floor);
    }

    pub fn earliest(&self, origin: Origin) -> Option<&ButtonPress> {
        self.set(origin).values().min_by_key(|press| press.pressed_at)
    }

    /// Lowest pending floor across both origins, `default` when none.
    pub fn lowest_floor(&self, default: u8) -> u8 {
        self.inside
            .keys()
            .chain(self.outside.keys())
            .min()
            .copied()
            .unwrap_or(default)
    }

    /// Highest pending floor across both origins, `default` when none.
    pub fn highest_floor(&self, default: u8) -> u8 {
        self.inside
            .keys()
            .chain(self.outside.keys())
            .max()
            .copied()
            .unwrap_or(default)
    }

    fn set(&self, origin: Origin) -> &HashMap<u8, ButtonPress> {
        match origin {
            Origin::Inside => &self.inside,
            Origin::Outside => &self.outside,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn press_at(floor: u8, origin: Origin, pressed_at: Instant) -> ButtonPress {
        ButtonPress {
            floor,
            pressed_at,
            origin,
        }
    }

    #[test]
    fn controls_accept_floors_within_the_building() {
        let (request_tx, request_rx) = cbc::unbounded();
        let controls = ElevatorControls::new(request_tx, 7);

        assert_eq!(controls.press_inside(1), Ok(()));
        assert_eq!(controls.press_outside(7), Ok(()));

        let first = request_rx.try_recv().unwrap();
        assert_eq!(first.floor, 1);
        assert_eq!(first.origin, Origin::Inside);
        let second = request_rx.try_recv().unwrap();
        assert_eq!(second.floor, 7);
        assert_eq!(second.origin, Origin::Outside);
    }

    #[test]
    fn controls_reject_floors_outside_the_building() {
        let (request_tx, request_rx) = cbc::unbounded();
        let controls = ElevatorControls::new(request_tx, 7);

        let expected = Err(InvalidFloor {
            floor: 0,
            floors_count: 7,
        });
        assert_eq!(controls.press_inside(0), expected);
        assert_eq!(
            controls.press_outside(8),
            Err(InvalidFloor {
                floor: 8,
                floors_count: 7,
            })
        );
        assert!(request_rx.try_recv().is_err());
    }

    #[test]
    fn duplicate_presses_coalesce_to_the_first_timestamp() {
        let mut pending = PendingRequests::new();
        let base = Instant::now();
        let first = base + Duration::from_millis(5);
        let repeat = base + Duration::from_millis(9);

        pending.collect(press_at(3, Origin::Inside, first));
        pending.collect(press_at(3, Origin::Inside, repeat));

        let kept = pending.earliest(Origin::Inside).unwrap();
        assert_eq!(kept.floor, 3);
        assert_eq!(kept.pressed_at, first);
    }

    #[test]
    fn earliest_press_wins_within_an_origin() {
        let mut pending = PendingRequests::new();
        let base = Instant::now();

        pending.collect(press_at(5, Origin::Outside, base + Duration::from_millis(2)));
        pending.collect(press_at(2, Origin::Outside, base + Duration::from_millis(8)));

        assert_eq!(pending.earliest(Origin::Outside).unwrap().floor, 5);
        assert!(pending.earliest(Origin::Inside).is_none());
    }

    #[test]
    fn origins_keep_separate_maps_but_share_floor_queries() {
        let mut pending = PendingRequests::new();
        let base = Instant::now();

        pending.collect(press_at(4, Origin::Inside, base));
        pending.collect(press_at(4, Origin::Outside, base));
        assert!(pending.contains(4));
        assert!(pending.has(Origin::Inside));
        assert!(pending.has(Origin::Outside));

        pending.clear_floor(4);
        assert!(!pending.contains(4));
        assert!(pending.is_empty());
    }

    #[test]
    fn sweep_bounds_fall_back_to_defaults_when_empty() {
        let mut pending = PendingRequests::new();
        assert_eq!(pending.lowest_floor(7), 7);
        assert_eq!(pending.highest_floor(1), 1);

        let base = Instant::now();
        pending.collect(press_at(3, Origin::Inside, base));
        pending.collect(press_at(6, Origin::Outside, base));
        assert_eq!(pending.lowest_floor(7), 3);
        assert_eq!(pending.highest_floor(1), 6);
    }
}
