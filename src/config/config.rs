use std::env;
use std::fs;
use std::time;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FLOORS_COUNT: u8 = 7;
pub const DEFAULT_INITIAL_FLOOR: u8 = 1;
pub const DEFAULT_FLOOR_HEIGHT_METERS: f32 = 10.0;
pub const DEFAULT_LIFT_SPEED_MPS: f32 = 1.0;
pub const DEFAULT_DOOR_OPEN_CLOSE_TIME_MS: u64 = 2000;

/// Controller configuration. Read-only once the controller is constructed.
/// Floor travel time is derived from floor height and lift speed rather
/// than configured directly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub floors_count: u8,
    pub initial_floor: u8,
    pub floor_height_meters: f32,
    pub lift_speed_meters_per_second: f32,
    pub door_open_close_time_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            floors_count: DEFAULT_FLOORS_COUNT,
            initial_floor: DEFAULT_INITIAL_FLOOR,
            floor_height_meters: DEFAULT_FLOOR_HEIGHT_METERS,
            lift_speed_meters_per_second: DEFAULT_LIFT_SPEED_MPS,
            door_open_close_time_ms: DEFAULT_DOOR_OPEN_CLOSE_TIME_MS,
        }
    }
}

impl Config {
    /// Builds the configuration from the command line: defaults, then an
    /// optional `config=<path>` JSON file, then `key=value` overrides, each
    /// applied in argument order. Malformed override values are skipped
    /// with a notice; a malformed config file aborts startup.
    pub fn from_args() -> Config {
        let mut config = Config::default();
        for argument in env::args().skip(1) {
            config.apply(&argument);
        }
        config.validated()
    }

    pub fn floor_travel_duration(&self) -> time::Duration {
        time::Duration::from_secs_f32(self.floor_height_meters / self.lift_speed_meters_per_second)
    }

    pub fn door_open_close_duration(&self) -> time::Duration {
        time::Duration::from_millis(self.door_open_close_time_ms)
    }

    fn apply(&mut self, argument: &str) {
        if let Some(path) = argument.strip_prefix("config=") {
            let contents = fs::read_to_string(path).expect("failed to read the config file");
            *self = serde_json::from_str(&contents).expect("failed to parse the config file");
        } else if let Some(value) = argument.strip_prefix("floors=") {
            match value.parse::<u8>() {
                Ok(parsed) => self.floors_count = parsed,
                Err(_) => println!("floors {} is not a number, skipping...", value),
            }
        } else if let Some(value) = argument.strip_prefix("floor=") {
            match value.parse::<u8>() {
                Ok(parsed) => self.initial_floor = parsed,
                Err(_) => println!("floor {} is not a number, skipping...", value),
            }
        } else if let Some(value) = argument.strip_prefix("height=") {
            match value.parse::<f32>() {
                Ok(parsed) => self.floor_height_meters = parsed,
                Err(_) => println!("height {} is not a number, skipping...", value),
            }
        } else if let Some(value) = argument.strip_prefix("speed=") {
            match value.parse::<f32>() {
                Ok(parsed) => self.lift_speed_meters_per_second = parsed,
                Err(_) => println!("speed {} is not a number, skipping...", value),
            }
        } else if let Some(value) = argument.strip_prefix("door_ms=") {
            match value.parse::<u64>() {
                Ok(parsed) => self.door_open_close_time_ms = parsed,
                Err(_) => println!("door_ms {} is not a number, skipping...", value),
            }
        } else {
            println!("illegal argument {}, skipping...", argument);
        }
    }

    /// Clamps out-of-range values to the nearest valid ones, with a notice.
    fn validated(mut self) -> Config {
        if self.floors_count < 1 {
            println!("floors_count must be at least 1, using 1");
            self.floors_count = 1;
        }
        if self.initial_floor < 1 || self.initial_floor > self.floors_count {
            println!(
                "initial_floor {} is outside 1..={}, using {}",
                self.initial_floor, self.floors_count, DEFAULT_INITIAL_FLOOR
            );
            self.initial_floor = DEFAULT_INITIAL_FLOOR.min(self.floors_count);
        }
        if !(self.floor_height_meters > 0.0) {
            println!("floor_height_meters must be positive, using the default");
            self.floor_height_meters = DEFAULT_FLOOR_HEIGHT_METERS;
        }
        if !(self.lift_speed_meters_per_second > 0.0) {
            println!("lift_speed_meters_per_second must be positive, using the default");
            self.lift_speed_meters_per_second = DEFAULT_LIFT_SPEED_MPS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn defaults_describe_the_reference_building() {
        let config = Config::default();
        assert_eq!(config.floors_count, 7);
        assert_eq!(config.initial_floor, 1);
        assert_eq!(config.floor_height_meters, 10.0);
        assert_eq!(config.lift_speed_meters_per_second, 1.0);
        assert_eq!(config.door_open_close_time_ms, 2000);
    }

    #[test]
    fn travel_time_is_height_over_speed() {
        let mut config = Config::default();
        assert_eq!(config.floor_travel_duration(), Duration::from_secs(10));

        config.lift_speed_meters_per_second = 2.0;
        assert_eq!(config.floor_travel_duration(), Duration::from_secs(5));
    }

    #[test]
    fn overrides_replace_single_fields() {
        let mut config = Config::default();
        config.apply("floors=9");
        config.apply("door_ms=500");
        assert_eq!(config.floors_count, 9);
        assert_eq!(config.door_open_close_time_ms, 500);

        config.apply("floors=nine");
        assert_eq!(config.floors_count, 9);
    }

    #[test]
    fn validation_clamps_the_initial_floor() {
        let mut config = Config::default();
        config.apply("floors=5");
        config.apply("floor=9");
        let config = config.validated();
        assert_eq!(config.initial_floor, 1);
    }

    #[test]
    fn config_file_fields_are_all_optional() {
        let config: Config = serde_json::from_str(r#"{"floors_count": 4}"#).unwrap();
        assert_eq!(config.floors_count, 4);
        assert_eq!(config.door_open_close_time_ms, 2000);
    }
}
