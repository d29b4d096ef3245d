use crate::error::ConfigError;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub passes: PassesConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routing: RoutingConfig::default(),
            passes: PassesConfig::default(),
            input: InputConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RoutingConfig {
    #[serde(default = "default_wire_radius")]
    pub wire_radius: i64,
    #[serde(default = "default_mat_width")]
    pub mat_width: i64,
    #[serde(default = "default_precision")]
    pub precision: i64,
    #[serde(default)]
    pub mirror_horizontal: bool,
    #[serde(default)]
    pub mirror_vertical: bool,
    #[serde(default)]
    pub favor_vertical: bool,
    #[serde(default = "default_max_entry_distance")]
    pub max_entry_distance: i64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            wire_radius: default_wire_radius(),
            mat_width: default_mat_width(),
            precision: default_precision(),
            mirror_horizontal: false,
            mirror_vertical: false,
            favor_vertical: false,
            max_entry_distance: default_max_entry_distance(),
        }
    }
}

impl RoutingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("wire_radius", self.wire_radius),
            ("mat_width", self.mat_width),
            ("precision", self.precision),
            ("max_entry_distance", self.max_entry_distance),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PassesConfig {
    #[serde(default = "default_pass_count")]
    pub count: usize,
    #[serde(default = "default_max_wire_length")]
    pub max_wire_length: i64,
    #[serde(default = "default_fills")]
    pub fills: Vec<String>,
}

impl Default for PassesConfig {
    fn default() -> Self {
        Self {
            count: default_pass_count(),
            max_wire_length: default_max_wire_length(),
            fills: default_fills(),
        }
    }
}

impl PassesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_wire_length <= 0 {
            return Err(ConfigError::NonPositive {
                field: "max_wire_length",
                value: self.max_wire_length,
            });
        }
        if self.fills.is_empty() {
            return Err(ConfigError::NoFills);
        }
        Ok(())
    }

    pub fn fill_for(&self, pass: usize) -> &str {
        &self.fills[pass % self.fills.len()]
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct InputConfig {
    #[serde(default = "default_room_file")]
    pub room_file: String,
    #[serde(default = "default_output_report")]
    pub output_report: String,
    #[serde(default = "default_output_image")]
    pub output_image: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            room_file: default_room_file(),
            output_report: default_output_report(),
            output_image: default_output_image(),
        }
    }
}

fn default_wire_radius() -> i64 {
    8
}

fn default_mat_width() -> i64 {
    8
}

fn default_precision() -> i64 {
    1
}

fn default_max_entry_distance() -> i64 {
    200
}

fn default_pass_count() -> usize {
    3
}

fn default_max_wire_length() -> i64 {
    5000
}

fn default_fills() -> Vec<String> {
    vec!["green".to_string(), "blue".to_string(), "yellow".to_string()]
}

fn default_room_file() -> String {
    "inputs/room.txt".to_string()
}

fn default_output_report() -> String {
    "output/layout.txt".to_string()
}

fn default_output_image() -> String {
    "output/layout.png".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.routing.validate().is_ok());
        assert!(config.passes.validate().is_ok());
        assert_eq!(config.passes.fill_for(4), "blue");
    }

    #[test_case(RoutingConfig { wire_radius: 0, ..Default::default() }, "wire_radius"; "zero wire radius")]
    #[test_case(RoutingConfig { mat_width: -3, ..Default::default() }, "mat_width"; "negative mat width")]
    #[test_case(RoutingConfig { precision: 0, ..Default::default() }, "precision"; "zero precision")]
    fn rejects_non_positive(config: RoutingConfig, expected: &str) {
        match config.validate() {
            Err(ConfigError::NonPositive { field, .. }) => assert_eq!(field, expected),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn empty_fills_rejected() {
        let passes = PassesConfig {
            fills: vec![],
            ..Default::default()
        };
        assert_eq!(passes.validate(), Err(ConfigError::NoFills));
    }
}
