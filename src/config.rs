use crate::ids::IdList;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const JUSTIFY_CODE: i32 = 10;

/// Panel alignment as stored in the `alignment` integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Alignment {
    #[default]
    Center,
    Left,
    Right,
    Top,
    Bottom,
    /// Fill the whole panel length; enables splitters.
    Justify,
}

impl Alignment {
    pub fn is_justify(self) -> bool {
        self == Alignment::Justify
    }
}

impl From<i32> for Alignment {
    fn from(code: i32) -> Self {
        match code {
            0 => Alignment::Center,
            1 => Alignment::Left,
            2 => Alignment::Right,
            3 => Alignment::Top,
            4 => Alignment::Bottom,
            JUSTIFY_CODE => Alignment::Justify,
            other => {
                warn!("unknown panel alignment {other}, falling back to center");
                Alignment::Center
            }
        }
    }
}

impl From<Alignment> for i32 {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::Center => 0,
            Alignment::Left => 1,
            Alignment::Right => 2,
            Alignment::Top => 3,
            Alignment::Bottom => 4,
            Alignment::Justify => JUSTIFY_CODE,
        }
    }
}

/// Persisted panel layout fields.
///
/// Field names follow the containment configuration keys so that an exported
/// config stays readable next to the host's own settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfig {
    #[serde(default)]
    pub applet_order: IdList,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default, with = "splitter_position")]
    pub splitter_position: Option<usize>,
    #[serde(default, with = "splitter_position")]
    pub splitter_position2: Option<usize>,
    #[serde(default)]
    pub locked_zoom_applets: IdList,
    #[serde(default)]
    pub user_blocks_colorizing_applets: IdList,
}

impl PanelConfig {
    pub fn splitter_positions(&self) -> [Option<usize>; 2] {
        [self.splitter_position, self.splitter_position2]
    }
}

/// `Option<usize>` stored as an integer where `-1` means unset.
mod splitter_position {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = value.and_then(|v| i64::try_from(v).ok()).unwrap_or(-1);
        serializer.serialize_i64(raw)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(usize::try_from(raw).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: PanelConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PanelConfig::default());
        assert_eq!(config.splitter_positions(), [None, None]);
        assert_eq!(config.alignment, Alignment::Center);
    }

    #[test]
    fn reads_containment_keys() {
        let raw = r#"{
            "appletOrder": "3;1;2",
            "alignment": 10,
            "splitterPosition": 1,
            "splitterPosition2": -1,
            "lockedZoomApplets": "1",
            "userBlocksColorizingApplets": ""
        }"#;
        let config: PanelConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.applet_order.encode(), "3;1;2");
        assert!(config.alignment.is_justify());
        assert_eq!(config.splitter_positions(), [Some(1), None]);
        assert_eq!(config.locked_zoom_applets.entries(), &["1"]);
        assert!(config.user_blocks_colorizing_applets.is_empty());
    }

    #[test]
    fn unset_splitters_are_written_as_minus_one() {
        let config = PanelConfig {
            alignment: Alignment::Justify,
            splitter_position: Some(4),
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["alignment"], 10);
        assert_eq!(value["splitterPosition"], 4);
        assert_eq!(value["splitterPosition2"], -1);
    }

    #[test]
    fn unknown_alignment_code_is_center() {
        assert_eq!(Alignment::from(7), Alignment::Center);
        assert_eq!(i32::from(Alignment::Justify), 10);
    }
}
