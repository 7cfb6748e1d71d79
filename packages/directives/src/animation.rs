//! Animation timeline configuration.
//!
//! `anim` directives in the body markdown are presence/identity markers
//! only. The authoritative timeline lives in a YAML frontmatter block and
//! is linked to directives by id, so document order and playback order can
//! diverge freely. This module owns the frontmatter schema and the derived
//! timeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnimationConfigError {
    #[error("invalid animation frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntranceEffect {
    #[default]
    None,
    FadeIn,
    SlideIn,
    ZoomIn,
    BounceIn,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationTrigger {
    #[default]
    OnSlideOpen,
    AfterPrevious,
    WithPrevious,
    OnClick,
}

/// One timeline entry, linked to an `anim` directive by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationEntry {
    pub id: String,
    pub order: u32,
    #[serde(default)]
    pub entrance_effect: EntranceEffect,
    #[serde(default)]
    pub trigger: AnimationTrigger,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub delay: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_duration() -> f64 {
    0.5
}

fn default_enabled() -> bool {
    true
}

/// Frontmatter animation block: `animations: [...]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default)]
    pub animations: Vec<AnimationEntry>,
}

impl AnimationConfig {
    /// Parse the YAML frontmatter body (without delimiters).
    ///
    /// An empty or animation-less frontmatter yields an empty config.
    pub fn from_frontmatter(yaml: &str) -> Result<Self, AnimationConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Playback timeline: enabled entries, sorted by `order`.
    ///
    /// This, not document position, is the presentation order of `anim`
    /// directives.
    pub fn timeline(&self) -> Vec<&AnimationEntry> {
        let mut entries: Vec<&AnimationEntry> =
            self.animations.iter().filter(|a| a.enabled).collect();
        entries.sort_by_key(|a| a.order);
        entries
    }

    /// Entry for a directive id
    pub fn entry(&self, id: &str) -> Option<&AnimationEntry> {
        self.animations.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONTMATTER: &str = "\
animations:
  - id: anim_fadeIn_1
    order: 2
    entranceEffect: fadeIn
    trigger: onSlideOpen
    duration: 0.5
    delay: 0
    enabled: true
  - id: anim_slideIn_2
    order: 1
    entranceEffect: slideIn
  - id: anim_disabled
    order: 0
    enabled: false
";

    #[test]
    fn test_parse_frontmatter() {
        let config = AnimationConfig::from_frontmatter(FRONTMATTER).unwrap();
        assert_eq!(config.animations.len(), 3);

        let entry = config.entry("anim_fadeIn_1").unwrap();
        assert_eq!(entry.entrance_effect, EntranceEffect::FadeIn);
        assert_eq!(entry.trigger, AnimationTrigger::OnSlideOpen);
        assert!((entry.duration - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_timeline_is_order_sorted_and_skips_disabled() {
        let config = AnimationConfig::from_frontmatter(FRONTMATTER).unwrap();
        let ids: Vec<&str> = config.timeline().iter().map(|a| a.id.as_str()).collect();
        // disabled entry excluded; order field wins over document order
        assert_eq!(ids, vec!["anim_slideIn_2", "anim_fadeIn_1"]);
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            AnimationConfig::from_frontmatter("animations:\n  - id: a\n    order: 1\n").unwrap();
        let entry = config.entry("a").unwrap();
        assert_eq!(entry.entrance_effect, EntranceEffect::None);
        assert!(entry.enabled);
        assert!((entry.duration - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_frontmatter_is_empty_config() {
        let config = AnimationConfig::from_frontmatter("").unwrap();
        assert!(config.animations.is_empty());
        assert!(config.timeline().is_empty());
    }

    #[test]
    fn test_entry_json_roundtrip() {
        // entries also travel between layers as JSON
        let config = AnimationConfig::from_frontmatter(FRONTMATTER).unwrap();
        let json = serde_json::to_string(&config.animations[0]).unwrap();
        assert!(json.contains("\"entranceEffect\":\"fadeIn\""));

        let back: AnimationEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config.animations[0]);
    }

    #[test]
    fn test_unknown_keys_tolerated() {
        // app layers add keys like directiveId; they must not break parsing
        let yaml = "animations:\n  - id: a\n    order: 1\n    directiveId: a\n";
        let config = AnimationConfig::from_frontmatter(yaml).unwrap();
        assert_eq!(config.animations.len(), 1);
    }
}
