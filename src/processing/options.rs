//! Mode flags and per-call options.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ProcessingError;
use crate::observability::ProcessingObserver;
use crate::types::Number;

/// Which part of a map entry [`super::process_data`] transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictMode {
    /// Transform keys; values are carried over.
    Keys,
    /// Transform values; keys are carried over.
    #[default]
    Values,
    /// Transform keys and values independently.
    Both,
}

impl DictMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keys => "keys",
            Self::Values => "values",
            Self::Both => "both",
        }
    }
}

impl FromStr for DictMode {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keys" => Ok(Self::Keys),
            "values" => Ok(Self::Values),
            "both" => Ok(Self::Both),
            other => Err(ProcessingError::InvalidDictMode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DictMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of a map entry [`super::filter_data`] tests.
///
/// There is no `Both` here: `Items` hands the predicate the `(key, value)` pair instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Test keys.
    Keys,
    /// Test values.
    #[default]
    Values,
    /// Test `Value::Tuple([key, value])` pairs.
    Items,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keys => "keys",
            Self::Values => "values",
            Self::Items => "items",
        }
    }
}

impl FromStr for FilterMode {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keys" => Ok(Self::Keys),
            "values" => Ok(Self::Values),
            "items" => Ok(Self::Items),
            other => Err(ProcessingError::InvalidDictMode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when transformed keys collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCollisionPolicy {
    /// The later entry's value overwrites; the key keeps its first position.
    #[default]
    LastWins,
    /// Fail with [`ProcessingError::KeyCollision`].
    Reject,
}

/// Options for [`super::process_data_with`].
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct ProcessOptions {
    /// Applies to map inputs only.
    pub dict_mode: DictMode,
    /// Applies to `Keys`/`Both` modes only.
    pub key_collisions: KeyCollisionPolicy,
    /// Optional observer for logging.
    pub observer: Option<Arc<dyn ProcessingObserver>>,
}

impl ProcessOptions {
    pub fn with_dict_mode(mut self, mode: DictMode) -> Self {
        self.dict_mode = mode;
        self
    }

    pub fn with_key_collisions(mut self, policy: KeyCollisionPolicy) -> Self {
        self.key_collisions = policy;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProcessingObserver>) -> Self {
        self.observer = Some(observer);
        self
    }
}

impl fmt::Debug for ProcessOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessOptions")
            .field("dict_mode", &self.dict_mode)
            .field("key_collisions", &self.key_collisions)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

/// Options for [`super::filter_data_with`].
#[derive(Clone, Default)]
pub struct FilterOptions {
    /// Applies to map inputs only.
    pub dict_mode: FilterMode,
    /// Optional observer for logging.
    pub observer: Option<Arc<dyn ProcessingObserver>>,
}

impl FilterOptions {
    pub fn with_dict_mode(mut self, mode: FilterMode) -> Self {
        self.dict_mode = mode;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProcessingObserver>) -> Self {
        self.observer = Some(observer);
        self
    }
}

impl fmt::Debug for FilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOptions")
            .field("dict_mode", &self.dict_mode)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

/// Options for [`super::combine_values`].
#[derive(Clone, Default)]
pub struct CombineOptions {
    /// Joins text values. Defaults to the empty string.
    pub separator: String,
    /// Added before the first numeric value. Ignored when combining text.
    pub start: Number,
    /// Optional observer for logging.
    pub observer: Option<Arc<dyn ProcessingObserver>>,
}

impl CombineOptions {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_start(mut self, start: impl Into<Number>) -> Self {
        self.start = start.into();
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProcessingObserver>) -> Self {
        self.observer = Some(observer);
        self
    }
}

impl fmt::Debug for CombineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombineOptions")
            .field("separator", &self.separator)
            .field("start", &self.start)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{CombineOptions, DictMode, FilterMode, KeyCollisionPolicy, ProcessOptions};
    use crate::error::ProcessingError;
    use crate::types::Number;

    #[test]
    fn dict_mode_parses_known_names() {
        assert_eq!("keys".parse::<DictMode>(), Ok(DictMode::Keys));
        assert_eq!("values".parse::<DictMode>(), Ok(DictMode::Values));
        assert_eq!("both".parse::<DictMode>(), Ok(DictMode::Both));
    }

    #[test]
    fn modes_reject_the_other_functions_flag() {
        assert_eq!(
            "items".parse::<DictMode>(),
            Err(ProcessingError::InvalidDictMode {
                value: "items".to_string()
            })
        );
        assert_eq!(
            "both".parse::<FilterMode>(),
            Err(ProcessingError::InvalidDictMode {
                value: "both".to_string()
            })
        );
    }

    #[test]
    fn mode_parsing_is_case_sensitive() {
        assert!("Keys".parse::<DictMode>().is_err());
        assert!("VALUES".parse::<FilterMode>().is_err());
    }

    #[test]
    fn modes_round_trip_through_serde() {
        assert_eq!(serde_json::to_string(&DictMode::Both).ok().as_deref(), Some("\"both\""));
        let mode: Result<FilterMode, _> = serde_json::from_str("\"items\"");
        assert_eq!(mode.ok(), Some(FilterMode::Items));
        let policy: Result<KeyCollisionPolicy, _> = serde_json::from_str("\"last_wins\"");
        assert_eq!(policy.ok(), Some(KeyCollisionPolicy::LastWins));
        assert!(serde_json::from_str::<DictMode>("\"bogus\"").is_err());
    }

    #[test]
    fn defaults_match_documented_values() {
        let process = ProcessOptions::default();
        assert_eq!(process.dict_mode, DictMode::Values);
        assert_eq!(process.key_collisions, KeyCollisionPolicy::LastWins);
        assert!(process.observer.is_none());

        let combine = CombineOptions::default();
        assert_eq!(combine.separator, "");
        assert_eq!(combine.start, Number::Int64(0));
    }

    #[test]
    fn debug_hides_observer() {
        let opts = CombineOptions::default().with_separator("-").with_start(2.5);
        let rendered = format!("{opts:?}");
        assert!(rendered.contains("observer_set: false"));
        assert!(rendered.contains("Float64(2.5)"));
    }
}
