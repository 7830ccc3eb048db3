use super::TagMask;
use serde::{Deserialize, Serialize};

/// Placement applied to new windows whose class, instance and title all match.
///
/// Unset patterns match anything; set ones match as substrings.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rule {
    pub class: Option<String>,
    pub instance: Option<String>,
    pub title: Option<String>,
    /// Tags to place matching windows on. Empty keeps the current view.
    #[serde(default)]
    pub tags: TagMask,
    #[serde(default)]
    pub floating: bool,
}

impl Rule {
    pub fn matches(&self, class: &str, instance: &str, title: &str) -> bool {
        fn part(pattern: Option<&String>, value: &str) -> bool {
            pattern.map_or(true, |p| value.contains(p.as_str()))
        }
        part(self.title.as_ref(), title)
            && part(self.class.as_ref(), class)
            && part(self.instance.as_ref(), instance)
    }
}
