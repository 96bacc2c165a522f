// File: crates/dashboard-core/src/labels.rs
// Summary: Label sets, the user's label-value selection, and the visibility filter.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label name -> value, in the order the labels were reported.
pub type LabelSet = IndexMap<String, String>;

/// Maps a label name and raw value to the text shown to users.
pub type Prettifier<'a> = &'a dyn Fn(&str, &str) -> String;

/// Current filter selection: label name -> (value -> selected).
///
/// Values missing from the selection are treated as selected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSelection {
    values: IndexMap<String, IndexMap<String, bool>>,
}

impl LabelSelection {
    pub fn new() -> Self { Self::default() }

    /// Builder-style variant of [`LabelSelection::set`].
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>, selected: bool) -> Self {
        self.set(label, value, selected);
        self
    }

    pub fn set(&mut self, label: impl Into<String>, value: impl Into<String>, selected: bool) {
        self.values.entry(label.into()).or_default().insert(value.into(), selected);
    }

    pub fn values_of(&self, label: &str) -> Option<&IndexMap<String, bool>> {
        self.values.get(label)
    }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

/// A series is hidden only when one of its labels has an explicit `false`
/// entry for that exact value.
pub fn is_visible(labels: &LabelSet, selection: &LabelSelection) -> bool {
    labels.iter().all(|(name, value)| {
        !matches!(selection.values_of(name).and_then(|vals| vals.get(value)), Some(false))
    })
}

/// Apply the optional prettifier to one label value.
pub fn display_value<'v>(prettifier: Option<Prettifier<'_>>, name: &str, value: &'v str) -> Cow<'v, str> {
    match prettifier {
        Some(p) => Cow::Owned(p(name, value)),
        None => Cow::Borrowed(value),
    }
}
