//! Crop overlay selection. At most one crop mask is drawn at a time.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropSelection {
    crops: Vec<String>,
    active: Option<String>,
}

impl CropSelection {
    pub fn new<I, S>(crops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            crops: crops.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    pub fn crops(&self) -> &[String] {
        &self.crops
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Handle a click on a crop tag. Clicking the active crop turns it off;
    /// clicking any other crop replaces the active one.
    pub fn toggle(&mut self, crop: &str) -> Option<&str> {
        if !self.crops.iter().any(|c| c == crop) {
            log::warn!("ignoring unknown crop {crop:?}");
            return self.active();
        }
        if self.active.as_deref() == Some(crop) {
            self.active = None;
        } else {
            self.active = Some(crop.to_string());
        }
        self.active()
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn is_visible(&self, crop: &str) -> bool {
        self.active.as_deref() == Some(crop)
    }

    /// Per-crop visibility flags for the tag row.
    pub fn visibility(&self) -> BTreeMap<String, bool> {
        self.crops
            .iter()
            .map(|c| (c.clone(), self.is_visible(c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CROPS;

    fn visible(selection: &CropSelection) -> Vec<String> {
        selection
            .visibility()
            .into_iter()
            .filter(|(_, v)| *v)
            .map(|(k, _)| k)
            .collect()
    }

    #[test]
    fn switching_crops_keeps_one_visible() {
        let mut selection = CropSelection::new(DEFAULT_CROPS);
        assert!(visible(&selection).is_empty());

        selection.toggle("coffee");
        selection.toggle("cocoa");
        let flags = selection.visibility();
        assert_eq!(flags["coffee"], false);
        assert_eq!(flags["cocoa"], true);
        assert_eq!(visible(&selection), vec!["cocoa".to_string()]);
    }

    #[test]
    fn clicking_active_crop_turns_it_off() {
        let mut selection = CropSelection::new(DEFAULT_CROPS);
        selection.toggle("cocoa");
        assert_eq!(selection.toggle("cocoa"), None);
        assert_eq!(selection.visibility()["cocoa"], false);
        assert!(visible(&selection).is_empty());
    }

    #[test]
    fn unknown_crop_is_ignored() {
        let mut selection = CropSelection::new(DEFAULT_CROPS);
        selection.toggle("maize");
        assert_eq!(selection.toggle("rice"), Some("maize"));
    }
}
