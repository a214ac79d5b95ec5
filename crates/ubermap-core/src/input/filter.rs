// Ubermap Input Layer - Device Filtering
// Allow-list checks and name/path matching for device selection

/// Device-name substrings a mapping is allowed to run on.
///
/// An empty list accepts any device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceAllowList {
    patterns: Vec<String>,
}

impl DeviceAllowList {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    pub fn any() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn permits(&self, device_name: &str) -> bool {
        self.is_empty() || self.patterns.iter().any(|p| device_name.contains(p.as_str()))
    }
}

/// Whether a `--device` value names a path rather than a device name.
pub fn is_device_path(query: &str) -> bool {
    query.starts_with('/')
}

/// Pick the device a query refers to among `(name, path)` candidates.
///
/// Paths match exactly. Names match exactly first, then as a substring;
/// the first candidate wins in both passes.
pub fn select_device<'a>(query: &str, candidates: &'a [(String, String)]) -> Option<&'a str> {
    if is_device_path(query) {
        return candidates
            .iter()
            .find(|(_, path)| path == query)
            .map(|(_, path)| path.as_str());
    }
    candidates
        .iter()
        .find(|(name, _)| name == query)
        .or_else(|| candidates.iter().find(|(name, _)| name.contains(query)))
        .map(|(_, path)| path.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<(String, String)> {
        vec![
            ("AT Translated Set 2 keyboard".into(), "/dev/input/event3".into()),
            ("Keychron K2".into(), "/dev/input/event7".into()),
            ("Keychron K2 Keyboard".into(), "/dev/input/event8".into()),
        ]
    }

    #[test]
    fn test_empty_allow_list_permits_all() {
        let allow = DeviceAllowList::any();
        assert!(allow.permits("Anything"));
        assert!(DeviceAllowList::new([""]).is_empty());
    }

    #[test]
    fn test_allow_list_substring() {
        let allow = DeviceAllowList::new(["Ultimate Hacking Keyboard"]);
        assert!(allow.permits("Ultimate Gadget Laboratories Ultimate Hacking Keyboard"));
        assert!(!allow.permits("Keychron K2"));
    }

    #[test]
    fn test_select_by_path() {
        let c = candidates();
        assert_eq!(select_device("/dev/input/event7", &c), Some("/dev/input/event7"));
        assert_eq!(select_device("/dev/input/event99", &c), None);
    }

    #[test]
    fn test_exact_name_beats_substring() {
        let c = candidates();
        assert_eq!(select_device("Keychron K2", &c), Some("/dev/input/event7"));
        assert_eq!(select_device("K2 Keyboard", &c), Some("/dev/input/event8"));
    }

    #[test]
    fn test_no_name_match() {
        assert_eq!(select_device("Model M", &candidates()), None);
    }
}
