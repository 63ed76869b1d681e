/// Completed lines of the running test, newest last.
#[derive(Clone, Debug, Default)]
pub struct SessionHistory {
    references: Vec<String>,
    inputs: Vec<String>,
    previous: Option<(String, String)>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_current_line(&mut self, reference: String, input: String) {
        self.previous = Some((reference.clone(), input.clone()));
        self.references.push(reference);
        self.inputs.push(input);
    }

    pub fn can_go_back(&self) -> bool {
        let has_previous = self
            .previous
            .as_ref()
            .is_some_and(|(reference, _)| !reference.is_empty());
        has_previous && !self.references.is_empty()
    }

    /// Pop the newest completed line. `None` when there is nothing to go
    /// back to.
    pub fn go_back(&mut self) -> Option<(String, String)> {
        if !self.can_go_back() {
            return None;
        }
        let reference = self.references.pop()?;
        let input = self.inputs.pop()?;
        self.previous = match (self.references.last(), self.inputs.last()) {
            (Some(r), Some(i)) => Some((r.clone(), i.clone())),
            _ => None,
        };
        Some((reference, input))
    }

    pub fn previous(&self) -> Option<(&str, &str)> {
        self.previous
            .as_ref()
            .map(|(reference, input)| (reference.as_str(), input.as_str()))
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn clear(&mut self) {
        self.references.clear();
        self.inputs.clear();
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_parallel(history: &SessionHistory) {
        assert_eq!(history.references().len(), history.inputs().len());
    }

    #[test]
    fn test_empty_history_cannot_go_back() {
        let mut history = SessionHistory::new();
        assert!(!history.can_go_back());
        assert_eq!(history.go_back(), None);
        assert_parallel(&history);
    }

    #[test]
    fn test_save_then_go_back_restores_pair() {
        let mut history = SessionHistory::new();
        history.save_current_line("abc".to_string(), "abd".to_string());
        assert_parallel(&history);
        assert!(history.can_go_back());
        assert_eq!(
            history.go_back(),
            Some(("abc".to_string(), "abd".to_string()))
        );
        assert_parallel(&history);
        assert!(history.is_empty());
        assert!(!history.can_go_back());
        assert_eq!(history.previous(), None);
    }

    #[test]
    fn test_go_back_rederives_previous_from_tail() {
        let mut history = SessionHistory::new();
        history.save_current_line("one".to_string(), "one".to_string());
        history.save_current_line("two".to_string(), "twx".to_string());
        assert_eq!(history.previous(), Some(("two", "twx")));

        history.go_back();
        assert_eq!(history.previous(), Some(("one", "one")));
        assert!(history.can_go_back());
        assert_eq!(history.len(), 1);

        history.go_back();
        assert!(!history.can_go_back());
        assert_parallel(&history);
    }

    #[test]
    fn test_can_go_back_is_idempotent() {
        let mut history = SessionHistory::new();
        history.save_current_line("line".to_string(), "line".to_string());
        for _ in 0..5 {
            assert!(history.can_go_back());
        }
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_empty_reference_blocks_going_back() {
        let mut history = SessionHistory::new();
        history.save_current_line(String::new(), String::new());
        assert!(!history.can_go_back());
        assert_eq!(history.go_back(), None);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut history = SessionHistory::new();
        history.save_current_line("a".to_string(), "a".to_string());
        history.clear();
        assert!(history.is_empty());
        assert!(!history.can_go_back());
    }
}
