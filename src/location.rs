use std::sync::Arc;

use crate::cities::CityDataset;

pub const NOT_FOUND: &str = "City Not Found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub city: String,
    pub region: String,
}

impl Candidate {
    pub fn new(city: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            region: region.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(NOT_FOUND, "")
    }

    pub fn is_placeholder(&self) -> bool {
        self.city == NOT_FOUND && self.region.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    Closed,
    Open,
}

pub struct LocationConfig {
    pub dataset: Arc<CityDataset>,
    pub initial_query: Option<String>,
}

pub type SelectHandler = Box<dyn FnMut(&str, &str)>;

pub struct LocationPicker {
    dataset: Arc<CityDataset>,
    text: String,
    candidates: Vec<Candidate>,
    state: Dropdown,
    highlighted: Option<usize>,
    on_select: Option<SelectHandler>,
}

impl std::fmt::Debug for LocationPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationPicker")
            .field("text", &self.text)
            .field("state", &self.state)
            .field("candidates", &self.candidates.len())
            .field("highlighted", &self.highlighted)
            .finish()
    }
}

impl LocationPicker {
    pub fn new(config: LocationConfig) -> Self {
        Self {
            dataset: config.dataset,
            text: config.initial_query.unwrap_or_default(),
            candidates: Vec::new(),
            state: Dropdown::Closed,
            highlighted: None,
            on_select: None,
        }
    }

    pub fn on_select(mut self, handler: impl FnMut(&str, &str) + 'static) -> Self {
        self.on_select = Some(Box::new(handler));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn is_open(&self) -> bool {
        self.state == Dropdown::Open
    }

    pub fn state(&self) -> Dropdown {
        self.state
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if self.text.is_empty() {
            self.state = Dropdown::Closed;
            self.candidates.clear();
            self.highlighted = None;
            return;
        }
        self.refilter();
        self.state = Dropdown::Open;
    }

    pub fn toggle(&mut self) {
        match self.state {
            Dropdown::Open => self.state = Dropdown::Closed,
            Dropdown::Closed => {
                if self.text.is_empty() {
                    self.candidates = self
                        .dataset
                        .flatten()
                        .map(|(city, region)| Candidate::new(city, region))
                        .collect();
                    self.reset_highlight();
                } else {
                    self.refilter();
                }
                self.state = Dropdown::Open;
            }
        }
    }

    pub fn select(&mut self, city: &str, region: &str) -> bool {
        if city == NOT_FOUND && region.is_empty() {
            return false;
        }
        self.text = city.to_string();
        self.state = Dropdown::Closed;
        self.highlighted = None;

        tracing::debug!(city, region, "location selected");
        if let Some(handler) = self.on_select.as_mut() {
            handler(city, region);
        }
        true
    }

    pub fn select_highlighted(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        let Some(candidate) = self.highlighted.and_then(|i| self.candidates.get(i)).cloned() else {
            return false;
        };
        self.select(&candidate.city, &candidate.region)
    }

    pub fn highlight_next(&mut self) {
        self.step_highlight(1);
    }

    pub fn highlight_prev(&mut self) {
        self.step_highlight(-1);
    }

    fn step_highlight(&mut self, delta: isize) {
        let Some(current) = self.highlighted else { return };
        let last = self.candidates.len().saturating_sub(1);
        let next = current.saturating_add_signed(delta).min(last);
        if !self.candidates[next].is_placeholder() {
            self.highlighted = Some(next);
        }
    }

    fn refilter(&mut self) {
        let needle = self.text.to_lowercase();
        let matches: Vec<Candidate> = self
            .dataset
            .flatten()
            .filter(|(city, _)| city.to_lowercase().contains(&needle))
            .map(|(city, region)| Candidate::new(city, region))
            .collect();

        self.candidates = if matches.is_empty() {
            vec![Candidate::not_found()]
        } else {
            matches
        };
        self.reset_highlight();
    }

    fn reset_highlight(&mut self) {
        self.highlighted = self.candidates.iter().position(|c| !c.is_placeholder());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dataset() -> Arc<CityDataset> {
        Arc::new(CityDataset::from_pairs([
            ("Karnataka", vec!["Bengaluru", "Mysuru"]),
            ("Delhi", vec!["New Delhi"]),
        ]))
    }

    fn recording() -> (LocationPicker, Rc<RefCell<Vec<(String, String)>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let picker = LocationPicker::new(LocationConfig {
            dataset: dataset(),
            initial_query: None,
        })
        .on_select(move |city, region| sink.borrow_mut().push((city.to_string(), region.to_string())));
        (picker, seen)
    }

    #[test]
    fn test_fresh_picker_is_closed() {
        let (picker, _) = recording();
        assert_eq!(picker.state(), Dropdown::Closed);
        assert!(picker.candidates().is_empty());
        assert_eq!(picker.text(), "");
    }

    #[test]
    fn test_initial_query_does_not_open() {
        let picker = LocationPicker::new(LocationConfig {
            dataset: dataset(),
            initial_query: Some("Pune".to_string()),
        });
        assert_eq!(picker.text(), "Pune");
        assert!(!picker.is_open());
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let (mut picker, _) = recording();
        picker.set_query("del");
        assert!(picker.is_open());
        assert_eq!(picker.candidates(), &[Candidate::new("New Delhi", "Delhi")]);

        picker.set_query("URU");
        assert_eq!(
            picker.candidates(),
            &[Candidate::new("Bengaluru", "Karnataka"), Candidate::new("Mysuru", "Karnataka")]
        );
    }

    #[test]
    fn test_empty_query_closes_and_clears() {
        let (mut picker, _) = recording();
        picker.set_query("b");
        assert!(picker.is_open());

        picker.set_query("");
        assert!(!picker.is_open());
        assert!(picker.candidates().is_empty());
        assert_eq!(picker.highlighted(), None);
    }

    #[test]
    fn test_no_match_yields_placeholder() {
        let (mut picker, _) = recording();
        picker.set_query("zzz");
        assert!(picker.is_open());
        assert_eq!(picker.candidates(), &[Candidate::not_found()]);
        assert!(picker.candidates()[0].is_placeholder());
        assert_eq!(picker.highlighted(), None);
    }

    #[test]
    fn test_toggle_on_empty_query_browses_all() {
        let (mut picker, _) = recording();
        picker.toggle();
        assert!(picker.is_open());
        assert_eq!(
            picker.candidates(),
            &[
                Candidate::new("Bengaluru", "Karnataka"),
                Candidate::new("Mysuru", "Karnataka"),
                Candidate::new("New Delhi", "Delhi"),
            ]
        );

        picker.toggle();
        assert!(!picker.is_open());
    }

    #[test]
    fn test_toggle_reopens_with_current_query() {
        let (mut picker, _) = recording();
        picker.select("Mysuru", "Karnataka");
        picker.toggle();
        assert!(picker.is_open());
        assert_eq!(picker.candidates(), &[Candidate::new("Mysuru", "Karnataka")]);
    }

    #[test]
    fn test_select_sets_text_closes_and_emits_once() {
        let (mut picker, seen) = recording();
        picker.set_query("my");
        assert!(picker.select("Mysuru", "Karnataka"));

        assert_eq!(picker.text(), "Mysuru");
        assert!(!picker.is_open());
        assert_eq!(*seen.borrow(), vec![("Mysuru".to_string(), "Karnataka".to_string())]);
    }

    #[test]
    fn test_placeholder_is_not_selectable() {
        let (mut picker, seen) = recording();
        picker.set_query("zzz");

        assert!(!picker.select(NOT_FOUND, ""));
        assert!(!picker.select_highlighted());
        assert_eq!(picker.text(), "zzz");
        assert!(picker.is_open());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_keyboard_highlight_and_select() {
        let (mut picker, seen) = recording();
        picker.toggle();
        assert_eq!(picker.highlighted(), Some(0));

        picker.highlight_next();
        picker.highlight_next();
        picker.highlight_next();
        assert_eq!(picker.highlighted(), Some(2));

        picker.highlight_prev();
        assert_eq!(picker.highlighted(), Some(1));

        assert!(picker.select_highlighted());
        assert_eq!(picker.text(), "Mysuru");
        assert_eq!(*seen.borrow(), vec![("Mysuru".to_string(), "Karnataka".to_string())]);
        assert!(!picker.select_highlighted());
    }
}
