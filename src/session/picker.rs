//! Selectable-options widget as an explicit state machine.
//!
//! A control polymorphic over {open, closed}: it opens on toggle, closes on
//! option selection, and closes on any interaction outside its bounds. No
//! ambient document-wide listeners; callers route interactions to it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionPicker<T> {
    options: Vec<T>,
    selected: Option<usize>,
    open: bool,
}

impl<T> OptionPicker<T> {
    pub fn new(options: Vec<T>) -> Self {
        Self {
            options,
            selected: None,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.map(|i| &self.options[i])
    }

    /// Click on the control itself: open if closed, close if open.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Select an option by index; the picker closes. Out-of-range indices
    /// leave the selection untouched but still close the picker.
    pub fn select(&mut self, index: usize) -> Option<&T> {
        self.open = false;
        if index < self.options.len() {
            self.selected = Some(index);
        }
        self.selected()
    }

    /// Clear the selection (the "none" choice).
    pub fn clear(&mut self) {
        self.selected = None;
        self.open = false;
    }

    /// Any interaction outside the picker's bounds closes it.
    pub fn outside_interaction(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Tone;

    fn tone_picker() -> OptionPicker<Tone> {
        OptionPicker::new(vec![
            Tone::Casual,
            Tone::Formal,
            Tone::Friendly,
            Tone::Professional,
        ])
    }

    #[test]
    fn starts_closed_with_no_selection() {
        let picker = tone_picker();
        assert!(!picker.is_open());
        assert!(picker.selected().is_none());
    }

    #[test]
    fn toggle_opens_and_closes() {
        let mut picker = tone_picker();
        picker.toggle();
        assert!(picker.is_open());
        picker.toggle();
        assert!(!picker.is_open());
    }

    #[test]
    fn selecting_closes_and_records() {
        let mut picker = tone_picker();
        picker.toggle();
        let chosen = picker.select(1).copied();
        assert_eq!(chosen, Some(Tone::Formal));
        assert!(!picker.is_open());
        assert_eq!(picker.selected(), Some(&Tone::Formal));
    }

    #[test]
    fn outside_interaction_closes_without_selecting() {
        let mut picker = tone_picker();
        picker.toggle();
        picker.outside_interaction();
        assert!(!picker.is_open());
        assert!(picker.selected().is_none());
    }

    #[test]
    fn out_of_range_select_closes_but_keeps_selection() {
        let mut picker = tone_picker();
        picker.select(0);
        picker.toggle();
        picker.select(99);
        assert!(!picker.is_open());
        assert_eq!(picker.selected(), Some(&Tone::Casual));
    }

    #[test]
    fn clear_resets_selection() {
        let mut picker = tone_picker();
        picker.select(2);
        picker.clear();
        assert!(picker.selected().is_none());
    }
}
