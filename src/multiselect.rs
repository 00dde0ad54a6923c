//! State of a multi-select control: a catalog of options, the current
//! selection and the highlighted option while the dropdown is open.

use tracing::trace;

use crate::selection::{SelectOption, Selection};

pub const DEFAULT_PLACEHOLDER: &str = "Select options...";

#[derive(Debug, Clone)]
pub struct MultiSelect {
    options: Vec<SelectOption>,
    value: Selection,
    placeholder: String,
    disabled: bool,
    open: bool,
    highlighted: usize,
}

impl MultiSelect {
    pub fn new(options: Vec<SelectOption>, value: Selection) -> Self {
        Self {
            options,
            value,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            disabled: false,
            open: false,
            highlighted: 0,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn value(&self) -> &Selection {
        &self.value
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn is_checked(&self, option: &SelectOption) -> bool {
        self.value.is_selected(&option.value)
    }

    pub fn set_open(&mut self, open: bool) {
        if self.disabled {
            return;
        }
        self.open = open;
        if open {
            self.highlighted = 0;
        }
    }

    pub fn highlight_next(&mut self) {
        if !self.options.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.options.len();
        }
    }

    pub fn highlight_prev(&mut self) {
        if !self.options.is_empty() {
            self.highlighted = (self.highlighted + self.options.len() - 1) % self.options.len();
        }
    }

    /// Toggles the option with `value` and commits the new selection.
    pub fn toggle(&mut self, value: &str) {
        if self.disabled {
            return;
        }
        self.value = self.value.toggle(value);
        trace!("Selection now {:?}", self.value.keys());
    }

    pub fn toggle_highlighted(&mut self) {
        if let Some(value) = self.options.get(self.highlighted).map(|o| o.value.clone()) {
            self.toggle(&value);
        }
    }

    pub fn clear(&mut self) {
        if self.disabled {
            return;
        }
        self.value = self.value.clear();
    }

    pub fn display_text(&self) -> String {
        self.value.display_label(&self.options, &self.placeholder)
    }

    /// Whether the clear button is shown.
    pub fn can_clear(&self) -> bool {
        !self.value.is_empty() && !self.disabled
    }
}
