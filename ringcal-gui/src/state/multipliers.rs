//! Ring multiplier checklist.

use ringcal_core::{MultiplierSelector, DEFAULT_MULTIPLIERS};

/// Multiplier pre-selected when the panel opens.
const PRESELECTED: f64 = 1.0;

/// One checklist entry.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiplierChoice {
    pub value: f64,
    pub checked: bool,
}

/// Checklist of ring multipliers, consulted when the second point lands.
#[derive(Clone, Debug)]
pub struct MultiplierChoices {
    pub choices: Vec<MultiplierChoice>,
    /// Text typed into the custom multiplier field.
    pub custom_input: String,
}

impl Default for MultiplierChoices {
    fn default() -> Self {
        let choices = DEFAULT_MULTIPLIERS
            .iter()
            .map(|&value| MultiplierChoice {
                value,
                checked: (value - PRESELECTED).abs() < f64::EPSILON,
            })
            .collect();
        Self {
            choices,
            custom_input: String::new(),
        }
    }
}

impl MultiplierChoices {
    /// Checked multipliers, in list order.
    #[must_use]
    pub fn selected(&self) -> Vec<f64> {
        self.choices
            .iter()
            .filter(|choice| choice.checked)
            .map(|choice| choice.value)
            .collect()
    }

    /// Parse the custom field and add it to the list, checked.
    ///
    /// A value already in the list just gets checked. The list stays sorted.
    pub fn add_custom(&mut self) -> Result<f64, String> {
        let text = self.custom_input.trim();
        let value: f64 = text
            .parse()
            .map_err(|_| format!("'{text}' is not a number"))?;
        if !value.is_finite() {
            return Err(format!("'{text}' is not a finite number"));
        }

        if let Some(existing) = self
            .choices
            .iter_mut()
            .find(|choice| (choice.value - value).abs() < f64::EPSILON)
        {
            existing.checked = true;
        } else {
            self.choices.push(MultiplierChoice {
                value,
                checked: true,
            });
            self.choices.sort_by(|a, b| a.value.total_cmp(&b.value));
        }
        self.custom_input.clear();
        Ok(value)
    }
}

impl MultiplierSelector for MultiplierChoices {
    fn select_multipliers(&mut self) -> Vec<f64> {
        self.selected()
    }
}
