//! Homepage component switcher.
//!
//! Each button names a class (its `data-class`); selecting a button reveals
//! every element with that class and hides the previous selection's.

/// A switcher button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchButton {
    /// Class of the elements this button reveals
    pub data_class: String,
    /// "Coming soon" buttons cannot be selected
    pub soon: bool,
}

impl SwitchButton {
    pub fn new(data_class: impl Into<String>) -> Self {
        Self {
            data_class: data_class.into(),
            soon: false,
        }
    }

    pub fn soon(data_class: impl Into<String>) -> Self {
        Self {
            data_class: data_class.into(),
            soon: true,
        }
    }
}

/// Changes produced by a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchChange {
    /// Previously active button and the class whose elements get hidden
    pub deactivated: Option<(usize, String)>,
    /// Newly active button and the class whose elements get revealed
    pub activated: (usize, String),
}

#[derive(Debug, Clone)]
pub struct ComponentSwitcher {
    buttons: Vec<SwitchButton>,
    active: Option<usize>,
}

impl ComponentSwitcher {
    /// Create a switcher. `active` is the button initially marked active, if any.
    pub fn new(buttons: Vec<SwitchButton>, active: Option<usize>) -> Self {
        let active = active.filter(|&i| i < buttons.len());
        Self { buttons, active }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn buttons(&self) -> &[SwitchButton] {
        &self.buttons
    }

    /// Handle a click on button `index`.
    ///
    /// Returns `None` for out-of-range or "soon" buttons, which have no listener.
    pub fn select(&mut self, index: usize) -> Option<SwitchChange> {
        let button = self.buttons.get(index).filter(|b| !b.soon)?;
        let activated = (index, button.data_class.clone());

        let deactivated = self
            .active
            .map(|prev| (prev, self.buttons[prev].data_class.clone()));

        self.active = Some(index);

        Some(SwitchChange {
            deactivated,
            activated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn switcher() -> ComponentSwitcher {
        ComponentSwitcher::new(
            vec![
                SwitchButton::new("formatter"),
                SwitchButton::new("linter"),
                SwitchButton::soon("bundler"),
            ],
            Some(0),
        )
    }

    #[test]
    fn selecting_swaps_visible_class() {
        let mut switcher = switcher();

        let change = switcher.select(1).unwrap();

        assert_eq!(
            change,
            SwitchChange {
                deactivated: Some((0, "formatter".to_string())),
                activated: (1, "linter".to_string()),
            }
        );
        assert_eq!(switcher.active(), Some(1));
    }

    #[test]
    fn soon_buttons_are_inert() {
        let mut switcher = switcher();

        assert_eq!(switcher.select(2), None);
        assert_eq!(switcher.select(9), None);
        assert_eq!(switcher.active(), Some(0));
    }

    #[test]
    fn first_selection_without_active_button() {
        let mut switcher = ComponentSwitcher::new(vec![SwitchButton::new("linter")], None);

        let change = switcher.select(0).unwrap();

        assert_eq!(change.deactivated, None);
        assert_eq!(change.activated.1, "linter");
    }
}
