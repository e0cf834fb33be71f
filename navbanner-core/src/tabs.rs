/// Selection state of the category tab bar. Exactly one tab is selected
/// whenever the bar has any tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabBar {
    count: usize,
    selected: usize,
}

impl TabBar {
    /// Out-of-range initial selections fall back to the first tab.
    pub fn new(count: usize, active: usize) -> Self {
        let selected = if active < count { active } else { 0 };
        Self { count, selected }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn selected(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.selected)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected() == Some(index)
    }
}
