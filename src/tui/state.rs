use newsdeck::engine::Facet;
use newsdeck::session::Session;

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
    Filters,
}

/// Facet panel sections in display order.
pub const FACET_SECTIONS: [Facet; 4] = [
    Facet::Sentiment,
    Facet::SourceType,
    Facet::Publisher,
    Facet::Feed,
];

/// Presentation state around the session: focus, cursors, scroll offsets.
/// Everything query-related lives in the session; this struct only decides
/// what the keyboard is currently pointing at.
pub struct TuiState {
    pub session: Session,
    pub focus: Focus,
    pub facet_section: usize,
    pub facet_row: usize,
    pub list_offset: usize,
    pub refreshing: bool,
}

impl TuiState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            focus: Focus::List,
            facet_section: 0,
            facet_row: 0,
            list_offset: 0,
            refreshing: false,
        }
    }

    pub fn current_facet(&self) -> Facet {
        FACET_SECTIONS[self.facet_section]
    }

    /// Option values of the facet section the cursor is on.
    pub fn section_values(&self) -> &[String] {
        self.session.facets().values(self.current_facet())
    }

    pub fn next_section(&mut self) {
        self.facet_section = (self.facet_section + 1) % FACET_SECTIONS.len();
        self.facet_row = 0;
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Filters => self.facet_row = self.facet_row.saturating_sub(1),
            Focus::List => self.list_offset = self.list_offset.saturating_sub(1),
            Focus::Search => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Filters => {
                let len = self.section_values().len();
                if len > 0 && self.facet_row + 1 < len {
                    self.facet_row += 1;
                }
            }
            Focus::List => {
                let len = self.session.visible().len();
                if len > 0 && self.list_offset + 1 < len {
                    self.list_offset += 1;
                }
            }
            Focus::Search => {}
        }
    }

    /// Toggle the facet value under the cursor, if any.
    pub fn toggle_current(&mut self) {
        let facet = self.current_facet();
        let value = self.section_values().get(self.facet_row).cloned();
        if let Some(value) = value {
            self.session.toggle_facet(facet, &value);
        }
    }
}
