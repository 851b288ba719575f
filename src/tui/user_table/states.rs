use crate::backend::members::{Member, MemberField, MemberId};
use std::collections::HashSet;

/// Inline-edit mode of the table. Only one row can be open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing(MemberId),
}

/// Number of pages needed for `len` rows; never less than one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Rows `[(page-1)*page_size, page*page_size)` of `view`, clipped to its length.
pub fn paginate<T>(view: &[T], page_size: usize, page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(view.len());
    let end = start.saturating_add(page_size).min(view.len());
    &view[start..end]
}

/// All table state for one session: the loaded members, the filtered view,
/// the current page, the selection and the row being edited.
///
/// The filtered view is derived: it is rebuilt from `members` whenever the
/// member list is replaced or the search term changes. Edits and deletes
/// are applied to both lists in place.
#[derive(Debug, Clone)]
pub struct UserTableStates {
    members: Vec<Member>,
    visible: Vec<Member>,
    search_term: String,
    page: usize,
    page_size: usize,
    selected: HashSet<MemberId>,
    edit: EditState,
}

impl Default for UserTableStates {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_SIZE)
    }
}

impl UserTableStates {
    pub fn new(page_size: usize) -> Self {
        Self {
            members: Vec::new(),
            visible: Vec::new(),
            search_term: String::new(),
            page: 1,
            page_size: page_size.max(1),
            selected: HashSet::new(),
            edit: EditState::Viewing,
        }
    }

    // ────────────────────────────
    // Loading & search
    // ────────────────────────────

    pub fn load(&mut self, members: Vec<Member>) {
        log::info!("Loaded {} members into table", members.len());
        self.members = members;
        let known: HashSet<&MemberId> = self.members.iter().map(|m| &m.id).collect();
        self.selected.retain(|id| known.contains(id));
        self.recompute();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.recompute();
        self.page = 1;
    }

    pub fn clear_search(&mut self) {
        self.set_search_term("");
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    fn recompute(&mut self) {
        let needle = self.search_term.to_lowercase();
        self.visible = self
            .members
            .iter()
            .filter(|m| m.matches(&needle))
            .cloned()
            .collect();
        log::debug!(
            "🔍 '{}' matches {}/{} members",
            self.search_term,
            self.visible.len(),
            self.members.len()
        );
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn visible(&self) -> &[Member] {
        &self.visible
    }

    // ────────────────────────────
    // Pagination
    // ────────────────────────────

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.visible.len(), self.page_size)
    }

    pub fn page_rows(&self) -> &[Member] {
        paginate(&self.visible, self.page_size, self.page)
    }

    /// Jumps to page `n`. Callers only pass pages that exist.
    pub fn go_to_page(&mut self, n: usize) {
        self.page = n;
    }

    pub fn is_first_page(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages()
    }

    pub fn first_page(&mut self) {
        if !self.is_first_page() {
            self.go_to_page(1);
        }
    }

    pub fn previous_page(&mut self) {
        if !self.is_first_page() {
            self.go_to_page(self.page - 1);
        }
    }

    pub fn next_page(&mut self) {
        if !self.is_last_page() {
            self.go_to_page(self.page + 1);
        }
    }

    pub fn last_page(&mut self) {
        if !self.is_last_page() {
            self.go_to_page(self.total_pages());
        }
    }

    // ────────────────────────────
    // Selection & delete
    // ────────────────────────────

    pub fn toggle_select(&mut self, id: &MemberId) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }

    pub fn is_selected(&self, id: &MemberId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Removes every selected member from the view and the member list,
    /// then clears the selection. Returns how many rows were removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.members.len();
        let selected = std::mem::take(&mut self.selected);
        self.visible.retain(|m| !selected.contains(&m.id));
        self.members.retain(|m| !selected.contains(&m.id));
        if self.edit_target().is_some_and(|id| selected.contains(id)) {
            self.edit = EditState::Viewing;
        }
        self.page = self.page.clamp(1, self.total_pages());
        let removed = before - self.members.len();
        log::info!("🗑️ Deleted {removed} members");
        removed
    }

    // ────────────────────────────
    // Inline editing
    // ────────────────────────────

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn edit_target(&self) -> Option<&MemberId> {
        match self.edit_state() {
            EditState::Editing(id) => Some(id),
            EditState::Viewing => None,
        }
    }

    pub fn is_editing(&self, id: &MemberId) -> bool {
        self.edit_target() == Some(id)
    }

    pub fn begin_edit(&mut self, id: &MemberId) {
        self.edit = EditState::Editing(id.clone());
    }

    /// Writes `value` into the member's field right away; there is no draft.
    pub fn apply_field_edit(&mut self, id: &MemberId, field: MemberField, value: impl Into<String>) {
        let value = value.into();
        for list in [&mut self.visible, &mut self.members] {
            if let Some(member) = list.iter_mut().find(|m| &m.id == id) {
                member.set_field(field, value.clone());
            }
        }
    }

    pub fn save_edit(&mut self, id: &MemberId) {
        if !self.is_editing(id) {
            log::debug!("save requested for {id} while editing {:?}", self.edit);
        }
        self.edit = EditState::Viewing;
    }
}
