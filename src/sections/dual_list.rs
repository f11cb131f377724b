//! Selection state and change notification for the section dual list.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::ViewResult;
use crate::observability::{emit, ViewEvent, ViewObserver};

use super::{
    bulk_move, move_all, reorder_sections, toggle_section_visibility, Partition, Partitions,
    Reorder, Section,
};

/// Receives the full section list after every mutation. The caller owns persistence.
pub trait SectionsListener {
    fn on_change(&mut self, sections: &[Section]);
}

impl<F> SectionsListener for F
where
    F: FnMut(&[Section]),
{
    fn on_change(&mut self, sections: &[Section]) {
        self(sections)
    }
}

/// Dual-list manager.
///
/// Holds nothing but the two selection sets; the section list itself is passed in on every
/// call and the rewritten list goes to the listener.
pub struct SectionsDualList<L> {
    selected_available: BTreeSet<String>,
    selected_active: BTreeSet<String>,
    listener: L,
    observer: Option<Arc<dyn ViewObserver>>,
}

impl<L: SectionsListener> SectionsDualList<L> {
    /// Create a manager with empty selections.
    pub fn new(listener: L) -> Self {
        Self {
            selected_available: BTreeSet::new(),
            selected_active: BTreeSet::new(),
            listener,
            observer: None,
        }
    }

    /// Attach an observer for view events.
    pub fn with_observer(mut self, observer: Arc<dyn ViewObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Selected ids of one side.
    pub fn selected(&self, partition: Partition) -> &BTreeSet<String> {
        match partition {
            Partition::Active => &self.selected_active,
            Partition::Available => &self.selected_available,
        }
    }

    fn selected_mut(&mut self, partition: Partition) -> &mut BTreeSet<String> {
        match partition {
            Partition::Active => &mut self.selected_active,
            Partition::Available => &mut self.selected_available,
        }
    }

    /// Add `id` to the partition's selection, or remove it if already selected.
    pub fn toggle_select(&mut self, partition: Partition, id: &str) {
        let set = self.selected_mut(partition);
        if !set.remove(id) {
            set.insert(id.to_string());
        }
    }

    /// Finish a drag-and-drop gesture.
    pub fn drag_end(&mut self, sections: &[Section], mv: Reorder) -> ViewResult<()> {
        let out = reorder_sections(sections, &mv)?;
        self.commit(out);
        Ok(())
    }

    /// Flip one section between the partitions.
    pub fn toggle(&mut self, sections: &[Section], id: &str) {
        let out = toggle_section_visibility(sections, id);
        self.commit(out);
    }

    /// Move the selected sections of `from` to the other partition and clear that selection.
    ///
    /// With nothing selected this is a no-op and the listener is not called.
    pub fn move_selected(&mut self, sections: &[Section], from: Partition) {
        let ids: Vec<String> = sections
            .iter()
            .filter(|s| s.partition() == from && self.selected(from).contains(&s.id))
            .map(|s| s.id.clone())
            .collect();
        if ids.is_empty() {
            return;
        }
        let out = bulk_move(sections, &ids, from.other().is_visible());
        self.selected_mut(from).clear();
        self.commit(out);
    }

    /// Move every section of `from` to the other partition and clear that selection.
    ///
    /// An empty partition is a no-op.
    pub fn move_all(&mut self, sections: &[Section], from: Partition) {
        if !sections.iter().any(|s| s.partition() == from) {
            return;
        }
        let out = move_all(sections, from);
        self.selected_mut(from).clear();
        self.commit(out);
    }

    fn commit(&mut self, sections: Vec<Section>) {
        // Drop selections that no longer belong to their side.
        let parts = Partitions::split(&sections);
        let keep = |side: &[Section], id: &String| side.iter().any(|s| &s.id == id);
        self.selected_active.retain(|id| keep(&parts.active, id));
        self.selected_available.retain(|id| keep(&parts.available, id));

        emit(
            self.observer.as_ref(),
            ViewEvent::SectionsChanged {
                active: parts.active.len(),
                available: parts.available.len(),
            },
        );
        self.listener.on_change(&sections);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::SectionKind;

    #[derive(Default)]
    struct Captured {
        calls: Vec<Vec<Section>>,
    }

    impl SectionsListener for Captured {
        fn on_change(&mut self, sections: &[Section]) {
            self.calls.push(sections.to_vec());
        }
    }

    fn layout() -> Vec<Section> {
        vec![
            Section::new("summary", "Summary", SectionKind::Full, true),
            Section::new("chart", "Chart", SectionKind::Half, true),
            Section::new("budgets", "Budgets", SectionKind::Half, false),
            Section::new("stories", "Stories", SectionKind::Bottom, false),
        ]
    }

    fn visible_ids(sections: &[Section]) -> Vec<&str> {
        sections.iter().filter(|s| s.visible).map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn move_selected_moves_only_selected_and_clears_selection() {
        let mut list = SectionsDualList::new(Captured::default());
        list.toggle_select(Partition::Available, "stories");
        list.move_selected(&layout(), Partition::Available);

        let calls = &list.listener().calls;
        assert_eq!(calls.len(), 1);
        assert_eq!(visible_ids(&calls[0]), vec!["summary", "chart", "stories"]);
        assert!(list.selected(Partition::Available).is_empty());
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let mut list = SectionsDualList::new(Captured::default());
        list.move_selected(&layout(), Partition::Active);
        assert!(list.listener().calls.is_empty());
    }

    #[test]
    fn selection_from_the_wrong_side_is_ignored() {
        let mut list = SectionsDualList::new(Captured::default());
        // "summary" is active, not available.
        list.toggle_select(Partition::Available, "summary");
        list.move_selected(&layout(), Partition::Available);
        assert!(list.listener().calls.is_empty());
    }

    #[test]
    fn toggle_select_is_a_toggle() {
        let mut list = SectionsDualList::new(Captured::default());
        list.toggle_select(Partition::Active, "chart");
        assert!(list.selected(Partition::Active).contains("chart"));
        list.toggle_select(Partition::Active, "chart");
        assert!(list.selected(Partition::Active).is_empty());
    }

    #[test]
    fn move_all_clears_that_sides_selection_only() {
        let mut list = SectionsDualList::new(Captured::default());
        list.toggle_select(Partition::Active, "chart");
        list.toggle_select(Partition::Available, "budgets");
        list.move_all(&layout(), Partition::Active);

        assert!(list.selected(Partition::Active).is_empty());
        // "budgets" is still available after the move.
        assert!(list.selected(Partition::Available).contains("budgets"));
        assert!(list.listener().calls[0].iter().all(|s| !s.visible));
    }

    #[test]
    fn move_all_on_empty_partition_is_a_no_op() {
        let mut list = SectionsDualList::new(Captured::default());
        let all_hidden: Vec<Section> = layout()
            .into_iter()
            .map(|mut s| {
                s.visible = false;
                s
            })
            .collect();
        list.move_all(&all_hidden, Partition::Active);
        assert!(list.listener().calls.is_empty());
    }

    #[test]
    fn drag_end_reports_segregated_list() {
        let mut list = SectionsDualList::new(Captured::default());
        list.drag_end(&layout(), Reorder::new(Partition::Available, 1, Partition::Active, 0))
            .unwrap();
        let ids: Vec<_> = list.listener().calls[0].iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["stories", "summary", "chart", "budgets"]);
    }

    #[test]
    fn failed_drag_does_not_notify() {
        let mut list = SectionsDualList::new(Captured::default());
        assert!(list
            .drag_end(&layout(), Reorder::new(Partition::Active, 5, Partition::Active, 0))
            .is_err());
        assert!(list.listener().calls.is_empty());
    }

    #[test]
    fn selection_is_pruned_when_a_section_changes_side() {
        let mut list = SectionsDualList::new(Captured::default());
        list.toggle_select(Partition::Available, "budgets");
        list.toggle(&layout(), "budgets");
        assert!(list.selected(Partition::Available).is_empty());
    }

    #[test]
    fn closures_are_listeners() {
        let mut seen = 0;
        {
            let mut list = SectionsDualList::new(|s: &[Section]| seen = s.len());
            list.toggle(&layout(), "chart");
        }
        assert_eq!(seen, 4);
    }
}
