//! Dashboard section layout: one ordered list split into an active (visible) and an
//! available (hidden) partition.
//!
//! The pure functions here take the full section list and return a new one. Partition
//! membership is the `visible` flag; order within a partition is list order. Every rewrite
//! returns the list as `[active..., available...]`, so the global order between an active and
//! an available section is not preserved.
//!
//! [`Partitions`] is the explicit two-list view of the same data; [`SectionsDualList`] adds
//! selection state and change notification on top.

pub mod dual_list;

use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

pub use dual_list::{SectionsDualList, SectionsListener};

/// Layout footprint of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Full,
    Half,
    Bottom,
}

/// A dashboard-layout unit that can be shown, hidden and reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub visible: bool,
}

impl Section {
    /// Create a new section.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: SectionKind,
        visible: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            visible,
        }
    }

    /// The side this section is listed on.
    pub fn partition(&self) -> Partition {
        if self.visible {
            Partition::Active
        } else {
            Partition::Available
        }
    }
}

/// One side of the dual list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Shown on the dashboard (`visible = true`).
    Active,
    /// Hidden, offered for adding (`visible = false`).
    Available,
}

impl Partition {
    /// The `visible` flag of sections on this side.
    pub fn is_visible(self) -> bool {
        self == Partition::Active
    }

    /// The opposite side.
    pub fn other(self) -> Partition {
        match self {
            Partition::Active => Partition::Available,
            Partition::Available => Partition::Active,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Partition::Active => "active partition",
            Partition::Available => "available partition",
        }
    }
}

/// The two partitions as separate ordered lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partitions {
    pub active: Vec<Section>,
    pub available: Vec<Section>,
}

impl Partitions {
    /// Split by the `visible` flag, keeping list order within each side.
    pub fn split(sections: &[Section]) -> Self {
        let (active, available) = sections.iter().cloned().partition(|s| s.visible);
        Self { active, available }
    }

    /// Sections of one side, in list order.
    pub fn get(&self, p: Partition) -> &[Section] {
        match p {
            Partition::Active => &self.active,
            Partition::Available => &self.available,
        }
    }

    fn get_mut(&mut self, p: Partition) -> &mut Vec<Section> {
        match p {
            Partition::Active => &mut self.active,
            Partition::Available => &mut self.available,
        }
    }

    /// Recombine as `[active..., available...]`.
    pub fn into_sections(self) -> Vec<Section> {
        let mut out = self.active;
        out.extend(self.available);
        out
    }
}

/// A drag-and-drop gesture: from one partition index to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    pub source_partition: Partition,
    pub source_index: usize,
    pub dest_partition: Partition,
    pub dest_index: usize,
}

impl Reorder {
    /// Create a drag gesture.
    pub fn new(
        source_partition: Partition,
        source_index: usize,
        dest_partition: Partition,
        dest_index: usize,
    ) -> Self {
        Self {
            source_partition,
            source_index,
            dest_partition,
            dest_index,
        }
    }
}

/// Apply a drag-and-drop gesture.
///
/// Within a partition this only changes order. Across partitions the dragged section's
/// `visible` flag flips and it is inserted at `dest_index` (clamped to the destination
/// length). An out-of-range source index is an error and nothing changes.
pub fn reorder_sections(sections: &[Section], mv: &Reorder) -> ViewResult<Vec<Section>> {
    let mut parts = Partitions::split(sections);

    let source = parts.get_mut(mv.source_partition);
    if mv.source_index >= source.len() {
        return Err(ViewError::IndexOutOfRange {
            what: mv.source_partition.name(),
            index: mv.source_index,
            len: source.len(),
        });
    }
    let mut moved = source.remove(mv.source_index);
    moved.visible = mv.dest_partition.is_visible();

    let dest = parts.get_mut(mv.dest_partition);
    let at = mv.dest_index.min(dest.len());
    dest.insert(at, moved);

    Ok(parts.into_sections())
}

/// Flip one section's visibility.
///
/// The flag is flipped in place and the partitions are then re-derived, so inside its new
/// partition the section sits wherever the original list order puts it rather than at the
/// end. Unknown ids change nothing beyond segregating the list.
pub fn toggle_section_visibility(sections: &[Section], id: &str) -> Vec<Section> {
    update_where(sections, |s| s.id == id, |s| !s.visible)
}

/// Set `visible = target_visible` for every section whose id is in `ids`.
pub fn bulk_move<S: AsRef<str>>(sections: &[Section], ids: &[S], target_visible: bool) -> Vec<Section> {
    update_where(
        sections,
        |s| ids.iter().any(|id| id.as_ref() == s.id),
        |_| target_visible,
    )
}

/// Move every section of `from` to the other partition.
pub fn move_all(sections: &[Section], from: Partition) -> Vec<Section> {
    let target = from.other().is_visible();
    update_where(sections, |s| s.partition() == from, |_| target)
}

fn update_where(
    sections: &[Section],
    selected: impl Fn(&Section) -> bool,
    visible: impl Fn(&Section) -> bool,
) -> Vec<Section> {
    let flipped: Vec<Section> = sections
        .iter()
        .map(|s| {
            let mut s = s.clone();
            if selected(&s) {
                s.visible = visible(&s);
            }
            s
        })
        .collect();
    Partitions::split(&flipped).into_sections()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(id: &str, visible: bool) -> Section {
        Section::new(id, id.to_uppercase(), SectionKind::Full, visible)
    }

    fn ids(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.id.as_str()).collect()
    }

    fn layout() -> Vec<Section> {
        vec![s("a", true), s("b", true), s("c", true), s("x", false), s("y", false)]
    }

    #[test]
    fn reorder_within_partition_keeps_flags() {
        let out = reorder_sections(
            &layout(),
            &Reorder::new(Partition::Active, 0, Partition::Active, 2),
        )
        .unwrap();
        assert_eq!(ids(&out), vec!["b", "c", "a", "x", "y"]);
        assert!(out.iter().take(3).all(|s| s.visible));
    }

    #[test]
    fn reorder_across_partitions_flips_and_inserts_at_drop_index() {
        let out = reorder_sections(
            &layout(),
            &Reorder::new(Partition::Available, 1, Partition::Active, 1),
        )
        .unwrap();
        assert_eq!(ids(&out), vec!["a", "y", "b", "c", "x"]);
        assert!(out[1].visible);
    }

    #[test]
    fn drop_index_past_end_appends() {
        let out = reorder_sections(
            &layout(),
            &Reorder::new(Partition::Active, 0, Partition::Available, 99),
        )
        .unwrap();
        assert_eq!(ids(&out), vec!["b", "c", "x", "y", "a"]);
        assert!(!out[4].visible);
    }

    #[test]
    fn bad_source_index_is_an_error() {
        let err = reorder_sections(
            &layout(),
            &Reorder::new(Partition::Available, 2, Partition::Active, 0),
        )
        .unwrap_err();
        assert!(err.to_string().contains("out of range for available partition"));
    }

    #[test]
    fn cross_move_round_trip_restores_partitions() {
        let start = layout();
        let there = reorder_sections(&start, &Reorder::new(Partition::Available, 0, Partition::Active, 1)).unwrap();
        let back = reorder_sections(&there, &Reorder::new(Partition::Active, 1, Partition::Available, 0)).unwrap();
        assert_eq!(back, start);
    }

    #[test]
    fn toggle_makes_hidden_section_active() {
        let sections = vec![s("a", true), s("b", false)];
        let out = toggle_section_visibility(&sections, "b");
        let parts = Partitions::split(&out);
        assert_eq!(ids(&parts.active), vec!["a", "b"]);
        assert!(parts.available.is_empty());
    }

    #[test]
    fn toggle_keeps_original_relative_order_not_append() {
        // "a" becomes active again; it sorts before "b" by list order, not after it.
        let sections = vec![s("a", false), s("b", true), s("c", false)];
        let out = toggle_section_visibility(&sections, "a");
        assert_eq!(ids(&out), vec!["a", "b", "c"]);
        assert!(out[0].visible);
    }

    fn flags(sections: &[Section]) -> Vec<(String, bool)> {
        let mut out: Vec<(String, bool)> =
            sections.iter().map(|s| (s.id.clone(), s.visible)).collect();
        out.sort();
        out
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let start = layout();
        for id in ["a", "b", "c", "x", "y"] {
            let twice = toggle_section_visibility(&toggle_section_visibility(&start, id), id);
            assert_eq!(flags(&twice), flags(&start), "id {id}");
        }
        // Sections on the partition boundary come back to the exact same position.
        for id in ["c", "x"] {
            let twice = toggle_section_visibility(&toggle_section_visibility(&start, id), id);
            assert_eq!(twice, start, "id {id}");
        }
    }

    #[test]
    fn toggle_from_the_middle_lands_at_the_end_of_its_side() {
        let once = toggle_section_visibility(&layout(), "b");
        let twice = toggle_section_visibility(&once, "b");
        assert_eq!(ids(&twice), vec!["a", "c", "b", "x", "y"]);
    }

    #[test]
    fn toggle_unknown_id_changes_nothing() {
        let sections = vec![s("a", true), s("x", false)];
        assert_eq!(toggle_section_visibility(&sections, "zzz"), sections);
    }

    #[test]
    fn flag_changes_return_a_segregated_list() {
        let mixed = vec![s("x", false), s("a", true), s("y", false), s("b", true)];
        let out = bulk_move(&mixed, &["y"], true);
        assert_eq!(ids(&out), vec!["a", "y", "b", "x"]);
    }

    #[test]
    fn toggled_section_takes_its_list_position_in_the_new_partition() {
        let start = layout();
        let out = toggle_section_visibility(&start, "b");
        let parts = Partitions::split(&out);
        assert_eq!(ids(&parts.active), vec!["a", "c"]);
        // "b" precedes "x" in list order, so it heads the available side.
        assert_eq!(ids(&parts.available), vec!["b", "x", "y"]);
    }

    #[test]
    fn bulk_move_sets_target_visibility() {
        let out = bulk_move(&layout(), &["y", "x"], true);
        assert_eq!(ids(&out), vec!["a", "b", "c", "x", "y"]);
        assert!(out.iter().all(|s| s.visible));

        let out = bulk_move(&layout(), &["b"], false);
        assert_eq!(ids(&Partitions::split(&out).available), vec!["b", "x", "y"]);
    }

    #[test]
    fn move_all_empties_the_source_partition() {
        let out = move_all(&layout(), Partition::Active);
        assert!(out.iter().all(|s| !s.visible));
        assert_eq!(ids(&out), vec!["a", "b", "c", "x", "y"]);
    }

    #[test]
    fn sections_serialize_with_type_key() {
        let json = serde_json::to_string(&Section::new("s1", "Totals", SectionKind::Half, true)).unwrap();
        assert_eq!(json, r#"{"id":"s1","name":"Totals","type":"half","visible":true}"#);
        let back: Section = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, SectionKind::Half);
    }
}
