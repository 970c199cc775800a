use errfold_config::Config;
use errfold_primitives::{Association, DimStyle, Position, Rope, Span, ViewportId};

use super::*;

const DOC: DocumentId = DocumentId(1);
const VP_1: ViewportId = ViewportId(1);
const VP_2: ViewportId = ViewportId(2);

fn all_live(_: ViewportId) -> bool {
	true
}

fn span(start: usize, end: usize) -> Span {
	Span::new(Position::new(start, 0), Position::new(end, 1))
}

/// `if err != nil {\n  return err\n}` at rows 0-2.
fn simple_block() -> RegionSet {
	RegionSet::new(vec![Region::simple(span(0, 2))], Vec::new(), Rope::from_str("if err != nil {\n  return err\n}"))
}

/// `result, err := fetch()` at row 4 feeding a block at rows 5-7.
fn declared_block() -> RegionSet {
	let source = "package main\n\nfunc run() error {\n\n\tresult, err := fetch()\n\tif err != nil {\n\t\treturn err\n\t}\n\treturn use(result)\n}\n";
	RegionSet::new(
		vec![Region::assignment(span(4, 4)), Region::simple(span(5, 7))],
		vec![Association {
			declaration: 0,
			target: 1,
			distance: 1,
		}],
		Rope::from_str(source),
	)
}

fn reconciler(f: impl FnOnce(&mut Config)) -> DisplayReconciler {
	let mut config = Config::default();
	f(&mut config);
	DisplayReconciler::new(&config)
}

fn store_with(cursors: &[(ViewportId, Option<usize>)]) -> ViewportStateStore {
	let mut store = ViewportStateStore::new(true);
	for &(vp, row) in cursors {
		store.open(vp, DOC);
		if let Some(row) = row {
			store.set_cursor_row(vp, row);
		}
	}
	store
}

#[test]
fn cursor_outside_compresses_with_label() {
	let mut store = store_with(&[(VP_1, Some(5))]);
	let out = reconciler(|_| {}).reconcile(DOC, &simple_block(), &mut store, &all_live);
	assert_eq!(
		out,
		vec![Instruction::Fold {
			rows: RowRange::new(0, 2),
			label: "if err != nil { return err } (3 lines)".to_string(),
		}]
	);
}

#[test]
fn cursor_inside_reveals() {
	let mut store = store_with(&[(VP_1, Some(1))]);
	let out = reconciler(|_| {}).reconcile(DOC, &simple_block(), &mut store, &all_live);
	assert_eq!(out, vec![Instruction::Reveal { rows: RowRange::new(0, 2) }]);
}

#[test]
fn unset_cursor_has_no_influence() {
	let mut store = store_with(&[(VP_1, None)]);
	let out = reconciler(|_| {}).reconcile(DOC, &simple_block(), &mut store, &all_live);
	assert!(matches!(out.as_slice(), [Instruction::Fold { .. }]));
}

#[test]
fn cursor_on_associated_declaration_reveals_block() {
	let mut store = store_with(&[(VP_1, Some(4))]);
	let out = reconciler(|_| {}).reconcile(DOC, &declared_block(), &mut store, &all_live);
	assert_eq!(out, vec![Instruction::Reveal { rows: RowRange::new(5, 7) }]);
}

#[test]
fn unassociated_declaration_does_not_reveal() {
	let declared = declared_block();
	let set = RegionSet::new(declared.regions().to_vec(), Vec::new(), declared.source().clone());
	let mut store = store_with(&[(VP_1, Some(4))]);
	let out = reconciler(|_| {}).reconcile(DOC, &set, &mut store, &all_live);
	assert!(matches!(out.as_slice(), [Instruction::Fold { rows, .. }] if *rows == RowRange::new(5, 7)));
}

/// One viewport inside, one outside: reveal wins, in either order.
#[test]
fn reveal_wins_across_viewports() {
	for cursors in [[(VP_1, Some(1)), (VP_2, Some(9))], [(VP_1, Some(9)), (VP_2, Some(1))]] {
		let mut store = store_with(&cursors);
		let out = reconciler(|_| {}).reconcile(DOC, &simple_block(), &mut store, &all_live);
		assert_eq!(out, vec![Instruction::Reveal { rows: RowRange::new(0, 2) }]);
	}
}

#[test]
fn disabled_viewport_cursor_is_ignored() {
	let mut store = store_with(&[(VP_1, Some(1)), (VP_2, Some(9))]);
	store.set_enabled(VP_1, false);
	let out = reconciler(|_| {}).reconcile(DOC, &simple_block(), &mut store, &all_live);
	assert!(matches!(out.as_slice(), [Instruction::Fold { .. }]));
}

#[test]
fn no_enabled_viewport_emits_nothing() {
	let mut store = store_with(&[(VP_1, Some(9))]);
	store.set_enabled(VP_1, false);
	assert!(reconciler(|_| {}).reconcile(DOC, &simple_block(), &mut store, &all_live).is_empty());

	let mut empty = ViewportStateStore::new(true);
	assert!(reconciler(|_| {}).reconcile(DOC, &simple_block(), &mut empty, &all_live).is_empty());
}

#[test]
fn dead_viewport_cursor_is_ignored() {
	let mut store = store_with(&[(VP_1, Some(1)), (VP_2, Some(9))]);
	let out = reconciler(|_| {}).reconcile(DOC, &simple_block(), &mut store, &|id: ViewportId| id == VP_2);
	assert!(matches!(out.as_slice(), [Instruction::Fold { .. }]));
}

#[test]
fn fold_mode_uses_empty_label() {
	let out = reconciler(|c| c.display_mode = DisplayMode::Fold).instructions(&simple_block(), &[]);
	assert_eq!(
		out,
		vec![Instruction::Fold {
			rows: RowRange::new(0, 2),
			label: String::new(),
		}]
	);
}

#[test]
fn full_mode_dims_out_of_context_regions() {
	let out = reconciler(|c| {
		c.display_mode = DisplayMode::Full;
		c.dim_mode = DimMode::Comment;
	})
	.instructions(&simple_block(), &[9]);
	assert_eq!(
		out,
		vec![Instruction::Dim {
			rows: RowRange::new(0, 2),
			style: DimStyle::Comment,
		}]
	);
}

#[test]
fn full_mode_without_dim_emits_nothing() {
	let out = reconciler(|c| {
		c.display_mode = DisplayMode::Full;
		c.dim_mode = DimMode::None;
	})
	.instructions(&simple_block(), &[9]);
	assert!(out.is_empty());
}

#[test]
fn full_mode_still_reveals_in_context() {
	let out = reconciler(|c| c.display_mode = DisplayMode::Full).instructions(&simple_block(), &[0]);
	assert_eq!(out, vec![Instruction::Reveal { rows: RowRange::new(0, 2) }]);
}

#[test]
fn reveal_mode_dims_instead_of_revealing() {
	let out = reconciler(|c| c.reveal_mode = RevealMode::Conceal).instructions(&simple_block(), &[2]);
	assert_eq!(
		out,
		vec![Instruction::Dim {
			rows: RowRange::new(0, 2),
			style: DimStyle::Conceal,
		}]
	);
}

/// Inline blocks fold only their body; the declaring line stays readable.
#[test]
fn inline_block_targets_inner_rows() {
	let source = "if err := f(\n\ta,\n); err != nil {\n\treturn err\n}\n";
	let set = RegionSet::new(
		vec![Region::inline(span(0, 4), Span::new(Position::new(2, 3), Position::new(4, 1)))],
		Vec::new(),
		Rope::from_str(source),
	);
	let out = reconciler(|_| {}).instructions(&set, &[9]);
	assert_eq!(
		out,
		vec![Instruction::Fold {
			rows: RowRange::new(2, 4),
			label: "); err != nil { return err } (3 lines)".to_string(),
		}]
	);
	assert_eq!(
		reconciler(|_| {}).instructions(&set, &[0]),
		vec![Instruction::Reveal { rows: RowRange::new(0, 4) }]
	);
}

/// A region past the end of its source is skipped; the others still get
/// instructions.
#[test]
fn out_of_range_region_is_skipped() {
	let set = RegionSet::new(
		vec![Region::simple(span(0, 2)), Region::simple(span(40, 42))],
		Vec::new(),
		Rope::from_str("if err != nil {\n  return err\n}"),
	);
	let out = reconciler(|_| {}).instructions(&set, &[]);
	assert_eq!(out.len(), 1);
	assert_eq!(out[0].rows(), RowRange::new(0, 2));
}

#[test]
fn nested_regions_each_get_an_instruction() {
	let source = "if err != nil {\n\tif err != nil {\n\t\treturn err\n\t}\n}\n";
	let set = RegionSet::new(vec![Region::simple(span(0, 4)), Region::simple(span(1, 3))], Vec::new(), Rope::from_str(source));
	let out = reconciler(|_| {}).instructions(&set, &[2]);
	assert_eq!(
		out,
		vec![
			Instruction::Reveal { rows: RowRange::new(0, 4) },
			Instruction::Reveal { rows: RowRange::new(1, 3) },
		]
	);
}

#[test]
fn reconcile_is_idempotent() {
	let mut store = store_with(&[(VP_1, Some(4)), (VP_2, Some(0))]);
	let r = reconciler(|_| {});
	let first = r.reconcile(DOC, &declared_block(), &mut store, &all_live);
	let second = r.reconcile(DOC, &declared_block(), &mut store, &all_live);
	assert_eq!(first, second);
}
