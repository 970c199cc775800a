//! Region detection over a realistic Go function mixing every handler shape.

use errfold_language::{LanguageId, Syntax};
use errfold_primitives::{Association, RegionKind, Rope, RowRange};
use errfold_regions::{PatternMatcher, RegionSet};

const SOURCE: &str = r#"package main

func main() {
	file, err := os.Open("app.toml")
	if err != nil {
		return
	}
	defer file.Close()

	user, err := load(file)
	if err != nil {
		if missing(err) {
			user = fallback()
		} else {
			return
		}
	}

	if conn, err := dial(user.Addr); err != nil {
		log.Print("dial failed", err)
		return
	} else {
		defer conn.Close()
	}

	var rows []Row
	if err := db.
		Where("id = ?", user.ID).
		Find(&rows).Error; err != nil {
		respond(map[string]any{"error": "{not a brace}"})
		return
	}
}
"#;

fn build() -> RegionSet {
	let syntax = Syntax::parse(Rope::from_str(SOURCE), LanguageId::Go).expect("go parses");
	RegionSet::build(&syntax, &mut PatternMatcher::new("err"), 3)
}

#[test]
fn every_handler_shape_is_classified() {
	let set = build();
	let summary: Vec<_> = set.regions().iter().map(|r| (r.kind, r.outer_rows(), r.target_rows())).collect();

	assert_eq!(
		summary,
		vec![
			(RegionKind::Assignment, RowRange::single(3), RowRange::single(3)),
			(RegionKind::SimpleBlock, RowRange::new(4, 6), RowRange::new(4, 6)),
			(RegionKind::Assignment, RowRange::single(9), RowRange::single(9)),
			(RegionKind::SimpleBlock, RowRange::new(10, 16), RowRange::new(10, 16)),
			(RegionKind::InlineBlock, RowRange::new(18, 23), RowRange::new(18, 21)),
			(RegionKind::InlineBlock, RowRange::new(26, 31), RowRange::new(28, 31)),
		]
	);
}

#[test]
fn declarations_feed_the_next_handler() {
	let set = build();
	assert_eq!(
		set.associations(),
		&[
			Association {
				declaration: 0,
				target: 1,
				distance: 1,
			},
			Association {
				declaration: 2,
				target: 3,
				distance: 1,
			},
		]
	);
	assert_eq!(set.declaration_rows(3).collect::<Vec<_>>(), vec![RowRange::single(9)]);
	assert_eq!(set.declaration_rows(4).count(), 0);
}

#[test]
fn set_keeps_its_source_snapshot() {
	let set = build();
	assert_eq!(set.source().to_string(), SOURCE);
	assert_eq!(set.blocks().count(), 4);
}

#[test]
fn other_identifier_finds_nothing_here() {
	let syntax = Syntax::parse(Rope::from_str(SOURCE), LanguageId::Go).expect("go parses");
	assert!(RegionSet::build(&syntax, &mut PatternMatcher::new("e"), 3).is_empty());
}

#[test]
fn deeply_nested_handler_body_is_classified() {
	const DEPTH: usize = 5000;
	let nested = format!("{}err{}", "(".repeat(DEPTH), ")".repeat(DEPTH));
	let source = format!("package main\n\nfunc run() error {{\n\terr := fetch()\n\tif err != nil {{\n\t\twrapped := {nested}\n\t\treturn wrapped\n\t}}\n\treturn nil\n}}\n");

	let syntax = Syntax::parse(Rope::from_str(&source), LanguageId::Go).expect("go parses");
	let set = RegionSet::build(&syntax, &mut PatternMatcher::new("err"), 3);

	let summary: Vec<_> = set.regions().iter().map(|r| (r.kind, r.outer_rows())).collect();
	assert_eq!(
		summary,
		vec![(RegionKind::Assignment, RowRange::single(3)), (RegionKind::SimpleBlock, RowRange::new(4, 7))]
	);
	assert_eq!(set.associations().len(), 1);
}
