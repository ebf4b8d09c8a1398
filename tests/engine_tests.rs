//! Engine integration tests
//!
//! End-to-end classification through the comment oracle, the extractor and
//! the parser, plus settings reloads.

use std::sync::Arc;

use doxyspan::{
    Classification, CommentFlavor, Engine, FileSettingsStore, FixedOracle, FlavorToggles, Language,
    MemorySettingsStore, Settings, SettingsStore, TextRange, TextSnapshot, TreeSitterOracle,
};

fn cpp_engine(settings: Settings) -> Engine {
    let oracle = TreeSitterOracle::new(Language::Cpp).unwrap();
    Engine::with_settings(Arc::new(oracle), settings).unwrap()
}

/// `(text, classification)` of every highlighted fragment
fn highlighted(engine: &mut Engine, text: &str) -> Vec<(String, Classification)> {
    let snapshot = TextSnapshot::new(text, 1);
    engine
        .highlight(&snapshot, snapshot.full_range())
        .unwrap()
        .into_iter()
        .map(|span| (snapshot.slice(span.range).to_string(), span.classification))
        .collect()
}

fn frag(text: &str, classification: Classification) -> (String, Classification) {
    (text.to_string(), classification)
}

// =============================================================================
// Scenarios
// =============================================================================

mod scenario_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_brief_in_triple_slash() {
        let mut engine = cpp_engine(Settings::default());
        let snapshot = TextSnapshot::new("/// \\brief Does X.", 1);
        let spans = engine.highlight(&snapshot, snapshot.full_range()).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].range, TextRange::new(4, 6));
        assert_eq!(spans[0].classification, Classification::Command);
    }

    #[test]
    fn test_param_with_direction() {
        let mut engine = cpp_engine(Settings::default());
        assert_eq!(
            highlighted(&mut engine, "/// \\param[in] x  the value\nvoid f(int x);\n"),
            vec![
                frag("\\param", Classification::Command),
                frag("[in]", Classification::ParameterClamped),
                frag("x", Classification::Parameter1),
            ]
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut engine = cpp_engine(Settings::default());
        assert!(highlighted(&mut engine, "/// \\unknownxyz foo\n").is_empty());
    }

    #[test]
    fn test_disabled_double_slash() {
        let text = "// \\brief plain\n/// \\brief doc\n";
        let mut engine = cpp_engine(Settings::default());
        let snapshot = TextSnapshot::new(text, 1);
        let spans = engine.highlight(&snapshot, snapshot.full_range()).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].range.start, text.rfind("\\brief").unwrap());

        let settings = Settings {
            flavors: FlavorToggles::all_enabled(),
            ..Settings::default()
        };
        let mut engine = cpp_engine(settings);
        assert_eq!(engine.highlight(&snapshot, snapshot.full_range()).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_option_degrades_gracefully() {
        let mut engine = cpp_engine(Settings::default());
        assert_eq!(
            highlighted(&mut engine, "/// \\snippet{bogus} name text\n"),
            vec![
                frag("\\snippet", Classification::Command),
                frag("name", Classification::Parameter1),
                frag("text", Classification::Parameter2),
            ]
        );
    }

    #[test]
    fn test_code_outside_comments_is_ignored() {
        let mut engine = cpp_engine(Settings::default());
        let text = "const char* s = \"\\brief not a comment\";\n";
        assert!(highlighted(&mut engine, text).is_empty());
    }
}

// =============================================================================
// Properties
// =============================================================================

mod property_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = include_str!("../demos/ExampleSource.cpp");

    #[test]
    fn test_deterministic() {
        let first = highlighted(&mut cpp_engine(Settings::default()), SOURCE);
        let second = highlighted(&mut cpp_engine(Settings::default()), SOURCE);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_groups_are_sorted_and_disjoint() {
        let mut engine = cpp_engine(Settings::default());
        let snapshot = TextSnapshot::new(SOURCE, 1);
        let groups = engine.fragment_groups(&snapshot, snapshot.full_range()).unwrap();
        for pair in groups.windows(2) {
            assert!(pair[0].end_offset() <= pair[1].start_offset(), "{pair:?}");
        }
    }

    #[test]
    fn test_fragments_lie_inside_comments() {
        let mut engine = cpp_engine(Settings::default());
        let snapshot = TextSnapshot::new(SOURCE, 1);
        let range = snapshot.full_range();
        let spans = engine.comment_spans(&snapshot, range).unwrap();
        for fragment in engine.highlight(&snapshot, range).unwrap() {
            assert!(
                spans.iter().any(|s| s.range.start <= fragment.range.start
                    && fragment.range.end() <= s.range.end()),
                "fragment {} outside every comment",
                fragment.range
            );
        }
    }

    #[test]
    fn test_offsets_are_bytes() {
        let mut engine = cpp_engine(Settings::default());
        assert_eq!(
            highlighted(&mut engine, "/// Größe \\p count\n"),
            vec![
                frag("\\p", Classification::Command),
                frag("count", Classification::InlineCode),
            ]
        );
        let snapshot = TextSnapshot::new("/// Größe \\p count\n", 1);
        let spans = engine.highlight(&snapshot, snapshot.full_range()).unwrap();
        assert_eq!(spans[0].range, TextRange::new(12, 2));
    }

    #[test]
    fn test_earliest_occurrence_wins() {
        let mut engine = cpp_engine(Settings::default());
        assert_eq!(
            highlighted(&mut engine, "/// \\section intro \\\\cite label\n"),
            vec![
                frag("\\section", Classification::Command),
                frag("intro", Classification::Parameter1),
                frag("\\\\cite label", Classification::Title),
            ]
        );
    }
}

// =============================================================================
// Flavor resolution
// =============================================================================

mod flavor_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_engine(tokens: &[(usize, usize)], settings: Settings) -> Engine {
        let tokens = tokens.iter().map(|&(s, e)| TextRange::from_bounds(s, e)).collect();
        Engine::with_settings(Arc::new(FixedOracle::new(tokens)), settings).unwrap()
    }

    fn flavors(engine: &mut Engine, text: &str) -> Vec<CommentFlavor> {
        let snapshot = TextSnapshot::new(text, 1);
        engine
            .comment_spans(&snapshot, snapshot.full_range())
            .unwrap()
            .into_iter()
            .map(|span| span.flavor)
            .collect()
    }

    #[test]
    fn test_continued_block_comment() {
        let text = "/**\n * \\brief Block.\n */\n/*! \\note Qt */\n";
        let mut engine = cpp_engine(Settings::default());
        assert_eq!(
            flavors(&mut engine, text),
            vec![
                CommentFlavor::SlashStarStar,
                CommentFlavor::SlashStarStar,
                CommentFlavor::SlashStarStar,
                CommentFlavor::SlashStarExclamation,
            ]
        );

        let mut settings = Settings::default();
        settings.flavors.slash_star_star = false;
        let mut engine = cpp_engine(settings);
        assert_eq!(
            highlighted(&mut engine, text),
            vec![frag("\\note", Classification::Note)]
        );
    }

    #[test]
    fn test_blank_lines_inside_block() {
        let text = "/**\n\n   \n * \\brief x\n */";
        let mut engine = fixed_engine(&[(0, text.len())], Settings::default());
        assert_eq!(
            flavors(&mut engine, text),
            vec![
                CommentFlavor::SlashStarStar,
                CommentFlavor::SlashStarStar,
                CommentFlavor::SlashStarStar,
                CommentFlavor::SlashStarStar,
            ]
        );
        assert_eq!(highlighted(&mut engine, text), vec![frag("\\brief", Classification::Command)]);
    }

    #[test]
    fn test_double_slash_inside_exclamation_block() {
        let text = "/*! see // \\p value */";
        let mut engine = fixed_engine(&[(0, text.len())], Settings::default());
        assert_eq!(flavors(&mut engine, text), vec![CommentFlavor::SlashStarExclamation]);
        assert_eq!(
            highlighted(&mut engine, text),
            vec![
                frag("\\p", Classification::Command),
                frag("value", Classification::InlineCode),
            ]
        );
    }

    #[test]
    fn test_backslash_continuation() {
        let text = "/// first \\\n\\brief continued\n// \\brief plain";
        let first_end = text.find("continued").unwrap() + "continued".len();
        let plain = text.rfind("//").unwrap();
        let mut engine = fixed_engine(&[(0, first_end), (plain, text.len())], Settings::default());
        assert_eq!(
            flavors(&mut engine, text),
            vec![
                CommentFlavor::TripleSlash,
                CommentFlavor::TripleSlash,
                CommentFlavor::DoubleSlash,
            ]
        );
        assert_eq!(highlighted(&mut engine, text), vec![frag("\\brief", Classification::Command)]);
    }

    #[test]
    fn test_unknown_flavor_is_not_parsed() {
        let text = "x \\brief y";
        let mut engine = fixed_engine(&[(2, text.len())], Settings::default());
        assert_eq!(flavors(&mut engine, text), vec![CommentFlavor::Unknown]);
        assert!(highlighted(&mut engine, text).is_empty());
    }

    #[test]
    fn test_reclassification_invalidates() {
        let text = "/// \\brief a\n/// \\brief b";
        let oracle = Arc::new(FixedOracle::new(vec![TextRange::new(0, 12)]));
        let mut engine = Engine::with_settings(oracle.clone(), Settings::default()).unwrap();
        let snapshot = TextSnapshot::new(text, 1);
        let range = snapshot.full_range();
        assert_eq!(engine.highlight(&snapshot, range).unwrap().len(), 1);

        oracle.set_tokens(vec![TextRange::new(0, 12), TextRange::new(13, 12)], range);
        assert_eq!(engine.highlight(&snapshot, range).unwrap().len(), 2);
    }
}

// =============================================================================
// Settings
// =============================================================================

mod settings_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use doxyspan::{CommandConfigEntry, ConfigError, Error};

    fn brief_as(classification: Classification) -> CommandConfigEntry {
        CommandConfigEntry {
            command: "brief".to_string(),
            command_classification: classification,
            parameter_classifications: vec![],
        }
    }

    #[test]
    fn test_memory_store_change_applies_on_next_query() {
        let store = Arc::new(MemorySettingsStore::new(Settings::default()));
        let oracle = TreeSitterOracle::new(Language::Cpp).unwrap();
        let mut engine = Engine::new(Arc::new(oracle), store.clone()).unwrap();
        assert_eq!(
            highlighted(&mut engine, "/// \\brief x\n"),
            vec![frag("\\brief", Classification::Command)]
        );

        store.update(|s| s.commands = vec![brief_as(Classification::Generic3)]);
        assert_eq!(
            highlighted(&mut engine, "/// \\brief x\n"),
            vec![frag("\\brief", Classification::Generic3)]
        );
    }

    #[test]
    fn test_invalid_settings_keep_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        Settings::default().save(&path).unwrap();
        let store = Arc::new(FileSettingsStore::open(&path).unwrap());
        let oracle = TreeSitterOracle::new(Language::Cpp).unwrap();
        let mut engine = Engine::new(Arc::new(oracle), store.clone()).unwrap();
        let before = engine.snapshot();

        std::fs::write(
            &path,
            r#"{"version": 2, "commands": [{"command": "bogus", "commandClassification": 0}]}"#,
        )
        .unwrap();
        store.reload().unwrap();

        let snapshot = TextSnapshot::new("/// \\brief x\n", 1);
        let err = engine.highlight(&snapshot, snapshot.full_range()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnknownCommand(ref c)) if c == "bogus"));
        assert!(Arc::ptr_eq(&before, &engine.snapshot()));
        assert_eq!(engine.highlight(&snapshot, snapshot.full_range()).unwrap().len(), 1);

        let mut settings = store.settings();
        settings.commands = vec![brief_as(Classification::Warning)];
        store.save(settings).unwrap();
        assert_eq!(
            highlighted(&mut engine, "/// \\brief x\n"),
            vec![frag("\\brief", Classification::Warning)]
        );
        assert!(!Arc::ptr_eq(&before, &engine.snapshot()));
    }

    #[test]
    fn test_markdown_toggle() {
        let text = "/// **bold** and `code`\n";
        let mut engine = cpp_engine(Settings::default());
        assert_eq!(
            highlighted(&mut engine, text),
            vec![
                frag("**bold**", Classification::EmphasisMajor),
                frag("`code`", Classification::InlineCode),
            ]
        );

        let settings = Settings {
            markdown: false,
            ..Settings::default()
        };
        assert!(highlighted(&mut cpp_engine(settings), text).is_empty());
    }
}

// =============================================================================
// Completion and hover
// =============================================================================

mod consumer_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use doxyspan::DescriptionPart;

    #[test]
    fn test_completions_follow_typed_marker() {
        let text = "int a;\n/** \\\n */\n// @";
        let mut engine = cpp_engine(Settings::default());
        let snapshot = TextSnapshot::new(text, 1);

        let after_backslash = text.find('\\').unwrap() + 1;
        let items = engine.completions_at(&snapshot, after_backslash).unwrap().unwrap();
        assert_eq!(items.len(), engine.completions().unwrap().len());
        assert!(items.iter().all(|item| item.label.starts_with('\\')));

        // Plain `//` is disabled by default.
        assert!(engine.completions_at(&snapshot, text.len()).unwrap().is_none());
        // Code, not a comment.
        assert!(engine.completions_at(&snapshot, 3).unwrap().is_none());
    }

    #[test]
    fn test_hover_describes_command() {
        let text = "/// \\ingroup Widgets\nvoid f();\n";
        let mut engine = cpp_engine(Settings::default());
        let snapshot = TextSnapshot::new(text, 1);

        let hover = engine.hover(&snapshot, 6).unwrap().unwrap();
        assert_eq!(hover.description.command, "ingroup");
        assert_eq!(hover.group.fragments.len(), 2);
        assert!(hover
            .description
            .parts
            .iter()
            .all(|part| !part.text().is_empty()));

        assert!(engine.hover(&snapshot, text.find("void").unwrap()).unwrap().is_none());
    }

    #[test]
    fn test_description_classifies_references() {
        let mut engine = cpp_engine(Settings::default());
        let description = engine.describe("addtogroup").unwrap().unwrap();
        assert!(description.parts.iter().any(|part| matches!(
            part,
            DescriptionPart::Fragment { text, classification: Classification::Command } if text == "\\defgroup"
        )));
        assert!(engine.describe("unknownxyz").unwrap().is_none());
    }
}
