//! End-to-end tests for the directive synchronization core: parse a lesson,
//! edit structural containers through sessions, and keep identity tracking
//! in sync through markdown-changed notifications.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use chalkmark_directives::{find_matching_preset, GRID_PRESETS};
use chalkmark_editor::{
    AuthoredId, ContainerSession, DirectiveIdRegistry, Document, EditableTree, VirtualClock,
};
use chalkmark_markdown::{from_markdown, to_markdown};

const LESSON: &str = "\
---
animations:
  - id: a1
    order: 2
  - id: a2
    order: 1
---

# Welcome

:::tabs
:::tabContent{title=\"A\"}
Hello
:::
:::tabContent{title=\"B\"}
World
:::
:::

:::anim{id=\"a1\"}
first animated block
:::

:::anim{id=\"a2\"}
second animated block
:::
";

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[test]
fn test_roundtrip_idempotence_per_family() {
    init_tracing();
    let families = [
        ":::tabs\n:::tabContent{title=\"A\"}\nHello\n:::\n:::",
        ":::steps\n:::stepContent{title=\"Step 1\"}\nDo the thing\n:::\n:::",
        ":::accordion\n:::accordionContent{title=\"Accordion 1\"}\nDetails\n:::\n:::",
        ":::gridContainer\n:::grid{textAlign=\"left\"}\nCell\n:::\n:::",
        ":::imageLabel{id=\"l1\" title=\"Pin\" x=\"20\" y=\"250\"}\nLabel body\n:::",
        ":::anim{id=\"a1\"}\nAnimated\n:::",
        ":fx[glow]{type=\"circle\" color=\"green\"}",
    ];

    for source in families {
        let once = to_markdown(&from_markdown(source).root);
        let twice = to_markdown(&from_markdown(&once).root);
        assert_eq!(once, twice, "round-trip not idempotent for {:?}", source);
    }
}

#[test]
fn test_unknown_attribute_keys_survive_commit() {
    init_tracing();
    let source = ":::tabs{mystery=\"kept\"}\n:::tabContent{title=\"A\" extra=\"also-kept\"}\nHello\n:::\n:::";
    let mut tree = EditableTree::from_markdown_source("/lesson.md", source);
    let key = tree.first_directive("tabs").unwrap().key().clone();
    let mut clock = VirtualClock::new();

    let mut session = ContainerSession::open(&tree, &key).unwrap();
    session.configure(&tree).unwrap().update_label(0, "Renamed");
    session.commit(&mut tree, &mut clock).unwrap();

    let markdown = tree.markdown();
    assert!(markdown.contains("mystery=\"kept\""), "got {}", markdown);
    assert!(markdown.contains("extra=\"also-kept\""), "got {}", markdown);
    assert!(markdown.contains("title=\"Renamed\""));
}

#[test]
fn test_draft_length_invariant_through_session() {
    init_tracing();
    let mut tree = EditableTree::from_markdown_source(
        "/lesson.md",
        ":::steps\n:::stepContent{title=\"S1\"}\nOne\n:::\n:::stepContent{title=\"S2\"}\nTwo\n:::\n:::",
    );
    let key = tree.first_directive("steps").unwrap().key().clone();
    let mut clock = VirtualClock::new();

    let mut session = ContainerSession::open(&tree, &key).unwrap();
    let draft = session.configure(&tree).unwrap();
    let n = draft.len();
    draft.append();
    draft.insert_before(0);
    draft.insert_after(0);
    draft.remove(1);
    assert_eq!(draft.len(), n + 3 - 1);

    let result = session.commit(&mut tree, &mut clock).unwrap();
    let committed = tree.get(&result.new_key).unwrap();
    assert_eq!(committed.node().children().unwrap().len(), n + 2);
}

#[test]
fn test_grid_preset_selection_matches_cell_count() {
    init_tracing();
    assert_eq!(find_matching_preset(2), Some(GRID_PRESETS[1]));

    let source = ":::gridContainer\n:::grid{textAlign=\"left\"}\nX\n:::\n:::grid{textAlign=\"left\"}\nY\n:::\n:::";
    let tree = EditableTree::from_markdown_source("/lesson.md", source);
    let cells = tree
        .first_directive("gridContainer")
        .unwrap()
        .node()
        .children()
        .unwrap()
        .len();
    assert_eq!(find_matching_preset(cells), Some(GRID_PRESETS[1]));
}

#[test]
fn test_identity_tracking_follows_document_edits() {
    init_tracing();
    let mut doc = Document::from_source(PathBuf::from("/lesson.md"), LESSON);

    let registry = Rc::new(RefCell::new(DirectiveIdRegistry::new("anim")));
    let publishes: Rc<RefCell<Vec<Vec<AuthoredId>>>> = Rc::new(RefCell::new(Vec::new()));
    {
        let sink = Rc::clone(&publishes);
        registry
            .borrow_mut()
            .subscribe(move |ids| sink.borrow_mut().push(ids.to_vec()));
    }

    // wire the registry to markdown-changed notifications
    {
        let registry = Rc::clone(&registry);
        doc.tree_mut()
            .subscribe_markdown(move |markdown| {
                registry
                    .borrow_mut()
                    .update_from_markdown(markdown, "markdown-changed");
            });
    }

    // initial scan on mount
    registry
        .borrow_mut()
        .update_from_markdown(&doc.tree().markdown(), "mount");
    {
        let published = publishes.borrow();
        assert_eq!(published.len(), 1);
        let ids: Vec<&str> = published[0].iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    // a tabs commit changes markdown but not the anim id set: scan runs,
    // nothing is re-published
    let tabs_key = doc.tree().first_directive("tabs").unwrap().key().clone();
    let mut clock = VirtualClock::new();
    let mut session = ContainerSession::open(doc.tree(), &tabs_key).unwrap();
    session.configure(doc.tree()).unwrap().append();
    session.commit(doc.tree_mut(), &mut clock).unwrap();
    assert_eq!(publishes.borrow().len(), 1);

    // removing an anim directive does re-publish
    let anim_key = doc.tree().first_directive("anim").unwrap().key().clone();
    doc.tree_mut().remove_node(&anim_key).unwrap();
    {
        let published = publishes.borrow();
        assert_eq!(published.len(), 2);
        assert_eq!(published[1].len(), 1);
    }
}

#[test]
fn test_commit_is_a_single_replace_observable_in_markdown() -> anyhow::Result<()> {
    init_tracing();
    let mut doc = Document::from_source(PathBuf::from("/lesson.md"), LESSON);
    let tabs_key = doc.tree().first_directive("tabs").unwrap().key().clone();
    let mut clock = VirtualClock::new();

    let mut session = ContainerSession::open(doc.tree(), &tabs_key)?;
    let draft = session.configure(doc.tree())?;
    draft.append();
    draft.update_label(2, "Summary");
    session.commit(doc.tree_mut(), &mut clock)?;

    let markdown = doc.tree().markdown();
    let containers = doc
        .tree()
        .blocks()
        .iter()
        .filter(|b| b.directive_name() == Some("tabs"))
        .count();
    assert_eq!(containers, 1);
    assert!(markdown.contains("title=\"Summary\""));
    // untouched siblings still present
    assert!(markdown.contains(":::anim{id=\"a1\"}"));
    assert!(markdown.contains("# Welcome"));
    Ok(())
}

#[test]
fn test_frontmatter_timeline_diverges_from_document_order() {
    init_tracing();
    use chalkmark_directives::AnimationConfig;
    use chalkmark_markdown::split_frontmatter;

    let fm = split_frontmatter(LESSON);
    let config = AnimationConfig::from_frontmatter(fm.yaml.unwrap()).unwrap();
    let timeline: Vec<&str> = config.timeline().iter().map(|a| a.id.as_str()).collect();

    // document order is a1 then a2; timeline order is a2 then a1
    assert_eq!(timeline, vec!["a2", "a1"]);

    let mut registry = DirectiveIdRegistry::new("anim");
    registry.update_from_markdown(LESSON, "mount");
    let registry_order: Vec<&str> = registry.ids().iter().map(|i| i.as_str()).collect();
    assert_eq!(registry_order, vec!["a1", "a2"]);
}

#[test]
fn test_document_survives_malformed_directives() {
    init_tracing();
    // unclosed container, broken attribute fragment, stray closing fence
    let source = ":::tabs\n:::tabContent{title=}\nstill here\n\n:::\n\nplain text";
    let doc = Document::from_source(PathBuf::from("/broken.md"), source);

    let markdown = doc.tree().markdown();
    assert!(markdown.contains("still here"));
    assert!(markdown.contains("plain text"));
    assert!(!doc.tree().diagnostics().is_empty());
}
