//! End-to-end synchronization scenarios against temp-dir workspaces.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use propsync::config::WorkspaceConfig;
use propsync::document::{DocumentStore, LocalStore};
use propsync::language::Language;
use propsync::sync::{AutoConfirm, Confirm, FsApplier, SyncEngine, SyncStatus};
use propsync::workspace::Workspace;

struct RecordingConfirm {
    accept: bool,
    messages: RefCell<Vec<String>>,
}

impl RecordingConfirm {
    fn new(accept: bool) -> Self {
        Self {
            accept,
            messages: RefCell::new(Vec::new()),
        }
    }
}

impl Confirm for RecordingConfirm {
    fn confirm(&self, message: &str, _accept: &str, _cancel: &str) -> propsync::Result<bool> {
        self.messages.borrow_mut().push(message.to_string());
        Ok(self.accept)
    }
}

fn setup(files: &[(&str, &str)]) -> (tempfile::TempDir, Workspace) {
    let dir = tempfile::tempdir().unwrap();
    for (rel, content) in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
    let ws = Workspace::with_config(dir.path(), WorkspaceConfig::default());
    (dir, ws)
}

fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).unwrap()
}

fn save(ws: &Workspace, rel: &str) -> propsync::sync::SaveSyncReport {
    save_with(ws, rel, &AutoConfirm { accept: true })
}

fn save_with(ws: &Workspace, rel: &str, confirm: &dyn Confirm) -> propsync::sync::SaveSyncReport {
    let store = LocalStore::new();
    let applier = FsApplier::new(&store);
    let engine = SyncEngine::new(ws, &store, &applier, confirm);
    let doc = store.open(&ws.root.join(rel)).unwrap();
    engine.on_save(&doc).unwrap()
}

// Scenario A: definition and one usage in the saved document; the
// usage is missing `onClick` and gets a placeholder insertion.
#[test]
fn definition_to_usage_inserts_placeholder() {
    let (dir, ws) = setup(&[(
        "src/card.tsx",
        "function Card({ title, onClick }) { return null; }\nexport const App = () => <Card title=\"x\" />;\n",
    )]);

    let report = save(&ws, "src/card.tsx");

    assert_eq!(report.definitions.len(), 1);
    assert_eq!(report.definitions[0].status, SyncStatus::Applied);
    assert_eq!(report.definitions[0].insertions, 1);

    let content = read(dir.path(), "src/card.tsx");
    assert!(content.contains("onClick={/* TODO: completar */}/>"));
    // The definition itself is untouched.
    assert!(content.contains("function Card({ title, onClick })"));
}

// Scenario B: arrow definition in another file is widened by a usage
// prop, and the chained propagation finds nothing left to do.
#[test]
fn usage_to_definition_widens_prop_list() {
    let (dir, ws) = setup(&[
        ("src/btn.tsx", "const Btn = ({ label }) => null;\n"),
        (
            "src/app.tsx",
            "export const App = () => <Btn label=\"a\" variant=\"b\" />;\n",
        ),
    ]);

    let report = save(&ws, "src/app.tsx");

    assert_eq!(report.usages.len(), 1);
    let usage = &report.usages[0];
    assert_eq!(usage.status, SyncStatus::Applied);
    assert_eq!(usage.added_props, vec!["variant"]);

    let btn = read(dir.path(), "src/btn.tsx");
    assert!(btn.contains("const Btn = ({label, variant}) => null;"));

    // Chained Definition→Usage pass found the triggering usage complete.
    assert_eq!(usage.propagation.as_ref().unwrap().status, SyncStatus::InSync);
}

// A widened definition reaches usage sites in files other than the
// one that triggered the update.
#[test]
fn chained_propagation_reaches_other_files() {
    let (dir, ws) = setup(&[
        ("src/btn.tsx", "const Btn = ({ label }) => null;\n"),
        (
            "src/app.tsx",
            "export const App = () => <Btn label=\"a\" variant=\"b\" />;\n",
        ),
        ("src/other.tsx", "const Page = () => <Btn label=\"c\" />;\n"),
    ]);

    let report = save(&ws, "src/app.tsx");

    let propagation = report.usages[0].propagation.as_ref().unwrap();
    assert_eq!(propagation.status, SyncStatus::Applied);
    assert_eq!(propagation.insertions, 1);

    let other = read(dir.path(), "src/other.tsx");
    assert!(other.contains("variant={/* TODO: completar */}"));
    // The triggering file already had the prop and stays unchanged.
    let app = read(dir.path(), "src/app.tsx");
    assert!(!app.contains("TODO: completar"));
}

// Scenario C: a usage supplying fewer props than the definition causes
// no edit — narrowing is never performed.
#[test]
fn narrowing_is_never_performed() {
    let (dir, ws) = setup(&[
        ("src/box.tsx", "function Box({ a, b, c }) { return null; }\n"),
        ("src/app.tsx", "const App = () => <Box a={1} b={2} />;\n"),
    ]);

    let before_box = read(dir.path(), "src/box.tsx");
    let before_app = read(dir.path(), "src/app.tsx");

    let report = save(&ws, "src/app.tsx");

    assert_eq!(report.usages[0].status, SyncStatus::InSync);
    assert!(report.usages[0].added_props.is_empty());
    assert_eq!(read(dir.path(), "src/box.tsx"), before_box);
    assert_eq!(read(dir.path(), "src/app.tsx"), before_app);
}

// Scenario D: two usages in one file, only the incomplete one is edited.
#[test]
fn only_incomplete_occurrences_are_edited() {
    let (dir, ws) = setup(&[(
        "src/modal.tsx",
        "function Modal({ onClose, title }) { return null; }\nconst A = () => <Modal title=\"t\" />;\nconst B = () => <Modal onClose={close} title=\"u\" />;\n",
    )]);

    let report = save(&ws, "src/modal.tsx");

    assert_eq!(report.definitions[0].insertions, 1);

    let content = read(dir.path(), "src/modal.tsx");
    assert_eq!(content.matches("TODO: completar").count(), 1);
    assert!(content.contains("onClose={/* TODO: completar */}/>"));
    assert!(content.contains("<Modal onClose={close} title=\"u\" />"));
}

// Running the same save twice produces an empty plan the second time.
#[test]
fn definition_propagation_is_idempotent() {
    let (dir, ws) = setup(&[(
        "src/card.tsx",
        "function Card({ title, onClick }) { return null; }\nconst App = () => <Card title=\"x\" />;\n",
    )]);

    let first = save(&ws, "src/card.tsx");
    assert_eq!(first.definitions[0].status, SyncStatus::Applied);

    let after_first = read(dir.path(), "src/card.tsx");
    let second = save(&ws, "src/card.tsx");

    assert_eq!(second.definitions[0].status, SyncStatus::InSync);
    assert_eq!(second.definitions[0].insertions, 0);
    assert_eq!(read(dir.path(), "src/card.tsx"), after_first);
}

// Order preservation: the pre-sync definition prop list survives as an
// exact prefix of the widened list.
#[test]
fn definition_prop_order_is_preserved() {
    let (dir, ws) = setup(&[
        ("src/list.tsx", "const List = ({ items, renderItem }) => null;\n"),
        (
            "src/app.tsx",
            "const App = () => <List renderItem={r} items={x} onEmpty={e} />;\n",
        ),
    ]);

    save(&ws, "src/app.tsx");

    let list = read(dir.path(), "src/list.tsx");
    assert!(list.contains("({items, renderItem, onEmpty})"));
}

// De-duplication: Usage→Definition runs once per component per save,
// fed by the first observed usage only.
#[test]
fn usage_propagation_runs_once_per_component() {
    let (dir, ws) = setup(&[
        ("src/thing.tsx", "function Thing({ a }) { return null; }\n"),
        (
            "src/app.tsx",
            "const App = () => (<><Thing a={1} b={2} /><Thing a={1} c={3} /></>);\n",
        ),
    ]);

    let confirm = RecordingConfirm::new(true);
    let report = save_with(&ws, "src/app.tsx", &confirm);

    assert_eq!(report.usages.len(), 1);
    assert_eq!(report.usages[0].added_props, vec!["b"]);

    let thing = read(dir.path(), "src/thing.tsx");
    // `c` came from the second tag and is not pulled into the
    // definition; that tag instead receives a `b` placeholder.
    let defs = propsync::scan::extract_definitions(&thing);
    assert_eq!(defs[0].props, vec!["a", "b"]);

    // The second tag gets a `b` placeholder from the chained pass.
    let app = read(dir.path(), "src/app.tsx");
    assert_eq!(app.matches("b={/* TODO: completar */}").count(), 1);

    let widen_prompts = confirm
        .messages
        .borrow()
        .iter()
        .filter(|m| m.contains("not in its definition"))
        .count();
    assert_eq!(widen_prompts, 1);
}

// Test files are invisible to both search and propagation.
#[test]
fn test_files_are_never_edited() {
    let (dir, ws) = setup(&[
        (
            "src/card.tsx",
            "function Card({ title, onClick }) { return null; }\n",
        ),
        ("src/__tests__/fixture.tsx", "const T = () => <Card title=\"x\" />;\n"),
        ("src/card.spec.tsx", "const S = () => <Card title=\"y\" />;\n"),
    ]);

    let report = save(&ws, "src/card.tsx");

    assert_eq!(report.definitions[0].status, SyncStatus::InSync);
    assert!(!read(dir.path(), "src/__tests__/fixture.tsx").contains("TODO"));
    assert!(!read(dir.path(), "src/card.spec.tsx").contains("TODO"));
}

// Declining the confirmation discards the entire pending edit set.
#[test]
fn declined_confirmation_discards_all_edits() {
    let (dir, ws) = setup(&[
        (
            "src/card.tsx",
            "function Card({ title, onClick }) { return null; }\nconst App = () => <Card title=\"x\" />;\n",
        ),
        ("src/page.tsx", "const Page = () => <Card title=\"y\" />;\n"),
    ]);

    let before_card = read(dir.path(), "src/card.tsx");
    let before_page = read(dir.path(), "src/page.tsx");

    let report = save_with(&ws, "src/card.tsx", &AutoConfirm { accept: false });

    assert_eq!(report.definitions[0].status, SyncStatus::Declined);
    assert_eq!(read(dir.path(), "src/card.tsx"), before_card);
    assert_eq!(read(dir.path(), "src/page.tsx"), before_page);
}

// A component with no definition anywhere is silently skipped.
#[test]
fn missing_definition_is_a_noop() {
    let (dir, ws) = setup(&[(
        "src/app.tsx",
        "const App = () => <Ghost a={1} />;\n",
    )]);

    let before = read(dir.path(), "src/app.tsx");
    let report = save(&ws, "src/app.tsx");

    assert_eq!(report.usages[0].status, SyncStatus::NoDefinition);
    assert_eq!(read(dir.path(), "src/app.tsx"), before);
}

// Unsupported document languages are ignored entirely.
#[test]
fn unsupported_language_is_ignored() {
    let (dir, ws) = setup(&[("notes.md", "<Card title=\"x\" />\n")]);

    let store = LocalStore::new();
    let applier = FsApplier::new(&store);
    let confirm = AutoConfirm { accept: true };
    let engine = SyncEngine::new(&ws, &store, &applier, &confirm);

    let doc = store.open(&PathBuf::from(dir.path().join("notes.md"))).unwrap();
    let report = engine.on_save(&doc).unwrap();

    assert!(report.language.is_none());
    assert!(report.definitions.is_empty());
    assert!(report.usages.is_empty());
}

// An embedding editor can supply the language id directly, bypassing
// extension-based detection for documents it knows better.
#[test]
fn explicit_language_overrides_extension_gate() {
    let (dir, ws) = setup(&[
        (
            "component.snippet",
            "function Card({ title, onClick }) { return null; }\n",
        ),
        ("src/app.tsx", "const App = () => <Card title=\"x\" />;\n"),
    ]);

    let store = LocalStore::new();
    let applier = FsApplier::new(&store);
    let confirm = AutoConfirm { accept: true };
    let engine = SyncEngine::new(&ws, &store, &applier, &confirm);
    let doc = store.open(&ws.root.join("component.snippet")).unwrap();

    // Extension-based detection ignores the document.
    assert!(engine.on_save(&doc).unwrap().language.is_none());

    let report = engine.on_save_as(&doc, Language::TypeScriptReact).unwrap();
    assert_eq!(report.language.as_deref(), Some("typescriptreact"));
    assert_eq!(report.definitions[0].status, SyncStatus::Applied);
    assert!(read(dir.path(), "src/app.tsx").contains("onClick={/* TODO: completar */}"));
}

// Widening-only, both directions at once: nothing that existed before
// a sync is missing after it.
#[test]
fn sync_only_ever_widens() {
    let (dir, ws) = setup(&[
        ("src/form.tsx", "const Form = ({ value, onChange }) => null;\n"),
        (
            "src/app.tsx",
            "const App = () => <Form value={v} onSubmit={s} />;\n",
        ),
    ]);

    save(&ws, "src/app.tsx");

    let form = read(dir.path(), "src/form.tsx");
    for prop in ["value", "onChange", "onSubmit"] {
        assert!(form.contains(prop), "definition lost prop {}", prop);
    }
    // The usage gained the definition prop it was missing.
    let app = read(dir.path(), "src/app.tsx");
    assert!(app.contains("value={v}"));
    assert!(app.contains("onSubmit={s}"));
    assert!(app.contains("onChange={/* TODO: completar */}"));
}
