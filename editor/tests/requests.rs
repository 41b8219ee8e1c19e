use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use redlilium_editor::{Project, ProjectRequest, RequestKind};
use redlilium_scene::{ComponentId, NodeId, Scene};
use tempfile::TempDir;

const PROJECT_TOML: &str = r#"
[project]
name = "Sample"

[[mount]]
name = "data"
path = "Data"
default = true
"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write(root: &Path, name: &str, contents: &str) {
    let full = root.join(name);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(full, contents).unwrap();
}

fn sample_project() -> (TempDir, Project) {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "project.toml", PROJECT_TOML);
    write(dir.path(), "Data/Scenes/Main.xml", "<scene><node name=\"Root\"/></scene>");
    write(dir.path(), "Data/Materials/Stone.XML", "<material/>");
    write(dir.path(), "Data/Settings.json", "{\"vsync\": true}");
    write(dir.path(), "Data/Readme.txt", "hello");

    let project = Project::open(&dir.path().join("project.toml")).unwrap();
    (dir, project)
}

// ---------------------------------------------------------------------------
// Open resource
// ---------------------------------------------------------------------------

#[test]
fn open_resource_routes_by_type_hint() {
    let (_dir, mut project) = sample_project();
    let opened = Rc::new(RefCell::new(Vec::new()));

    let sink = opened.clone();
    project.dispatcher_mut().subscribe(move |request| {
        let Some(open) = request.as_open_resource() else {
            return;
        };
        if open.type_hint() == "scene" {
            let sink = sink.clone();
            let name = open.resource_name().to_owned();
            request.queue_process_callback(
                Box::new(move || sink.borrow_mut().push(format!("scene editor: {name}"))),
                10,
            );
        }
    });

    let sink = opened.clone();
    project.dispatcher_mut().subscribe(move |request| {
        if let Some(open) = request.as_open_resource()
            && open.is_valid_file()
        {
            let sink = sink.clone();
            let name = open.resource_name().to_owned();
            request.queue_process_callback(
                Box::new(move || sink.borrow_mut().push(format!("text editor: {name}"))),
                0,
            );
        }
    });

    let request = project.request_open_resource("Scenes/Main.xml");
    assert_eq!(request.pending_callbacks(), 1);

    project.request_open_resource("Readme.txt");
    project.request_open_resource("Missing.xml");

    assert_eq!(
        *opened.borrow(),
        vec![
            "scene editor: Scenes/Main.xml".to_owned(),
            "text editor: Readme.txt".to_owned(),
        ]
    );
}

#[test]
fn open_resource_exposes_parsed_views() {
    let (_dir, project) = sample_project();

    let xml = ProjectRequest::open_resource(project.vfs(), "Materials/Stone.XML");
    let open = xml.as_open_resource().unwrap();
    assert!(open.has_extension(".xml"));
    assert_eq!(open.type_hint(), "material");

    let json = ProjectRequest::open_resource(project.vfs(), "Settings.json");
    let open = json.as_open_resource().unwrap();
    assert_eq!(open.type_hint(), "");
    assert_eq!(open.json_file().unwrap().root()["vsync"], true);
}

#[test]
fn missing_resource_fails_softly() {
    let (_dir, project) = sample_project();
    let request = ProjectRequest::open_resource(project.vfs(), "missing/file.xml");
    let open = request.as_open_resource().unwrap();

    assert!(!open.is_valid_file());
    assert!(open.xml_file().is_none());
    assert!(open.xml_file().is_none());
    assert!(open.binary_file().is_none());
}

// ---------------------------------------------------------------------------
// Inspect resources
// ---------------------------------------------------------------------------

#[test]
fn inspect_resources_keeps_input_order() {
    let (_dir, project) = sample_project();
    let request = project.request_inspect_resources(["Settings.json", "Readme.txt", "Nope.bin"]);

    let RequestKind::InspectResource(inspect) = request.kind() else {
        panic!("expected inspect request, got {}", request.name());
    };
    let valid: Vec<bool> = inspect
        .resources()
        .iter()
        .map(|resource| resource.is_valid_file())
        .collect();
    assert_eq!(valid, vec![true, true, false]);
    assert_eq!(
        inspect.sorted_resource_names(),
        vec!["Nope.bin", "Readme.txt", "Settings.json"]
    );
    assert_eq!(inspect.resources()[0].resource_name(), "Settings.json");
}

// ---------------------------------------------------------------------------
// Inspect nodes and components
// ---------------------------------------------------------------------------

#[test]
fn inspect_nodes_is_canonical_and_skips_removed() {
    let (_dir, mut project) = sample_project();
    let mut scene = Scene::new();
    let root = scene.create_node("Root");
    let camera = scene.create_child(root, "Camera").unwrap();
    let light = scene.create_child(root, "Light").unwrap();
    let light_component = scene.create_component(light, "Light").unwrap();

    let inspected = Rc::new(RefCell::new(0usize));
    let sink = inspected.clone();
    project.dispatcher_mut().subscribe(move |request| {
        if let Some(inspect) = request.as_inspect_node_component()
            && inspect.has_nodes()
        {
            let count = inspect.nodes().len();
            let sink = sink.clone();
            request.queue_process_callback(Box::new(move || *sink.borrow_mut() = count), 0);
        }
    });

    let request = project.request_inspect_node_components(
        [Some(light), None, Some(camera)],
        [Some(light_component)],
    );
    assert_eq!(*inspected.borrow(), 2);

    let inspect = request.as_inspect_node_component().unwrap();
    let reversed = ProjectRequest::inspect_node_components(
        [camera, light],
        Vec::<ComponentId>::new(),
    );
    assert_eq!(
        inspect.nodes(),
        reversed.as_inspect_node_component().unwrap().nodes()
    );
    assert!(inspect.has_components());

    scene.remove_node(light);
    let alive: Vec<NodeId> = inspect.alive_nodes(&scene).collect();
    assert_eq!(alive, vec![camera]);
    assert_eq!(inspect.alive_components(&scene).count(), 0);
}

#[test]
fn empty_selection_is_not_handled() {
    let (_dir, project) = sample_project();
    let request = project.request_inspect_node_components(
        Vec::<Option<NodeId>>::new(),
        vec![None::<ComponentId>],
    );
    let inspect = request.as_inspect_node_component().unwrap();
    assert!(inspect.is_empty());
    assert!(!request.invoke_process_callback());
}

// ---------------------------------------------------------------------------
// Deferred reactions
// ---------------------------------------------------------------------------

#[test]
fn remaining_callbacks_can_be_drained_later() {
    let (_dir, mut project) = sample_project();
    let order = Rc::new(RefCell::new(Vec::new()));

    for priority in [5, -5, 20] {
        let order = order.clone();
        project.dispatcher_mut().subscribe(move |request| {
            let order = order.clone();
            request.queue_process_callback(
                Box::new(move || order.borrow_mut().push(priority)),
                priority,
            );
        });
    }

    let request = project.request_open_resource("Readme.txt");
    assert_eq!(*order.borrow(), vec![20]);

    while request.invoke_process_callback() {}
    assert_eq!(*order.borrow(), vec![20, 5, -5]);
}
