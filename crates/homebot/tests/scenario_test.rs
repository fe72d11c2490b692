use homebot::model::Control;
use homebot::model::Entry;
use homebot::model::ModelError;
use homebot::model::Node;
use homebot::parse_document;

const SCENARIO: &str = "
[ $N(kitchen) $G( {$N(light) $C(switch)} {$N(fan) $C(regulate)} ) ]
{$N(pump) $C(switch)}
";

#[test]
fn test_scenario_structure() {
    let building = parse_document(SCENARIO).unwrap();
    assert_eq!(building.name(), "house");
    assert_eq!(building.entries().len(), 2);

    let kitchen = building.entry("kitchen").and_then(Entry::as_room).unwrap();
    let devices: Vec<_> = kitchen
        .devices()
        .iter()
        .map(|device| (device.name(), device.control()))
        .collect();
    assert_eq!(
        devices,
        [("light", Control::Switch), ("fan", Control::Regulate)]
    );

    let pump = building.entry("pump").and_then(Entry::as_device).unwrap();
    assert_eq!(pump.control(), Control::Switch);
}

#[test]
fn test_scenario_resolution() {
    let building = parse_document(SCENARIO).unwrap();

    match building.resolve("house/kitchen/light").unwrap() {
        Node::Device(device) => {
            assert_eq!(device.name(), "light");
            assert_eq!(device.control(), Control::Switch);
        }
        other => panic!("Expected device, got {other:?}"),
    }

    match building.resolve("house/pump").unwrap() {
        Node::Device(device) => assert_eq!(device.name(), "pump"),
        other => panic!("Expected device, got {other:?}"),
    }

    assert_eq!(
        building.resolve("house/kitchen/missing").unwrap_err(),
        ModelError::PathNotFound {
            path: "house/kitchen/missing".to_string()
        }
    );
}

#[test]
fn test_scenario_paths() {
    let building = parse_document(SCENARIO).unwrap();
    assert_eq!(
        building.paths(),
        [
            "house",
            "house/kitchen",
            "house/kitchen/light",
            "house/kitchen/fan",
            "house/pump",
        ]
    );
}

#[test]
fn test_resolve_tolerates_surrounding_slashes() {
    let building = parse_document(SCENARIO).unwrap();
    assert!(matches!(
        building.resolve("/house/kitchen/"),
        Ok(Node::Room(room)) if room.name() == "kitchen"
    ));
    assert!(matches!(building.resolve("house"), Ok(Node::Building(_))));
}
