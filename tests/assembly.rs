use sos_import_config::assignment::{is_manual_assignment_required, next_unassigned_resource};
use sos_import_config::document::{
    ExportDocument, GeneratedPayload, PositionEntry, ResourcePayload,
};
use sos_import_config::model::{
    Category, Coordinates, GeneratedResource, LinkOutcome, MeasuredValueColumn, Position,
    Resource,
};

fn columns(indices: &[usize]) -> Vec<MeasuredValueColumn> {
    indices
        .iter()
        .map(|&index| MeasuredValueColumn::new(index))
        .collect()
}

fn candidates(category: Category, ids: &[&str]) -> Vec<Resource> {
    ids.iter()
        .map(|id| Resource::manual(category, id, id, &format!("http://example.org/{}", id)))
        .collect()
}

#[test]
fn single_candidate_per_category_is_linked_to_every_column() {
    for &category in &Category::RESOLUTION_ORDER {
        let resources = candidates(category, &["only"]);
        let mut measured_values = columns(&[0, 1, 2]);

        let required =
            is_manual_assignment_required(category, &resources, &mut measured_values).unwrap();

        assert!(!required);
        for measured_value in &measured_values {
            assert_eq!(measured_value.related(category), ["only".to_string()]);
        }
    }
}

#[test]
fn categories_without_candidates_leave_no_trace() {
    let mut measured_values = columns(&[0, 1]);
    let mut document = ExportDocument::new();

    for &category in &Category::RESOLUTION_ORDER {
        assert!(!is_manual_assignment_required(category, &[], &mut measured_values).unwrap());
    }

    for measured_value in &measured_values {
        for &category in &Category::RESOLUTION_ORDER {
            assert!(!measured_value.is_linked(category));
            for id in measured_value.related(category) {
                document
                    .link_column_to_resource(measured_value.index(), category, id)
                    .unwrap();
            }
        }
    }
    assert!(document.is_empty());
}

#[test]
fn three_features_two_columns() {
    let features = candidates(Category::FeatureOfInterest, &["F1", "F2", "F3"]);
    let mut measured_values = columns(&[1, 2]);

    assert!(is_manual_assignment_required(
        Category::FeatureOfInterest,
        &features,
        &mut measured_values
    )
    .unwrap());

    let next = next_unassigned_resource(Category::FeatureOfInterest, &features, &measured_values)
        .unwrap()
        .map(|resource| resource.id.clone());
    assert_eq!(next.as_deref(), Some("F1"));

    measured_values[0].link(Category::FeatureOfInterest, "F1");
    let next = next_unassigned_resource(Category::FeatureOfInterest, &features, &measured_values)
        .unwrap()
        .map(|resource| resource.id.clone());
    assert_eq!(next.as_deref(), Some("F2"));

    measured_values[1].link(Category::FeatureOfInterest, "F2");
    let next = next_unassigned_resource(Category::FeatureOfInterest, &features, &measured_values)
        .unwrap();
    assert!(next.is_none());
}

#[test]
fn generated_observed_property_upserted_twice() {
    let mut document = ExportDocument::new();
    let observed_property = Resource::generated(
        Category::ObservedProperty,
        "obsprop",
        GeneratedResource {
            use_name_after_prefix_as_uri: true,
            uri_prefix: Some("obs_".into()),
            concat_string: "{0}-{1}".into(),
            related_columns: vec![2, 4],
        },
    );

    let first = document
        .upsert_resource(Category::ObservedProperty, &observed_property)
        .unwrap()
        .clone();
    let second = document
        .upsert_resource(Category::ObservedProperty, &observed_property)
        .unwrap()
        .clone();

    assert_eq!(first, second);
    assert_eq!(document.len(), 1);
    assert_eq!(
        second.payload,
        ResourcePayload::Generated(GeneratedPayload {
            id: "obsprop".into(),
            use_as_prefix: true,
            uri_prefix: Some("obs_".into()),
            concat_string: "{0}-{1}".into(),
            numbers: vec![2, 4],
        })
    );
}

#[test]
fn repeated_links_keep_one_back_reference() {
    let mut document = ExportDocument::new();
    document.add_measured_value_column(5);
    document
        .upsert_resource(
            Category::UnitOfMeasurement,
            &Resource::manual(Category::UnitOfMeasurement, "degC", "°C", "http://uom/degC"),
        )
        .unwrap();

    let outcomes: Vec<LinkOutcome> = ["degC", "DEGC", "degc", "degC"]
        .iter()
        .map(|id| {
            document
                .link_column_to_resource(5, Category::UnitOfMeasurement, id)
                .unwrap()
        })
        .collect();

    assert_eq!(
        outcomes,
        vec![
            LinkOutcome::Linked,
            LinkOutcome::AlreadyLinked,
            LinkOutcome::AlreadyLinked,
            LinkOutcome::AlreadyLinked,
        ]
    );
    assert_eq!(
        document
            .column(5)
            .unwrap()
            .related(Category::UnitOfMeasurement)
            .len(),
        1
    );
}

#[test]
fn position_representations_exclude_each_other() {
    let mut document = ExportDocument::new();
    let feature = Resource::manual(Category::FeatureOfInterest, "foi", "Station", "http://foi");

    let entry = document
        .upsert_resource(
            Category::FeatureOfInterest,
            &feature
                .clone()
                .with_position(Position::from_coordinates(Coordinates {
                    epsg_code: 4326,
                    latitude: 52.0,
                    longitude: 7.0,
                    altitude: 55.5,
                })),
        )
        .unwrap();
    assert!(matches!(entry.position, Some(PositionEntry::Explicit { .. })));

    let entry = document
        .upsert_resource(
            Category::FeatureOfInterest,
            &feature.clone().with_position(Position::from_group("group_a")),
        )
        .unwrap();
    assert_eq!(entry.position, Some(PositionEntry::Group("group_a".into())));

    let entry = document
        .upsert_resource(
            Category::FeatureOfInterest,
            &feature.with_position(Position::from_coordinates(Coordinates {
                epsg_code: 31466,
                latitude: 5_700_000.0,
                longitude: 2_500_000.0,
                altitude: 0.0,
            })),
        )
        .unwrap();
    assert_eq!(
        entry.position,
        Some(PositionEntry::Explicit {
            epsg_code: 31466,
            altitude: 0.0,
            latitude: 5_700_000.0,
            longitude: 2_500_000.0,
        })
    );
    assert_eq!(document.len(), 1);
}
