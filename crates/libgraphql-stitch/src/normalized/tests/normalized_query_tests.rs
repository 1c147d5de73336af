use crate::ids::NormalizedFieldId;
use crate::normalized::NormalizedField;
use crate::result::ResultNode;
use crate::result::ResultPath;
use crate::StitchError;
use crate::test::fixture::fid;
use crate::test::fixture::Fixture;
use crate::test::fixture::N_ISSUE;
use crate::test::fixture::N_ISSUE_ID;

#[test]
fn duplicate_ids_are_rejected() {
    let fixture = Fixture::new();
    let mut query = fixture.normalized_query.clone();
    let duplicate = NormalizedField::new(N_ISSUE, "Query", fixture.overall_field("Query", "issue"));

    assert_eq!(
        query.add_field(duplicate).unwrap_err(),
        StitchError::DuplicateNormalizedField { id: N_ISSUE },
    );
    assert_eq!(query.fields().count(), 5);
}

#[test]
fn result_key_prefers_the_alias() {
    let fixture = Fixture::new();
    let field = NormalizedField::new(NormalizedFieldId::new(9), "Issue", fixture.overall_field("Issue", "title"));
    assert_eq!(field.result_key(), "title");
    assert_eq!(field.with_alias(Some("label".to_string())).result_key(), "label");
}

#[test]
fn field_ids_can_be_shared_across_declaring_types() {
    let mut fixture = Fixture::new();
    fixture.add_normalized(NormalizedFieldId::new(20), None, "Issue", "id", &[2]);

    let candidates = fixture.normalized_query
        .fields_for_field_id(fid(2))
        .map(|field| field.id())
        .collect::<Vec<_>>();
    assert_eq!(candidates, vec![N_ISSUE_ID, NormalizedFieldId::new(20)]);
    assert_eq!(fixture.normalized_query.fields_for_field_id(fid(99)).count(), 0);
}

mod field_for_result_node {
    use super::*;

    fn id_node(fixture: &Fixture, object_type: &str) -> ResultNode {
        ResultNode::leaf()
            .path(ResultPath::root().segment("issue").segment("id"))
            .object_type(object_type)
            .field_definition(fixture.overall_field("Issue", "id"))
            .field_id(fid(2))
            .build()
    }

    #[test]
    fn matches_on_type_and_definition() {
        let fixture = Fixture::new();
        let field = fixture.normalized_query
            .field_for_result_node(&id_node(&fixture, "Issue"))
            .unwrap();
        assert_eq!(field.id(), N_ISSUE_ID);
    }

    #[test]
    fn a_different_declaring_type_is_not_found() {
        let fixture = Fixture::new();
        assert_eq!(
            fixture.normalized_query.field_for_result_node(&id_node(&fixture, "User")).unwrap_err(),
            StitchError::NormalizedFieldNotFound {
                path: ResultPath::root().segment("issue").segment("id"),
            },
        );
    }

    #[test]
    fn a_node_without_field_ids_is_not_found() {
        let fixture = Fixture::new();
        let node = ResultNode::leaf()
            .path(ResultPath::root().segment("x"))
            .object_type("Issue")
            .field_definition(fixture.overall_field("Issue", "id"))
            .build();
        assert!(matches!(
            fixture.normalized_query.field_for_result_node(&node),
            Err(StitchError::NormalizedFieldNotFound { .. }),
        ));
    }
}
