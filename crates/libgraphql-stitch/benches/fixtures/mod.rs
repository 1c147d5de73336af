use libgraphql_stitch::stitch_case::StitchCase;
use serde_json::json;

const OVERALL_SCHEMA: &str = "
type Query {
  issues: [Issue]
}

type Issue {
  id: ID
  title: String
  author: User
}

type User {
  id: ID
}
";

const UNDERLYING_SCHEMA: &str = "
type Query {
  issues: [Ticket]
}

type Ticket {
  id: ID
  name: String
  authorId: ID
}
";

/// `{ issues { id title author } }` against a service that renamed `Issue`
/// to `Ticket` and `title` to `name`, with `author` hydrated from
/// `authorId`. The result holds `count` issues.
pub fn renamed_issue_list(count: usize) -> StitchCase {
    let elements = (0..count)
        .map(|idx| json!({
            "kind": "object",
            "children": [
                {"kind": "leaf", "object_type": "Ticket", "field": "id", "field_ids": [2], "value": idx.to_string()},
                {"kind": "leaf", "object_type": "Ticket", "field": "name", "field_ids": [4], "value": format!("Issue #{idx}")},
                {"kind": "leaf", "object_type": "Ticket", "field": "authorId", "field_ids": [20], "value": format!("U{}", idx % 7)},
            ],
        }))
        .collect::<Vec<_>>();

    let description = json!({
        "overall_schema": OVERALL_SCHEMA,
        "underlying_schema": UNDERLYING_SCHEMA,
        "service_name": "tickets",
        "type_renames": {"Issue": "Ticket"},
        "transformations": [
            {
                "field_id": 4,
                "transformation": {
                    "kind": "rename",
                    "definition": {"type_name": "Issue", "field_name": "title"},
                    "id": 1,
                    "result_key": "title",
                    "underlying_path": ["name"],
                    "original_field_ids": [4],
                },
            },
            {
                "field_id": 20,
                "transformation": {
                    "kind": "hydration",
                    "definition": {"type_name": "Issue", "field_name": "author"},
                    "id": 2,
                    "result_key": "author",
                    "service_name": "users",
                    "top_level_field": "user",
                    "arguments": [{"name": "id", "value_key": "authorId"}],
                    "original_field_ids": [20],
                },
            },
        ],
        "field_metadata": [
            {"field_id": 4, "transformation_id": 1},
            {"field_id": 20, "transformation_id": 2},
        ],
        "normalized_fields": [
            {"id": 1, "object_type": "Query", "field": "issues", "field_ids": [50]},
            {"id": 2, "object_type": "Issue", "field": "id", "field_ids": [2], "parent": 1},
            {"id": 3, "object_type": "Issue", "field": "title", "field_ids": [4], "parent": 1},
        ],
        "tree": {
            "kind": "root",
            "children": [{
                "kind": "list",
                "object_type": "Query",
                "field": "issues",
                "field_ids": [50],
                "children": elements,
            }],
        },
    });

    serde_json::from_value(description).expect("benchmark stitch case is well-formed")
}
