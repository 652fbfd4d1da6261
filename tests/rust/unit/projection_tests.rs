//! Projection properties: identifier guarantee, no over-selection, cycle
//! termination and unidirectional relations in full-select mode.

#[cfg(test)]
mod projection_tests {
    use selection_planner::entity_catalog::{EntityMetadata, StaticEntityCatalog};
    use selection_planner::projection::{Projection, ProjectionBuilder, Selection};
    use selection_planner::{SelectionNode, SelectionTree};

    fn tree(fields: Vec<(&str, SelectionTree)>) -> SelectionTree {
        fields
            .into_iter()
            .map(|(name, children)| (name.to_string(), SelectionNode::with_children(children)))
            .collect()
    }

    fn leaves(names: &[&str]) -> SelectionTree {
        tree(names.iter().map(|n| (*n, SelectionTree::new())).collect())
    }

    fn blog() -> StaticEntityCatalog {
        StaticEntityCatalog::builder()
            .entity(
                EntityMetadata::builder("User")
                    .column("id")
                    .column("name")
                    .column("createdAt")
                    .relation("posts", "Post")
                    .relation("avatar", "Image"),
            )
            .entity(
                EntityMetadata::builder("Post")
                    .column("id")
                    .column("title")
                    .column("body"),
            )
            .entity(EntityMetadata::builder("Image").column("id").column("url"))
            .build()
            .unwrap()
    }

    fn employees() -> StaticEntityCatalog {
        StaticEntityCatalog::builder()
            .entity(
                EntityMetadata::builder("Employee")
                    .column("id")
                    .column("name")
                    .bidirectional("manager", "Employee", "reports")
                    .bidirectional("reports", "Employee", "manager"),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_user_posts_example() {
        let catalog = blog();
        let selection = tree(vec![
            ("name", SelectionTree::new()),
            ("posts", leaves(&["title"])),
        ]);

        let state = ProjectionBuilder::new(&catalog)
            .build("User", Selection::from_tree(&selection), "alias")
            .unwrap();

        assert_eq!(
            state.output_aliases(),
            vec!["alias_id", "alias_name", "alias_posts_id", "alias_posts_title"]
        );
        assert_eq!(state.joins().len(), 1);
        let join = &state.joins()[0];
        assert_eq!(
            (join.source_alias.as_str(), join.relation.as_str(), join.target_alias.as_str()),
            ("alias", "posts", "alias_posts")
        );
    }

    #[test]
    fn test_identifier_guarantee() {
        let catalog = blog();
        let state = ProjectionBuilder::new(&catalog)
            .build("User", Selection::from_tree(&leaves(&["name"])), "alias")
            .unwrap();

        assert_eq!(state.output_aliases(), vec!["alias_id", "alias_name"]);
        assert_eq!(
            state.projections()[0],
            Projection::Column {
                source_alias: "alias".to_string(),
                field: "id".to_string(),
                output_alias: "alias_id".to_string(),
            }
        );
    }

    #[test]
    fn test_no_overselection() {
        let catalog = blog();
        let selection = tree(vec![
            ("createdAt", SelectionTree::new()),
            ("avatar", leaves(&["url"])),
        ]);

        let state = ProjectionBuilder::new(&catalog)
            .build("User", Selection::from_tree(&selection), "u")
            .unwrap();

        assert_eq!(
            state.output_aliases(),
            vec!["u_id", "u_created_at", "u_avatar_id", "u_avatar_url"]
        );
        assert_eq!(state.join_targets(), vec!["u_avatar"]);
        assert!(state
            .projections()
            .iter()
            .all(|p| !p.output_alias().unwrap_or_default().contains("posts")));
    }

    #[test]
    fn test_storage_name_drives_column_alias() {
        let catalog = StaticEntityCatalog::from_yaml_str(
            r#"
entities:
  - name: User
    columns:
      - id
      - { name: firstName, storage: given_name }
      - lastName
"#,
        )
        .unwrap();
        let selection = leaves(&["firstName", "lastName"]);

        let state = ProjectionBuilder::new(&catalog)
            .build("User", Selection::from_tree(&selection), "u")
            .unwrap();

        assert_eq!(
            state.output_aliases(),
            vec!["u_id", "u_given_name", "u_last_name"]
        );
        assert_eq!(
            state.projections()[1],
            Projection::Column {
                source_alias: "u".to_string(),
                field: "firstName".to_string(),
                output_alias: "u_given_name".to_string(),
            }
        );
    }

    #[test]
    fn test_forced_identifier_uses_its_storage_name() {
        let catalog = StaticEntityCatalog::builder()
            .entity(
                EntityMetadata::builder("Account")
                    .identifier("accountNumber")
                    .column_with_storage("accountNumber", "acct_no")
                    .column("holder"),
            )
            .build()
            .unwrap();

        let state = ProjectionBuilder::new(&catalog)
            .build("Account", Selection::from_tree(&leaves(&["holder"])), "a")
            .unwrap();
        assert_eq!(state.output_aliases(), vec!["a_acct_no", "a_holder"]);
    }

    #[test]
    fn test_metadata_order_not_request_order() {
        let catalog = blog();
        let selection = leaves(&["createdAt", "name"]);

        let state = ProjectionBuilder::new(&catalog)
            .build("User", Selection::from_tree(&selection), "u")
            .unwrap();
        assert_eq!(state.output_aliases(), vec!["u_id", "u_name", "u_created_at"]);
    }

    #[test]
    fn test_employee_cycle_terminates() {
        let catalog = employees();
        let state = ProjectionBuilder::new(&catalog)
            .build("Employee", Selection::All, "alias")
            .unwrap();

        assert_eq!(
            state.join_targets(),
            vec!["alias_manager", "alias_manager_reports"]
        );
        assert_eq!(state.joins()[1].source_alias, "alias_manager");
        assert_eq!(state.joins()[1].relation, "reports");

        // Each relation of the pair is joined once; every later encounter is a re-entry
        let reentries: Vec<_> = state
            .projections()
            .iter()
            .map(|p| match p {
                Projection::Entity { source_alias } => source_alias.as_str(),
                Projection::Column { .. } => panic!("unexpected column projection {:?}", p),
            })
            .collect();
        assert_eq!(
            reentries,
            vec![
                "alias_manager",
                "alias_manager_reports",
                "alias_manager_reports",
                "alias"
            ]
        );
        assert_eq!(state.from_sources().len(), 2);
        assert!(state.from_sources().iter().all(|s| s.entity == "Employee"));
    }

    #[test]
    fn test_unidirectional_never_recurses() {
        let catalog = StaticEntityCatalog::builder()
            .entity(
                EntityMetadata::builder("Post")
                    .column("id")
                    .relation("category", "Category"),
            )
            .entity(
                EntityMetadata::builder("Category")
                    .column("id")
                    .relation("parent", "Category"),
            )
            .build()
            .unwrap();

        let state = ProjectionBuilder::new(&catalog)
            .build("Post", Selection::All, "p")
            .unwrap();

        assert_eq!(state.projections().len(), 1);
        assert_eq!(state.output_aliases(), vec!["p_category"]);
        assert!(state.joins().is_empty());
    }

    #[test]
    fn test_fresh_state_per_build() {
        let catalog = employees();
        let builder = ProjectionBuilder::new(&catalog);

        let first = builder.build("Employee", Selection::All, "e").unwrap();
        let second = builder.build("Employee", Selection::All, "e").unwrap();
        assert_eq!(first, second);
    }
}
