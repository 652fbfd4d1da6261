//! GraphQL documents compiled into projection plans against a YAML catalog

#[cfg(test)]
mod graphql_plan_tests {
    use selection_planner::projection::{PlanError, Projection};
    use selection_planner::selection::graphql::GraphqlRequest;
    use selection_planner::selection::SelectionError;
    use selection_planner::{plan_selection, PlannerConfig, StaticEntityCatalog};

    const CATALOG: &str = r#"
name: forum
entities:
  - name: User
    columns: [id, displayName, email]
    relations:
      - { name: threads, target: Thread, inverse: author }
      - { name: avatar, target: Image }
  - name: Thread
    columns: [id, title, createdAt]
    relations:
      - { name: author, target: User, inverse: threads }
      - { name: replies, target: Reply, inverse: thread }
  - name: Reply
    columns: [id, body]
    relations:
      - { name: thread, target: Thread, inverse: replies }
  - name: Image
    columns: [id, url]
"#;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn catalog() -> StaticEntityCatalog {
        StaticEntityCatalog::from_yaml_str(CATALOG).expect("catalog should load")
    }

    #[test]
    fn test_nested_request_with_fragments() -> anyhow::Result<()> {
        init_logging();
        let request = GraphqlRequest::parse(
            r#"
            query Profile($id: ID!) {
                user(id: $id) {
                    displayName
                    ...ThreadList
                    threads(first: 5) { replies { body } }
                }
            }
            fragment ThreadList on User {
                threads { title createdAt }
            }
            "#,
        )?;
        let selection = request
            .resolver_fields("user")?
            .expect("user is selected");

        let plan = plan_selection(&catalog(), &PlannerConfig::default(), "User", &selection)?;

        assert_eq!(
            plan.output_aliases(),
            vec![
                "root_id",
                "root_display_name",
                "root_threads_id",
                "root_threads_title",
                "root_threads_created_at",
                "root_threads_replies_id",
                "root_threads_replies_body",
            ]
        );
        assert_eq!(plan.join_targets(), vec!["root_threads", "root_threads_replies"]);
        assert!(plan.from_sources().is_empty());
        Ok(())
    }

    #[test]
    fn test_first_arguments_win_across_fragments() -> anyhow::Result<()> {
        let request = GraphqlRequest::parse(
            r#"
            {
                user {
                    threads(first: 5) { title }
                    ... on User { threads(first: 50) { id } }
                }
            }
            "#,
        )?;
        let selection = request.resolver_fields("user")?.expect("user is selected");
        let threads = selection.get("threads").expect("threads merged");

        assert_eq!(threads.arguments["first"].as_integer(), Some(5));
        assert_eq!(
            threads.children.field_names().collect::<Vec<_>>(),
            vec!["title", "id"]
        );
        Ok(())
    }

    #[test]
    fn test_full_select_over_bidirectional_graph() -> anyhow::Result<()> {
        init_logging();
        let request = GraphqlRequest::parse("{ user }")?;
        let selection = request.resolver_fields("user")?.expect("user is selected");
        assert!(selection.is_empty());

        let plan = plan_selection(&catalog(), &PlannerConfig::default(), "User", &selection)?;

        assert_eq!(
            plan.join_targets(),
            vec!["root_threads", "root_threads_replies"]
        );
        assert_eq!(
            plan.projections(),
            &[
                // Thread.author walks back to the User pair
                Projection::Entity {
                    source_alias: "root_threads".to_string()
                },
                // Reply.thread walks back to the Thread pair
                Projection::Entity {
                    source_alias: "root_threads_replies".to_string()
                },
                Projection::Column {
                    source_alias: "root".to_string(),
                    field: "avatar".to_string(),
                    output_alias: "root_avatar".to_string(),
                },
            ]
        );
        let from: Vec<_> = plan.from_sources().iter().map(|s| s.entity.as_str()).collect();
        assert_eq!(from, vec!["Thread", "Reply"]);
        Ok(())
    }

    #[test]
    fn test_plan_serializes_for_execution() -> anyhow::Result<()> {
        let request = GraphqlRequest::parse("{ user { email avatar { url } } }")?;
        let selection = request.resolver_fields("user")?.expect("user is selected");
        let plan = plan_selection(&catalog(), &PlannerConfig::default(), "User", &selection)?;

        let json: serde_json::Value = serde_json::from_str(&plan.to_json()?)?;
        assert_eq!(json["joins"][0]["source_alias"], "root");
        assert_eq!(json["joins"][0]["relation"], "avatar");
        assert_eq!(json["joins"][0]["target_alias"], "root_avatar");
        assert_eq!(json["projections"].as_array().map(Vec::len), Some(4));
        Ok(())
    }

    #[test]
    fn test_unknown_root_entity() {
        let request = GraphqlRequest::parse("{ user { id } }").unwrap();
        let selection = request.resolver_fields("user").unwrap().unwrap();

        let err = plan_selection(&catalog(), &PlannerConfig::default(), "Account", &selection)
            .unwrap_err();
        assert!(matches!(err, PlanError::Catalog(_)));
        assert!(err.to_string().contains("Account"));
    }

    #[test]
    fn test_depth_limit_applies_before_planning() {
        let request =
            GraphqlRequest::parse("{ user { threads { replies { thread { title } } } } }").unwrap();
        let selection = request.resolver_fields("user").unwrap().unwrap();
        let config = PlannerConfig {
            max_selection_depth: 2,
            ..Default::default()
        };

        let err = plan_selection(&catalog(), &config, "User", &selection).unwrap_err();
        assert_eq!(
            err,
            PlanError::Selection(SelectionError::SelectionTooDeep { depth: 4, max: 2 })
        );
    }
}
