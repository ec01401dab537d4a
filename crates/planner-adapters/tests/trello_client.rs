//! HTTP client tests against a mock Trello server.

use std::time::Duration;

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use planner_adapters::trello::{ClientConfig, TrelloClient};
use planner_core::{
    application::{
        ApiError,
        ports::{BoardDraft, CardDraft, CardUpdate, TrelloApi},
    },
    domain::{Credentials, LabelColor},
    error::{ErrorKind, PlannerError},
};

const KEY: &str = "testkey0123456789abcdef0123456789";
const TOKEN: &str = "testtoken0123456789abcdef";

fn client(server: &ServerGuard) -> TrelloClient {
    let config = ClientConfig {
        base_url: server.url(),
        timeout: Duration::from_secs(5),
    };
    TrelloClient::new(Credentials::new(KEY, TOKEN).unwrap(), &config).unwrap()
}

fn auth() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("key".into(), KEY.into()),
        Matcher::UrlEncoded("token".into(), TOKEN.into()),
    ])
}

mod reads {
    use super::*;

    #[test]
    fn verify_credentials_returns_member() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/members/me")
            .match_query(auth())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"m1","username":"ada","fullName":"Ada Lovelace"}"#)
            .create();

        let member = client(&server).verify_credentials().unwrap();

        mock.assert();
        assert_eq!(member.username, "ada");
        assert_eq!(member.display_name(), "Ada Lovelace");
    }

    #[test]
    fn list_boards_drops_closed_boards() {
        let mut server = Server::new();
        server
            .mock("GET", "/members/me/boards")
            .match_query(Matcher::UrlEncoded("filter".into(), "open".into()))
            .with_status(200)
            .with_body(
                json!([
                    {"id": "b1", "name": "Career", "url": "https://trello.com/b/b1", "closed": false},
                    {"id": "b2", "name": "Old", "closed": true}
                ])
                .to_string(),
            )
            .create();

        let boards = client(&server).list_boards().unwrap();

        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].name, "Career");
    }

    #[test]
    fn list_cards_excludes_archived_cards() {
        let mut server = Server::new();
        server
            .mock("GET", "/lists/l1/cards")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!([
                    {"id": "c1", "name": "Open", "idList": "l1", "desc": "", "idLabels": ["x"], "pos": 1.0},
                    {"id": "c2", "name": "Gone", "idList": "l1", "closed": true}
                ])
                .to_string(),
            )
            .create();

        let cards = client(&server).list_cards("l1").unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "c1");
        assert_eq!(cards[0].description, None);
        assert_eq!(cards[0].label_ids, vec!["x"]);
    }

    #[test]
    fn board_lists_in_board_order() {
        let mut server = Server::new();
        server
            .mock("GET", "/boards/b1/lists")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!([
                    {"id": "l1", "name": "Backlog", "idBoard": "b1", "pos": 1024.0},
                    {"id": "l2", "name": "Done", "idBoard": "b1", "pos": 2048.0}
                ])
                .to_string(),
            )
            .create();

        let lists = client(&server).board_lists("b1").unwrap();

        let names: Vec<_> = lists.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Backlog", "Done"]);
    }
}

mod writes {
    use super::*;

    #[test]
    fn create_board_disables_default_lists() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/boards")
            .match_query(auth())
            .match_body(Matcher::PartialJson(json!({
                "name": "Tech Career Planning",
                "desc": "Weekly sprints",
                "defaultLists": false
            })))
            .with_status(200)
            .with_body(r#"{"id":"b1","name":"Tech Career Planning","url":"https://trello.com/b/b1"}"#)
            .create();

        let draft = BoardDraft::new("Tech Career Planning", "Weekly sprints").unwrap();
        let board = client(&server).create_board(&draft).unwrap();

        mock.assert();
        assert_eq!(board.id, "b1");
        assert_eq!(board.url, "https://trello.com/b/b1");
    }

    #[test]
    fn create_label_sends_color() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/labels")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({
                "name": "Learning",
                "color": "blue",
                "idBoard": "b1"
            })))
            .with_status(200)
            .with_body(r#"{"id":"lb1","name":"Learning","color":"blue","idBoard":"b1"}"#)
            .create();

        let label = client(&server)
            .create_label("b1", "Learning", LabelColor::Blue)
            .unwrap();

        mock.assert();
        assert_eq!(label.color, Some(LabelColor::Blue));
    }

    #[test]
    fn create_card_sends_label_ids() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/cards")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({
                "name": "Skills Gap Analysis",
                "idList": "l1",
                "idLabels": ["lb1", "lb2"]
            })))
            .with_status(200)
            .with_body(r#"{"id":"c1","name":"Skills Gap Analysis","idList":"l1","idLabels":["lb1","lb2"]}"#)
            .create();

        let draft = CardDraft::new("l1", "Skills Gap Analysis")
            .unwrap()
            .with_labels(vec!["lb1".into(), "lb2".into()]);
        client(&server).create_card(&draft).unwrap();

        mock.assert();
    }

    #[test]
    fn move_card_sets_list() {
        let mut server = Server::new();
        let mock = server
            .mock("PUT", "/cards/c1")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({"idList": "l2", "pos": "bottom"})))
            .with_status(200)
            .with_body(r#"{"id":"c1","name":"Card","idList":"l2"}"#)
            .create();

        let card = client(&server).move_card("c1", "l2").unwrap();

        mock.assert();
        assert_eq!(card.list_id, "l2");
    }

    #[test]
    fn rename_sends_only_the_name() {
        let mut server = Server::new();
        let mock = server
            .mock("PUT", "/cards/c1")
            .match_query(Matcher::Any)
            .match_body(Matcher::Json(json!({"name": "Renamed"})))
            .with_status(200)
            .with_body(r#"{"id":"c1","name":"Renamed","idList":"l1"}"#)
            .create();

        let update = CardUpdate::rename("Renamed").unwrap();
        client(&server).update_card("c1", &update).unwrap();

        mock.assert();
    }

    #[test]
    fn archive_list_closes_it() {
        let mut server = Server::new();
        let mock = server
            .mock("PUT", "/lists/l1/closed")
            .match_query(Matcher::Any)
            .match_body(Matcher::Json(json!({"value": true})))
            .with_status(200)
            .with_body(r#"{"id":"l1","name":"Old","idBoard":"b1","closed":true}"#)
            .create();

        client(&server).archive_list("l1").unwrap();
        mock.assert();
    }

    #[test]
    fn delete_card() {
        let mut server = Server::new();
        let mock = server
            .mock("DELETE", "/cards/c1")
            .match_query(auth())
            .with_status(200)
            .with_body(r#"{"limits":{}}"#)
            .create();

        client(&server).delete_card("c1").unwrap();
        mock.assert();
    }
}

mod failures {
    use super::*;

    fn api_error(err: PlannerError) -> ApiError {
        match err {
            PlannerError::Api(e) => e,
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[test]
    fn unauthorized_is_credentials_invalid() {
        let mut server = Server::new();
        server
            .mock("GET", "/members/me")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("invalid key")
            .create();

        let err = client(&server).verify_credentials().unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CredentialsInvalid);
        assert!(err.to_string().contains("invalid key"));
    }

    #[test]
    fn errors_never_contain_credentials() {
        let mut server = Server::new();
        server
            .mock("GET", "/members/me")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("upstream failure")
            .create();

        let err = client(&server).verify_credentials().unwrap_err();
        let rendered = format!("{err} {err:?}");

        assert_eq!(err.kind(), ErrorKind::TransientNetworkError);
        assert!(!rendered.contains(KEY));
        assert!(!rendered.contains(TOKEN));
    }

    #[test]
    fn rate_limit_carries_retry_after() {
        let mut server = Server::new();
        server
            .mock("POST", "/lists")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_header("retry-after", "7")
            .create();

        let err = api_error(client(&server).create_list("b1", "Backlog").unwrap_err());

        assert_eq!(
            err,
            ApiError::RateLimited {
                retry_after: Some(Duration::from_secs(7))
            }
        );
    }

    #[test]
    fn missing_board_is_not_found() {
        let mut server = Server::new();
        server
            .mock("GET", "/boards/b404")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body("The requested resource was not found.")
            .create();

        let err = client(&server).get_board("b404").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("b404"));
    }

    #[test]
    fn forbidden_is_permission_denied() {
        let mut server = Server::new();
        server
            .mock("DELETE", "/boards/b1")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"message":"unauthorized permission requested"}"#)
            .create();

        let err = client(&server).delete_board("b1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn bad_request_is_validation_error() {
        let mut server = Server::new();
        server
            .mock("POST", "/cards")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body("invalid value for idList")
            .create();

        let draft = CardDraft::new("bad", "Card").unwrap();
        let err = api_error(client(&server).create_card(&draft).unwrap_err());

        assert!(matches!(err, ApiError::Validation { status: Some(400), .. }));
    }

    #[test]
    fn malformed_body_is_reported() {
        let mut server = Server::new();
        server
            .mock("GET", "/boards/b1")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create();

        let err = api_error(client(&server).get_board("b1").unwrap_err());
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[test]
    fn invalid_id_makes_no_request() {
        let server = Server::new();

        let err = client(&server).delete_card("../boards/b1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }
}
