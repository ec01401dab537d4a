//! Blocking HTTP client for the Trello REST API.
//!
//! Each [`TrelloApi`] method is one round trip. `key` and `token` travel in
//! the query string, entity fields in a JSON body. Errors are classified by
//! status code; transport errors have their URL stripped before they are
//! turned into messages, because the URL carries the credentials.

use std::time::Duration;

use reqwest::{
    Method, StatusCode,
    blocking::{Client, RequestBuilder},
    header::{HeaderMap, RETRY_AFTER},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use planner_core::{
    application::{
        ApiError,
        ports::{BoardDraft, CardDraft, CardUpdate, TrelloApi},
    },
    domain::{Board, BoardList, Card, Credentials, Label, LabelColor, Member, Position},
    error::{PlannerError, PlannerResult},
};

use super::wire::{
    BoardDto, CardChanges, CardDto, ClosedFlag, ErrorBody, LabelDto, ListDto, MemberDto, NewBoard,
    NewCard, NewLabel, NewList,
};

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest error detail kept from a response body.
const MAX_DETAIL_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct TrelloClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl TrelloClient {
    pub fn new(credentials: Credentials, config: &ClientConfig) -> PlannerResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("trello-career-planner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlannerError::Configuration {
                message: format!("cannot build HTTP client: {}", e.without_url()),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    // ── Transport ───────────────────────────────────────────────────────

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .query(&[
                ("key", self.credentials.api_key()),
                ("token", self.credentials.token()),
            ])
    }

    /// Send and return the raw body of a 2xx response.
    fn execute(&self, request: RequestBuilder, resource: &str) -> PlannerResult<String> {
        let response = request.send().map_err(transport_error)?;
        let status = response.status();
        let retry_after = retry_after(response.headers());
        let body = response.text().map_err(transport_error)?;

        trace!(%status, bytes = body.len(), "Response received");
        if status.is_success() {
            return Ok(body);
        }
        debug!(%status, resource, "Request failed");
        Err(classify_status(status, &body, retry_after, resource).into())
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        resource: &str,
    ) -> PlannerResult<T> {
        let body = self.execute(self.request(Method::GET, path).query(query), resource)?;
        decode(&body)
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
        resource: &str,
    ) -> PlannerResult<T> {
        let body = self.execute(self.request(method, path).json(payload), resource)?;
        decode(&body)
    }

    fn delete(&self, path: &str, resource: &str) -> PlannerResult<()> {
        self.execute(self.request(Method::DELETE, path), resource)
            .map(|_| ())
    }
}

impl TrelloApi for TrelloClient {
    #[instrument(skip(self))]
    fn verify_credentials(&self) -> PlannerResult<Member> {
        let member: MemberDto = self.get(
            "/members/me",
            &[("fields", "id,username,fullName")],
            "member",
        )?;
        Ok(member.into())
    }

    #[instrument(skip_all, fields(name = %draft.name))]
    fn create_board(&self, draft: &BoardDraft) -> PlannerResult<Board> {
        let body = NewBoard {
            name: &draft.name,
            desc: draft.description.as_deref(),
            default_lists: false,
        };
        let board: BoardDto = self.send_json(Method::POST, "/boards", &body, "board")?;
        Ok(board.into())
    }

    #[instrument(skip(self))]
    fn get_board(&self, board_id: &str) -> PlannerResult<Board> {
        let id = segment(board_id)?;
        let board: BoardDto = self.get(
            &format!("/boards/{id}"),
            &[("fields", "id,name,url,closed")],
            &format!("board {id}"),
        )?;
        Ok(board.into())
    }

    #[instrument(skip(self))]
    fn list_boards(&self) -> PlannerResult<Vec<Board>> {
        let boards: Vec<BoardDto> = self.get(
            "/members/me/boards",
            &[("filter", "open"), ("fields", "id,name,url,closed")],
            "boards",
        )?;
        Ok(boards
            .into_iter()
            .filter(|b| !b.closed)
            .map(Board::from)
            .collect())
    }

    #[instrument(skip(self))]
    fn delete_board(&self, board_id: &str) -> PlannerResult<()> {
        let id = segment(board_id)?;
        self.delete(&format!("/boards/{id}"), &format!("board {id}"))
    }

    #[instrument(skip(self))]
    fn create_list(&self, board_id: &str, name: &str) -> PlannerResult<BoardList> {
        let body = NewList {
            name,
            id_board: board_id,
            pos: Position::Bottom,
        };
        let list: ListDto = self.send_json(Method::POST, "/lists", &body, "list")?;
        Ok(list.into())
    }

    #[instrument(skip(self))]
    fn board_lists(&self, board_id: &str) -> PlannerResult<Vec<BoardList>> {
        let id = segment(board_id)?;
        let lists: Vec<ListDto> = self.get(
            &format!("/boards/{id}/lists"),
            &[("filter", "open")],
            &format!("board {id}"),
        )?;
        Ok(lists
            .into_iter()
            .filter(|l| !l.closed)
            .map(BoardList::from)
            .collect())
    }

    #[instrument(skip(self))]
    fn archive_list(&self, list_id: &str) -> PlannerResult<()> {
        let id = segment(list_id)?;
        let _: serde_json::Value = self.send_json(
            Method::PUT,
            &format!("/lists/{id}/closed"),
            &ClosedFlag { value: true },
            &format!("list {id}"),
        )?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn create_label(&self, board_id: &str, name: &str, color: LabelColor) -> PlannerResult<Label> {
        let body = NewLabel {
            name,
            color,
            id_board: board_id,
        };
        let label: LabelDto = self.send_json(Method::POST, "/labels", &body, "label")?;
        Ok(label.into())
    }

    #[instrument(skip_all, fields(name = %draft.name, list = %draft.list_id))]
    fn create_card(&self, draft: &CardDraft) -> PlannerResult<Card> {
        let body = NewCard {
            name: &draft.name,
            desc: draft.description.as_deref(),
            id_list: &draft.list_id,
            id_labels: &draft.label_ids,
            pos: Position::Bottom,
        };
        let card: CardDto = self.send_json(Method::POST, "/cards", &body, "card")?;
        Ok(card.into())
    }

    #[instrument(skip(self))]
    fn list_cards(&self, list_id: &str) -> PlannerResult<Vec<Card>> {
        let id = segment(list_id)?;
        let cards: Vec<CardDto> = self.get(
            &format!("/lists/{id}/cards"),
            &[("filter", "open")],
            &format!("list {id}"),
        )?;
        Ok(cards
            .into_iter()
            .filter(|c| !c.closed)
            .map(Card::from)
            .collect())
    }

    #[instrument(skip(self, update))]
    fn update_card(&self, card_id: &str, update: &CardUpdate) -> PlannerResult<Card> {
        let id = segment(card_id)?;
        let body = CardChanges {
            name: update.name.as_deref(),
            desc: update.description.as_deref(),
            closed: update.closed,
            ..CardChanges::default()
        };
        let card: CardDto =
            self.send_json(Method::PUT, &format!("/cards/{id}"), &body, &format!("card {id}"))?;
        Ok(card.into())
    }

    #[instrument(skip(self))]
    fn move_card(&self, card_id: &str, list_id: &str) -> PlannerResult<Card> {
        let id = segment(card_id)?;
        let body = CardChanges {
            id_list: Some(list_id),
            pos: Some(Position::Bottom),
            ..CardChanges::default()
        };
        let card: CardDto =
            self.send_json(Method::PUT, &format!("/cards/{id}"), &body, &format!("card {id}"))?;
        Ok(card.into())
    }

    #[instrument(skip(self))]
    fn delete_card(&self, card_id: &str) -> PlannerResult<()> {
        let id = segment(card_id)?;
        self.delete(&format!("/cards/{id}"), &format!("card {id}"))
    }
}

// ── Classification ──────────────────────────────────────────────────────────

/// Map a non-2xx response onto an [`ApiError`].
pub fn classify_status(
    status: StatusCode,
    body: &str,
    retry_after: Option<Duration>,
    resource: &str,
) -> ApiError {
    let detail = error_detail(body);
    match status.as_u16() {
        401 => ApiError::CredentialsInvalid { detail },
        403 => ApiError::PermissionDenied { detail },
        404 => ApiError::NotFound {
            resource: resource.to_string(),
        },
        code @ (400 | 422) => ApiError::Validation {
            status: Some(code),
            detail,
        },
        429 => ApiError::RateLimited { retry_after },
        code @ 500..=599 => ApiError::Transient {
            reason: format!("HTTP {code}: {detail}"),
        },
        code => ApiError::Unexpected {
            status: code,
            detail,
        },
    }
}

fn transport_error(error: reqwest::Error) -> PlannerError {
    let error = error.without_url();
    if error.is_decode() {
        return ApiError::MalformedResponse {
            reason: error.to_string(),
        }
        .into();
    }
    ApiError::Transient {
        reason: error.to_string(),
    }
    .into()
}

fn decode<T: DeserializeOwned>(body: &str) -> PlannerResult<T> {
    serde_json::from_str(body).map_err(|e| {
        ApiError::MalformedResponse {
            reason: e.to_string(),
        }
        .into()
    })
}

/// Prefer the `message` of a JSON error body, else the trimmed text.
fn error_detail(body: &str) -> String {
    let text = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| body.trim().to_string());
    if text.is_empty() {
        return "no details".to_string();
    }
    text.chars().take(MAX_DETAIL_CHARS).collect()
}

/// Seconds form only; Trello does not send HTTP dates here.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Trello IDs and short links are alphanumeric. Anything else would change
/// the request path.
fn segment(id: &str) -> PlannerResult<&str> {
    let id = id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::Validation {
            status: None,
            detail: format!("'{id}' is not a valid Trello ID"),
        }
        .into());
    }
    Ok(id)
}
