//! Integration tests for planner-core: generate a board, edit it, and tear
//! it down again against an in-memory Trello.

use std::{collections::VecDeque, sync::Mutex};

use planner_core::{
    application::{
        ApiError, BoardDeletion, BoardDraft, BoardEditor, BoardGenerator, CardDraft, CardUpdate,
        DeletionOutcome, EditOperation, Prompter, TrelloApi,
    },
    domain::{
        Board, BoardList, BoardTemplate, Card, CardTemplate, EntityKind, Label, LabelColor,
        ListTemplate, Member,
    },
    error::{ErrorKind, PlannerError, PlannerResult},
};

// ── In-memory Trello ─────────────────────────────────────────────────────────

#[derive(Default)]
struct State {
    next_id: usize,
    boards: Vec<Board>,
    lists: Vec<(BoardList, bool)>,
    cards: Vec<Card>,
}

impl State {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

#[derive(Default)]
struct InMemoryTrello {
    state: Mutex<State>,
}

fn not_found(resource: String) -> PlannerError {
    ApiError::NotFound { resource }.into()
}

impl InMemoryTrello {
    fn open_list_names(&self, board_id: &str) -> Vec<String> {
        self.board_lists(board_id)
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect()
    }

    fn card_names(&self, list_id: &str) -> Vec<String> {
        self.list_cards(list_id)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect()
    }
}

impl TrelloApi for InMemoryTrello {
    fn verify_credentials(&self) -> PlannerResult<Member> {
        Ok(Member {
            id: "m1".into(),
            username: "planner".into(),
            full_name: None,
        })
    }

    fn create_board(&self, draft: &BoardDraft) -> PlannerResult<Board> {
        let mut state = self.state.lock().unwrap();
        let board = Board::new(state.id("b"), draft.name.clone(), None);
        state.boards.push(board.clone());
        Ok(board)
    }

    fn get_board(&self, board_id: &str) -> PlannerResult<Board> {
        let state = self.state.lock().unwrap();
        state
            .boards
            .iter()
            .find(|b| b.id == board_id)
            .cloned()
            .ok_or_else(|| not_found(format!("board {board_id}")))
    }

    fn list_boards(&self) -> PlannerResult<Vec<Board>> {
        Ok(self.state.lock().unwrap().boards.clone())
    }

    fn delete_board(&self, board_id: &str) -> PlannerResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.boards.len();
        state.boards.retain(|b| b.id != board_id);
        if state.boards.len() == before {
            return Err(not_found(format!("board {board_id}")));
        }
        Ok(())
    }

    fn create_list(&self, board_id: &str, name: &str) -> PlannerResult<BoardList> {
        let mut state = self.state.lock().unwrap();
        let list = BoardList {
            id: state.id("l"),
            board_id: board_id.into(),
            name: name.into(),
            position: state.lists.len() as f64,
        };
        state.lists.push((list.clone(), false));
        Ok(list)
    }

    fn board_lists(&self, board_id: &str) -> PlannerResult<Vec<BoardList>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .lists
            .iter()
            .filter(|(l, closed)| l.board_id == board_id && !closed)
            .map(|(l, _)| l.clone())
            .collect())
    }

    fn archive_list(&self, list_id: &str) -> PlannerResult<()> {
        let mut state = self.state.lock().unwrap();
        let entry = state
            .lists
            .iter_mut()
            .find(|(l, _)| l.id == list_id)
            .ok_or_else(|| not_found(format!("list {list_id}")))?;
        entry.1 = true;
        Ok(())
    }

    fn create_label(&self, board_id: &str, name: &str, color: LabelColor) -> PlannerResult<Label> {
        let mut state = self.state.lock().unwrap();
        let label = Label {
            id: state.id("lb"),
            board_id: board_id.into(),
            name: name.into(),
            color: Some(color),
        };
        Ok(label)
    }

    fn create_card(&self, draft: &CardDraft) -> PlannerResult<Card> {
        let mut state = self.state.lock().unwrap();
        let card = Card {
            id: state.id("c"),
            list_id: draft.list_id.clone(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            label_ids: draft.label_ids.clone(),
            position: state.cards.len() as f64,
            closed: false,
        };
        state.cards.push(card.clone());
        Ok(card)
    }

    fn list_cards(&self, list_id: &str) -> PlannerResult<Vec<Card>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .cards
            .iter()
            .filter(|c| c.list_id == list_id && !c.closed)
            .cloned()
            .collect())
    }

    fn update_card(&self, card_id: &str, update: &CardUpdate) -> PlannerResult<Card> {
        let mut state = self.state.lock().unwrap();
        let card = state
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| not_found(format!("card {card_id}")))?;
        if let Some(name) = &update.name {
            card.name = name.clone();
        }
        if let Some(description) = &update.description {
            card.description = Some(description.clone());
        }
        if let Some(closed) = update.closed {
            card.closed = closed;
        }
        Ok(card.clone())
    }

    fn move_card(&self, card_id: &str, list_id: &str) -> PlannerResult<Card> {
        let mut state = self.state.lock().unwrap();
        let card = state
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| not_found(format!("card {card_id}")))?;
        card.list_id = list_id.into();
        Ok(card.clone())
    }

    fn delete_card(&self, card_id: &str) -> PlannerResult<()> {
        let mut state = self.state.lock().unwrap();
        state.cards.retain(|c| c.id != card_id);
        Ok(())
    }
}

// ── Scripted terminal ────────────────────────────────────────────────────────

enum Answer {
    Pick(usize),
    PickMany(Vec<usize>),
}

#[derive(Default)]
struct Script {
    answers: VecDeque<Answer>,
    notices: Vec<String>,
}

impl Script {
    fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            notices: Vec::new(),
        }
    }
}

impl Prompter for Script {
    fn select(&mut self, prompt: &str, items: &[String]) -> PlannerResult<Option<usize>> {
        match self.answers.pop_front() {
            Some(Answer::Pick(i)) => {
                assert!(i < items.len(), "bad answer for '{prompt}'");
                Ok(Some(i))
            }
            _ => panic!("unexpected select: {prompt}"),
        }
    }

    fn multi_select(&mut self, prompt: &str, _items: &[String]) -> PlannerResult<Vec<usize>> {
        match self.answers.pop_front() {
            Some(Answer::PickMany(picked)) => Ok(picked),
            _ => panic!("unexpected multi-select: {prompt}"),
        }
    }

    fn input(&mut self, prompt: &str, _allow_empty: bool) -> PlannerResult<Option<String>> {
        panic!("unexpected input: {prompt}")
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> PlannerResult<bool> {
        panic!("unexpected confirm: {prompt}")
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

const EXIT: usize = EditOperation::ALL.len();

fn sprint_template() -> BoardTemplate {
    BoardTemplate::new("Career Sprint", "One week at a time")
        .with_label("Learning", LabelColor::Blue)
        .with_label("Networking", LabelColor::Purple)
        .with_list(
            ListTemplate::new("This Week")
                .with_card(CardTemplate::new("C1").labels(["Learning"]))
                .with_card(CardTemplate::new("C2"))
                .with_card(CardTemplate::new("C3").labels(["Networking", "Learning"])),
        )
        .with_list(ListTemplate::new("Done"))
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn generated_board_matches_the_plan() {
    let trello = InMemoryTrello::default();
    let template = sprint_template();

    let result = BoardGenerator::new(&trello).generate(&template, None).unwrap();

    assert!(result.is_complete());
    assert_eq!(
        result.summary(&template.description),
        BoardGenerator::plan(&template, None).unwrap()
    );
    assert_eq!(trello.open_list_names(&result.board.id), ["This Week", "Done"]);
}

#[test]
fn undefined_label_fails_only_that_card() {
    let trello = InMemoryTrello::default();
    let template = sprint_template().with_list(
        ListTemplate::new("Later")
            .with_card(CardTemplate::new("Mystery").labels(["Nope"]))
            .with_card(CardTemplate::new("Fine")),
    );

    let result = BoardGenerator::new(&trello).generate(&template, None).unwrap();

    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].error.kind(), ErrorKind::UnknownEntityReference);
    assert_eq!(result.created_cards.len(), 4);
    let later = &result.created_lists[2];
    assert_eq!(trello.card_names(&later.id), ["Fine"]);
}

#[test]
fn moved_cards_land_in_the_destination() {
    let trello = InMemoryTrello::default();
    let result = BoardGenerator::new(&trello)
        .generate(&sprint_template(), None)
        .unwrap();
    let (this_week, done) = (&result.created_lists[0], &result.created_lists[1]);

    let mut script = Script::new([
        Answer::Pick(1),               // Move cards
        Answer::Pick(0),               // from "This Week"
        Answer::PickMany(vec![0, 2]),  // C1 and C3
        Answer::Pick(1),               // to "Done"
        Answer::Pick(EXIT),
    ]);
    let session = BoardEditor::new(&trello, &mut script)
        .run(Some(result.board.id.as_str()))
        .unwrap();

    assert_eq!(session.operations.len(), 1);
    assert_eq!(session.operations[0].operation, EditOperation::MoveCards);
    assert_eq!(session.operations[0].succeeded(), 2);
    assert_eq!(session.failed(), 0);
    assert!(script.notices.iter().any(|n| n.starts_with("Editing board 'Career Sprint'")));
    assert_eq!(trello.card_names(&this_week.id), ["C2"]);
    assert_eq!(trello.card_names(&done.id), ["C1", "C3"]);
}

#[test]
fn archived_list_and_deleted_board_disappear() {
    let trello = InMemoryTrello::default();
    let result = BoardGenerator::new(&trello)
        .generate(&sprint_template(), Some("Throwaway"))
        .unwrap();
    let board_id = result.board.id.clone();
    let done_id = result.created_lists[1].id.clone();

    let mut script = Script::default();
    let outcome = BoardDeletion::new(&trello, &mut script)
        .assume_yes(true)
        .delete_list(Some(board_id.as_str()), Some(done_id.as_str()))
        .unwrap();
    assert_eq!(
        outcome,
        DeletionOutcome::Removed {
            entity: EntityKind::List,
            id: done_id,
            name: "Done".into(),
        }
    );
    assert_eq!(trello.open_list_names(&board_id), ["This Week"]);

    let outcome = BoardDeletion::new(&trello, &mut script)
        .assume_yes(true)
        .delete_board(Some(board_id.as_str()))
        .unwrap();
    assert!(matches!(outcome, DeletionOutcome::Removed { entity: EntityKind::Board, .. }));
    assert!(trello.list_boards().unwrap().is_empty());

    let err = BoardDeletion::new(&trello, &mut script)
        .assume_yes(true)
        .delete_board(Some(board_id.as_str()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
