//! Board Generator - materializes a [`BoardTemplate`] on Trello.
//!
//! Workflow:
//! 1. Validate the template
//! 2. Create the board (the only fatal step)
//! 3. Create lists, then labels, in template order
//! 4. Create cards, resolving list and label names to the IDs from 3
//!
//! Once the board exists every failure is recorded against its item and the
//! run carries on.

use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ports::{BoardDraft, CardDraft, GenerationEvent, GenerationObserver, TrelloApi},
        services::Interrupt,
    },
    domain::{
        BoardSummary, BoardTemplate, Card, CardTemplate, DomainError, DomainValidator, GenerationResult,
        ItemFailure, ItemRef,
    },
    error::{PlannerError, PlannerResult},
};

pub struct BoardGenerator<'a> {
    api: &'a dyn TrelloApi,
    observer: &'a dyn GenerationObserver,
    interrupt: Interrupt,
}

/// Name-to-ID maps for one run, keyed by trimmed name. `None` marks a label
/// that was defined but could not be created.
#[derive(Default)]
struct CreatedIds<'t> {
    lists: HashMap<&'t str, String>,
    labels: HashMap<&'t str, Option<String>>,
}

impl<'a> BoardGenerator<'a> {
    pub fn new(api: &'a dyn TrelloApi) -> Self {
        Self {
            api,
            observer: &(),
            interrupt: Interrupt::default(),
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn GenerationObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// What a fully successful run would create. Makes no API calls.
    pub fn plan(template: &BoardTemplate, name_override: Option<&str>) -> PlannerResult<BoardSummary> {
        DomainValidator::validate_template(template)?;
        if let Some(name) = name_override {
            BoardDraft::new(name, &template.description)?;
        }
        Ok(BoardSummary::from_template(template, name_override))
    }

    #[instrument(skip_all, fields(template = %template.name))]
    pub fn generate(
        &self,
        template: &BoardTemplate,
        name_override: Option<&str>,
    ) -> PlannerResult<GenerationResult> {
        DomainValidator::validate_template(template)?;
        let draft = BoardDraft::new(
            name_override.unwrap_or(template.name.as_str()),
            &template.description,
        )?;

        if self.interrupt.is_raised() {
            return Err(PlannerError::Interrupted);
        }

        self.observer.on_event(&GenerationEvent::Started {
            total: 1 + template.lists.len() + template.labels.len() + template.card_count(),
        });

        let board = self.api.create_board(&draft)?;
        info!(board_id = %board.id, url = %board.url, "Board created");
        self.observer.on_event(&GenerationEvent::BoardCreated(&board));

        let mut result = GenerationResult {
            board,
            created_lists: Vec::new(),
            created_labels: Vec::new(),
            created_cards: Vec::new(),
            failures: Vec::new(),
            interrupted: false,
        };
        let mut ids = CreatedIds::default();

        if self.create_lists(template, &mut result, &mut ids)
            && self.create_labels(template, &mut result, &mut ids)
        {
            self.create_cards(template, &mut result, &ids);
        }

        info!(
            lists = result.created_lists.len(),
            labels = result.created_labels.len(),
            cards = result.created_cards.len(),
            failures = result.failures.len(),
            interrupted = result.interrupted,
            "Generation finished"
        );
        Ok(result)
    }

    /// Returns `false` when interrupted.
    fn create_lists<'t>(
        &self,
        template: &'t BoardTemplate,
        result: &mut GenerationResult,
        ids: &mut CreatedIds<'t>,
    ) -> bool {
        for list in &template.lists {
            if self.stop(result) {
                return false;
            }
            match self.api.create_list(&result.board.id, list.name.trim()) {
                Ok(created) => {
                    debug!(list = %created.name, id = %created.id, "List created");
                    self.observer.on_event(&GenerationEvent::ListCreated(&created));
                    ids.lists.insert(list.name.trim(), created.id.clone());
                    result.created_lists.push(created);
                }
                Err(error) => self.fail(
                    result,
                    ItemRef::List {
                        name: list.name.clone(),
                    },
                    error,
                ),
            }
        }
        true
    }

    fn create_labels<'t>(
        &self,
        template: &'t BoardTemplate,
        result: &mut GenerationResult,
        ids: &mut CreatedIds<'t>,
    ) -> bool {
        for label in &template.labels {
            if self.stop(result) {
                return false;
            }
            match self
                .api
                .create_label(&result.board.id, label.name.trim(), label.color)
            {
                Ok(created) => {
                    debug!(label = %created.name, id = %created.id, "Label created");
                    self.observer.on_event(&GenerationEvent::LabelCreated(&created));
                    ids.labels.insert(label.name.trim(), Some(created.id.clone()));
                    result.created_labels.push(created);
                }
                Err(error) => {
                    ids.labels.insert(label.name.trim(), None);
                    self.fail(
                        result,
                        ItemRef::Label {
                            name: label.name.clone(),
                        },
                        error,
                    );
                }
            }
        }
        true
    }

    fn create_cards(&self, template: &BoardTemplate, result: &mut GenerationResult, ids: &CreatedIds<'_>) {
        for list in &template.lists {
            let list_id = ids.lists.get(list.name.trim());
            for card in &list.cards {
                if self.stop(result) {
                    return;
                }
                let item = ItemRef::Card {
                    list: list.name.clone(),
                    name: card.name.clone(),
                };

                let Some(list_id) = list_id else {
                    let error = DomainError::UnresolvedList {
                        card: card.name.clone(),
                        list: list.name.clone(),
                    };
                    self.fail(result, item, error.into());
                    continue;
                };

                match self.create_card(list_id, card, &ids.labels) {
                    Ok(created) => {
                        debug!(card = %created.name, id = %created.id, "Card created");
                        self.observer.on_event(&GenerationEvent::CardCreated(&created));
                        result.created_cards.push(created);
                    }
                    Err(error) => self.fail(result, item, error),
                }
            }
        }
    }

    fn create_card(
        &self,
        list_id: &str,
        card: &CardTemplate,
        labels: &HashMap<&str, Option<String>>,
    ) -> PlannerResult<Card> {
        let mut label_ids = Vec::with_capacity(card.labels.len());
        for name in &card.labels {
            match labels.get(name.trim()) {
                Some(Some(id)) => label_ids.push(id.clone()),
                Some(None) => {
                    warn!(card = %card.name, label = %name, "Label was not created; omitting it from card");
                }
                None => {
                    return Err(DomainError::UnknownLabel {
                        card: card.name.clone(),
                        label: name.clone(),
                    }
                    .into());
                }
            }
        }

        let draft = CardDraft::new(list_id, &card.name)?
            .with_description(&card.description)
            .with_labels(label_ids);
        self.api.create_card(&draft)
    }

    fn fail(&self, result: &mut GenerationResult, item: ItemRef, error: PlannerError) {
        warn!(item = %item, kind = %error.kind(), error = %error, "Item failed");
        let failure = ItemFailure { item, error };
        self.observer.on_event(&GenerationEvent::ItemFailed(&failure));
        result.failures.push(failure);
    }

    fn stop(&self, result: &mut GenerationResult) -> bool {
        if self.interrupt.is_raised() {
            warn!("Interrupted; stopping generation");
            result.interrupted = true;
        }
        result.interrupted
    }
}
