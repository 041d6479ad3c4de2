//! Table controller.
//!
//! One task owns the table state (current page, selection, loading flag,
//! picker visibility). Commands from the UI and completions from spawned
//! fetches are applied one at a time, so page changes and selection
//! requests take effect in arrival order.
//!
//! Every spawned fetch carries a request id. A newer request supersedes the
//! older one: the old task is aborted and a completion that still slips
//! through with a stale id is dropped.

use crate::api::models::Page;
use crate::core::accumulator::{
    Accumulation, AccumulationOutcome, SelectionPlan, fetch_forward, plan_selection,
};
use crate::core::page_loader::PageState;
use crate::core::selection::{Selection, parse_count};
use crate::core::source::{PAGE_SIZE, PageSource};
use crate::error::{FetchError, TableError};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Requests accepted by the controller.
#[derive(Debug)]
pub enum TableCommand {
    /// Show another page (zero-based index)
    ChangePage(usize),
    /// Select the first N records from the current page onward; raw picker input
    SelectCount(String),
    /// Toggle one row of the current page (one-based row number)
    ToggleRow(usize),
    /// Header checkbox for the current page
    TogglePage,
    ClearSelection,
    OpenPicker,
    ClosePicker,
    Snapshot(oneshot::Sender<TableSnapshot>),
    Shutdown,
}

#[derive(Debug)]
enum Completion {
    PageLoaded {
        request_id: u64,
        page_index: usize,
        result: Result<Page, FetchError>,
    },
    Accumulated {
        request_id: u64,
        accumulation: Accumulation,
    },
}

/// Immutable view of the table state after a transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSnapshot {
    pub page: PageState,
    pub requested_page: usize,
    pub selection: Selection,
    pub loading: bool,
    pub picker_open: bool,
    pub status: String,
}

struct InFlight {
    request_id: u64,
    handle: JoinHandle<()>,
}

pub struct TableController {
    source: Arc<dyn PageSource>,
    page: PageState,
    requested_page: usize,
    selection: Selection,
    picker_open: bool,
    status: String,
    page_load: Option<InFlight>,
    accumulation: Option<InFlight>,
    deferred_count: Option<usize>,
    last_request_id: u64,
    commands: mpsc::UnboundedReceiver<TableCommand>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    snapshots: watch::Sender<TableSnapshot>,
}

impl TableController {
    /// Start the controller on the current tokio runtime and load `initial_page`.
    pub fn spawn(source: Arc<dyn PageSource>, initial_page: usize) -> TableHandle {
        let (command_tx, commands) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (snapshots, snapshot_rx) = watch::channel(TableSnapshot::default());

        let controller = TableController {
            source,
            page: PageState::default(),
            requested_page: initial_page,
            selection: Selection::new(),
            picker_open: false,
            status: String::new(),
            page_load: None,
            accumulation: None,
            deferred_count: None,
            last_request_id: 0,
            commands,
            completion_tx,
            completion_rx,
            snapshots,
        };
        tokio::spawn(controller.run());

        let handle = TableHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        // Cannot fail: the controller holds the receiver
        let _ = handle.change_page(initial_page);
        handle
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(TableCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(completion) = self.completion_rx.recv() => {
                    self.handle_completion(completion);
                }
            }
            self.publish();
        }

        self.cancel_page_load();
        self.cancel_accumulation();
        log::debug!("Table controller stopped");
    }

    fn handle_command(&mut self, command: TableCommand) {
        match command {
            TableCommand::ChangePage(page_index) => {
                self.cancel_accumulation();
                self.cancel_page_load();
                if self.deferred_count.take().is_some() {
                    log::debug!("Dropping deferred selection for page {}", page_index);
                }
                self.requested_page = page_index;
                self.start_page_load(page_index);
            }
            TableCommand::SelectCount(input) => {
                let Some(count) = parse_count(&input) else {
                    log::debug!("Ignoring selection count input {:?}", input);
                    return;
                };

                if self.page_load.is_some() {
                    log::debug!("Deferring selection of {} until the page has loaded", count);
                    self.deferred_count = Some(count);
                } else {
                    self.run_select(count);
                }
            }
            TableCommand::ToggleRow(row) => {
                self.cancel_accumulation();
                match row.checked_sub(1).and_then(|i| self.page.records.get(i)) {
                    Some(record) => {
                        let record = record.clone();
                        self.selection.toggle(&record);
                        self.status = format!("{} rows selected", self.selection.len());
                    }
                    None => self.status = format!("No row {} on this page", row),
                }
            }
            TableCommand::TogglePage => {
                self.cancel_accumulation();
                self.selection.toggle_all(&self.page.records);
                self.status = format!("{} rows selected", self.selection.len());
            }
            TableCommand::ClearSelection => {
                self.cancel_accumulation();
                self.selection.clear();
                self.status = "Selection cleared".to_string();
            }
            TableCommand::OpenPicker => self.picker_open = true,
            TableCommand::ClosePicker => self.picker_open = false,
            TableCommand::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            TableCommand::Shutdown => {}
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::PageLoaded {
                request_id,
                page_index,
                result,
            } => {
                if !Self::is_current(&self.page_load, request_id) {
                    log::debug!("Dropping stale page {} (request {})", page_index, request_id);
                    return;
                }
                self.page_load = None;

                match result {
                    Ok(page) => {
                        log::debug!(
                            "Loaded page {} ({} records, {} total)",
                            page_index,
                            page.len(),
                            page.total_records
                        );
                        self.page.apply(page_index, page);
                        self.status = format!("Page {}", page_index + 1);
                    }
                    Err(e) => {
                        log::error!("Fetching error: {} ({})", e, e.endpoint());
                        self.status = format!("Page {} unavailable", page_index + 1);
                    }
                }

                if let Some(count) = self.deferred_count.take() {
                    self.run_select(count);
                }
            }
            Completion::Accumulated {
                request_id,
                accumulation,
            } => {
                if !Self::is_current(&self.accumulation, request_id) {
                    log::debug!("Dropping stale selection (request {})", request_id);
                    return;
                }
                self.accumulation = None;

                let aborted = accumulation.is_aborted();
                self.status = match &accumulation.outcome {
                    AccumulationOutcome::Complete | AccumulationOutcome::Exhausted => {
                        format!("{} rows selected", accumulation.records.len())
                    }
                    AccumulationOutcome::Aborted(_) => format!(
                        "{} rows selected before a fetch failed",
                        accumulation.records.len()
                    ),
                };
                self.selection = accumulation.into_selection();
                if !aborted {
                    self.picker_open = false;
                }
            }
        }
    }

    fn run_select(&mut self, count: usize) {
        self.cancel_accumulation();

        match plan_selection(&self.page, count, PAGE_SIZE) {
            SelectionPlan::Immediate(selection) => {
                self.selection = selection;
                self.picker_open = false;
                self.status = format!("{} rows selected", self.selection.len());
            }
            SelectionPlan::FetchForward(plan) => {
                let request_id = self.next_request_id();
                let source = Arc::clone(&self.source);
                let tx = self.completion_tx.clone();
                log::debug!(
                    "Selecting {} rows from page {} onward (request {})",
                    count,
                    self.page.page_index,
                    request_id
                );

                let handle = tokio::spawn(async move {
                    let accumulation = fetch_forward(source.as_ref(), plan).await;
                    let _ = tx.send(Completion::Accumulated {
                        request_id,
                        accumulation,
                    });
                });
                self.accumulation = Some(InFlight { request_id, handle });
            }
        }
    }

    fn start_page_load(&mut self, page_index: usize) {
        let request_id = self.next_request_id();
        let source = Arc::clone(&self.source);
        let tx = self.completion_tx.clone();

        let handle = tokio::spawn(async move {
            let result = source.fetch_page(page_index, PAGE_SIZE).await;
            let _ = tx.send(Completion::PageLoaded {
                request_id,
                page_index,
                result,
            });
        });
        self.page_load = Some(InFlight { request_id, handle });
    }

    fn cancel_page_load(&mut self) {
        if let Some(in_flight) = self.page_load.take() {
            log::debug!("Superseding page load (request {})", in_flight.request_id);
            in_flight.handle.abort();
        }
    }

    fn cancel_accumulation(&mut self) {
        if let Some(in_flight) = self.accumulation.take() {
            log::debug!("Cancelling selection (request {})", in_flight.request_id);
            in_flight.handle.abort();
        }
    }

    fn is_current(in_flight: &Option<InFlight>, request_id: u64) -> bool {
        in_flight
            .as_ref()
            .is_some_and(|f| f.request_id == request_id)
    }

    fn next_request_id(&mut self) -> u64 {
        self.last_request_id += 1;
        self.last_request_id
    }

    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            page: self.page.clone(),
            requested_page: self.requested_page,
            selection: self.selection.clone(),
            loading: self.page_load.is_some() || self.accumulation.is_some(),
            picker_open: self.picker_open,
            status: self.status.clone(),
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}

/// Cloneable front door to a running [`TableController`].
#[derive(Clone)]
pub struct TableHandle {
    commands: mpsc::UnboundedSender<TableCommand>,
    snapshots: watch::Receiver<TableSnapshot>,
}

impl TableHandle {
    pub fn send(&self, command: TableCommand) -> Result<(), TableError> {
        self.commands
            .send(command)
            .map_err(|_| TableError::ControllerStopped)
    }

    pub fn change_page(&self, page_index: usize) -> Result<(), TableError> {
        self.send(TableCommand::ChangePage(page_index))
    }

    pub fn select_count(&self, input: impl Into<String>) -> Result<(), TableError> {
        self.send(TableCommand::SelectCount(input.into()))
    }

    pub fn toggle_row(&self, row: usize) -> Result<(), TableError> {
        self.send(TableCommand::ToggleRow(row))
    }

    pub fn toggle_page(&self) -> Result<(), TableError> {
        self.send(TableCommand::TogglePage)
    }

    pub fn clear_selection(&self) -> Result<(), TableError> {
        self.send(TableCommand::ClearSelection)
    }

    pub fn open_picker(&self) -> Result<(), TableError> {
        self.send(TableCommand::OpenPicker)
    }

    pub fn close_picker(&self) -> Result<(), TableError> {
        self.send(TableCommand::ClosePicker)
    }

    /// State after every command sent before this call has been applied
    pub async fn snapshot(&self) -> Result<TableSnapshot, TableError> {
        let (reply, response) = oneshot::channel();
        self.send(TableCommand::Snapshot(reply))?;
        response.await.map_err(|_| TableError::ControllerStopped)
    }

    /// Like [`snapshot`](Self::snapshot), then wait until nothing is in flight
    pub async fn settle(&self) -> Result<TableSnapshot, TableError> {
        let snapshot = self.snapshot().await?;
        if !snapshot.loading {
            return Ok(snapshot);
        }

        let mut snapshots = self.snapshots.clone();
        let settled = snapshots
            .wait_for(|s| !s.loading)
            .await
            .map_err(|_| TableError::ControllerStopped)?
            .clone();
        Ok(settled)
    }

    pub fn subscribe(&self) -> watch::Receiver<TableSnapshot> {
        self.snapshots.clone()
    }

    pub fn shutdown(&self) {
        let _ = self.commands.send(TableCommand::Shutdown);
    }
}
