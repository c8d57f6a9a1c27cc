use std::{sync::Arc, time::Duration};

use color_eyre::Result;
use ratatui::DefaultTerminal;
use tabula_data::{DataError, RecordSource, Sector, Session, SessionStore};
use tabula_list::{DynRecord, ListView, Record};
use tabula_ui::{
    ListNavigation, StatusLine,
    hotkey::Hotkey,
    modal::ModalManager,
    search_filter::SearchFilter,
    table::ListTableState,
    top_bar_view::LIST_HOTKEYS,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::{
    app_state::{AppEvent, ListEvent},
    config::Config,
};

pub const APP_NAME: &str = r"
 _        _           _
| |_ __ _| |__  _   _| | __ _
| __/ _` | '_ \| | | | |/ _` |
| || (_| | |_) | |_| | | (_| |
 \__\__,_|_.__/ \__,_|_|\__,_|
";

/// How long the main loop waits for a key before servicing events
pub const TICK: Duration = Duration::from_millis(50);

/// The main application which holds the state and logic of the application.
pub struct App<'a> {
    pub(crate) running: bool,
    pub(crate) config: Config,
    pub(crate) source: Arc<dyn RecordSource>,
    pub(crate) session_store: Option<SessionStore>,
    pub(crate) sector: Sector,
    pub(crate) page_size: usize,
    pub(crate) list: ListView<DynRecord>,
    pub(crate) table_state: ListTableState,
    pub(crate) search_filter: SearchFilter,
    /// Filter that `v` cycles, if any has been focused with `f`
    pub(crate) focused_filter: Option<usize>,
    pub(crate) modal_manager: ModalManager,
    pub(crate) status_line: StatusLine,
    pub(crate) hotkeys: Vec<Hotkey<'a>>,
    pub(crate) events_tx: UnboundedSender<AppEvent>,
    pub(crate) events_rx: UnboundedReceiver<AppEvent>,
    /// Identifies the newest fetch so late results of older ones are dropped
    pub(crate) load_request: u64,
}

impl App<'_> {
    pub fn new(
        config: Config,
        source: Arc<dyn RecordSource>,
        session_store: Option<SessionStore>,
        sector: Sector,
        page_size: usize,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let page_size = page_size.max(1);
        let list = list_for(
            sector,
            Vec::new(),
            &config.list.page_size_options,
            page_size,
            &events_tx,
        );
        Self {
            running: false,
            config,
            source,
            session_store,
            sector,
            page_size,
            list,
            table_state: ListTableState::new(),
            search_filter: SearchFilter::new(),
            focused_filter: None,
            modal_manager: ModalManager::new(),
            status_line: StatusLine::new(),
            hotkeys: LIST_HOTKEYS.to_vec(),
            events_tx,
            events_rx,
            load_request: 0,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;
        self.load_sector(self.sector);
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.drain_events();
        }
        info!("tabula exiting");
        Ok(())
    }

    pub(crate) fn build_list(
        &self,
        records: Vec<DynRecord>,
    ) -> ListView<DynRecord> {
        list_for(
            self.sector,
            records,
            &self.config.list.page_size_options,
            self.page_size,
            &self.events_tx,
        )
    }

    /// Shows an empty, loading list for `sector` and fetches its records
    /// in the background
    pub(crate) fn load_sector(&mut self, sector: Sector) {
        self.sector = sector;
        self.load_request += 1;
        self.list = self.build_list(Vec::new());
        self.list.set_loading(true);
        self.search_filter.cancel();
        self.focused_filter = None;
        self.table_state = ListTableState::new();
        self.modal_manager.close_active_modal();
        self.status_line
            .set_message(format!("Loading {}…", sector.title()));

        let request = self.load_request;
        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        info!(%sector, source = source.name(), "loading sector");
        tokio::spawn(async move {
            let result = source.fetch(sector).await;
            let _ = tx.send(AppEvent::Loaded {
                request,
                sector,
                result,
            });
        });
    }

    /// Switches sector and remembers the choice
    pub(crate) fn switch_sector(&mut self, sector: Sector) {
        if sector == self.sector && !self.list.is_loading() {
            return;
        }
        self.load_sector(sector);
        self.save_session();
    }

    fn finish_load(
        &mut self,
        sector: Sector,
        result: Result<Vec<DynRecord>, DataError>,
    ) {
        match result {
            Ok(records) => {
                info!(%sector, count = records.len(), "sector loaded");
                self.status_line.set_message(format!(
                    "Loaded {} {}",
                    records.len(),
                    sector.entity().to_lowercase()
                ));
                self.list = self.build_list(records);
                self.table_state.table.select(Some(0));
                self.clamp_cursor();
            }
            Err(e) => {
                error!(%sector, error = %e, "sector failed to load");
                self.list.set_loading(false);
                self.status_line.set_error(format!("Could not load: {e}"));
            }
        }
    }

    /// Applies everything queued by the list view and background loads
    pub(crate) fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    pub(crate) fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Loaded {
                request,
                sector,
                result,
            } => {
                if request == self.load_request {
                    self.finish_load(sector, result);
                } else {
                    debug!(%sector, request, "dropping stale load");
                }
            }
            AppEvent::List(ListEvent::RowOpened(id)) => self.open_record(&id),
            AppEvent::List(ListEvent::SelectionChanged(count)) => {
                debug!(count, "selection changed");
                let matching = self.list.view().selected_matching;
                self.status_line.set_message(format!(
                    "{count} selected ({matching} matching the current view)"
                ));
            }
            AppEvent::List(ListEvent::PageChanged(page)) => {
                debug!(page, "page changed");
                let total = self.list.pagination().total_pages;
                self.status_line
                    .set_message(format!("Page {page} of {total}"));
            }
        }
    }

    /// Opens the detail modal for the record with identifier `id`
    fn open_record(&mut self, id: &str) {
        let Some(record) =
            self.list.records().iter().find(|r| self.list.key_of(r) == id)
        else {
            warn!(id, "opened record is gone");
            return;
        };

        let columns = self.list.columns();
        let mut fields: Vec<(String, String)> = columns
            .iter()
            .map(|column| (column.header.clone(), column.render(record)))
            .collect();
        fields.extend(
            record
                .iter()
                .filter(|(key, _)| columns.get(key).is_none())
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );

        let title = match record.field("name") {
            value if value.is_null() => id.to_string(),
            name => format!("{id} · {name}"),
        };
        self.modal_manager.open_record_modal(title, fields);
    }

    pub(crate) fn save_session(&mut self) {
        let Some(store) = &self.session_store else {
            return;
        };
        let session = Session {
            sector: self.sector,
            page_size: self.page_size,
        };
        if let Err(e) = store.save(&session) {
            warn!(error = %e, "failed to save session");
            self.status_line.set_error(format!("Session not saved: {e}"));
        }
    }

    /// Keeps the table cursor within the current page and columns
    pub(crate) fn clamp_cursor(&mut self) {
        let row_count = self.list.pagination().item_range().len();
        ListNavigation::clamp_rows(&mut self.table_state, row_count);
        ListNavigation::clamp_columns(
            &mut self.table_state,
            self.list.columns().len(),
        );
    }

    pub(crate) const fn quit(&mut self) {
        self.running = false;
    }
}

/// A list view for `sector` over `records`, with the callbacks wired to
/// the event channel
fn list_for(
    sector: Sector,
    records: Vec<DynRecord>,
    page_size_options: &[usize],
    page_size: usize,
    events_tx: &UnboundedSender<AppEvent>,
) -> ListView<DynRecord> {
    let schema = sector.schema();
    let filters = schema.filter_descriptors(&records);
    let mut list = ListView::new(
        records,
        schema.column_descriptors(),
        schema.key_extractor(),
    )
    .with_search_fields(schema.search_fields.iter().copied())
    .with_filters(filters)
    .with_page_size_options(page_size_options.to_vec())
    .with_page_size(page_size);

    let tx = events_tx.clone();
    let key_of = schema.key_extractor();
    list.on_row_click(move |record| {
        let _ = tx.send(AppEvent::List(ListEvent::RowOpened(key_of(record))));
    });
    let tx = events_tx.clone();
    list.on_selection_change(move |ids| {
        let _ = tx.send(AppEvent::List(ListEvent::SelectionChanged(ids.len())));
    });
    let tx = events_tx.clone();
    list.on_page_change(move |page| {
        let _ = tx.send(AppEvent::List(ListEvent::PageChanged(page)));
    });
    list
}
